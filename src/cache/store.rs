//! Cache Store Module
//!
//! Unsynchronized key/value storage with read-time TTL masking.
//! `Cache` wraps it in a mutex shared with the reaper.

use std::collections::HashMap;
use std::time::Duration;

use tokio::time::Instant;

use crate::cache::CacheEntry;

// == Cache Store ==
/// HashMap of memoized payloads with a single fixed TTL.
#[derive(Debug)]
pub struct CacheStore {
    /// Key-value storage
    entries: HashMap<String, CacheEntry>,
    /// Time-to-live applied to every entry
    ttl: Duration,
}

impl CacheStore {
    // == Constructor ==
    /// Creates an empty store whose entries live for `ttl`.
    pub fn new(ttl: Duration) -> Self {
        Self {
            entries: HashMap::new(),
            ttl,
        }
    }

    // == Insert ==
    /// Stores `value` under `key`, overwriting any previous entry and
    /// restarting its TTL clock.
    pub fn insert(&mut self, key: String, value: Vec<u8>) {
        self.entries.insert(key, CacheEntry::new(value));
    }

    // == Get ==
    /// Returns a copy of the value if present and not yet stale.
    ///
    /// Stale entries are left for the reaper; the read path only masks them.
    pub fn get(&self, key: &str) -> Option<Vec<u8>> {
        let now = Instant::now();
        self.entries
            .get(key)
            .filter(|entry| !entry.is_expired_at(now, self.ttl))
            .map(|entry| entry.value.clone())
    }

    // == Purge Expired ==
    /// Removes every entry that is stale at `now`.
    ///
    /// Returns the number of entries removed.
    pub fn purge_expired(&mut self, now: Instant) -> usize {
        let before = self.entries.len();
        let ttl = self.ttl;
        self.entries.retain(|_, entry| !entry.is_expired_at(now, ttl));
        before - self.entries.len()
    }

    // == Length ==
    /// Returns the number of stored entries, including stale ones not yet reaped.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    // == Is Empty ==
    /// Returns true if nothing is stored.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns the TTL applied to entries.
    pub fn ttl(&self) -> Duration {
        self.ttl
    }
}
