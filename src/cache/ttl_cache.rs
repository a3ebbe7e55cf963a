//! Shared TTL Cache
//!
//! Thread-safe handle over a `CacheStore` with its own background reaper.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use tokio::runtime::Handle;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

use crate::cache::CacheStore;
use crate::error::CacheError;
use crate::tasks::spawn_reaper;

/// Running reaper task plus the means to stop it.
#[derive(Debug)]
struct Reaper {
    shutdown_tx: watch::Sender<bool>,
    handle: JoinHandle<()>,
}

// == Cache ==
/// Concurrency-safe, time-bounded memo of raw response bytes.
///
/// Every entry lives for the TTL given at construction. Reads never extend
/// an entry's lifetime, and stale entries are hidden from `get` even before
/// the reaper sweeps them out.
///
/// # Example
/// ```ignore
/// let cache = Cache::new(Duration::from_secs(300))?;
/// cache.add(url.clone(), body);
/// let hit = cache.get(&url);
/// cache.stop().await;
/// ```
#[derive(Debug)]
pub struct Cache {
    store: Arc<Mutex<CacheStore>>,
    ttl: Duration,
    reaper: Mutex<Option<Reaper>>,
}

impl Cache {
    // == Constructor ==
    /// Creates an empty cache and starts its reaper on the current tokio runtime.
    ///
    /// The reaper sweeps once per `ttl`, so an unread entry is reclaimed
    /// at most `2 * ttl` after insertion.
    ///
    /// # Errors
    /// - `CacheError::InvalidTtl` if `ttl` is zero
    /// - `CacheError::NoRuntime` if called outside a tokio runtime
    pub fn new(ttl: Duration) -> Result<Self, CacheError> {
        if ttl.is_zero() {
            return Err(CacheError::InvalidTtl);
        }
        if Handle::try_current().is_err() {
            return Err(CacheError::NoRuntime);
        }

        let store = Arc::new(Mutex::new(CacheStore::new(ttl)));
        let (shutdown_tx, shutdown_rx) = watch::channel(false);
        let handle = spawn_reaper(store.clone(), ttl, shutdown_rx);

        Ok(Self {
            store,
            ttl,
            reaper: Mutex::new(Some(Reaper {
                shutdown_tx,
                handle,
            })),
        })
    }

    // == Add ==
    /// Inserts or overwrites the entry for `key`, restarting its TTL clock.
    pub fn add(&self, key: impl Into<String>, value: impl Into<Vec<u8>>) {
        let key = key.into();
        debug!(key = %key, "cache add");
        self.lock_store().insert(key, value.into());
    }

    // == Get ==
    /// Returns a copy of the value stored under `key` if it has not expired.
    ///
    /// Never-inserted and expired keys both return `None`.
    pub fn get(&self, key: &str) -> Option<Vec<u8>> {
        let value = self.lock_store().get(key);
        debug!(key = %key, hit = value.is_some(), "cache get");
        value
    }

    // == Stop ==
    /// Signals the reaper to exit and waits for it to finish.
    ///
    /// Calling this more than once is a no-op. Entries remain readable
    /// afterwards but are no longer reclaimed in the background.
    pub async fn stop(&self) {
        let reaper = self
            .reaper
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take();

        let Some(reaper) = reaper else {
            return;
        };

        let _ = reaper.shutdown_tx.send(true);
        if let Err(err) = reaper.handle.await {
            warn!("Cache reaper ended abnormally: {}", err);
        }
    }

    // == Length ==
    /// Returns the number of stored entries, including stale ones not yet reaped.
    pub fn len(&self) -> usize {
        self.lock_store().len()
    }

    // == Is Empty ==
    /// Returns true if nothing is stored.
    pub fn is_empty(&self) -> bool {
        self.lock_store().is_empty()
    }

    /// Returns the TTL applied to every entry.
    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Entries are disposable, so a panic mid-operation never invalidates them.
    fn lock_store(&self) -> MutexGuard<'_, CacheStore> {
        self.store.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Drop for Cache {
    fn drop(&mut self) {
        let reaper = self
            .reaper
            .get_mut()
            .unwrap_or_else(PoisonError::into_inner)
            .take();
        if let Some(reaper) = reaper {
            let _ = reaper.shutdown_tx.send(true);
        }
    }
}
