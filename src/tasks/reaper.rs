//! TTL Reaper Task
//!
//! Background task that periodically removes expired cache entries so
//! memory stays bounded even for keys that are never read again.

use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::{Instant, MissedTickBehavior};
use tracing::{debug, info};

use crate::cache::CacheStore;

/// Spawns a background task that sweeps expired entries out of `store`.
///
/// The task ticks every `interval`, locking the store only for the sweep
/// itself. It exits at the next tick boundary once `shutdown_rx` observes
/// `true` or its sender is dropped.
///
/// # Arguments
/// * `store` - Store shared with the owning `Cache`
/// * `interval` - Time between sweeps
/// * `shutdown_rx` - Stop signal owned by the `Cache`
///
/// # Returns
/// A JoinHandle that `Cache::stop` awaits.
pub fn spawn_reaper(
    store: Arc<Mutex<CacheStore>>,
    interval: Duration,
    mut shutdown_rx: watch::Receiver<bool>,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        info!(interval_ms = interval.as_millis() as u64, "Starting cache reaper");

        let mut ticker = tokio::time::interval(interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        ticker.tick().await; // skip first immediate tick

        loop {
            tokio::select! {
                _ = ticker.tick() => {}
                changed = shutdown_rx.changed() => {
                    if changed.is_err() || *shutdown_rx.borrow() {
                        break;
                    }
                    continue;
                }
            }

            let removed = {
                let mut guard = store.lock().unwrap_or_else(PoisonError::into_inner);
                guard.purge_expired(Instant::now())
            };

            if removed > 0 {
                info!("Cache reaper: removed {} expired entries", removed);
            } else {
                debug!("Cache reaper: no expired entries found");
            }
        }

        debug!("Cache reaper stopped");
    })
}
