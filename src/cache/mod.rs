//! Cache Module
//!
//! Provides an in-memory response cache with TTL expiration and a
//! background reaper.

mod entry;
mod store;
mod ttl_cache;


// Re-export public types
pub use entry::CacheEntry;
pub use store::CacheStore;
pub use ttl_cache::Cache;

// == Public Constants ==
/// Default time-to-live for PokeAPI responses in seconds
pub const DEFAULT_TTL_SECS: u64 = 300;
