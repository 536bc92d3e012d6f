//! Cache Module
//!
//! In-memory response cache with TTL expiration and LRU eviction.

mod entry;
mod lru;
mod stats;
mod store;

#[cfg(test)]
mod property_tests;

// Re-export public types
pub use entry::{CacheEntry, CachedResponse};
pub use lru::LruTracker;
pub use stats::CacheStats;
pub use store::ResponseCache;
