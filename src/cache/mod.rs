//! Cache Module
//!
//! Provides an in-process cache bounded by entry count, estimated byte size
//! and TTL, with oldest-first eviction and pattern invalidation.

mod entry;
mod order;
mod size;
mod stats;
mod store;

#[cfg(test)]
mod property_tests;

use std::sync::Arc;

use tokio::sync::RwLock;

// Re-export public types
pub use entry::CacheEntry;
pub use order::InsertionOrder;
pub use size::{estimate_size, DEFAULT_ENTRY_SIZE};
pub use stats::{CacheCounters, CacheStats, DebugInfo, EntryDebugInfo, SweepReport};
pub use store::{CacheStore, SetOptions};

/// A store shared between tasks. Every mutation, `get` and the expiry sweep
/// included, goes through the write lock.
pub type SharedCache<V> = Arc<RwLock<CacheStore<V>>>;

/// Wraps a store for sharing.
pub fn shared<V>(store: CacheStore<V>) -> SharedCache<V> {
    Arc::new(RwLock::new(store))
}
