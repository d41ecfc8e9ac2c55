//! Cache Statistics Module
//!
//! Tracks cache performance counters and defines the snapshot types returned
//! by `stats` and `debug_info`.

use chrono::{DateTime, Utc};
use serde::Serialize;

// == Cache Counters ==
/// Monotonic counters kept by the store. Reset only by `clear`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CacheCounters {
    /// Number of successful cache retrievals
    pub hits: u64,
    /// Number of failed cache retrievals (key not found or expired)
    pub misses: u64,
    /// Number of entries evicted to make room
    pub evictions: u64,
    /// Number of entries removed because their TTL elapsed
    pub expirations: u64,
    /// Number of `set` calls rejected as oversized
    pub rejections: u64,
}

impl CacheCounters {
    // == Constructor ==
    /// Creates counters with every value at zero.
    pub fn new() -> Self {
        Self::default()
    }

    // == Hit Rate ==
    /// Calculates the cache hit rate.
    ///
    /// Returns hits / (hits + misses), or 0.0 if no requests have been made.
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            self.hits as f64 / total as f64
        }
    }

    pub fn record_hit(&mut self) {
        self.hits += 1;
    }

    pub fn record_miss(&mut self) {
        self.misses += 1;
    }

    pub fn record_eviction(&mut self) {
        self.evictions += 1;
    }

    pub fn record_expirations(&mut self, count: u64) {
        self.expirations += count;
    }

    pub fn record_rejection(&mut self) {
        self.rejections += 1;
    }

    // == Reset ==
    /// Zeroes every counter.
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

// == Cache Stats ==
/// Read-only statistics snapshot.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CacheStats {
    pub hits: u64,
    pub misses: u64,
    /// hits / (hits + misses), 0 when nothing was requested
    pub hit_rate: f64,
    /// Sum of the estimated sizes of stored entries
    pub size_bytes: usize,
    pub entry_count: usize,
    /// Insertion time of the oldest stored entry
    pub oldest_entry: Option<DateTime<Utc>>,
    /// Insertion time of the newest stored entry
    pub newest_entry: Option<DateTime<Utc>>,
    pub evictions: u64,
    pub expirations: u64,
    pub rejections: u64,
}

// == Debug Info ==
/// Per-entry detail exposed by `debug_info`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EntryDebugInfo {
    pub key: String,
    pub size_bytes: usize,
    /// Milliseconds since insertion
    pub age_ms: u64,
    pub hits: u64,
    pub category: Option<String>,
    /// Expired at snapshot time but not yet removed
    pub expired: bool,
}

/// Statistics plus every stored entry, oldest first.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DebugInfo {
    #[serde(flatten)]
    pub stats: CacheStats,
    pub items: Vec<EntryDebugInfo>,
}

// == Sweep Report ==
/// What a single expiry sweep reclaimed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SweepReport {
    pub entries_removed: usize,
    pub bytes_reclaimed: usize,
}
