//! Cache Entry Module
//!
//! Defines the structure for individual cache entries with TTL and access metadata.

use chrono::{DateTime, Utc};
use tokio::time::{Duration, Instant};

/// Expiry used when `created_at + ttl` would overflow the clock.
const FAR_FUTURE: Duration = Duration::from_secs(100 * 365 * 24 * 60 * 60);

// == Cache Entry ==
/// Represents a single cache entry with value and metadata.
#[derive(Debug, Clone)]
pub struct CacheEntry<V> {
    /// The stored value
    pub value: V,
    /// Monotonic insertion time
    pub created_at: Instant,
    /// Wall-clock insertion time, for reporting
    pub inserted_at: DateTime<Utc>,
    /// Time of the most recent successful read
    pub last_accessed_at: Instant,
    /// Entry is dead from this instant on
    pub expires_at: Instant,
    /// Approximate serialized size, fixed at insertion
    pub size_bytes: usize,
    /// Successful reads since insertion
    pub hit_count: u64,
    /// Informational label, no behavioral effect
    pub category: Option<String>,
    /// Insertion sequence number, unique per store
    pub sequence: u64,
}

impl<V> CacheEntry<V> {
    // == Constructor ==
    /// Creates a new cache entry expiring `ttl` from now.
    ///
    /// # Arguments
    /// * `value` - The value to store
    /// * `ttl` - Time to live, counted from insertion and never extended
    /// * `size_bytes` - Precomputed size estimate
    /// * `category` - Optional label
    /// * `sequence` - Position in insertion order
    pub fn new(
        value: V,
        ttl: Duration,
        size_bytes: usize,
        category: Option<String>,
        sequence: u64,
    ) -> Self {
        let now = Instant::now();
        let expires_at = now.checked_add(ttl).unwrap_or_else(|| now + FAR_FUTURE);

        Self {
            value,
            created_at: now,
            inserted_at: Utc::now(),
            last_accessed_at: now,
            expires_at,
            size_bytes,
            hit_count: 0,
            category,
            sequence,
        }
    }

    // == Is Expired ==
    /// Checks if the entry has expired at `now`.
    ///
    /// An entry is expired once `now` is greater than or equal to its
    /// expiration time, so a TTL of `T` makes the entry unreadable at `T`.
    pub fn is_expired_at(&self, now: Instant) -> bool {
        now >= self.expires_at
    }

    // == Age ==
    /// Time elapsed between insertion and `now`.
    pub fn age_at(&self, now: Instant) -> Duration {
        now.saturating_duration_since(self.created_at)
    }

    // == Record Hit ==
    /// Marks a successful read at `now`.
    pub fn record_hit(&mut self, now: Instant) {
        self.hit_count += 1;
        self.last_accessed_at = now;
    }
}
