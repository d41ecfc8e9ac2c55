//! Cache Store Module
//!
//! Main cache engine combining HashMap storage with insertion-order eviction,
//! byte and item capacity limits, and TTL expiration.

use std::collections::HashMap;

use fancy_regex::Regex;
use serde::Serialize;
use tokio::time::{Duration, Instant};
use tracing::{debug, warn};

use crate::cache::{
    estimate_size, CacheCounters, CacheEntry, CacheStats, DebugInfo, EntryDebugInfo,
    InsertionOrder, SweepReport,
};
use crate::config::CacheConfig;
use crate::error::{CacheError, Result};

// == Set Options ==
/// Per-entry options accepted by [`CacheStore::set_with`].
#[derive(Debug, Clone, Default)]
pub struct SetOptions {
    /// TTL for this entry; the store's default TTL when `None`
    pub ttl: Option<Duration>,
    /// Informational label shown in debug output
    pub category: Option<String>,
}

impl SetOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_ttl(mut self, ttl: Duration) -> Self {
        self.ttl = Some(ttl);
        self
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }
}

// == Cache Store ==
/// Size- and age-bounded cache with oldest-first eviction.
///
/// Every operation runs to completion without blocking. Absence, expiry and
/// oversized values are reported through return values and logs, never errors.
#[derive(Debug)]
pub struct CacheStore<V> {
    /// Key-value storage
    entries: HashMap<String, CacheEntry<V>>,
    /// Eviction order
    order: InsertionOrder,
    /// Performance counters
    counters: CacheCounters,
    /// Sum of `size_bytes` over `entries`
    size_bytes: usize,
    /// Limits fixed at construction
    config: CacheConfig,
}

impl<V> CacheStore<V> {
    // == Constructor ==
    /// Creates a new empty store with the given limits.
    ///
    /// A `max_items` of zero is raised to one.
    pub fn new(mut config: CacheConfig) -> Self {
        config.max_items = config.max_items.max(1);
        Self {
            entries: HashMap::new(),
            order: InsertionOrder::new(),
            counters: CacheCounters::new(),
            size_bytes: 0,
            config,
        }
    }

    /// Limits this store was built with.
    pub fn config(&self) -> &CacheConfig {
        &self.config
    }

    // == Delete ==
    /// Removes an entry by key. Returns whether an entry was removed.
    pub fn delete(&mut self, key: &str) -> bool {
        self.remove_entry(key).is_some()
    }

    // == Clear ==
    /// Removes every entry and resets all statistics.
    pub fn clear(&mut self) {
        self.entries.clear();
        self.order.clear();
        self.counters.reset();
        self.size_bytes = 0;
    }

    // == Invalidate ==
    /// Removes every entry whose key matches the regular expression `pattern`.
    ///
    /// Returns the number of entries removed. Fails only when `pattern` does
    /// not compile, in which case the cache is left untouched.
    pub fn invalidate(&mut self, pattern: &str) -> Result<usize> {
        let regex = Regex::new(pattern)
            .map_err(|err| CacheError::InvalidPattern(format!("'{}': {}", pattern, err)))?;
        Ok(self.invalidate_regex(&regex))
    }

    /// Removes every entry whose key matches a precompiled expression.
    ///
    /// Each stored key is tested exactly once. A key the engine fails to match
    /// (e.g. backtracking limit) is kept.
    pub fn invalidate_regex(&mut self, regex: &Regex) -> usize {
        let matched: Vec<String> = self
            .entries
            .keys()
            .filter(|key| match regex.is_match(key) {
                Ok(is_match) => is_match,
                Err(err) => {
                    warn!("Pattern '{}' failed on key '{}': {}", regex.as_str(), key, err);
                    false
                }
            })
            .cloned()
            .collect();

        let count = matched.len();
        for key in matched {
            self.remove_entry(&key);
        }

        debug!("Invalidated {} entries matching '{}'", count, regex.as_str());
        count
    }

    // == Stats ==
    /// Returns a read-only statistics snapshot.
    pub fn stats(&self) -> CacheStats {
        let oldest_entry = self.entries.values().map(|e| e.inserted_at).min();
        let newest_entry = self.entries.values().map(|e| e.inserted_at).max();

        CacheStats {
            hits: self.counters.hits,
            misses: self.counters.misses,
            hit_rate: self.counters.hit_rate(),
            size_bytes: self.size_bytes,
            entry_count: self.entries.len(),
            oldest_entry,
            newest_entry,
            evictions: self.counters.evictions,
            expirations: self.counters.expirations,
            rejections: self.counters.rejections,
        }
    }

    // == Debug Info ==
    /// Returns statistics plus per-entry detail, oldest entry first.
    ///
    /// Entries that have expired but were not yet removed are included and
    /// flagged.
    pub fn debug_info(&self) -> DebugInfo {
        let now = Instant::now();
        let items = self
            .order
            .iter()
            .filter_map(|key| self.entries.get_key_value(key))
            .map(|(key, entry)| EntryDebugInfo {
                key: key.clone(),
                size_bytes: entry.size_bytes,
                age_ms: entry.age_at(now).as_millis() as u64,
                hits: entry.hit_count,
                category: entry.category.clone(),
                expired: entry.is_expired_at(now),
            })
            .collect();

        DebugInfo {
            stats: self.stats(),
            items,
        }
    }

    // == Sweep Expired ==
    /// Removes all expired entries from the cache.
    ///
    /// Returns how many entries and bytes were reclaimed.
    pub fn sweep_expired(&mut self) -> SweepReport {
        let now = Instant::now();
        let expired_keys: Vec<String> = self
            .entries
            .iter()
            .filter(|(_, entry)| entry.is_expired_at(now))
            .map(|(key, _)| key.clone())
            .collect();

        let mut report = SweepReport::default();
        for key in expired_keys {
            if let Some(entry) = self.remove_entry(&key) {
                report.entries_removed += 1;
                report.bytes_reclaimed += entry.size_bytes;
            }
        }

        self.counters.record_expirations(report.entries_removed as u64);
        report
    }

    // == Length ==
    /// Returns the current number of entries, expired ones included.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Current sum of entry size estimates.
    pub fn size_bytes(&self) -> usize {
        self.size_bytes
    }

    /// Whether `key` is stored, without touching statistics or expiry.
    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    // == Internals ==
    fn remove_entry(&mut self, key: &str) -> Option<CacheEntry<V>> {
        let entry = self.entries.remove(key)?;
        self.order.remove(entry.sequence);
        self.size_bytes -= entry.size_bytes;
        Some(entry)
    }

    /// Evicts the earliest inserted entry. Returns false when empty.
    fn evict_oldest(&mut self) -> bool {
        let Some((_, key)) = self.order.pop_oldest() else {
            return false;
        };

        if let Some(entry) = self.entries.remove(&key) {
            self.size_bytes -= entry.size_bytes;
            self.counters.record_eviction();
            debug!("Evicted '{}' ({} bytes)", key, entry.size_bytes);
        }
        true
    }
}

impl<V: Serialize> CacheStore<V> {
    // == Set ==
    /// Stores a value under `key` with the default TTL and no category.
    pub fn set(&mut self, key: impl Into<String>, value: V) {
        self.set_with(key, value, SetOptions::default());
    }

    /// Stores a value under `key`.
    ///
    /// A value whose size estimate exceeds the byte capacity is not stored and
    /// leaves any existing entry under `key` in place. Otherwise an existing
    /// entry is replaced, and the oldest inserted entries are evicted until
    /// both the byte and item limits hold with the new entry included.
    pub fn set_with(&mut self, key: impl Into<String>, value: V, options: SetOptions) {
        let key = key.into();
        let size_bytes = estimate_size(&value);

        if size_bytes > self.config.max_size_bytes {
            warn!(
                "Rejected '{}': estimated {} bytes exceeds cache capacity of {} bytes",
                key, size_bytes, self.config.max_size_bytes
            );
            self.counters.record_rejection();
            return;
        }

        self.remove_entry(&key);

        while self.size_bytes + size_bytes > self.config.max_size_bytes
            || self.entries.len() >= self.config.max_items
        {
            if !self.evict_oldest() {
                break;
            }
        }

        let ttl = options.ttl.unwrap_or(self.config.default_ttl);
        let sequence = self.order.push(&key);
        let entry = CacheEntry::new(value, ttl, size_bytes, options.category, sequence);

        self.size_bytes += size_bytes;
        self.entries.insert(key, entry);
    }
}

impl<V: Clone> CacheStore<V> {
    // == Get ==
    /// Retrieves a clone of the value stored under `key`.
    ///
    /// Returns `None` when the key is absent or expired; both count as a miss.
    /// An expired entry is removed by the lookup.
    pub fn get(&mut self, key: &str) -> Option<V> {
        let now = Instant::now();
        let expired = match self.entries.get(key) {
            Some(entry) => entry.is_expired_at(now),
            None => {
                self.counters.record_miss();
                return None;
            }
        };

        if expired {
            self.remove_entry(key);
            self.counters.record_expirations(1);
            self.counters.record_miss();
            return None;
        }

        let entry = self.entries.get_mut(key)?;
        entry.record_hit(now);
        self.counters.record_hit();
        Some(entry.value.clone())
    }
}
