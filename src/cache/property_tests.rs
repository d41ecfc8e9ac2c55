//! Property-Based Tests for Cache Module
//!
//! Uses proptest to check capacity, accounting, eviction and expiry
//! properties over arbitrary operation sequences.

use proptest::prelude::*;
use std::collections::HashSet;
use tokio::time::Duration;

use crate::cache::{estimate_size, CacheStore, SetOptions};
use crate::config::CacheConfig;

// == Test Configuration ==
const TEST_MAX_ITEMS: usize = 100;
const TEST_MAX_SIZE: usize = 1024 * 1024;

fn store(max_items: usize, max_size_bytes: usize) -> CacheStore<String> {
    CacheStore::new(
        CacheConfig::default()
            .with_max_items(max_items)
            .with_max_size_bytes(max_size_bytes),
    )
}

fn paused_runtime() -> tokio::runtime::Runtime {
    tokio::runtime::Builder::new_current_thread()
        .enable_time()
        .start_paused(true)
        .build()
        .unwrap()
}

/// Sum of per-entry sizes as reported by the debug snapshot
fn summed_entry_sizes(store: &CacheStore<String>) -> usize {
    store.debug_info().items.iter().map(|i| i.size_bytes).sum()
}

// == Strategies ==
/// Generates keys in one of two namespaces
fn key_strategy() -> impl Strategy<Value = String> {
    (prop_oneof![Just("user"), Just("order")], "[a-z0-9]{1,6}")
        .prop_map(|(ns, id)| format!("{}:{}", ns, id))
}

fn value_strategy() -> impl Strategy<Value = String> {
    "[a-zA-Z0-9 ]{0,64}"
}

#[derive(Debug, Clone)]
enum CacheOp {
    Set { key: String, value: String },
    Get { key: String },
    Delete { key: String },
    Invalidate { namespace: &'static str },
}

fn cache_op_strategy() -> impl Strategy<Value = CacheOp> {
    prop_oneof![
        3 => (key_strategy(), value_strategy())
            .prop_map(|(key, value)| CacheOp::Set { key, value }),
        3 => key_strategy().prop_map(|key| CacheOp::Get { key }),
        1 => key_strategy().prop_map(|key| CacheOp::Delete { key }),
        1 => prop_oneof![Just("user"), Just("order")]
            .prop_map(|namespace| CacheOp::Invalidate { namespace }),
    ]
}

fn apply(store: &mut CacheStore<String>, op: CacheOp) -> Option<bool> {
    match op {
        CacheOp::Set { key, value } => store.set(key, value),
        CacheOp::Get { key } => return Some(store.get(&key).is_some()),
        CacheOp::Delete { key } => {
            store.delete(&key);
        }
        CacheOp::Invalidate { namespace } => {
            store.invalidate(&format!("^{}:", namespace)).unwrap();
        }
    }
    None
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    // Hits and misses reflect exactly the outcomes observed by the caller
    #[test]
    fn prop_statistics_accuracy(ops in prop::collection::vec(cache_op_strategy(), 1..80)) {
        let mut store = store(TEST_MAX_ITEMS, TEST_MAX_SIZE);
        let mut expected_hits: u64 = 0;
        let mut expected_misses: u64 = 0;

        for op in ops {
            match apply(&mut store, op) {
                Some(true) => expected_hits += 1,
                Some(false) => expected_misses += 1,
                None => {}
            }
        }

        let stats = store.stats();
        prop_assert_eq!(stats.hits, expected_hits, "Hits mismatch");
        prop_assert_eq!(stats.misses, expected_misses, "Misses mismatch");
        prop_assert_eq!(stats.entry_count, store.len(), "Entry count mismatch");

        let total = expected_hits + expected_misses;
        let expected_rate = if total == 0 { 0.0 } else { expected_hits as f64 / total as f64 };
        prop_assert!((stats.hit_rate - expected_rate).abs() < 1e-12);
    }

    // Byte and item limits hold after every operation, and the tracked size
    // always equals the sum of entry sizes
    #[test]
    fn prop_capacity_and_accounting(
        max_items in 1usize..10,
        max_size in 20usize..400,
        ops in prop::collection::vec(cache_op_strategy(), 1..120)
    ) {
        let mut store = store(max_items, max_size);

        for op in ops {
            apply(&mut store, op);

            prop_assert!(
                store.len() <= max_items,
                "{} entries exceed max {}",
                store.len(),
                max_items
            );
            prop_assert!(
                store.size_bytes() <= max_size,
                "{} bytes exceed max {}",
                store.size_bytes(),
                max_size
            );
            prop_assert_eq!(store.size_bytes(), summed_entry_sizes(&store));
        }
    }

    // Storing then retrieving before expiry returns the stored value
    #[test]
    fn prop_roundtrip_storage(key in key_strategy(), value in value_strategy()) {
        let mut store = store(TEST_MAX_ITEMS, TEST_MAX_SIZE);

        store.set(key.clone(), value.clone());

        prop_assert_eq!(store.get(&key), Some(value));
    }

    // Deleting an existing key makes it unreadable and frees its bytes
    #[test]
    fn prop_delete_removes_entry(key in key_strategy(), value in value_strategy()) {
        let mut store = store(TEST_MAX_ITEMS, TEST_MAX_SIZE);

        store.set(key.clone(), value);
        prop_assert!(store.delete(&key));

        prop_assert!(store.get(&key).is_none(), "Key should not exist after delete");
        prop_assert_eq!(store.size_bytes(), 0);
    }

    // Oversized values never enter the cache
    #[test]
    fn prop_oversized_rejected(
        existing in prop::collection::vec((key_strategy(), value_strategy()), 0..5),
        key in key_strategy(),
        extra in 1usize..200
    ) {
        let max_size = 512;
        let mut store = store(TEST_MAX_ITEMS, max_size);
        for (k, v) in existing {
            prop_assume!(k != key);
            store.set(k, v);
        }
        let before = store.stats();

        // Quotes add 2 units, each unit is 2 bytes
        let oversized = "x".repeat(max_size / 2 + extra);
        prop_assert!(estimate_size(&oversized) > max_size);
        store.set(key.clone(), oversized);

        let after = store.stats();
        prop_assert_eq!(after.entry_count, before.entry_count);
        prop_assert_eq!(after.size_bytes, before.size_bytes);
        prop_assert!(store.get(&key).is_none());
    }

    // Invalidating a namespace removes exactly the keys in it
    #[test]
    fn prop_namespace_invalidation(
        entries in prop::collection::vec((key_strategy(), value_strategy()), 1..30)
    ) {
        let mut store = store(TEST_MAX_ITEMS, TEST_MAX_SIZE);
        let keys: HashSet<String> = entries.iter().map(|(k, _)| k.clone()).collect();
        for (key, value) in entries {
            store.set(key, value);
        }

        let user_keys = keys.iter().filter(|k| k.starts_with("user:")).count();
        let removed = store.invalidate("^user:").unwrap();

        prop_assert_eq!(removed, user_keys);
        prop_assert_eq!(store.len(), keys.len() - user_keys);
        for key in &keys {
            prop_assert_eq!(store.contains_key(key), key.starts_with("order:"));
        }
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    // When the cache is full, the earliest inserted key is evicted no matter
    // how often it was read
    #[test]
    fn prop_insertion_order_eviction(
        initial_keys in prop::collection::vec(key_strategy(), 2..10),
        reads in 1usize..20,
        new_key in key_strategy(),
        new_value in value_strategy()
    ) {
        let mut seen = HashSet::new();
        let unique_keys: Vec<String> = initial_keys
            .into_iter()
            .filter(|k| seen.insert(k.clone()))
            .collect();

        prop_assume!(unique_keys.len() >= 2);
        prop_assume!(!unique_keys.contains(&new_key));

        let capacity = unique_keys.len();
        let mut store = store(capacity, TEST_MAX_SIZE);

        for key in &unique_keys {
            store.set(key.clone(), format!("value_{}", key));
        }
        prop_assert_eq!(store.len(), capacity, "Cache should be at capacity");

        // Make the oldest entry the most recently and most frequently used
        let oldest_key = unique_keys[0].clone();
        for _ in 0..reads {
            prop_assert!(store.get(&oldest_key).is_some());
        }

        store.set(new_key.clone(), new_value);

        prop_assert_eq!(store.len(), capacity, "Cache should remain at capacity after eviction");
        prop_assert!(
            !store.contains_key(&oldest_key),
            "Oldest key '{}' should have been evicted",
            oldest_key
        );
        prop_assert!(store.contains_key(&new_key));
        for key in unique_keys.iter().skip(1) {
            prop_assert!(store.contains_key(key), "Key '{}' should still exist", key);
        }
    }
}

// Time-sensitive properties run on a paused clock
proptest! {
    #![proptest_config(ProptestConfig::with_cases(50))]

    // An entry with TTL T is readable before T and gone at T
    #[test]
    fn prop_ttl_expiration_behavior(
        key in key_strategy(),
        value in value_strategy(),
        ttl_ms in 2u64..10_000
    ) {
        let rt = paused_runtime();

        rt.block_on(async {
            let mut store = store(TEST_MAX_ITEMS, TEST_MAX_SIZE);
            store.set_with(
                key.clone(),
                value.clone(),
                SetOptions::new().with_ttl(Duration::from_millis(ttl_ms)),
            );

            tokio::time::advance(Duration::from_millis(ttl_ms - 1)).await;
            prop_assert_eq!(store.get(&key), Some(value), "Entry should exist before TTL");

            tokio::time::advance(Duration::from_millis(1)).await;
            prop_assert!(store.get(&key).is_none(), "Entry should be gone at TTL");
            prop_assert_eq!(store.size_bytes(), 0);

            Ok(())
        })?;
    }

    // A sweep removes exactly the expired entries
    #[test]
    fn prop_sweep_removes_only_expired(
        entries in prop::collection::vec((key_strategy(), 1u64..2_000), 1..30),
        elapsed_ms in 0u64..2_000
    ) {
        let rt = paused_runtime();

        rt.block_on(async {
            let mut store = store(TEST_MAX_ITEMS, TEST_MAX_SIZE);
            let mut ttls = std::collections::HashMap::new();
            for (key, ttl_ms) in entries {
                store.set_with(
                    key.clone(),
                    "v".to_string(),
                    SetOptions::new().with_ttl(Duration::from_millis(ttl_ms)),
                );
                ttls.insert(key, ttl_ms);
            }

            tokio::time::advance(Duration::from_millis(elapsed_ms)).await;
            let report = store.sweep_expired();

            let expected_removed = ttls.values().filter(|&&ttl| ttl <= elapsed_ms).count();
            prop_assert_eq!(report.entries_removed, expected_removed);
            for (key, ttl) in &ttls {
                prop_assert_eq!(store.contains_key(key), *ttl > elapsed_ms);
            }
            prop_assert_eq!(store.size_bytes(), summed_entry_sizes(&store));

            Ok(())
        })?;
    }
}

// Concurrent access through the shared handle keeps the store consistent
proptest! {
    #![proptest_config(ProptestConfig::with_cases(50))]

    #[test]
    fn prop_concurrent_operation_consistency(
        operations in prop::collection::vec(cache_op_strategy(), 10..60)
    ) {
        let rt = tokio::runtime::Runtime::new().unwrap();
        let max_items = 8;
        let max_size = 512;

        rt.block_on(async {
            let shared = crate::cache::shared(store(max_items, max_size));

            let handles: Vec<_> = operations
                .into_iter()
                .map(|op| {
                    let shared = shared.clone();
                    tokio::spawn(async move {
                        let mut cache = shared.write().await;
                        apply(&mut cache, op)
                    })
                })
                .collect();

            let mut lookups = 0u64;
            for handle in handles {
                if handle.await.expect("Task should not panic").is_some() {
                    lookups += 1;
                }
            }

            let cache = shared.read().await;
            let stats = cache.stats();
            prop_assert!(stats.entry_count <= max_items);
            prop_assert!(stats.size_bytes <= max_size);
            prop_assert_eq!(stats.size_bytes, summed_entry_sizes(&cache));
            prop_assert_eq!(stats.hits + stats.misses, lookups);

            Ok(())
        })?;
    }
}
