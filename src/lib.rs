//! Site Cache - An in-process, size- and age-bounded key/value cache
//!
//! Provides TTL expiration, oldest-first eviction under item and byte limits,
//! hit/miss statistics, and regex-based invalidation, plus an HTTP inspection
//! surface for operators.

pub mod api;
pub mod cache;
pub mod config;
pub mod error;
pub mod models;
pub mod tasks;

pub use api::AppState;
pub use cache::{CacheStats, CacheStore, DebugInfo, SetOptions, SharedCache};
pub use config::{CacheConfig, Config};
pub use error::{CacheError, Result};
pub use tasks::{spawn_sweep_task, SweepHandle};
