//! Configuration Module
//!
//! Cache engine limits and server settings, with defaults and environment loading.

use std::env;
use std::str::FromStr;
use std::time::Duration;

// == Defaults ==
/// Default byte capacity: 50 MiB
pub const DEFAULT_MAX_SIZE_BYTES: usize = 50 * 1024 * 1024;
/// Default maximum number of entries
pub const DEFAULT_MAX_ITEMS: usize = 1000;
/// Default entry TTL
pub const DEFAULT_TTL: Duration = Duration::from_secs(5 * 60);
/// TTL used by long-lived content caches
pub const EXTENDED_TTL: Duration = Duration::from_secs(30 * 60);
/// Default interval between background expiry sweeps
pub const DEFAULT_SWEEP_INTERVAL: Duration = Duration::from_secs(5 * 60);
/// Default HTTP port for the inspection server
pub const DEFAULT_SERVER_PORT: u16 = 3000;

// == Cache Config ==
/// Construction-time limits of a cache store. Fixed for the store's lifetime.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CacheConfig {
    /// Upper bound on the sum of entry size estimates
    pub max_size_bytes: usize,
    /// Upper bound on the number of entries (at least 1 is enforced)
    pub max_items: usize,
    /// TTL applied when `set` is given none
    pub default_ttl: Duration,
    /// Interval of the background expiry sweep
    pub sweep_interval: Duration,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            max_size_bytes: DEFAULT_MAX_SIZE_BYTES,
            max_items: DEFAULT_MAX_ITEMS,
            default_ttl: DEFAULT_TTL,
            sweep_interval: DEFAULT_SWEEP_INTERVAL,
        }
    }
}

impl CacheConfig {
    /// Defaults with the extended TTL, for slowly changing content.
    pub fn extended() -> Self {
        Self::default().with_default_ttl(EXTENDED_TTL)
    }

    pub fn with_max_size_bytes(mut self, max_size_bytes: usize) -> Self {
        self.max_size_bytes = max_size_bytes;
        self
    }

    pub fn with_max_items(mut self, max_items: usize) -> Self {
        self.max_items = max_items;
        self
    }

    pub fn with_default_ttl(mut self, default_ttl: Duration) -> Self {
        self.default_ttl = default_ttl;
        self
    }

    pub fn with_sweep_interval(mut self, sweep_interval: Duration) -> Self {
        self.sweep_interval = sweep_interval;
        self
    }
}

// == Server Config ==
/// Configuration of the inspection server binary.
#[derive(Debug, Clone)]
pub struct Config {
    /// Limits of the hosted cache
    pub cache: CacheConfig,
    /// HTTP server port
    pub server_port: u16,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `MAX_SIZE_BYTES` - Byte capacity (default: 52428800)
    /// - `MAX_ENTRIES` - Maximum cache entries (default: 1000)
    /// - `DEFAULT_TTL` - Default TTL in seconds (default: 300)
    /// - `SWEEP_INTERVAL` - Expiry sweep frequency in seconds (default: 300)
    /// - `SERVER_PORT` - HTTP server port (default: 3000)
    ///
    /// Missing or unparsable values fall back to the default.
    pub fn from_env() -> Self {
        Self {
            cache: CacheConfig {
                max_size_bytes: env_or("MAX_SIZE_BYTES", DEFAULT_MAX_SIZE_BYTES),
                max_items: env_or("MAX_ENTRIES", DEFAULT_MAX_ITEMS),
                default_ttl: Duration::from_secs(env_or("DEFAULT_TTL", DEFAULT_TTL.as_secs())),
                sweep_interval: Duration::from_secs(env_or(
                    "SWEEP_INTERVAL",
                    DEFAULT_SWEEP_INTERVAL.as_secs(),
                )),
            },
            server_port: env_or("SERVER_PORT", DEFAULT_SERVER_PORT),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            cache: CacheConfig::default(),
            server_port: DEFAULT_SERVER_PORT,
        }
    }
}

fn env_or<T: FromStr>(name: &str, default: T) -> T {
    env::var(name)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}
