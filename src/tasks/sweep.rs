//! Expiry Sweep Task
//!
//! Background task that periodically removes expired cache entries, including
//! entries that are never read again and so would escape lazy expiry.

use std::time::Duration;

use tokio::task::JoinHandle;
use tracing::{debug, info};

use crate::cache::SharedCache;

/// Shortest interval the sweep accepts; zero would spin.
const MIN_SWEEP_INTERVAL: Duration = Duration::from_millis(1);

// == Sweep Handle ==
/// Owns a running sweep task.
///
/// Dropping the handle aborts the task. Use [`SweepHandle::stop`] to abort and
/// wait until the task has actually finished.
#[derive(Debug)]
pub struct SweepHandle {
    handle: Option<JoinHandle<()>>,
}

impl SweepHandle {
    /// Aborts the task and waits for it to finish.
    pub async fn stop(mut self) {
        if let Some(handle) = self.handle.take() {
            handle.abort();
            let _ = handle.await;
            debug!("Expiry sweep task stopped");
        }
    }

    /// Whether the task has finished.
    pub fn is_finished(&self) -> bool {
        self.handle.as_ref().map_or(true, JoinHandle::is_finished)
    }
}

impl Drop for SweepHandle {
    fn drop(&mut self) {
        if let Some(handle) = &self.handle {
            handle.abort();
        }
    }
}

/// Spawns a background task that sweeps expired entries every
/// `sweep_interval` of the cache's configuration.
///
/// Each run takes the cache's write lock for the duration of one
/// `sweep_expired` call.
///
/// # Example
/// ```ignore
/// let config = CacheConfig::default().with_sweep_interval(Duration::from_secs(60));
/// let cache = cache::shared(CacheStore::<String>::new(config));
/// let sweeper = spawn_sweep_task(cache.clone());
/// // Later, during shutdown:
/// sweeper.stop().await;
/// ```
pub fn spawn_sweep_task<V>(cache: SharedCache<V>) -> SweepHandle
where
    V: Send + Sync + 'static,
{
    let handle = tokio::spawn(async move {
        let interval = cache
            .read()
            .await
            .config()
            .sweep_interval
            .max(MIN_SWEEP_INTERVAL);
        info!("Starting expiry sweep task with interval of {:?}", interval);

        loop {
            tokio::time::sleep(interval).await;

            let report = {
                let mut cache_guard = cache.write().await;
                cache_guard.sweep_expired()
            };

            if report.entries_removed > 0 {
                info!(
                    "Expiry sweep: removed {} expired entries, reclaimed {} bytes",
                    report.entries_removed, report.bytes_reclaimed
                );
            } else {
                debug!("Expiry sweep: no expired entries found");
            }
        }
    });

    SweepHandle {
        handle: Some(handle),
    }
}
