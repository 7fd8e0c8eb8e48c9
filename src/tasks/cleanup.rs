//! Cache Sweep Task
//!
//! Background task that periodically drops expired response bodies.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::RwLock;
use tokio::task::JoinHandle;
use tracing::{debug, info};

use crate::cache::ResponseCache;

/// Spawns a background task that periodically removes expired cached responses.
///
/// The task sleeps for `interval` between sweeps and takes the cache write
/// lock only for the sweep itself. Abort the returned handle to stop it.
///
/// # Example
/// ```ignore
/// let cache = Arc::new(RwLock::new(ResponseCache::new(Duration::from_secs(30))));
/// let sweep_handle = spawn_cleanup_task(cache.clone(), Duration::from_secs(60));
/// // Later, during shutdown:
/// sweep_handle.abort();
/// ```
pub fn spawn_cleanup_task(cache: Arc<RwLock<ResponseCache>>, interval: Duration) -> JoinHandle<()> {
    tokio::spawn(async move {
        info!(interval_secs = interval.as_secs(), "Starting response cache sweep task");

        loop {
            tokio::time::sleep(interval).await;

            let (removed, stats) = {
                let mut cache_guard = cache.write().await;
                let removed = cache_guard.cleanup_expired();
                (removed, cache_guard.stats())
            };

            if removed > 0 {
                info!(
                    removed,
                    remaining = stats.total_entries,
                    hit_rate = stats.hit_rate(),
                    "Cache sweep removed expired responses"
                );
            } else {
                debug!(
                    remaining = stats.total_entries,
                    hits = stats.hits,
                    misses = stats.misses,
                    "Cache sweep found nothing expired"
                );
            }
        }
    })
}
