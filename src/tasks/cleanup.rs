//! Cache Cleanup Task
//!
//! Background task that periodically removes expired and outdated entries
//! from the RBAC cache. Each tick is skipped with a fixed probability so the
//! scan cost stays bounded.

use std::sync::Arc;
use std::time::Duration;

use rand::Rng;
use tokio::sync::RwLock;
use tokio::task::JoinHandle;
use tracing::{debug, info};

use crate::rbac::RbacPersistentCache;

/// Spawns a background task that periodically cleans up the cache.
///
/// # Arguments
/// * `cache` - Shared reference to the cache
/// * `cleanup_interval_secs` - Interval in seconds between cleanup runs
/// * `skip_probability` - Chance in [0, 1] that a tick does nothing
///
/// # Returns
/// A JoinHandle for the spawned task, which can be used to abort the task
/// during graceful shutdown.
///
/// # Example
/// ```ignore
/// let cache = Arc::new(RwLock::new(RbacPersistentCache::from_config(&config)));
/// let cleanup_handle = spawn_cleanup_task(cache.clone(), 300, 0.1);
/// // Later, during shutdown:
/// cleanup_handle.abort();
/// ```
pub fn spawn_cleanup_task(
    cache: Arc<RwLock<RbacPersistentCache>>,
    cleanup_interval_secs: u64,
    skip_probability: f64,
) -> JoinHandle<()> {
    let interval = Duration::from_secs(cleanup_interval_secs.max(1));
    let skip_probability = skip_probability.clamp(0.0, 1.0);

    tokio::spawn(async move {
        info!(
            "Starting cache cleanup task with interval of {} seconds (skip probability {})",
            cleanup_interval_secs, skip_probability
        );

        loop {
            tokio::time::sleep(interval).await;

            if should_skip(skip_probability) {
                debug!("Cache cleanup: tick skipped");
                continue;
            }

            let removed = {
                let mut cache_guard = cache.write().await;
                cache_guard.cleanup_expired()
            };

            if removed > 0 {
                info!("Cache cleanup: removed {} stale entries", removed);
            } else {
                debug!("Cache cleanup: no stale entries found");
            }
        }
    })
}

fn should_skip(probability: f64) -> bool {
    rand::rng().random_bool(probability)
}
