//! Expired Response Sweep
//!
//! Background task that periodically drops expired cache entries so memory is
//! released even for URLs that are never requested again.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::RwLock;
use tokio::task::JoinHandle;
use tracing::{debug, info};

use crate::cache::ResponseCache;

/// Spawns a task that calls [`ResponseCache::cleanup_expired`] every `interval`.
///
/// The returned handle is aborted during graceful shutdown.
pub fn spawn_cleanup_task(cache: Arc<RwLock<ResponseCache>>, interval: Duration) -> JoinHandle<()> {
    tokio::spawn(async move {
        info!(interval_ms = interval.as_millis() as u64, "starting expired response sweep");

        let mut ticker = tokio::time::interval(interval);
        // The first tick completes immediately
        ticker.tick().await;

        loop {
            ticker.tick().await;

            let removed = cache.write().await.cleanup_expired();

            if removed > 0 {
                info!(removed, "swept expired responses");
            } else {
                debug!("no expired responses");
            }
        }
    })
}
