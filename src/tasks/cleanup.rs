//! TTL Cleanup Task
//!
//! Background task that periodically drops expired entries from the
//! in-memory store. Expired entries are already invisible to reads; the
//! sweep only reclaims their memory. Redis expires keys on its own.

use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinHandle;
use tracing::{debug, info};

use crate::store::InMemoryStore;

/// Spawns a background task that periodically removes expired entries.
///
/// # Arguments
/// * `store` - the in-memory store to sweep
/// * `cleanup_interval_secs` - Interval in seconds between cleanup runs
///
/// # Returns
/// A JoinHandle for the spawned task, aborted during graceful shutdown.
pub fn spawn_cleanup_task(store: Arc<InMemoryStore>, cleanup_interval_secs: u64) -> JoinHandle<()> {
    let interval = Duration::from_secs(cleanup_interval_secs.max(1));

    tokio::spawn(async move {
        info!(
            "Starting TTL cleanup task with interval of {} seconds",
            interval.as_secs()
        );

        loop {
            tokio::time::sleep(interval).await;

            let removed = store.cleanup_expired().await;
            if removed > 0 {
                info!("TTL cleanup: removed {} expired entries", removed);
            } else {
                debug!("TTL cleanup: no expired entries found");
            }
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::KeyValueStore;

    #[tokio::test(start_paused = true)]
    async fn test_cleanup_task_removes_expired_entries() {
        let store = Arc::new(InMemoryStore::new());
        store
            .put("expire_soon", b"value".to_vec(), Duration::from_secs(1))
            .await
            .unwrap();

        let handle = spawn_cleanup_task(store.clone(), 1);

        // Paused clock auto-advances through the sweeper's sleeps
        tokio::time::sleep(Duration::from_millis(2_500)).await;

        assert_eq!(store.len().await, 0, "Expired entry should have been swept");
        handle.abort();
    }

    #[tokio::test(start_paused = true)]
    async fn test_cleanup_task_preserves_valid_entries() {
        let store = Arc::new(InMemoryStore::new());
        store
            .put("long_lived", b"value".to_vec(), Duration::from_secs(3_600))
            .await
            .unwrap();

        let handle = spawn_cleanup_task(store.clone(), 1);
        tokio::time::sleep(Duration::from_millis(1_500)).await;

        assert_eq!(
            store.get("long_lived").await.unwrap(),
            Some(b"value".to_vec())
        );
        handle.abort();
    }

    #[tokio::test]
    async fn test_cleanup_task_can_be_aborted() {
        let store = Arc::new(InMemoryStore::new());

        let handle = spawn_cleanup_task(store, 1);
        handle.abort();

        let result = handle.await;
        assert!(result.unwrap_err().is_cancelled());
    }
}
