//! Cacheable Operations
//!
//! Explicit read-through wrappers around an operation. Caching here is
//! best-effort: a cache that cannot be read or written never fails the
//! wrapped operation, it only stops saving work.

use std::future::Future;

use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::warn;

use crate::cache::NamedCache;

impl NamedCache {
    // == Get Or Compute ==
    /// Returns the cached value for `key`, or runs `compute` and caches its
    /// result.
    ///
    /// No lock is held between the read and the write, so concurrent misses
    /// on the same key all compute and the last write wins. Errors from
    /// `compute` are returned as-is and nothing is cached.
    pub async fn get_or_compute<T, E, F, Fut>(&self, key: &str, compute: F) -> Result<T, E>
    where
        T: Serialize + DeserializeOwned,
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T, E>>,
    {
        match self.get::<T>(key).await {
            Ok(Some(value)) => return Ok(value),
            Ok(None) => {}
            Err(e) => {
                warn!(cache = %self.name(), key, "Cache read failed, computing value: {}", e);
            }
        }

        let value = compute().await?;
        self.store_best_effort(key, &value).await;
        Ok(value)
    }

    // == Refresh ==
    /// Always runs `compute` and overwrites the cached entry with its result.
    pub async fn refresh<T, E, F, Fut>(&self, key: &str, compute: F) -> Result<T, E>
    where
        T: Serialize,
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T, E>>,
    {
        let value = compute().await?;
        self.store_best_effort(key, &value).await;
        Ok(value)
    }

    async fn store_best_effort<T: Serialize>(&self, key: &str, value: &T) {
        if let Err(e) = self.put(key, value).await {
            warn!(cache = %self.name(), key, "Value not cached: {}", e);
        }
    }
}
