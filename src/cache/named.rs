//! Named Cache Module
//!
//! One logical cache partition: a name, a TTL, and typed get/put/evict
//! operations that delegate to the shared store.

use std::sync::Arc;
use std::time::Duration;

use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::debug;

use crate::cache::{CacheStats, JsonValueSerializer, StatsCollector, TypedValue};
use crate::error::Result;
use crate::store::KeyValueStore;

/// Separator between the cache name and the entry key in the store.
pub const KEY_SEPARATOR: &str = "::";

// == Named Cache ==
/// A cache partition whose entries all expire after the same TTL.
///
/// Writes go straight to the store without any lock: concurrent puts of
/// the same key race and the store keeps whichever arrives last.
pub struct NamedCache {
    name: String,
    ttl: Duration,
    store: Arc<dyn KeyValueStore>,
    serializer: JsonValueSerializer,
    stats: StatsCollector,
}

impl NamedCache {
    pub(crate) fn new(
        name: impl Into<String>,
        ttl: Duration,
        store: Arc<dyn KeyValueStore>,
        serializer: JsonValueSerializer,
    ) -> Self {
        Self {
            name: name.into(),
            ttl,
            store,
            serializer,
            stats: StatsCollector::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Prefix shared by every store key of this cache.
    pub fn key_prefix(&self) -> String {
        format!("{}{}", self.name, KEY_SEPARATOR)
    }

    /// Store key of an entry, e.g. `customer::Svc.find(1)`.
    pub fn store_key(&self, key: &str) -> String {
        format!("{}{}{}", self.name, KEY_SEPARATOR, key)
    }

    // == Get ==
    /// Reads and decodes an entry.
    ///
    /// A value stored as a different type counts as a miss and is reported
    /// as a serialization error.
    pub async fn get<T>(&self, key: &str) -> Result<Option<T>>
    where
        T: DeserializeOwned,
    {
        let Some(bytes) = self.store.get(&self.store_key(key)).await? else {
            self.stats.record_miss();
            return Ok(None);
        };

        match self.serializer.deserialize(&bytes) {
            Ok(value) => {
                self.stats.record_hit();
                Ok(Some(value))
            }
            Err(e) => {
                self.stats.record_miss();
                Err(e)
            }
        }
    }

    /// Reads an entry without knowing its type.
    pub async fn get_untyped(&self, key: &str) -> Result<Option<TypedValue>> {
        match self.store.get(&self.store_key(key)).await? {
            Some(bytes) => Ok(Some(self.serializer.deserialize_untyped(&bytes)?)),
            None => Ok(None),
        }
    }

    // == Put ==
    /// Encodes and writes an entry with this cache's TTL.
    pub async fn put<T>(&self, key: &str, value: &T) -> Result<()>
    where
        T: Serialize + ?Sized,
    {
        let bytes = self.serializer.serialize(value)?;
        self.store.put(&self.store_key(key), bytes, self.ttl).await?;
        self.stats.record_put();
        debug!(cache = %self.name, key, "Cached value");
        Ok(())
    }

    /// Writes an entry unless a live one exists, returning the existing value.
    pub async fn put_if_absent<T>(&self, key: &str, value: &T) -> Result<Option<T>>
    where
        T: Serialize + DeserializeOwned,
    {
        let bytes = self.serializer.serialize(value)?;
        match self
            .store
            .put_if_absent(&self.store_key(key), bytes, self.ttl)
            .await?
        {
            Some(existing) => Ok(Some(self.serializer.deserialize(&existing)?)),
            None => {
                self.stats.record_put();
                Ok(None)
            }
        }
    }

    // == Evict ==
    /// Removes one entry.
    pub async fn evict(&self, key: &str) -> Result<()> {
        self.store.remove(&self.store_key(key)).await?;
        self.stats.record_removals(1);
        debug!(cache = %self.name, key, "Evicted entry");
        Ok(())
    }

    /// Removes every entry of this cache, leaving other caches untouched.
    pub async fn clear(&self) -> Result<usize> {
        let removed = self.store.remove_prefix(&self.key_prefix()).await?;
        self.stats.record_removals(removed as u64);
        debug!(cache = %self.name, removed, "Cleared cache");
        Ok(removed)
    }

    // == Stats ==
    pub fn stats(&self) -> CacheStats {
        self.stats.snapshot()
    }
}

impl std::fmt::Debug for NamedCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NamedCache")
            .field("name", &self.name)
            .field("ttl", &self.ttl)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CacheError;
    use crate::store::InMemoryStore;

    fn cache(name: &str, store: Arc<InMemoryStore>) -> NamedCache {
        NamedCache::new(name, Duration::from_secs(60), store, JsonValueSerializer)
    }

    #[tokio::test]
    async fn test_put_and_get() {
        let cache = cache("customer", Arc::new(InMemoryStore::new()));

        cache.put("k", &"Ann".to_string()).await.unwrap();

        let value: Option<String> = cache.get("k").await.unwrap();
        assert_eq!(value.as_deref(), Some("Ann"));
        assert_eq!(cache.stats().hits, 1);
        assert_eq!(cache.stats().puts, 1);
    }

    #[tokio::test]
    async fn test_entries_are_prefixed_with_cache_name() {
        let store = Arc::new(InMemoryStore::new());
        let cache = cache("customer", store.clone());

        cache.put("Svc.find(1)", &1u32).await.unwrap();

        assert!(store.get("customer::Svc.find(1)").await.unwrap().is_some());
    }

    #[tokio::test]
    async fn test_miss_is_counted() {
        let cache = cache("customer", Arc::new(InMemoryStore::new()));

        let value: Option<u32> = cache.get("missing").await.unwrap();

        assert!(value.is_none());
        assert_eq!(cache.stats().misses, 1);
    }

    #[tokio::test]
    async fn test_wrong_type_is_error_and_miss() {
        let cache = cache("customer", Arc::new(InMemoryStore::new()));
        cache.put("k", &"text").await.unwrap();

        let result = cache.get::<u64>("k").await;

        assert!(matches!(result, Err(CacheError::Serialization(_))));
        assert_eq!(cache.stats().misses, 1);
    }

    #[tokio::test]
    async fn test_put_if_absent_returns_existing() {
        let cache = cache("customer", Arc::new(InMemoryStore::new()));

        assert_eq!(cache.put_if_absent("k", &1u32).await.unwrap(), None);
        assert_eq!(cache.put_if_absent("k", &2u32).await.unwrap(), Some(1));
        assert_eq!(cache.get::<u32>("k").await.unwrap(), Some(1));
    }

    #[tokio::test]
    async fn test_evict() {
        let cache = cache("customer", Arc::new(InMemoryStore::new()));
        cache.put("k", &1u32).await.unwrap();

        cache.evict("k").await.unwrap();

        assert_eq!(cache.get::<u32>("k").await.unwrap(), None);
        assert_eq!(cache.stats().removals, 1);
    }

    #[tokio::test]
    async fn test_clear_leaves_other_caches_alone() {
        let store = Arc::new(InMemoryStore::new());
        let single = cache("customer", store.clone());
        let all = cache("customer-all", store.clone());

        single.put("a", &1u32).await.unwrap();
        single.put("b", &2u32).await.unwrap();
        all.put("a", &3u32).await.unwrap();

        assert_eq!(single.clear().await.unwrap(), 2);
        assert_eq!(single.get::<u32>("a").await.unwrap(), None);
        assert_eq!(all.get::<u32>("a").await.unwrap(), Some(3));
    }

    #[tokio::test]
    async fn test_get_untyped() {
        let cache = cache("customer", Arc::new(InMemoryStore::new()));
        cache.put("k", &vec![1u8, 2, 3]).await.unwrap();

        let typed = cache.get_untyped("k").await.unwrap().unwrap();

        assert_eq!(typed.class, "alloc::vec::Vec<u8>");
        assert_eq!(typed.value, serde_json::json!([1, 2, 3]));
    }
}
