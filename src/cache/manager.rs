//! Cache Manager Module
//!
//! Owns every named cache declared in the registry and binds them to a
//! single store.

use std::collections::BTreeMap;
use std::sync::Arc;

use tracing::{error, info};

use crate::cache::{
    CacheRegistry, CacheStats, JsonValueSerializer, KeyArgs, KeyGenerator, NamedCache,
    QualifiedKeyGenerator,
};
use crate::error::{CacheError, Result};
use crate::store::KeyValueStore;

// == Cache Manager ==
/// The fixed set of named caches of the process.
///
/// Caches are created once from the registry; looking up any other name
/// fails instead of creating a cache on the fly.
pub struct CacheManager {
    caches: BTreeMap<String, NamedCache>,
    registry: CacheRegistry,
    store: Arc<dyn KeyValueStore>,
    key_generator: Arc<dyn KeyGenerator>,
}

impl CacheManager {
    /// Builds a manager with the default serializer and key generator.
    ///
    /// # Errors
    /// Fails if the registry is empty or the store does not answer a ping.
    pub async fn initialize(
        store: Arc<dyn KeyValueStore>,
        registry: CacheRegistry,
    ) -> Result<Self> {
        Self::builder(store).initial_caches(registry).build().await
    }

    pub fn builder(store: Arc<dyn KeyValueStore>) -> CacheManagerBuilder {
        CacheManagerBuilder {
            store,
            registry: None,
            serializer: JsonValueSerializer,
            key_generator: Arc::new(QualifiedKeyGenerator),
        }
    }

    /// Looks up a registered cache.
    pub fn cache(&self, name: &str) -> Result<&NamedCache> {
        self.caches
            .get(name)
            .ok_or_else(|| CacheError::UnknownCache(name.to_string()))
    }

    pub fn cache_names(&self) -> impl Iterator<Item = &str> {
        self.caches.keys().map(String::as_str)
    }

    pub fn caches(&self) -> impl Iterator<Item = &NamedCache> {
        self.caches.values()
    }

    pub fn registry(&self) -> &CacheRegistry {
        &self.registry
    }

    /// Derives the cache key of `operation` called on a `T` with `args`.
    pub fn key_for<T: ?Sized>(&self, operation: &str, args: &KeyArgs) -> String {
        self.key_generator
            .generate(std::any::type_name::<T>(), operation, args.as_slice())
    }

    /// Checks that the backing store is still reachable.
    pub async fn ping(&self) -> Result<()> {
        self.store.ping().await
    }

    /// Counters summed across all caches.
    pub fn stats(&self) -> CacheStats {
        let mut total = CacheStats::default();
        for cache in self.caches.values() {
            total.merge(&cache.stats());
        }
        total
    }
}

impl std::fmt::Debug for CacheManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CacheManager")
            .field("registry", &self.registry)
            .finish_non_exhaustive()
    }
}

// == Builder ==
pub struct CacheManagerBuilder {
    store: Arc<dyn KeyValueStore>,
    registry: Option<CacheRegistry>,
    serializer: JsonValueSerializer,
    key_generator: Arc<dyn KeyGenerator>,
}

impl CacheManagerBuilder {
    /// Caches to create, with their TTLs.
    pub fn initial_caches(mut self, registry: CacheRegistry) -> Self {
        self.registry = Some(registry);
        self
    }

    pub fn serializer(mut self, serializer: JsonValueSerializer) -> Self {
        self.serializer = serializer;
        self
    }

    pub fn key_generator(mut self, key_generator: Arc<dyn KeyGenerator>) -> Self {
        self.key_generator = key_generator;
        self
    }

    /// Verifies the store and creates every declared cache.
    pub async fn build(self) -> Result<CacheManager> {
        let registry = self
            .registry
            .filter(|registry| !registry.is_empty())
            .ok_or_else(|| CacheError::Config("no caches declared".to_string()))?;

        if let Err(e) = self.store.ping().await {
            error!("Cache store is not reachable: {}", e);
            return Err(e);
        }

        let caches = registry
            .iter()
            .map(|(name, ttl)| {
                info!(cache = name, ttl_secs = ttl.as_secs(), "Registered cache");
                (
                    name.to_string(),
                    NamedCache::new(name, ttl, self.store.clone(), self.serializer),
                )
            })
            .collect();

        Ok(CacheManager {
            caches,
            registry,
            store: self.store,
            key_generator: self.key_generator,
        })
    }
}
