//! Cache Module
//!
//! Named caches with per-cache TTLs, typed JSON values and derived keys,
//! all delegating storage to a [`KeyValueStore`](crate::store::KeyValueStore).

mod cacheable;
mod key;
mod manager;
mod named;
mod registry;
mod serializer;
mod stats;

#[cfg(test)]
mod property_tests;

// Re-export public types
pub use key::{derive_key, target_name, KeyArgs, KeyGenerator, QualifiedKeyGenerator};
pub use manager::{CacheManager, CacheManagerBuilder};
pub use named::{NamedCache, KEY_SEPARATOR};
pub use registry::CacheRegistry;
pub use serializer::{owned_class, JsonValueSerializer, TypedValue, TYPE_PROPERTY};
pub use stats::{CacheStats, StatsCollector};

// == Cache Names ==
/// Cache of single customers.
pub const CUSTOMER: &str = "customer";

/// Cache of the full customer listing.
pub const CUSTOMER_ALL: &str = "customer-all";
