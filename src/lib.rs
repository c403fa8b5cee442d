//! Cache Layer - named caches over a shared key-value store
//!
//! Each named cache has its own TTL, stores values as typed JSON and derives
//! keys from the call being memoized. Storage and expiry are delegated to
//! Redis, or to an in-memory store when no Redis URL is configured.
//!
//! The library itself serves nothing. The operator HTTP endpoints in [`api`]
//! are compiled only with the `admin-api` feature, which the binary requires.

#[cfg(feature = "admin-api")]
pub mod api;
pub mod cache;
pub mod config;
pub mod error;
#[cfg(feature = "admin-api")]
pub mod models;
pub mod store;
pub mod tasks;

pub use cache::{CacheManager, CacheRegistry, KeyArgs, NamedCache, CUSTOMER, CUSTOMER_ALL};
pub use config::{CacheTtlConfig, Config};
pub use error::{CacheError, Result};
pub use store::{InMemoryStore, KeyValueStore, RedisStore};
pub use tasks::spawn_cleanup_task;
