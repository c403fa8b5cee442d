//! Store Module
//!
//! The key-value store every named cache delegates to. Expiry is owned by
//! the store: writes carry a TTL and the store stops returning the entry
//! once it has elapsed.

mod memory;
mod redis;

use std::time::Duration;

use async_trait::async_trait;

use crate::error::Result;

pub use self::memory::InMemoryStore;
pub use self::redis::RedisStore;

// == Key-Value Store ==
/// Byte-oriented key-value store shared by all named caches.
///
/// Implementations must be safe for concurrent use. Writes are not
/// coordinated across callers: two puts of the same key race and the last
/// one applied by the store wins.
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    /// Checks that the store is reachable.
    async fn ping(&self) -> Result<()>;

    /// Reads a live entry.
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>>;

    /// Writes an entry that expires after `ttl`, replacing any previous value.
    async fn put(&self, key: &str, value: Vec<u8>, ttl: Duration) -> Result<()>;

    /// Writes an entry only when no live entry exists.
    ///
    /// Returns the existing value when the write was skipped.
    async fn put_if_absent(&self, key: &str, value: Vec<u8>, ttl: Duration)
        -> Result<Option<Vec<u8>>>;

    /// Removes an entry. Removing a missing key is not an error.
    async fn remove(&self, key: &str) -> Result<()>;

    /// Removes every entry whose key starts with `prefix`.
    async fn remove_prefix(&self, prefix: &str) -> Result<usize>;
}
