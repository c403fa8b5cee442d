//! Redis Store Module
//!
//! Distributed store backed by Redis. TTLs map onto `PX` expiry so Redis
//! alone decides when entries disappear.

use std::time::Duration;

use async_trait::async_trait;
use redis::aio::ConnectionManager;
use redis::Client;
use tracing::{debug, info, warn};

use super::KeyValueStore;
use crate::error::{CacheError, Result};

/// Keys fetched per `SCAN` round trip when clearing a prefix.
const SCAN_BATCH: usize = 500;

/// Redis-backed store sharing one multiplexed connection.
#[derive(Clone)]
pub struct RedisStore {
    conn: ConnectionManager,
}

impl RedisStore {
    /// Connects to Redis and verifies the server answers `PING`.
    ///
    /// # Errors
    /// - [`CacheError::Config`] if the URL cannot be parsed
    /// - [`CacheError::Unavailable`] if the server cannot be reached
    pub async fn connect(url: &str) -> Result<Self> {
        info!("Connecting to Redis at {}", url);

        let client = Client::open(url)
            .map_err(|e| CacheError::Config(format!("invalid redis url '{}': {}", url, e)))?;

        // A plain connection fails fast, ConnectionManager would retry
        let mut direct = client
            .get_multiplexed_async_connection()
            .await
            .map_err(|e| CacheError::Unavailable(format!("redis at {}: {}", url, e)))?;
        let pong: String = redis::cmd("PING").query_async(&mut direct).await?;
        if pong != "PONG" {
            return Err(CacheError::Unavailable(format!(
                "unexpected PING reply from {}: {}",
                url, pong
            )));
        }

        let conn = ConnectionManager::new(client).await?;
        info!("Redis connection established");

        Ok(Self { conn })
    }
}

#[async_trait]
impl KeyValueStore for RedisStore {
    async fn ping(&self) -> Result<()> {
        let mut conn = self.conn.clone();
        let _: String = redis::cmd("PING").query_async(&mut conn).await?;
        Ok(())
    }

    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>> {
        let mut conn = self.conn.clone();
        let value = redis::cmd("GET")
            .arg(key)
            .query_async(&mut conn)
            .await
            .map_err(|e| {
                warn!("Redis GET failed for {}: {}", key, e);
                CacheError::from(e)
            })?;
        Ok(value)
    }

    async fn put(&self, key: &str, value: Vec<u8>, ttl: Duration) -> Result<()> {
        let mut conn = self.conn.clone();
        redis::cmd("SET")
            .arg(key)
            .arg(value)
            .arg("PX")
            .arg(ttl_millis(ttl))
            .query_async::<()>(&mut conn)
            .await
            .map_err(|e| {
                warn!("Redis SET failed for {}: {}", key, e);
                CacheError::from(e)
            })?;
        Ok(())
    }

    async fn put_if_absent(
        &self,
        key: &str,
        value: Vec<u8>,
        ttl: Duration,
    ) -> Result<Option<Vec<u8>>> {
        let mut conn = self.conn.clone();
        let written: Option<String> = redis::cmd("SET")
            .arg(key)
            .arg(value)
            .arg("NX")
            .arg("PX")
            .arg(ttl_millis(ttl))
            .query_async(&mut conn)
            .await?;

        if written.is_some() {
            return Ok(None);
        }

        // Not atomic with the SET above: the entry may expire in between
        let existing = redis::cmd("GET").arg(key).query_async(&mut conn).await?;
        Ok(existing)
    }

    async fn remove(&self, key: &str) -> Result<()> {
        let mut conn = self.conn.clone();
        redis::cmd("DEL")
            .arg(key)
            .query_async::<()>(&mut conn)
            .await
            .map_err(|e| {
                warn!("Redis DEL failed for {}: {}", key, e);
                CacheError::from(e)
            })?;
        Ok(())
    }

    async fn remove_prefix(&self, prefix: &str) -> Result<usize> {
        let mut conn = self.conn.clone();
        let pattern = format!("{}*", escape_glob(prefix));
        let mut cursor: u64 = 0;
        let mut removed = 0;

        loop {
            let (next, keys): (u64, Vec<String>) = redis::cmd("SCAN")
                .arg(cursor)
                .arg("MATCH")
                .arg(&pattern)
                .arg("COUNT")
                .arg(SCAN_BATCH)
                .query_async(&mut conn)
                .await?;

            if !keys.is_empty() {
                let deleted: usize = redis::cmd("DEL").arg(&keys).query_async(&mut conn).await?;
                removed += deleted;
            }

            if next == 0 {
                break;
            }
            cursor = next;
        }

        debug!("Removed {} Redis keys matching {}", removed, pattern);
        Ok(removed)
    }
}

/// Millisecond expiry for `PX`, never below 1 (Redis rejects 0).
fn ttl_millis(ttl: Duration) -> u64 {
    u64::try_from(ttl.as_millis()).unwrap_or(u64::MAX).max(1)
}

/// Escapes Redis glob metacharacters so a prefix matches literally.
fn escape_glob(input: &str) -> String {
    let mut escaped = String::with_capacity(input.len());
    for c in input.chars() {
        if matches!(c, '*' | '?' | '[' | ']' | '\\') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}
