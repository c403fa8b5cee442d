//! Response DTOs for the cache admin API
//!
//! Defines the structure of outgoing HTTP response bodies.

use serde::Serialize;
use serde_json::Value;

use crate::cache::{CacheStats, NamedCache, TypedValue};

/// One registered cache (GET /caches)
#[derive(Debug, Clone, Serialize)]
pub struct CacheSummary {
    /// Cache name
    pub name: String,
    /// Entry TTL in seconds
    pub ttl_seconds: u64,
}

impl CacheSummary {
    pub fn from_cache(cache: &NamedCache) -> Self {
        Self {
            name: cache.name().to_string(),
            ttl_seconds: cache.ttl().as_secs(),
        }
    }
}

/// Response body for GET /caches
#[derive(Debug, Clone, Serialize)]
pub struct CacheListResponse {
    pub caches: Vec<CacheSummary>,
}

/// Response body for GET /caches/:name
#[derive(Debug, Clone, Serialize)]
pub struct CacheDetailResponse {
    pub name: String,
    pub ttl_seconds: u64,
    pub stats: StatsResponse,
}

impl CacheDetailResponse {
    pub fn from_cache(cache: &NamedCache) -> Self {
        Self {
            name: cache.name().to_string(),
            ttl_seconds: cache.ttl().as_secs(),
            stats: StatsResponse::from(cache.stats()),
        }
    }
}

/// Response body for GET /caches/:name/:key
#[derive(Debug, Clone, Serialize)]
pub struct EntryResponse {
    /// Cache name
    pub cache: String,
    /// Entry key within the cache
    pub key: String,
    /// Rust type the value was written from
    #[serde(rename = "@class")]
    pub class: String,
    /// Stored JSON value
    pub value: Value,
}

impl EntryResponse {
    pub fn new(cache: impl Into<String>, key: impl Into<String>, typed: TypedValue) -> Self {
        Self {
            cache: cache.into(),
            key: key.into(),
            class: typed.class,
            value: typed.value,
        }
    }
}

/// Response body for DELETE /caches/:name/:key
#[derive(Debug, Clone, Serialize)]
pub struct EvictResponse {
    /// Success message
    pub message: String,
    pub cache: String,
    pub key: String,
}

impl EvictResponse {
    pub fn new(cache: impl Into<String>, key: impl Into<String>) -> Self {
        let cache = cache.into();
        let key = key.into();
        Self {
            message: format!("Key '{}' evicted from '{}'", key, cache),
            cache,
            key,
        }
    }
}

/// Response body for DELETE /caches/:name
#[derive(Debug, Clone, Serialize)]
pub struct ClearResponse {
    pub message: String,
    pub cache: String,
    /// Number of entries removed
    pub removed: usize,
}

impl ClearResponse {
    pub fn new(cache: impl Into<String>, removed: usize) -> Self {
        let cache = cache.into();
        Self {
            message: format!("Cache '{}' cleared", cache),
            cache,
            removed,
        }
    }
}

/// Statistics body (GET /stats and per-cache detail)
#[derive(Debug, Clone, Serialize)]
pub struct StatsResponse {
    /// Number of cache hits
    pub hits: u64,
    /// Number of cache misses
    pub misses: u64,
    /// Number of writes
    pub puts: u64,
    /// Number of evicted entries
    pub removals: u64,
    /// Hit rate (hits / (hits + misses))
    pub hit_rate: f64,
}

impl From<CacheStats> for StatsResponse {
    fn from(stats: CacheStats) -> Self {
        Self {
            hits: stats.hits,
            misses: stats.misses,
            puts: stats.puts,
            removals: stats.removals,
            hit_rate: stats.hit_rate(),
        }
    }
}

/// Response body for the health endpoint (GET /health)
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    /// "healthy" or "unhealthy"
    pub status: String,
    /// Store error when unhealthy
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    /// Current timestamp in ISO 8601 format
    pub timestamp: String,
}

impl HealthResponse {
    /// Creates a healthy response with current timestamp
    pub fn healthy() -> Self {
        Self {
            status: "healthy".to_string(),
            error: None,
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }

    pub fn unhealthy(error: impl Into<String>) -> Self {
        Self {
            status: "unhealthy".to_string(),
            error: Some(error.into()),
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }

    pub fn is_healthy(&self) -> bool {
        self.error.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entry_response_serialize() {
        let typed = TypedValue {
            class: "app::Customer".to_string(),
            value: serde_json::json!({"id": 1}),
        };
        let resp = EntryResponse::new("customer", "Svc.find(1)", typed);
        let json = serde_json::to_value(&resp).unwrap();

        assert_eq!(json["@class"], "app::Customer");
        assert_eq!(json["value"]["id"], 1);
        assert_eq!(json["key"], "Svc.find(1)");
    }

    #[test]
    fn test_evict_response_serialize() {
        let resp = EvictResponse::new("customer", "k");
        let json = serde_json::to_string(&resp).unwrap();
        assert!(json.contains("evicted"));
    }

    #[test]
    fn test_stats_response_hit_rate() {
        let resp = StatsResponse::from(CacheStats {
            hits: 80,
            misses: 20,
            puts: 5,
            removals: 0,
        });
        assert!((resp.hit_rate - 0.8).abs() < 0.001);
    }

    #[test]
    fn test_stats_response_zero_requests() {
        let resp = StatsResponse::from(CacheStats::default());
        assert_eq!(resp.hit_rate, 0.0);
    }

    #[test]
    fn test_health_response_serialize() {
        let json = serde_json::to_string(&HealthResponse::healthy()).unwrap();
        assert!(json.contains("healthy"));
        assert!(json.contains("timestamp"));
        assert!(!json.contains("error"));

        let json = serde_json::to_string(&HealthResponse::unhealthy("refused")).unwrap();
        assert!(json.contains("unhealthy"));
        assert!(json.contains("refused"));
    }
}
