//! Configuration Module
//!
//! Handles loading process configuration from environment variables,
//! including the TTL of every named cache.

use std::env;
use std::time::Duration;

use crate::error::{CacheError, Result};

/// Default TTL of the single-customer cache (10 minutes).
pub const DEFAULT_CUSTOMER_TTL: Duration = Duration::from_secs(600);

/// Default TTL of the all-customers cache (2 minutes).
pub const DEFAULT_CUSTOMER_ALL_TTL: Duration = Duration::from_secs(120);

/// Per-cache expiry settings, injected into the registry at startup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CacheTtlConfig {
    /// TTL of the single-entity cache
    pub customer_ttl: Duration,
    /// TTL of the all-entities cache
    pub customer_all_ttl: Duration,
}

impl Default for CacheTtlConfig {
    fn default() -> Self {
        Self {
            customer_ttl: DEFAULT_CUSTOMER_TTL,
            customer_all_ttl: DEFAULT_CUSTOMER_ALL_TTL,
        }
    }
}

/// Process configuration parameters.
#[derive(Debug, Clone)]
pub struct Config {
    /// Redis connection URL; the in-memory store is used when absent
    pub redis_url: Option<String>,
    /// Named cache TTLs
    pub ttl: CacheTtlConfig,
    /// HTTP server port
    pub server_port: u16,
    /// In-memory sweeper interval in seconds
    pub cleanup_interval: u64,
}

impl Config {
    /// Loads configuration from environment variables.
    ///
    /// # Environment Variables
    /// - `REDIS_URL` - Redis URL (default: unset, in-memory store)
    /// - `CACHE_CUSTOMER_TTL` - single customer TTL (default: `10m`)
    /// - `CACHE_CUSTOMER_ALL_TTL` - all customers TTL (default: `2m`)
    /// - `SERVER_PORT` - HTTP server port (default: 3000)
    /// - `CLEANUP_INTERVAL` - Sweeper frequency in seconds (default: 1)
    ///
    /// # Errors
    /// Returns [`CacheError::Config`] when a TTL is malformed or zero.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Loads configuration through an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let ttl = CacheTtlConfig {
            customer_ttl: ttl_var(&lookup, "CACHE_CUSTOMER_TTL", DEFAULT_CUSTOMER_TTL)?,
            customer_all_ttl: ttl_var(
                &lookup,
                "CACHE_CUSTOMER_ALL_TTL",
                DEFAULT_CUSTOMER_ALL_TTL,
            )?,
        };

        Ok(Self {
            redis_url: lookup("REDIS_URL").filter(|url| !url.trim().is_empty()),
            ttl,
            server_port: lookup("SERVER_PORT")
                .and_then(|v| v.parse().ok())
                .unwrap_or(3000),
            cleanup_interval: lookup("CLEANUP_INTERVAL")
                .and_then(|v| v.parse().ok())
                .unwrap_or(1),
        })
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            redis_url: None,
            ttl: CacheTtlConfig::default(),
            server_port: 3000,
            cleanup_interval: 1,
        }
    }
}

fn ttl_var<F>(lookup: &F, name: &str, default: Duration) -> Result<Duration>
where
    F: Fn(&str) -> Option<String>,
{
    let Some(raw) = lookup(name) else {
        return Ok(default);
    };

    let ttl = parse_duration(&raw)
        .map_err(|_| CacheError::Config(format!("{}='{}' is not a valid duration", name, raw)))?;
    if ttl.is_zero() {
        return Err(CacheError::Config(format!("{} must be greater than zero", name)));
    }
    Ok(ttl)
}

// == Duration Parsing ==
/// Parses `<integer>[ms|s|m|h|d]`; a bare integer is read as seconds.
pub fn parse_duration(input: &str) -> Result<Duration> {
    let input = input.trim();
    let split = input
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(input.len());
    let (digits, unit) = input.split_at(split);

    let amount: u64 = digits
        .parse()
        .map_err(|_| CacheError::Config(format!("invalid duration '{}'", input)))?;

    let duration = match unit.trim() {
        "ms" => Duration::from_millis(amount),
        "" | "s" => Duration::from_secs(amount),
        "m" => Duration::from_secs(amount.saturating_mul(60)),
        "h" => Duration::from_secs(amount.saturating_mul(3_600)),
        "d" => Duration::from_secs(amount.saturating_mul(86_400)),
        other => {
            return Err(CacheError::Config(format!(
                "unknown duration unit '{}' in '{}'",
                other, input
            )))
        }
    };
    Ok(duration)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name: &str| map.get(name).cloned()
    }

    #[test]
    fn test_config_default() {
        let config = Config::default();
        assert!(config.redis_url.is_none());
        assert_eq!(config.ttl.customer_ttl, Duration::from_secs(600));
        assert_eq!(config.ttl.customer_all_ttl, Duration::from_secs(120));
        assert_eq!(config.server_port, 3000);
        assert_eq!(config.cleanup_interval, 1);
    }

    #[test]
    fn test_config_from_lookup_defaults() {
        let config = Config::from_lookup(lookup_from(&[])).unwrap();
        assert!(config.redis_url.is_none());
        assert_eq!(config.ttl, CacheTtlConfig::default());
        assert_eq!(config.server_port, 3000);
    }

    #[test]
    fn test_config_from_lookup_overrides() {
        let config = Config::from_lookup(lookup_from(&[
            ("REDIS_URL", "redis://cache:6379"),
            ("CACHE_CUSTOMER_TTL", "15m"),
            ("CACHE_CUSTOMER_ALL_TTL", "30s"),
            ("SERVER_PORT", "8081"),
        ]))
        .unwrap();

        assert_eq!(config.redis_url.as_deref(), Some("redis://cache:6379"));
        assert_eq!(config.ttl.customer_ttl, Duration::from_secs(900));
        assert_eq!(config.ttl.customer_all_ttl, Duration::from_secs(30));
        assert_eq!(config.server_port, 8081);
    }

    #[test]
    fn test_blank_redis_url_is_ignored() {
        let config = Config::from_lookup(lookup_from(&[("REDIS_URL", "  ")])).unwrap();
        assert!(config.redis_url.is_none());
    }

    #[test]
    fn test_malformed_ttl_is_fatal() {
        let result = Config::from_lookup(lookup_from(&[("CACHE_CUSTOMER_TTL", "soon")]));
        assert!(matches!(result, Err(CacheError::Config(_))));
    }

    #[test]
    fn test_zero_ttl_is_fatal() {
        let result = Config::from_lookup(lookup_from(&[("CACHE_CUSTOMER_ALL_TTL", "0s")]));
        assert!(matches!(result, Err(CacheError::Config(_))));
    }

    #[test]
    fn test_bad_port_falls_back_to_default() {
        let config = Config::from_lookup(lookup_from(&[("SERVER_PORT", "http")])).unwrap();
        assert_eq!(config.server_port, 3000);
    }

    #[test]
    fn test_parse_duration_units() {
        assert_eq!(parse_duration("250ms").unwrap(), Duration::from_millis(250));
        assert_eq!(parse_duration("42").unwrap(), Duration::from_secs(42));
        assert_eq!(parse_duration("42s").unwrap(), Duration::from_secs(42));
        assert_eq!(parse_duration("3m").unwrap(), Duration::from_secs(180));
        assert_eq!(parse_duration("2h").unwrap(), Duration::from_secs(7_200));
        assert_eq!(parse_duration(" 1d ").unwrap(), Duration::from_secs(86_400));
    }

    #[test]
    fn test_parse_duration_rejects_garbage() {
        assert!(parse_duration("").is_err());
        assert!(parse_duration("m").is_err());
        assert!(parse_duration("10 weeks").is_err());
        assert!(parse_duration("-5s").is_err());
    }
}
