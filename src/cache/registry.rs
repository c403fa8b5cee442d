//! Named Cache Registry
//!
//! The fixed set of cache names and their TTLs, built once at startup.

use std::collections::BTreeMap;
use std::time::Duration;

use crate::cache::{CUSTOMER, CUSTOMER_ALL};
use crate::config::CacheTtlConfig;
use crate::error::{CacheError, Result};

// == Cache Registry ==
/// Immutable mapping from cache name to TTL.
///
/// Every name has exactly one TTL, and the set never changes after
/// construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CacheRegistry {
    ttls: BTreeMap<String, Duration>,
}

impl CacheRegistry {
    /// Builds a registry from `(name, ttl)` pairs.
    ///
    /// # Errors
    /// Returns [`CacheError::Config`] for an empty name, a duplicate name or
    /// a zero TTL.
    pub fn new<I, S>(entries: I) -> Result<Self>
    where
        I: IntoIterator<Item = (S, Duration)>,
        S: Into<String>,
    {
        let mut ttls = BTreeMap::new();

        for (name, ttl) in entries {
            let name = name.into();
            if name.trim().is_empty() {
                return Err(CacheError::Config("cache name cannot be empty".to_string()));
            }
            if ttl.is_zero() {
                return Err(CacheError::Config(format!(
                    "cache '{}' must have a TTL greater than zero",
                    name
                )));
            }
            if ttls.insert(name.clone(), ttl).is_some() {
                return Err(CacheError::Config(format!(
                    "cache '{}' is declared twice",
                    name
                )));
            }
        }

        Ok(Self { ttls })
    }

    /// Builds the customer caches from the configured TTLs.
    pub fn from_ttl_config(config: &CacheTtlConfig) -> Result<Self> {
        Self::new([
            (CUSTOMER, config.customer_ttl),
            (CUSTOMER_ALL, config.customer_all_ttl),
        ])
    }

    /// TTL of a registered cache.
    pub fn ttl(&self, name: &str) -> Option<Duration> {
        self.ttls.get(name).copied()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.ttls.contains_key(name)
    }

    /// Registered names in sorted order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.ttls.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, Duration)> {
        self.ttls.iter().map(|(name, ttl)| (name.as_str(), *ttl))
    }

    pub fn len(&self) -> usize {
        self.ttls.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ttls.is_empty()
    }
}
