//! Response models for the cache admin API
//!
//! DTOs serialized into HTTP response bodies.

pub mod responses;

// Re-export commonly used types
pub use responses::{
    CacheDetailResponse, CacheListResponse, CacheSummary, ClearResponse, EntryResponse,
    EvictResponse, HealthResponse, StatsResponse,
};
