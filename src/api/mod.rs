//! API Module
//!
//! Operator endpoints for inspecting and evicting named caches.
//!
//! # Endpoints
//! - `GET /caches` - List caches and their TTLs
//! - `GET /caches/:name` - Cache TTL and statistics
//! - `GET /caches/:name/:key` - Stored value of one entry
//! - `DELETE /caches/:name/:key` - Evict one entry
//! - `DELETE /caches/:name` - Clear a cache
//! - `GET /stats` - Statistics summed over all caches
//! - `GET /health` - Store health check

pub mod handlers;
pub mod routes;

pub use handlers::*;
pub use routes::create_router;
