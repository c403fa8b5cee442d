//! API Routes
//!
//! Configures the Axum router with all cache admin endpoints.

use axum::{routing::get, Router};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use super::handlers::{
    cache_detail_handler, clear_cache_handler, evict_entry_handler, get_entry_handler,
    health_handler, list_caches_handler, stats_handler, AppState,
};

/// Creates the main router with all endpoints configured.
///
/// # Middleware
/// - CORS: Allows any origin
/// - Tracing: Logs all requests
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/caches", get(list_caches_handler))
        .route(
            "/caches/:name",
            get(cache_detail_handler).delete(clear_cache_handler),
        )
        .route(
            "/caches/:name/:key",
            get(get_entry_handler).delete(evict_entry_handler),
        )
        .route("/stats", get(stats_handler))
        .route("/health", get(health_handler))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
