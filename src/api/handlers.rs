//! API Handlers
//!
//! HTTP request handlers for inspecting and evicting named caches.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use tracing::{info, warn};

use crate::cache::CacheManager;
use crate::error::{CacheError, Result};
use crate::models::{
    CacheDetailResponse, CacheListResponse, CacheSummary, ClearResponse, EntryResponse,
    EvictResponse, HealthResponse, StatsResponse,
};

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    /// The process-wide cache manager
    pub manager: Arc<CacheManager>,
}

impl AppState {
    pub fn new(manager: CacheManager) -> Self {
        Self {
            manager: Arc::new(manager),
        }
    }
}

/// Handler for GET /caches
pub async fn list_caches_handler(State(state): State<AppState>) -> Json<CacheListResponse> {
    let caches = state
        .manager
        .caches()
        .map(CacheSummary::from_cache)
        .collect();

    Json(CacheListResponse { caches })
}

/// Handler for GET /caches/:name
pub async fn cache_detail_handler(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> Result<Json<CacheDetailResponse>> {
    let cache = state.manager.cache(&name)?;
    Ok(Json(CacheDetailResponse::from_cache(cache)))
}

/// Handler for GET /caches/:name/:key
///
/// Returns the stored value without knowing its Rust type.
pub async fn get_entry_handler(
    State(state): State<AppState>,
    Path((name, key)): Path<(String, String)>,
) -> Result<Json<EntryResponse>> {
    let cache = state.manager.cache(&name)?;
    let typed = cache
        .get_untyped(&key)
        .await?
        .ok_or_else(|| CacheError::NotFound(key.clone()))?;

    Ok(Json(EntryResponse::new(name, key, typed)))
}

/// Handler for DELETE /caches/:name/:key
pub async fn evict_entry_handler(
    State(state): State<AppState>,
    Path((name, key)): Path<(String, String)>,
) -> Result<Json<EvictResponse>> {
    let cache = state.manager.cache(&name)?;
    cache.evict(&key).await?;
    info!(cache = %name, key = %key, "Entry evicted through admin API");

    Ok(Json(EvictResponse::new(name, key)))
}

/// Handler for DELETE /caches/:name
pub async fn clear_cache_handler(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> Result<Json<ClearResponse>> {
    let cache = state.manager.cache(&name)?;
    let removed = cache.clear().await?;
    info!(cache = %name, removed, "Cache cleared through admin API");

    Ok(Json(ClearResponse::new(name, removed)))
}

/// Handler for GET /stats
///
/// Returns counters summed over every cache.
pub async fn stats_handler(State(state): State<AppState>) -> Json<StatsResponse> {
    Json(StatsResponse::from(state.manager.stats()))
}

/// Handler for GET /health
///
/// Pings the store; 503 when it cannot be reached.
pub async fn health_handler(
    State(state): State<AppState>,
) -> (StatusCode, Json<HealthResponse>) {
    match state.manager.ping().await {
        Ok(()) => (StatusCode::OK, Json(HealthResponse::healthy())),
        Err(e) => {
            warn!("Health check failed: {}", e);
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(HealthResponse::unhealthy(e.to_string())),
            )
        }
    }
}
