//! API Handlers
//!
//! HTTP request handlers for each inspection endpoint. Each handler takes the
//! cache lock once and calls a single engine operation.

use axum::{
    extract::{Path, State},
    Json,
};
use serde_json::Value;

use crate::cache::{shared, CacheStats, CacheStore, DebugInfo, SharedCache};
use crate::config::CacheConfig;
use crate::error::{CacheError, Result};
use crate::models::{
    ClearResponse, DeleteResponse, GetResponse, HealthResponse, InvalidateRequest,
    InvalidateResponse, SetRequest, SetResponse,
};

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    /// Shared cache of JSON values
    pub cache: SharedCache<Value>,
}

impl AppState {
    /// Creates a new AppState with the given cache store.
    pub fn new(cache: CacheStore<Value>) -> Self {
        Self {
            cache: shared(cache),
        }
    }

    /// Creates a new AppState from cache limits.
    pub fn from_config(config: &CacheConfig) -> Self {
        Self::new(CacheStore::new(config.clone()))
    }
}

/// Handler for PUT /entries
///
/// Stores a JSON value. Oversized values are accepted by the endpoint but not
/// stored; the rejection shows up in `/stats`.
pub async fn set_handler(
    State(state): State<AppState>,
    Json(req): Json<SetRequest>,
) -> Result<Json<SetResponse>> {
    if let Some(error_msg) = req.validate() {
        return Err(CacheError::InvalidRequest(error_msg));
    }

    let options = req.options();
    let mut cache = state.cache.write().await;
    cache.set_with(req.key.clone(), req.value, options);

    Ok(Json(SetResponse::new(req.key)))
}

/// Handler for GET /entries/:key
pub async fn get_handler(
    State(state): State<AppState>,
    Path(key): Path<String>,
) -> Result<Json<GetResponse>> {
    // Write lock: reads update hit counters and may expire the entry
    let mut cache = state.cache.write().await;
    let value = cache
        .get(&key)
        .ok_or_else(|| CacheError::NotFound(key.clone()))?;

    Ok(Json(GetResponse::new(key, value)))
}

/// Handler for DELETE /entries/:key
pub async fn delete_handler(
    State(state): State<AppState>,
    Path(key): Path<String>,
) -> Json<DeleteResponse> {
    let removed = state.cache.write().await.delete(&key);
    Json(DeleteResponse::new(key, removed))
}

/// Handler for DELETE /entries
pub async fn clear_handler(State(state): State<AppState>) -> Json<ClearResponse> {
    state.cache.write().await.clear();
    Json(ClearResponse::cleared())
}

/// Handler for POST /invalidate
pub async fn invalidate_handler(
    State(state): State<AppState>,
    Json(req): Json<InvalidateRequest>,
) -> Result<Json<InvalidateResponse>> {
    let removed = state.cache.write().await.invalidate(&req.pattern)?;
    Ok(Json(InvalidateResponse::new(req.pattern, removed)))
}

/// Handler for GET /stats
pub async fn stats_handler(State(state): State<AppState>) -> Json<CacheStats> {
    Json(state.cache.read().await.stats())
}

/// Handler for GET /debug
pub async fn debug_handler(State(state): State<AppState>) -> Json<DebugInfo> {
    Json(state.cache.read().await.debug_info())
}

/// Handler for GET /health
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::healthy())
}
