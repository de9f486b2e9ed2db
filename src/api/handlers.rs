//! API Handlers
//!
//! HTTP request handlers exposing the store operations.

use axum::{
    body::Bytes,
    extract::{Path, Query, State},
    Json,
};

use crate::error::{CacheError, Result};
use crate::models::{
    FlushResponse, HealthResponse, IncrResponse, PushResponse, RangeQuery, RangeResponse,
    SetQuery, SetResponse, StatsResponse,
};
use crate::store::{KeyValueStore, MemoryStore};

/// Application state shared across all handlers.
///
/// `MemoryStore` is internally synchronized, so handlers only clone the handle.
#[derive(Clone, Default)]
pub struct AppState {
    pub store: MemoryStore,
}

impl AppState {
    pub fn new(store: MemoryStore) -> Self {
        Self { store }
    }
}

/// Handler for GET /get/:key
///
/// Returns the raw bytes stored under the key.
pub async fn get_handler(
    State(state): State<AppState>,
    Path(key): Path<String>,
) -> Result<Vec<u8>> {
    match state.store.get(&key).await? {
        Some(value) => Ok(value),
        None => Err(CacheError::NotFound(key)),
    }
}

/// Handler for PUT /set/:key
///
/// Stores the request body; with `?ttl=N` the key expires after N seconds.
pub async fn set_handler(
    State(state): State<AppState>,
    Path(key): Path<String>,
    Query(query): Query<SetQuery>,
    body: Bytes,
) -> Result<Json<SetResponse>> {
    match query.ttl {
        Some(ttl) => state.store.setex(&key, ttl, body.to_vec()).await?,
        None => state.store.set(&key, body.to_vec()).await?,
    }

    Ok(Json(SetResponse::new(key)))
}

/// Handler for POST /incr/:key
pub async fn incr_handler(
    State(state): State<AppState>,
    Path(key): Path<String>,
) -> Result<Json<IncrResponse>> {
    let value = state.store.incr(&key).await?;
    Ok(Json(IncrResponse::new(key, value)))
}

/// Handler for POST /rpush/:key
///
/// Appends the request body to the list under the key.
pub async fn rpush_handler(
    State(state): State<AppState>,
    Path(key): Path<String>,
    body: Bytes,
) -> Result<Json<PushResponse>> {
    let length = state.store.rpush(&key, body.to_vec()).await?;
    Ok(Json(PushResponse::new(key, length)))
}

/// Handler for GET /lrange/:key
pub async fn lrange_handler(
    State(state): State<AppState>,
    Path(key): Path<String>,
    Query(range): Query<RangeQuery>,
) -> Result<Json<RangeResponse>> {
    let values = state.store.lrange(&key, range.start, range.stop).await?;
    Ok(Json(RangeResponse::new(key, values)))
}

/// Handler for POST /flushdb
pub async fn flush_handler(State(state): State<AppState>) -> Result<Json<FlushResponse>> {
    state.store.flushdb().await?;
    Ok(Json(FlushResponse::flushed()))
}

/// Handler for GET /stats
pub async fn stats_handler(State(state): State<AppState>) -> Json<StatsResponse> {
    Json(StatsResponse::from(state.store.stats().await))
}

/// Handler for GET /health
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::healthy())
}
