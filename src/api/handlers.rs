//! API Handlers
//!
//! HTTP request handlers for each gated cache endpoint.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    Json,
};
use tracing::debug;

use crate::backend::MemoryBackend;
use crate::error::{ApiError, ConfigError, Result};
use crate::gate::GatedCache;
use crate::key::Key;
use crate::models::{
    GetRequest, GetResponse, HealthResponse, SetRequest, SetResponse, StatsResponse,
};

/// Application state shared across all handlers.
///
/// The gate synchronizes its own filter and the memory backend its own map,
/// so an `Arc` is enough for sharing.
#[derive(Clone)]
pub struct AppState {
    /// Membership-gated store
    pub gate: Arc<GatedCache<MemoryBackend>>,
}

impl AppState {
    /// Creates a new AppState with the given gate.
    pub fn new(gate: GatedCache<MemoryBackend>) -> Self {
        Self {
            gate: Arc::new(gate),
        }
    }

    /// Creates a new AppState from configuration.
    ///
    /// Sizes the membership filter from the Config and fronts an empty
    /// memory backend with it.
    pub fn from_config(config: &crate::config::Config) -> std::result::Result<Self, ConfigError> {
        let gate = GatedCache::with_config(MemoryBackend::new(), config.gate_config())?;
        Ok(Self::new(gate))
    }
}

/// Handler for PUT /set
///
/// Records the key in the membership filter and writes through to the store.
pub async fn set_handler(
    State(state): State<AppState>,
    Json(req): Json<SetRequest>,
) -> Result<Json<SetResponse>> {
    let key = req.key.into_key();
    let label = key.to_string();

    state.gate.set(key, req.value)?;

    Ok(Json(SetResponse::new(label)))
}

/// Handler for GET /get/:key
///
/// Looks up a text key. Keys the gate has never seen are reported as not
/// found without touching the store.
pub async fn get_handler(
    State(state): State<AppState>,
    Path(key): Path<String>,
) -> Result<Json<GetResponse>> {
    lookup(&state, Key::Text(key))
}

/// Handler for POST /get
///
/// Looks up a key given as any JSON scalar (string, integer, float).
pub async fn get_typed_handler(
    State(state): State<AppState>,
    Json(req): Json<GetRequest>,
) -> Result<Json<GetResponse>> {
    lookup(&state, req.key.into_key())
}

fn lookup(state: &AppState, key: Key) -> Result<Json<GetResponse>> {
    match state.gate.get(&key)? {
        Some(value) => Ok(Json(GetResponse::new(key.to_string(), value))),
        None => {
            debug!("No value for key {}", key);
            Err(ApiError::NotFound(key.to_string()))
        }
    }
}

/// Handler for GET /stats
///
/// Returns gate routing counters and membership filter state.
pub async fn stats_handler(State(state): State<AppState>) -> Json<StatsResponse> {
    Json(StatsResponse::new(&state.gate.stats(), state.gate.filter()))
}

/// Handler for GET /health
///
/// Returns health status of the server.
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::healthy())
}
