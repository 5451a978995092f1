//! Liveness and backend info.

use std::sync::Arc;

use axum::extract::State;
use axum::routing::get;
use axum::{Json, Router};

use crate::state::AppState;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new().route("/health", get(get_health))
}

/// GET /api/health
async fn get_health(State(state): State<Arc<AppState>>) -> Json<serde_json::Value> {
    let embedder = state.embedder();
    Json(serde_json::json!({
        "status": "ok",
        "service": "reviewlens",
        "version": env!("CARGO_PKG_VERSION"),
        "embedder": embedder.name(),
        "embeddingDimension": embedder.dimension(),
        "datasetPresent": state.config.data_paths.dataset_file.exists(),
    }))
}
