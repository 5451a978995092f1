//! Dataset statistics.

use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};

use super::error_response;
use crate::commands::dataset_stats;
use crate::state::AppState;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new().route("/dataset/stats", get(get_stats))
}

/// GET /api/dataset/stats
async fn get_stats(State(state): State<Arc<AppState>>) -> (StatusCode, Json<serde_json::Value>) {
    let worker = state.clone();
    match tokio::task::spawn_blocking(move || dataset_stats(&worker.config)).await {
        Ok(Ok(stats)) => (StatusCode::OK, Json(serde_json::json!(stats))),
        Ok(Err(e)) => error_response(&e),
        Err(e) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(serde_json::json!({ "error": format!("Stats task failed: {}", e) })),
        ),
    }
}
