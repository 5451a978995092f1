//! HTTP route handlers.

pub mod dataset;
pub mod health;
pub mod topics;

use std::sync::Arc;

use axum::http::StatusCode;
use axum::{Json, Router};
use reviewlens_core::Error;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::state::AppState;

/// Build the main Axum router with all routes.
pub fn build_router(state: Arc<AppState>) -> Router {
    Router::new()
        .nest("/api", api_routes())
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

fn api_routes() -> Router<Arc<AppState>> {
    Router::new()
        .merge(health::routes())
        .merge(topics::routes())
        .merge(dataset::routes())
}

/// Map a pipeline error to a status code and JSON body.
pub(crate) fn error_response(err: &Error) -> (StatusCode, Json<serde_json::Value>) {
    match err {
        Error::Precondition(msg) => (
            StatusCode::CONFLICT,
            Json(serde_json::json!({ "error": msg, "retryable": false })),
        ),
        Error::ResourceUnavailable(_) => (
            StatusCode::SERVICE_UNAVAILABLE,
            Json(serde_json::json!({ "error": err.to_string(), "retryable": false })),
        ),
        _ => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(serde_json::json!({ "error": err.to_string(), "retryable": false })),
        ),
    }
}
