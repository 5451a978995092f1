//! Topic query routes.

use std::sync::Arc;
use std::time::Duration;

use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::routing::post;
use axum::{Json, Router};
use reviewlens_query::QueryOutcome;
use reviewlens_topics::Topic;
use serde::Deserialize;
use tracing::warn;

use super::error_response;
use crate::state::AppState;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new().route("/topics", post(post_topics).get(get_topics))
}

#[derive(Deserialize)]
struct TopicsRequest {
    #[serde(default)]
    keyword: String,
}

/// POST /api/topics {"keyword": "..."}
async fn post_topics(
    State(state): State<Arc<AppState>>,
    Json(req): Json<TopicsRequest>,
) -> (StatusCode, Json<serde_json::Value>) {
    run_query(state, req.keyword).await
}

/// GET /api/topics?keyword=...
async fn get_topics(
    State(state): State<Arc<AppState>>,
    Query(req): Query<TopicsRequest>,
) -> (StatusCode, Json<serde_json::Value>) {
    run_query(state, req.keyword).await
}

fn keyword_lists(topics: &[Topic]) -> Vec<&[String]> {
    topics.iter().map(|t| t.keywords.as_slice()).collect()
}

async fn run_query(state: Arc<AppState>, keyword: String) -> (StatusCode, Json<serde_json::Value>) {
    let keyword = keyword.trim().to_string();
    if keyword.is_empty() {
        return (
            StatusCode::BAD_REQUEST,
            Json(serde_json::json!({ "error": "Please provide a product keyword." })),
        );
    }

    let budget = Duration::from_secs(state.config.query_timeout_secs);
    let worker = state.clone();
    let kw = keyword.clone();
    let task = tokio::task::spawn_blocking(move || worker.query.query(&kw));

    match tokio::time::timeout(budget, task).await {
        Err(_) => {
            warn!("Query for '{}' exceeded {}s budget", keyword, budget.as_secs());
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(serde_json::json!({
                    "error": format!(
                        "Topic extraction for '{}' took longer than {} seconds. Please try again.",
                        keyword,
                        budget.as_secs()
                    ),
                    "retryable": true,
                })),
            )
        }
        Ok(Err(e)) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(serde_json::json!({ "error": format!("Query task failed: {}", e) })),
        ),
        Ok(Ok(Err(e))) => error_response(&e),
        Ok(Ok(Ok(QueryOutcome::NoMatches { keyword }))) => (
            StatusCode::OK,
            Json(serde_json::json!({
                "keyword": keyword,
                "matched": 0,
                "message": format!("No reviews found for products matching '{}'.", keyword),
                "positive_topics": [],
                "negative_topics": [],
            })),
        ),
        Ok(Ok(Ok(QueryOutcome::Topics(report)))) => (
            StatusCode::OK,
            Json(serde_json::json!({
                "keyword": report.keyword,
                "matched": report.matched,
                "positive_reviews": report.positive_reviews,
                "negative_reviews": report.negative_reviews,
                "positive_topics": keyword_lists(&report.positive_topics),
                "negative_topics": keyword_lists(&report.negative_topics),
                "details": {
                    "positive": report.positive_topics,
                    "negative": report.negative_topics,
                },
            })),
        ),
    }
}
