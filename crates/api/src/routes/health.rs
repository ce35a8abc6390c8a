use axum::{extract::State, routing::get, Json, Router};
use serde_json::{json, Value};

use crate::error::ApiResult;
use crate::state::AppState;

/// Health check routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health_check))
        .route("/api/ping", get(ping))
}

/// Full health check: the document store must be readable and parse.
async fn health_check(State(state): State<AppState>) -> ApiResult<Json<Value>> {
    let document = state.store().load().await?;

    Ok(Json(json!({
        "status": "ok",
        "store": "readable",
        "pages": document.pages.len(),
        "subscribers": state.event_bus().subscriber_count(),
    })))
}

/// Lightweight ping with no store access.
async fn ping() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}
