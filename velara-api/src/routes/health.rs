//! Health check endpoints

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::json;
use velara_services::StoreError;

use crate::AppState;

/// Health check response
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct HealthResponse {
    status: &'static str,
    has_deck: bool,
    updated_at: Option<DateTime<Utc>>,
}

/// Health check handler
///
/// Reads the whole deck, so a stored value that no longer decodes reports
/// unavailable instead of `hasDeck: true`.
async fn health_check(State(state): State<AppState>) -> Response {
    match deck_state(&state).await {
        Ok((has_deck, updated_at)) => (
            StatusCode::OK,
            Json(HealthResponse {
                status: "ok",
                has_deck,
                updated_at,
            }),
        )
            .into_response(),
        Err(e) => (
            StatusCode::SERVICE_UNAVAILABLE,
            Json(json!({
                "status": "unavailable",
                "error": e.to_string()
            })),
        )
            .into_response(),
    }
}

async fn deck_state(state: &AppState) -> Result<(bool, Option<DateTime<Utc>>), StoreError> {
    if state.store.get().await?.is_none() {
        return Ok((false, None));
    }
    Ok((true, state.store.last_updated().await?))
}

/// Simple liveness check (always returns OK if server is running)
async fn liveness() -> &'static str {
    "OK"
}

/// Create health routes
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health_check))
        .route("/health/live", get(liveness))
}
