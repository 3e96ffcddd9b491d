//! Mapping of pipeline failures onto HTTP responses

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use serde_json::json;
use thiserror::Error;
use tracing::error;
use velara_services::{RefreshError, StoreError};

#[derive(Debug, Error)]
pub enum ApiError {
    #[error(transparent)]
    Refresh(#[from] RefreshError),

    #[error("Failed to fetch news: {0}")]
    Read(#[source] StoreError),
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct AttemptSummary {
    model_id: String,
    reason: Option<&'static str>,
    error: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::Refresh(RefreshError::Unauthorized) => {
                (StatusCode::UNAUTHORIZED, "Unauthorized").into_response()
            }
            ApiError::Refresh(RefreshError::AllProvidersFailed(e)) => {
                let attempts: Vec<AttemptSummary> = e
                    .attempts
                    .iter()
                    .map(|a| AttemptSummary {
                        model_id: a.model_id.clone(),
                        reason: match &a.error {
                            velara_services::AttemptError::Validation(v) => Some(v.reason()),
                            velara_services::AttemptError::Provider(_) => None,
                        },
                        error: a.error.to_string(),
                    })
                    .collect();

                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({
                        "error": "All models failed to generate news",
                        "lastError": e.last_error(),
                        "attempts": attempts,
                    })),
                )
                    .into_response()
            }
            ApiError::Refresh(RefreshError::Store(e)) => {
                error!("Failed to store news: {}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({
                        "error": "Failed to store news",
                        "message": e.to_string(),
                    })),
                )
                    .into_response()
            }
            ApiError::Read(e) => {
                error!("Failed to fetch news: {}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({
                        "error": "Failed to fetch news",
                        "message": e.to_string(),
                    })),
                )
                    .into_response()
            }
        }
    }
}
