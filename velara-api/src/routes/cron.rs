//! Refresh trigger for the scheduler

use axum::{
    extract::State,
    http::{header, HeaderMap},
    routing::get,
    Json, Router,
};
use serde::Serialize;
use velara_core::ArticleCollection;

use crate::error::ApiError;
use crate::AppState;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct RefreshResponse {
    success: bool,
    articles: ArticleCollection,
    provider_used: String,
}

/// Create refresh routes
pub fn routes() -> Router<AppState> {
    Router::new().route("/cron", get(trigger_refresh).post(trigger_refresh))
}

/// GET|POST /api/cron - Generate today's deck and replace the cached one
///
/// Requires `Authorization: Bearer <CRON_SECRET>`.
async fn trigger_refresh(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<RefreshResponse>, ApiError> {
    let outcome = state.refresh_job.handle(bearer_token(&headers)).await?;

    Ok(Json(RefreshResponse {
        success: true,
        articles: outcome.articles,
        provider_used: outcome.provider_used,
    }))
}

fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(header::AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn test_bearer_token() {
        let mut headers = HeaderMap::new();
        assert_eq!(bearer_token(&headers), None);

        headers.insert(header::AUTHORIZATION, HeaderValue::from_static("Bearer abc"));
        assert_eq!(bearer_token(&headers), Some("abc"));

        headers.insert(header::AUTHORIZATION, HeaderValue::from_static("Basic abc"));
        assert_eq!(bearer_token(&headers), None);
    }
}
