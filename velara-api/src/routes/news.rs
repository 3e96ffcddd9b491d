//! Read endpoint for the presentation client

use axum::{
    extract::State,
    http::header,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use tracing::debug;
use velara_core::Article;

use crate::error::ApiError;
use crate::AppState;

/// Short edge caching with a longer background revalidation window
pub const NEWS_CACHE_CONTROL: &str = "s-maxage=60, stale-while-revalidate=300";

/// Create news routes
pub fn routes() -> Router<AppState> {
    Router::new().route("/news", get(get_news))
}

/// GET /api/news - Current deck, or `[]` before the first refresh
///
/// The client treats an empty array as "use the bundled fallback deck".
async fn get_news(State(state): State<AppState>) -> Result<Response, ApiError> {
    match state.store.get().await.map_err(ApiError::Read)? {
        Some(deck) => Ok((
            [(header::CACHE_CONTROL, NEWS_CACHE_CONTROL)],
            Json(deck),
        )
            .into_response()),
        None => {
            debug!("No deck cached yet, serving empty list");
            Ok(Json(Vec::<Article>::new()).into_response())
        }
    }
}
