//! API route definitions

mod cron;
mod health;
mod news;

use axum::Router;
use crate::AppState;

/// Create all API routes
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .merge(cron::routes())
        .merge(news::routes())
        .merge(health::routes())
}
