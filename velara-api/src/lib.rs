//! Velara API
//!
//! HTTP surface of the daily deck pipeline: the scheduler-facing refresh
//! trigger, the reader-facing news endpoint and health checks.

pub mod error;
pub mod routes;

use std::sync::Arc;

use axum::{
    http::{header, Method},
    Router,
};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use velara_services::{ArticleStore, RefreshJob};

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub refresh_job: Arc<RefreshJob>,
    pub store: Arc<dyn ArticleStore>,
}

impl AppState {
    pub fn new(refresh_job: Arc<RefreshJob>, store: Arc<dyn ArticleStore>) -> Self {
        Self { refresh_job, store }
    }
}

/// Build the application router
pub fn build_router(state: AppState) -> Router {
    // Configure CORS for the presentation client
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION]);

    Router::new()
        .nest("/api", routes::api_routes())
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
