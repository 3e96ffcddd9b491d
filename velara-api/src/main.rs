//! Velara API Server
//!
//! Serves the cached daily deck and accepts scheduler-triggered refreshes.

use std::net::SocketAddr;
use std::sync::Arc;

use tracing::{info, warn};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};
use velara_api::{build_router, AppState};
use velara_core::Config;
use velara_providers::{OpenRouterClient, PromptSet};
use velara_services::{
    ArticleStore, GenerationOrchestrator, RefreshJob, RefreshScheduler, SqliteArticleStore,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env.local file
    if let Err(e) = dotenvy::from_filename(".env.local") {
        // Not an error if the file doesn't exist
        if !matches!(e, dotenvy::Error::Io(_)) {
            eprintln!("Warning: Failed to load .env.local: {}", e);
        }
    }

    // Initialize logging
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info,velara_api=debug")),
        )
        .init();

    info!("Starting Velara API");

    let config = Config::from_env()?;

    if config.openrouter_api_key.is_none() {
        warn!("OPENROUTER_API_KEY not set - every provider call will fail");
    }

    let models: Vec<&str> = config.providers.iter().map(|p| p.model_id.as_str()).collect();
    info!("Provider priority: {}", models.join(" -> "));

    let client = Arc::new(OpenRouterClient::from_config(&config)?);
    let orchestrator = GenerationOrchestrator::new(client);

    info!("Initializing article store at: {}", config.db_path.display());
    let store: Arc<dyn ArticleStore> = Arc::new(SqliteArticleStore::new(&config.db_path)?);

    let refresh_job = Arc::new(RefreshJob::new(
        orchestrator,
        store.clone(),
        config.providers.clone(),
        PromptSet::default(),
        config.cron_secret.clone(),
    ));

    // Optional in-process schedule, otherwise an external cron hits /api/cron
    match config.refresh_interval {
        Some(interval) => {
            RefreshScheduler::new(refresh_job.clone(), interval).spawn();
        }
        None => info!("REFRESH_INTERVAL_SECS not set - relying on external scheduler"),
    }

    let app = build_router(AppState::new(refresh_job, store));

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    info!("Server listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
