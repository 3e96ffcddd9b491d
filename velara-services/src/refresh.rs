//! Refresh Job
//!
//! Scheduled entry point: checks the caller's credential, generates a new
//! deck and replaces the stored one. A failed generation leaves the previous
//! deck in place.

use std::sync::Arc;

use chrono::{NaiveDate, Utc};
use thiserror::Error;
use tracing::{error, info, instrument, warn};
use velara_core::{ArticleCollection, ProviderDescriptor};
use velara_providers::PromptSet;

use crate::article_store::{ArticleStore, StoreError};
use crate::orchestrator::{AllProvidersFailed, GenerationOrchestrator};

/// Result of a successful refresh
#[derive(Debug, Clone)]
pub struct RefreshOutcome {
    pub articles: ArticleCollection,
    pub provider_used: String,
}

#[derive(Debug, Error)]
pub enum RefreshError {
    #[error("Unauthorized")]
    Unauthorized,

    #[error(transparent)]
    AllProvidersFailed(#[from] AllProvidersFailed),

    #[error("Failed to store news: {0}")]
    Store(#[from] StoreError),
}

pub struct RefreshJob {
    orchestrator: GenerationOrchestrator,
    store: Arc<dyn ArticleStore>,
    providers: Vec<ProviderDescriptor>,
    prompts: PromptSet,
    secret: Option<String>,
}

impl RefreshJob {
    pub fn new(
        orchestrator: GenerationOrchestrator,
        store: Arc<dyn ArticleStore>,
        providers: Vec<ProviderDescriptor>,
        prompts: PromptSet,
        secret: Option<String>,
    ) -> Self {
        if secret.is_none() {
            warn!("CRON_SECRET not set - every refresh request will be rejected");
        }

        Self {
            orchestrator,
            store,
            providers,
            prompts,
            secret,
        }
    }

    /// Check the bearer credential presented by the caller
    pub fn authorize(&self, credential: Option<&str>) -> Result<(), RefreshError> {
        match (self.secret.as_deref(), credential) {
            (Some(secret), Some(presented)) if secret == presented => Ok(()),
            _ => Err(RefreshError::Unauthorized),
        }
    }

    /// Authorize, then refresh
    pub async fn handle(&self, credential: Option<&str>) -> Result<RefreshOutcome, RefreshError> {
        if let Err(e) = self.authorize(credential) {
            warn!("Rejected refresh request with invalid credential");
            return Err(e);
        }
        self.run().await
    }

    /// Refresh the deck for today (UTC)
    pub async fn run(&self) -> Result<RefreshOutcome, RefreshError> {
        self.run_for(Utc::now().date_naive()).await
    }

    #[instrument(skip(self))]
    pub async fn run_for(&self, date: NaiveDate) -> Result<RefreshOutcome, RefreshError> {
        let user_prompt = self.prompts.user_prompt(date);

        let generation = match self
            .orchestrator
            .run(&self.providers, &self.prompts.system, &user_prompt)
            .await
        {
            Ok(generation) => generation,
            Err(e) => {
                error!("{}; keeping the previous deck", e);
                return Err(e.into());
            }
        };

        self.store.put(&generation.articles).await?;

        info!("Deck refreshed using model: {}", generation.provider_used);
        Ok(RefreshOutcome {
            articles: generation.articles,
            provider_used: generation.provider_used,
        })
    }
}
