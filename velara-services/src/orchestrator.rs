//! Generation Orchestrator
//!
//! Walks the provider priority list until one model produces a deck that
//! passes validation. Providers are tried strictly one after another; the
//! first success ends the run.

use std::sync::Arc;

use thiserror::Error;
use tracing::{info, instrument, warn};
use velara_core::{ArticleCollection, ProviderDescriptor};
use velara_providers::{ProviderClient, ProviderError};

use crate::validator::{ResponseValidator, ValidationError};

/// A validated deck and the model that produced it
#[derive(Debug, Clone)]
pub struct Generation {
    pub articles: ArticleCollection,
    pub provider_used: String,
}

/// Why one provider attempt failed
#[derive(Debug, Error)]
pub enum AttemptError {
    #[error(transparent)]
    Provider(#[from] ProviderError),

    #[error("Invalid response: {0}")]
    Validation(#[from] ValidationError),
}

/// Record of a failed provider attempt
#[derive(Debug)]
pub struct ProviderAttempt {
    pub model_id: String,
    pub error: AttemptError,
}

/// Every provider in the priority list failed
#[derive(Debug, Error)]
#[error("All models failed to generate news ({} attempted)", .attempts.len())]
pub struct AllProvidersFailed {
    /// Failed attempts in the order they were made
    pub attempts: Vec<ProviderAttempt>,
}

impl AllProvidersFailed {
    /// Message of the final attempt, if any provider was tried
    pub fn last_error(&self) -> Option<String> {
        self.attempts.last().map(|a| a.error.to_string())
    }
}

/// Runs the provider fallback protocol
#[derive(Clone)]
pub struct GenerationOrchestrator {
    client: Arc<dyn ProviderClient>,
}

impl GenerationOrchestrator {
    pub fn new(client: Arc<dyn ProviderClient>) -> Self {
        Self { client }
    }

    #[instrument(skip_all, fields(provider_count = providers.len()))]
    pub async fn run(
        &self,
        providers: &[ProviderDescriptor],
        system_prompt: &str,
        user_prompt: &str,
    ) -> Result<Generation, AllProvidersFailed> {
        let mut attempts = Vec::new();

        for provider in providers {
            info!("Attempting to generate deck with model: {}", provider.model_id);

            match self.attempt(provider, system_prompt, user_prompt).await {
                Ok(articles) => {
                    info!("Generated deck with model: {}", provider.model_id);
                    return Ok(Generation {
                        articles,
                        provider_used: provider.model_id.clone(),
                    });
                }
                Err(error) => {
                    warn!("Model {} failed: {}", provider.model_id, error);
                    attempts.push(ProviderAttempt {
                        model_id: provider.model_id.clone(),
                        error,
                    });
                }
            }
        }

        Err(AllProvidersFailed { attempts })
    }

    async fn attempt(
        &self,
        provider: &ProviderDescriptor,
        system_prompt: &str,
        user_prompt: &str,
    ) -> Result<ArticleCollection, AttemptError> {
        let raw = self
            .client
            .generate(&provider.model_id, system_prompt, user_prompt)
            .await?;

        Ok(ResponseValidator::validate(&raw)?)
    }
}
