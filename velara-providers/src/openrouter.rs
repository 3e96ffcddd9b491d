use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};
use velara_core::{Config, VelaraError};

use crate::client::ProviderClient;
use crate::error::{ProviderError, ProviderFailure};

#[derive(Debug, Clone)]
pub struct OpenRouterClient {
    client: Client,
    api_key: Option<String>,
    base_url: String,
    referer: String,
}

#[derive(Debug, Serialize)]
pub struct ChatCompletionRequest<'a> {
    pub model: &'a str,
    pub messages: Vec<ChatMessage<'a>>,
    pub response_format: ResponseFormat,
}

#[derive(Debug, Serialize)]
pub struct ChatMessage<'a> {
    pub role: &'static str,
    pub content: &'a str,
}

/// Structured output mode flag
#[derive(Debug, Serialize)]
pub struct ResponseFormat {
    #[serde(rename = "type")]
    pub format_type: &'static str, // "json_object"
}

#[derive(Debug, Deserialize)]
pub struct ChatCompletionResponse {
    #[serde(default)]
    pub choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
pub struct ChatChoice {
    pub message: ChatResponseMessage,
}

#[derive(Debug, Deserialize)]
pub struct ChatResponseMessage {
    #[serde(default)]
    pub content: Option<String>,
}

impl OpenRouterClient {
    pub fn new(
        api_key: Option<String>,
        base_url: impl Into<String>,
        referer: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, VelaraError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| VelaraError::network(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            api_key,
            base_url: base_url.into(),
            referer: referer.into(),
        })
    }

    pub fn from_config(config: &Config) -> Result<Self, VelaraError> {
        Self::new(
            config.openrouter_api_key.clone(),
            config.openrouter_base_url.clone(),
            config.referer.clone(),
            config.provider_timeout,
        )
    }

    async fn complete(
        &self,
        request: &ChatCompletionRequest<'_>,
    ) -> Result<String, ProviderFailure> {
        let api_key = self
            .api_key
            .as_deref()
            .ok_or(ProviderFailure::MissingCredential)?;

        let url = format!("{}/chat/completions", self.base_url);

        let response = self
            .client
            .post(&url)
            .bearer_auth(api_key)
            .header("Content-Type", "application/json")
            .header("HTTP-Referer", &self.referer)
            .json(request)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let message = response.text().await.unwrap_or_default();
            return Err(ProviderFailure::ApiError {
                status: status.as_u16(),
                message,
            });
        }

        let completion: ChatCompletionResponse = response
            .json()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    ProviderFailure::Timeout
                } else {
                    ProviderFailure::ParseError(format!("Failed to parse chat completion: {}", e))
                }
            })?;

        completion
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .ok_or(ProviderFailure::EmptyResponse)
    }
}

#[async_trait]
impl ProviderClient for OpenRouterClient {
    #[instrument(skip(self, system_prompt, user_prompt))]
    async fn generate(
        &self,
        model_id: &str,
        system_prompt: &str,
        user_prompt: &str,
    ) -> Result<String, ProviderError> {
        let request = ChatCompletionRequest {
            model: model_id,
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: system_prompt,
                },
                ChatMessage {
                    role: "user",
                    content: user_prompt,
                },
            ],
            response_format: ResponseFormat {
                format_type: "json_object",
            },
        };

        let content = self
            .complete(&request)
            .await
            .map_err(|cause| ProviderError::new(model_id, cause))?;

        debug!("Model {} returned {} bytes", model_id, content.len());
        Ok(content)
    }
}
