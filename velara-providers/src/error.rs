//! Error types for provider calls

use thiserror::Error;

/// A failed call to one provider model
#[derive(Debug, Error)]
#[error("Model {model_id} failed: {cause}")]
pub struct ProviderError {
    /// Model identifier the call was made with
    pub model_id: String,
    /// What went wrong
    #[source]
    pub cause: ProviderFailure,
}

impl ProviderError {
    pub fn new(model_id: impl Into<String>, cause: ProviderFailure) -> Self {
        Self {
            model_id: model_id.into(),
            cause,
        }
    }
}

/// Reasons a single provider call can fail
#[derive(Debug, Error)]
pub enum ProviderFailure {
    /// No API credential configured, the request was never sent
    #[error("API key not configured")]
    MissingCredential,

    /// Connection or transport level failure
    #[error("Request failed: {0}")]
    RequestFailed(String),

    /// The request exceeded the client timeout
    #[error("Request timed out")]
    Timeout,

    /// Provider answered with a non-success status
    #[error("API error (status {status}): {message}")]
    ApiError {
        /// HTTP status code
        status: u16,
        /// Response body text
        message: String,
    },

    /// Body was not a chat completion
    #[error("Parse error: {0}")]
    ParseError(String),

    /// Chat completion without any message content in its first choice
    #[error("Response contained no message content")]
    EmptyResponse,
}

impl From<reqwest::Error> for ProviderFailure {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            ProviderFailure::Timeout
        } else {
            ProviderFailure::RequestFailed(e.to_string())
        }
    }
}
