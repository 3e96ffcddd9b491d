//! Error types shared across the pipeline

use thiserror::Error;

/// Pipeline-wide error type for setup and configuration failures
#[derive(Error, Debug)]
pub enum VelaraError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl VelaraError {
    pub fn network(msg: impl Into<String>) -> Self {
        VelaraError::Network(msg.into())
    }

    pub fn config(msg: impl Into<String>) -> Self {
        VelaraError::Config(msg.into())
    }
}

/// Result type alias for pipeline setup operations
pub type VelaraResult<T> = Result<T, VelaraError>;
