//! Generative content providers for the Velara daily deck
//!
//! This crate wraps the outbound call to a chat-completions provider. A client
//! returns the raw message content for one model and never interprets it;
//! validation and fallback between models live in `velara-services`.

pub mod client;
pub mod error;
pub mod openrouter;
pub mod prompt;

pub use client::ProviderClient;
pub use error::{ProviderError, ProviderFailure};
pub use openrouter::OpenRouterClient;
pub use prompt::PromptSet;
