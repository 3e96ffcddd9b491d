//! Core types for the Velara daily deck pipeline
//!
//! This crate defines the shared data structures used across the pipeline,
//! including the article schema, provider descriptors and runtime configuration.

pub mod article;
pub mod config;
pub mod error;
pub mod provider;

pub use article::{Article, ArticleCollection, CollectionSizeError, VisualColor, ARTICLES_PER_DECK};
pub use config::Config;
pub use error::VelaraError;
pub use provider::ProviderDescriptor;
