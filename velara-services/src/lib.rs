//! Business logic services for the Velara daily deck
//!
//! This crate turns raw provider output into a published deck: validation,
//! provider fallback, the single-key article store and the refresh job that
//! ties them together.

pub mod article_store;
pub mod orchestrator;
pub mod refresh;
pub mod scheduler;
pub mod validator;

pub use article_store::{ArticleStore, MemoryArticleStore, SqliteArticleStore, StoreError, CACHE_KEY};
pub use orchestrator::{AllProvidersFailed, AttemptError, Generation, GenerationOrchestrator, ProviderAttempt};
pub use refresh::{RefreshError, RefreshJob, RefreshOutcome};
pub use scheduler::RefreshScheduler;
pub use validator::{ResponseValidator, ValidationError};
