//! Provider descriptors

use std::fmt;

/// Models tried when no override is configured, best first.
///
/// `o3-deep-research` has always-on web search; `sonar-pro-search` is
/// purpose-built for search and serves as the fallback.
pub const DEFAULT_MODELS: [&str; 2] = ["openai/o3-deep-research", "perplexity/sonar-pro-search"];

/// One entry of the provider priority list
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ProviderDescriptor {
    /// Model identifier sent to the provider (e.g., "perplexity/sonar-pro-search")
    pub model_id: String,
}

impl ProviderDescriptor {
    pub fn new(model_id: impl Into<String>) -> Self {
        Self {
            model_id: model_id.into(),
        }
    }

    /// The built-in priority list
    pub fn defaults() -> Vec<Self> {
        DEFAULT_MODELS.iter().copied().map(Self::new).collect()
    }

    /// Parse a comma-separated priority list, skipping blank entries
    pub fn parse_list(list: &str) -> Vec<Self> {
        list.split(',')
            .map(str::trim)
            .filter(|m| !m.is_empty())
            .map(Self::new)
            .collect()
    }
}

impl fmt::Display for ProviderDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.model_id)
    }
}
