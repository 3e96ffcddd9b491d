//! Provider client abstraction

use async_trait::async_trait;

use crate::error::ProviderError;

/// One outbound generation call
///
/// Implementations make exactly one request per call and do not retry.
/// The returned text is untrusted model output.
#[async_trait]
pub trait ProviderClient: Send + Sync {
    async fn generate(
        &self,
        model_id: &str,
        system_prompt: &str,
        user_prompt: &str,
    ) -> Result<String, ProviderError>;
}
