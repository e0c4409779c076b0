use crate::errors::ProviderError;
use crate::model::LlmResponse;
use async_trait::async_trait;
use std::time::Duration;

pub mod anthropic;
pub mod fake;
pub mod openai;
pub mod tracing;

/// A text-generation backend: system instruction plus user prompt in, reply text out.
#[async_trait]
pub trait LlmClient: Send + Sync {
    async fn complete(&self, system: &str, prompt: &str) -> Result<LlmResponse, ProviderError>;

    fn provider_name(&self) -> &'static str;

    fn model(&self) -> &str;

    /// Whether credentials were bound at construction.
    fn has_credentials(&self) -> bool {
        true
    }
}

/// HTTP client with a request timeout. Falls back to reqwest's defaults (no
/// timeout) if the TLS backend cannot be initialised.
pub(crate) fn http_client(timeout: Duration) -> reqwest::Client {
    match reqwest::Client::builder().timeout(timeout).build() {
        Ok(client) => client,
        Err(e) => {
            ::tracing::warn!(
                error = %e,
                timeout_ms = timeout.as_millis() as u64,
                "failed to build HTTP client; configured timeout is not applied"
            );
            reqwest::Client::new()
        }
    }
}
