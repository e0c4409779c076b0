use crate::errors::ProviderError;
use crate::model::LlmResponse;
use crate::providers::llm::LlmClient;
use async_trait::async_trait;
use std::sync::Arc;
use tracing::{info_span, Instrument};

/// Wraps a backend in a `gen_ai.client.request` span recording model,
/// latency and failure.
pub struct TracingLlmClient {
    inner: Arc<dyn LlmClient>,
}

impl TracingLlmClient {
    pub fn new(inner: Arc<dyn LlmClient>) -> Self {
        Self { inner }
    }
}

#[async_trait]
impl LlmClient for TracingLlmClient {
    async fn complete(&self, system: &str, prompt: &str) -> Result<LlmResponse, ProviderError> {
        let span = info_span!(
            "gen_ai.client.request",
            "bewerter.provider" = self.inner.provider_name(),
            "gen_ai.request.model" = self.inner.model(),
            "bewerter.prompt_chars" = prompt.chars().count() as u64,
            "bewerter.latency_ms" = tracing::field::Empty,
            "gen_ai.usage.input_tokens" = tracing::field::Empty,
            "gen_ai.usage.output_tokens" = tracing::field::Empty,
            "error" = tracing::field::Empty,
            "error.message" = tracing::field::Empty
        );

        async move {
            let start = std::time::Instant::now();
            let result = self.inner.complete(system, prompt).await;
            let span = tracing::Span::current();
            span.record("bewerter.latency_ms", start.elapsed().as_millis() as u64);

            match &result {
                Ok(resp) => {
                    if let Some(usage) = resp.meta.get("usage") {
                        // OpenAI reports prompt/completion, Anthropic input/output.
                        let input = usage
                            .get("prompt_tokens")
                            .or_else(|| usage.get("input_tokens"))
                            .and_then(|v| v.as_u64());
                        let output = usage
                            .get("completion_tokens")
                            .or_else(|| usage.get("output_tokens"))
                            .and_then(|v| v.as_u64());
                        if let Some(i) = input {
                            span.record("gen_ai.usage.input_tokens", i);
                        }
                        if let Some(o) = output {
                            span.record("gen_ai.usage.output_tokens", o);
                        }
                    }
                    tracing::debug!(reply_chars = resp.text.len(), "backend replied");
                }
                Err(e) => {
                    span.record("error", true);
                    span.record("error.message", e.to_string().as_str());
                }
            }

            result
        }
        .instrument(span)
        .await
    }

    fn provider_name(&self) -> &'static str {
        self.inner.provider_name()
    }

    fn model(&self) -> &str {
        self.inner.model()
    }

    fn has_credentials(&self) -> bool {
        self.inner.has_credentials()
    }
}
