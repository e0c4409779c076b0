use super::LlmClient;
use crate::errors::ProviderError;
use crate::model::LlmResponse;
use async_trait::async_trait;
use serde_json::json;
use std::time::Duration;

pub const DEFAULT_BASE_URL: &str = "https://api.anthropic.com/v1";
pub const DEFAULT_MODEL: &str = "claude-3-haiku-20240307";
pub const API_KEY_ENV: &str = "ANTHROPIC_API_KEY";
const API_VERSION: &str = "2023-06-01";

/// Messages-API adapter. The system instruction is prepended to the user
/// message, separated by a blank line.
pub struct AnthropicClient {
    pub model: String,
    pub max_tokens: u32,
    api_key: Option<String>,
    base_url: String,
    client: reqwest::Client,
}

impl AnthropicClient {
    pub fn new(model: String, api_key: Option<String>, max_tokens: u32) -> Self {
        Self {
            model,
            max_tokens,
            api_key,
            base_url: DEFAULT_BASE_URL.to_string(),
            client: reqwest::Client::new(),
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.client = super::http_client(timeout);
        self
    }
}

#[async_trait]
impl LlmClient for AnthropicClient {
    async fn complete(&self, system: &str, prompt: &str) -> Result<LlmResponse, ProviderError> {
        let api_key = self
            .api_key
            .as_deref()
            .ok_or_else(|| ProviderError::MissingCredentials {
                env_var: API_KEY_ENV.to_string(),
            })?;
        let url = format!("{}/messages", self.base_url);

        let body = json!({
            "model": self.model,
            "max_tokens": self.max_tokens,
            "messages": [
                { "role": "user", "content": format!("{}\n\n{}", system, prompt) }
            ],
        });

        let resp = self
            .client
            .post(&url)
            .header("x-api-key", api_key)
            .header("anthropic-version", API_VERSION)
            .json(&body)
            .send()
            .await?;

        let status = resp.status();
        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            return Err(ProviderError::RateLimited {
                status: status.as_u16(),
            });
        }
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(ProviderError::Api {
                status: status.as_u16(),
                body,
            });
        }

        let json: serde_json::Value =
            resp.json()
                .await
                .map_err(|e| ProviderError::InvalidResponse {
                    message: e.to_string(),
                })?;

        let text = json
            .pointer("/content/0/text")
            .and_then(|v| v.as_str())
            .ok_or_else(|| ProviderError::InvalidResponse {
                message: "Anthropic API response missing content".to_string(),
            })?
            .to_string();

        Ok(LlmResponse {
            text,
            provider: "anthropic".to_string(),
            model: self.model.clone(),
            meta: json!({ "usage": json.get("usage").cloned().unwrap_or_default() }),
        })
    }

    fn provider_name(&self) -> &'static str {
        "anthropic"
    }

    fn model(&self) -> &str {
        &self.model
    }

    fn has_credentials(&self) -> bool {
        self.api_key.is_some()
    }
}
