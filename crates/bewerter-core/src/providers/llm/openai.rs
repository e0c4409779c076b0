use super::LlmClient;
use crate::errors::ProviderError;
use crate::model::LlmResponse;
use async_trait::async_trait;
use serde_json::json;
use std::time::Duration;

pub const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";
pub const DEFAULT_MODEL: &str = "gpt-4o-mini";
pub const API_KEY_ENV: &str = "OPENAI_API_KEY";

/// Chat-completions adapter. The system instruction goes out as its own
/// `system` message.
pub struct OpenAIClient {
    pub model: String,
    pub temperature: f32,
    pub max_tokens: u32,
    api_key: Option<String>,
    base_url: String,
    client: reqwest::Client,
}

impl OpenAIClient {
    pub fn new(
        model: String,
        api_key: Option<String>,
        temperature: f32,
        max_tokens: u32,
    ) -> Self {
        Self {
            model,
            temperature,
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
impl LlmClient for OpenAIClient {
    async fn complete(&self, system: &str, prompt: &str) -> Result<LlmResponse, ProviderError> {
        let api_key = self
            .api_key
            .as_deref()
            .ok_or_else(|| ProviderError::MissingCredentials {
                env_var: API_KEY_ENV.to_string(),
            })?;
        let url = format!("{}/chat/completions", self.base_url);

        let body = json!({
            "model": self.model,
            "messages": [
                { "role": "system", "content": system },
                { "role": "user", "content": prompt }
            ],
            "max_tokens": self.max_tokens,
            "temperature": self.temperature,
        });

        let resp = self
            .client
            .post(&url)
            .bearer_auth(api_key)
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

        // Parse choices[0].message.content
        let text = json
            .pointer("/choices/0/message/content")
            .and_then(|v| v.as_str())
            .ok_or_else(|| ProviderError::InvalidResponse {
                message: "OpenAI API response missing content".to_string(),
            })?
            .to_string();

        Ok(LlmResponse {
            text,
            provider: "openai".to_string(),
            model: self.model.clone(),
            meta: json!({ "usage": json.get("usage").cloned().unwrap_or_default() }),
        })
    }

    fn provider_name(&self) -> &'static str {
        "openai"
    }

    fn model(&self) -> &str {
        &self.model
    }

    fn has_credentials(&self) -> bool {
        self.api_key.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn missing_key_fails_without_network() {
        let client = OpenAIClient::new(DEFAULT_MODEL.to_string(), None, 0.3, 8)
            .with_base_url("http://127.0.0.1:9");
        let err = client.complete("sys", "hello").await.unwrap_err();
        assert!(matches!(err, ProviderError::MissingCredentials { .. }));
        assert!(!client.has_credentials());
    }
}
