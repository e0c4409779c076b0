use super::LlmClient;
use crate::errors::ProviderError;
use crate::model::LlmResponse;
use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};

/// Deterministic offline backend with a call counter.
#[derive(Debug)]
pub struct FakeClient {
    model: String,
    fixed_response: Option<String>,
    fail: bool,
    calls: AtomicUsize,
}

impl FakeClient {
    pub fn new(model: impl Into<String>) -> Self {
        Self {
            model: model.into(),
            fixed_response: None,
            fail: false,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn with_response(mut self, response: impl Into<String>) -> Self {
        self.fixed_response = Some(response.into());
        self
    }

    /// Every call fails with a transport error.
    pub fn failing(mut self) -> Self {
        self.fail = true;
        self
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl LlmClient for FakeClient {
    async fn complete(&self, _system: &str, _prompt: &str) -> Result<LlmResponse, ProviderError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.fail {
            return Err(ProviderError::Transport {
                message: "fake backend configured to fail".to_string(),
            });
        }

        // Without a fixed reply, answer with a mid-range evaluation.
        let text = self.fixed_response.clone().unwrap_or_else(|| {
            serde_json::json!({
                "bewertung": { "K": 1, "T": 2, "L": 3, "F": 3, "gesamt": 9 },
                "feedback": {
                    "positiv": ["Alle Punkte wurden angesprochen"],
                    "verbesserungen": ["Mehr Konnektoren verwenden"]
                },
                "korrekturen": [],
                "tipps": ["Lesen Sie den Text vor der Abgabe noch einmal"]
            })
            .to_string()
        });

        Ok(LlmResponse {
            text,
            provider: "fake".to_string(),
            model: self.model.clone(),
            meta: serde_json::json!({}),
        })
    }

    fn provider_name(&self) -> &'static str {
        "fake"
    }

    fn model(&self) -> &str {
        &self.model
    }
}
