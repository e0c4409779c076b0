pub mod llm;

use crate::config::{BackendEntry, BackendKind};
use llm::anthropic::AnthropicClient;
use llm::fake::FakeClient;
use llm::openai::OpenAIClient;
use llm::LlmClient;
use std::sync::Arc;
use std::time::Duration;

/// Construct the adapter described by one config entry.
///
/// `api_key` is resolved by the caller; adapters without a key still build
/// and fail on first use.
pub fn create_client(entry: &BackendEntry, api_key: Option<String>) -> Arc<dyn LlmClient> {
    let timeout = Duration::from_secs(entry.timeout_secs());
    match entry.kind {
        BackendKind::OpenAI => {
            let mut client = OpenAIClient::new(
                entry
                    .model
                    .clone()
                    .unwrap_or_else(|| llm::openai::DEFAULT_MODEL.to_string()),
                api_key,
                entry.temperature.unwrap_or(0.3),
                entry.max_tokens(),
            )
            .with_timeout(timeout);
            if let Some(url) = &entry.base_url {
                client = client.with_base_url(url.as_str());
            }
            Arc::new(client)
        }
        BackendKind::Anthropic => {
            let mut client = AnthropicClient::new(
                entry
                    .model
                    .clone()
                    .unwrap_or_else(|| llm::anthropic::DEFAULT_MODEL.to_string()),
                api_key,
                entry.max_tokens(),
            )
            .with_timeout(timeout);
            if let Some(url) = &entry.base_url {
                client = client.with_base_url(url.as_str());
            }
            Arc::new(client)
        }
        BackendKind::Fake => {
            let mut client = FakeClient::new(entry.model.clone().unwrap_or_else(|| "fake".into()));
            if let Some(response) = &entry.response {
                client = client.with_response(response.as_str());
            }
            if entry.fail {
                client = client.failing();
            }
            Arc::new(client)
        }
    }
}

#[derive(Clone)]
struct Backend {
    name: String,
    label: String,
    client: Arc<dyn LlmClient>,
}

/// Backends keyed by selector, in registration order.
#[derive(Clone)]
pub struct BackendRegistry {
    default: String,
    backends: Vec<Backend>,
}

impl BackendRegistry {
    pub fn new(default: impl Into<String>) -> Self {
        Self {
            default: default.into(),
            backends: Vec::new(),
        }
    }

    /// Register `client` under `name`, labelled by its selector.
    pub fn register(&mut self, name: impl Into<String>, client: Arc<dyn LlmClient>) {
        let name = name.into();
        self.register_labeled(name.clone(), name, client);
    }

    /// Register `client` under `name` with the label used in caller-facing
    /// messages, replacing an existing entry in place.
    pub fn register_labeled(
        &mut self,
        name: impl Into<String>,
        label: impl Into<String>,
        client: Arc<dyn LlmClient>,
    ) {
        let backend = Backend {
            name: name.into(),
            label: label.into(),
            client,
        };
        match self.backends.iter_mut().find(|b| b.name == backend.name) {
            Some(slot) => *slot = backend,
            None => self.backends.push(backend),
        }
    }

    pub fn with(mut self, name: impl Into<String>, client: Arc<dyn LlmClient>) -> Self {
        self.register(name, client);
        self
    }

    pub fn with_labeled(
        mut self,
        name: impl Into<String>,
        label: impl Into<String>,
        client: Arc<dyn LlmClient>,
    ) -> Self {
        self.register_labeled(name, label, client);
        self
    }

    pub fn default_name(&self) -> &str {
        &self.default
    }

    pub fn get(&self, name: &str) -> Option<Arc<dyn LlmClient>> {
        self.find(name).map(|b| b.client.clone())
    }

    pub fn label_for(&self, name: &str) -> Option<&str> {
        self.find(name).map(|b| b.label.as_str())
    }

    /// The backend a caller should retry with after `name` failed.
    pub fn alternative_for(&self, name: &str) -> Option<&str> {
        self.backends
            .iter()
            .map(|b| b.name.as_str())
            .find(|n| *n != name)
    }

    pub fn names(&self) -> Vec<&str> {
        self.backends.iter().map(|b| b.name.as_str()).collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Arc<dyn LlmClient>)> {
        self.backends.iter().map(|b| (b.name.as_str(), &b.client))
    }

    fn find(&self, name: &str) -> Option<&Backend> {
        self.backends.iter().find(|b| b.name == name)
    }
}

impl std::fmt::Debug for BackendRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BackendRegistry")
            .field("default", &self.default)
            .field("backends", &self.names())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fake(model: &str) -> Arc<dyn LlmClient> {
        Arc::new(FakeClient::new(model))
    }

    #[test]
    fn alternative_is_first_other_backend() {
        let reg = BackendRegistry::new("openai")
            .with("openai", fake("a"))
            .with("anthropic", fake("b"))
            .with("fake", fake("c"));
        assert_eq!(reg.alternative_for("openai"), Some("anthropic"));
        assert_eq!(reg.alternative_for("anthropic"), Some("openai"));
        assert_eq!(reg.names(), vec!["openai", "anthropic", "fake"]);
    }

    #[test]
    fn single_backend_has_no_alternative() {
        let reg = BackendRegistry::new("fake").with("fake", fake("x"));
        assert_eq!(reg.alternative_for("fake"), None);
    }

    #[test]
    fn register_replaces_in_place() {
        let mut reg = BackendRegistry::new("a").with("a", fake("1")).with("b", fake("2"));
        reg.register("a", fake("3"));
        assert_eq!(reg.names(), vec!["a", "b"]);
        assert_eq!(reg.get("a").unwrap().model(), "3");
        assert!(reg.get("zzz").is_none());
    }

    #[test]
    fn labels_default_to_selector() {
        let reg = BackendRegistry::new("gpt4")
            .with("gpt4", fake("a"))
            .with_labeled("claude", "Claude", fake("b"));
        assert_eq!(reg.label_for("gpt4"), Some("gpt4"));
        assert_eq!(reg.label_for("claude"), Some("Claude"));
        assert_eq!(reg.label_for("zzz"), None);
    }

    #[test]
    fn create_client_applies_defaults() {
        let entry = BackendEntry::new("anthropic", BackendKind::Anthropic);
        let client = create_client(&entry, None);
        assert_eq!(client.provider_name(), "anthropic");
        assert_eq!(client.model(), llm::anthropic::DEFAULT_MODEL);
        assert!(!client.has_credentials());

        let mut entry = BackendEntry::new("openai", BackendKind::OpenAI);
        entry.model = Some("gpt-4o".into());
        let client = create_client(&entry, Some("sk-test".into()));
        assert_eq!(client.model(), "gpt-4o");
        assert!(client.has_credentials());
    }
}
