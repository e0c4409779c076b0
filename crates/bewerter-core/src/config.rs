//! Grader configuration.
//!
//! | Environment Variable | Description |
//! |---------------------|-------------|
//! | `BEWERTER_CONFIG` | Path to the YAML config file (read by the CLI) |
//! | `BEWERTER_DEFAULT_BACKEND` | Overrides `default_backend` |
//! | `OPENAI_API_KEY` | Credentials for `type: openai` backends (default `api_key_env`) |
//! | `ANTHROPIC_API_KEY` | Credentials for `type: anthropic` backends (default `api_key_env`) |

use crate::errors::ConfigError;
use crate::grader::GradingSettings;
use crate::prompt::DEFAULT_TARGET_WORDS;
use crate::providers::llm::tracing::TracingLlmClient;
use crate::providers::llm::{anthropic, openai};
use crate::providers::{create_client, BackendRegistry};
use crate::tasks::TaskCatalog;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::sync::Arc;

pub const SUPPORTED_CONFIG_VERSION: u32 = 1;
pub const DEFAULT_MIN_WORDS: usize = 60;
const DEFAULT_MAX_TOKENS: u32 = 2000;
const DEFAULT_TIMEOUT_SECS: u64 = 60;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BackendKind {
    #[serde(rename = "openai")]
    OpenAI,
    Anthropic,
    Fake,
}

/// One selectable backend. Unset fields fall back to the adapter defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BackendEntry {
    pub name: String,
    #[serde(rename = "type")]
    pub kind: BackendKind,
    /// Name used in caller-facing messages; defaults to the selector.
    #[serde(default)]
    pub label: Option<String>,
    #[serde(default)]
    pub model: Option<String>,
    #[serde(default)]
    pub temperature: Option<f32>,
    #[serde(default)]
    pub max_tokens: Option<u32>,
    #[serde(default)]
    pub base_url: Option<String>,
    #[serde(default)]
    pub api_key_env: Option<String>,
    #[serde(default)]
    pub timeout_secs: Option<u64>,
    /// Fixed reply (`type: fake` only).
    #[serde(default)]
    pub response: Option<String>,
    /// Always fail (`type: fake` only).
    #[serde(default)]
    pub fail: bool,
}

impl BackendEntry {
    pub fn new(name: impl Into<String>, kind: BackendKind) -> Self {
        Self {
            name: name.into(),
            kind,
            label: None,
            model: None,
            temperature: None,
            max_tokens: None,
            base_url: None,
            api_key_env: None,
            timeout_secs: None,
            response: None,
            fail: false,
        }
    }

    /// Environment variable holding this backend's API key, if it needs one.
    pub fn api_key_env(&self) -> Option<&str> {
        match (&self.api_key_env, self.kind) {
            (Some(var), _) => Some(var.as_str()),
            (None, BackendKind::OpenAI) => Some(openai::API_KEY_ENV),
            (None, BackendKind::Anthropic) => Some(anthropic::API_KEY_ENV),
            (None, BackendKind::Fake) => None,
        }
    }

    /// The two stock selectors keep their service names ("OpenAI", "Claude");
    /// any other entry is named by its selector.
    pub fn label(&self) -> &str {
        match (&self.label, self.kind, self.name.as_str()) {
            (Some(label), _, _) => label.as_str(),
            (None, BackendKind::OpenAI, "openai") => "OpenAI",
            (None, BackendKind::Anthropic, "anthropic") => "Claude",
            (None, _, name) => name,
        }
    }

    pub fn max_tokens(&self) -> u32 {
        self.max_tokens.unwrap_or(DEFAULT_MAX_TOKENS)
    }

    pub fn timeout_secs(&self) -> u64 {
        self.timeout_secs.unwrap_or(DEFAULT_TIMEOUT_SECS)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GraderConfig {
    #[serde(default = "default_version")]
    pub version: u32,
    #[serde(default = "default_backend")]
    pub default_backend: String,
    #[serde(default = "default_min_words")]
    pub min_words: usize,
    #[serde(default = "default_target_words")]
    pub target_words: usize,
    /// Extra task variants, merged over the built-in catalog.
    #[serde(default)]
    pub tasks_file: Option<PathBuf>,
    #[serde(default = "default_backends")]
    pub backends: Vec<BackendEntry>,
}

fn default_version() -> u32 {
    SUPPORTED_CONFIG_VERSION
}

fn default_backend() -> String {
    "openai".to_string()
}

fn default_min_words() -> usize {
    DEFAULT_MIN_WORDS
}

fn default_target_words() -> usize {
    DEFAULT_TARGET_WORDS
}

fn default_backends() -> Vec<BackendEntry> {
    let mut openai = BackendEntry::new("openai", BackendKind::OpenAI);
    openai.temperature = Some(0.3);
    vec![
        openai,
        BackendEntry::new("anthropic", BackendKind::Anthropic),
    ]
}

impl Default for GraderConfig {
    fn default() -> Self {
        Self {
            version: default_version(),
            default_backend: default_backend(),
            min_words: default_min_words(),
            target_words: default_target_words(),
            tasks_file: None,
            backends: default_backends(),
        }
    }
}

/// Read, parse and validate a config file. A relative `tasks_file` is
/// resolved against the config file's directory.
pub fn load_config(path: &Path) -> Result<GraderConfig, ConfigError> {
    let raw = std::fs::read_to_string(path).map_err(|e| {
        ConfigError::new(format!("failed to read config {}: {}", path.display(), e))
    })?;
    let mut cfg = GraderConfig::from_yaml(&raw)?;
    let resolved = match (&cfg.tasks_file, path.parent()) {
        (Some(tasks), Some(dir)) if tasks.is_relative() => Some(dir.join(tasks)),
        _ => None,
    };
    if resolved.is_some() {
        cfg.tasks_file = resolved;
    }
    Ok(cfg)
}

impl GraderConfig {
    pub fn from_yaml(raw: &str) -> Result<Self, ConfigError> {
        let cfg: GraderConfig = serde_yaml::from_str(raw)
            .map_err(|e| ConfigError::new(format!("failed to parse YAML: {}", e)))?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.version != SUPPORTED_CONFIG_VERSION {
            return Err(ConfigError::new(format!(
                "unsupported config version {} (supported: {})",
                self.version, SUPPORTED_CONFIG_VERSION
            )));
        }
        if self.backends.is_empty() {
            return Err(ConfigError::new("config has no backends"));
        }
        if !self.backends.iter().any(|b| b.name == self.default_backend) {
            return Err(ConfigError::new(format!(
                "default backend '{}' is not configured",
                self.default_backend
            )));
        }
        if self.min_words == 0 {
            return Err(ConfigError::new("min_words must be at least 1"));
        }
        Ok(())
    }

    /// Apply `BEWERTER_*` overrides from `lookup` (usually `std::env::var`).
    pub fn apply_env_overrides<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(backend) = lookup("BEWERTER_DEFAULT_BACKEND") {
            self.default_backend = backend;
        }
        self.validate()
    }

    pub fn settings(&self) -> GradingSettings {
        GradingSettings {
            min_words: self.min_words,
            target_words: self.target_words,
        }
    }

    pub fn build_catalog(&self) -> Result<TaskCatalog, ConfigError> {
        let mut catalog = TaskCatalog::builtin();
        if let Some(path) = &self.tasks_file {
            let added = catalog.extend_from_file(path)?;
            tracing::info!(path = %path.display(), added, "loaded extra task variants");
        }
        Ok(catalog)
    }

    /// Build every configured backend, binding credentials through `lookup`.
    pub fn build_registry<F>(&self, lookup: F) -> BackendRegistry
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut registry = BackendRegistry::new(self.default_backend.clone());
        for entry in &self.backends {
            let key = entry
                .api_key_env()
                .and_then(&lookup)
                .filter(|k| !k.trim().is_empty());
            if key.is_none() && entry.api_key_env().is_some() {
                tracing::warn!(backend = %entry.name, "no API key found; backend will be unavailable");
            }
            let client = create_client(entry, key);
            registry.register_labeled(
                entry.name.clone(),
                entry.label(),
                Arc::new(TracingLlmClient::new(client)),
            );
        }
        registry
    }
}
