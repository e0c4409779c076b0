//! Per-request evaluation flow.
//!
//! validate -> short-circuit on length -> resolve backend -> dispatch -> normalize.
//! Nothing is shared between requests except the read-only catalog and the
//! backend handles; backend failures are reported, never retried.

use crate::config::DEFAULT_MIN_WORDS;
use crate::errors::GradeError;
use crate::model::{Evaluation, EvaluationMeta, EvaluationRequest, GradedEvaluation};
use crate::normalize::normalize_reply;
use crate::prompt::{build_user_prompt, count_words, DEFAULT_TARGET_WORDS};
use crate::providers::BackendRegistry;
use crate::rubric::SYSTEM_MESSAGE;
use crate::tasks::TaskCatalog;
use chrono::SecondsFormat;
use std::sync::Arc;
use tracing::{debug, info, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GradingSettings {
    /// Submissions below this many words are scored zero without a model call.
    pub min_words: usize,
    pub target_words: usize,
}

impl Default for GradingSettings {
    fn default() -> Self {
        Self {
            min_words: DEFAULT_MIN_WORDS,
            target_words: DEFAULT_TARGET_WORDS,
        }
    }
}

#[derive(Clone, Debug)]
pub struct Grader {
    catalog: Arc<TaskCatalog>,
    backends: BackendRegistry,
    settings: GradingSettings,
}

impl Grader {
    pub fn new(
        catalog: Arc<TaskCatalog>,
        backends: BackendRegistry,
        settings: GradingSettings,
    ) -> Self {
        Self {
            catalog,
            backends,
            settings,
        }
    }

    pub fn catalog(&self) -> &TaskCatalog {
        &self.catalog
    }

    pub fn backends(&self) -> &BackendRegistry {
        &self.backends
    }

    pub fn settings(&self) -> GradingSettings {
        self.settings
    }

    pub async fn evaluate(&self, req: &EvaluationRequest) -> Result<GradedEvaluation, GradeError> {
        let variante = req.variante.as_str();
        let task = match self.catalog.get(variante) {
            Some(task) if !req.text.trim().is_empty() => task,
            _ => {
                debug!(variante = %req.variante, "rejecting request");
                return Err(GradeError::invalid_input(format!(
                    "Ungültige Eingabe. Variante {} und Text erforderlich.",
                    self.variant_list()
                )));
            }
        };

        let selector = req
            .ai_service
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .unwrap_or_else(|| self.backends.default_name())
            .to_string();

        let wortanzahl = count_words(&req.text);
        if wortanzahl < self.settings.min_words {
            info!(
                variante,
                wortanzahl,
                min_words = self.settings.min_words,
                "submission too short; skipping model call"
            );
            let evaluation = Evaluation::too_short(
                wortanzahl,
                self.settings.min_words,
                self.settings.target_words,
            );
            return Ok(self.attach_meta(evaluation, wortanzahl, variante, selector));
        }

        let client = self.backends.get(&selector).ok_or_else(|| {
            GradeError::invalid_input(format!(
                "Unbekannter KI-Dienst '{}'. Verfügbar: {}.",
                selector,
                self.backends.names().join(", ")
            ))
        })?;

        let prompt = build_user_prompt(task, &req.text, wortanzahl, self.settings.target_words);
        debug!(variante, prompt_chars = prompt.len(), "prompt assembled");
        info!(
            variante,
            wortanzahl,
            backend = %selector,
            model = client.model(),
            "dispatching evaluation"
        );

        let reply = match client.complete(SYSTEM_MESSAGE, &prompt).await {
            Ok(reply) => reply,
            Err(source) => {
                warn!(backend = %selector, error = %source, "backend call failed");
                let label = self.backends.label_for(&selector).unwrap_or(&selector);
                let suggested = self.backends.alternative_for(&selector).map(str::to_string);
                let message = match suggested.as_deref() {
                    Some(alt) => format!(
                        "{} Service nicht verfügbar. Versuchen Sie es mit {}.",
                        label,
                        self.backends.label_for(alt).unwrap_or(alt)
                    ),
                    None => format!("{} Service nicht verfügbar.", label),
                };
                return Err(GradeError::BackendUnavailable {
                    backend: selector,
                    suggested,
                    message,
                    source,
                });
            }
        };

        let evaluation = normalize_reply(&reply.text);
        info!(
            variante,
            backend = %selector,
            gesamt = evaluation.bewertung.gesamt,
            "evaluation complete"
        );
        Ok(self.attach_meta(evaluation, wortanzahl, variante, selector))
    }

    fn attach_meta(
        &self,
        evaluation: Evaluation,
        wortanzahl: usize,
        variante: &str,
        ai_service: String,
    ) -> GradedEvaluation {
        GradedEvaluation {
            evaluation,
            meta: EvaluationMeta {
                wortanzahl,
                variante: variante.to_string(),
                ai_service,
                timestamp: chrono::Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
            },
        }
    }

    fn variant_list(&self) -> String {
        let ids = self.catalog.ids();
        match ids.split_last() {
            Some((last, rest)) if !rest.is_empty() => format!("{} oder {}", rest.join(", "), last),
            Some((only, _)) => only.to_string(),
            None => String::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::providers::llm::fake::FakeClient;

    fn grader_with(client: Arc<FakeClient>) -> Grader {
        Grader::new(
            Arc::new(TaskCatalog::builtin()),
            BackendRegistry::new("openai").with("openai", client),
            GradingSettings::default(),
        )
    }

    #[test]
    fn error_message_lists_variants() {
        let grader = grader_with(Arc::new(FakeClient::new("m")));
        assert_eq!(grader.variant_list(), "A oder B");
    }

    #[tokio::test]
    async fn blank_text_is_client_error() {
        let fake = Arc::new(FakeClient::new("m"));
        let grader = grader_with(fake.clone());
        let err = grader
            .evaluate(&EvaluationRequest::new("A", "  \n\t "))
            .await
            .unwrap_err();
        assert!(err.is_client_error());
        assert_eq!(
            err.to_string(),
            "Ungültige Eingabe. Variante A oder B und Text erforderlich."
        );
        assert_eq!(fake.calls(), 0);
    }

    #[tokio::test]
    async fn timestamp_is_rfc3339_utc() {
        let grader = grader_with(Arc::new(FakeClient::new("m")));
        let out = grader
            .evaluate(&EvaluationRequest::new("A", "kurz"))
            .await
            .unwrap();
        assert!(chrono::DateTime::parse_from_rfc3339(&out.meta.timestamp).is_ok());
        assert!(out.meta.timestamp.ends_with('Z'));
    }
}
