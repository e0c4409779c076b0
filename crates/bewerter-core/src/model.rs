use serde::{Deserialize, Serialize};

pub const MAX_K: u8 = 2;
pub const MAX_T: u8 = 3;
pub const MAX_L: u8 = 5;
pub const MAX_F: u8 = 5;
pub const MAX_TOTAL: u8 = MAX_K + MAX_T + MAX_L + MAX_F;

/// Inbound grading request as it arrives from a caller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EvaluationRequest {
    pub variante: String,
    pub text: String,
    /// Backend selector; `None` means the configured default.
    #[serde(rename = "aiService", default, skip_serializing_if = "Option::is_none")]
    pub ai_service: Option<String>,
}

impl EvaluationRequest {
    pub fn new(variante: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            variante: variante.into(),
            text: text.into(),
            ai_service: None,
        }
    }

    pub fn with_ai_service(mut self, ai_service: impl Into<String>) -> Self {
        self.ai_service = Some(ai_service.into());
        self
    }
}

/// The four rubric dimensions plus their aggregate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Scores {
    /// Kommunikative Angemessenheit, 0-2.
    #[serde(rename = "K")]
    pub k: u8,
    /// Textaufbau/Textkohärenz, 0-3.
    #[serde(rename = "T")]
    pub t: u8,
    /// Lexik/Ausdruck, 0-5.
    #[serde(rename = "L")]
    pub l: u8,
    /// Formale Richtigkeit, 0-5.
    #[serde(rename = "F")]
    pub f: u8,
    /// Untrusted on input: anything that is not a small non-negative integer
    /// reads as 0 and is then recomputed by the normalizer.
    #[serde(default, deserialize_with = "lenient_total")]
    pub gesamt: u8,
}

fn lenient_total<'de, D>(deserializer: D) -> Result<u8, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(value
        .as_u64()
        .and_then(|n| u8::try_from(n).ok())
        .unwrap_or(0))
}

impl Scores {
    pub fn new(k: u8, t: u8, l: u8, f: u8) -> Self {
        Self {
            k,
            t,
            l,
            f,
            gesamt: k + t + l + f,
        }
    }

    pub fn zero() -> Self {
        Self::new(0, 0, 0, 0)
    }

    pub fn sum(&self) -> u16 {
        u16::from(self.k) + u16::from(self.t) + u16::from(self.l) + u16::from(self.f)
    }

    pub fn within_bounds(&self) -> bool {
        self.k <= MAX_K && self.t <= MAX_T && self.l <= MAX_L && self.f <= MAX_F
    }

    pub fn is_consistent(&self) -> bool {
        u16::from(self.gesamt) == self.sum()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Feedback {
    #[serde(default)]
    pub positiv: Vec<String>,
    #[serde(default)]
    pub verbesserungen: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Correction {
    pub original: String,
    pub korrigiert: String,
    #[serde(default)]
    pub erklaerung: String,
}

/// Structured evaluation of one submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Evaluation {
    pub bewertung: Scores,
    #[serde(default)]
    pub feedback: Feedback,
    #[serde(default)]
    pub korrekturen: Vec<Correction>,
    #[serde(default)]
    pub tipps: Vec<String>,
}

impl Evaluation {
    /// Returned whenever a model reply cannot be normalized.
    pub fn fallback() -> Self {
        Self {
            bewertung: Scores::new(1, 2, 2, 2),
            feedback: Feedback {
                positiv: vec!["Text wurde eingereicht".to_string()],
                verbesserungen: vec![
                    "Bewertung konnte nicht vollständig verarbeitet werden".to_string()
                ],
            },
            korrekturen: Vec::new(),
            tipps: vec!["Versuchen Sie es erneut".to_string()],
        }
    }

    /// Zero-scored result for submissions below the minimum length.
    pub fn too_short(word_count: usize, min_words: usize, target_words: usize) -> Self {
        Self {
            bewertung: Scores::zero(),
            feedback: Feedback {
                positiv: Vec::new(),
                verbesserungen: vec![format!(
                    "Text ist zu kurz ({} Wörter). Mindestens {} Wörter erforderlich.",
                    word_count, min_words
                )],
            },
            korrekturen: Vec::new(),
            tipps: vec![
                format!("Schreiben Sie etwa {} Wörter", target_words),
                "Gehen Sie auf alle vier Punkte ein".to_string(),
            ],
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EvaluationMeta {
    pub wortanzahl: usize,
    pub variante: String,
    #[serde(rename = "aiService")]
    pub ai_service: String,
    pub timestamp: String,
}

/// Evaluation plus request metadata, as handed back to the caller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GradedEvaluation {
    #[serde(flatten)]
    pub evaluation: Evaluation,
    pub meta: EvaluationMeta,
}

/// Raw reply of a model backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LlmResponse {
    pub text: String,
    pub provider: String,
    pub model: String,
    #[serde(default)]
    pub meta: serde_json::Value,
}
