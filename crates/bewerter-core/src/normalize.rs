//! Turns a free-form model reply into a well-shaped [`Evaluation`].
//!
//! Model output is untrusted: it may wrap the JSON in prose or code fences,
//! emit scores outside the rubric, or contain no JSON at all. `normalize_reply`
//! absorbs every such case into [`Evaluation::fallback`].

use crate::model::Evaluation;
use tracing::warn;

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum NormalizeError {
    #[error("no JSON object found in model reply")]
    NoJson,
    #[error("model reply is not a valid evaluation: {0}")]
    Malformed(String),
    #[error("scores out of range: K={k} T={t} L={l} F={f}")]
    OutOfRange { k: u8, t: u8, l: u8, f: u8 },
}

/// Greedy brace slice: from the first `{` to the last `}` inclusive.
pub fn extract_json_object(text: &str) -> Option<&str> {
    let start = text.find('{')?;
    let end = text.rfind('}')?;
    if end < start {
        return None;
    }
    Some(&text[start..=end])
}

/// Strict variant of [`normalize_reply`]; reports why a reply was rejected.
pub fn parse_evaluation(text: &str) -> Result<Evaluation, NormalizeError> {
    let greedy = extract_json_object(text).ok_or(NormalizeError::NoJson)?;

    let mut eval = match serde_json::from_str::<Evaluation>(greedy) {
        Ok(eval) => eval,
        Err(greedy_err) => {
            // Trailing prose may itself contain a `}`; read exactly one value instead.
            serde_json::Deserializer::from_str(greedy)
                .into_iter::<Evaluation>()
                .next()
                .ok_or(NormalizeError::NoJson)?
                .map_err(|_| NormalizeError::Malformed(greedy_err.to_string()))?
        }
    };

    let s = eval.bewertung;
    if !s.within_bounds() {
        return Err(NormalizeError::OutOfRange {
            k: s.k,
            t: s.t,
            l: s.l,
            f: s.f,
        });
    }
    if !s.is_consistent() {
        warn!(
            reported = s.gesamt,
            computed = s.sum(),
            "model total disagrees with sub-scores; using computed total"
        );
        // within_bounds() caps the sum at MAX_TOTAL, so this cannot truncate.
        eval.bewertung.gesamt = s.sum() as u8;
    }
    Ok(eval)
}

/// Never fails: unusable replies yield [`Evaluation::fallback`].
pub fn normalize_reply(text: &str) -> Evaluation {
    match parse_evaluation(text) {
        Ok(eval) => eval,
        Err(e) => {
            warn!(error = %e, reply_len = text.len(), "falling back to default evaluation");
            Evaluation::fallback()
        }
    }
}
