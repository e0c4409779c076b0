//! Error types surfaced by the core.
//!
//! Only two categories reach a caller: client input errors and backend
//! failures. Anything else is a fault of the host process, reported with
//! [`ErrorBody::internal`]. Malformed model replies never become errors; see
//! [`crate::normalize`].

use serde::{Deserialize, Serialize};

pub const INTERNAL_ERROR_MESSAGE: &str =
    "Interner Server Fehler. Bitte versuchen Sie es später erneut.";

/// Failure of a single backend adapter call.
#[derive(Debug, thiserror::Error)]
pub enum ProviderError {
    #[error("no API key configured (expected in ${env_var})")]
    MissingCredentials { env_var: String },
    #[error("transport error: {message}")]
    Transport { message: String },
    #[error("request timed out")]
    Timeout,
    #[error("rate limited (status {status})")]
    RateLimited { status: u16 },
    #[error("provider API error (status {status}): {body}")]
    Api { status: u16, body: String },
    #[error("invalid response: {message}")]
    InvalidResponse { message: String },
}

impl From<reqwest::Error> for ProviderError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::Timeout
        } else {
            Self::Transport {
                message: err.to_string(),
            }
        }
    }
}

#[derive(Debug, thiserror::Error)]
#[error("config error: {message}")]
pub struct ConfigError {
    pub message: String,
}

impl ConfigError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Caller-visible outcome of a failed evaluation.
#[derive(Debug, thiserror::Error)]
pub enum GradeError {
    /// Missing/unknown variant, empty text or unknown backend selector.
    #[error("{message}")]
    InvalidInput { message: String },

    /// The selected backend failed; `suggested` names a backend worth retrying with.
    #[error("{message}")]
    BackendUnavailable {
        backend: String,
        suggested: Option<String>,
        message: String,
        #[source]
        source: ProviderError,
    },
}

impl GradeError {
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::InvalidInput {
            message: message.into(),
        }
    }

    /// HTTP-equivalent status for transports that need one.
    pub fn status_code(&self) -> u16 {
        match self {
            Self::InvalidInput { .. } => 400,
            Self::BackendUnavailable { .. } => 503,
        }
    }

    /// Exit code for CLI.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::InvalidInput { .. } => 1,
            Self::BackendUnavailable { .. } => 3,
        }
    }

    pub fn is_client_error(&self) -> bool {
        matches!(self, Self::InvalidInput { .. })
    }

    /// Serializable body; internal details are not exposed.
    pub fn to_body(&self) -> ErrorBody {
        match self {
            Self::InvalidInput { message } => ErrorBody::new(message.clone()),
            Self::BackendUnavailable {
                backend,
                suggested,
                message,
                ..
            } => ErrorBody {
                error: message.clone(),
                backend: Some(backend.clone()),
                fallback: suggested.clone(),
            },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
    /// Selector of the backend that failed.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub backend: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fallback: Option<String>,
}

impl ErrorBody {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            backend: None,
            fallback: None,
        }
    }

    pub fn internal() -> Self {
        Self::new(INTERNAL_ERROR_MESSAGE)
    }
}
