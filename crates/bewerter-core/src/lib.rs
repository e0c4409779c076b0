//! Grading core for ÖSD B2 written statements (Stellungnahmen).
//!
//! A submission is checked against the task catalog, turned into a grading
//! prompt, sent to one of several interchangeable LLM backends, and the free-form
//! reply is normalized into a strictly-shaped [`model::Evaluation`].
//!
//! # Quick Start
//!
//! ```no_run
//! use bewerter_core::{config::GraderConfig, grader::Grader, model::EvaluationRequest};
//! use std::sync::Arc;
//!
//! # async fn example() -> anyhow::Result<()> {
//! let cfg = GraderConfig::default();
//! let grader = Grader::new(
//!     Arc::new(cfg.build_catalog()?),
//!     cfg.build_registry(|var| std::env::var(var).ok()),
//!     cfg.settings(),
//! );
//! let result = grader
//!     .evaluate(&EvaluationRequest::new("A", "Meiner Meinung nach ..."))
//!     .await?;
//! println!("{}", result.evaluation.bewertung.gesamt);
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod errors;
pub mod grader;
pub mod model;
pub mod normalize;
pub mod prompt;
pub mod providers;
pub mod rubric;
pub mod tasks;

pub use errors::{ConfigError, ErrorBody, GradeError, ProviderError};
pub use grader::{Grader, GradingSettings};
pub use model::{Evaluation, EvaluationRequest, GradedEvaluation};
pub use providers::llm::LlmClient;
pub use providers::BackendRegistry;
pub use tasks::{TaskCatalog, TaskVariant};
