//! Process startup: config, catalog and backend construction.

use anyhow::Context;
use bewerter_core::config::{load_config, GraderConfig};
use bewerter_core::Grader;
use std::path::Path;
use std::sync::Arc;

pub(crate) fn load_grader_config(path: Option<&Path>) -> anyhow::Result<GraderConfig> {
    let mut cfg = match path {
        Some(p) => load_config(p).with_context(|| format!("loading {}", p.display()))?,
        None => GraderConfig::default(),
    };
    cfg.apply_env_overrides(|var| std::env::var(var).ok())?;
    Ok(cfg)
}

/// Build the grader with credentials bound from the process environment.
pub(crate) fn build_grader(cfg: &GraderConfig) -> anyhow::Result<Grader> {
    let catalog = cfg.build_catalog().context("building task catalog")?;
    let backends = cfg.build_registry(|var| std::env::var(var).ok());
    tracing::debug!(?backends, variants = ?catalog.ids(), "grader ready");
    Ok(Grader::new(Arc::new(catalog), backends, cfg.settings()))
}
