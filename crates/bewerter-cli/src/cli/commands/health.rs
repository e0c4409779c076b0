use super::print_json;
use crate::exit_codes::SUCCESS;
use serde_json::{json, Map, Value};
use std::path::Path;

pub fn run(config: Option<&Path>) -> anyhow::Result<i32> {
    let cfg = super::startup::load_grader_config(config)?;
    let registry = cfg.build_registry(|var| std::env::var(var).ok());

    let services: Map<String, Value> = registry
        .iter()
        .map(|(name, client)| (name.to_string(), Value::Bool(client.has_credentials())))
        .collect();

    print_json(
        &json!({
            "status": "OK",
            "timestamp": chrono::Utc::now().to_rfc3339_opts(chrono::SecondsFormat::Millis, true),
            "defaultBackend": registry.default_name(),
            "services": services,
        }),
        false,
    )?;
    Ok(SUCCESS)
}
