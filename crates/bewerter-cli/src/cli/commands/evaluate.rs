use super::super::args::EvaluateArgs;
use super::print_json;
use crate::exit_codes::SUCCESS;
use anyhow::Context;
use bewerter_core::EvaluationRequest;
use std::io::Read;
use std::path::Path;

pub async fn run(args: EvaluateArgs, config: Option<&Path>) -> anyhow::Result<i32> {
    let cfg = super::startup::load_grader_config(config)?;
    let grader = super::startup::build_grader(&cfg)?;

    let text = match (&args.text, &args.file) {
        (Some(text), _) => text.clone(),
        (None, Some(path)) => std::fs::read_to_string(path)
            .with_context(|| format!("reading submission {}", path.display()))?,
        (None, None) => {
            let mut buf = String::new();
            std::io::stdin()
                .read_to_string(&mut buf)
                .context("reading submission from stdin")?;
            buf
        }
    };

    let request = EvaluationRequest {
        variante: args.variante,
        text,
        ai_service: args.ai_service,
    };

    match grader.evaluate(&request).await {
        Ok(graded) => {
            print_json(&graded, args.pretty)?;
            Ok(SUCCESS)
        }
        Err(err) => {
            tracing::info!(
                status = err.status_code(),
                exit_code = err.exit_code(),
                "evaluation rejected"
            );
            print_json(&err.to_body(), args.pretty)?;
            Ok(err.exit_code())
        }
    }
}
