use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "bewerter",
    version,
    about = "ÖSD B2 Stellungnahme grading via interchangeable LLM backends"
)]
pub struct Cli {
    /// YAML config file (defaults: openai + anthropic backends, 60 word minimum)
    #[arg(long, global = true, env = "BEWERTER_CONFIG")]
    pub config: Option<PathBuf>,

    /// Log output format (logs go to stderr)
    #[arg(long, global = true, value_enum, default_value_t = LogFormat::Text)]
    pub log_format: LogFormat,

    #[command(subcommand)]
    pub cmd: Command,
}

#[derive(ValueEnum, Clone, Copy, Debug, Default, PartialEq)]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

#[derive(Subcommand)]
pub enum Command {
    /// Print the task catalog as JSON
    Tasks(TasksArgs),
    /// Grade one submission and print the evaluation as JSON
    Evaluate(EvaluateArgs),
    /// Report which backends have credentials bound
    Health,
    Version,
}

#[derive(clap::Args, Clone, Debug)]
pub struct TasksArgs {
    #[arg(long)]
    pub pretty: bool,
}

#[derive(clap::Args, Clone, Debug)]
pub struct EvaluateArgs {
    /// Task variant identifier, e.g. A or B
    #[arg(long)]
    pub variante: String,

    /// Submission text (reads stdin when neither --text nor --file is given)
    #[arg(long, conflicts_with = "file")]
    pub text: Option<String>,

    /// Read the submission from a file
    #[arg(long)]
    pub file: Option<PathBuf>,

    /// Backend selector (default: configured default backend)
    #[arg(long = "ai-service")]
    pub ai_service: Option<String>,

    #[arg(long)]
    pub pretty: bool,
}
