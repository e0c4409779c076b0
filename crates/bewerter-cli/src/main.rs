use clap::Parser;

mod cli;
pub mod exit_codes;

use bewerter_core::ErrorBody;
use cli::args::{Cli, LogFormat};
use cli::commands::dispatch;
use tracing_subscriber::EnvFilter;

fn init_logging(format: LogFormat) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);
    match format {
        LogFormat::Json => builder.json().init(),
        LogFormat::Text => builder.init(),
    }
}

#[tokio::main(flavor = "multi_thread")]
async fn main() {
    let cli = Cli::parse();
    init_logging(cli.log_format);

    let code = match dispatch(cli).await {
        Ok(code) => code,
        Err(e) => {
            tracing::error!(error = ?e, "unexpected failure");
            match serde_json::to_string(&ErrorBody::internal()) {
                Ok(body) => println!("{}", body),
                Err(_) => eprintln!("fatal: {e:?}"),
            }
            exit_codes::INTERNAL_ERROR
        }
    };
    std::process::exit(code);
}
