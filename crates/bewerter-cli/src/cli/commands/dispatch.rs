use super::super::args::*;
use crate::exit_codes::SUCCESS;

pub async fn dispatch(cli: Cli) -> anyhow::Result<i32> {
    let config = cli.config.as_deref();
    match cli.cmd {
        Command::Tasks(args) => super::tasks::run(args, config),
        Command::Evaluate(args) => super::evaluate::run(args, config).await,
        Command::Health => super::health::run(config),
        Command::Version => {
            println!("{}", env!("CARGO_PKG_VERSION"));
            Ok(SUCCESS)
        }
    }
}
