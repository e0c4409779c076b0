use super::super::args::TasksArgs;
use super::print_json;
use crate::exit_codes::SUCCESS;
use std::path::Path;

pub fn run(args: TasksArgs, config: Option<&Path>) -> anyhow::Result<i32> {
    let cfg = super::startup::load_grader_config(config)?;
    let catalog = cfg.build_catalog()?;
    print_json(&catalog.listing(), args.pretty)?;
    Ok(SUCCESS)
}
