//! storegraph CLI Binary

use anyhow::Context;
use clap::Parser;
use std::process;
use storegraph::logging::init_logging;
use storegraph::tooling::cli::{Cli, CliContext};

fn run(cli: &Cli) -> anyhow::Result<String> {
    let config = cli.resolve_config().context("loading configuration")?;
    init_logging(Some(&config.logging), cli.log_file.as_deref())
        .context("initializing logging")?;

    let context = CliContext::new(config);
    let output = context
        .execute(&cli.command)
        .with_context(|| format!("running {:?}", cli.command))?;
    Ok(output)
}

fn main() {
    let cli = Cli::parse();

    match run(&cli) {
        Ok(output) => {
            println!("{}", output);
        }
        Err(e) => {
            eprintln!("Error: {:#}", e);
            process::exit(1);
        }
    }
}
