//! farmdb CLI - schema migrations for the farm database

use anyhow::Result;
use clap::Parser;

mod cli;
mod commands;
mod context;

#[path = "../../../migrations/mod.rs"]
mod migrations;

use cli::Cli;
use commands::common::ExitCode;
use commands::{create, migration};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.global.verbose);

    let result = match &cli.command {
        cli::Commands::Migration(args) => migration::execute(args, &cli.global).await,
        cli::Commands::Create(args) => create::execute(args, &cli.global).await,
    };

    if let Err(err) = result {
        if let Some(ExitCode(code)) = err.downcast_ref::<ExitCode>() {
            std::process::exit(*code);
        }
        return Err(err);
    }
    Ok(())
}

/// Install the `log` backend. `RUST_LOG` wins over `--verbose`.
fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .format_timestamp(None)
        .init();
}
