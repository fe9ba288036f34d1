//! Vaultprobe CLI - Command-line utility for diagnosing credential vault
//! archives.

mod cli;
mod commands;
mod error;
mod logging;
mod output;

use anyhow::Result;
use clap::Parser;

fn main() -> Result<()> {
    let cli = cli::Cli::parse();

    logging::init(cli.verbose);

    let formatter = output::create_formatter(cli.json, cli.verbose, cli.quiet);

    match &cli.command {
        cli::Commands::Diagnose(args) => commands::diagnose::execute(args, &*formatter),
        cli::Commands::Inspect(args) => commands::inspect::execute(args, &*formatter),
        cli::Commands::Completion { shell } => {
            commands::completion::execute(*shell);
            Ok(())
        }
    }
}
