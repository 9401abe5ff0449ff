//! Extdoctor CLI - Command-line utility for diagnosing Blender extension and
//! add-on ZIP install issues.

mod cli;
mod commands;
mod error;
mod logging;
mod output;
mod progress;

use anyhow::Result;
use clap::Parser;

fn main() -> Result<()> {
    let cli = cli::Cli::parse();

    logging::init(cli.verbose);

    let formatter = output::create_formatter(cli.json, cli.verbose, cli.quiet);

    match &cli.command {
        cli::Commands::Diagnose(args) => {
            commands::diagnose::execute(args, &*formatter, cli.json || cli.quiet)
        }
        cli::Commands::Manifest(args) => commands::manifest::execute(args, &*formatter),
        cli::Commands::Completion(args) => {
            commands::completion::execute(args.shell);
            Ok(())
        }
    }
}
