//! geofilter CLI - Command-line interface
//!
//! Builds geometry filters from Esri JSON and evaluates them locally.

mod cli;
mod commands;
mod errors;
mod output;

use clap::Parser;
use cli::Cli;
use errors::CliError;
use output::OutputWriter;
use std::process::ExitCode;

fn main() -> ExitCode {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    // Parse CLI arguments
    let cli = Cli::parse();
    let output = OutputWriter::new(cli.json);

    match commands::execute(cli, &output) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            match err.downcast_ref::<CliError>() {
                Some(cli_err) if !output.is_json() => cli_err.display(),
                _ => output.error(format!("{:#}", err)),
            }
            ExitCode::FAILURE
        }
    }
}
