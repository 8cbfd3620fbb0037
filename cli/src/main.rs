//! `fetch`: send one validated JSON API request from the command line.

use std::process::ExitCode;

use clap::Parser;

mod cli;
mod commands;
mod logging;
mod spinner;

use crate::cli::Cli;
use crate::commands::run;
use crate::logging::{init_logging, LogConfig};

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    if let Err(error) = init_logging(&LogConfig::from_flags(cli.verbose, cli.quiet)) {
        eprintln!("error: failed to initialize logging: {error}");
        return ExitCode::FAILURE;
    }
    match run(&cli).await {
        Ok(code) => code,
        Err(error) => {
            eprintln!("error: {error:#}");
            ExitCode::FAILURE
        }
    }
}
