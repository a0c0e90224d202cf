//! Kasane CLI
//!
//! Inspect the effective lint configuration of any file.

mod cli;
mod commands;
mod output;

use std::process::ExitCode;

use clap::Parser;
use miette::Result;
use tracing::error;
use tracing_subscriber::EnvFilter;

use crate::cli::{Cli, Commands};

fn main() -> ExitCode {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    match run(&cli) {
        Ok(failed) => {
            if failed {
                ExitCode::from(1)
            } else {
                ExitCode::SUCCESS
            }
        }
        Err(e) => {
            error!("{:?}", e);
            ExitCode::from(2)
        }
    }
}

fn run(cli: &Cli) -> Result<bool> {
    match &cli.command {
        Commands::Check => commands::check::run_check(cli).map(|_| false),
        Commands::PrintConfig { file } => {
            commands::print_config::run_print_config(cli, file).map(|_| false)
        }
        Commands::Rules { file, all, format } => {
            commands::rules::run_rules(cli, file, *all, *format).map(|_| false)
        }
        Commands::Files {
            patterns,
            format,
            strict,
        } => commands::files::run_files(cli, patterns, *format, *strict),
        Commands::Init { force } => commands::init::run_init(cli, *force).map(|_| false),
    }
}
