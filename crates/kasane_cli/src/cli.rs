//! CLI argument definitions

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

/// Kasane - inspect the effective lint configuration of any file
#[derive(Parser)]
#[command(name = "ksn")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Configuration file path
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

/// Output format for listings
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Validate the configuration
    Check,

    /// Print the effective configuration of a file as JSON
    PrintConfig {
        /// File to resolve
        file: PathBuf,
    },

    /// List the rules that apply to a file
    Rules {
        /// File to resolve
        file: PathBuf,

        /// Include rules that are turned off
        #[arg(long)]
        all: bool,

        /// Output format
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },

    /// Resolve every file matching the patterns
    Files {
        /// File patterns to resolve
        #[arg(default_value = "**/*")]
        patterns: Vec<String>,

        /// Output format
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,

        /// Exit with status 1 when a file is matched by no fragment
        #[arg(long)]
        strict: bool,
    },

    /// Write a starter configuration (to --config when given)
    Init {
        /// Force overwrite existing config
        #[arg(long)]
        force: bool,
    },
}
