//! Print-config command implementation

use std::path::Path;

use kasane_core::{EffectiveConfig, FileStatus};
use miette::{IntoDiagnostic, Result};
use tracing::warn;

use super::{absolute, load_config};
use crate::cli::Cli;

pub fn run_print_config(cli: &Cli, file: &Path) -> Result<()> {
    let loaded = load_config(cli)?;
    let target = absolute(file)?;

    let output = match loaded.array.status(&target) {
        FileStatus::Ignored => {
            warn!("{} is ignored by the configuration", file.display());
            serde_json::Value::Null
        }
        FileStatus::Unmatched => {
            warn!("No configuration fragment matches {}", file.display());
            serde_json::to_value(EffectiveConfig::new()).into_diagnostic()?
        }
        FileStatus::Matched(config) => serde_json::to_value(config.as_ref()).into_diagnostic()?,
    };

    println!(
        "{}",
        serde_json::to_string_pretty(&output).into_diagnostic()?
    );
    Ok(())
}
