//! Output formatting module

mod json;
mod text;

use std::path::Path;

use kasane_core::{ResolvedFiles, RuleEntry};
use miette::Result;

use crate::cli::OutputFormat;

/// Rules applying to one file, ready for display.
pub struct RuleListing<'a> {
    pub path: String,
    pub status: &'static str,
    pub rules: Vec<(&'a str, &'a RuleEntry)>,
}

pub fn output_rules(listing: &RuleListing<'_>, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Json => json::output_rules(listing),
        OutputFormat::Text => {
            text::output_rules(listing);
            Ok(())
        }
    }
}

pub fn output_files(resolved: &ResolvedFiles, cwd: &Path, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Json => json::output_files(resolved, cwd),
        OutputFormat::Text => {
            text::output_files(resolved, cwd);
            Ok(())
        }
    }
}

/// Displays `path` relative to `cwd` when possible.
fn display_path(path: &Path, cwd: &Path) -> String {
    path.strip_prefix(cwd)
        .unwrap_or(path)
        .display()
        .to_string()
}
