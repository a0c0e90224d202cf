//! Files command implementation

use kasane_core::pattern::IgnoreMatcher;
use kasane_core::{FileFinder, FileStatus};
use miette::{IntoDiagnostic, Result};

use super::{current_dir, load_config};
use crate::cli::{Cli, OutputFormat};
use crate::output::output_files;

/// Returns `true` when `strict` is set and some file matched no fragment.
pub fn run_files(
    cli: &Cli,
    patterns: &[String],
    format: OutputFormat,
    strict: bool,
) -> Result<bool> {
    let loaded = load_config(cli)?;
    let cwd = current_dir()?;

    // Global ignores are relative to the config directory, so only the
    // built-in ones prune the walk; the resolver reports the rest.
    let finder = FileFinder::new(IgnoreMatcher::defaults());
    let files = finder.discover_files(patterns, &cwd).into_diagnostic()?;
    let resolved = loaded.array.resolve_all(&files);

    output_files(&resolved, &cwd, format)?;

    let unmatched = resolved
        .iter()
        .any(|(_, status)| *status == FileStatus::Unmatched);
    Ok(strict && unmatched)
}
