//! Subcommand implementations

pub mod check;
pub mod files;
pub mod init;
pub mod print_config;
pub mod rules;

use std::path::{Component, Path, PathBuf};

use kasane_core::{ConfigArray, ConfigFile};
use miette::{IntoDiagnostic, Result};
use tracing::info;

use crate::cli::Cli;

/// A loaded configuration and the file it came from.
pub struct LoadedConfig {
    pub array: ConfigArray,
    pub path: Option<PathBuf>,
}

/// Loads the configuration named by `--config`, or the nearest one.
pub fn load_config(cli: &Cli) -> Result<LoadedConfig> {
    let path = match &cli.config {
        Some(path) => Some(path.clone()),
        None => ConfigFile::discover("."),
    };

    match path {
        Some(path) => {
            info!("Using config: {}", path.display());
            let array = ConfigFile::load(&path).into_diagnostic()?;
            Ok(LoadedConfig {
                array,
                path: Some(path),
            })
        }
        None => {
            info!("No config file found, using defaults");
            let array = ConfigArray::new(Vec::new())
                .into_diagnostic()?
                .with_base_dir(current_dir()?);
            Ok(LoadedConfig { array, path: None })
        }
    }
}

/// Makes a command-line path absolute and canonical, so it compares
/// against the canonical config directory.
///
/// Paths that do not exist are normalised lexically, and their deepest
/// existing ancestor is canonicalised.
pub fn absolute(path: &Path) -> Result<PathBuf> {
    let joined = current_dir()?.join(path);
    if let Ok(canonical) = joined.canonicalize() {
        return Ok(canonical);
    }

    let mut normalized = PathBuf::new();
    for component in joined.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                normalized.pop();
            }
            other => normalized.push(other),
        }
    }

    for ancestor in normalized.ancestors() {
        if let Ok(canonical) = ancestor.canonicalize()
            && let Ok(rest) = normalized.strip_prefix(ancestor)
        {
            return Ok(canonical.join(rest));
        }
    }
    Ok(normalized)
}

/// The canonical working directory.
pub fn current_dir() -> Result<PathBuf> {
    std::env::current_dir()
        .and_then(|dir| dir.canonicalize())
        .into_diagnostic()
}
