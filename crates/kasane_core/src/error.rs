//! Configuration error types.

use std::path::PathBuf;

use thiserror::Error;

use crate::fragment::FragmentLabel;

/// Errors that can occur while loading or validating a configuration.
///
/// Every error is raised before any file is resolved; resolution itself
/// never fails.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Generic configuration error.
    #[error("Configuration error: {0}")]
    Config(String),

    /// JSON/JSONC syntax error.
    #[error("Parse error: {0}")]
    Parse(String),

    /// The document does not satisfy the configuration schema.
    #[error("Config validation failed: {0}")]
    Schema(String),

    /// A fragment does not satisfy the configuration schema.
    #[error("Config validation failed in {fragment}: {message}")]
    FragmentSchema {
        fragment: FragmentLabel,
        message: String,
    },

    /// A fragment could not be decoded into its typed form.
    #[error("{fragment}: {message}")]
    InvalidFragment {
        fragment: FragmentLabel,
        message: String,
    },

    /// A `files` or `ignores` pattern is not a valid glob.
    #[error("{fragment}: invalid glob pattern '{pattern}': {source}")]
    InvalidGlob {
        fragment: FragmentLabel,
        pattern: String,
        #[source]
        source: globset::Error,
    },

    /// `extends` names a preset that is not declared.
    #[error("{fragment}: unknown preset '{preset}'")]
    UnknownPreset {
        fragment: FragmentLabel,
        preset: String,
    },

    /// A preset extends itself, directly or through other presets.
    #[error("{fragment}: preset cycle detected: {}", chain.join(" -> "))]
    PresetCycle {
        fragment: FragmentLabel,
        chain: Vec<String>,
    },

    /// Presets inherit their scope from the extending fragment.
    #[error("preset '{preset}' must not declare 'files' or 'ignores'")]
    ScopedPreset { preset: String },

    /// A rule key is namespaced by a plugin that no fragment binds.
    #[error("{fragment}: rule '{rule}' references unknown plugin '{plugin}'")]
    UnknownPlugin {
        fragment: FragmentLabel,
        rule: String,
        plugin: String,
    },

    /// A plugin namespace is bound to two different plugins.
    #[error(
        "{fragment}: cannot redefine plugin '{plugin}' as '{identifier}' (already bound to '{existing}')"
    )]
    PluginConflict {
        fragment: FragmentLabel,
        plugin: String,
        identifier: String,
        existing: String,
    },

    /// The configuration file could not be read.
    #[error("Failed to read config {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl ConfigError {
    /// Creates a configuration error.
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Creates a parse error.
    pub fn parse(message: impl Into<String>) -> Self {
        Self::Parse(message.into())
    }

    /// Creates a fragment decoding error.
    pub fn invalid_fragment(fragment: FragmentLabel, message: impl Into<String>) -> Self {
        Self::InvalidFragment {
            fragment,
            message: message.into(),
        }
    }

    /// Returns the fragment this error points at, if any.
    pub fn fragment(&self) -> Option<&FragmentLabel> {
        match self {
            Self::FragmentSchema { fragment, .. }
            | Self::InvalidFragment { fragment, .. }
            | Self::InvalidGlob { fragment, .. }
            | Self::UnknownPreset { fragment, .. }
            | Self::PresetCycle { fragment, .. }
            | Self::UnknownPlugin { fragment, .. }
            | Self::PluginConflict { fragment, .. } => Some(fragment),
            _ => None,
        }
    }
}
