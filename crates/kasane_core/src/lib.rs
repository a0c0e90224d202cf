//! # kasane_core
//!
//! Cascading lint configuration resolver for Kasane.
//!
//! This crate provides:
//! - The fragment data model (rules, plugins, language options, settings)
//! - Configuration loading (JSONC, schema validation, presets)
//! - Glob-scoped resolution of the effective configuration of a file
//! - File discovery and parallel resolution
//!
//! ## Example
//!
//! ```rust,ignore
//! use kasane_core::ConfigFile;
//!
//! let array = ConfigFile::load("kasane.config.jsonc")?;
//! let config = array.resolve("src/components/Button.tsx".as_ref());
//! for (rule, entry) in config.enabled_rules() {
//!     println!("{}: {}", rule, entry.severity);
//! }
//! ```

mod effective;
mod error;
pub mod file_finder;
mod fragment;
mod language;
mod loader;
mod merge;
mod parallel;
pub mod pattern;
mod preset;
pub mod resolver;
mod rule;

pub use effective::EffectiveConfig;
pub use error::ConfigError;
pub use file_finder::FileFinder;
pub use fragment::{ConfigFragment, FragmentBody, FragmentDecl, FragmentLabel};
pub use language::{EcmaVersion, GlobalAccess, LanguageOptions, LinterOptions, SourceType};
pub use loader::ConfigFile;
pub use merge::deep_merge;
pub use parallel::ResolvedFiles;
pub use resolver::{ConfigArray, FileStatus};
pub use rule::{RuleEntry, Severity, rule_namespace};
