//! Configuration fragments.
//!
//! A [`FragmentDecl`] is the declared (serde) form of one block of the
//! configuration array. After preset expansion and glob compilation it
//! becomes an immutable [`ConfigFragment`].

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::ConfigError;
use crate::language::{LanguageOptions, LinterOptions};
use crate::pattern::{IgnoreMatcher, PatternError, PatternSet};
use crate::rule::{RuleEntry, Severity};

/// Identifies a fragment in error messages: its declaration index and
/// optional name.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FragmentLabel {
    pub index: usize,
    pub name: Option<String>,
}

impl FragmentLabel {
    pub fn new(index: usize, name: Option<String>) -> Self {
        Self { index, name }
    }
}

impl fmt::Display for FragmentLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "fragment #{}", self.index)?;
        if let Some(name) = &self.name {
            write!(f, " ({:?})", name)?;
        }
        Ok(())
    }
}

/// Declared form of a configuration fragment.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct FragmentDecl {
    /// Human readable name, used in diagnostics.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// Glob patterns the fragment applies to. Empty means every file.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub files: Vec<String>,

    /// Glob patterns excluded from this fragment. On a fragment with no
    /// other keys they exclude files globally.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub ignores: Vec<String>,

    /// Presets applied before this fragment.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub extends: Vec<String>,

    #[serde(default, skip_serializing_if = "LanguageOptions::is_empty")]
    pub language_options: LanguageOptions,

    #[serde(default, skip_serializing_if = "LinterOptions::is_empty")]
    pub linter_options: LinterOptions,

    /// Plugin namespace to plugin identifier.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub plugins: BTreeMap<String, String>,

    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub rules: BTreeMap<String, RuleEntry>,

    /// Shared settings visible to every rule.
    #[serde(default, skip_serializing_if = "Map::is_empty")]
    pub settings: Map<String, Value>,
}

impl FragmentDecl {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn files<I, S>(mut self, patterns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.files.extend(patterns.into_iter().map(Into::into));
        self
    }

    pub fn ignores<I, S>(mut self, patterns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.ignores.extend(patterns.into_iter().map(Into::into));
        self
    }

    pub fn extends(mut self, preset: impl Into<String>) -> Self {
        self.extends.push(preset.into());
        self
    }

    pub fn plugin(mut self, namespace: impl Into<String>, identifier: impl Into<String>) -> Self {
        self.plugins.insert(namespace.into(), identifier.into());
        self
    }

    pub fn rule(mut self, name: impl Into<String>, severity: Severity) -> Self {
        self.rules.insert(name.into(), RuleEntry::new(severity));
        self
    }

    pub fn rule_with_options(
        mut self,
        name: impl Into<String>,
        severity: Severity,
        options: Vec<Value>,
    ) -> Self {
        self.rules
            .insert(name.into(), RuleEntry::with_options(severity, options));
        self
    }

    pub fn setting(mut self, key: impl Into<String>, value: Value) -> Self {
        self.settings.insert(key.into(), value);
        self
    }

    pub fn language_options(mut self, options: LanguageOptions) -> Self {
        self.language_options = options;
        self
    }

    pub fn linter_options(mut self, options: LinterOptions) -> Self {
        self.linter_options = options;
        self
    }

    /// Returns whether this fragment only lists global ignore patterns.
    pub fn is_global_ignore(&self) -> bool {
        !self.ignores.is_empty()
            && self.files.is_empty()
            && self.extends.is_empty()
            && self.body().is_empty()
    }

    /// Returns the mergeable part of the fragment.
    pub fn body(&self) -> FragmentBody {
        FragmentBody {
            language_options: self.language_options.clone(),
            linter_options: self.linter_options.clone(),
            plugins: self.plugins.clone(),
            rules: self.rules.clone(),
            settings: self.settings.clone(),
        }
    }
}

/// The part of a fragment that is merged into an effective configuration.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FragmentBody {
    pub language_options: LanguageOptions,
    pub linter_options: LinterOptions,
    pub plugins: BTreeMap<String, String>,
    pub rules: BTreeMap<String, RuleEntry>,
    pub settings: Map<String, Value>,
}

impl FragmentBody {
    pub fn is_empty(&self) -> bool {
        self.language_options.is_empty()
            && self.linter_options.is_empty()
            && self.plugins.is_empty()
            && self.rules.is_empty()
            && self.settings.is_empty()
    }
}

/// A compiled, immutable fragment.
#[derive(Debug, Clone)]
pub struct ConfigFragment {
    label: FragmentLabel,
    files: Option<PatternSet>,
    ignores: IgnoreMatcher,
    body: FragmentBody,
}

impl ConfigFragment {
    /// Compiles the scope of a fragment.
    pub(crate) fn compile(
        label: FragmentLabel,
        files: &[String],
        ignores: &[String],
        body: FragmentBody,
    ) -> Result<Self, ConfigError> {
        let glob_error = |e: PatternError| ConfigError::InvalidGlob {
            fragment: label.clone(),
            pattern: e.pattern,
            source: e.source,
        };

        let files = if files.is_empty() {
            None
        } else {
            Some(PatternSet::new(files).map_err(glob_error)?)
        };
        let ignores = IgnoreMatcher::new(ignores).map_err(glob_error)?;

        Ok(Self {
            label,
            files,
            ignores,
            body,
        })
    }

    pub fn label(&self) -> &FragmentLabel {
        &self.label
    }

    /// `files` patterns, or `None` for a fragment that applies everywhere.
    pub fn file_patterns(&self) -> Option<&[String]> {
        self.files.as_ref().map(PatternSet::patterns)
    }

    pub fn ignore_patterns(&self) -> &[String] {
        self.ignores.patterns()
    }

    pub fn body(&self) -> &FragmentBody {
        &self.body
    }

    /// Returns whether the fragment applies to a normalised path.
    pub fn applies_to(&self, path: &str) -> bool {
        self.files.as_ref().is_none_or(|files| files.is_match(path))
            && !self.ignores.is_ignored(path)
    }
}
