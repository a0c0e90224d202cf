//! The merged configuration for one file.

use std::collections::BTreeMap;

use serde::Serialize;
use serde_json::{Map, Value};

use crate::fragment::FragmentBody;
use crate::language::{LanguageOptions, LinterOptions};
use crate::merge::deep_merge;
use crate::rule::{RuleEntry, Severity};

/// Fully merged configuration applicable to a single file.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EffectiveConfig {
    pub language_options: LanguageOptions,
    pub linter_options: LinterOptions,
    pub plugins: BTreeMap<String, String>,
    pub rules: BTreeMap<String, RuleEntry>,
    pub settings: Map<String, Value>,
}

impl EffectiveConfig {
    /// Creates an empty configuration (no rules enforced).
    pub fn new() -> Self {
        Self::default()
    }

    /// Overlays one fragment body onto the accumulated configuration.
    pub fn apply(&mut self, body: &FragmentBody) {
        self.language_options.overlay(&body.language_options);
        self.linter_options.overlay(&body.linter_options);

        for (namespace, identifier) in &body.plugins {
            self.plugins.insert(namespace.clone(), identifier.clone());
        }

        for (name, entry) in &body.rules {
            match self.rules.get_mut(name) {
                Some(existing) => existing.overlay(entry),
                None => {
                    self.rules.insert(name.clone(), entry.clone());
                }
            }
        }

        deep_merge(&mut self.settings, &body.settings);
    }

    /// Returns whether nothing is configured.
    pub fn is_empty(&self) -> bool {
        self.language_options.is_empty()
            && self.linter_options.is_empty()
            && self.plugins.is_empty()
            && self.rules.is_empty()
            && self.settings.is_empty()
    }

    pub fn rule(&self, name: &str) -> Option<&RuleEntry> {
        self.rules.get(name)
    }

    /// Severity of a rule; unconfigured rules are `Off`.
    pub fn severity(&self, name: &str) -> Severity {
        self.rules
            .get(name)
            .map(|entry| entry.severity)
            .unwrap_or_default()
    }

    /// Rules whose severity is not `off`, in name order.
    pub fn enabled_rules(&self) -> impl Iterator<Item = (&str, &RuleEntry)> {
        self.rules
            .iter()
            .filter(|(_, entry)| entry.is_enabled())
            .map(|(name, entry)| (name.as_str(), entry))
    }

    /// Computes a hash of the configuration, for keying downstream caches.
    pub fn fingerprint(&self) -> String {
        let json = serde_json::to_string(self).unwrap_or_default();
        blake3::hash(json.as_bytes()).to_hex().to_string()
    }
}
