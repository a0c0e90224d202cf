//! Configuration resolution.
//!
//! A [`ConfigArray`] owns the ordered, compiled fragments of a configuration
//! and computes the [`EffectiveConfig`] of any path by overlaying every
//! applicable fragment in declaration order.

use std::collections::{BTreeMap, HashMap};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use parking_lot::Mutex;
use tracing::{debug, info};

use crate::effective::EffectiveConfig;
use crate::error::ConfigError;
use crate::fragment::{ConfigFragment, FragmentDecl, FragmentLabel};
use crate::pattern::{IgnoreMatcher, relative_path};
use crate::preset::{expand_fragment, validate_presets};
use crate::rule::rule_namespace;

/// Outcome of resolving a single path.
#[derive(Debug, Clone, PartialEq)]
pub enum FileStatus {
    /// The path is excluded by a global ignore.
    Ignored,
    /// No fragment applies to the path.
    Unmatched,
    /// At least one fragment applies.
    Matched(Arc<EffectiveConfig>),
}

impl FileStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            FileStatus::Ignored => "ignored",
            FileStatus::Unmatched => "unmatched",
            FileStatus::Matched(_) => "matched",
        }
    }

    /// The effective configuration, if the path was matched.
    pub fn config(&self) -> Option<&Arc<EffectiveConfig>> {
        match self {
            FileStatus::Matched(config) => Some(config),
            _ => None,
        }
    }
}

/// An ordered list of compiled configuration fragments.
#[derive(Debug)]
pub struct ConfigArray {
    fragments: Vec<ConfigFragment>,
    global_ignores: IgnoreMatcher,
    global_ignore_fragments: usize,
    base_dir: Option<PathBuf>,
    cache: Mutex<HashMap<Vec<usize>, Arc<EffectiveConfig>>>,
    empty: Arc<EffectiveConfig>,
}

impl ConfigArray {
    /// Builds a resolver from fragment declarations.
    pub fn new(decls: Vec<FragmentDecl>) -> Result<Self, ConfigError> {
        Self::with_presets(decls, &BTreeMap::new())
    }

    /// Builds a resolver from fragment declarations and named presets.
    ///
    /// Fails on the first invalid fragment: unknown or cyclic presets,
    /// malformed globs, rules of unbound plugins, conflicting plugin
    /// bindings.
    pub fn with_presets(
        decls: Vec<FragmentDecl>,
        presets: &BTreeMap<String, FragmentDecl>,
    ) -> Result<Self, ConfigError> {
        validate_presets(presets)?;

        let mut fragments = Vec::new();
        let mut global_ignores = IgnoreMatcher::defaults();
        let mut global_ignore_fragments = 0;

        for (index, decl) in decls.iter().enumerate() {
            if decl.is_global_ignore() {
                global_ignores
                    .extend(&decl.ignores)
                    .map_err(|e| ConfigError::InvalidGlob {
                        fragment: FragmentLabel::new(index, decl.name.clone()),
                        pattern: e.pattern,
                        source: e.source,
                    })?;
                global_ignore_fragments += 1;
                continue;
            }

            for expanded in expand_fragment(index, decl, presets)? {
                fragments.push(ConfigFragment::compile(
                    expanded.label,
                    &expanded.files,
                    &expanded.ignores,
                    expanded.body,
                )?);
            }
        }

        check_plugins(&fragments)?;

        info!(
            "Loaded {} fragment(s), {} global ignore fragment(s)",
            fragments.len(),
            global_ignore_fragments
        );

        Ok(Self {
            fragments,
            global_ignores,
            global_ignore_fragments,
            base_dir: None,
            cache: Mutex::new(HashMap::new()),
            empty: Arc::new(EffectiveConfig::new()),
        })
    }

    /// Sets the directory patterns are relative to.
    pub fn with_base_dir(mut self, base_dir: impl Into<PathBuf>) -> Self {
        self.base_dir = Some(base_dir.into());
        self.cache.get_mut().clear();
        self
    }

    pub fn base_dir(&self) -> Option<&Path> {
        self.base_dir.as_deref()
    }

    /// Compiled fragments, after preset expansion, excluding global ignores.
    pub fn fragments(&self) -> &[ConfigFragment] {
        &self.fragments
    }

    pub fn len(&self) -> usize {
        self.fragments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fragments.is_empty()
    }

    pub fn global_ignores(&self) -> &IgnoreMatcher {
        &self.global_ignores
    }

    /// Number of declared fragments that only carry global ignores.
    pub fn global_ignore_fragments(&self) -> usize {
        self.global_ignore_fragments
    }

    /// Every plugin binding across all fragments.
    pub fn plugins(&self) -> BTreeMap<&str, &str> {
        self.fragments
            .iter()
            .flat_map(|f| f.body().plugins.iter())
            .map(|(namespace, identifier)| (namespace.as_str(), identifier.as_str()))
            .collect()
    }

    /// Returns whether a path is excluded by global ignores.
    pub fn is_ignored(&self, path: &Path) -> bool {
        relative_path(path, self.base_dir())
            .is_some_and(|relative| self.global_ignores.is_ignored(&relative))
    }

    /// Indices of the fragments applying to a path, in declaration order.
    pub fn matching_fragments(&self, path: &Path) -> Vec<usize> {
        let Some(relative) = relative_path(path, self.base_dir()) else {
            return Vec::new();
        };
        if self.global_ignores.is_ignored(&relative) {
            return Vec::new();
        }

        self.fragments
            .iter()
            .enumerate()
            .filter(|(_, fragment)| fragment.applies_to(&relative))
            .map(|(index, _)| index)
            .collect()
    }

    /// Resolves a path, distinguishing ignored and unmatched files.
    pub fn status(&self, path: &Path) -> FileStatus {
        if self.is_ignored(path) {
            return FileStatus::Ignored;
        }

        let indices = self.matching_fragments(path);
        if indices.is_empty() {
            FileStatus::Unmatched
        } else {
            FileStatus::Matched(self.merged(indices))
        }
    }

    /// Returns the effective configuration for a path.
    ///
    /// Ignored and unmatched paths get an empty configuration.
    pub fn resolve(&self, path: &Path) -> Arc<EffectiveConfig> {
        let indices = self.matching_fragments(path);
        if indices.is_empty() {
            return Arc::clone(&self.empty);
        }
        self.merged(indices)
    }

    fn merged(&self, indices: Vec<usize>) -> Arc<EffectiveConfig> {
        if let Some(config) = self.cache.lock().get(&indices) {
            debug!("Cache hit for fragments {:?}", indices);
            return Arc::clone(config);
        }

        debug!("Merging fragments {:?}", indices);
        let mut config = EffectiveConfig::new();
        for &index in &indices {
            config.apply(self.fragments[index].body());
        }

        let config = Arc::new(config);
        Arc::clone(self.cache.lock().entry(indices).or_insert(config))
    }

    /// Drops memoised configurations.
    pub fn clear_cache(&self) {
        self.cache.lock().clear();
    }
}

fn check_plugins(fragments: &[ConfigFragment]) -> Result<(), ConfigError> {
    let mut bound: BTreeMap<&str, &str> = BTreeMap::new();

    for fragment in fragments {
        for (namespace, identifier) in &fragment.body().plugins {
            match bound.get(namespace.as_str()) {
                Some(existing) if *existing != identifier.as_str() => {
                    return Err(ConfigError::PluginConflict {
                        fragment: fragment.label().clone(),
                        plugin: namespace.clone(),
                        identifier: identifier.clone(),
                        existing: existing.to_string(),
                    });
                }
                Some(_) => {}
                None => {
                    bound.insert(namespace.as_str(), identifier.as_str());
                }
            }
        }
    }

    for fragment in fragments {
        for rule in fragment.body().rules.keys() {
            if let Some(namespace) = rule_namespace(rule)
                && !bound.contains_key(namespace)
            {
                return Err(ConfigError::UnknownPlugin {
                    fragment: fragment.label().clone(),
                    rule: rule.clone(),
                    plugin: namespace.to_string(),
                });
            }
        }
    }

    Ok(())
}
