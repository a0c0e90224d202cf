//! Glob patterns for `files` and `ignores`.
//!
//! Patterns are matched against `/`-separated paths relative to the
//! configuration base directory. `*` and `?` never cross a separator,
//! `**` spans any number of directories and `{a,b}` is alternation.

use std::path::{Component, Path};

use globset::{Glob, GlobBuilder, GlobMatcher, GlobSet, GlobSetBuilder};

/// Ignore patterns that apply to every configuration.
pub const DEFAULT_IGNORES: &[&str] = &["**/node_modules/", ".git/"];

/// A pattern that failed to compile.
#[derive(Debug)]
pub struct PatternError {
    pub pattern: String,
    pub source: globset::Error,
}

fn compile(pattern: &str) -> Result<Glob, PatternError> {
    let trimmed = pattern.trim_start_matches("./").trim_start_matches('/');
    GlobBuilder::new(trimmed)
        .literal_separator(true)
        .backslash_escape(true)
        .build()
        .map_err(|source| PatternError {
            pattern: pattern.to_string(),
            source,
        })
}

/// Normalises `path` into the form patterns are matched against.
///
/// Relative paths are taken as relative to `base_dir`. Absolute paths are
/// made relative to `base_dir`; paths outside it yield `None`, as do paths
/// escaping upwards through `..`. Without a base directory there is nothing
/// to anchor an absolute path to, so it yields `None` too.
pub fn relative_path(path: &Path, base_dir: Option<&Path>) -> Option<String> {
    let relative = match base_dir {
        Some(base) if path.is_absolute() => path.strip_prefix(base).ok()?,
        None if path.has_root() => return None,
        _ => path,
    };

    let mut segments = Vec::new();
    for component in relative.components() {
        match component {
            Component::Normal(segment) => segments.push(segment.to_string_lossy()),
            Component::CurDir | Component::RootDir | Component::Prefix(_) => {}
            Component::ParentDir => {
                segments.pop()?;
            }
        }
    }

    if segments.is_empty() {
        None
    } else {
        Some(segments.join("/"))
    }
}

/// Compiled `files` patterns of a fragment.
#[derive(Debug, Clone)]
pub struct PatternSet {
    patterns: Vec<String>,
    set: GlobSet,
}

impl PatternSet {
    pub fn new(patterns: &[String]) -> Result<Self, PatternError> {
        let mut builder = GlobSetBuilder::new();
        for pattern in patterns {
            builder.add(compile(pattern)?);
        }

        let set = builder.build().map_err(|source| PatternError {
            pattern: patterns.join(", "),
            source,
        })?;

        Ok(Self {
            patterns: patterns.to_vec(),
            set,
        })
    }

    /// Returns whether the normalised path matches any pattern.
    pub fn is_match(&self, path: &str) -> bool {
        self.set.is_match(path)
    }

    pub fn patterns(&self) -> &[String] {
        &self.patterns
    }
}

#[derive(Debug, Clone)]
struct IgnoreRule {
    negated: bool,
    dir_only: bool,
    matcher: GlobMatcher,
}

impl IgnoreRule {
    /// Checks the path's ancestor directories and, unless the pattern names
    /// a directory, the path itself.
    fn matches(&self, path: &str) -> bool {
        let ancestors = path
            .match_indices('/')
            .map(|(index, _)| &path[..index])
            .any(|dir| self.matcher.is_match(dir));

        ancestors || (!self.dir_only && self.matcher.is_match(path))
    }

    fn matches_dir(&self, dir: &str) -> bool {
        self.matcher.is_match(dir) || self.matches(dir)
    }
}

/// Compiled `ignores` patterns.
///
/// A trailing `/` restricts a pattern to directories (and thus everything
/// below them). A leading `!` re-includes a previously ignored path. The
/// last matching pattern decides.
#[derive(Debug, Clone, Default)]
pub struct IgnoreMatcher {
    patterns: Vec<String>,
    rules: Vec<IgnoreRule>,
}

impl IgnoreMatcher {
    pub fn new(patterns: &[String]) -> Result<Self, PatternError> {
        let mut matcher = Self::default();
        matcher.extend(patterns)?;
        Ok(matcher)
    }

    /// Matcher for [`DEFAULT_IGNORES`].
    pub fn defaults() -> Self {
        let patterns: Vec<String> = DEFAULT_IGNORES.iter().map(|p| p.to_string()).collect();
        let mut matcher = Self::default();
        for pattern in &patterns {
            // Built-in patterns are known to compile.
            if let Ok(rule) = Self::rule(pattern) {
                matcher.rules.push(rule);
                matcher.patterns.push(pattern.clone());
            }
        }
        matcher
    }

    /// Appends patterns after the existing ones.
    pub fn extend(&mut self, patterns: &[String]) -> Result<(), PatternError> {
        for pattern in patterns {
            self.rules.push(Self::rule(pattern)?);
            self.patterns.push(pattern.clone());
        }
        Ok(())
    }

    fn rule(pattern: &str) -> Result<IgnoreRule, PatternError> {
        let (negated, body) = match pattern.strip_prefix('!') {
            Some(rest) => (true, rest),
            None => (false, pattern),
        };
        let (dir_only, body) = match body.strip_suffix('/') {
            Some(rest) => (true, rest),
            None => (false, body),
        };

        let glob = compile(body).map_err(|e| PatternError {
            pattern: pattern.to_string(),
            source: e.source,
        })?;

        Ok(IgnoreRule {
            negated,
            dir_only,
            matcher: glob.compile_matcher(),
        })
    }

    /// Returns whether the normalised path is ignored.
    pub fn is_ignored(&self, path: &str) -> bool {
        self.rules
            .iter()
            .rev()
            .find(|rule| rule.matches(path))
            .is_some_and(|rule| !rule.negated)
    }

    /// Returns whether a normalised directory path, and so everything
    /// below it, is ignored.
    pub fn is_dir_ignored(&self, dir: &str) -> bool {
        self.rules
            .iter()
            .rev()
            .find(|rule| rule.matches_dir(dir))
            .is_some_and(|rule| !rule.negated)
    }

    /// Returns whether any pattern re-includes paths with `!`.
    pub fn has_negations(&self) -> bool {
        self.rules.iter().any(|rule| rule.negated)
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    pub fn patterns(&self) -> &[String] {
        &self.patterns
    }
}
