use std::path::{Path, PathBuf};

use tracing::info;
use walkdir::WalkDir;

use crate::error::ConfigError;
use crate::pattern::{IgnoreMatcher, PatternSet, relative_path};

/// Finds candidate files on disk, honouring global ignores.
pub struct FileFinder {
    ignores: IgnoreMatcher,
}

impl FileFinder {
    pub fn new(ignores: IgnoreMatcher) -> Self {
        Self { ignores }
    }

    /// Checks if a path relative to `base_dir` is ignored.
    pub fn should_ignore(&self, path: &Path, base_dir: &Path) -> bool {
        relative_path(path, Some(base_dir)).is_some_and(|rel| self.ignores.is_ignored(&rel))
    }

    /// Discovers files under `base_dir`.
    ///
    /// Existing file paths are taken as-is; anything else is a glob matched
    /// against paths relative to `base_dir`.
    pub fn discover_files(
        &self,
        patterns: &[String],
        base_dir: &Path,
    ) -> Result<Vec<PathBuf>, ConfigError> {
        let base_dir = base_dir
            .canonicalize()
            .unwrap_or_else(|_| base_dir.to_path_buf());
        let mut files = Vec::new();
        let mut globs = Vec::new();

        for pattern in patterns {
            let path = base_dir.join(pattern);
            if path
                .symlink_metadata()
                .is_ok_and(|m| m.file_type().is_file())
            {
                if let Ok(abs_path) = path.canonicalize() {
                    if self.should_ignore(&abs_path, &base_dir) {
                        continue;
                    }

                    files.push(abs_path);
                }
            } else {
                globs.push(pattern.clone());
            }
        }

        if !globs.is_empty() {
            let glob_set = PatternSet::new(&globs).map_err(|e| {
                ConfigError::config(format!("Invalid pattern '{}': {}", e.pattern, e.source))
            })?;
            let prune = !self.ignores.has_negations();

            let walker = WalkDir::new(&base_dir).into_iter().filter_entry(|entry| {
                !(prune
                    && entry.file_type().is_dir()
                    && relative_path(entry.path(), Some(&base_dir))
                        .is_some_and(|rel| self.ignores.is_dir_ignored(&rel)))
            });

            for entry in walker.filter_map(|e| e.ok()) {
                if !entry.file_type().is_file() {
                    continue;
                }
                let Some(rel) = relative_path(entry.path(), Some(&base_dir)) else {
                    continue;
                };
                if glob_set.is_match(&rel) && !self.ignores.is_ignored(&rel) {
                    files.push(entry.into_path());
                }
            }
        }

        files.sort();
        files.dedup();

        info!("Discovered {} files", files.len());
        Ok(files)
    }
}
