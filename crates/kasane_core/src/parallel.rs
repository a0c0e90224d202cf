//! Parallel resolution of many files.

use std::path::PathBuf;

use rayon::prelude::*;
use tracing::debug;

use crate::resolver::{ConfigArray, FileStatus};

pub type ResolvedFiles = Vec<(PathBuf, FileStatus)>;

impl ConfigArray {
    /// Resolves every path in parallel; results keep the input order.
    pub fn resolve_all(&self, paths: &[PathBuf]) -> ResolvedFiles {
        let results: ResolvedFiles = paths
            .par_iter()
            .map(|path| (path.clone(), self.status(path)))
            .collect();

        let matched = results
            .iter()
            .filter(|(_, status)| matches!(status, FileStatus::Matched(_)))
            .count();
        debug!("Resolved {} files ({} matched)", results.len(), matched);

        results
    }
}
