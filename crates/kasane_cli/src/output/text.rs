//! Text output formatter

use std::path::Path;

use kasane_core::{FileStatus, ResolvedFiles};

use super::{RuleListing, display_path};

pub fn output_rules(listing: &RuleListing<'_>) {
    println!(
        "{} ({}, {} rules)",
        listing.path,
        listing.status,
        listing.rules.len()
    );

    for (name, entry) in &listing.rules {
        if entry.options.is_empty() {
            println!("  {:<5}  {}", entry.severity, name);
        } else {
            let options = serde_json::to_string(&entry.options).unwrap_or_default();
            println!("  {:<5}  {} {}", entry.severity, name, options);
        }
    }
}

pub fn output_files(resolved: &ResolvedFiles, cwd: &Path) {
    let mut matched = 0;
    let mut unmatched = 0;
    let mut ignored = 0;

    for (path, status) in resolved {
        let rules = match status {
            FileStatus::Matched(config) => {
                matched += 1;
                config.enabled_rules().count()
            }
            FileStatus::Unmatched => {
                unmatched += 1;
                0
            }
            FileStatus::Ignored => {
                ignored += 1;
                0
            }
        };
        println!(
            "{:<9} {:>4}  {}",
            status.as_str(),
            rules,
            display_path(path, cwd)
        );
    }

    println!();
    println!(
        "Checked {} files: {} matched, {} unmatched, {} ignored",
        resolved.len(),
        matched,
        unmatched,
        ignored
    );
}
