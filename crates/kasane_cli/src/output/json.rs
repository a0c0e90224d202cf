//! JSON output formatter

use std::path::Path;

use kasane_core::ResolvedFiles;
use miette::{IntoDiagnostic, Result};

use super::{RuleListing, display_path};

pub fn output_rules(listing: &RuleListing<'_>) -> Result<()> {
    let rules: serde_json::Map<String, serde_json::Value> = listing
        .rules
        .iter()
        .map(|(name, entry)| {
            serde_json::to_value(entry).map(|value| (name.to_string(), value))
        })
        .collect::<Result<_, _>>()
        .into_diagnostic()?;

    let output = serde_json::json!({
        "path": listing.path,
        "status": listing.status,
        "rules": rules,
    });
    println!(
        "{}",
        serde_json::to_string_pretty(&output).into_diagnostic()?
    );
    Ok(())
}

pub fn output_files(resolved: &ResolvedFiles, cwd: &Path) -> Result<()> {
    let output: Vec<_> = resolved
        .iter()
        .map(|(path, status)| {
            let config = status.config();
            serde_json::json!({
                "path": display_path(path, cwd),
                "status": status.as_str(),
                "enabledRules": config.map_or(0, |c| c.enabled_rules().count()),
                "fingerprint": config.map(|c| c.fingerprint()),
            })
        })
        .collect();
    println!(
        "{}",
        serde_json::to_string_pretty(&output).into_diagnostic()?
    );
    Ok(())
}
