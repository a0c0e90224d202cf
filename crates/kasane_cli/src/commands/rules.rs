//! Rules command implementation

use std::path::Path;

use miette::Result;

use super::{absolute, load_config};
use crate::cli::{Cli, OutputFormat};
use crate::output::{RuleListing, output_rules};

pub fn run_rules(cli: &Cli, file: &Path, all: bool, format: OutputFormat) -> Result<()> {
    let loaded = load_config(cli)?;
    let target = absolute(file)?;
    let status = loaded.array.status(&target);
    let config = loaded.array.resolve(&target);

    let listing = RuleListing {
        path: file.display().to_string(),
        status: status.as_str(),
        rules: config
            .rules
            .iter()
            .filter(|(_, entry)| all || entry.is_enabled())
            .map(|(name, entry)| (name.as_str(), entry))
            .collect(),
    };

    output_rules(&listing, format)
}
