//! Check command implementation

use miette::Result;

use super::load_config;
use crate::cli::Cli;

pub fn run_check(cli: &Cli) -> Result<()> {
    let loaded = load_config(cli)?;
    let array = &loaded.array;

    match &loaded.path {
        Some(path) => println!("Configuration OK: {}", path.display()),
        None => println!("Configuration OK: (defaults)"),
    }

    let plugins = array.plugins();
    println!("  fragments:      {}", array.len());
    println!("  global ignores: {}", array.global_ignore_fragments());
    if plugins.is_empty() {
        println!("  plugins:        0");
    } else {
        let names: Vec<&str> = plugins.keys().copied().collect();
        println!("  plugins:        {} ({})", plugins.len(), names.join(", "));
    }

    Ok(())
}
