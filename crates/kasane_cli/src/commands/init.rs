//! Init command implementation

use std::fs::{self, File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

use kasane_core::ConfigFile;
use miette::{IntoDiagnostic, Result};
use tracing::{info, warn};

use crate::cli::Cli;

const STARTER_CONFIG: &str = r#"{
  "$schema": "https://github.com/kasane-lint/kasane/schemas/v1/config.json",
  "presets": {
    "react-hooks/recommended": {
      "plugins": { "react-hooks": "eslint-plugin-react-hooks" },
      "rules": {
        "react-hooks/rules-of-hooks": "error",
        "react-hooks/exhaustive-deps": "warn"
      }
    }
  },
  "fragments": [
    { "name": "build output", "ignores": ["dist/"] },
    {
      "name": "common",
      "files": ["**/*.{js,mjs,cjs,ts,mts,cts,jsx,tsx}"],
      "extends": ["react-hooks/recommended"],
      "languageOptions": {
        "parser": "typescript-eslint/parser",
        "parserOptions": {
          "ecmaVersion": "latest",
          "sourceType": "module",
          "ecmaFeatures": { "jsx": true }
        }
      },
      "plugins": {
        "@typescript-eslint": "typescript-eslint",
        "react": "eslint-plugin-react"
      },
      "settings": {
        "react": { "version": "detect" }
      },
      "rules": {
        "react/react-in-jsx-scope": "off",
        "@typescript-eslint/no-explicit-any": "warn",
        "no-implicit-coercion": "error"
      }
    }
  ]
}
"#;

/// Writes the starter configuration to `--config`, or to
/// `kasane.config.jsonc` in the working directory.
pub fn run_init(cli: &Cli, force: bool) -> Result<()> {
    let path = cli
        .config
        .clone()
        .unwrap_or_else(|| PathBuf::from(ConfigFile::CONFIG_FILES[0]));

    let starter = ConfigFile::from_jsonc(STARTER_CONFIG).into_diagnostic()?;
    starter.into_array().into_diagnostic()?;

    if !is_discoverable(&path) {
        warn!(
            "{} is not a discovered config name; pass --config to use it",
            path.display()
        );
    }

    if fs::symlink_metadata(&path).is_ok() {
        if !force {
            return Err(miette::miette!(
                "{} already exists. Use --force to overwrite.",
                path.display()
            ));
        }
        remove_existing(&path)?;
    }

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).into_diagnostic()?;
    }

    let mut file = create_new(&path).into_diagnostic()?;
    file.write_all(STARTER_CONFIG.as_bytes()).into_diagnostic()?;

    info!("Created {}", path.display());
    Ok(())
}

fn is_discoverable(path: &Path) -> bool {
    path.file_name()
        .and_then(|name| name.to_str())
        .is_some_and(|name| ConfigFile::CONFIG_FILES.contains(&name))
}

/// Removes a file or symlink at `path`. The link itself is removed, never
/// its target.
fn remove_existing(path: &Path) -> Result<()> {
    let meta = fs::symlink_metadata(path).into_diagnostic()?;
    if meta.is_dir() {
        return Err(miette::miette!(
            "{} is a directory and cannot be replaced",
            path.display()
        ));
    }

    match fs::remove_file(path) {
        Err(e) if e.kind() != std::io::ErrorKind::NotFound => Err(e).into_diagnostic(),
        _ => Ok(()),
    }
}

/// Creates `path`, failing if anything (a dangling symlink included) is
/// already there.
fn create_new(path: &Path) -> std::io::Result<File> {
    let mut options = OpenOptions::new();
    options.write(true).create_new(true);

    #[cfg(unix)]
    {
        use std::os::unix::fs::OpenOptionsExt;
        options.custom_flags(libc::O_NOFOLLOW);
    }

    options.open(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_starter_config_is_valid() {
        let config = ConfigFile::from_jsonc(STARTER_CONFIG).unwrap();
        let array = config.into_array().unwrap();

        assert_eq!(array.len(), 2);
        assert_eq!(array.global_ignore_fragments(), 1);
    }

    #[test]
    fn test_is_discoverable() {
        assert!(is_discoverable(Path::new("web/kasane.config.jsonc")));
        assert!(is_discoverable(Path::new(".kasane.json")));
        assert!(!is_discoverable(Path::new("lint.jsonc")));
    }
}
