//! Integration tests for CLI behavior
//!
//! These tests verify the external behavior of the CLI tool:
//! configuration validation and per-file resolution.

use std::fs;
use std::path::{Path, PathBuf};

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

/// Helper to create a command for the ksn CLI
fn kasane_cmd() -> Command {
    Command::new(env!("CARGO_BIN_EXE_ksn"))
}

fn fixtures_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures")
}

/// Creates a project directory holding the fixture config.
fn project() -> TempDir {
    let temp_dir = TempDir::new().unwrap();
    fs::copy(
        fixtures_dir().join("kasane.config.jsonc"),
        temp_dir.path().join("kasane.config.jsonc"),
    )
    .unwrap();
    temp_dir
}

fn write_config(dir: &Path, content: &str) -> PathBuf {
    let path = dir.join("kasane.config.json");
    fs::write(&path, content).unwrap();
    path
}

mod help_command {
    use super::*;

    #[test]
    fn shows_help_with_flag() {
        kasane_cmd()
            .arg("--help")
            .assert()
            .success()
            .stdout(predicate::str::contains("Usage:"));
    }

    #[test]
    fn shows_version_with_flag() {
        kasane_cmd()
            .arg("--version")
            .assert()
            .success()
            .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
    }

    #[test]
    fn requires_subcommand() {
        kasane_cmd().assert().failure();
    }
}

mod check_command {
    use super::*;

    #[test]
    fn reports_valid_config() {
        let dir = project();

        kasane_cmd()
            .current_dir(dir.path())
            .arg("check")
            .assert()
            .success()
            .stdout(predicate::str::contains("Configuration OK"))
            .stdout(predicate::str::contains("kasane.config.jsonc"))
            .stdout(predicate::str::contains("global ignores: 1"))
            .stdout(predicate::str::contains("react-hooks"));
    }

    #[test]
    fn counts_expanded_fragments() {
        let dir = project();

        // preset + common + components; global ignores are counted apart
        kasane_cmd()
            .current_dir(dir.path())
            .arg("check")
            .assert()
            .success()
            .stdout(predicate::str::contains("fragments:      3"));
    }

    #[test]
    fn falls_back_to_defaults_without_config() {
        let dir = TempDir::new().unwrap();

        kasane_cmd()
            .current_dir(dir.path())
            .arg("check")
            .assert()
            .success()
            .stdout(predicate::str::contains("(defaults)"));
    }

    #[test]
    fn rejects_malformed_json() {
        let dir = TempDir::new().unwrap();
        let config = write_config(dir.path(), "{ \"fragments\": [ }");

        kasane_cmd()
            .arg("--config")
            .arg(&config)
            .arg("check")
            .assert()
            .code(2)
            .stderr(predicate::str::contains("Parse error"));
    }

    #[test]
    fn rejects_schema_violation() {
        let dir = TempDir::new().unwrap();
        let config = write_config(
            dir.path(),
            r#"{ "fragments": [ { "rules": { "semi": "fatal" } } ] }"#,
        );

        kasane_cmd()
            .arg("--config")
            .arg(&config)
            .arg("check")
            .assert()
            .code(2)
            .stderr(predicate::str::contains("Config validation failed"));
    }

    #[test]
    fn rejects_unknown_plugin() {
        let dir = TempDir::new().unwrap();
        let config = write_config(
            dir.path(),
            r#"{ "fragments": [ { "name": "app", "rules": { "react/prop-types": "off" } } ] }"#,
        );

        kasane_cmd()
            .arg("--config")
            .arg(&config)
            .arg("check")
            .assert()
            .code(2)
            .stderr(predicate::str::contains("references unknown plugin"))
            .stderr(predicate::str::contains("'react'"));
    }

    #[test]
    fn rejects_preset_cycle() {
        let dir = TempDir::new().unwrap();
        let config = write_config(
            dir.path(),
            r#"{
                "presets": {
                    "a": { "extends": ["b"] },
                    "b": { "extends": ["a"] }
                },
                "fragments": [ { "extends": ["a"] } ]
            }"#,
        );

        kasane_cmd()
            .arg("--config")
            .arg(&config)
            .arg("check")
            .assert()
            .code(2)
            .stderr(predicate::str::contains("preset cycle detected"));
    }

    #[test]
    fn fails_on_missing_config_file() {
        let dir = TempDir::new().unwrap();

        kasane_cmd()
            .arg("--config")
            .arg(dir.path().join("missing.jsonc"))
            .arg("check")
            .assert()
            .code(2);
    }
}

mod print_config_command {
    use super::*;

    fn print_config(dir: &Path, file: &str) -> serde_json::Value {
        let output = kasane_cmd()
            .current_dir(dir)
            .args(["print-config", file])
            .output()
            .unwrap();
        assert!(output.status.success());
        serde_json::from_slice(&output.stdout).unwrap()
    }

    #[test]
    fn prints_merged_config_for_component() {
        let dir = project();
        let config = print_config(dir.path(), "src/components/Button.tsx");

        assert_eq!(config["rules"]["react/jsx-key"][0], "error");
        assert_eq!(
            config["rules"]["react/jsx-key"][1]["checkFragmentShorthand"],
            true
        );
        assert_eq!(config["rules"]["react-hooks/exhaustive-deps"][0], "warn");
        assert_eq!(config["plugins"]["react"], "eslint-plugin-react");
    }

    #[test]
    fn component_rules_do_not_leak() {
        let dir = project();
        let config = print_config(dir.path(), "src/util.ts");

        assert!(config["rules"].get("react/jsx-key").is_none());
        assert_eq!(config["rules"]["no-implicit-coercion"][0], "error");
    }

    #[test]
    fn ignored_file_prints_null() {
        let dir = project();

        kasane_cmd()
            .current_dir(dir.path())
            .args(["print-config", "dist/bundle.js"])
            .assert()
            .success()
            .stdout(predicate::str::starts_with("null"))
            .stderr(predicate::str::contains("is ignored"));
    }

    #[test]
    fn unmatched_file_prints_empty_config() {
        let dir = project();
        let config = print_config(dir.path(), "README.md");

        assert_eq!(config["rules"], serde_json::json!({}));
    }
}

mod path_resolution {
    use super::*;

    /// A `frontend` project next to an empty `backend` directory.
    fn workspace() -> TempDir {
        let temp_dir = TempDir::new().unwrap();
        let frontend = temp_dir.path().join("frontend");
        fs::create_dir_all(frontend.join("src/components")).unwrap();
        fs::create_dir_all(temp_dir.path().join("backend")).unwrap();
        fs::copy(
            fixtures_dir().join("kasane.config.jsonc"),
            frontend.join("kasane.config.jsonc"),
        )
        .unwrap();
        fs::write(frontend.join("src/components/Button.tsx"), "").unwrap();
        temp_dir
    }

    #[test]
    fn resolves_file_reached_through_parent_dir() {
        let temp_dir = workspace();

        kasane_cmd()
            .current_dir(temp_dir.path().join("backend"))
            .args([
                "--config",
                "../frontend/kasane.config.jsonc",
                "rules",
                "../frontend/src/components/Button.tsx",
            ])
            .assert()
            .success()
            .stdout(predicate::str::contains("(matched, 4 rules)"));
    }

    #[test]
    fn resolves_missing_file_reached_through_parent_dir() {
        let temp_dir = workspace();

        kasane_cmd()
            .current_dir(temp_dir.path().join("backend"))
            .args([
                "--config",
                "../frontend/kasane.config.jsonc",
                "rules",
                "../frontend/src/components/../NotYetWritten.tsx",
            ])
            .assert()
            .success()
            .stdout(predicate::str::contains("(matched, 3 rules)"));
    }

    #[cfg(unix)]
    #[test]
    fn resolves_file_through_symlinked_directory() {
        let temp_dir = workspace();
        std::os::unix::fs::symlink(
            temp_dir.path().join("frontend"),
            temp_dir.path().join("link"),
        )
        .unwrap();

        kasane_cmd()
            .current_dir(temp_dir.path())
            .args([
                "--config",
                "link/kasane.config.jsonc",
                "rules",
                "link/src/components/Button.tsx",
            ])
            .assert()
            .success()
            .stdout(predicate::str::contains("(matched, 4 rules)"));
    }

    #[cfg(unix)]
    #[test]
    fn ignores_apply_through_symlinked_directory() {
        let temp_dir = workspace();
        std::os::unix::fs::symlink(
            temp_dir.path().join("frontend"),
            temp_dir.path().join("link"),
        )
        .unwrap();

        kasane_cmd()
            .current_dir(temp_dir.path())
            .args([
                "--config",
                "link/kasane.config.jsonc",
                "print-config",
                "link/dist/bundle.js",
            ])
            .assert()
            .success()
            .stdout(predicate::str::starts_with("null"));
    }
}
