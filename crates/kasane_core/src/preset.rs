//! Preset expansion.
//!
//! A fragment with `extends: ["a", "b"]` expands into the bodies of `a` and
//! `b` (each after its own `extends`) followed by the fragment itself. Every
//! expanded preset takes the extending fragment's `files` and `ignores`.

use std::collections::BTreeMap;

use tracing::debug;

use crate::error::ConfigError;
use crate::fragment::{FragmentBody, FragmentDecl, FragmentLabel};

/// A fragment after preset expansion, before glob compilation.
#[derive(Debug, Clone, PartialEq)]
pub struct ExpandedFragment {
    pub label: FragmentLabel,
    pub files: Vec<String>,
    pub ignores: Vec<String>,
    pub body: FragmentBody,
}

/// Checks that presets carry no scope of their own.
pub fn validate_presets(presets: &BTreeMap<String, FragmentDecl>) -> Result<(), ConfigError> {
    for (name, preset) in presets {
        if !preset.files.is_empty() || !preset.ignores.is_empty() {
            return Err(ConfigError::ScopedPreset {
                preset: name.clone(),
            });
        }
    }
    Ok(())
}

/// Expands `extends` for one declared fragment.
pub fn expand_fragment(
    index: usize,
    decl: &FragmentDecl,
    presets: &BTreeMap<String, FragmentDecl>,
) -> Result<Vec<ExpandedFragment>, ConfigError> {
    let label = FragmentLabel::new(index, decl.name.clone());

    let mut bodies = Vec::new();
    let mut chain = Vec::new();
    collect(&label, &decl.extends, presets, &mut chain, &mut bodies)?;

    let mut expanded: Vec<ExpandedFragment> = bodies
        .into_iter()
        .map(|(preset, body)| {
            let name = match &decl.name {
                Some(parent) => format!("{} > {}", parent, preset),
                None => preset,
            };
            ExpandedFragment {
                label: FragmentLabel::new(index, Some(name)),
                files: decl.files.clone(),
                ignores: decl.ignores.clone(),
                body,
            }
        })
        .collect();

    if !expanded.is_empty() {
        debug!("{} expands into {} preset(s)", label, expanded.len());
    }

    expanded.push(ExpandedFragment {
        label,
        files: decl.files.clone(),
        ignores: decl.ignores.clone(),
        body: decl.body(),
    });

    Ok(expanded)
}

fn collect(
    label: &FragmentLabel,
    names: &[String],
    presets: &BTreeMap<String, FragmentDecl>,
    chain: &mut Vec<String>,
    out: &mut Vec<(String, FragmentBody)>,
) -> Result<(), ConfigError> {
    for name in names {
        if chain.contains(name) {
            let mut cycle = chain.clone();
            cycle.push(name.clone());
            return Err(ConfigError::PresetCycle {
                fragment: label.clone(),
                chain: cycle,
            });
        }

        let preset = presets.get(name).ok_or_else(|| ConfigError::UnknownPreset {
            fragment: label.clone(),
            preset: name.clone(),
        })?;

        chain.push(name.clone());
        collect(label, &preset.extends, presets, chain, out)?;
        chain.pop();

        out.push((name.clone(), preset.body()));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rule::Severity;
    use pretty_assertions::assert_eq;

    fn react_hooks() -> FragmentDecl {
        FragmentDecl::new()
            .plugin("react-hooks", "eslint-plugin-react-hooks")
            .rule("react-hooks/rules-of-hooks", Severity::Error)
            .rule("react-hooks/exhaustive-deps", Severity::Warn)
    }

    #[test]
    fn test_fragment_without_extends_is_unchanged() {
        let decl = FragmentDecl::new()
            .files(["**/*.ts"])
            .rule("no-implicit-coercion", Severity::Error);
        let expanded = expand_fragment(0, &decl, &BTreeMap::new()).unwrap();

        assert_eq!(expanded.len(), 1);
        assert_eq!(expanded[0].files, vec!["**/*.ts".to_string()]);
        assert_eq!(expanded[0].body, decl.body());
    }

    #[test]
    fn test_presets_come_first_and_inherit_scope() {
        let presets = BTreeMap::from([("react-hooks/recommended".to_string(), react_hooks())]);
        let decl = FragmentDecl::new()
            .named("common")
            .files(["**/*.tsx"])
            .ignores(["**/*.stories.tsx"])
            .extends("react-hooks/recommended")
            .rule("react-hooks/exhaustive-deps", Severity::Off);

        let expanded = expand_fragment(4, &decl, &presets).unwrap();

        assert_eq!(expanded.len(), 2);
        assert_eq!(
            expanded[0].label,
            FragmentLabel::new(4, Some("common > react-hooks/recommended".to_string()))
        );
        assert_eq!(expanded[0].files, vec!["**/*.tsx".to_string()]);
        assert_eq!(expanded[0].ignores, vec!["**/*.stories.tsx".to_string()]);
        assert_eq!(expanded[0].body.rules.len(), 2);
        assert_eq!(expanded[1].label, FragmentLabel::new(4, Some("common".to_string())));
    }

    #[test]
    fn test_nested_presets_expand_depth_first() {
        let presets = BTreeMap::from([
            ("base".to_string(), FragmentDecl::new().rule("a", Severity::Warn)),
            (
                "strict".to_string(),
                FragmentDecl::new().extends("base").rule("b", Severity::Error),
            ),
        ]);
        let decl = FragmentDecl::new().extends("strict");

        let expanded = expand_fragment(0, &decl, &presets).unwrap();
        let names: Vec<_> = expanded
            .iter()
            .map(|f| f.label.name.clone().unwrap_or_default())
            .collect();

        assert_eq!(names, vec!["base", "strict", ""]);
    }

    #[test]
    fn test_unknown_preset() {
        let decl = FragmentDecl::new().named("app").extends("missing");
        let err = expand_fragment(1, &decl, &BTreeMap::new()).unwrap_err();

        assert_eq!(err.to_string(), "fragment #1 (\"app\"): unknown preset 'missing'");
    }

    #[test]
    fn test_preset_cycle() {
        let presets = BTreeMap::from([
            ("a".to_string(), FragmentDecl::new().extends("b")),
            ("b".to_string(), FragmentDecl::new().extends("a")),
        ]);
        let decl = FragmentDecl::new().extends("a");

        let err = expand_fragment(0, &decl, &presets).unwrap_err();
        match err {
            ConfigError::PresetCycle { chain, .. } => {
                assert_eq!(chain, vec!["a", "b", "a"]);
            }
            other => panic!("unexpected error: {}", other),
        }
    }

    #[test]
    fn test_same_preset_twice_is_not_a_cycle() {
        let presets = BTreeMap::from([("base".to_string(), react_hooks())]);
        let decl = FragmentDecl::new().extends("base").extends("base");

        let expanded = expand_fragment(0, &decl, &presets).unwrap();
        assert_eq!(expanded.len(), 3);
    }

    #[test]
    fn test_scoped_presets_are_rejected() {
        let presets = BTreeMap::from([(
            "scoped".to_string(),
            FragmentDecl::new().files(["**/*.ts"]),
        )]);

        let err = validate_presets(&presets).unwrap_err();
        assert!(matches!(err, ConfigError::ScopedPreset { preset } if preset == "scoped"));
        assert!(validate_presets(&BTreeMap::new()).is_ok());
    }
}
