//! Rule severities and rule entries.

use std::fmt;
use std::str::FromStr;

use serde::ser::SerializeSeq;
use serde::{Deserialize, Serialize, Serializer};
use serde_json::Value;

/// Severity level of a configured rule.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase", try_from = "Value")]
pub enum Severity {
    /// Rule is disabled.
    #[default]
    Off,
    /// Rule reports warnings.
    Warn,
    /// Rule reports errors.
    Error,
}

impl Severity {
    /// Returns the lowercase name of this severity.
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Off => "off",
            Severity::Warn => "warn",
            Severity::Error => "error",
        }
    }

    /// Returns the numeric level (0, 1, 2).
    pub fn level(&self) -> u8 {
        match self {
            Severity::Off => 0,
            Severity::Warn => 1,
            Severity::Error => 2,
        }
    }

    /// Returns whether a rule with this severity is enforced.
    pub fn is_enabled(&self) -> bool {
        *self != Severity::Off
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

impl FromStr for Severity {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "off" => Ok(Severity::Off),
            "warn" => Ok(Severity::Warn),
            "error" => Ok(Severity::Error),
            other => Err(format!(
                "invalid severity '{}' (expected \"off\", \"warn\", \"error\", 0, 1 or 2)",
                other
            )),
        }
    }
}

impl TryFrom<Value> for Severity {
    type Error = String;

    fn try_from(value: Value) -> Result<Self, String> {
        Severity::try_from(&value)
    }
}

impl TryFrom<&Value> for Severity {
    type Error = String;

    fn try_from(value: &Value) -> Result<Self, String> {
        match value {
            Value::String(s) => s.parse(),
            Value::Number(n) => match n.as_u64() {
                Some(0) => Ok(Severity::Off),
                Some(1) => Ok(Severity::Warn),
                Some(2) => Ok(Severity::Error),
                _ => Err(format!("invalid severity level {} (expected 0, 1 or 2)", n)),
            },
            other => Err(format!("invalid severity {}", other)),
        }
    }
}

/// Configuration of a single rule: a severity plus optional rule options.
///
/// Declared either as a bare severity (`"error"`, `2`) or as an array whose
/// first element is the severity (`["error", { "max": 3 }]`). Always
/// serialized in the array form.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(try_from = "Value")]
pub struct RuleEntry {
    pub severity: Severity,
    pub options: Vec<Value>,
}

impl RuleEntry {
    /// Creates an entry without options.
    pub fn new(severity: Severity) -> Self {
        Self {
            severity,
            options: Vec::new(),
        }
    }

    /// Creates an entry with options.
    pub fn with_options(severity: Severity, options: Vec<Value>) -> Self {
        Self { severity, options }
    }

    /// Returns whether the rule is enforced.
    pub fn is_enabled(&self) -> bool {
        self.severity.is_enabled()
    }

    /// Overlays a later-declared entry onto this one.
    ///
    /// The severity always comes from `later`. Options are replaced only when
    /// `later` declares its own; a severity-only entry keeps existing options.
    pub fn overlay(&mut self, later: &RuleEntry) {
        self.severity = later.severity;
        if !later.options.is_empty() {
            self.options = later.options.clone();
        }
    }
}

impl From<Severity> for RuleEntry {
    fn from(severity: Severity) -> Self {
        Self::new(severity)
    }
}

impl TryFrom<Value> for RuleEntry {
    type Error = String;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        match value {
            Value::Array(items) => {
                let mut items = items.into_iter();
                let severity = items
                    .next()
                    .ok_or_else(|| "rule configuration array must start with a severity".to_string())
                    .and_then(Severity::try_from)?;
                Ok(Self {
                    severity,
                    options: items.collect(),
                })
            }
            other => Ok(Self::new(Severity::try_from(other)?)),
        }
    }
}

impl Serialize for RuleEntry {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut seq = serializer.serialize_seq(Some(self.options.len() + 1))?;
        seq.serialize_element(&self.severity)?;
        for option in &self.options {
            seq.serialize_element(option)?;
        }
        seq.end()
    }
}

/// Returns the plugin namespace of a rule name.
///
/// The namespace is everything before the last `/`, so
/// `@typescript-eslint/no-explicit-any` belongs to `@typescript-eslint`
/// and `no-implicit-coercion` (a core rule) has none.
pub fn rule_namespace(rule: &str) -> Option<&str> {
    rule.rsplit_once('/')
        .map(|(namespace, _)| namespace)
        .filter(|namespace| !namespace.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;
    use serde_json::json;

    #[rstest]
    #[case(json!("off"), Severity::Off)]
    #[case(json!("warn"), Severity::Warn)]
    #[case(json!("error"), Severity::Error)]
    #[case(json!(0), Severity::Off)]
    #[case(json!(1), Severity::Warn)]
    #[case(json!(2), Severity::Error)]
    fn test_severity_spellings(#[case] value: Value, #[case] expected: Severity) {
        assert_eq!(Severity::try_from(value).unwrap(), expected);
    }

    #[rstest]
    #[case(json!("warning"))]
    #[case(json!(3))]
    #[case(json!(-1))]
    #[case(json!(true))]
    #[case(json!(null))]
    fn test_severity_rejects(#[case] value: Value) {
        assert!(Severity::try_from(value).is_err());
    }

    #[test]
    fn test_severity_display_pads() {
        assert_eq!(format!("{:<5}|", Severity::Off), "off  |");
        assert_eq!(Severity::Warn.to_string(), "warn");
        assert_eq!(Severity::Error.level(), 2);
    }

    #[test]
    fn test_rule_entry_from_bare_severity() {
        let entry: RuleEntry = serde_json::from_value(json!("warn")).unwrap();
        assert_eq!(entry, RuleEntry::new(Severity::Warn));
        assert!(entry.is_enabled());
    }

    #[test]
    fn test_rule_entry_from_array() {
        let entry: RuleEntry =
            serde_json::from_value(json!(["error", { "allowConstantExport": true }])).unwrap();
        assert_eq!(entry.severity, Severity::Error);
        assert_eq!(entry.options, vec![json!({ "allowConstantExport": true })]);
    }

    #[test]
    fn test_rule_entry_empty_array_is_rejected() {
        let result: Result<RuleEntry, _> = serde_json::from_value(json!([]));
        let err = result.unwrap_err().to_string();
        assert!(err.contains("must start with a severity"), "{}", err);
    }

    #[test]
    fn test_rule_entry_serializes_as_array() {
        let entry = RuleEntry::with_options(Severity::Error, vec![json!("type")]);
        assert_eq!(serde_json::to_value(&entry).unwrap(), json!(["error", "type"]));
        assert_eq!(
            serde_json::to_value(RuleEntry::new(Severity::Off)).unwrap(),
            json!(["off"])
        );
    }

    #[test]
    fn test_overlay_severity_only_keeps_options() {
        let mut entry = RuleEntry::with_options(Severity::Error, vec![json!({ "max": 3 })]);
        entry.overlay(&RuleEntry::new(Severity::Warn));

        assert_eq!(entry.severity, Severity::Warn);
        assert_eq!(entry.options, vec![json!({ "max": 3 })]);
    }

    #[test]
    fn test_overlay_with_options_replaces() {
        let mut entry = RuleEntry::with_options(Severity::Error, vec![json!({ "max": 3 })]);
        entry.overlay(&RuleEntry::with_options(
            Severity::Error,
            vec![json!({ "min": 1 })],
        ));

        assert_eq!(entry.options, vec![json!({ "min": 1 })]);
    }

    #[rstest]
    #[case("no-implicit-coercion", None)]
    #[case("react/prop-types", Some("react"))]
    #[case("@typescript-eslint/no-explicit-any", Some("@typescript-eslint"))]
    #[case("@scope/plugin/rule", Some("@scope/plugin"))]
    #[case("/rule", None)]
    fn test_rule_namespace(#[case] rule: &str, #[case] expected: Option<&str>) {
        assert_eq!(rule_namespace(rule), expected);
    }
}
