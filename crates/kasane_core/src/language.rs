//! Language and linter options carried by fragments.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize, Serializer};
use serde_json::{Map, Value};

use crate::merge::deep_merge;
use crate::rule::Severity;

/// How a declared global variable may be used.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", try_from = "Value")]
pub enum GlobalAccess {
    /// Global may be read but not assigned.
    Readonly,
    /// Global may be read and assigned.
    Writable,
    /// Global is explicitly unavailable.
    Off,
}

impl TryFrom<Value> for GlobalAccess {
    type Error = String;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        match &value {
            Value::Bool(false) => Ok(GlobalAccess::Readonly),
            Value::Bool(true) => Ok(GlobalAccess::Writable),
            Value::String(s) => match s.as_str() {
                "readonly" | "readable" => Ok(GlobalAccess::Readonly),
                "writable" | "writeable" => Ok(GlobalAccess::Writable),
                "off" => Ok(GlobalAccess::Off),
                other => Err(format!(
                    "invalid global access '{}' (expected \"readonly\", \"writable\" or \"off\")",
                    other
                )),
            },
            other => Err(format!("invalid global access {}", other)),
        }
    }
}

/// ECMAScript version a file is parsed as.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(try_from = "Value")]
pub enum EcmaVersion {
    /// Most recent supported version.
    Latest,
    /// A specific edition, normalised to its year (`6` becomes `2015`).
    Year(u16),
}

impl TryFrom<Value> for EcmaVersion {
    type Error = String;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        match &value {
            Value::String(s) if s == "latest" => Ok(EcmaVersion::Latest),
            Value::Number(n) => match n.as_u64() {
                Some(v @ (3 | 5)) => Ok(EcmaVersion::Year(v as u16)),
                Some(v @ 6..=99) => Ok(EcmaVersion::Year(v as u16 + 2009)),
                Some(v @ 2015..=9999) => Ok(EcmaVersion::Year(v as u16)),
                _ => Err(format!("invalid ecmaVersion {}", n)),
            },
            other => Err(format!(
                "invalid ecmaVersion {} (expected \"latest\" or a version number)",
                other
            )),
        }
    }
}

impl Serialize for EcmaVersion {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            EcmaVersion::Latest => serializer.serialize_str("latest"),
            EcmaVersion::Year(year) => serializer.serialize_u16(*year),
        }
    }
}

impl fmt::Display for EcmaVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EcmaVersion::Latest => f.write_str("latest"),
            EcmaVersion::Year(year) => write!(f, "{}", year),
        }
    }
}

/// Module system of a source file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceType {
    Script,
    Module,
    Commonjs,
}

/// Parser selection and parsing environment.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct LanguageOptions {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ecma_version: Option<EcmaVersion>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_type: Option<SourceType>,

    /// Parser identifier, e.g. `typescript-eslint/parser`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parser: Option<String>,

    #[serde(default, skip_serializing_if = "Map::is_empty")]
    pub parser_options: Map<String, Value>,

    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub globals: BTreeMap<String, GlobalAccess>,
}

impl LanguageOptions {
    /// Returns whether nothing is set.
    pub fn is_empty(&self) -> bool {
        self.ecma_version.is_none()
            && self.source_type.is_none()
            && self.parser.is_none()
            && self.parser_options.is_empty()
            && self.globals.is_empty()
    }

    /// Overlays later-declared options onto these.
    ///
    /// Scalars are last-writer-wins, `parserOptions` merge recursively and
    /// `globals` are unioned (last writer wins per name).
    pub fn overlay(&mut self, later: &LanguageOptions) {
        if later.ecma_version.is_some() {
            self.ecma_version = later.ecma_version;
        }
        if later.source_type.is_some() {
            self.source_type = later.source_type;
        }
        if let Some(parser) = &later.parser {
            self.parser = Some(parser.clone());
        }
        deep_merge(&mut self.parser_options, &later.parser_options);
        for (name, access) in &later.globals {
            self.globals.insert(name.clone(), *access);
        }
    }
}

/// Options controlling the engine itself rather than individual rules.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct LinterOptions {
    /// Disallow inline configuration comments.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub no_inline_config: Option<bool>,

    /// Severity for unused disable directives.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub report_unused_disable_directives: Option<Severity>,
}

impl LinterOptions {
    pub fn is_empty(&self) -> bool {
        self.no_inline_config.is_none() && self.report_unused_disable_directives.is_none()
    }

    pub fn overlay(&mut self, later: &LinterOptions) {
        if later.no_inline_config.is_some() {
            self.no_inline_config = later.no_inline_config;
        }
        if later.report_unused_disable_directives.is_some() {
            self.report_unused_disable_directives = later.report_unused_disable_directives;
        }
    }
}
