//! Configuration file loading.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use jsonc_parser::ParseOptions;
use jsonschema::Validator;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, info};

use crate::error::ConfigError;
use crate::fragment::{FragmentDecl, FragmentLabel};
use crate::resolver::ConfigArray;

// Embed the schema
const SCHEMA_JSON: &str = include_str!("../../../schemas/v1/config.json");
static CONFIG_SCHEMA: OnceLock<Validator> = OnceLock::new();

/// A parsed configuration file.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ConfigFile {
    /// Named presets available to `extends`.
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub presets: BTreeMap<String, FragmentDecl>,

    /// Fragments in cascade order.
    pub fragments: Vec<FragmentDecl>,

    /// Directory patterns are relative to.
    /// This is usually the directory containing the configuration file.
    #[serde(skip)]
    pub base_dir: Option<PathBuf>,
}

#[derive(Deserialize)]
struct RawConfigFile {
    #[serde(default)]
    presets: BTreeMap<String, Value>,
    #[serde(default)]
    fragments: Vec<Value>,
}

impl ConfigFile {
    /// Recognised file names, in discovery priority.
    pub const CONFIG_FILES: &'static [&'static str] = &[
        "kasane.config.jsonc",
        "kasane.config.json",
        ".kasane.jsonc",
        ".kasane.json",
    ];

    pub fn new() -> Self {
        Self::default()
    }

    /// Finds the nearest configuration file in `start` or its ancestors.
    pub fn discover(start: impl AsRef<Path>) -> Option<PathBuf> {
        let start = start.as_ref();
        let start = start.canonicalize().unwrap_or_else(|_| start.to_path_buf());

        for dir in start.ancestors() {
            for name in Self::CONFIG_FILES {
                let candidate = dir.join(name);
                if candidate.is_file() {
                    debug!("Found config: {}", candidate.display());
                    return Some(candidate);
                }
            }
        }
        None
    }

    /// Loads configuration from a file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        let mut config = Self::from_jsonc(&content)?;

        let absolute = path.canonicalize().unwrap_or_else(|_| path.to_path_buf());
        config.base_dir = absolute.parent().map(Path::to_path_buf);

        info!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// Parses configuration from JSONC (comments and trailing commas allowed).
    pub fn from_jsonc(content: &str) -> Result<Self, ConfigError> {
        let value = jsonc_parser::parse_to_serde_value(content, &ParseOptions::default())
            .map_err(|e| ConfigError::parse(e.to_string()))?
            .unwrap_or_else(|| Value::Object(serde_json::Map::new()));

        Self::from_value(value)
    }

    /// Builds configuration from a JSON value with schema validation.
    pub fn from_value(value: Value) -> Result<Self, ConfigError> {
        let schema = CONFIG_SCHEMA.get_or_init(|| {
            let schema_json: Value =
                serde_json::from_str(SCHEMA_JSON).expect("Invalid embedded config schema");
            Validator::new(&schema_json).expect("Invalid config schema compilation")
        });

        if let Err(e) = schema.validate(&value) {
            let location = e.instance_path().to_string();
            let message = format!("{} at {}", e, location);
            return Err(match schema_fragment(&value, &location) {
                Some(fragment) => ConfigError::FragmentSchema { fragment, message },
                None => ConfigError::Schema(message),
            });
        }

        let raw: RawConfigFile = serde_json::from_value(value)
            .map_err(|e| ConfigError::config(format!("Invalid config: {}", e)))?;

        let presets = raw
            .presets
            .into_iter()
            .map(|(name, value)| {
                serde_json::from_value(value)
                    .map(|decl| (name.clone(), decl))
                    .map_err(|e| ConfigError::config(format!("preset '{}': {}", name, e)))
            })
            .collect::<Result<BTreeMap<_, _>, _>>()?;

        let fragments = raw
            .fragments
            .into_iter()
            .enumerate()
            .map(|(index, value)| {
                let name = value
                    .get("name")
                    .and_then(Value::as_str)
                    .map(str::to_string);
                serde_json::from_value(value).map_err(|e| {
                    ConfigError::invalid_fragment(FragmentLabel::new(index, name), e.to_string())
                })
            })
            .collect::<Result<Vec<FragmentDecl>, _>>()?;

        Ok(Self {
            presets,
            fragments,
            base_dir: None,
        })
    }

    /// Validates the fragments and builds the resolver.
    pub fn into_array(self) -> Result<ConfigArray, ConfigError> {
        let array = ConfigArray::with_presets(self.fragments, &self.presets)?;
        Ok(match self.base_dir {
            Some(dir) => array.with_base_dir(dir),
            None => array,
        })
    }

    /// Reads, validates and builds the resolver in one step.
    pub fn load(path: impl AsRef<Path>) -> Result<ConfigArray, ConfigError> {
        Self::from_file(path)?.into_array()
    }
}

/// Labels the fragment a schema error location points into.
fn schema_fragment(value: &Value, location: &str) -> Option<FragmentLabel> {
    let index: usize = location
        .strip_prefix("/fragments/")?
        .split('/')
        .next()?
        .parse()
        .ok()?;
    let name = value
        .pointer(&format!("/fragments/{}/name", index))
        .and_then(Value::as_str)
        .map(str::to_string);
    Some(FragmentLabel::new(index, name))
}
