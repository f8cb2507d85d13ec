// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use crate::config::consts::DEFAULT_SECTION_KEY;
use crate::config::validation::validate_config;
use crate::config::{ComponentConfig, SimulateSpec};
use crate::errors::{BuildError, ConfigError};
use crate::parameter::Groups;
use indexmap::IndexMap;
use serde::de::{DeserializeOwned, Error as _};
use serde::{Deserialize, Deserializer};
use serde_yaml::{Mapping, Value};
use std::fs;
use std::path::Path;

/// Named component fragments of one section. Values stay raw until built.
pub type ModuleGroup = IndexMap<String, Value>;

/// Top-level configuration document.
///
/// Sections name their entries; `simulate` entries refer to those names.
/// Each section also accepts its singular spelling, and a section written
/// as a list is read as `{default: <first entry>}`.
///
/// # Example
/// ```yaml
/// name: sir_demo
/// system:
///   - module: sir
/// engine:
///   - module: euler
///     max_step: 0.25
/// backend:
///   - module: csv
/// parameters:
///   beta_high: 0.5
///   gamma: { module: fixed, value: 0.1 }
/// groups:
///   high: { beta: beta_high }
/// simulate:
///   baseline:
///     engine: default
///     system: default
///     backend: default
///     times: "0:100"
///     initial_state: [999, 1, 0]
///     groups: [high]
/// ```
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default, alias = "system", deserialize_with = "keyed_or_list")]
    pub systems: ModuleGroup,
    #[serde(default, alias = "engine", deserialize_with = "keyed_or_list")]
    pub engines: ModuleGroup,
    #[serde(default, alias = "backend", deserialize_with = "keyed_or_list")]
    pub backends: ModuleGroup,
    #[serde(default, alias = "processes", deserialize_with = "keyed_or_list")]
    pub process: ModuleGroup,
    #[serde(default, alias = "parameter", deserialize_with = "keyed_or_list")]
    pub parameters: IndexMap<String, ParameterSpec>,
    #[serde(default, alias = "group")]
    pub groups: Groups,
    #[serde(default, deserialize_with = "keyed_or_list")]
    pub simulate: IndexMap<String, SimulateSpec>,
}

fn keyed_or_list<'de, D, T>(deserializer: D) -> Result<IndexMap<String, T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let section = match Value::deserialize(deserializer)? {
        Value::Null => Mapping::new(),
        Value::Mapping(entries) => entries,
        Value::Sequence(entries) => entries
            .into_iter()
            .take(1)
            .map(|entry| (Value::from(DEFAULT_SECTION_KEY), entry))
            .collect(),
        _ => return Err(D::Error::custom("expected a mapping or a list")),
    };
    serde_yaml::from_value(Value::Mapping(section)).map_err(D::Error::custom)
}

/// A `parameters` entry: a bare number or a parameter module fragment.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum ParameterSpec {
    Value(f64),
    Module(Value),
}

impl ParameterSpec {
    /// Bare numbers become `{module: fixed, value: n}`.
    pub fn to_component(&self) -> Result<ComponentConfig, BuildError> {
        match self {
            ParameterSpec::Value(value) => Ok(ComponentConfig::new("fixed").with("value", *value)),
            ParameterSpec::Module(raw) => ComponentConfig::from_value(raw.clone()),
        }
    }
}

impl Config {
    pub fn parameter_components(&self) -> Result<IndexMap<String, ComponentConfig>, BuildError> {
        self.parameters
            .iter()
            .map(|(name, spec)| Ok((name.clone(), spec.to_component()?)))
            .collect()
    }

    pub fn target_names(&self) -> Vec<String> {
        self.simulate.keys().cloned().collect()
    }

    /// The named simulate target, or the only one when no name is given.
    pub fn select_target(&self, target: Option<&str>) -> Result<(&str, &SimulateSpec), ConfigError> {
        match target {
            Some(name) => self
                .simulate
                .get_key_value(name)
                .map(|(key, spec)| (key.as_str(), spec))
                .ok_or_else(|| ConfigError::TargetNotFound {
                    target: name.to_string(),
                    available: self.target_names(),
                }),
            None => match self.simulate.len() {
                0 => Err(ConfigError::NoTargets),
                1 => self
                    .simulate
                    .get_index(0)
                    .map(|(key, spec)| (key.as_str(), spec))
                    .ok_or(ConfigError::NoTargets),
                _ => Err(ConfigError::AmbiguousTarget {
                    available: self.target_names(),
                }),
            },
        }
    }
}

/// Supported document encodings, chosen by file extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigFormat {
    Yaml,
    Toml,
}

impl ConfigFormat {
    pub fn from_path(path: &Path) -> Result<Self, ConfigError> {
        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase)
            .unwrap_or_default();
        match extension.as_str() {
            "yaml" | "yml" => Ok(ConfigFormat::Yaml),
            "toml" => Ok(ConfigFormat::Toml),
            _ => Err(ConfigError::UnsupportedFormat(path.display().to_string())),
        }
    }
}

pub fn parse_config(content: &str, format: ConfigFormat) -> Result<Config, ConfigError> {
    Ok(match format {
        ConfigFormat::Yaml => serde_yaml::from_str(content)?,
        ConfigFormat::Toml => toml::from_str(content)?,
    })
}

/// Load a config from a `.yaml`, `.yml` or `.toml` file.
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<Config, ConfigError> {
    let path = path.as_ref();
    let format = ConfigFormat::from_path(path)?;
    let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse_config(&content, format)
}

/// Load a config and report every validation problem at once.
pub fn load_and_validate_config<P: AsRef<Path>>(path: P) -> Result<Config, ConfigError> {
    let config = load_config(path)?;
    validate_config(&config).map_err(ConfigError::Invalid)?;
    Ok(config)
}
