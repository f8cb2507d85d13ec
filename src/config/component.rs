// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use crate::config::consts::MODULE_KEY;
use crate::errors::BuildError;
use serde::de::DeserializeOwned;
use serde_yaml::{Mapping, Value};

/// A component fragment: an ordered mapping that always carries a string `module`.
///
/// Fragments come straight out of a config document section, e.g.
///
/// ```yaml
/// module: euler
/// max_step: 0.25
/// ```
///
/// The `module` value is whatever the user wrote until the builder replaces it
/// with the resolved path; every other key is passed to the provider untouched.
#[derive(Debug, Clone, PartialEq)]
pub struct ComponentConfig {
    module: String,
    fields: Mapping,
}

fn describe(value: &Value) -> String {
    match value {
        Value::Null => "null".to_string(),
        Value::Bool(_) => "a boolean".to_string(),
        Value::Number(_) => "a number".to_string(),
        Value::String(_) => "a string".to_string(),
        Value::Sequence(_) => "a sequence".to_string(),
        Value::Mapping(_) => "a mapping".to_string(),
        Value::Tagged(tagged) => format!("a value tagged {}", tagged.tag),
    }
}

impl ComponentConfig {
    /// Minimal fragment holding only `module`.
    pub fn new(module: impl Into<String>) -> Self {
        let module = module.into();
        let mut fields = Mapping::new();
        fields.insert(Value::from(MODULE_KEY), Value::from(module.as_str()));
        Self { module, fields }
    }

    pub fn from_mapping(fields: Mapping) -> Result<Self, BuildError> {
        let module = match fields.get(MODULE_KEY) {
            None => return Err(BuildError::MissingModule),
            Some(Value::String(module)) => module.clone(),
            Some(other) => {
                return Err(BuildError::InvalidModule {
                    found: describe(other),
                })
            }
        };
        Ok(Self { module, fields })
    }

    pub fn from_value(value: Value) -> Result<Self, BuildError> {
        match value {
            Value::Mapping(fields) => Self::from_mapping(fields),
            other => Err(BuildError::NotAMapping {
                found: describe(&other),
            }),
        }
    }

    /// Add or replace a field, keeping the position of an existing key.
    pub fn with(mut self, key: &str, value: impl Into<Value>) -> Self {
        let value = value.into();
        if key == MODULE_KEY {
            if let Value::String(module) = &value {
                self.module = module.clone();
            }
        }
        self.fields.insert(Value::from(key), value);
        self
    }

    pub fn module(&self) -> &str {
        &self.module
    }

    /// Copy of this fragment with `module` replaced by `module`.
    pub fn with_module(&self, module: &str) -> Self {
        self.clone().with(MODULE_KEY, module)
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.fields.get(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.fields.contains_key(key)
    }

    pub fn mapping(&self) -> &Mapping {
        &self.fields
    }

    /// Every field except `module`.
    pub fn options(&self) -> Mapping {
        let mut options = self.fields.clone();
        options.remove(MODULE_KEY);
        options
    }

    /// Deserialize the fragment into a provider's typed schema.
    ///
    /// The `module` key is present in the input, so schemas that deny unknown
    /// fields need to declare it.
    pub fn parse<T: DeserializeOwned>(&self) -> Result<T, BuildError> {
        serde_yaml::from_value(Value::Mapping(self.fields.clone())).map_err(|e| {
            BuildError::InvalidConfig {
                module: self.module.clone(),
                reason: e.to_string(),
            }
        })
    }

    /// Shorthand for an [`BuildError::InvalidField`] naming this fragment's module.
    pub fn invalid_field(&self, field: &str, reason: impl Into<String>) -> BuildError {
        BuildError::InvalidField {
            module: self.module.clone(),
            field: field.to_string(),
            reason: reason.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    fn mapping(yaml: &str) -> Mapping {
        serde_yaml::from_str(yaml).unwrap()
    }

    #[test]
    fn test_missing_module_is_rejected() {
        let result = ComponentConfig::from_mapping(mapping("beta: 0.3"));
        assert_eq!(result, Err(BuildError::MissingModule));
    }

    #[test]
    fn test_non_string_module_is_rejected() {
        let result = ComponentConfig::from_mapping(mapping("module: 42"));
        assert_eq!(
            result,
            Err(BuildError::InvalidModule {
                found: "a number".to_string()
            })
        );
    }

    #[test]
    fn test_non_mapping_fragment_is_rejected() {
        let result = ComponentConfig::from_value(Value::from("euler"));
        assert!(matches!(result, Err(BuildError::NotAMapping { .. })));
    }

    #[test]
    fn test_with_module_keeps_other_fields_and_order() {
        let config =
            ComponentConfig::from_mapping(mapping("module: sir\nbeta: 0.5\ngamma: 0.2")).unwrap();
        let resolved = config.with_module("flepimop2.system.sir");

        assert_eq!(resolved.module(), "flepimop2.system.sir");
        let keys: Vec<&str> = resolved
            .mapping()
            .keys()
            .filter_map(|k| k.as_str())
            .collect();
        assert_eq!(keys, vec!["module", "beta", "gamma"]);
        assert_eq!(config.module(), "sir");
    }

    #[test]
    fn test_parse_into_schema() {
        #[derive(Deserialize)]
        struct Schema {
            beta: f64,
        }

        let config = ComponentConfig::new("sir").with("beta", 0.5);
        let schema: Schema = config.parse().unwrap();
        assert_eq!(schema.beta, 0.5);

        let bad = ComponentConfig::new("sir").with("beta", "high");
        assert!(matches!(
            bad.parse::<Schema>(),
            Err(BuildError::InvalidConfig { .. })
        ));
    }

    #[test]
    fn test_options_exclude_module() {
        let config = ComponentConfig::new("shell").with("command", "echo hi");
        let options = config.options();
        assert_eq!(options.len(), 1);
        assert!(options.contains_key("command"));
    }
}
