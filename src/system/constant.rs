// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use crate::builder::Construct;
use crate::config::ComponentConfig;
use crate::errors::{BuildError, StepError};
use crate::registry::{Category, Factory, Provider, PROVIDERS};
use crate::traits::{Params, StateChange, System};
use linkme::distributed_slice;
use serde::Deserialize;

#[distributed_slice(PROVIDERS)]
static CONSTANT: Provider = Provider {
    category: Category::System,
    name: "constant",
    factory: Factory::System(build),
};

fn build(config: &ComponentConfig) -> Result<Box<dyn System>, BuildError> {
    Ok(Box::new(ConstantSystem::construct(config)?))
}

#[derive(Deserialize)]
struct ConstantConfig {
    rates: Vec<f64>,
}

/// Flow system with a fixed rate per state variable.
#[derive(Debug)]
pub struct ConstantSystem {
    module: String,
    rates: Vec<f64>,
}

impl Construct for ConstantSystem {
    fn construct(config: &ComponentConfig) -> Result<Self, BuildError> {
        let parsed: ConstantConfig = config.parse()?;
        if parsed.rates.is_empty() {
            return Err(config.invalid_field("rates", "at least one rate is required"));
        }
        if parsed.rates.iter().any(|r| !r.is_finite()) {
            return Err(config.invalid_field("rates", "rates must be finite"));
        }
        Ok(Self {
            module: config.module().to_string(),
            rates: parsed.rates,
        })
    }
}

impl System for ConstantSystem {
    fn module(&self) -> &str {
        &self.module
    }

    fn state_change(&self) -> StateChange {
        StateChange::Flow
    }

    fn step(&self, _time: f64, state: &[f64], _params: &Params) -> Result<Vec<f64>, StepError> {
        if state.len() != self.rates.len() {
            return Err(StepError::StateLength {
                expected: self.rates.len(),
                actual: state.len(),
            });
        }
        Ok(self.rates.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_construct_table_driven() {
        struct TestCase {
            name: &'static str,
            yaml: &'static str,
            valid: bool,
        }

        let test_cases = vec![
            TestCase {
                name: "two rates",
                yaml: "module: flepimop2.system.constant\nrates: [1.0, -0.5]",
                valid: true,
            },
            TestCase {
                name: "missing rates",
                yaml: "module: flepimop2.system.constant",
                valid: false,
            },
            TestCase {
                name: "empty rates",
                yaml: "module: flepimop2.system.constant\nrates: []",
                valid: false,
            },
            TestCase {
                name: "infinite rate",
                yaml: "module: flepimop2.system.constant\nrates: [.inf]",
                valid: false,
            },
        ];

        for test_case in test_cases {
            let config = ComponentConfig::from_mapping(serde_yaml::from_str(test_case.yaml).unwrap()).unwrap();
            assert_eq!(
                ConstantSystem::construct(&config).is_ok(),
                test_case.valid,
                "Test case '{}' failed",
                test_case.name
            );
        }
    }

    #[test]
    fn test_step_returns_rates() {
        let config = ComponentConfig::new("flepimop2.system.constant").with("rates", vec![2.0, 3.0]);
        let system = ConstantSystem::construct(&config).unwrap();
        assert_eq!(system.step(1.0, &[0.0, 0.0], &Params::new()).unwrap(), vec![2.0, 3.0]);
        assert!(system.step(1.0, &[0.0], &Params::new()).is_err());
    }
}
