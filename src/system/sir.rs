// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use crate::builder::Construct;
use crate::config::ComponentConfig;
use crate::errors::{BuildError, StepError};
use crate::registry::{Category, Factory, Provider, PROVIDERS};
use crate::traits::{Params, StateChange, System};
use linkme::distributed_slice;
use serde::Deserialize;
use serde_yaml::Mapping;

#[distributed_slice(PROVIDERS)]
static SIR: Provider = Provider {
    category: Category::System,
    name: "sir",
    factory: Factory::System(build),
};

fn build(config: &ComponentConfig) -> Result<Box<dyn System>, BuildError> {
    Ok(Box::new(SirSystem::construct(config)?))
}

fn default_beta() -> f64 {
    0.3
}

fn default_gamma() -> f64 {
    0.1
}

#[derive(Deserialize)]
struct SirConfig {
    #[serde(default = "default_beta")]
    beta: f64,
    #[serde(default = "default_gamma")]
    gamma: f64,
}

/// Susceptible/infected/recovered compartments with frequency-dependent
/// transmission. State is `[S, I, R]`; `beta` and `gamma` in run parameters
/// override the configured rates.
///
/// ```yaml
/// module: sir
/// beta: 0.3
/// gamma: 0.1
/// ```
#[derive(Debug)]
pub struct SirSystem {
    module: String,
    beta: f64,
    gamma: f64,
    options: Mapping,
}

impl Construct for SirSystem {
    fn construct(config: &ComponentConfig) -> Result<Self, BuildError> {
        let parsed: SirConfig = config.parse()?;
        for (field, value) in [("beta", parsed.beta), ("gamma", parsed.gamma)] {
            if !(value.is_finite() && value >= 0.0) {
                return Err(config.invalid_field(
                    field,
                    format!("must be a non-negative finite rate, got {}", value),
                ));
            }
        }
        Ok(Self {
            module: config.module().to_string(),
            beta: parsed.beta,
            gamma: parsed.gamma,
            options: config.options(),
        })
    }
}

impl System for SirSystem {
    fn module(&self) -> &str {
        &self.module
    }

    fn state_change(&self) -> StateChange {
        StateChange::Flow
    }

    fn step(&self, _time: f64, state: &[f64], params: &Params) -> Result<Vec<f64>, StepError> {
        let [s, i, r] = state else {
            return Err(StepError::StateLength {
                expected: 3,
                actual: state.len(),
            });
        };
        let beta = params.get("beta").copied().unwrap_or(self.beta);
        let gamma = params.get("gamma").copied().unwrap_or(self.gamma);

        let population = s + i + r;
        let infection = if population > 0.0 {
            beta * s * i / population
        } else {
            0.0
        };
        let recovery = gamma * i;

        Ok(vec![-infection, infection - recovery, recovery])
    }

    fn options(&self) -> Option<&Mapping> {
        Some(&self.options)
    }
}
