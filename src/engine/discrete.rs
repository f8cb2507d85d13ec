// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use crate::builder::Construct;
use crate::config::ComponentConfig;
use crate::engine::{check_inputs, ensure_finite, evaluate, require_state_change};
use crate::errors::{BuildError, ExecutionError};
use crate::registry::{Category, Factory, Provider, PROVIDERS};
use crate::traits::{Compatibility, Engine, Params, StateChange, Stepper, System};
use crate::trajectory::Trajectory;
use linkme::distributed_slice;
use serde::Deserialize;

#[distributed_slice(PROVIDERS)]
static DISCRETE: Provider = Provider {
    category: Category::Engine,
    name: "discrete",
    factory: Factory::Engine(build),
};

fn build(config: &ComponentConfig) -> Result<Box<dyn Engine>, BuildError> {
    Ok(Box::new(DiscreteEngine::construct(config)?))
}

#[derive(Deserialize)]
struct DiscreteConfig {
    state_change: StateChange,
}

/// Applies a delta or state system once per interval, evaluated at the
/// interval's start time.
///
/// ```yaml
/// module: discrete
/// state_change: delta
/// ```
#[derive(Debug)]
pub struct DiscreteEngine {
    module: String,
    state_change: StateChange,
}

impl Construct for DiscreteEngine {
    fn construct(config: &ComponentConfig) -> Result<Self, BuildError> {
        let parsed: DiscreteConfig = config.parse()?;
        if parsed.state_change == StateChange::Flow {
            return Err(config.invalid_field(
                "state_change",
                "discrete stepping applies delta or state output, not flow",
            ));
        }
        Ok(Self {
            module: config.module().to_string(),
            state_change: parsed.state_change,
        })
    }
}

impl Engine for DiscreteEngine {
    fn module(&self) -> &str {
        &self.module
    }

    fn run(
        &self,
        stepper: &dyn Stepper,
        times: &[f64],
        initial_state: &[f64],
        params: &Params,
    ) -> Result<Trajectory, ExecutionError> {
        check_inputs(times, initial_state)?;

        let mut trajectory = Trajectory::zeros(times.len(), initial_state.len());
        trajectory.set_row(0, initial_state);
        let mut state = initial_state.to_vec();

        for (index, window) in times.windows(2).enumerate() {
            let output = evaluate(stepper, window[0], &state, params)?;
            match self.state_change {
                StateChange::Delta => {
                    for (value, delta) in state.iter_mut().zip(&output) {
                        *value += delta;
                    }
                }
                _ => state = output,
            }
            ensure_finite(window[1], &state)?;
            trajectory.set_row(index + 1, &state);
        }

        Ok(trajectory)
    }

    fn validate_system(&self, system: &dyn System) -> Compatibility {
        require_state_change(&self.module, self.state_change, system)
            .into_iter()
            .collect::<Vec<_>>()
            .into()
    }
}
