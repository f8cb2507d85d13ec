// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use crate::builder::Construct;
use crate::config::ComponentConfig;
use crate::engine::{check_inputs, ensure_finite, evaluate, max_step, require_state_change, substeps};
use crate::errors::{BuildError, ExecutionError};
use crate::registry::{Category, Factory, Provider, PROVIDERS};
use crate::traits::{Compatibility, Engine, Params, StateChange, Stepper, System};
use crate::trajectory::Trajectory;
use linkme::distributed_slice;

#[distributed_slice(PROVIDERS)]
static EULER: Provider = Provider {
    category: Category::Engine,
    name: "euler",
    factory: Factory::Engine(build),
};

fn build(config: &ComponentConfig) -> Result<Box<dyn Engine>, BuildError> {
    Ok(Box::new(EulerEngine::construct(config)?))
}

/// Forward Euler integration of flow systems.
///
/// Each interval between evaluation times is split into equal substeps no
/// longer than `max_step` (one substep when unset).
#[derive(Debug)]
pub struct EulerEngine {
    module: String,
    max_step: Option<f64>,
}

impl Construct for EulerEngine {
    fn construct(config: &ComponentConfig) -> Result<Self, BuildError> {
        Ok(Self {
            module: config.module().to_string(),
            max_step: max_step(config)?,
        })
    }
}

impl Engine for EulerEngine {
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
            let (start, end) = (window[0], window[1]);
            let count = substeps(end - start, self.max_step)?;
            let h = (end - start) / count as f64;

            for k in 0..count {
                let time = start + k as f64 * h;
                let rate = evaluate(stepper, time, &state, params)?;
                for (value, slope) in state.iter_mut().zip(&rate) {
                    *value += h * slope;
                }
            }

            ensure_finite(end, &state)?;
            trajectory.set_row(index + 1, &state);
        }

        Ok(trajectory)
    }

    fn validate_system(&self, system: &dyn System) -> Compatibility {
        require_state_change(&self.module, StateChange::Flow, system)
            .into_iter()
            .collect::<Vec<_>>()
            .into()
    }
}
