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
static RK4: Provider = Provider {
    category: Category::Engine,
    name: "rk4",
    factory: Factory::Engine(build),
};

fn build(config: &ComponentConfig) -> Result<Box<dyn Engine>, BuildError> {
    Ok(Box::new(Rk4Engine::construct(config)?))
}

/// Classic fourth-order Runge-Kutta for flow systems, with the same
/// `max_step` substepping as the Euler engine.
#[derive(Debug)]
pub struct Rk4Engine {
    module: String,
    max_step: Option<f64>,
}

impl Construct for Rk4Engine {
    fn construct(config: &ComponentConfig) -> Result<Self, BuildError> {
        Ok(Self {
            module: config.module().to_string(),
            max_step: max_step(config)?,
        })
    }
}

fn offset(state: &[f64], slope: &[f64], scale: f64) -> Vec<f64> {
    state.iter().zip(slope).map(|(y, k)| y + scale * k).collect()
}

impl Rk4Engine {
    fn advance(
        stepper: &dyn Stepper,
        time: f64,
        state: &mut [f64],
        h: f64,
        params: &Params,
    ) -> Result<(), ExecutionError> {
        let k1 = evaluate(stepper, time, state, params)?;
        let k2 = evaluate(stepper, time + h / 2.0, &offset(state, &k1, h / 2.0), params)?;
        let k3 = evaluate(stepper, time + h / 2.0, &offset(state, &k2, h / 2.0), params)?;
        let k4 = evaluate(stepper, time + h, &offset(state, &k3, h), params)?;

        for (i, value) in state.iter_mut().enumerate() {
            *value += h / 6.0 * (k1[i] + 2.0 * k2[i] + 2.0 * k3[i] + k4[i]);
        }
        Ok(())
    }
}

impl Engine for Rk4Engine {
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
                Self::advance(stepper, start + k as f64 * h, &mut state, h, params)?;
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
