// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Resolve -> build -> validate -> run -> persist.
//!
//! A [`Simulator`] owns one system, one engine and one backend. The engine's
//! compatibility check runs exactly once, before any stepping:
//!
//! ```text
//! Built --validate--> Validated --run--> Running --> Complete
//!   |                                        |
//!   +--> Rejected (incompatible)             +--> Failed
//! ```
//!
//! A completed or failed simulator may run again with new inputs; a rejected
//! one never steps.

#[cfg(test)]
mod integration_tests;

use crate::builder::Builder;
use crate::config::{Config, ModuleGroup};
use crate::engine::check_inputs;
use crate::errors::{ConfigError, ExecutionError, IncompatibleComponents, PipelineError};
use crate::meta::RunMeta;
use crate::observability::messages::simulation::{
    CompatibilityChecked, SimulationCompleted, SimulationStarted, TrajectorySaved,
};
use crate::observability::messages::StructuredLog;
use crate::parameter::ParameterCollection;
use crate::traits::{Backend, Compatibility, Engine, Params, System, SystemStepper};
use crate::trajectory::Trajectory;
use serde_yaml::Value;
use std::time::Instant;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunState {
    Built,
    Validated,
    Rejected,
    Running,
    Complete,
    Failed,
}

/// Inputs taken from a config's simulate target.
pub struct SimulationPlan {
    pub target: String,
    pub times: Vec<f64>,
    pub initial_state: Option<Vec<f64>>,
    /// Explicit overrides applied on top of the realized parameters
    pub params: Params,
    pub parameters: ParameterCollection,
}

pub struct Simulator {
    system: Box<dyn System>,
    engine: Box<dyn Engine>,
    backend: Box<dyn Backend>,
    compatibility: Option<Compatibility>,
    state: RunState,
    plan: Option<SimulationPlan>,
}

impl Simulator {
    /// Hold the components without validating them.
    pub fn assemble(
        system: Box<dyn System>,
        engine: Box<dyn Engine>,
        backend: Box<dyn Backend>,
    ) -> Self {
        Self {
            system,
            engine,
            backend,
            compatibility: None,
            state: RunState::Built,
            plan: None,
        }
    }

    /// Assemble and validate; an incompatible pair is rejected here.
    pub fn new(
        system: Box<dyn System>,
        engine: Box<dyn Engine>,
        backend: Box<dyn Backend>,
    ) -> Result<Self, IncompatibleComponents> {
        let mut simulator = Self::assemble(system, engine, backend);
        simulator.validate()?;
        Ok(simulator)
    }

    /// Build every component of one simulate target from a config.
    ///
    /// `target` may be omitted when the config defines exactly one.
    pub fn from_config(config: &Config, target: Option<&str>) -> Result<Self, PipelineError> {
        Self::from_config_with(&Builder::global(), config, target)
    }

    pub fn from_config_with(
        builder: &Builder<'_>,
        config: &Config,
        target: Option<&str>,
    ) -> Result<Self, PipelineError> {
        let (name, spec) = config.select_target(target)?;

        let system = builder.build_value::<dyn System>(section_entry(
            name,
            "system",
            &spec.system,
            &config.systems,
        )?)?;
        let engine = builder.build_value::<dyn Engine>(section_entry(
            name,
            "engine",
            &spec.engine,
            &config.engines,
        )?)?;
        let backend = builder.build_value::<dyn Backend>(section_entry(
            name,
            "backend",
            &spec.backend,
            &config.backends,
        )?)?;

        let parameters = ParameterCollection::new(
            builder,
            &config.parameter_components()?,
            &config.groups,
            &spec.groups,
        )?;
        let times = spec
            .times
            .evaluate()
            .map_err(|reason| ConfigError::InvalidTimes {
                target: name.to_string(),
                reason,
            })?;

        let mut simulator = Self::new(system, engine, backend)?;
        simulator.plan = Some(SimulationPlan {
            target: name.to_string(),
            times,
            initial_state: spec.initial_state.clone(),
            params: spec.params.clone(),
            parameters,
        });
        Ok(simulator)
    }

    pub fn state(&self) -> RunState {
        self.state
    }

    pub fn plan(&self) -> Option<&SimulationPlan> {
        self.plan.as_ref()
    }

    pub fn system(&self) -> &dyn System {
        self.system.as_ref()
    }

    pub fn engine(&self) -> &dyn Engine {
        self.engine.as_ref()
    }

    pub fn backend(&self) -> &dyn Backend {
        self.backend.as_ref()
    }

    /// Ask the engine about the system, once. Later calls reuse the verdict.
    pub fn validate(&mut self) -> Result<&Compatibility, IncompatibleComponents> {
        let verdict = match self.compatibility.take() {
            Some(verdict) => verdict,
            None => {
                let verdict = self.engine.validate_system(self.system.as_ref());
                CompatibilityChecked {
                    engine: self.engine.module(),
                    system: self.system.module(),
                    verdict: verdict.as_str(),
                    issue_count: verdict.issues().len(),
                }
                .log();
                self.state = if verdict.is_incompatible() {
                    RunState::Rejected
                } else {
                    RunState::Validated
                };
                verdict
            }
        };

        let verdict = self.compatibility.insert(verdict);
        verdict.clone().into_result()?;
        Ok(&*verdict)
    }

    /// Integrate from `initial_state` over the configured times and save the result.
    pub fn run(
        &mut self,
        initial_state: &[f64],
        params: &Params,
        run_meta: &RunMeta,
    ) -> Result<Trajectory, PipelineError> {
        let times = self.plan.as_ref().map(|plan| plan.times.clone()).unwrap_or_default();
        self.execute(&times, initial_state, params, run_meta)
    }

    /// Run the configured target: its initial state, realized parameters
    /// (groups applied) and explicit overrides.
    pub fn run_configured(&mut self, run_meta: &RunMeta) -> Result<Trajectory, PipelineError> {
        let plan = self.plan.as_ref().ok_or(ConfigError::NoTargets)?;
        let initial_state = plan
            .initial_state
            .clone()
            .ok_or_else(|| ConfigError::MissingInitialState {
                target: plan.target.clone(),
            })?;
        let mut params = plan.parameters.realize(None, Some(run_meta))?;
        params.extend(plan.params.iter().map(|(k, v)| (k.clone(), *v)));
        let times = plan.times.clone();

        self.execute(&times, &initial_state, &params, run_meta)
    }

    /// Integrate over explicit `times` and save the result.
    pub fn execute(
        &mut self,
        times: &[f64],
        initial_state: &[f64],
        params: &Params,
        run_meta: &RunMeta,
    ) -> Result<Trajectory, PipelineError> {
        self.validate()?;
        check_inputs(times, initial_state)?;

        self.state = RunState::Running;
        let started = SimulationStarted {
            engine: self.engine.module(),
            system: self.system.module(),
            time_points: times.len(),
            state_size: initial_state.len(),
        };
        let _run = started.span(&run_meta.file_stem()).entered();
        started.log();
        let start = Instant::now();

        let stepper = SystemStepper::new(self.system.as_ref());
        let result = self
            .engine
            .run(&stepper, times, initial_state, params)
            .and_then(|trajectory| {
                check_trajectory(&trajectory, times, initial_state.len()).map(|_| trajectory)
            });
        let trajectory = match result {
            Ok(trajectory) => trajectory,
            Err(error) => {
                self.state = RunState::Failed;
                return Err(error.into());
            }
        };

        SimulationCompleted {
            engine: self.engine.module(),
            system: self.system.module(),
            duration: start.elapsed(),
        }
        .log();

        if let Err(error) = self.backend.save(&trajectory, run_meta) {
            self.state = RunState::Failed;
            return Err(error.into());
        }
        TrajectorySaved {
            backend: self.backend.module(),
            run: &run_meta.file_stem(),
            rows: trajectory.rows(),
            cols: trajectory.cols(),
        }
        .log();

        self.state = RunState::Complete;
        Ok(trajectory)
    }
}

fn section_entry<'c>(
    target: &str,
    kind: &'static str,
    key: &str,
    section: &'c ModuleGroup,
) -> Result<&'c Value, ConfigError> {
    section.get(key).ok_or_else(|| ConfigError::UndefinedReference {
        target: target.to_string(),
        kind,
        name: key.to_string(),
        available: section.keys().cloned().collect(),
    })
}

/// Shape must be `times.len() x state_size` and every value finite.
fn check_trajectory(
    trajectory: &Trajectory,
    times: &[f64],
    state_size: usize,
) -> Result<(), ExecutionError> {
    let (rows, cols) = trajectory.shape();
    if (rows, cols) != (times.len(), state_size) {
        return Err(ExecutionError::ShapeMismatch {
            rows,
            cols,
            expected_rows: times.len(),
            expected_cols: state_size,
        });
    }
    match trajectory.first_non_finite() {
        Some((row, index, value)) => Err(ExecutionError::NonFinite {
            time: times[row],
            index,
            value,
        }),
        None => Ok(()),
    }
}
