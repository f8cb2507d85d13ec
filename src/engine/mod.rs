// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Built-in engines and the checks every runner shares.
//!
//! A runner receives a stepper, strictly increasing evaluation times, an
//! initial state and scalar parameters, and returns one trajectory row per
//! time with row 0 equal to the initial state.

pub mod discrete;
pub mod euler;
pub mod rk4;

pub use discrete::DiscreteEngine;
pub use euler::EulerEngine;
pub use rk4::Rk4Engine;

use crate::config::ComponentConfig;
use crate::errors::{BuildError, ExecutionError, ValidationIssue, INCOMPATIBLE_SYSTEM};
use crate::traits::{Params, StateChange, Stepper, System};
use serde::Deserialize;

/// Reject evaluation times and initial states no runner can integrate.
pub fn check_inputs(times: &[f64], initial_state: &[f64]) -> Result<(), ExecutionError> {
    if times.is_empty() {
        return Err(ExecutionError::InvalidTimes(
            "at least one evaluation time is required".to_string(),
        ));
    }
    if let Some(time) = times.iter().find(|t| !t.is_finite()) {
        return Err(ExecutionError::InvalidTimes(format!("time {} is not finite", time)));
    }
    if let Some(window) = times.windows(2).find(|w| w[1] <= w[0]) {
        return Err(ExecutionError::InvalidTimes(format!(
            "times must be strictly increasing, found {} followed by {}",
            window[0], window[1]
        )));
    }
    if initial_state.is_empty() {
        return Err(ExecutionError::InvalidInitialState(
            "state must have at least one variable".to_string(),
        ));
    }
    if let Some((index, value)) = initial_state.iter().enumerate().find(|(_, v)| !v.is_finite()) {
        return Err(ExecutionError::InvalidInitialState(format!(
            "value {} at index {} is not finite",
            value, index
        )));
    }
    Ok(())
}

/// Evaluate the stepper once, requiring output of the same length as `state`.
pub fn evaluate(
    stepper: &dyn Stepper,
    time: f64,
    state: &[f64],
    params: &Params,
) -> Result<Vec<f64>, ExecutionError> {
    let output = stepper
        .step(time, state, params)
        .map_err(|source| ExecutionError::Stepper { time, source })?;
    if output.len() != state.len() {
        return Err(ExecutionError::DimensionMismatch {
            time,
            expected: state.len(),
            actual: output.len(),
        });
    }
    Ok(output)
}

pub fn ensure_finite(time: f64, state: &[f64]) -> Result<(), ExecutionError> {
    match state.iter().enumerate().find(|(_, v)| !v.is_finite()) {
        Some((index, &value)) => Err(ExecutionError::NonFinite { time, index, value }),
        None => Ok(()),
    }
}

/// Upper bound on the substeps a single interval may take.
pub const MAX_SUBSTEPS: usize = 1_000_000;

/// Number of equal substeps needed to cover `interval` without exceeding `max_step`.
pub fn substeps(interval: f64, max_step: Option<f64>) -> Result<usize, ExecutionError> {
    match max_step {
        Some(limit) if interval > limit => {
            let count = (interval / limit).ceil();
            if count.is_nan() || count > MAX_SUBSTEPS as f64 {
                return Err(ExecutionError::TooManySubsteps {
                    interval,
                    max_step: limit,
                    limit: MAX_SUBSTEPS,
                });
            }
            Ok(count as usize)
        }
        _ => Ok(1),
    }
}

/// Issue reported when `system` does not produce the `expected` kind of output.
pub fn require_state_change(
    engine: &str,
    expected: StateChange,
    system: &dyn System,
) -> Option<ValidationIssue> {
    let actual = system.state_change();
    (actual != expected).then(|| {
        ValidationIssue::new(
            format!(
                "engine '{}' integrates {} systems, but '{}' produces {} output",
                engine,
                expected,
                system.module(),
                actual
            ),
            INCOMPATIBLE_SYSTEM,
        )
        .with_context("engine", engine)
        .with_context("system", system.module())
        .with_context("expected", expected)
        .with_context("state_change", actual)
    })
}

#[derive(Deserialize)]
struct StepSizeConfig {
    #[serde(default)]
    max_step: Option<f64>,
}

/// Optional `max_step` shared by the fixed-step engines.
pub(crate) fn max_step(config: &ComponentConfig) -> Result<Option<f64>, BuildError> {
    let parsed: StepSizeConfig = config.parse()?;
    match parsed.max_step {
        Some(step) if !(step.is_finite() && step > 0.0) => Err(config.invalid_field(
            "max_step",
            format!("must be a positive finite number, got {}", step),
        )),
        other => Ok(other),
    }
}
