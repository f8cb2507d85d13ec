// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use crate::errors::{ExecutionError, IncompatibleComponents, StepError, ValidationIssue};
use crate::traits::{Params, System};
use crate::trajectory::Trajectory;

/// Anything that can be evaluated at `(time, state, params)`.
///
/// Closures with the matching signature are steppers, so runners can be
/// exercised without a full system.
pub trait Stepper {
    fn step(&self, time: f64, state: &[f64], params: &Params) -> Result<Vec<f64>, StepError>;
}

impl<F> Stepper for F
where
    F: Fn(f64, &[f64], &Params) -> Result<Vec<f64>, StepError>,
{
    fn step(&self, time: f64, state: &[f64], params: &Params) -> Result<Vec<f64>, StepError> {
        self(time, state, params)
    }
}

/// Exposes a system's `step` as a [`Stepper`].
pub struct SystemStepper<'a> {
    system: &'a dyn System,
}

impl<'a> SystemStepper<'a> {
    pub fn new(system: &'a dyn System) -> Self {
        Self { system }
    }
}

impl Stepper for SystemStepper<'_> {
    fn step(&self, time: f64, state: &[f64], params: &Params) -> Result<Vec<f64>, StepError> {
        self.system.step(time, state, params)
    }
}

/// Result of asking an engine whether it can drive a system.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Compatibility {
    /// The engine performed no check.
    #[default]
    Unchecked,
    /// The engine checked and found nothing wrong.
    Compatible,
    /// The engine found one or more problems.
    Incompatible(Vec<ValidationIssue>),
}

impl Compatibility {
    pub fn is_incompatible(&self) -> bool {
        matches!(self, Compatibility::Incompatible(_))
    }

    pub fn issues(&self) -> &[ValidationIssue] {
        match self {
            Compatibility::Incompatible(issues) => issues,
            _ => &[],
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Compatibility::Unchecked => "unchecked",
            Compatibility::Compatible => "compatible",
            Compatibility::Incompatible(_) => "incompatible",
        }
    }

    /// Unchecked and compatible both pass; only reported issues reject.
    pub fn into_result(self) -> Result<(), IncompatibleComponents> {
        match self {
            Compatibility::Incompatible(issues) => Err(IncompatibleComponents::new(issues)),
            _ => Ok(()),
        }
    }
}

impl From<Vec<ValidationIssue>> for Compatibility {
    fn from(issues: Vec<ValidationIssue>) -> Self {
        if issues.is_empty() {
            Compatibility::Compatible
        } else {
            Compatibility::Incompatible(issues)
        }
    }
}

impl From<Option<Vec<ValidationIssue>>> for Compatibility {
    fn from(issues: Option<Vec<ValidationIssue>>) -> Self {
        issues.map_or(Compatibility::Unchecked, Compatibility::from)
    }
}

/// An engine wraps a runner that integrates a stepper over evaluation times.
pub trait Engine: Send + Sync {
    fn module(&self) -> &str;

    /// Produce one trajectory row per entry of `times`, the first row being
    /// `initial_state`.
    fn run(
        &self,
        stepper: &dyn Stepper,
        times: &[f64],
        initial_state: &[f64],
        params: &Params,
    ) -> Result<Trajectory, ExecutionError>;

    /// Static check of whether this engine can drive `system`.
    fn validate_system(&self, _system: &dyn System) -> Compatibility {
        Compatibility::Unchecked
    }
}
