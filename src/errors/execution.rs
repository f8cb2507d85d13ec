// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use thiserror::Error;

/// Failure reported by a stepper (usually a system) for a single evaluation.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum StepError {
    #[error("missing required parameter '{0}'")]
    MissingParameter(String),

    #[error("expected a state of length {expected}, got {actual}")]
    StateLength { expected: usize, actual: usize },

    #[error("{0}")]
    Failed(String),
}

/// Errors raised by a runner or by the post-run checks on its trajectory.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ExecutionError {
    #[error("invalid evaluation times: {0}")]
    InvalidTimes(String),

    #[error("invalid initial state: {0}")]
    InvalidInitialState(String),

    #[error("stepper failed at t={time}: {source}")]
    Stepper {
        time: f64,
        #[source]
        source: StepError,
    },

    #[error("stepper returned {actual} values at t={time}, expected {expected}")]
    DimensionMismatch {
        time: f64,
        expected: usize,
        actual: usize,
    },

    #[error("interval {interval} needs more than {limit} substeps of at most {max_step}")]
    TooManySubsteps {
        interval: f64,
        max_step: f64,
        limit: usize,
    },

    #[error("non-finite value {value} in state variable {index} at t={time}")]
    NonFinite { time: f64, index: usize, value: f64 },

    #[error("runner produced a {rows}x{cols} trajectory, expected {expected_rows}x{expected_cols}")]
    ShapeMismatch {
        rows: usize,
        cols: usize,
        expected_rows: usize,
        expected_cols: usize,
    },
}
