// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Message types for the simulation lifecycle.
//!
//! This module contains message types for logging events related to:
//! * Engine/system compatibility checks
//! * Run start and completion
//! * Trajectory persistence
//! * Run failure (logged by the caller)

use crate::observability::messages::StructuredLog;
use std::fmt::{Display, Formatter};
use tracing::Span;

/// Engine finished its static check of a system.
///
/// # Log Level
/// `debug!` - Validation detail
///
/// # Example
/// ```
/// use flepimop2::observability::messages::simulation::CompatibilityChecked;
///
/// let msg = CompatibilityChecked {
///     engine: "flepimop2.engine.euler",
///     system: "flepimop2.system.sir",
///     verdict: "compatible",
///     issue_count: 0,
/// };
///
/// tracing::debug!("{}", msg);
/// ```
pub struct CompatibilityChecked<'a> {
    pub engine: &'a str,
    pub system: &'a str,
    pub verdict: &'a str,
    pub issue_count: usize,
}

impl Display for CompatibilityChecked<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Engine '{}' checked system '{}': {} ({} issues)",
            self.engine, self.system, self.verdict, self.issue_count
        )
    }
}

impl StructuredLog for CompatibilityChecked<'_> {
    fn log(&self) {
        tracing::debug!(
            engine = self.engine,
            system = self.system,
            verdict = self.verdict,
            issue_count = self.issue_count,
            "{}", self
        );
    }

    fn span(&self, name: &str) -> Span {
        tracing::debug_span!(
            "compatibility",
            span_name = name,
            engine = self.engine,
            system = self.system,
            verdict = self.verdict,
        )
    }
}

/// Runner invoked.
///
/// # Log Level
/// `info!` - Important operational event
pub struct SimulationStarted<'a> {
    pub engine: &'a str,
    pub system: &'a str,
    pub time_points: usize,
    pub state_size: usize,
}

impl Display for SimulationStarted<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Running '{}' with '{}' over {} time points, state size {}",
            self.system, self.engine, self.time_points, self.state_size
        )
    }
}

impl StructuredLog for SimulationStarted<'_> {
    fn log(&self) {
        tracing::info!(
            engine = self.engine,
            system = self.system,
            time_points = self.time_points,
            state_size = self.state_size,
            "{}", self
        );
    }

    fn span(&self, name: &str) -> Span {
        tracing::info_span!(
            "simulation",
            span_name = name,
            engine = self.engine,
            system = self.system,
            time_points = self.time_points,
            state_size = self.state_size,
        )
    }
}

/// Runner returned a trajectory that passed shape and finiteness checks.
///
/// # Log Level
/// `info!` - Important operational event
///
/// # Example
/// ```
/// use flepimop2::observability::messages::simulation::SimulationCompleted;
/// use std::time::Duration;
///
/// let msg = SimulationCompleted {
///     engine: "flepimop2.engine.rk4",
///     system: "flepimop2.system.sir",
///     duration: Duration::from_millis(12),
/// };
///
/// tracing::info!("{}", msg);
/// ```
pub struct SimulationCompleted<'a> {
    pub engine: &'a str,
    pub system: &'a str,
    pub duration: std::time::Duration,
}

impl Display for SimulationCompleted<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Simulation of '{}' with '{}' completed in {:?}",
            self.system, self.engine, self.duration
        )
    }
}

impl StructuredLog for SimulationCompleted<'_> {
    fn log(&self) {
        tracing::info!(
            engine = self.engine,
            system = self.system,
            duration_ms = self.duration.as_millis() as u64,
            "{}", self
        );
    }

    fn span(&self, name: &str) -> Span {
        tracing::info_span!(
            "simulation",
            span_name = name,
            engine = self.engine,
            system = self.system,
            duration_ms = self.duration.as_millis() as u64,
        )
    }
}

/// Backend stored a trajectory.
///
/// # Log Level
/// `info!` - Important operational event
pub struct TrajectorySaved<'a> {
    pub backend: &'a str,
    pub run: &'a str,
    pub rows: usize,
    pub cols: usize,
}

impl Display for TrajectorySaved<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Saved {}x{} trajectory for run '{}' with '{}'",
            self.rows, self.cols, self.run, self.backend
        )
    }
}

impl StructuredLog for TrajectorySaved<'_> {
    fn log(&self) {
        tracing::info!(
            backend = self.backend,
            run = self.run,
            rows = self.rows,
            cols = self.cols,
            "{}", self
        );
    }

    fn span(&self, name: &str) -> Span {
        tracing::info_span!(
            "persistence",
            span_name = name,
            backend = self.backend,
            run = self.run,
        )
    }
}

/// A simulate target failed at any stage.
///
/// # Log Level
/// `error!` - Failure requiring attention
pub struct SimulationFailed<'a> {
    pub target: &'a str,
    pub error: &'a dyn std::error::Error,
}

impl Display for SimulationFailed<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(f, "Simulation '{}' failed: {}", self.target, self.error)
    }
}

impl StructuredLog for SimulationFailed<'_> {
    fn log(&self) {
        tracing::error!(
            target_name = self.target,
            error = %self.error,
            "{}", self
        );
    }

    fn span(&self, name: &str) -> Span {
        tracing::span!(
            tracing::Level::ERROR,
            "simulation",
            span_name = name,
            target_name = self.target,
            error = %self.error,
        )
    }
}
