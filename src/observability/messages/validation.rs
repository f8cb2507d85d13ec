// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Message types for configuration and compatibility failures.
//!
//! These are emitted by the CLI after a validation error has been returned.

use crate::errors::ValidationIssue;
use crate::observability::messages::StructuredLog;
use std::fmt::{Display, Formatter};
use tracing::Span;

/// Configuration document failed validation.
///
/// # Log Level
/// `error!` - Failure requiring attention
///
/// # Example
/// ```
/// use flepimop2::observability::messages::validation::ConfigValidationFailed;
///
/// let msg = ConfigValidationFailed {
///     path: "configs/sir-demo.yaml",
///     error_count: 2,
/// };
///
/// tracing::error!("{}", msg);
/// ```
pub struct ConfigValidationFailed<'a> {
    pub path: &'a str,
    pub error_count: usize,
}

impl Display for ConfigValidationFailed<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Configuration '{}' failed validation with {} errors",
            self.path, self.error_count
        )
    }
}

impl StructuredLog for ConfigValidationFailed<'_> {
    fn log(&self) {
        tracing::error!(path = self.path, error_count = self.error_count, "{}", self);
    }

    fn span(&self, name: &str) -> Span {
        tracing::span!(
            tracing::Level::ERROR,
            "validation",
            span_name = name,
            path = self.path,
            error_count = self.error_count,
        )
    }
}

/// Single configuration error, reported after [`ConfigValidationFailed`].
///
/// # Log Level
/// `error!` - Failure requiring attention
pub struct ConfigErrorReported<'a> {
    pub error: &'a dyn std::error::Error,
}

impl Display for ConfigErrorReported<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(f, "Configuration error: {}", self.error)
    }
}

impl StructuredLog for ConfigErrorReported<'_> {
    fn log(&self) {
        tracing::error!(error = %self.error, "{}", self);
    }

    fn span(&self, name: &str) -> Span {
        tracing::span!(
            tracing::Level::ERROR,
            "validation",
            span_name = name,
            error = %self.error,
        )
    }
}

/// Engine reported an issue against a system.
///
/// # Log Level
/// `error!` - Failure requiring attention
///
/// # Example
/// ```
/// use flepimop2::errors::{ValidationIssue, INCOMPATIBLE_SYSTEM};
/// use flepimop2::observability::messages::validation::CompatibilityIssueReported;
///
/// let issue = ValidationIssue::new("euler integrates flow systems only", INCOMPATIBLE_SYSTEM);
/// let msg = CompatibilityIssueReported {
///     target: "baseline",
///     issue: &issue,
/// };
///
/// tracing::error!("{}", msg);
/// ```
pub struct CompatibilityIssueReported<'a> {
    pub target: &'a str,
    pub issue: &'a ValidationIssue,
}

impl Display for CompatibilityIssueReported<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(f, "Simulation '{}' is incompatible: {}", self.target, self.issue)
    }
}

impl StructuredLog for CompatibilityIssueReported<'_> {
    fn log(&self) {
        tracing::error!(
            target_name = self.target,
            kind = %self.issue.kind,
            issue = %self.issue.message,
            "{}", self
        );
    }

    fn span(&self, name: &str) -> Span {
        tracing::span!(
            tracing::Level::ERROR,
            "validation",
            span_name = name,
            target_name = self.target,
            kind = %self.issue.kind,
        )
    }
}
