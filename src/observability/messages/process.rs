// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Message types for processing steps.

use crate::observability::messages::StructuredLog;
use std::fmt::{Display, Formatter};
use tracing::Span;

/// Processing step about to run (or be echoed, for a dry run).
///
/// # Log Level
/// `info!` - Important operational event
///
/// # Example
/// ```
/// use flepimop2::observability::messages::process::ProcessStarted;
///
/// let msg = ProcessStarted {
///     module: "flepimop2.process.shell",
///     command: "Rscript summarize.R",
///     dry_run: true,
/// };
///
/// tracing::info!("{}", msg);
/// ```
pub struct ProcessStarted<'a> {
    pub module: &'a str,
    pub command: &'a str,
    pub dry_run: bool,
}

impl Display for ProcessStarted<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        let mode = if self.dry_run { " (dry run)" } else { "" };
        write!(f, "Running '{}'{}: {}", self.module, mode, self.command)
    }
}

impl StructuredLog for ProcessStarted<'_> {
    fn log(&self) {
        tracing::info!(
            module = self.module,
            command = self.command,
            dry_run = self.dry_run,
            "{}", self
        );
    }

    fn span(&self, name: &str) -> Span {
        tracing::info_span!(
            "process",
            span_name = name,
            module = self.module,
            dry_run = self.dry_run,
        )
    }
}

/// Processing step exited successfully.
///
/// # Log Level
/// `info!` - Important operational event
pub struct ProcessCompleted<'a> {
    pub module: &'a str,
    pub duration: std::time::Duration,
}

impl Display for ProcessCompleted<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(f, "'{}' completed in {:?}", self.module, self.duration)
    }
}

impl StructuredLog for ProcessCompleted<'_> {
    fn log(&self) {
        tracing::info!(
            module = self.module,
            duration_ms = self.duration.as_millis() as u64,
            "{}", self
        );
    }

    fn span(&self, name: &str) -> Span {
        tracing::info_span!(
            "process",
            span_name = name,
            module = self.module,
            duration_ms = self.duration.as_millis() as u64,
        )
    }
}
