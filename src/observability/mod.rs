// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Observability module for structured logging and tracing.
//!
//! This module provides centralized message types for diagnostic and operational
//! logging. Message types follow a struct-based pattern with a `Display`
//! implementation for the human-readable line and a [`messages::StructuredLog`]
//! implementation that emits the same event with structured fields.
//!
//! # Architecture
//!
//! Messages are organized by subsystem:
//! * `messages::registry` - provider registry initialization
//! * `messages::build` - component construction
//! * `messages::simulation` - compatibility checks and run lifecycle
//! * `messages::validation` - configuration and compatibility failures
//! * `messages::process` - processing step execution
//!
//! Library code only emits lifecycle events. Failures are returned as errors
//! and logged by the caller with the `validation` and `simulation` failure
//! messages.
//!
//! # Usage
//!
//! ```rust
//! use flepimop2::observability::messages::simulation::SimulationFailed;
//!
//! let error = std::io::Error::new(std::io::ErrorKind::Other, "disk full");
//! let msg = SimulationFailed {
//!     target: "baseline",
//!     error: &error,
//! };
//!
//! tracing::error!("{}", msg);
//! ```

pub mod messages;
