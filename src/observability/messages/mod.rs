// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Centralized message types for structured logging.
//!
//! Each message type implements `Display` for the log line and
//! [`StructuredLog`] to emit it at its fixed level with structured fields.
//!
//! # Usage Pattern
//!
//! ```rust
//! use flepimop2::observability::messages::StructuredLog;
//! use flepimop2::observability::messages::build::ComponentBuilt;
//!
//! let msg = ComponentBuilt {
//!     category: "engine",
//!     module: "flepimop2.engine.euler",
//! };
//!
//! msg.log();
//! ```

use tracing::Span;

pub mod build;
pub mod process;
pub mod registry;
pub mod simulation;
pub mod validation;

/// Emit a message at its own level with structured fields.
pub trait StructuredLog {
    fn log(&self);

    /// Span carrying the message's fields, for scoping nested events.
    fn span(&self, name: &str) -> Span;
}
