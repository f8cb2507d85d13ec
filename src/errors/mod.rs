// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

mod backend;
mod build;
mod config;
mod execution;
mod parameter;
mod pipeline;
mod process;
mod resolution;
mod validation;

pub use backend::BackendError;
pub use build::BuildError;
pub use config::ConfigError;
pub use execution::{ExecutionError, StepError};
pub use parameter::{ParameterError, RenameConflict};
pub use pipeline::PipelineError;
pub use process::ProcessError;
pub use resolution::{IdentifierError, ResolutionError};
pub use validation::{IncompatibleComponents, ValidationIssue, INCOMPATIBLE_SYSTEM};
