// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use crate::errors::{
    BackendError, BuildError, ConfigError, ExecutionError, IncompatibleComponents, ParameterError,
    ProcessError, ResolutionError,
};
use thiserror::Error;

/// Umbrella error for a full resolve -> build -> validate -> run pass.
///
/// Every variant carries the originating error unchanged.
#[derive(Error, Debug)]
pub enum PipelineError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Resolution(#[from] ResolutionError),

    #[error(transparent)]
    Build(BuildError),

    #[error(transparent)]
    Incompatible(#[from] IncompatibleComponents),

    #[error(transparent)]
    Execution(#[from] ExecutionError),

    #[error(transparent)]
    Parameter(#[from] ParameterError),

    #[error(transparent)]
    Backend(#[from] BackendError),

    #[error(transparent)]
    Process(#[from] ProcessError),
}

impl From<BuildError> for PipelineError {
    fn from(error: BuildError) -> Self {
        match error {
            BuildError::Resolution(inner) => PipelineError::Resolution(inner),
            other => PipelineError::Build(other),
        }
    }
}
