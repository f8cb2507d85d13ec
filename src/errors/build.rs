// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use crate::errors::ResolutionError;
use crate::registry::Category;
use thiserror::Error;

/// Errors raised while turning a component fragment into a live instance.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum BuildError {
    #[error("component configuration must be a mapping, found {found}")]
    NotAMapping { found: String },

    #[error("component configuration is missing the required 'module' key")]
    MissingModule,

    #[error("component 'module' must be a string, found {found}")]
    InvalidModule { found: String },

    #[error(transparent)]
    Resolution(#[from] ResolutionError),

    #[error("provider '{path}' does not supply the {expected} capability (it supplies {provided})")]
    MissingCapability {
        path: String,
        expected: Category,
        provided: Category,
    },

    #[error("invalid configuration for '{module}': {reason}")]
    InvalidConfig { module: String, reason: String },

    #[error("invalid '{field}' for '{module}': {reason}")]
    InvalidField {
        module: String,
        field: String,
        reason: String,
    },

    #[error("component built from '{expected}' identifies itself as '{actual}'")]
    IdentityMismatch { expected: String, actual: String },
}
