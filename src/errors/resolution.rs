// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use crate::registry::Category;
use thiserror::Error;

/// Reasons a short name is rejected by the identifier grammar.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum IdentifierError {
    #[error("identifier must not be empty")]
    Empty,

    #[error("identifier is {length} characters long, the maximum is {max}")]
    TooLong { length: usize, max: usize },

    #[error("'{0}' must start with a letter or underscore and contain only letters, digits and underscores")]
    Malformed(String),
}

/// Failures turning a `(category, short name)` pair into a unique provider.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ResolutionError {
    #[error("invalid {category} module name '{name}': {source}")]
    InvalidIdentifier {
        category: Category,
        name: String,
        #[source]
        source: IdentifierError,
    },

    #[error(
        "no {category} provider registered as '{path}'; available {category} modules: [{}]",
        .available.join(", ")
    )]
    NotFound {
        category: Category,
        path: String,
        available: Vec<String>,
    },

    #[error("{count} providers are registered as '{path}', expected exactly one")]
    Ambiguous { path: String, count: usize },
}
