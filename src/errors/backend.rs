// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while persisting or reading back a trajectory.
#[derive(Error, Debug)]
pub enum BackendError {
    #[error("I/O error on '{}': {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("no stored trajectory for run '{0}'")]
    NotFound(String),

    #[error("malformed data in '{location}': {reason}")]
    Malformed { location: String, reason: String },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
