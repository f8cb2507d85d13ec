// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ProcessError {
    #[error("failed to spawn '{command}': {source}")]
    Spawn {
        command: String,
        #[source]
        source: std::io::Error,
    },

    #[error("command exited with {}: {command}", .code.map_or_else(|| "a signal".to_string(), |c| format!("code {}", c)))]
    Failed { command: String, code: Option<i32> },
}
