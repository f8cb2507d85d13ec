// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use std::fmt;
use thiserror::Error;

/// Two or more selected groups map the same alias from different sources.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenameConflict {
    pub alias: String,
    /// `(source, group)` pairs in group selection order
    pub sources: Vec<(String, String)>,
}

impl fmt::Display for RenameConflict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sources: Vec<String> = self
            .sources
            .iter()
            .map(|(source, group)| format!("'{}' from group '{}'", source, group))
            .collect();
        write!(f, "'{}' is mapped from: {}", self.alias, sources.join(", "))
    }
}

fn render_conflicts(conflicts: &[RenameConflict]) -> String {
    conflicts
        .iter()
        .map(|c| format!("  {}", c))
        .collect::<Vec<_>>()
        .join("\n")
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ParameterError {
    #[error(
        "group names not found: [{}]; available groups: [{}]",
        .missing.join(", "),
        .available.join(", ")
    )]
    UnknownGroups {
        missing: Vec<String>,
        available: Vec<String>,
    },

    #[error("parameter renaming conflicts detected:\n{}", render_conflicts(.0))]
    RenameConflicts(Vec<RenameConflict>),

    #[error("group '{group}' maps '{alias}' to undefined parameter '{source_name}'")]
    UndefinedSource {
        group: String,
        alias: String,
        source_name: String,
    },

    #[error("unknown parameter '{0}'")]
    UnknownParameter(String),

    #[error("failed to sample parameter '{name}': {reason}")]
    Sample { name: String, reason: String },
}
