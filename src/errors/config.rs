// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use crate::errors::IdentifierError;
use std::path::PathBuf;
use thiserror::Error;

fn render_all(errors: &[ConfigError]) -> String {
    errors
        .iter()
        .map(|e| format!("- {}", e))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Errors raised while loading, validating or selecting from a config document.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read '{}': {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("failed to parse TOML: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("unsupported configuration format '{0}', expected .yaml, .yml or .toml")]
    UnsupportedFormat(String),

    #[error("invalid {section} name '{name}': {source}")]
    InvalidName {
        section: &'static str,
        name: String,
        #[source]
        source: IdentifierError,
    },

    #[error(
        "simulate '{target}' references undefined {kind} '{name}'; available {kind}s: [{}]",
        .available.join(", ")
    )]
    UndefinedReference {
        target: String,
        kind: &'static str,
        name: String,
        available: Vec<String>,
    },

    #[error("simulate '{target}' references undefined parameter group '{group}'")]
    UndefinedGroup { target: String, group: String },

    #[error("simulate '{target}' has invalid times: {reason}")]
    InvalidTimes { target: String, reason: String },

    #[error("simulate '{target}' has invalid initial_state: {reason}")]
    InvalidInitialState { target: String, reason: String },

    #[error("simulate '{target}' does not define initial_state")]
    MissingInitialState { target: String },

    #[error("no simulate target named '{target}'; available targets: [{}]", .available.join(", "))]
    TargetNotFound {
        target: String,
        available: Vec<String>,
    },

    #[error("multiple simulate targets defined ([{}]); select one by name", .available.join(", "))]
    AmbiguousTarget { available: Vec<String> },

    #[error("no simulate targets defined")]
    NoTargets,

    #[error("configuration validation failed:\n{}", render_all(.0))]
    Invalid(Vec<ConfigError>),
}
