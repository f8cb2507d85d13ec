// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use indexmap::IndexMap;
use serde::Serialize;
use std::fmt;

/// Issue kind reported when an engine cannot integrate a system's output.
pub const INCOMPATIBLE_SYSTEM: &str = "incompatible_system";

/// One compatibility finding reported by an engine about a system.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationIssue {
    pub message: String,
    pub kind: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub context: Option<IndexMap<String, String>>,
}

impl ValidationIssue {
    pub fn new(message: impl Into<String>, kind: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            kind: kind.into(),
            context: None,
        }
    }

    /// Attach a key/value pair of diagnostic context.
    pub fn with_context(mut self, key: impl Into<String>, value: impl ToString) -> Self {
        self.context
            .get_or_insert_with(IndexMap::new)
            .insert(key.into(), value.to_string());
        self
    }
}

impl fmt::Display for ValidationIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.kind, self.message)?;
        if let Some(context) = &self.context {
            let pairs: Vec<String> = context.iter().map(|(k, v)| format!("{}={}", k, v)).collect();
            write!(f, " ({})", pairs.join(", "))?;
        }
        Ok(())
    }
}

/// Raised when an engine reports at least one issue against a system.
///
/// Display lists every issue, one per line, in the order the engine reported them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IncompatibleComponents {
    pub issues: Vec<ValidationIssue>,
}

impl IncompatibleComponents {
    pub fn new(issues: Vec<ValidationIssue>) -> Self {
        Self { issues }
    }
}

impl fmt::Display for IncompatibleComponents {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} validation issue(s) encountered:", self.issues.len())?;
        for issue in &self.issues {
            write!(f, "\n- {}", issue)?;
        }
        Ok(())
    }
}

impl std::error::Error for IncompatibleComponents {}
