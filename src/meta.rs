// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use crate::config::consts::{DEFAULT_ACTION, TIMESTAMP_FORMAT};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Immutable description of one run, handed to backends for naming artifacts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunMeta {
    name: Option<String>,
    action: String,
    timestamp: DateTime<Utc>,
}

impl RunMeta {
    /// Metadata stamped with the current time.
    pub fn new(action: impl Into<String>) -> Self {
        Self {
            name: None,
            action: action.into(),
            timestamp: Utc::now(),
        }
    }

    pub fn simulate() -> Self {
        Self::new(DEFAULT_ACTION)
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_timestamp(mut self, timestamp: DateTime<Utc>) -> Self {
        self.timestamp = timestamp;
        self
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn action(&self) -> &str {
        &self.action
    }

    pub fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }

    /// `[<name>_]<action>_<YYYYmmdd_HHMMSS>`
    pub fn file_stem(&self) -> String {
        let stamp = self.timestamp.format(TIMESTAMP_FORMAT);
        match &self.name {
            Some(name) => format!("{}_{}_{}", name, self.action, stamp),
            None => format!("{}_{}", self.action, stamp),
        }
    }
}

impl Default for RunMeta {
    fn default() -> Self {
        Self::simulate()
    }
}
