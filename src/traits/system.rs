// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use crate::errors::StepError;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_yaml::{Mapping, Value};
use std::fmt;

/// Named scalar parameters passed to every stepper evaluation.
pub type Params = IndexMap<String, f64>;

/// How a system's step output relates to the state it was given.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StateChange {
    /// Output is a rate of change (dy/dt) and must be integrated.
    Flow,
    /// Output is an increment added to the state.
    Delta,
    /// Output replaces the state.
    State,
}

impl StateChange {
    pub fn as_str(&self) -> &'static str {
        match self {
            StateChange::Flow => "flow",
            StateChange::Delta => "delta",
            StateChange::State => "state",
        }
    }
}

impl fmt::Display for StateChange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A dynamic system: maps `(time, state, params)` to its next contribution.
pub trait System: Send + Sync {
    /// Fully resolved module path of the provider that built this system.
    fn module(&self) -> &str;

    fn state_change(&self) -> StateChange;

    fn step(&self, time: f64, state: &[f64], params: &Params) -> Result<Vec<f64>, StepError>;

    /// Static options engines may inspect during validation.
    fn options(&self) -> Option<&Mapping> {
        None
    }

    fn option(&self, name: &str) -> Option<&Value> {
        self.options().and_then(|options| options.get(name))
    }
}
