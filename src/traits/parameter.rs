// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use crate::errors::ParameterError;
use crate::meta::RunMeta;

/// What a parameter knows about the draw being requested.
#[derive(Debug, Clone, Copy)]
pub struct ParameterContext<'a> {
    /// Name the value will be published under (after group renaming).
    pub name: &'a str,
    pub run_meta: Option<&'a RunMeta>,
}

impl<'a> ParameterContext<'a> {
    pub fn new(name: &'a str) -> Self {
        Self {
            name,
            run_meta: None,
        }
    }

    pub fn with_run_meta(mut self, run_meta: &'a RunMeta) -> Self {
        self.run_meta = Some(run_meta);
        self
    }
}

pub trait Parameter: Send + Sync {
    fn module(&self) -> &str;

    fn sample(&self, context: &ParameterContext<'_>) -> Result<f64, ParameterError>;
}
