// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use crate::errors::ProcessError;
use async_trait::async_trait;

/// A processing step run before or after simulations.
#[async_trait]
pub trait Process: Send + Sync {
    fn module(&self) -> &str;

    /// With `dry_run` set the step reports what it would do without doing it.
    async fn execute(&self, dry_run: bool) -> Result<(), ProcessError>;
}
