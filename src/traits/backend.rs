// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use crate::errors::BackendError;
use crate::meta::RunMeta;
use crate::trajectory::Trajectory;

/// Persists trajectories keyed by run metadata.
pub trait Backend: Send + Sync {
    fn module(&self) -> &str;

    fn save(&self, data: &Trajectory, run_meta: &RunMeta) -> Result<(), BackendError>;

    /// Read back what `save` stored for the same metadata.
    fn read(&self, run_meta: &RunMeta) -> Result<Trajectory, BackendError>;
}
