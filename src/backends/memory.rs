// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use crate::builder::Construct;
use crate::config::ComponentConfig;
use crate::errors::{BackendError, BuildError};
use crate::meta::RunMeta;
use crate::registry::{Category, Factory, Provider, PROVIDERS};
use crate::traits::Backend;
use crate::trajectory::Trajectory;
use linkme::distributed_slice;
use std::collections::HashMap;
use std::sync::Mutex;

#[distributed_slice(PROVIDERS)]
static MEMORY: Provider = Provider {
    category: Category::Backend,
    name: "memory",
    factory: Factory::Backend(build),
};

fn build(config: &ComponentConfig) -> Result<Box<dyn Backend>, BuildError> {
    Ok(Box::new(MemoryBackend::construct(config)?))
}

/// Keeps trajectories in process memory, keyed by run file stem.
#[derive(Debug, Default)]
pub struct MemoryBackend {
    module: String,
    store: Mutex<HashMap<String, Trajectory>>,
}

impl Construct for MemoryBackend {
    fn construct(config: &ComponentConfig) -> Result<Self, BuildError> {
        Ok(Self {
            module: config.module().to_string(),
            store: Mutex::new(HashMap::new()),
        })
    }
}

impl MemoryBackend {
    pub fn len(&self) -> usize {
        self.store.lock().unwrap_or_else(|e| e.into_inner()).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Backend for MemoryBackend {
    fn module(&self) -> &str {
        &self.module
    }

    fn save(&self, data: &Trajectory, run_meta: &RunMeta) -> Result<(), BackendError> {
        self.store
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .insert(run_meta.file_stem(), data.clone());
        Ok(())
    }

    fn read(&self, run_meta: &RunMeta) -> Result<Trajectory, BackendError> {
        let key = run_meta.file_stem();
        self.store
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .get(&key)
            .cloned()
            .ok_or(BackendError::NotFound(key))
    }
}
