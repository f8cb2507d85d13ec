// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use crate::backends::{output_root, read_file, write_file};
use crate::builder::Construct;
use crate::config::ComponentConfig;
use crate::errors::{BackendError, BuildError};
use crate::meta::RunMeta;
use crate::registry::{Category, Factory, Provider, PROVIDERS};
use crate::traits::Backend;
use crate::trajectory::Trajectory;
use linkme::distributed_slice;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[distributed_slice(PROVIDERS)]
static JSON: Provider = Provider {
    category: Category::Backend,
    name: "json",
    factory: Factory::Backend(build),
};

fn build(config: &ComponentConfig) -> Result<Box<dyn Backend>, BuildError> {
    Ok(Box::new(JsonBackend::construct(config)?))
}

/// On-disk document: the run metadata alongside the trajectory rows.
#[derive(Serialize, Deserialize)]
struct StoredRun {
    run: RunMeta,
    shape: [usize; 2],
    data: Vec<Vec<f64>>,
}

#[derive(Debug)]
pub struct JsonBackend {
    module: String,
    root: PathBuf,
}

impl Construct for JsonBackend {
    fn construct(config: &ComponentConfig) -> Result<Self, BuildError> {
        Ok(Self {
            module: config.module().to_string(),
            root: output_root(config)?,
        })
    }
}

impl JsonBackend {
    pub fn path_for(&self, run_meta: &RunMeta) -> PathBuf {
        self.root.join(format!("{}.json", run_meta.file_stem()))
    }
}

impl Backend for JsonBackend {
    fn module(&self) -> &str {
        &self.module
    }

    fn save(&self, data: &Trajectory, run_meta: &RunMeta) -> Result<(), BackendError> {
        let (rows, cols) = data.shape();
        let stored = StoredRun {
            run: run_meta.clone(),
            shape: [rows, cols],
            data: data.to_rows(),
        };
        write_file(&self.path_for(run_meta), &serde_json::to_string_pretty(&stored)?)
    }

    fn read(&self, run_meta: &RunMeta) -> Result<Trajectory, BackendError> {
        let path = self.path_for(run_meta);
        let stored: StoredRun = serde_json::from_str(&read_file(&path)?)?;
        let location = path.display().to_string();

        let trajectory = Trajectory::from_rows(stored.data).map_err(|e| BackendError::Malformed {
            location: location.clone(),
            reason: e.to_string(),
        })?;
        let (rows, cols) = trajectory.shape();
        if [rows, cols] != stored.shape {
            return Err(BackendError::Malformed {
                location,
                reason: format!(
                    "declared shape {:?} does not match data shape [{}, {}]",
                    stored.shape, rows, cols
                ),
            });
        }
        Ok(trajectory)
    }
}
