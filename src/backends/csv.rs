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
use std::path::PathBuf;

#[distributed_slice(PROVIDERS)]
static CSV: Provider = Provider {
    category: Category::Backend,
    name: "csv",
    factory: Factory::Backend(build),
};

fn build(config: &ComponentConfig) -> Result<Box<dyn Backend>, BuildError> {
    Ok(Box::new(CsvBackend::construct(config)?))
}

/// Comma-separated values, one line per trajectory row, no header.
///
/// Values use Rust's shortest round-trip float formatting, so `read`
/// returns exactly what `save` was given.
#[derive(Debug)]
pub struct CsvBackend {
    module: String,
    root: PathBuf,
}

impl Construct for CsvBackend {
    fn construct(config: &ComponentConfig) -> Result<Self, BuildError> {
        Ok(Self {
            module: config.module().to_string(),
            root: output_root(config)?,
        })
    }
}

impl CsvBackend {
    pub fn path_for(&self, run_meta: &RunMeta) -> PathBuf {
        self.root.join(format!("{}.csv", run_meta.file_stem()))
    }
}

impl Backend for CsvBackend {
    fn module(&self) -> &str {
        &self.module
    }

    fn save(&self, data: &Trajectory, run_meta: &RunMeta) -> Result<(), BackendError> {
        let mut contents = String::new();
        for row in data.iter_rows() {
            let line: Vec<String> = row.iter().map(f64::to_string).collect();
            contents.push_str(&line.join(","));
            contents.push('\n');
        }
        write_file(&self.path_for(run_meta), &contents)
    }

    fn read(&self, run_meta: &RunMeta) -> Result<Trajectory, BackendError> {
        let path = self.path_for(run_meta);
        let contents = read_file(&path)?;
        let location = path.display().to_string();

        let rows = contents
            .lines()
            .filter(|line| !line.trim().is_empty())
            .enumerate()
            .map(|(number, line)| {
                line.split(',')
                    .map(|field| {
                        field.trim().parse::<f64>().map_err(|e| BackendError::Malformed {
                            location: format!("{}:{}", location, number + 1),
                            reason: format!("'{}': {}", field, e),
                        })
                    })
                    .collect::<Result<Vec<f64>, BackendError>>()
            })
            .collect::<Result<Vec<Vec<f64>>, BackendError>>()?;

        Trajectory::from_rows(rows).map_err(|e| BackendError::Malformed {
            location,
            reason: e.to_string(),
        })
    }
}
