// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Built-in persistence backends.
//!
//! File backends write one artifact per run under `root`, named from
//! [`RunMeta::file_stem`](crate::meta::RunMeta::file_stem).

pub mod csv;
pub mod json;
pub mod memory;

pub use self::csv::CsvBackend;
pub use json::JsonBackend;
pub use memory::MemoryBackend;

use crate::config::consts::DEFAULT_OUTPUT_DIR;
use crate::config::ComponentConfig;
use crate::errors::{BackendError, BuildError};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};

static WRITE_CHECKS: AtomicUsize = AtomicUsize::new(0);

#[derive(Deserialize)]
struct OutputConfig {
    #[serde(default)]
    root: Option<PathBuf>,
}

/// Output directory for a file backend: `root`, defaulting to `./model_output`.
///
/// The directory must already exist and accept a new file.
pub(crate) fn output_root(config: &ComponentConfig) -> Result<PathBuf, BuildError> {
    let parsed: OutputConfig = config.parse()?;
    let root = parsed
        .root
        .unwrap_or_else(|| Path::new(".").join(DEFAULT_OUTPUT_DIR));

    let metadata = fs::metadata(&root).map_err(|e| {
        config.invalid_field("root", format!("'{}' is not accessible: {}", root.display(), e))
    })?;
    if !metadata.is_dir() {
        return Err(config.invalid_field("root", format!("'{}' is not a directory", root.display())));
    }
    check_writable(&root).map_err(|e| {
        config.invalid_field("root", format!("'{}' is not writable: {}", root.display(), e))
    })?;
    Ok(root)
}

/// Create and remove a scratch file in `dir`.
fn check_writable(dir: &Path) -> std::io::Result<()> {
    let path = dir.join(format!(
        ".write_check_{}_{}",
        std::process::id(),
        WRITE_CHECKS.fetch_add(1, Ordering::Relaxed)
    ));
    fs::OpenOptions::new()
        .write(true)
        .create_new(true)
        .open(&path)?;
    fs::remove_file(&path)
}

pub(crate) fn read_file(path: &Path) -> Result<String, BackendError> {
    fs::read_to_string(path).map_err(|source| BackendError::Io {
        path: path.to_path_buf(),
        source,
    })
}

pub(crate) fn write_file(path: &Path, contents: &str) -> Result<(), BackendError> {
    fs::write(path, contents).map_err(|source| BackendError::Io {
        path: path.to_path_buf(),
        source,
    })
}
