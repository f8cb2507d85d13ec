// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use crate::builder::Construct;
use crate::config::ComponentConfig;
use crate::errors::{BuildError, ProcessError};
use crate::observability::messages::process::{ProcessCompleted, ProcessStarted};
use crate::observability::messages::StructuredLog;
use crate::registry::{Category, Factory, Provider, PROVIDERS};
use crate::traits::Process;
use async_trait::async_trait;
use linkme::distributed_slice;
use serde::Deserialize;
use std::time::Instant;
use tokio::process::Command;

#[distributed_slice(PROVIDERS)]
static SHELL: Provider = Provider {
    category: Category::Process,
    name: "shell",
    factory: Factory::Process(build),
};

fn build(config: &ComponentConfig) -> Result<Box<dyn Process>, BuildError> {
    Ok(Box::new(ShellProcess::construct(config)?))
}

#[derive(Deserialize)]
struct ShellConfig {
    command: String,
}

/// Runs `command` through `sh -c`. A dry run echoes the command instead.
#[derive(Debug)]
pub struct ShellProcess {
    module: String,
    command: String,
}

impl Construct for ShellProcess {
    fn construct(config: &ComponentConfig) -> Result<Self, BuildError> {
        let parsed: ShellConfig = config.parse()?;
        if parsed.command.trim().is_empty() {
            return Err(config.invalid_field("command", "must not be empty"));
        }
        Ok(Self {
            module: config.module().to_string(),
            command: parsed.command,
        })
    }
}

impl ShellProcess {
    fn command(&self, dry_run: bool) -> Command {
        if dry_run {
            let mut command = Command::new("echo");
            command.arg(&self.command);
            command
        } else {
            let mut command = Command::new("sh");
            command.arg("-c").arg(&self.command);
            command
        }
    }
}

#[async_trait]
impl Process for ShellProcess {
    fn module(&self) -> &str {
        &self.module
    }

    async fn execute(&self, dry_run: bool) -> Result<(), ProcessError> {
        ProcessStarted {
            module: &self.module,
            command: &self.command,
            dry_run,
        }
        .log();
        let start = Instant::now();

        let status = self
            .command(dry_run)
            .status()
            .await
            .map_err(|source| ProcessError::Spawn {
                command: self.command.clone(),
                source,
            })?;

        if !status.success() {
            return Err(ProcessError::Failed {
                command: self.command.clone(),
                code: status.code(),
            });
        }

        ProcessCompleted {
            module: &self.module,
            duration: start.elapsed(),
        }
        .log();
        Ok(())
    }
}
