// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use crate::builder::Construct;
use crate::config::ComponentConfig;
use crate::errors::{BuildError, ParameterError};
use crate::registry::{Category, Factory, Provider, PROVIDERS};
use crate::traits::{Parameter, ParameterContext};
use linkme::distributed_slice;
use serde::Deserialize;

#[distributed_slice(PROVIDERS)]
static FIXED: Provider = Provider {
    category: Category::Parameter,
    name: "fixed",
    factory: Factory::Parameter(build),
};

fn build(config: &ComponentConfig) -> Result<Box<dyn Parameter>, BuildError> {
    Ok(Box::new(FixedParameter::construct(config)?))
}

#[derive(Deserialize)]
struct FixedConfig {
    value: f64,
}

/// Always samples the configured value.
#[derive(Debug)]
pub struct FixedParameter {
    module: String,
    value: f64,
}

impl Construct for FixedParameter {
    fn construct(config: &ComponentConfig) -> Result<Self, BuildError> {
        let parsed: FixedConfig = config.parse()?;
        if !parsed.value.is_finite() {
            return Err(config.invalid_field("value", "must be finite"));
        }
        Ok(Self {
            module: config.module().to_string(),
            value: parsed.value,
        })
    }
}

impl Parameter for FixedParameter {
    fn module(&self) -> &str {
        &self.module
    }

    fn sample(&self, _context: &ParameterContext<'_>) -> Result<f64, ParameterError> {
        Ok(self.value)
    }
}
