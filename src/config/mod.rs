// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

mod component;
mod identifier;
mod loader;
mod simulate;
mod validation;

#[cfg(test)]
mod integration_tests;
pub mod consts;

pub use component::ComponentConfig;
pub use identifier::{validate_identifier, Identifier};
pub use loader::{
    load_and_validate_config, load_config, parse_config, Config, ConfigFormat, ModuleGroup,
    ParameterSpec,
};
pub use simulate::{SimulateSpec, TimeSpec};
pub use validation::validate_config;
