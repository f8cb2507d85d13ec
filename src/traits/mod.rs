// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

pub mod backend;
pub mod engine;
pub mod parameter;
pub mod process;
pub mod system;

pub use backend::Backend;
pub use engine::{Compatibility, Engine, Stepper, SystemStepper};
pub use parameter::{Parameter, ParameterContext};
pub use process::Process;
pub use system::{Params, StateChange, System};
