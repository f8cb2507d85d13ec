// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

pub mod backends;   // persistence backends
pub mod builder;    // config fragment -> component instance
pub mod config;     // config documents + component fragments
pub mod engine;     // integration engines
pub mod errors;     // error handling
pub mod meta;       // run metadata
pub mod observability;
pub mod parameter;  // parameters + parameter groups
pub mod process;    // processing steps
pub mod registry;   // namespace resolver + provider slice
pub mod simulator;  // resolve -> build -> validate -> run
pub mod system;     // dynamic systems
pub mod traits;     // capability contracts
pub mod trajectory;
