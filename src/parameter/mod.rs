// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Parameters and parameter groups.

pub mod collection;
pub mod fixed;

pub use collection::{resolve_mapping, Groups, ParameterCollection};
pub use fixed::FixedParameter;
