// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Built-in dynamic systems.

pub mod constant;
pub mod sir;

pub use constant::ConstantSystem;
pub use sir::SirSystem;
