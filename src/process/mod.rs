// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Built-in processing steps.

pub mod shell;

pub use shell::ShellProcess;
