// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Message types for component construction.

use crate::observability::messages::StructuredLog;
use std::fmt::{Display, Formatter};
use tracing::Span;

/// A component was constructed and passed its identity check.
///
/// # Log Level
/// `debug!` - Construction detail
pub struct ComponentBuilt<'a> {
    pub category: &'a str,
    pub module: &'a str,
}

impl Display for ComponentBuilt<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(f, "Built {} '{}'", self.category, self.module)
    }
}

impl StructuredLog for ComponentBuilt<'_> {
    fn log(&self) {
        tracing::debug!(category = self.category, module = self.module, "{}", self);
    }

    fn span(&self, name: &str) -> Span {
        tracing::debug_span!(
            "build",
            span_name = name,
            category = self.category,
            module = self.module,
        )
    }
}
