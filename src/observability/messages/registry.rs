// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Message types for provider registry events.

use crate::observability::messages::StructuredLog;
use std::fmt::{Display, Formatter};
use tracing::Span;

/// Global registry built from the linked provider slice.
///
/// # Log Level
/// `debug!` - Startup detail
pub struct RegistryInitialized {
    pub provider_count: usize,
    pub path_count: usize,
}

impl Display for RegistryInitialized {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Provider registry initialized: {} providers at {} paths",
            self.provider_count, self.path_count
        )
    }
}

impl StructuredLog for RegistryInitialized {
    fn log(&self) {
        tracing::debug!(
            provider_count = self.provider_count,
            path_count = self.path_count,
            "{}", self
        );
    }

    fn span(&self, name: &str) -> Span {
        tracing::debug_span!(
            "registry",
            span_name = name,
            provider_count = self.provider_count,
            path_count = self.path_count,
        )
    }
}

/// More than one provider registered at the same path.
///
/// Resolving that path fails; the warning points at the cause up front.
///
/// # Log Level
/// `warn!` - Misconfiguration that will fail resolution
///
/// # Example
/// ```
/// use flepimop2::observability::messages::registry::DuplicateProviders;
///
/// let msg = DuplicateProviders {
///     path: "flepimop2.engine.euler",
///     count: 2,
/// };
///
/// tracing::warn!("{}", msg);
/// ```
pub struct DuplicateProviders<'a> {
    pub path: &'a str,
    pub count: usize,
}

impl Display for DuplicateProviders<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "{} providers registered at '{}'; resolving it will fail",
            self.count, self.path
        )
    }
}

impl StructuredLog for DuplicateProviders<'_> {
    fn log(&self) {
        tracing::warn!(path = self.path, count = self.count, "{}", self);
    }

    fn span(&self, name: &str) -> Span {
        tracing::span!(
            tracing::Level::WARN,
            "registry",
            span_name = name,
            path = self.path,
            count = self.count,
        )
    }
}
