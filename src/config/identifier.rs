// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use crate::config::consts::IDENTIFIER_MAX_LEN;
use crate::errors::IdentifierError;
use regex::Regex;
use std::fmt;
use std::sync::OnceLock;

static IDENTIFIER_PATTERN: OnceLock<Regex> = OnceLock::new();

fn identifier_pattern() -> &'static Regex {
    IDENTIFIER_PATTERN.get_or_init(|| {
        Regex::new(r"^[A-Za-z_][A-Za-z0-9_]*$").expect("identifier pattern compiles")
    })
}

/// Check a short name against the identifier grammar.
pub fn validate_identifier(value: &str) -> Result<(), IdentifierError> {
    if value.is_empty() {
        return Err(IdentifierError::Empty);
    }
    if value.len() > IDENTIFIER_MAX_LEN {
        return Err(IdentifierError::TooLong {
            length: value.len(),
            max: IDENTIFIER_MAX_LEN,
        });
    }
    if !identifier_pattern().is_match(value) {
        return Err(IdentifierError::Malformed(value.to_string()));
    }
    Ok(())
}

/// A short name that has passed [`validate_identifier`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Identifier(String);

impl Identifier {
    pub fn parse(value: &str) -> Result<Self, IdentifierError> {
        validate_identifier(value)?;
        Ok(Self(value.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Identifier {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
