// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use crate::traits::Params;
use regex::Regex;
use serde::Deserialize;
use std::sync::OnceLock;

/// One entry of the `simulate` section.
///
/// ```yaml
/// simulate:
///   baseline:
///     engine: default
///     system: default
///     backend: default
///     times: "0:1:100"
///     initial_state: [999, 1, 0]
///     params: { beta: 0.4 }
///     groups: [high_transmission]
/// ```
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SimulateSpec {
    pub engine: String,
    pub system: String,
    pub backend: String,
    pub times: TimeSpec,
    #[serde(default)]
    pub initial_state: Option<Vec<f64>>,
    #[serde(default)]
    pub params: Params,
    #[serde(default)]
    pub groups: Vec<String>,
}

/// Evaluation times: an explicit list or a `"start:end"` / `"start:step:end"` range.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum TimeSpec {
    Points(Vec<f64>),
    Range(String),
}

const RANGE_TOLERANCE: f64 = 1e-9;

static RANGE_PATTERN: OnceLock<Regex> = OnceLock::new();

fn range_pattern() -> &'static Regex {
    RANGE_PATTERN.get_or_init(|| {
        Regex::new(r"^[+-]?\d+(\.\d+)?(:[+-]?\d+(\.\d+)?){1,2}$").expect("range pattern compiles")
    })
}

fn parse_range(range: &str) -> Result<Vec<f64>, String> {
    let range = range.trim();
    if !range_pattern().is_match(range) {
        return Err(format!(
            "'{}' is not a range; expected 'start:end' or 'start:step:end'",
            range
        ));
    }
    let bounds: Vec<f64> = range
        .split(':')
        .map(|part| part.parse::<f64>().map_err(|e| format!("'{}': {}", part, e)))
        .collect::<Result<_, _>>()?;
    let (start, step, end) = match bounds.as_slice() {
        [start, end] => (*start, 1.0, *end),
        [start, step, end] => (*start, *step, *end),
        _ => return Err(format!("'{}' has too many parts", range)),
    };
    if step <= 0.0 {
        return Err(format!("range step must be positive, got {}", step));
    }
    if end < start {
        return Err(format!("range end {} is before start {}", end, start));
    }

    // an `end` on the grid survives rounding; nothing past it is emitted
    let tolerance = step * RANGE_TOLERANCE;
    let count = ((end - start) / step + RANGE_TOLERANCE).floor() as usize + 1;
    Ok((0..count)
        .map(|i| start + i as f64 * step)
        .filter(|t| *t <= end + tolerance)
        .collect())
}

impl TimeSpec {
    /// Expand to the evaluation time points.
    pub fn evaluate(&self) -> Result<Vec<f64>, String> {
        match self {
            TimeSpec::Points(points) => Ok(points.clone()),
            TimeSpec::Range(range) => parse_range(range),
        }
    }
}
