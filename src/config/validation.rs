// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Configuration validation.
//!
//! Every check runs and every problem is collected, so a single pass reports
//! all of them:
//!
//! 1. **Names**: section entry names and group aliases follow the identifier grammar
//! 2. **References**: each simulate target's engine, system, backend and groups exist
//! 3. **Times**: evaluation times expand, are non-empty, finite and strictly increasing
//! 4. **Initial state**: when given, non-empty and finite
//!
//! Module resolution and component construction are not attempted here.

use crate::config::identifier::validate_identifier;
use crate::config::{Config, SimulateSpec};
use crate::errors::ConfigError;
use indexmap::IndexMap;

fn check_names<'a>(
    section: &'static str,
    names: impl Iterator<Item = &'a String>,
    errors: &mut Vec<ConfigError>,
) {
    for name in names {
        if let Err(source) = validate_identifier(name) {
            errors.push(ConfigError::InvalidName {
                section,
                name: name.clone(),
                source,
            });
        }
    }
}

fn check_reference<V>(
    target: &str,
    kind: &'static str,
    name: &str,
    section: &IndexMap<String, V>,
    errors: &mut Vec<ConfigError>,
) {
    if !section.contains_key(name) {
        errors.push(ConfigError::UndefinedReference {
            target: target.to_string(),
            kind,
            name: name.to_string(),
            available: section.keys().cloned().collect(),
        });
    }
}

fn check_times(target: &str, spec: &SimulateSpec, errors: &mut Vec<ConfigError>) {
    let invalid = |reason: String| ConfigError::InvalidTimes {
        target: target.to_string(),
        reason,
    };
    let times = match spec.times.evaluate() {
        Ok(times) => times,
        Err(reason) => {
            errors.push(invalid(reason));
            return;
        }
    };
    if times.is_empty() {
        errors.push(invalid("at least one time point is required".to_string()));
    } else if let Some(time) = times.iter().find(|t| !t.is_finite()) {
        errors.push(invalid(format!("time {} is not finite", time)));
    } else if times.windows(2).any(|w| w[1] <= w[0]) {
        errors.push(invalid("times must be strictly increasing".to_string()));
    }
}

fn check_initial_state(target: &str, spec: &SimulateSpec, errors: &mut Vec<ConfigError>) {
    let Some(state) = &spec.initial_state else {
        return;
    };
    let reason = if state.is_empty() {
        Some("at least one value is required".to_string())
    } else {
        state
            .iter()
            .position(|v| !v.is_finite())
            .map(|index| format!("value at index {} is not finite", index))
    };
    if let Some(reason) = reason {
        errors.push(ConfigError::InvalidInitialState {
            target: target.to_string(),
            reason,
        });
    }
}

/// Validate a parsed config, returning every problem found.
pub fn validate_config(config: &Config) -> Result<(), Vec<ConfigError>> {
    let mut errors = Vec::new();

    check_names("config", config.name.iter(), &mut errors);
    check_names("system", config.systems.keys(), &mut errors);
    check_names("engine", config.engines.keys(), &mut errors);
    check_names("backend", config.backends.keys(), &mut errors);
    check_names("process", config.process.keys(), &mut errors);
    check_names("parameter", config.parameters.keys(), &mut errors);
    check_names("group", config.groups.keys(), &mut errors);
    for mapping in config.groups.values() {
        check_names("group alias", mapping.keys(), &mut errors);
    }
    check_names("simulate", config.simulate.keys(), &mut errors);

    for (target, spec) in &config.simulate {
        check_reference(target, "engine", &spec.engine, &config.engines, &mut errors);
        check_reference(target, "system", &spec.system, &config.systems, &mut errors);
        check_reference(target, "backend", &spec.backend, &config.backends, &mut errors);
        for group in &spec.groups {
            if !config.groups.contains_key(group) {
                errors.push(ConfigError::UndefinedGroup {
                    target: target.clone(),
                    group: group.clone(),
                });
            }
        }
        check_times(target, spec, &mut errors);
        check_initial_state(target, spec, &mut errors);
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
