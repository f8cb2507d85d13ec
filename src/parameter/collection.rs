// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Parameter collections with group-based renaming.
//!
//! A group maps published aliases to source parameter names:
//!
//! ```yaml
//! groups:
//!   high_transmission: { beta: beta_high }
//!   low_transmission:  { beta: beta_low }
//! ```
//!
//! Selecting `high_transmission` publishes `beta_high` as `beta`. Sources
//! that a non-selected group maps onto an alias already in use are dropped,
//! so `beta_low` is not published. Every other parameter is published under
//! its own name.

use crate::builder::Builder;
use crate::config::ComponentConfig;
use crate::errors::{ParameterError, PipelineError, RenameConflict};
use crate::meta::RunMeta;
use crate::traits::{Parameter, ParameterContext, Params};
use indexmap::{IndexMap, IndexSet};

/// Group name -> (alias -> source parameter name)
pub type Groups = IndexMap<String, IndexMap<String, String>>;

fn validate_group_names(groups: &Groups, group_names: &[String]) -> Result<(), ParameterError> {
    let mut missing: Vec<String> = group_names
        .iter()
        .filter(|name| !groups.contains_key(name.as_str()))
        .cloned()
        .collect();
    if missing.is_empty() {
        return Ok(());
    }
    missing.sort();
    missing.dedup();
    let mut available: Vec<String> = groups.keys().cloned().collect();
    available.sort();
    Err(ParameterError::UnknownGroups { missing, available })
}

fn validate_no_conflicts(groups: &Groups, group_names: &[String]) -> Result<(), ParameterError> {
    let mut by_alias: IndexMap<&str, Vec<(String, String)>> = IndexMap::new();
    for group in group_names {
        for (alias, source) in &groups[group.as_str()] {
            by_alias
                .entry(alias.as_str())
                .or_default()
                .push((source.clone(), group.clone()));
        }
    }

    let mut conflicts: Vec<RenameConflict> = by_alias
        .into_iter()
        .filter(|(_, sources)| {
            let unique: IndexSet<&str> = sources.iter().map(|(s, _)| s.as_str()).collect();
            unique.len() > 1
        })
        .map(|(alias, sources)| RenameConflict {
            alias: alias.to_string(),
            sources,
        })
        .collect();

    if conflicts.is_empty() {
        return Ok(());
    }
    conflicts.sort_by(|a, b| a.alias.cmp(&b.alias));
    Err(ParameterError::RenameConflicts(conflicts))
}

fn maps_to_alias(
    parameter: &str,
    aliases: &IndexSet<&str>,
    groups: &Groups,
    group_names: &[String],
) -> bool {
    groups
        .iter()
        .filter(|(name, _)| !group_names.contains(*name))
        .flat_map(|(_, mapping)| mapping.iter())
        .any(|(alias, source)| source == parameter && aliases.contains(alias.as_str()))
}

/// Published name -> source parameter name, after applying `group_names`.
///
/// Aliases from selected groups win over a parameter of the same name.
pub fn resolve_mapping<V>(
    parameters: &IndexMap<String, V>,
    groups: &Groups,
    group_names: &[String],
) -> Result<IndexMap<String, String>, ParameterError> {
    validate_group_names(groups, group_names)?;
    validate_no_conflicts(groups, group_names)?;

    let mut mapping: IndexMap<String, String> = IndexMap::new();
    for group in group_names {
        for (alias, source) in &groups[group.as_str()] {
            if !parameters.contains_key(source.as_str()) {
                return Err(ParameterError::UndefinedSource {
                    group: group.clone(),
                    alias: alias.clone(),
                    source_name: source.clone(),
                });
            }
            mapping.insert(alias.clone(), source.clone());
        }
    }

    let aliases: IndexSet<&str> = mapping.keys().map(String::as_str).collect();
    let used: IndexSet<&str> = mapping.values().map(String::as_str).collect();
    let identities: Vec<String> = parameters
        .keys()
        .filter(|name| !used.contains(name.as_str()) && !aliases.contains(name.as_str()))
        .filter(|name| !maps_to_alias(name, &aliases, groups, group_names))
        .cloned()
        .collect();

    for name in identities {
        mapping.insert(name.clone(), name);
    }
    Ok(mapping)
}

/// Pre-built parameters published under their final names.
pub struct ParameterCollection {
    mapping: IndexMap<String, String>,
    built: IndexMap<String, Box<dyn Parameter>>,
}

impl ParameterCollection {
    pub fn empty() -> Self {
        Self {
            mapping: IndexMap::new(),
            built: IndexMap::new(),
        }
    }

    /// Validate group selection and build only the parameters it publishes.
    pub fn new(
        builder: &Builder<'_>,
        parameters: &IndexMap<String, ComponentConfig>,
        groups: &Groups,
        group_names: &[String],
    ) -> Result<Self, PipelineError> {
        let mapping = resolve_mapping(parameters, groups, group_names)?;
        let mut built = IndexMap::with_capacity(mapping.len());
        for (name, source) in &mapping {
            let config = parameters
                .get(source)
                .ok_or_else(|| ParameterError::UnknownParameter(source.clone()))?;
            built.insert(name.clone(), builder.parameter(config)?);
        }
        Ok(Self { mapping, built })
    }

    pub fn parameter_names(&self) -> impl Iterator<Item = &str> + '_ {
        self.mapping.keys().map(String::as_str)
    }

    pub fn source_of(&self, name: &str) -> Option<&str> {
        self.mapping.get(name).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.mapping.len()
    }

    pub fn is_empty(&self) -> bool {
        self.mapping.is_empty()
    }

    /// Sample every published parameter, or only those named in `subset`.
    pub fn realize(
        &self,
        subset: Option<&[String]>,
        run_meta: Option<&RunMeta>,
    ) -> Result<Params, ParameterError> {
        let names: Vec<&str> = match subset {
            Some(subset) => subset.iter().map(String::as_str).collect(),
            None => self.parameter_names().collect(),
        };

        let mut params = Params::with_capacity(names.len());
        for name in names {
            let parameter = self
                .built
                .get(name)
                .ok_or_else(|| ParameterError::UnknownParameter(name.to_string()))?;
            let mut context = ParameterContext::new(name);
            if let Some(run_meta) = run_meta {
                context = context.with_run_meta(run_meta);
            }
            params.insert(name.to_string(), parameter.sample(&context)?);
        }
        Ok(params)
    }
}
