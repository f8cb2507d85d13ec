// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Namespace resolver and provider registry.
//!
//! Every component provider (built in or third party) is a [`Provider`] entry
//! in the [`PROVIDERS`] distributed slice. Linking a crate that contributes
//! entries is all it takes to make its providers resolvable:
//!
//! ```ignore
//! use flepimop2::registry::{Category, Factory, Provider, PROVIDERS};
//! use linkme::distributed_slice;
//!
//! #[distributed_slice(PROVIDERS)]
//! static MY_ENGINE: Provider = Provider {
//!     category: Category::Engine,
//!     name: "my_engine",
//!     factory: Factory::Engine(build_my_engine),
//! };
//! ```
//!
//! Resolution maps `(category, short name)` to the path
//! `flepimop2.<category>.<name>` and requires exactly one provider there.

use crate::config::consts::NAMESPACE_ROOT;
use crate::config::Identifier;
use crate::config::ComponentConfig;
use crate::errors::{BuildError, ResolutionError};
use crate::observability::messages::registry::{DuplicateProviders, RegistryInitialized};
use crate::observability::messages::StructuredLog;
use crate::traits::{Backend, Engine, Parameter, Process, System};
use std::collections::HashMap;
use std::fmt;
use std::sync::OnceLock;

pub use linkme;
use linkme::distributed_slice;

/// Capability families a provider can supply.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Category {
    Backend,
    Engine,
    System,
    Parameter,
    Process,
}

impl Category {
    pub const ALL: [Category; 5] = [
        Category::Backend,
        Category::Engine,
        Category::System,
        Category::Parameter,
        Category::Process,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Backend => "backend",
            Category::Engine => "engine",
            Category::System => "system",
            Category::Parameter => "parameter",
            Category::Process => "process",
        }
    }

    /// `flepimop2.<category>.`
    pub fn prefix(&self) -> String {
        format!("{}.{}.", NAMESPACE_ROOT, self.as_str())
    }

    pub fn path_for(&self, name: &str) -> String {
        format!("{}{}", self.prefix(), name)
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

pub type FactoryFn<T> = fn(&ComponentConfig) -> Result<Box<T>, BuildError>;

/// A provider's construct entry point, tagged with the capability it yields.
#[derive(Clone, Copy)]
pub enum Factory {
    Backend(FactoryFn<dyn Backend>),
    Engine(FactoryFn<dyn Engine>),
    System(FactoryFn<dyn System>),
    Parameter(FactoryFn<dyn Parameter>),
    Process(FactoryFn<dyn Process>),
}

impl Factory {
    pub fn capability(&self) -> Category {
        match self {
            Factory::Backend(_) => Category::Backend,
            Factory::Engine(_) => Category::Engine,
            Factory::System(_) => Category::System,
            Factory::Parameter(_) => Category::Parameter,
            Factory::Process(_) => Category::Process,
        }
    }
}

impl fmt::Debug for Factory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Factory::{:?}", self.capability())
    }
}

/// A named provider registered under one category of the namespace.
#[derive(Debug, Clone, Copy)]
pub struct Provider {
    pub category: Category,
    pub name: &'static str,
    pub factory: Factory,
}

impl Provider {
    pub fn path(&self) -> String {
        self.category.path_for(self.name)
    }
}

#[distributed_slice]
pub static PROVIDERS: [Provider];

/// A successfully resolved `(category, short name)` pair.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ModuleReference {
    pub category: Category,
    pub short_name: Identifier,
    pub resolved_path: String,
}

impl fmt::Display for ModuleReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.resolved_path)
    }
}

/// Providers indexed by resolved path.
#[derive(Debug, Default)]
pub struct Registry {
    by_path: HashMap<String, Vec<Provider>>,
}

static GLOBAL: OnceLock<Registry> = OnceLock::new();

impl Registry {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn from_providers<'a>(providers: impl IntoIterator<Item = &'a Provider>) -> Self {
        let mut registry = Self::empty();
        for provider in providers {
            registry.register(*provider);
        }
        registry
    }

    /// Process-wide registry built from every linked [`PROVIDERS`] entry.
    pub fn global() -> &'static Registry {
        GLOBAL.get_or_init(|| {
            let registry = Registry::from_providers(PROVIDERS.iter());
            for (path, providers) in &registry.by_path {
                if providers.len() > 1 {
                    DuplicateProviders {
                        path,
                        count: providers.len(),
                    }
                    .log();
                }
            }
            RegistryInitialized {
                provider_count: PROVIDERS.len(),
                path_count: registry.by_path.len(),
            }
            .log();
            registry
        })
    }

    pub fn register(&mut self, provider: Provider) {
        self.by_path.entry(provider.path()).or_default().push(provider);
    }

    /// Map `(category, name)` to its resolved path, requiring exactly one provider.
    ///
    /// `name` may be a short name or a path already qualified for `category`.
    pub fn resolve(&self, category: Category, name: &str) -> Result<ModuleReference, ResolutionError> {
        let prefix = category.prefix();
        let short = name.strip_prefix(prefix.as_str()).unwrap_or(name);
        let short_name =
            Identifier::parse(short).map_err(|source| ResolutionError::InvalidIdentifier {
                category,
                name: name.to_string(),
                source,
            })?;
        let resolved_path = category.path_for(short_name.as_str());

        match self.by_path.get(&resolved_path).map(Vec::len).unwrap_or(0) {
            0 => Err(ResolutionError::NotFound {
                category,
                path: resolved_path,
                available: self.names(category),
            }),
            1 => Ok(ModuleReference {
                category,
                short_name,
                resolved_path,
            }),
            count => Err(ResolutionError::Ambiguous {
                path: resolved_path,
                count,
            }),
        }
    }

    /// The single provider behind a resolved reference.
    pub fn provider(&self, reference: &ModuleReference) -> Result<&Provider, ResolutionError> {
        match self.by_path.get(&reference.resolved_path).map(Vec::as_slice) {
            Some([provider]) => Ok(provider),
            Some(providers) if !providers.is_empty() => Err(ResolutionError::Ambiguous {
                path: reference.resolved_path.clone(),
                count: providers.len(),
            }),
            _ => Err(ResolutionError::NotFound {
                category: reference.category,
                path: reference.resolved_path.clone(),
                available: self.names(reference.category),
            }),
        }
    }

    /// Sorted short names registered under `category`.
    pub fn names(&self, category: Category) -> Vec<String> {
        let prefix = category.prefix();
        let mut names: Vec<String> = self
            .by_path
            .keys()
            .filter_map(|path| path.strip_prefix(prefix.as_str()))
            .map(str::to_string)
            .collect();
        names.sort();
        names
    }

    /// Every registered provider, sorted by path.
    pub fn providers(&self) -> Vec<&Provider> {
        let mut providers: Vec<&Provider> = self.by_path.values().flatten().collect();
        providers.sort_by_key(|p| p.path());
        providers
    }
}

/// Resolve against the global registry.
pub fn resolve(category: Category, name: &str) -> Result<ModuleReference, ResolutionError> {
    Registry::global().resolve(category, name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::IdentifierError;

    fn no_engine(config: &ComponentConfig) -> Result<Box<dyn Engine>, BuildError> {
        Err(BuildError::InvalidConfig {
            module: config.module().to_string(),
            reason: "test provider".to_string(),
        })
    }

    fn engine(name: &'static str) -> Provider {
        Provider {
            category: Category::Engine,
            name,
            factory: Factory::Engine(no_engine),
        }
    }

    #[test]
    fn test_resolve_table_driven() {
        struct TestCase {
            name: &'static str,
            category: Category,
            input: &'static str,
            expected: Result<&'static str, ResolutionError>,
        }

        let mut registry = Registry::empty();
        registry.register(engine("euler"));
        registry.register(engine("rk4"));
        registry.register(engine("twin"));
        registry.register(engine("twin"));

        let test_cases = vec![
            TestCase {
                name: "short name",
                category: Category::Engine,
                input: "euler",
                expected: Ok("flepimop2.engine.euler"),
            },
            TestCase {
                name: "already qualified",
                category: Category::Engine,
                input: "flepimop2.engine.rk4",
                expected: Ok("flepimop2.engine.rk4"),
            },
            TestCase {
                name: "qualified for another category",
                category: Category::Engine,
                input: "flepimop2.system.euler",
                expected: Err(ResolutionError::InvalidIdentifier {
                    category: Category::Engine,
                    name: "flepimop2.system.euler".to_string(),
                    source: IdentifierError::Malformed("flepimop2.system.euler".to_string()),
                }),
            },
            TestCase {
                name: "malformed",
                category: Category::Engine,
                input: "not-valid",
                expected: Err(ResolutionError::InvalidIdentifier {
                    category: Category::Engine,
                    name: "not-valid".to_string(),
                    source: IdentifierError::Malformed("not-valid".to_string()),
                }),
            },
            TestCase {
                name: "unknown name lists what exists",
                category: Category::Engine,
                input: "midpoint",
                expected: Err(ResolutionError::NotFound {
                    category: Category::Engine,
                    path: "flepimop2.engine.midpoint".to_string(),
                    available: vec!["euler".to_string(), "rk4".to_string(), "twin".to_string()],
                }),
            },
            TestCase {
                name: "right name wrong category",
                category: Category::System,
                input: "euler",
                expected: Err(ResolutionError::NotFound {
                    category: Category::System,
                    path: "flepimop2.system.euler".to_string(),
                    available: vec![],
                }),
            },
            TestCase {
                name: "duplicate providers",
                category: Category::Engine,
                input: "twin",
                expected: Err(ResolutionError::Ambiguous {
                    path: "flepimop2.engine.twin".to_string(),
                    count: 2,
                }),
            },
        ];

        for test_case in test_cases {
            let result = registry
                .resolve(test_case.category, test_case.input)
                .map(|reference| reference.resolved_path);
            let expected = test_case.expected.map(str::to_string);
            assert_eq!(result, expected, "Test case '{}' failed", test_case.name);
        }
    }

    #[test]
    fn test_resolved_reference_keeps_short_name() {
        let mut registry = Registry::empty();
        registry.register(engine("euler"));

        let reference = registry.resolve(Category::Engine, "euler").unwrap();
        assert_eq!(reference.short_name.as_str(), "euler");
        assert_eq!(reference.category, Category::Engine);
        assert_eq!(reference.to_string(), "flepimop2.engine.euler");
        assert_eq!(registry.provider(&reference).unwrap().name, "euler");
    }

    #[test]
    fn test_global_registry_contains_builtins() {
        let registry = Registry::global();
        for (category, name) in [
            (Category::Engine, "euler"),
            (Category::Engine, "rk4"),
            (Category::Engine, "discrete"),
            (Category::System, "sir"),
            (Category::System, "constant"),
            (Category::Backend, "csv"),
            (Category::Backend, "json"),
            (Category::Backend, "memory"),
            (Category::Parameter, "fixed"),
            (Category::Process, "shell"),
        ] {
            assert!(
                registry.resolve(category, name).is_ok(),
                "{} '{}' should be registered",
                category,
                name
            );
        }
    }

    #[test]
    fn test_too_long_name_is_invalid() {
        let registry = Registry::empty();
        let name = "x".repeat(256);
        assert!(matches!(
            registry.resolve(Category::System, &name),
            Err(ResolutionError::InvalidIdentifier {
                source: IdentifierError::TooLong { .. },
                ..
            })
        ));
    }
}
