// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Component builder: resolves a fragment's `module`, checks the provider
//! supplies the requested capability, constructs it, and verifies the
//! instance reports the path it was resolved to.

use crate::config::ComponentConfig;
use crate::errors::BuildError;
use crate::observability::messages::build::ComponentBuilt;
use crate::observability::messages::StructuredLog;
use crate::registry::{Category, Factory, FactoryFn, Registry};
use crate::traits::{Backend, Engine, Parameter, Process, System};
use serde_yaml::{Mapping, Value};

/// Single construction contract shared by every provider.
///
/// `config` has already had its `module` replaced with the resolved path.
pub trait Construct: Sized {
    fn construct(config: &ComponentConfig) -> Result<Self, BuildError>;
}

/// Ties a capability trait object to its category and factory variant.
pub trait Capability {
    const CATEGORY: Category;

    fn factory(factory: &Factory) -> Option<FactoryFn<Self>>;

    fn module_of(instance: &Self) -> &str;
}

macro_rules! capability {
    ($trait:ident, $variant:ident) => {
        impl Capability for dyn $trait {
            const CATEGORY: Category = Category::$variant;

            fn factory(factory: &Factory) -> Option<FactoryFn<Self>> {
                match factory {
                    Factory::$variant(build) => Some(*build),
                    _ => None,
                }
            }

            fn module_of(instance: &Self) -> &str {
                instance.module()
            }
        }
    };
}

capability!(Backend, Backend);
capability!(Engine, Engine);
capability!(System, System);
capability!(Parameter, Parameter);
capability!(Process, Process);

/// Builds components against a registry.
#[derive(Clone, Copy)]
pub struct Builder<'r> {
    registry: &'r Registry,
}

impl Builder<'static> {
    pub fn global() -> Self {
        Self::new(Registry::global())
    }
}

impl<'r> Builder<'r> {
    pub fn new(registry: &'r Registry) -> Self {
        Self { registry }
    }

    pub fn registry(&self) -> &'r Registry {
        self.registry
    }

    /// Build from a raw mapping, rejecting fragments without a string `module`
    /// before any resolution happens.
    pub fn build_mapping<T>(&self, raw: &Mapping) -> Result<Box<T>, BuildError>
    where
        T: Capability + ?Sized,
    {
        self.build(&ComponentConfig::from_mapping(raw.clone())?)
    }

    pub fn build_value<T>(&self, raw: &Value) -> Result<Box<T>, BuildError>
    where
        T: Capability + ?Sized,
    {
        self.build(&ComponentConfig::from_value(raw.clone())?)
    }

    pub fn build<T>(&self, config: &ComponentConfig) -> Result<Box<T>, BuildError>
    where
        T: Capability + ?Sized,
    {
        let reference = self.registry.resolve(T::CATEGORY, config.module())?;
        let provider = self.registry.provider(&reference)?;
        let factory =
            T::factory(&provider.factory).ok_or_else(|| BuildError::MissingCapability {
                path: reference.resolved_path.clone(),
                expected: T::CATEGORY,
                provided: provider.factory.capability(),
            })?;

        let instance = factory(&config.with_module(&reference.resolved_path))?;

        let actual = T::module_of(&instance);
        if actual != reference.resolved_path {
            return Err(BuildError::IdentityMismatch {
                expected: reference.resolved_path,
                actual: actual.to_string(),
            });
        }

        ComponentBuilt {
            category: T::CATEGORY.as_str(),
            module: &reference.resolved_path,
        }
        .log();
        Ok(instance)
    }

    pub fn system(&self, config: &ComponentConfig) -> Result<Box<dyn System>, BuildError> {
        self.build::<dyn System>(config)
    }

    pub fn engine(&self, config: &ComponentConfig) -> Result<Box<dyn Engine>, BuildError> {
        self.build::<dyn Engine>(config)
    }

    pub fn backend(&self, config: &ComponentConfig) -> Result<Box<dyn Backend>, BuildError> {
        self.build::<dyn Backend>(config)
    }

    pub fn parameter(&self, config: &ComponentConfig) -> Result<Box<dyn Parameter>, BuildError> {
        self.build::<dyn Parameter>(config)
    }

    pub fn process(&self, config: &ComponentConfig) -> Result<Box<dyn Process>, BuildError> {
        self.build::<dyn Process>(config)
    }
}
