//! Service Container
//!
//! Minimal type-keyed registry tying configuration resolution to a source and
//! a logging back-end.
//!
//! ```ignore
//! let mut builder = ContainerBuilder::new();
//! builder.register_source(ConfigLoader::load()?);
//! builder.register_logging(Arc::new(TracingSink));
//! builder.register_configuration::<MyTestConfig>().single_instance();
//!
//! let container = builder.build();
//! let config = container.resolve::<MyTestConfig>()?;
//! ```

mod registration;

pub use registration::{Lifetime, RegistrationBuilder};

use std::any::{TypeId, type_name};
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use dashmap::DashMap;
use tracing::debug;

use registration::{Factory, Instance, Registration, downcast};

use crate::binding::{self, Configuration};
use crate::config::ConfigSource;
use crate::logging::{Logger, LoggerFactory, SharedSink};
use crate::types::{AutoconfError, Result};

// =============================================================================
// Builder
// =============================================================================

/// Collects registrations; later registrations for a type replace earlier ones
#[derive(Default)]
pub struct ContainerBuilder {
    registrations: HashMap<TypeId, Registration>,
}

impl ContainerBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    fn insert<U: ?Sized + 'static>(&mut self, lifetime: Lifetime, factory: Factory) {
        let service = type_name::<U>();
        if self
            .registrations
            .insert(
                TypeId::of::<U>(),
                Registration {
                    service,
                    lifetime,
                    factory,
                },
            )
            .is_some()
        {
            debug!(service, "Replacing existing registration");
        }
    }

    /// Register a factory producing `T`
    pub fn register<T, F>(&mut self, factory: F) -> RegistrationBuilder<'_, T>
    where
        T: Send + Sync + 'static,
        F: Fn(&Container) -> Result<T> + Send + Sync + 'static,
    {
        let factory: Factory = Arc::new(move |container: &Container| {
            Ok(Box::new(Arc::new(factory(container)?)) as Instance)
        });
        self.insert::<T>(Lifetime::InstancePerDependency, factory);
        RegistrationBuilder::new(self)
    }

    /// Register an existing instance, shared by every resolution
    pub fn register_instance<U>(&mut self, instance: Arc<U>) -> RegistrationBuilder<'_, U>
    where
        U: ?Sized + Send + Sync + 'static,
    {
        let factory: Factory =
            Arc::new(move |_: &Container| Ok(Box::new(Arc::clone(&instance)) as Instance));
        self.insert::<U>(Lifetime::SingleInstance, factory);
        RegistrationBuilder::new(self)
    }

    /// Register the configuration source sections are read from
    pub fn register_source<S>(&mut self, source: S) -> RegistrationBuilder<'_, dyn ConfigSource>
    where
        S: ConfigSource + 'static,
    {
        self.register_instance::<dyn ConfigSource>(Arc::new(source))
    }

    /// Register a logger for one configuration type
    pub fn register_logger<T>(&mut self, sink: SharedSink) -> RegistrationBuilder<'_, Logger<T>>
    where
        T: ?Sized + 'static,
    {
        self.register_instance(Arc::new(Logger::<T>::new(sink)))
    }

    /// Register a logger factory serving every type without its own logger
    pub fn register_logging(&mut self, sink: SharedSink) -> RegistrationBuilder<'_, LoggerFactory> {
        self.register_instance(Arc::new(LoggerFactory::new(sink)))
    }

    /// Register `T` as resolved from its section, logging each resolution
    pub fn register_configuration<T: Configuration>(&mut self) -> RegistrationBuilder<'_, T> {
        self.register(|container: &Container| container.resolve_config::<T>())
    }

    pub fn build(self) -> Container {
        Container {
            registrations: self.registrations,
            instances: DashMap::new(),
        }
    }
}

// =============================================================================
// Container
// =============================================================================

/// Resolves registered services
pub struct Container {
    registrations: HashMap<TypeId, Registration>,
    instances: DashMap<TypeId, Instance>,
}

impl Container {
    /// Resolve `U`, failing with [`AutoconfError::NotRegistered`] when absent
    pub fn resolve<U>(&self) -> Result<Arc<U>>
    where
        U: ?Sized + Send + Sync + 'static,
    {
        self.resolve_optional::<U>()?
            .ok_or_else(AutoconfError::not_registered::<U>)
    }

    /// Resolve `U`, `None` when nothing is registered for it
    pub fn resolve_optional<U>(&self) -> Result<Option<Arc<U>>>
    where
        U: ?Sized + Send + Sync + 'static,
    {
        let id = TypeId::of::<U>();
        let Some(registration) = self.registrations.get(&id) else {
            return Ok(None);
        };

        match registration.lifetime {
            Lifetime::InstancePerDependency => {
                let instance = (registration.factory)(self)?;
                downcast::<U>(&*instance).map(Some)
            }
            Lifetime::SingleInstance => {
                if let Some(cached) = self.instances.get(&id) {
                    return downcast::<U>(&**cached).map(Some);
                }
                // No map guard is held while the factory runs; it may resolve
                // other services. On a race the first stored instance wins.
                let instance = (registration.factory)(self)?;
                let stored = self.instances.entry(id).or_insert(instance);
                downcast::<U>(&**stored).map(Some)
            }
        }
    }

    pub fn is_registered<U: ?Sized + 'static>(&self) -> bool {
        self.registrations.contains_key(&TypeId::of::<U>())
    }

    /// Logger for `T`: an explicit `Logger<T>` registration first, then the
    /// registered [`LoggerFactory`]. Lookup failures mean no logger.
    pub fn logger<T: ?Sized + 'static>(&self) -> Option<Logger<T>> {
        match self.resolve_optional::<Logger<T>>() {
            Ok(Some(logger)) => return Some(Logger::clone(&logger)),
            Ok(None) => {}
            Err(e) => {
                debug!(category = type_name::<T>(), "Logger lookup failed: {}", e);
                return None;
            }
        }

        match self.resolve_optional::<LoggerFactory>() {
            Ok(factory) => factory.map(|factory| factory.create::<T>()),
            Err(e) => {
                debug!(category = type_name::<T>(), "Logger factory lookup failed: {}", e);
                None
            }
        }
    }

    /// Resolve `T` from the registered source and log it
    pub fn resolve_config<T: Configuration>(&self) -> Result<T> {
        let source = self.resolve::<dyn ConfigSource>()?;
        binding::resolve_config(&*source, || self.logger::<T>())
    }
}

impl fmt::Debug for Container {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut services: Vec<_> = self
            .registrations
            .values()
            .map(|r| (r.service, r.lifetime))
            .collect();
        services.sort_unstable_by_key(|(service, _)| *service);

        f.debug_struct("Container")
            .field("services", &services)
            .field("cached", &self.instances.len())
            .finish()
    }
}
