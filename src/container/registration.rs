//! Registrations
//!
//! A registration maps one service type to a factory and a lifetime.
//! Instances travel through the container as `Box<dyn Any>` holding an
//! `Arc<U>`, which lets trait objects (`U = dyn Trait`) be services too.

use std::any::{Any, TypeId};
use std::marker::PhantomData;
use std::sync::Arc;

use super::{Container, ContainerBuilder};
use crate::types::{AutoconfError, Result};

/// Type-erased service instance, always an `Arc<U>` inside
pub(crate) type Instance = Box<dyn Any + Send + Sync>;

/// Type-erased factory
pub(crate) type Factory = Arc<dyn Fn(&Container) -> Result<Instance> + Send + Sync>;

/// How long a resolved instance lives
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Lifetime {
    /// A new instance on every resolution
    #[default]
    InstancePerDependency,
    /// One instance per container, created on first resolution
    SingleInstance,
}

pub(crate) struct Registration {
    pub(crate) service: &'static str,
    pub(crate) lifetime: Lifetime,
    pub(crate) factory: Factory,
}

/// Recover the `Arc<U>` stored in an instance
pub(crate) fn downcast<U: ?Sized + Send + Sync + 'static>(
    instance: &(dyn Any + Send + Sync),
) -> Result<Arc<U>> {
    instance.downcast_ref::<Arc<U>>().cloned().ok_or_else(|| {
        AutoconfError::Config(format!(
            "Registration for {} produced an instance of another type",
            std::any::type_name::<U>()
        ))
    })
}

/// Fluent handle on the registration just added.
///
/// ```ignore
/// builder
///     .register_configuration::<MyTestConfig>()
///     .single_instance()
///     .as_service::<dyn MyTestSettings>(|c| c as Arc<dyn MyTestSettings>);
/// ```
pub struct RegistrationBuilder<'a, T: ?Sized> {
    builder: &'a mut ContainerBuilder,
    _marker: PhantomData<fn() -> T>,
}

impl<'a, T: ?Sized + Send + Sync + 'static> RegistrationBuilder<'a, T> {
    pub(crate) fn new(builder: &'a mut ContainerBuilder) -> Self {
        Self {
            builder,
            _marker: PhantomData,
        }
    }

    fn set_lifetime(self, lifetime: Lifetime) -> Self {
        if let Some(registration) = self.builder.registrations.get_mut(&TypeId::of::<T>()) {
            registration.lifetime = lifetime;
        }
        self
    }

    /// Share one instance for the container's lifetime
    pub fn single_instance(self) -> Self {
        self.set_lifetime(Lifetime::SingleInstance)
    }

    /// Create a new instance on every resolution (the default)
    pub fn instance_per_dependency(self) -> Self {
        self.set_lifetime(Lifetime::InstancePerDependency)
    }

    /// Also expose this service as `U`, typically a trait object.
    ///
    /// Resolving `U` resolves `T` (honoring its lifetime) and converts it.
    pub fn as_service<U>(self, convert: fn(Arc<T>) -> Arc<U>) -> Self
    where
        U: ?Sized + Send + Sync + 'static,
    {
        let factory: Factory = Arc::new(move |container: &Container| {
            let service = container.resolve::<T>()?;
            Ok(Box::new(convert(service)) as Instance)
        });
        self.builder
            .insert::<U>(Lifetime::InstancePerDependency, factory);
        self
    }
}
