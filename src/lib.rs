//! autoconf - Typed Configuration Sections with Resolution Logging
//!
//! Binds strongly-typed configuration objects from the section named after
//! their type and logs the resolved values once, at INFO, when a logger is
//! available.
//!
//! ## Core Features
//!
//! - **Section Binding**: case-insensitive keys, lenient leaf conversion,
//!   per-field fallback to defaults
//! - **Resolution Logging**: `Configuration of 'T': Name=Value ...` through
//!   any [`LogSink`], `tracing` by default
//! - **Layered Sources**: TOML/JSON settings files and `AUTOCONF_*` env vars
//!   via figment
//! - **Container**: type-keyed registrations with singleton and per-dependency
//!   lifetimes
//!
//! ## Quick Start
//!
//! ```ignore
//! use std::sync::Arc;
//! use autoconf::{ConfigLoader, ContainerBuilder, TracingSink};
//!
//! autoconf::configuration! {
//!     #[derive(Debug, Default)]
//!     pub struct MyTestConfig {
//!         pub prop_int: i32 => "PropInt",
//!         pub prop_string: String => "PropString",
//!     }
//! }
//!
//! let mut builder = ContainerBuilder::new();
//! builder.register_source(ConfigLoader::load()?);
//! builder.register_logging(Arc::new(TracingSink));
//! builder.register_configuration::<MyTestConfig>();
//!
//! let config = builder.build().resolve::<MyTestConfig>()?;
//! // INFO Configuration of 'MyTestConfig': PropInt=123 PropString=abc
//! ```
//!
//! ## Modules
//!
//! - [`binding`]: configuration trait, field descriptors, section resolver
//! - [`logging`]: log records, sinks, the resolution logging adapter
//! - [`config`]: configuration sources and the figment loader
//! - [`container`]: service registration and resolution

pub mod binding;
pub mod cli;
pub mod config;
pub mod constants;
pub mod container;
pub mod logging;
pub mod types;

// =============================================================================
// Core Re-exports
// =============================================================================

// Binding (also used by the `configuration!` macro expansion)
pub use binding::{
    ConfigField, Configuration, Field, bind_section, resolve_config, resolve_section,
};
pub use figment::value::{Dict, Value};

// Configuration sources
pub use config::{ConfigLoader, ConfigSource};

// Container
pub use container::{Container, ContainerBuilder, Lifetime, RegistrationBuilder};

// Logging
pub use logging::{FieldValue, LogRecord, LogSink, Logger, LoggerFactory, SharedSink, TracingSink};

// Error Types
pub use types::error::{AutoconfError, Result};
