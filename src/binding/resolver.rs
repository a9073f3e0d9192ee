//! Configuration Resolver
//!
//! Locates the section named after a configuration type, binds its leaves onto
//! a fresh default instance and hands the result to the logging adapter.
//!
//! ## Policy
//!
//! - Missing section: default instance, no binding attempted
//! - Section that is not a table: default instance, warning
//! - Missing or null leaf: field keeps its default
//! - Unconvertible leaf: field keeps its default, warning
//! - Unmatched leaves: ignored
//! - Source failure: propagated

use figment::value::{Dict, Value};
use tracing::{debug, warn};

use super::Configuration;
use crate::config::{ConfigSource, find_key};
use crate::logging::{Logger, log_configuration};
use crate::types::{AutoconfError, Result};

/// Bind a section value onto a default `T`.
///
/// Fails only when `section` is not a table.
pub fn bind_section<T: Configuration>(section: &Value) -> Result<T> {
    let dict = section.as_dict().ok_or_else(|| {
        AutoconfError::bind::<T>("section is a single value, expected a table")
    })?;
    Ok(bind_dict(dict))
}

fn bind_dict<T: Configuration>(dict: &Dict) -> T {
    let mut config = T::default();

    for field in T::fields() {
        let Some(value) = find_key(dict, field.name()) else {
            continue;
        };
        if matches!(value, Value::Empty(..)) {
            continue;
        }
        if let Err(e) = field.bind(&mut config, value) {
            warn!(
                section = T::section_name(),
                field = field.name(),
                "Ignoring configuration value: {}",
                e
            );
        }
    }

    config
}

/// Resolve `T` from its section without logging.
///
/// Never fails for a missing or malformed section; only source errors
/// propagate.
pub fn resolve_section<T: Configuration>(source: &dyn ConfigSource) -> Result<T> {
    let name = T::section_name();

    let Some(section) = source.section(name)? else {
        debug!(section = name, "Section not found, using defaults");
        return Ok(T::default());
    };

    match bind_section::<T>(&section) {
        Ok(config) => Ok(config),
        Err(e) => {
            warn!(section = name, "Using defaults: {}", e);
            Ok(T::default())
        }
    }
}

/// Resolve `T` from its section and log the result.
///
/// `logger` is only called after binding; returning `None` skips logging.
pub fn resolve_config<T, L>(source: &dyn ConfigSource, logger: L) -> Result<T>
where
    T: Configuration,
    L: FnOnce() -> Option<Logger<T>>,
{
    let config = resolve_section::<T>(source)?;
    log_configuration(&config, logger);
    Ok(config)
}
