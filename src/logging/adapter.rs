//! Configuration Logging Adapter
//!
//! Logging is a side effect of resolution and never fails it: a missing
//! logger, a disabled level or a failing sink all end quietly.

use tracing::{Level, debug, trace};

use super::record::LogRecord;
use super::sink::Logger;
use crate::binding::Configuration;

/// Log a resolved configuration at INFO through the logger `lookup` yields.
///
/// Emits at most once. The record is only built when INFO is enabled.
pub fn log_configuration<T, L>(config: &T, lookup: L)
where
    T: Configuration,
    L: FnOnce() -> Option<Logger<T>>,
{
    let Some(logger) = lookup() else {
        trace!(
            section = T::section_name(),
            "No logger registered, skipping configuration log"
        );
        return;
    };

    if !logger.is_enabled(Level::INFO) {
        return;
    }

    let record = LogRecord::for_configuration(config);
    if let Err(e) = logger.log(Level::INFO, &record) {
        debug!(
            section = T::section_name(),
            category = logger.category(),
            "Configuration log dropped: {}",
            e
        );
    }
}
