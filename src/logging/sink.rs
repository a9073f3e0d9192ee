//! Log Sinks and Typed Loggers
//!
//! - [`LogSink`]: back-end capability, level check + templated emission
//! - [`Logger<T>`]: sink handle scoped to one configuration type
//! - [`LoggerFactory`]: hands out a `Logger<T>` for any `T`
//! - [`TracingSink`]: forwards to the `tracing` facade

use std::fmt;
use std::marker::PhantomData;
use std::sync::Arc;

use tracing::Level;

use super::record::LogRecord;
use crate::types::Result;

/// Logging back-end accepting level-gated structured messages
pub trait LogSink: Send + Sync {
    /// Whether messages at `level` for `category` would be recorded
    fn is_enabled(&self, category: &str, level: Level) -> bool;

    /// Emit one record at `level`
    fn log(&self, category: &str, level: Level, record: &LogRecord) -> Result<()>;
}

/// Shared sink handle
pub type SharedSink = Arc<dyn LogSink>;

// =============================================================================
// Typed Logger
// =============================================================================

/// A sink scoped to type `T`.
///
/// The category is the full Rust path of `T`.
pub struct Logger<T: ?Sized> {
    sink: SharedSink,
    category: &'static str,
    _marker: PhantomData<fn() -> T>,
}

impl<T: ?Sized> Logger<T> {
    pub fn new(sink: SharedSink) -> Self {
        Self {
            sink,
            category: std::any::type_name::<T>(),
            _marker: PhantomData,
        }
    }

    pub fn category(&self) -> &'static str {
        self.category
    }

    pub fn is_enabled(&self, level: Level) -> bool {
        self.sink.is_enabled(self.category, level)
    }

    pub fn log(&self, level: Level, record: &LogRecord) -> Result<()> {
        self.sink.log(self.category, level, record)
    }
}

impl<T: ?Sized> Clone for Logger<T> {
    fn clone(&self) -> Self {
        Self {
            sink: Arc::clone(&self.sink),
            category: self.category,
            _marker: PhantomData,
        }
    }
}

impl<T: ?Sized> fmt::Debug for Logger<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Logger")
            .field("category", &self.category)
            .finish()
    }
}

// =============================================================================
// Logger Factory
// =============================================================================

/// Creates typed loggers over one shared sink
#[derive(Clone)]
pub struct LoggerFactory {
    sink: SharedSink,
}

impl LoggerFactory {
    pub fn new(sink: SharedSink) -> Self {
        Self { sink }
    }

    /// Factory over the `tracing` facade
    pub fn tracing() -> Self {
        Self::new(Arc::new(TracingSink))
    }

    pub fn create<T: ?Sized>(&self) -> Logger<T> {
        Logger::new(Arc::clone(&self.sink))
    }
}

impl fmt::Debug for LoggerFactory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoggerFactory").finish_non_exhaustive()
    }
}

// =============================================================================
// Tracing Sink
// =============================================================================

/// Sink backed by the globally installed `tracing` subscriber.
///
/// Level checks go through the subscriber's filter, so `RUST_LOG=autoconf=warn`
/// silences configuration logging.
///
/// Events carry the logger's category as the `category` field, but the
/// enabled check only sees the static target of this module: every
/// `Logger<T>` over this sink is gated by the same directive. Use a custom
/// [`LogSink`] or [`ContainerBuilder::register_logger`] for per-type gating.
///
/// [`ContainerBuilder::register_logger`]: crate::ContainerBuilder::register_logger
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

impl LogSink for TracingSink {
    fn is_enabled(&self, _category: &str, level: Level) -> bool {
        match level {
            Level::ERROR => tracing::enabled!(Level::ERROR),
            Level::WARN => tracing::enabled!(Level::WARN),
            Level::INFO => tracing::enabled!(Level::INFO),
            Level::DEBUG => tracing::enabled!(Level::DEBUG),
            _ => tracing::enabled!(Level::TRACE),
        }
    }

    fn log(&self, category: &str, level: Level, record: &LogRecord) -> Result<()> {
        let template = record.template();
        match level {
            Level::ERROR => tracing::error!(category, template, "{}", record),
            Level::WARN => tracing::warn!(category, template, "{}", record),
            Level::INFO => tracing::info!(category, template, "{}", record),
            Level::DEBUG => tracing::debug!(category, template, "{}", record),
            _ => tracing::trace!(category, template, "{}", record),
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logging::testing::RecordingSink;

    struct Sample;

    #[test]
    fn test_logger_category_is_type_path() {
        let logger: Logger<Sample> = Logger::new(Arc::new(RecordingSink::enabled()));
        assert!(logger.category().ends_with("::Sample"));
    }

    #[test]
    fn test_factory_creates_loggers_over_same_sink() {
        let sink = Arc::new(RecordingSink::enabled());
        let factory = LoggerFactory::new(sink.clone());
        let logger = factory.create::<Sample>();

        let record = LogRecord::for_section("Sample", &Default::default());
        logger.log(Level::INFO, &record).unwrap();

        let entries = sink.entries();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].category, logger.category());
        assert_eq!(entries[0].level, Level::INFO);
        assert_eq!(entries[0].message, "Configuration of 'Sample':");
    }

    #[test]
    fn test_logger_forwards_level_check() {
        let logger: Logger<Sample> = Logger::new(Arc::new(RecordingSink::disabled()));
        assert!(!logger.is_enabled(Level::INFO));
        assert!(!logger.is_enabled(Level::ERROR));
    }

    #[test]
    fn test_tracing_sink_without_subscriber_is_disabled() {
        // no subscriber installed for this thread
        assert!(!TracingSink.is_enabled("any", Level::INFO));
    }

    #[test]
    fn test_tracing_sink_ignores_category() {
        let subscriber = tracing_subscriber::fmt()
            .with_max_level(Level::INFO)
            .with_test_writer()
            .finish();

        tracing::subscriber::with_default(subscriber, || {
            assert_eq!(
                TracingSink.is_enabled("app::Quiet", Level::INFO),
                TracingSink.is_enabled("app::Loud", Level::INFO)
            );
            assert!(!TracingSink.is_enabled("app::Loud", Level::DEBUG));
        });
    }

    #[test]
    fn test_tracing_sink_respects_subscriber_level() {
        let subscriber = tracing_subscriber::fmt()
            .with_max_level(Level::WARN)
            .with_test_writer()
            .finish();

        tracing::subscriber::with_default(subscriber, || {
            assert!(TracingSink.is_enabled("any", Level::WARN));
            assert!(!TracingSink.is_enabled("any", Level::INFO));
        });
    }
}
