//! Configuration Logging
//!
//! Decides whether a resolved configuration is logged and builds the message:
//!
//! 1. Acquire a [`Logger<T>`] (absent logger = no logging, no error)
//! 2. Check the INFO level on the logger's sink
//! 3. Build a [`LogRecord`] from the non-null fields in declaration order
//! 4. Emit it once at INFO

mod adapter;
mod record;
mod sink;
mod value;

pub use adapter::log_configuration;
pub use record::LogRecord;
pub use sink::{LogSink, Logger, LoggerFactory, SharedSink, TracingSink};
pub use value::FieldValue;
