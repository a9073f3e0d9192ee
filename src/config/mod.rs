//! Configuration Sources
//!
//! Hierarchical configuration the resolver reads sections from:
//! 1. Serialized defaults
//! 2. Settings files (appsettings.toml / appsettings.json)
//! 3. Environment variables (AUTOCONF_*)

mod loader;
mod source;

pub use loader::ConfigLoader;
pub use source::{ConfigSource, find_key, normalize_key};
