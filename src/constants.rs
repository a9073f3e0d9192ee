//! Global Constants
//!
//! Centralized constants for configuration loading and resolution logging.

/// Configuration loading constants
pub mod loader {
    /// Environment variable prefix (e.g. `AUTOCONF_MYTESTCONFIG__PROPINT`)
    pub const ENV_PREFIX: &str = "AUTOCONF_";

    /// Separator between nested keys in environment variable names
    pub const ENV_SEPARATOR: &str = "__";

    /// Settings files picked up from the working directory, in merge order
    pub const DEFAULT_FILES: &[&str] = &["appsettings.toml", "appsettings.json"];
}

/// Resolution log constants
pub mod logging {
    /// Opens every configuration log line, followed by the section name
    pub const PREFIX_OPEN: &str = "Configuration of '";

    /// Closes the section name in the prefix
    pub const PREFIX_CLOSE: &str = "':";
}
