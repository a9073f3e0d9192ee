//! Unified Error Type System
//!
//! Centralized error type for configuration resolution, the container and the CLI.
//!
//! ## Error Policy
//!
//! - **Missing section / leaf / sink**: not an error, resolution falls back to defaults
//! - **Bind**: a single leaf could not be converted; only ever logged, never returned
//!   from a resolution
//! - **Source**: the configuration source itself failed; propagated unchanged
//! - **NotRegistered**: a service was requested from the container without a registration

use thiserror::Error;

// =============================================================================
// Application Error
// =============================================================================

#[derive(Debug, Error)]
pub enum AutoconfError {
    // -------------------------------------------------------------------------
    // System Errors (auto From impl)
    // -------------------------------------------------------------------------
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// The configuration source could not produce its tree (bad file, bad env, ...)
    #[error("Configuration source error: {0}")]
    Source(#[from] figment::Error),

    // -------------------------------------------------------------------------
    // Binding Errors
    // -------------------------------------------------------------------------
    /// A leaf value could not be converted to the field's type
    #[error("Cannot bind value as {expected}: {reason}")]
    Bind {
        expected: &'static str,
        reason: String,
    },

    // -------------------------------------------------------------------------
    // Container Errors
    // -------------------------------------------------------------------------
    #[error("Service not registered: {service}")]
    NotRegistered { service: &'static str },

    // -------------------------------------------------------------------------
    // Logging / Config Errors
    // -------------------------------------------------------------------------
    #[error("Log sink error: {0}")]
    Sink(String),

    #[error("Config error: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, AutoconfError>;

// =============================================================================
// Helper Functions
// =============================================================================

impl AutoconfError {
    /// Create a bind error for target type `T`
    pub fn bind<T: ?Sized>(reason: impl std::fmt::Display) -> Self {
        Self::Bind {
            expected: std::any::type_name::<T>(),
            reason: reason.to_string(),
        }
    }

    /// Create a not-registered error for service `T`
    pub fn not_registered<T: ?Sized>() -> Self {
        Self::NotRegistered {
            service: std::any::type_name::<T>(),
        }
    }

    /// Check if this error came from the configuration source
    pub fn is_source_error(&self) -> bool {
        matches!(self, Self::Source(_))
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bind_error_names_target_type() {
        let err = AutoconfError::bind::<i32>("invalid digit found in string");
        assert_eq!(
            err.to_string(),
            "Cannot bind value as i32: invalid digit found in string"
        );
    }

    #[test]
    fn test_not_registered_display() {
        let err = AutoconfError::not_registered::<String>();
        assert!(err.to_string().contains("alloc::string::String"));
        assert!(!err.is_source_error());
    }

    #[test]
    fn test_json_error_from_serde() {
        let err: AutoconfError = serde_json::from_str::<serde_json::Value>("{").unwrap_err().into();
        assert!(matches!(err, AutoconfError::Json(_)));
        assert!(!err.is_source_error());
    }

    #[test]
    fn test_source_error_from_figment() {
        let err: AutoconfError = figment::Error::from("broken".to_string()).into();
        assert!(err.is_source_error());
        assert!(err.to_string().starts_with("Configuration source error"));
    }
}
