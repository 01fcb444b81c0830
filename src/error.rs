//! Error types for the Restaurant Desk server.
//!
//! This module defines custom error types using `thiserror` for precise error handling.

use crate::domain::FormValidation;
use thiserror::Error;

/// Errors raised by stores and services.
#[derive(Error, Debug)]
pub enum DeskError {
    /// Record not found
    #[error("Not found: {0}")]
    NotFound(String),

    /// Record already exists or clashes with another record
    #[error("Conflict: {0}")]
    Conflict(String),

    /// Request is well-formed but cannot be honoured
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// Form input failed validation
    #[error("Validation failed: {0}")]
    Validation(FormValidation),
}

/// Errors that can occur during configuration loading.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Environment variable has invalid value
    #[error("Invalid value for {var}: {reason}")]
    InvalidValue { var: String, reason: String },

    /// Failed to load .env file
    #[error("Failed to load .env file: {0}")]
    DotenvError(String),
}

/// Convenience type alias for Results with DeskError
pub type DeskResult<T> = Result<T, DeskError>;

/// Convenience type alias for Results with ConfigError
pub type ConfigResult<T> = Result<T, ConfigError>;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::FormValidator;

    #[test]
    fn test_error_display() {
        let err = DeskError::NotFound("reservation res-0001".to_string());
        assert_eq!(err.to_string(), "Not found: reservation res-0001");

        let err = ConfigError::InvalidValue {
            var: "MAX_PARTY_SIZE".to_string(),
            reason: "Must be at least MIN_PARTY_SIZE".to_string(),
        };
        assert!(err.to_string().contains("MAX_PARTY_SIZE"));

        let err = ConfigError::DotenvError("line 1".to_string());
        assert_eq!(err.to_string(), "Failed to load .env file: line 1");
    }

    #[test]
    fn test_validation_error_lists_fields() {
        let mut form = FormValidator::new();
        form.rule("party_size", false, "Party size must be between 1 and 20 guests");
        let err = DeskError::Validation(form.finish());
        assert_eq!(
            err.to_string(),
            "Validation failed: party_size: Party size must be between 1 and 20 guests"
        );
    }
}
