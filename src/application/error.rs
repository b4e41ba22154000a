//! # Application Errors
//!
//! Error types for the application layer.
//!
//! The search pipeline itself never returns these; it reports failure
//! through the response status. They surface from request validation,
//! settings loading and the preference store.
//!
//! # Error Hierarchy
//!
//! ```text
//! ApplicationError
//! ├── Domain(DomainError)     - Business rule violations
//! ├── Validation(String)      - Request validation failures
//! ├── Configuration(String)   - Settings could not be loaded
//! └── Internal(String)        - Anything else
//! ```
//!
//! # Examples
//!
//! ```
//! use smart_dealer::application::error::ApplicationError;
//!
//! let err = ApplicationError::validation("query must be 3-500 characters");
//! assert!(err.is_validation());
//! assert_eq!(err.to_string(), "validation error: query must be 3-500 characters");
//! ```

use crate::domain::errors::DomainError;
use thiserror::Error;

/// Application layer error.
#[derive(Debug, Error)]
pub enum ApplicationError {
    /// Domain error from business logic.
    #[error("domain error: {0}")]
    Domain(#[from] DomainError),

    /// Request validation failed.
    #[error("validation error: {0}")]
    Validation(String),

    /// Settings could not be loaded or are invalid.
    #[error("configuration error: {0}")]
    Configuration(String),

    /// Internal error.
    #[error("internal error: {0}")]
    Internal(String),
}

impl ApplicationError {
    /// Creates a validation error.
    #[must_use]
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    /// Creates a configuration error.
    #[must_use]
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration(message.into())
    }

    /// Creates an internal error.
    #[must_use]
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal(message.into())
    }

    /// Returns true if this is a validation error.
    #[must_use]
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }
}

impl From<config::ConfigError> for ApplicationError {
    fn from(err: config::ConfigError) -> Self {
        Self::Configuration(err.to_string())
    }
}

/// Result type for application operations.
pub type ApplicationResult<T> = Result<T, ApplicationError>;
