//! # Domain Errors
//!
//! Errors raised by domain types when an invariant would be violated.

use crate::domain::value_objects::SearchStatus;
use thiserror::Error;

/// Error type for domain rule violations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DomainError {
    /// A money amount was negative or not representable.
    #[error("invalid price: {0}")]
    InvalidPrice(String),

    /// A value failed validation.
    #[error("validation error: {0}")]
    Validation(String),

    /// A search status transition is not allowed by the state machine.
    #[error("invalid status transition: {from} -> {to}")]
    InvalidStatusTransition {
        /// Current status.
        from: SearchStatus,
        /// Requested status.
        to: SearchStatus,
    },
}

impl DomainError {
    /// Creates a validation error.
    #[must_use]
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }
}

/// Result type for domain operations.
pub type DomainResult<T> = Result<T, DomainError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn transition_error_display() {
        let err = DomainError::InvalidStatusTransition {
            from: SearchStatus::Completed,
            to: SearchStatus::Processing,
        };
        assert_eq!(
            err.to_string(),
            "invalid status transition: completed -> processing"
        );
    }
}
