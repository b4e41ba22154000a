//! # Source Errors
//!
//! Error types for offer, deal and preference sources.
//!
//! # Examples
//!
//! ```
//! use smart_dealer::infrastructure::sources::error::SourceError;
//!
//! let error = SourceError::timeout("no answer", 5000);
//! assert_eq!(error.to_string(), "source timeout after 5000ms: no answer");
//!
//! let error = SourceError::malformed_data("missing price");
//! assert_eq!(error.to_string(), "source returned malformed data: missing price");
//! ```

use crate::domain::value_objects::PlatformId;
use thiserror::Error;

/// Error type for source operations.
///
/// A source error never aborts a search; the pipeline records it and moves
/// on with the remaining sources.
#[derive(Debug, Clone, Error)]
pub enum SourceError {
    /// The call did not finish in time.
    #[error("source timeout after {timeout_ms}ms: {message}")]
    Timeout {
        /// Error message.
        message: String,
        /// Timeout duration in milliseconds.
        timeout_ms: u64,
    },

    /// Network or connection error.
    #[error("source connection error: {message}")]
    Connection {
        /// Error message.
        message: String,
    },

    /// Platform is down or not serving this request.
    #[error("source unavailable: {platform} - {message}")]
    Unavailable {
        /// The platform.
        platform: PlatformId,
        /// Error message.
        message: String,
    },

    /// The platform answered with data that cannot be normalised.
    #[error("source returned malformed data: {message}")]
    MalformedData {
        /// Error message.
        message: String,
    },

    /// Internal source error.
    #[error("source internal error: {message}")]
    Internal {
        /// Error message.
        message: String,
    },
}

impl SourceError {
    /// Creates a timeout error.
    #[must_use]
    pub fn timeout(message: impl Into<String>, timeout_ms: u64) -> Self {
        Self::Timeout {
            message: message.into(),
            timeout_ms,
        }
    }

    /// Creates a connection error.
    #[must_use]
    pub fn connection(message: impl Into<String>) -> Self {
        Self::Connection {
            message: message.into(),
        }
    }

    /// Creates an unavailable error.
    #[must_use]
    pub fn unavailable(platform: PlatformId, message: impl Into<String>) -> Self {
        Self::Unavailable {
            platform,
            message: message.into(),
        }
    }

    /// Creates a malformed data error.
    #[must_use]
    pub fn malformed_data(message: impl Into<String>) -> Self {
        Self::MalformedData {
            message: message.into(),
        }
    }

    /// Creates an internal error.
    #[must_use]
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }
}

/// Result type for source operations.
pub type SourceResult<T> = Result<T, SourceError>;
