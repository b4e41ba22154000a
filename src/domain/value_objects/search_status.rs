//! # Search Status
//!
//! Lifecycle state machine of one search request.
//!
//! # State Machine
//!
//! ```text
//! Pending → Processing → Completed
//!    ↓          ├──────→ Partial
//!    └──────────┴──────→ Failed
//! ```
//!
//! # Examples
//!
//! ```
//! use smart_dealer::domain::value_objects::SearchStatus;
//!
//! let status = SearchStatus::Pending;
//! assert!(status.can_transition_to(SearchStatus::Processing));
//! assert!(!status.can_transition_to(SearchStatus::Completed));
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;

/// Search request lifecycle state.
///
/// # Terminal States
///
/// - [`Completed`](SearchStatus::Completed) - every stage ran without recorded errors
/// - [`Partial`](SearchStatus::Partial) - every stage ran, some sources failed
/// - [`Failed`](SearchStatus::Failed) - the request could not be routed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[repr(u8)]
pub enum SearchStatus {
    /// Created, no stage has run yet.
    #[default]
    Pending = 0,

    /// Intent parsed, stages in progress.
    Processing = 1,

    /// Finished without recorded errors (terminal).
    Completed = 2,

    /// Request could not be served (terminal).
    Failed = 3,

    /// Finished, but at least one source failed (terminal).
    Partial = 4,
}

impl SearchStatus {
    /// Returns true if this is a terminal state.
    #[inline]
    #[must_use]
    pub const fn is_terminal(&self) -> bool {
        matches!(self, Self::Completed | Self::Failed | Self::Partial)
    }

    /// Returns true if this state can transition to the target state.
    ///
    /// - Pending → Processing, Failed
    /// - Processing → Completed, Partial, Failed
    /// - Terminal states → (none)
    #[must_use]
    pub const fn can_transition_to(&self, target: Self) -> bool {
        matches!(
            (self, target),
            (Self::Pending, Self::Processing)
                | (Self::Pending, Self::Failed)
                | (Self::Processing, Self::Completed)
                | (Self::Processing, Self::Partial)
                | (Self::Processing, Self::Failed)
        )
    }

    /// Returns the valid next states from this state.
    #[must_use]
    pub fn valid_transitions(&self) -> Vec<Self> {
        [
            Self::Pending,
            Self::Processing,
            Self::Completed,
            Self::Failed,
            Self::Partial,
        ]
        .into_iter()
        .filter(|target| self.can_transition_to(*target))
        .collect()
    }

    /// Returns the lowercase wire name.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Processing => "processing",
            Self::Completed => "completed",
            Self::Failed => "failed",
            Self::Partial => "partial",
        }
    }
}

impl fmt::Display for SearchStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
