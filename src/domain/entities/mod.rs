//! # Domain Entities
//!
//! Records that flow through one search request.
//!
//! ## Entities
//!
//! - [`Offer`]: Priced option from one platform
//! - [`Deal`]: Discount record for one platform
//! - [`Intent`]: Structured interpretation of a query
//! - [`PipelineState`]: Per-request state machine record
//!
//! ## Supporting Types
//!
//! - [`Filters`]: String-keyed filter mapping
//! - [`UserPreferences`]: Caller-scoped preferences

pub mod deal;
pub mod filters;
pub mod intent;
pub mod offer;
pub mod pipeline_state;
pub mod preferences;

pub use deal::{Deal, DealBuilder, ValidityWindow};
pub use filters::Filters;
pub use intent::Intent;
pub use offer::{FeeBreakdown, Offer, OfferBuilder};
pub use pipeline_state::PipelineState;
pub use preferences::{MAX_CHOICE_HISTORY, PreferencesUpdate, RecordedChoice, UserPreferences};
