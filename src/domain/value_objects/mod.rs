//! # Value Objects
//!
//! Immutable types with validation and domain semantics.
//!
//! ## Identity Types
//!
//! - [`SessionId`], [`OfferId`], [`DealId`]: UUID-based identifiers
//! - [`PlatformId`]: String-based platform identifier
//!
//! ## Numeric Types
//!
//! - [`Price`]: Non-negative decimal money amount
//!
//! ## Domain Enums
//!
//! - [`Category`]: Food, product, ride or hotel
//! - [`DealKind`]: Promo code, cashback, seasonal sale, ...
//! - [`SearchStatus`]: Search request lifecycle states

pub mod enums;
pub mod ids;
pub mod price;
pub mod search_status;

pub use enums::{Category, DealKind, ParseEnumError};
pub use ids::{DealId, OfferId, PlatformId, SessionId};
pub use price::Price;
pub use search_status::SearchStatus;
