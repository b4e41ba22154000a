//! # Domain Layer
//!
//! Core types and rules of offer comparison, free of I/O.
//!
//! - [`value_objects`]: Categories, platform IDs, money, search status
//! - [`entities`]: Offers, deals, intents, pipeline state
//! - [`services`]: Intent parsing and discount application
//! - [`errors`]: Domain rule violations

pub mod entities;
pub mod errors;
pub mod services;
pub mod value_objects;

pub use errors::{DomainError, DomainResult};
