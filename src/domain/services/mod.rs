//! # Domain Services
//!
//! Stateless rules that operate across entities.
//!
//! ## Services
//!
//! - [`IntentParser`]: Free-text query to [`Intent`](crate::domain::entities::Intent)
//! - [`DiscountEngine`]: Applies deals to offers

pub mod discount_engine;
pub mod intent_parser;

pub use discount_engine::DiscountEngine;
pub use intent_parser::IntentParser;
