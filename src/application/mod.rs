//! # Application Layer
//!
//! Orchestration of domain services over infrastructure ports.
//!
//! - [`services`]: Search pipeline and ranking strategies
//! - [`dto`]: Search request and response
//! - [`error`]: Application errors

pub mod dto;
pub mod error;
pub mod services;

pub use dto::{SearchRequest, SearchResponse};
pub use error::{ApplicationError, ApplicationResult};
