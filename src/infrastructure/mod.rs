//! # Infrastructure Layer
//!
//! Adapters to the outside world.
//!
//! - [`sources`]: Offer, deal and preference ports, plus simulated platforms
//! - [`persistence`]: In-memory preference store
//! - [`config`]: Layered settings
//! - [`telemetry`]: Tracing subscriber setup

pub mod config;
pub mod persistence;
pub mod sources;
pub mod telemetry;
