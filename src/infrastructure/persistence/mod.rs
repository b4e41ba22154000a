//! # Persistence Layer
//!
//! Storage behind the caller-preference port.
//!
//! ## Implementations
//!
//! - `in_memory`: Process-lifetime storage

pub mod in_memory;

pub use in_memory::InMemoryPreferenceStore;
