//! # In-Memory Stores
//!
//! ## Available Stores
//!
//! - [`InMemoryPreferenceStore`]: Caller preferences and choice history
//!
//! ## Thread Safety
//!
//! All implementations use `Arc<RwLock<HashMap>>` for thread-safe access.

pub mod preference_store;

pub use preference_store::InMemoryPreferenceStore;
