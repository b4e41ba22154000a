//! # Sources
//!
//! Ports for the collaborators the search pipeline calls, and the adapters
//! that ship with the crate.
//!
//! ## Ports
//!
//! - [`OfferSource`]: Offers from one platform
//! - [`DealSource`]: Discount records for a category
//! - [`PreferenceStore`]: Caller preferences
//!
//! ## Adapters
//!
//! - [`SimulatedOfferSource`]: Synthetic offers for the 17 known platforms
//! - [`StaticDealSource`]: Built-in sample deals
//!
//! [`SourceRegistry`] holds the adapters the pipeline may route to.

pub mod catalog;
pub mod error;
pub mod platforms;
pub mod registry;
pub mod simulated;
pub mod traits;

pub use catalog::StaticDealSource;
pub use error::{SourceError, SourceResult};
pub use registry::SourceRegistry;
pub use simulated::{SimulatedOfferSource, SimulationConfig, simulated_registry};
pub use traits::{DealSource, OfferSource, PreferenceStore};
