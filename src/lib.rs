//! # Smart Dealer
//!
//! Multi-platform offer comparison engine.
//!
//! A free-text query such as *"cheapest sushi delivery under $15"* goes
//! through a fixed pipeline:
//!
//! 1. Intent parsing into category, subject, budget, time and location
//! 2. Concurrent fan-out to every offer source of the category, with each
//!    failure isolated
//! 3. Deal lookup and discount application
//! 4. Weighted min-max value ranking
//!
//! # Architecture
//!
//! - [`domain`]: Value objects, entities, intent parser, discount engine
//! - [`application`]: Search pipeline, ranking, request and response types
//! - [`infrastructure`]: Source ports, simulated platforms, preference
//!   store, settings, telemetry
//!
//! # Examples
//!
//! ```no_run
//! use smart_dealer::application::SearchRequest;
//! use smart_dealer::application::services::SearchPipeline;
//! use smart_dealer::infrastructure::sources::{SimulationConfig, simulated_registry};
//! use std::sync::Arc;
//!
//! # async fn run() {
//! let registry = simulated_registry(&SimulationConfig::default().with_seed(7));
//! let pipeline = SearchPipeline::with_defaults(Arc::new(registry));
//!
//! let response = pipeline
//!     .execute(SearchRequest::new("Find me the cheapest sushi delivery under $15"))
//!     .await;
//! println!("{} offers, status {}", response.result_count, response.status);
//! # }
//! ```

pub mod application;
pub mod domain;
pub mod infrastructure;
