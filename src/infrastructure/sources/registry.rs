//! # Source Registry
//!
//! Explicit registry of offer and deal sources, built once at startup and
//! shared with the pipeline.
//!
//! Registration order is kept: sources are selected, spawned and merged in
//! the order they were registered.
//!
//! # Examples
//!
//! ```ignore
//! let registry = SourceRegistry::new()
//!     .with_offer_source(Arc::new(my_food_source))
//!     .with_deal_source(Arc::new(StaticDealSource::new()));
//! assert!(registry.has_offer_sources(Category::Food));
//! ```

use crate::domain::value_objects::{Category, PlatformId};
use crate::infrastructure::sources::traits::{DealSource, OfferSource};
use std::sync::Arc;

/// Registered sources.
#[derive(Debug, Default, Clone)]
pub struct SourceRegistry {
    offer_sources: Vec<Arc<dyn OfferSource>>,
    deal_sources: Vec<Arc<dyn DealSource>>,
}

impl SourceRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers an offer source.
    pub fn register_offer_source(&mut self, source: Arc<dyn OfferSource>) {
        self.offer_sources.push(source);
    }

    /// Registers a deal source.
    pub fn register_deal_source(&mut self, source: Arc<dyn DealSource>) {
        self.deal_sources.push(source);
    }

    /// Builder-style [`register_offer_source`](Self::register_offer_source).
    #[must_use]
    pub fn with_offer_source(mut self, source: Arc<dyn OfferSource>) -> Self {
        self.register_offer_source(source);
        self
    }

    /// Builder-style [`register_deal_source`](Self::register_deal_source).
    #[must_use]
    pub fn with_deal_source(mut self, source: Arc<dyn DealSource>) -> Self {
        self.register_deal_source(source);
        self
    }

    /// Returns true if at least one offer source serves `category`.
    #[must_use]
    pub fn has_offer_sources(&self, category: Category) -> bool {
        self.offer_sources.iter().any(|s| s.category() == category)
    }

    /// Returns the offer sources for `category`, narrowed to `allow` when
    /// given.
    #[must_use]
    pub fn offer_sources_for(
        &self,
        category: Category,
        allow: Option<&[PlatformId]>,
    ) -> Vec<Arc<dyn OfferSource>> {
        self.offer_sources
            .iter()
            .filter(|s| s.category() == category)
            .filter(|s| allow.is_none_or(|list| list.contains(s.platform())))
            .cloned()
            .collect()
    }

    /// Returns every deal source.
    #[must_use]
    pub fn deal_sources(&self) -> &[Arc<dyn DealSource>] {
        &self.deal_sources
    }

    /// Returns the number of registered offer sources.
    #[must_use]
    pub fn offer_source_count(&self) -> usize {
        self.offer_sources.len()
    }
}
