//! # Source Ports
//!
//! Collaborator interfaces the search pipeline calls.
//!
//! - [`OfferSource`]: one per platform, returns raw offers
//! - [`DealSource`]: returns discount records for a category
//! - [`PreferenceStore`]: returns caller preferences
//!
//! Implementations must be safe to call concurrently. The pipeline bounds
//! every offer and deal call with its own timeout, so an implementation
//! never has to.
//!
//! # Examples
//!
//! ```ignore
//! use smart_dealer::infrastructure::sources::traits::OfferSource;
//!
//! #[derive(Debug)]
//! struct MyPlatform { /* ... */ }
//!
//! #[async_trait::async_trait]
//! impl OfferSource for MyPlatform {
//!     // ... implement required methods
//! }
//! ```

use crate::domain::entities::{Deal, Filters, Offer, UserPreferences};
use crate::domain::value_objects::{Category, PlatformId};
use crate::infrastructure::sources::error::SourceResult;
use async_trait::async_trait;
use std::fmt;

/// Offer source for one platform.
#[async_trait]
pub trait OfferSource: Send + Sync + fmt::Debug {
    /// Returns the platform this source fetches from.
    fn platform(&self) -> &PlatformId;

    /// Returns the category this source serves.
    fn category(&self) -> Category;

    /// Searches the platform for `subject`.
    ///
    /// `filters` is read-only and may carry keys this source ignores.
    ///
    /// # Errors
    ///
    /// - `SourceError::Timeout` - Platform did not answer in time
    /// - `SourceError::Unavailable` - Platform is down
    /// - `SourceError::MalformedData` - Response could not be normalised
    async fn search(&self, subject: &str, filters: &Filters) -> SourceResult<Vec<Offer>>;
}

/// Source of discount records.
#[async_trait]
pub trait DealSource: Send + Sync + fmt::Debug {
    /// Returns a name for logs and error messages.
    fn name(&self) -> &str;

    /// Returns deals for `category`.
    ///
    /// May return deals outside their validity window; the pipeline filters
    /// them.
    ///
    /// # Errors
    ///
    /// Returns a `SourceError` if the deals cannot be fetched.
    async fn find_deals(&self, category: Category, filters: &Filters) -> SourceResult<Vec<Deal>>;
}

/// Caller preference lookup.
#[async_trait]
pub trait PreferenceStore: Send + Sync + fmt::Debug {
    /// Returns the preferences of `caller_id`.
    ///
    /// Unknown callers get default preferences rather than an error.
    ///
    /// # Errors
    ///
    /// Returns a `SourceError` if the store cannot be reached.
    async fn get(&self, caller_id: &str) -> SourceResult<UserPreferences>;
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::domain::entities::OfferBuilder;
    use crate::domain::value_objects::Price;
    use crate::infrastructure::sources::error::SourceError;
    use std::sync::Arc;

    #[derive(Debug)]
    struct FixedSource {
        platform: PlatformId,
        fail: bool,
    }

    #[async_trait]
    impl OfferSource for FixedSource {
        fn platform(&self) -> &PlatformId {
            &self.platform
        }

        fn category(&self) -> Category {
            Category::Food
        }

        async fn search(&self, subject: &str, _filters: &Filters) -> SourceResult<Vec<Offer>> {
            if self.fail {
                return Err(SourceError::unavailable(self.platform.clone(), "down"));
            }
            Ok(vec![
                OfferBuilder::new(self.platform.clone(), subject, Price::new(9.5).unwrap()).build(),
            ])
        }
    }

    #[tokio::test]
    async fn offer_source_is_object_safe() {
        let source: Arc<dyn OfferSource> = Arc::new(FixedSource {
            platform: PlatformId::new("grubhub"),
            fail: false,
        });
        let offers = source.search("ramen", &Filters::new()).await.unwrap();
        assert_eq!(offers.len(), 1);
        assert_eq!(offers.first().map(Offer::name), Some("ramen"));
        assert_eq!(source.category(), Category::Food);
    }

    #[tokio::test]
    async fn offer_source_failure_surfaces_as_source_error() {
        let source = FixedSource {
            platform: PlatformId::new("grubhub"),
            fail: true,
        };
        let err = source.search("ramen", &Filters::new()).await.unwrap_err();
        assert!(matches!(err, SourceError::Unavailable { .. }));
    }
}
