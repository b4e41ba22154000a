//! # Simulated Platform Adapters
//!
//! Offer sources that synthesise plausible offers instead of calling real
//! platform APIs.
//!
//! Every platform has a profile with its own price, fee, timing and rating
//! ranges. A source sleeps for the configured latency, optionally fails at
//! the configured rate, then draws one or more offers from its profile.
//!
//! With a seed, output depends only on `(seed, platform, subject)`, so
//! tests and demos are reproducible.

mod food;
mod hotel;
mod product;
mod ride;

use crate::domain::entities::{Filters, Offer};
use crate::domain::value_objects::{Category, PlatformId, Price};
use crate::infrastructure::sources::catalog::StaticDealSource;
use crate::infrastructure::sources::error::{SourceError, SourceResult};
use crate::infrastructure::sources::platforms::{category_of, platforms_for};
use crate::infrastructure::sources::registry::SourceRegistry;
use crate::infrastructure::sources::traits::OfferSource;
use async_trait::async_trait;
use rand::rngs::StdRng;
use rand::seq::IndexedRandom;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;

/// Tuning of the simulated platforms.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    /// Simulated network latency per call.
    pub latency_ms: u64,
    /// RNG seed; random output when absent.
    pub seed: Option<u64>,
    /// Probability in `[0, 1]` that a call fails as unavailable.
    pub failure_rate: f64,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            latency_ms: 100,
            seed: None,
            failure_rate: 0.0,
        }
    }
}

impl SimulationConfig {
    /// Sets the latency.
    #[must_use]
    pub fn with_latency_ms(mut self, latency_ms: u64) -> Self {
        self.latency_ms = latency_ms;
        self
    }

    /// Sets the seed.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Sets the failure rate, clamped to `[0, 1]`.
    #[must_use]
    pub fn with_failure_rate(mut self, failure_rate: f64) -> Self {
        self.failure_rate = clamp_rate(failure_rate);
        self
    }
}

#[derive(Debug, Clone)]
enum Profile {
    Food(food::FoodProfile),
    Product(product::ProductProfile),
    Ride(ride::RideProfile),
    Hotel(hotel::HotelProfile),
}

impl Profile {
    fn for_platform(name: &str, category: Category) -> Option<Self> {
        match category {
            Category::Food => food::profile(name).map(Self::Food),
            Category::Product => product::profile(name).map(Self::Product),
            Category::Ride => ride::profile(name).map(Self::Ride),
            Category::Hotel => hotel::profile(name).map(Self::Hotel),
        }
    }

    fn generate(
        &self,
        rng: &mut StdRng,
        platform: &PlatformId,
        subject: &str,
        filters: &Filters,
    ) -> Vec<Offer> {
        match self {
            Self::Food(p) => p.generate(rng, platform, subject),
            Self::Product(p) => p.generate(rng, platform, subject),
            Self::Ride(p) => p.generate(rng, platform, subject, filters),
            Self::Hotel(p) => p.generate(rng, platform, filters),
        }
    }
}

/// Simulated offer source for one known platform.
#[derive(Debug, Clone)]
pub struct SimulatedOfferSource {
    platform: PlatformId,
    category: Category,
    profile: Profile,
    latency: Duration,
    seed: Option<u64>,
    failure_rate: f64,
}

impl SimulatedOfferSource {
    /// Creates the source for a known platform name, or `None` if the
    /// platform has no profile.
    #[must_use]
    pub fn new(platform: &str, config: &SimulationConfig) -> Option<Self> {
        let platform = PlatformId::new(platform);
        let category = category_of(&platform)?;
        let profile = Profile::for_platform(platform.as_str(), category)?;
        Some(Self {
            platform,
            category,
            profile,
            latency: Duration::from_millis(config.latency_ms),
            seed: config.seed,
            failure_rate: clamp_rate(config.failure_rate),
        })
    }

    fn rng_for(&self, subject: &str) -> StdRng {
        match self.seed {
            Some(seed) => {
                let mut hasher = DefaultHasher::new();
                self.platform.hash(&mut hasher);
                subject.hash(&mut hasher);
                StdRng::seed_from_u64(seed ^ hasher.finish())
            }
            None => StdRng::from_os_rng(),
        }
    }
}

#[async_trait]
impl OfferSource for SimulatedOfferSource {
    fn platform(&self) -> &PlatformId {
        &self.platform
    }

    fn category(&self) -> Category {
        self.category
    }

    async fn search(&self, subject: &str, filters: &Filters) -> SourceResult<Vec<Offer>> {
        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }

        let mut rng = self.rng_for(subject);
        if self.failure_rate > 0.0 && rng.random_bool(self.failure_rate) {
            return Err(SourceError::unavailable(
                self.platform.clone(),
                "simulated outage",
            ));
        }

        let offers = self.profile.generate(&mut rng, &self.platform, subject, filters);
        debug!(platform = %self.platform, count = offers.len(), "simulated offers generated");
        Ok(offers)
    }
}

/// Builds a registry with every simulated platform and the static deal
/// catalog.
#[must_use]
pub fn simulated_registry(config: &SimulationConfig) -> SourceRegistry {
    let mut registry = SourceRegistry::new();
    for category in Category::ALL {
        for name in platforms_for(category) {
            if let Some(source) = SimulatedOfferSource::new(name, config) {
                registry.register_offer_source(Arc::new(source));
            }
        }
    }
    registry.register_deal_source(Arc::new(StaticDealSource::new()));
    registry
}

fn clamp_rate(rate: f64) -> f64 {
    if rate.is_finite() {
        rate.clamp(0.0, 1.0)
    } else {
        0.0
    }
}

fn uniform(rng: &mut StdRng, (low, high): (f64, f64)) -> f64 {
    rng.random_range(low..=high)
}

fn int_between(rng: &mut StdRng, (low, high): (u32, u32)) -> u32 {
    rng.random_range(low..=high)
}

fn pick<T: Copy>(rng: &mut StdRng, choices: &[T], fallback: T) -> T {
    choices.choose(rng).copied().unwrap_or(fallback)
}

fn round_to(value: f64, places: i32) -> f64 {
    let factor = 10f64.powi(places);
    (value * factor).round() / factor
}

fn money(value: f64) -> Price {
    Price::from_f64_lossy(value)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn seeded() -> SimulationConfig {
        SimulationConfig::default().with_latency_ms(0).with_seed(7)
    }

    #[test]
    fn unknown_platform_has_no_source() {
        assert!(SimulatedOfferSource::new("myspace", &seeded()).is_none());
    }

    #[test]
    fn registry_covers_all_platforms() {
        let registry = simulated_registry(&seeded());
        assert_eq!(registry.offer_source_count(), 17);
        for category in Category::ALL {
            assert!(registry.has_offer_sources(category));
        }
        assert_eq!(registry.deal_sources().len(), 1);
    }

    #[tokio::test]
    async fn seeded_sources_are_reproducible() {
        let source = SimulatedOfferSource::new("doordash", &seeded()).unwrap();
        let first = source.search("pad thai", &Filters::new()).await.unwrap();
        let second = source.search("pad thai", &Filters::new()).await.unwrap();

        let totals = |offers: &[Offer]| offers.iter().map(Offer::total_price).collect::<Vec<_>>();
        assert_eq!(totals(&first), totals(&second));
    }

    #[tokio::test]
    async fn generated_offers_keep_breakdown_in_sync() {
        let registry = simulated_registry(&seeded());
        for category in Category::ALL {
            for source in registry.offer_sources_for(category, None) {
                let offers = source.search("anything", &Filters::new()).await.unwrap();
                assert!(!offers.is_empty());
                for offer in offers {
                    assert_eq!(offer.platform(), source.platform());
                    let fees = offer.fees().unwrap();
                    assert_eq!(fees.total, offer.total_price());
                }
            }
        }
    }

    #[tokio::test]
    async fn certain_failure_is_unavailable() {
        let config = seeded().with_failure_rate(1.0);
        let source = SimulatedOfferSource::new("uber", &config).unwrap();
        let err = source.search("airport", &Filters::new()).await.unwrap_err();
        assert!(matches!(err, SourceError::Unavailable { .. }));
    }

    #[test]
    fn failure_rate_is_clamped() {
        assert_eq!(SimulationConfig::default().with_failure_rate(3.0).failure_rate, 1.0);
        assert_eq!(SimulationConfig::default().with_failure_rate(f64::NAN).failure_rate, 0.0);
    }

    #[test]
    fn rounding_helper() {
        assert_eq!(round_to(4.567, 1), 4.6);
        assert_eq!(round_to(4.567, 2), 4.57);
    }
}
