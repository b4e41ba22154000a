//! # Ranking Strategy
//!
//! Strategies for ranking offers.
//!
//! This module provides the [`RankingStrategy`] trait and the
//! [`WeightedValueStrategy`], which min-max normalises five dimensions
//! across the candidate set and combines them with [`RankingWeights`].
//!
//! # Normalisation
//!
//! | Dimension   | Better | Missing value scored as | Range without data |
//! |-------------|--------|-------------------------|--------------------|
//! | price       | lower  | n/a                     | n/a                |
//! | time        | lower  | observed maximum        | `[0, 1]`           |
//! | rating      | higher | observed minimum        | `[0, 5]`           |
//! | fees        | lower  | zero                    | n/a                |
//! | user_pref   | n/a    | constant `0.5`          | n/a                |
//!
//! A degenerate range (`min == max`) scores `1.0` for every offer.

use crate::domain::entities::Offer;
use crate::domain::value_objects::Price;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use tracing::debug;

/// Placeholder score of the user-preference dimension.
pub const USER_PREFERENCE_SCORE: f64 = 0.5;

/// Weight of each scoring dimension.
///
/// Weights need not sum to one.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RankingWeights {
    /// Weight of total price.
    pub price: f64,
    /// Weight of delivery, pickup or shipping time.
    pub time: f64,
    /// Weight of rating.
    pub rating: f64,
    /// Weight of delivery plus service fees.
    pub fees: f64,
    /// Weight of the user-preference placeholder.
    pub user_pref: f64,
}

impl Default for RankingWeights {
    fn default() -> Self {
        Self {
            price: 0.40,
            time: 0.20,
            rating: 0.20,
            fees: 0.10,
            user_pref: 0.10,
        }
    }
}

impl RankingWeights {
    /// Returns a copy with per-key overrides applied.
    ///
    /// Recognised keys are `price`, `time`, `rating`, `fees` and
    /// `user_pref`. Unknown keys and non-finite values are ignored.
    ///
    /// # Examples
    ///
    /// ```
    /// use smart_dealer::application::services::RankingWeights;
    /// use std::collections::HashMap;
    ///
    /// let overrides = HashMap::from([("price".to_string(), 0.9)]);
    /// let weights = RankingWeights::default().with_overrides(&overrides);
    /// assert_eq!(weights.price, 0.9);
    /// assert_eq!(weights.time, 0.2);
    /// ```
    #[must_use]
    pub fn with_overrides(mut self, overrides: &HashMap<String, f64>) -> Self {
        for (key, value) in overrides {
            if !value.is_finite() {
                continue;
            }
            match key.as_str() {
                "price" => self.price = *value,
                "time" => self.time = *value,
                "rating" => self.rating = *value,
                "fees" => self.fees = *value,
                "user_pref" => self.user_pref = *value,
                _ => {}
            }
        }
        self
    }

    /// Returns the sum of all weights.
    #[must_use]
    pub fn total(&self) -> f64 {
        self.price + self.time + self.rating + self.fees + self.user_pref
    }
}

/// Normalised per-dimension scores of one offer, each in `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoreComponents {
    /// Price score.
    pub price: f64,
    /// Time score.
    pub time: f64,
    /// Rating score.
    pub rating: f64,
    /// Fees score.
    pub fees: f64,
    /// User-preference score.
    pub user_pref: f64,
}

impl ScoreComponents {
    /// Returns the weighted sum, unrounded.
    #[must_use]
    pub fn weighted(&self, weights: &RankingWeights) -> f64 {
        weights.price * self.price
            + weights.time * self.time
            + weights.rating * self.rating
            + weights.fees * self.fees
            + weights.user_pref * self.user_pref
    }
}

#[derive(Debug, Clone, Copy)]
struct Span {
    min: f64,
    max: f64,
}

impl Span {
    fn of(values: impl IntoIterator<Item = f64>) -> Option<Self> {
        values.into_iter().fold(None, |span, v| match span {
            None => Some(Self { min: v, max: v }),
            Some(s) => Some(Self {
                min: s.min.min(v),
                max: s.max.max(v),
            }),
        })
    }

    fn lower_is_better(&self, value: f64) -> f64 {
        if self.max <= self.min {
            return 1.0;
        }
        1.0 - (value - self.min) / (self.max - self.min)
    }

    fn higher_is_better(&self, value: f64) -> f64 {
        if self.max <= self.min {
            return 1.0;
        }
        (value - self.min) / (self.max - self.min)
    }
}

/// Computes the normalised components of every offer, in input order.
#[must_use]
pub fn score_components(offers: &[Offer]) -> Vec<ScoreComponents> {
    let prices: Vec<f64> = offers.iter().map(|o| o.total_price().to_f64()).collect();
    let fees: Vec<f64> = offers.iter().map(|o| o.ranked_fees().to_f64()).collect();

    let price_span = Span::of(prices.iter().copied()).unwrap_or(Span { min: 0.0, max: 0.0 });
    let fee_span = Span::of(fees.iter().copied()).unwrap_or(Span { min: 0.0, max: 0.0 });
    let time_span = Span::of(offers.iter().filter_map(|o| o.delivery_time_min().map(f64::from)))
        .unwrap_or(Span { min: 0.0, max: 1.0 });
    let rating_span =
        Span::of(offers.iter().filter_map(Offer::rating)).unwrap_or(Span { min: 0.0, max: 5.0 });

    offers
        .iter()
        .zip(prices.iter().zip(fees.iter()))
        .map(|(offer, (price, fee))| {
            let time = offer.delivery_time_min().map_or(time_span.max, f64::from);
            let rating = offer.rating().unwrap_or(rating_span.min);
            ScoreComponents {
                price: price_span.lower_is_better(*price),
                time: time_span.lower_is_better(time),
                rating: rating_span.higher_is_better(rating),
                fees: fee_span.lower_is_better(*fee),
                user_pref: USER_PREFERENCE_SCORE,
            }
        })
        .collect()
}

fn round_score(score: f64) -> f64 {
    (score * 10_000.0).round() / 10_000.0
}

/// Trait for ranking strategies.
///
/// Implementations consume the candidate offers and return them sorted
/// best first, with `value_score`, `savings_vs_max` and a dense 1-based
/// `rank` set on each.
pub trait RankingStrategy: Send + Sync + fmt::Debug {
    /// Ranks the given offers.
    fn rank(&self, offers: Vec<Offer>, weights: &RankingWeights) -> Vec<Offer>;

    /// Returns the name of this ranking strategy.
    fn name(&self) -> &'static str;
}

/// Weighted multi-criteria value ranking.
///
/// `value_score` is the weighted sum of [`ScoreComponents`] rounded to four
/// decimals. Sorting is stable, so offers with equal scores keep the order
/// they arrived in.
#[derive(Debug, Clone, Copy, Default)]
pub struct WeightedValueStrategy;

impl WeightedValueStrategy {
    /// Creates a new weighted value strategy.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl RankingStrategy for WeightedValueStrategy {
    fn rank(&self, offers: Vec<Offer>, weights: &RankingWeights) -> Vec<Offer> {
        if offers.is_empty() {
            return offers;
        }

        let components = score_components(&offers);
        let max_total = offers
            .iter()
            .map(Offer::total_price)
            .max()
            .unwrap_or(Price::ZERO);

        let mut scored: Vec<(f64, Offer)> = offers
            .into_iter()
            .zip(components)
            .map(|(mut offer, parts)| {
                let score = round_score(parts.weighted(weights));
                let savings = max_total.saturating_sub(offer.total_price()).round_cents();
                offer.set_score(score, savings);
                (score, offer)
            })
            .collect();

        scored.sort_by(|a, b| b.0.total_cmp(&a.0));

        let ranked: Vec<Offer> = scored
            .into_iter()
            .enumerate()
            .map(|(idx, (_, mut offer))| {
                offer.set_rank(idx + 1);
                offer
            })
            .collect();

        debug!(
            strategy = self.name(),
            count = ranked.len(),
            top_score = ?ranked.first().and_then(Offer::value_score),
            "offers ranked"
        );
        ranked
    }

    fn name(&self) -> &'static str {
        "WeightedValue"
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use super::*;
    use crate::domain::entities::OfferBuilder;
    use crate::domain::value_objects::PlatformId;

    fn price(value: f64) -> Price {
        Price::new(value).unwrap()
    }

    fn offer(name: &str, total: f64) -> OfferBuilder {
        OfferBuilder::new(PlatformId::new("test"), name, price(total))
    }

    fn rank(offers: Vec<Offer>) -> Vec<Offer> {
        WeightedValueStrategy::new().rank(offers, &RankingWeights::default())
    }

    #[test]
    fn empty_input_is_returned_unchanged() {
        assert!(rank(Vec::new()).is_empty());
    }

    #[test]
    fn cheaper_offer_ranks_first() {
        let ranked = rank(vec![
            offer("pricey", 30.0).build(),
            offer("cheap", 10.0).build(),
        ]);
        assert_eq!(ranked[0].name(), "cheap");
        assert_eq!(ranked[0].rank(), Some(1));
        assert_eq!(ranked[1].rank(), Some(2));
        assert_eq!(ranked[0].savings_vs_max(), Some(price(20.0)));
        assert_eq!(ranked[1].savings_vs_max(), Some(Price::ZERO));
    }

    #[test]
    fn identical_prices_score_one_on_price() {
        let offers = vec![offer("a", 12.0).build(), offer("b", 12.0).build()];
        let parts = score_components(&offers);
        assert!(parts.iter().all(|p| p.price == 1.0));
    }

    #[test]
    fn single_offer_scores_full_weight_except_preference() {
        let ranked = rank(vec![
            offer("only", 5.0).delivery_time_min(25).rating(4.2).build(),
        ]);
        // 0.4 + 0.2 + 0.2 + 0.1 + 0.1 * 0.5
        assert_eq!(ranked[0].value_score(), Some(0.95));
    }

    #[test]
    fn single_offer_without_time_or_rating_scores_zero_on_both() {
        let ranked = rank(vec![offer("only", 5.0).build()]);
        // 0.4 + 0.0 + 0.0 + 0.1 + 0.1 * 0.5
        assert_eq!(ranked[0].value_score(), Some(0.55));
    }

    #[test]
    fn missing_time_counts_as_slowest() {
        let offers = vec![
            offer("fast", 10.0).delivery_time_min(10).build(),
            offer("slow", 10.0).delivery_time_min(40).build(),
            offer("unknown", 10.0).build(),
        ];
        let parts = score_components(&offers);
        assert_eq!(parts[0].time, 1.0);
        assert_eq!(parts[1].time, 0.0);
        assert_eq!(parts[2].time, 0.0);
    }

    #[test]
    fn missing_rating_counts_as_worst() {
        let offers = vec![
            offer("good", 10.0).rating(4.8).build(),
            offer("bad", 10.0).rating(3.0).build(),
            offer("unrated", 10.0).build(),
        ];
        let parts = score_components(&offers);
        assert_eq!(parts[0].rating, 1.0);
        assert_eq!(parts[2].rating, 0.0);
    }

    #[test]
    fn no_ratings_use_default_domain() {
        let offers = vec![offer("a", 10.0).build(), offer("b", 20.0).build()];
        let parts = score_components(&offers);
        // both scored as 0 on [0, 5]
        assert_eq!(parts[0].rating, 0.0);
        assert_eq!(parts[1].rating, 0.0);
    }

    #[test]
    fn fees_lower_is_better() {
        let offers = vec![
            offer("free", 10.0).build(),
            offer("fees", 10.0)
                .delivery_fee(price(3.0))
                .service_fee(price(1.0))
                .total(price(10.0))
                .build(),
        ];
        let parts = score_components(&offers);
        assert_eq!(parts[0].fees, 1.0);
        assert_eq!(parts[1].fees, 0.0);
    }

    #[test]
    fn equal_scores_keep_input_order() {
        let ranked = rank(vec![
            offer("first", 10.0).build(),
            offer("second", 10.0).build(),
            offer("third", 10.0).build(),
        ]);
        let names: Vec<_> = ranked.iter().map(Offer::name).collect();
        assert_eq!(names, ["first", "second", "third"]);
        let ranks: Vec<_> = ranked.iter().filter_map(Offer::rank).collect();
        assert_eq!(ranks, [1, 2, 3]);
    }

    #[test]
    fn overrides_change_ordering() {
        let offers = vec![
            offer("cheap_slow", 10.0).delivery_time_min(60).build(),
            offer("pricey_fast", 20.0).delivery_time_min(10).build(),
        ];
        let weights = RankingWeights::default().with_overrides(&HashMap::from([
            ("price".to_string(), 0.0),
            ("time".to_string(), 1.0),
        ]));
        let ranked = WeightedValueStrategy::new().rank(offers, &weights);
        assert_eq!(ranked[0].name(), "pricey_fast");
    }

    #[test]
    fn unknown_override_keys_are_ignored() {
        let weights = RankingWeights::default().with_overrides(&HashMap::from([
            ("vibes".to_string(), 3.0),
            ("fees".to_string(), f64::NAN),
        ]));
        assert_eq!(weights, RankingWeights::default());
        assert!((weights.total() - 1.0).abs() < 1e-12);
    }
}
