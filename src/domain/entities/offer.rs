//! # Offer Entity
//!
//! A single priced option returned by one platform.
//!
//! # Invariants
//!
//! - `total_price >= 0` ([`Price`] is non-negative)
//! - when a fee breakdown is present, `fees.total == total_price` after
//!   construction and after every discount
//!
//! # Examples
//!
//! ```
//! use smart_dealer::domain::entities::OfferBuilder;
//! use smart_dealer::domain::value_objects::{PlatformId, Price};
//!
//! let offer = OfferBuilder::new(PlatformId::new("doordash"), "Sushi Place", Price::new(12.0).unwrap())
//!     .delivery_fee(Price::new(2.99).unwrap())
//!     .service_fee(Price::new(1.44).unwrap())
//!     .tax(Price::new(1.31).unwrap())
//!     .delivery_time_min(30)
//!     .rating(4.6)
//!     .build();
//!
//! assert_eq!(offer.total_price().to_string(), "17.74");
//! ```

use crate::domain::value_objects::{OfferId, PlatformId, Price};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;

/// Itemised price of an offer.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct FeeBreakdown {
    /// Item or fare price.
    pub base_price: Price,
    /// Delivery or shipping fee.
    pub delivery_fee: Price,
    /// Service, booking, resort or cleaning fee.
    pub service_fee: Price,
    /// Tax.
    pub tax: Price,
    /// Tip.
    pub tip: Price,
    /// Accumulated discount from applied deals.
    pub discount: Price,
    /// Amount payable.
    pub total: Price,
}

impl FeeBreakdown {
    /// Creates a breakdown whose total is the rounded sum of its parts.
    #[must_use]
    pub fn new(base_price: Price, delivery_fee: Price, service_fee: Price, tax: Price, tip: Price) -> Self {
        let total = Price::sum([base_price, delivery_fee, service_fee, tax, tip]).round_cents();
        Self {
            base_price,
            delivery_fee,
            service_fee,
            tax,
            tip,
            discount: Price::ZERO,
            total,
        }
    }

    /// Fees that count against an offer in ranking: delivery plus service.
    #[must_use]
    pub fn ranked_fees(&self) -> Price {
        Price::sum([self.delivery_fee, self.service_fee])
    }
}

/// A priced option from one platform.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Offer {
    id: OfferId,
    platform: PlatformId,
    name: String,
    base_price: Price,
    total_price: Price,
    currency: String,
    fees: Option<FeeBreakdown>,
    delivery_time_min: Option<u32>,
    rating: Option<f64>,
    rating_count: Option<u32>,
    image_url: Option<String>,
    deep_link: Option<String>,
    extra: Map<String, Value>,
    deals_applied: Vec<String>,
    value_score: Option<f64>,
    rank: Option<usize>,
    savings_vs_max: Option<Price>,
    fetched_at: DateTime<Utc>,
}

impl Offer {
    /// Returns the offer ID.
    #[inline]
    #[must_use]
    pub fn id(&self) -> OfferId {
        self.id
    }

    /// Returns the platform that produced this offer.
    #[inline]
    #[must_use]
    pub fn platform(&self) -> &PlatformId {
        &self.platform
    }

    /// Returns the display name.
    #[inline]
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the base price before fees.
    #[inline]
    #[must_use]
    pub fn base_price(&self) -> Price {
        self.base_price
    }

    /// Returns the amount payable.
    #[inline]
    #[must_use]
    pub fn total_price(&self) -> Price {
        self.total_price
    }

    /// Returns the ISO currency code.
    #[must_use]
    pub fn currency(&self) -> &str {
        &self.currency
    }

    /// Returns the fee breakdown, if the source itemised it.
    #[must_use]
    pub fn fees(&self) -> Option<&FeeBreakdown> {
        self.fees.as_ref()
    }

    /// Returns delivery + service fees, or zero without a breakdown.
    #[must_use]
    pub fn ranked_fees(&self) -> Price {
        self.fees
            .as_ref()
            .map(FeeBreakdown::ranked_fees)
            .unwrap_or(Price::ZERO)
    }

    /// Returns the delivery, pickup or shipping time in minutes.
    #[must_use]
    pub fn delivery_time_min(&self) -> Option<u32> {
        self.delivery_time_min
    }

    /// Returns the rating on the source's own scale.
    #[must_use]
    pub fn rating(&self) -> Option<f64> {
        self.rating
    }

    /// Returns the number of ratings.
    #[must_use]
    pub fn rating_count(&self) -> Option<u32> {
        self.rating_count
    }

    /// Returns the image URL.
    #[must_use]
    pub fn image_url(&self) -> Option<&str> {
        self.image_url.as_deref()
    }

    /// Returns the deep link to the platform.
    #[must_use]
    pub fn deep_link(&self) -> Option<&str> {
        self.deep_link.as_deref()
    }

    /// Returns platform-specific attributes.
    #[must_use]
    pub fn extra(&self) -> &Map<String, Value> {
        &self.extra
    }

    /// Returns the labels of applied deals, in application order.
    #[must_use]
    pub fn deals_applied(&self) -> &[String] {
        &self.deals_applied
    }

    /// Returns the value score assigned by ranking.
    #[must_use]
    pub fn value_score(&self) -> Option<f64> {
        self.value_score
    }

    /// Returns the 1-based rank assigned by ranking.
    #[must_use]
    pub fn rank(&self) -> Option<usize> {
        self.rank
    }

    /// Returns the savings against the most expensive ranked offer.
    #[must_use]
    pub fn savings_vs_max(&self) -> Option<Price> {
        self.savings_vs_max
    }

    /// Returns when the offer was fetched.
    #[must_use]
    pub fn fetched_at(&self) -> DateTime<Utc> {
        self.fetched_at
    }

    /// Subtracts a discount from the total and records the deal label.
    ///
    /// The total saturates at zero and is re-rounded to cents; the fee
    /// breakdown accumulates the discount and is resynced to the new total.
    pub(crate) fn apply_discount(&mut self, discount: Price, label: String) {
        self.total_price = self.total_price.saturating_sub(discount).round_cents();
        self.deals_applied.push(label);
        if let Some(fees) = self.fees.as_mut() {
            fees.discount = Price::sum([fees.discount, discount]);
            fees.total = self.total_price;
        }
    }

    /// Records the ranking score and savings.
    pub(crate) fn set_score(&mut self, value_score: f64, savings_vs_max: Price) {
        self.value_score = Some(value_score);
        self.savings_vs_max = Some(savings_vs_max);
    }

    /// Records the 1-based rank.
    pub(crate) fn set_rank(&mut self, rank: usize) {
        self.rank = Some(rank);
    }
}

impl fmt::Display for Offer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Offer({} \"{}\" total={})",
            self.platform, self.name, self.total_price
        )?;
        if let Some(rank) = self.rank {
            write!(f, " #{rank}")?;
        }
        Ok(())
    }
}

/// Builder for [`Offer`].
///
/// The total is the rounded sum of base price, fees, tax and tip unless
/// [`total`](OfferBuilder::total) overrides it.
#[derive(Debug, Clone)]
pub struct OfferBuilder {
    platform: PlatformId,
    name: String,
    base_price: Price,
    delivery_fee: Price,
    service_fee: Price,
    tax: Price,
    tip: Price,
    total: Option<Price>,
    itemized: bool,
    currency: String,
    delivery_time_min: Option<u32>,
    rating: Option<f64>,
    rating_count: Option<u32>,
    image_url: Option<String>,
    deep_link: Option<String>,
    extra: Map<String, Value>,
}

impl OfferBuilder {
    /// Creates a builder with the required fields.
    #[must_use]
    pub fn new(platform: PlatformId, name: impl Into<String>, base_price: Price) -> Self {
        Self {
            platform,
            name: name.into(),
            base_price,
            delivery_fee: Price::ZERO,
            service_fee: Price::ZERO,
            tax: Price::ZERO,
            tip: Price::ZERO,
            total: None,
            itemized: true,
            currency: "USD".to_string(),
            delivery_time_min: None,
            rating: None,
            rating_count: None,
            image_url: None,
            deep_link: None,
            extra: Map::new(),
        }
    }

    /// Sets the delivery or shipping fee.
    #[must_use]
    pub fn delivery_fee(mut self, fee: Price) -> Self {
        self.delivery_fee = fee;
        self
    }

    /// Sets the service fee.
    #[must_use]
    pub fn service_fee(mut self, fee: Price) -> Self {
        self.service_fee = fee;
        self
    }

    /// Sets the tax.
    #[must_use]
    pub fn tax(mut self, tax: Price) -> Self {
        self.tax = tax;
        self
    }

    /// Sets the tip.
    #[must_use]
    pub fn tip(mut self, tip: Price) -> Self {
        self.tip = tip;
        self
    }

    /// Overrides the computed total.
    #[must_use]
    pub fn total(mut self, total: Price) -> Self {
        self.total = Some(total);
        self
    }

    /// Controls whether a fee breakdown is attached (default `true`).
    #[must_use]
    pub fn itemized(mut self, itemized: bool) -> Self {
        self.itemized = itemized;
        self
    }

    /// Sets the currency code.
    #[must_use]
    pub fn currency(mut self, currency: impl Into<String>) -> Self {
        self.currency = currency.into();
        self
    }

    /// Sets the delivery time in minutes.
    #[must_use]
    pub fn delivery_time_min(mut self, minutes: u32) -> Self {
        self.delivery_time_min = Some(minutes);
        self
    }

    /// Sets the rating; non-finite values are ignored.
    #[must_use]
    pub fn rating(mut self, rating: f64) -> Self {
        if rating.is_finite() {
            self.rating = Some(rating);
        }
        self
    }

    /// Sets the rating count.
    #[must_use]
    pub fn rating_count(mut self, count: u32) -> Self {
        self.rating_count = Some(count);
        self
    }

    /// Sets the image URL.
    #[must_use]
    pub fn image_url(mut self, url: impl Into<String>) -> Self {
        self.image_url = Some(url.into());
        self
    }

    /// Sets the deep link.
    #[must_use]
    pub fn deep_link(mut self, url: impl Into<String>) -> Self {
        self.deep_link = Some(url.into());
        self
    }

    /// Adds a platform-specific attribute.
    #[must_use]
    pub fn extra(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.extra.insert(key.into(), value.into());
        self
    }

    /// Builds the offer.
    #[must_use]
    pub fn build(self) -> Offer {
        let mut breakdown = FeeBreakdown::new(
            self.base_price,
            self.delivery_fee,
            self.service_fee,
            self.tax,
            self.tip,
        );
        if let Some(total) = self.total {
            breakdown.total = total.round_cents();
        }
        let total_price = breakdown.total;

        Offer {
            id: OfferId::new_v4(),
            platform: self.platform,
            name: self.name,
            base_price: self.base_price,
            total_price,
            currency: self.currency,
            fees: self.itemized.then_some(breakdown),
            delivery_time_min: self.delivery_time_min,
            rating: self.rating,
            rating_count: self.rating_count,
            image_url: self.image_url,
            deep_link: self.deep_link,
            extra: self.extra,
            deals_applied: Vec::new(),
            value_score: None,
            rank: None,
            savings_vs_max: None,
            fetched_at: Utc::now(),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn price(value: f64) -> Price {
        Price::new(value).unwrap()
    }

    fn sample() -> Offer {
        OfferBuilder::new(PlatformId::new("uber_eats"), "Pizza", price(10.0))
            .delivery_fee(price(2.5))
            .service_fee(price(1.5))
            .tax(price(1.0))
            .build()
    }

    #[test]
    fn total_is_sum_of_parts() {
        let offer = sample();
        assert_eq!(offer.total_price(), price(15.0));
        assert_eq!(offer.fees().unwrap().total, offer.total_price());
        assert_eq!(offer.ranked_fees(), price(4.0));
    }

    #[test]
    fn explicit_total_keeps_breakdown_in_sync() {
        let offer = OfferBuilder::new(PlatformId::new("booking"), "Inn", price(100.0))
            .total(price(123.456))
            .build();
        assert_eq!(offer.total_price().to_string(), "123.46");
        assert_eq!(offer.fees().unwrap().total, offer.total_price());
    }

    #[test]
    fn discount_updates_total_and_breakdown() {
        let mut offer = sample();
        offer.apply_discount(price(4.0), "Promo".to_string());

        assert_eq!(offer.total_price(), price(11.0));
        let fees = offer.fees().unwrap();
        assert_eq!(fees.total, price(11.0));
        assert_eq!(fees.discount, price(4.0));
        assert_eq!(offer.deals_applied(), ["Promo".to_string()]);
    }

    #[test]
    fn discount_saturates_at_zero() {
        let mut offer = sample();
        offer.apply_discount(price(50.0), "Huge".to_string());
        assert_eq!(offer.total_price(), Price::ZERO);
        assert_eq!(offer.fees().unwrap().total, Price::ZERO);
    }

    #[test]
    fn unitemized_offer_has_no_fees() {
        let offer = OfferBuilder::new(PlatformId::new("taxi"), "Cab", price(20.0))
            .itemized(false)
            .build();
        assert!(offer.fees().is_none());
        assert_eq!(offer.ranked_fees(), Price::ZERO);
        assert_eq!(offer.total_price(), price(20.0));
    }

    #[test]
    fn ranking_fields_start_empty() {
        let mut offer = sample();
        assert!(offer.value_score().is_none());
        assert!(offer.rank().is_none());

        offer.set_score(0.75, price(3.0));
        offer.set_rank(2);
        assert_eq!(offer.value_score(), Some(0.75));
        assert_eq!(offer.rank(), Some(2));
        assert_eq!(offer.savings_vs_max(), Some(price(3.0)));
        assert!(offer.to_string().ends_with("#2"));
    }
}
