//! # Discount Engine
//!
//! Applies matching deals to offers.
//!
//! For each offer, every deal on the same platform is considered in the
//! order supplied:
//!
//! 1. Skip if `min_order` is set and the current total is below it.
//! 2. Raw discount is `discount_amount`, else `discount_percent` of the
//!    current total, else zero.
//! 3. Clamp to `max_discount`, round to cents, skip if not positive.
//! 4. Subtract from the total and record the deal's label.
//!
//! Totals only ever go down. Running the engine twice over the same offers
//! applies every deal twice, so the pipeline calls it exactly once.

use crate::domain::entities::{Deal, Offer};
use crate::domain::value_objects::Price;
use tracing::trace;

/// Stateless deal applier.
#[derive(Debug, Clone, Copy, Default)]
pub struct DiscountEngine;

impl DiscountEngine {
    /// Creates an engine.
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Applies `deals` to `offers` and returns them.
    #[must_use]
    pub fn apply(&self, mut offers: Vec<Offer>, deals: &[Deal]) -> Vec<Offer> {
        if deals.is_empty() {
            return offers;
        }
        for offer in &mut offers {
            let platform = offer.platform().clone();
            for deal in deals.iter().filter(|d| *d.platform() == platform) {
                if let Some(discount) = discount_for(offer.total_price(), deal) {
                    trace!(%platform, %discount, deal = deal.description(), "deal applied");
                    offer.apply_discount(discount, deal.label());
                }
            }
        }
        offers
    }
}

/// Returns the rounded discount `deal` grants on `total`, if any.
fn discount_for(total: Price, deal: &Deal) -> Option<Price> {
    if deal.min_order().is_some_and(|min| total < min) {
        return None;
    }

    let raw = match (deal.discount_amount(), deal.discount_percent()) {
        (Some(amount), _) => amount,
        (None, Some(percent)) => total.percent_of(percent),
        (None, None) => Price::ZERO,
    };
    let clamped = match deal.max_discount() {
        Some(cap) if raw > cap => cap,
        _ => raw,
    };
    let discount = clamped.round_cents();
    (!discount.is_zero()).then_some(discount)
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use super::*;
    use crate::domain::entities::{DealBuilder, OfferBuilder};
    use crate::domain::value_objects::{DealKind, PlatformId};

    fn price(value: f64) -> Price {
        Price::new(value).unwrap()
    }

    fn offer(platform: &str, total: f64) -> Offer {
        OfferBuilder::new(PlatformId::new(platform), "Item", price(total)).build()
    }

    fn deal(platform: &str) -> DealBuilder {
        DealBuilder::new(PlatformId::new(platform), DealKind::PromoCode, "Promo")
    }

    #[test]
    fn min_order_not_met_leaves_offer_untouched() {
        let deals = [deal("doordash")
            .amount_off(price(5.0))
            .min_order(price(25.0))
            .build()];
        let offers = DiscountEngine::new().apply(vec![offer("doordash", 20.0)], &deals);

        assert_eq!(offers[0].total_price(), price(20.0));
        assert!(offers[0].deals_applied().is_empty());
    }

    #[test]
    fn percent_discount_is_clamped() {
        let deals = [deal("booking")
            .percent_off(20.0)
            .max_discount(price(10.0))
            .build()];
        let offers = DiscountEngine::new().apply(vec![offer("booking", 40.0)], &deals);

        assert_eq!(offers[0].total_price().to_string(), "32.00");
        assert_eq!(offers[0].deals_applied().len(), 1);
        assert_eq!(offers[0].fees().unwrap().discount, price(8.0));
    }

    #[test]
    fn cap_applies_when_percent_exceeds_it() {
        let deals = [deal("walmart")
            .percent_off(30.0)
            .max_discount(price(20.0))
            .build()];
        let offers = DiscountEngine::new().apply(vec![offer("walmart", 100.0)], &deals);
        assert_eq!(offers[0].total_price(), price(80.0));
    }

    #[test]
    fn amount_wins_over_percent() {
        let deals = [deal("uber").amount_off(price(3.0)).percent_off(50.0).build()];
        let offers = DiscountEngine::new().apply(vec![offer("uber", 10.0)], &deals);
        assert_eq!(offers[0].total_price(), price(7.0));
    }

    #[test]
    fn other_platforms_are_ignored() {
        let deals = [deal("lyft").amount_off(price(3.0)).build()];
        let offers = DiscountEngine::new().apply(vec![offer("uber", 10.0)], &deals);
        assert_eq!(offers[0].total_price(), price(10.0));
        assert!(offers[0].deals_applied().is_empty());
    }

    #[test]
    fn deal_without_effect_adds_no_label() {
        let deals = [deal("uber").build()];
        let offers = DiscountEngine::new().apply(vec![offer("uber", 10.0)], &deals);
        assert!(offers[0].deals_applied().is_empty());
    }

    #[test]
    fn deals_stack_in_order_and_see_reduced_total() {
        let deals = [
            deal("amazon").amount_off(price(10.0)).build(),
            deal("amazon")
                .percent_off(10.0)
                .min_order(price(45.0))
                .build(),
        ];
        let offers = DiscountEngine::new().apply(vec![offer("amazon", 50.0)], &deals);

        // second deal sees 40.00 < 45.00 and is skipped
        assert_eq!(offers[0].total_price(), price(40.0));
        assert_eq!(offers[0].deals_applied().len(), 1);
    }

    #[test]
    fn matching_deals_stack_across_several_offers() {
        let deals = [
            deal("doordash").amount_off(price(2.0)).build(),
            deal("doordash").percent_off(10.0).build(),
            deal("ubereats").amount_off(price(1.0)).build(),
        ];
        let offers = DiscountEngine::new().apply(
            vec![offer("doordash", 22.0), offer("ubereats", 10.0), offer("grubhub", 10.0)],
            &deals,
        );

        // 22.00 - 2.00 = 20.00, then 10% off
        assert_eq!(offers[0].total_price(), price(18.0));
        assert_eq!(offers[0].deals_applied().len(), 2);
        assert_eq!(offers[1].total_price(), price(9.0));
        assert_eq!(offers[2].total_price(), price(10.0));
    }

    #[test]
    fn coded_deal_label() {
        let deals = [deal("uber").code("RIDE10").amount_off(price(1.0)).build()];
        let offers = DiscountEngine::new().apply(vec![offer("uber", 10.0)], &deals);
        assert_eq!(offers[0].deals_applied(), ["Promo (code: RIDE10)".to_string()]);
    }
}
