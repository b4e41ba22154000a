//! Property tests for weighted value ranking.

#![allow(clippy::unwrap_used, clippy::indexing_slicing, missing_docs)]

use proptest::prelude::*;
use smart_dealer::application::services::{
    RankingStrategy, RankingWeights, WeightedValueStrategy, score_components,
};
use smart_dealer::domain::entities::{Offer, OfferBuilder};
use smart_dealer::domain::value_objects::{PlatformId, Price};

#[derive(Debug, Clone)]
struct OfferShape {
    price_cents: u32,
    fee_cents: u32,
    minutes: Option<u32>,
    rating_tenths: Option<u32>,
}

fn offer_shape() -> impl Strategy<Value = OfferShape> {
    (
        0u32..50_000,
        0u32..2_000,
        proptest::option::of(1u32..120),
        proptest::option::of(0u32..=50),
    )
        .prop_map(|(price_cents, fee_cents, minutes, rating_tenths)| OfferShape {
            price_cents,
            fee_cents,
            minutes,
            rating_tenths,
        })
}

fn weights() -> impl Strategy<Value = RankingWeights> {
    (0.0f64..1.0, 0.0f64..1.0, 0.0f64..1.0, 0.0f64..1.0, 0.0f64..1.0).prop_map(
        |(price, time, rating, fees, user_pref)| RankingWeights {
            price,
            time,
            rating,
            fees,
            user_pref,
        },
    )
}

fn cents(value: u32) -> Price {
    Price::from_f64_lossy(f64::from(value) / 100.0)
}

fn build(shapes: &[OfferShape]) -> Vec<Offer> {
    shapes
        .iter()
        .enumerate()
        .map(|(i, shape)| {
            let mut builder = OfferBuilder::new(
                PlatformId::new("prop"),
                format!("offer-{i}"),
                cents(shape.price_cents),
            )
            .delivery_fee(cents(shape.fee_cents));
            if let Some(minutes) = shape.minutes {
                builder = builder.delivery_time_min(minutes);
            }
            if let Some(tenths) = shape.rating_tenths {
                builder = builder.rating(f64::from(tenths) / 10.0);
            }
            builder.build()
        })
        .collect()
}

proptest! {
    #[test]
    fn ranks_are_a_permutation(shapes in prop::collection::vec(offer_shape(), 1..40), w in weights()) {
        let ranked = WeightedValueStrategy::new().rank(build(&shapes), &w);

        prop_assert_eq!(ranked.len(), shapes.len());
        let ranks: Vec<usize> = ranked.iter().filter_map(Offer::rank).collect();
        prop_assert_eq!(ranks, (1..=shapes.len()).collect::<Vec<_>>());
    }

    #[test]
    fn rank_one_has_the_maximal_score(shapes in prop::collection::vec(offer_shape(), 1..40), w in weights()) {
        let ranked = WeightedValueStrategy::new().rank(build(&shapes), &w);
        let scores: Vec<f64> = ranked.iter().filter_map(Offer::value_score).collect();

        let max = scores.iter().copied().fold(f64::MIN, f64::max);
        prop_assert_eq!(scores[0], max);
        prop_assert!(scores.windows(2).all(|pair| pair[0] >= pair[1]));
    }

    #[test]
    fn scores_stay_within_weight_total(shapes in prop::collection::vec(offer_shape(), 1..40), w in weights()) {
        let ranked = WeightedValueStrategy::new().rank(build(&shapes), &w);
        for offer in &ranked {
            let score = offer.value_score().unwrap();
            prop_assert!(score >= 0.0);
            // rounding to 4 decimals may overshoot by half a unit
            prop_assert!(score <= w.total() + 5e-5);
        }
    }

    #[test]
    fn components_are_normalised(shapes in prop::collection::vec(offer_shape(), 1..40)) {
        for parts in score_components(&build(&shapes)) {
            for value in [parts.price, parts.time, parts.rating, parts.fees, parts.user_pref] {
                prop_assert!((0.0..=1.0).contains(&value));
            }
        }
    }

    #[test]
    fn identical_prices_score_one(price in 0u32..50_000, n in 1usize..20) {
        let shapes: Vec<OfferShape> = (0..n)
            .map(|_| OfferShape { price_cents: price, fee_cents: 0, minutes: None, rating_tenths: None })
            .collect();
        for parts in score_components(&build(&shapes)) {
            prop_assert_eq!(parts.price, 1.0);
        }
    }

    #[test]
    fn ties_keep_arrival_order(shape in offer_shape(), n in 2usize..20, w in weights()) {
        let shapes = vec![shape; n];
        let ranked = WeightedValueStrategy::new().rank(build(&shapes), &w);

        let names: Vec<&str> = ranked.iter().map(Offer::name).collect();
        let expected: Vec<String> = (0..n).map(|i| format!("offer-{i}")).collect();
        prop_assert_eq!(names, expected.iter().map(String::as_str).collect::<Vec<_>>());
    }

    #[test]
    fn savings_are_relative_to_the_most_expensive(shapes in prop::collection::vec(offer_shape(), 1..40)) {
        let ranked = WeightedValueStrategy::new().rank(build(&shapes), &RankingWeights::default());
        let max = ranked.iter().map(Offer::total_price).max().unwrap();

        for offer in &ranked {
            let savings = offer.savings_vs_max().unwrap();
            prop_assert_eq!(savings, max.saturating_sub(offer.total_price()).round_cents());
        }
    }
}
