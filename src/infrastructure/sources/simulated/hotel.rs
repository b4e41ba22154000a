//! Accommodation profiles.
//!
//! The base price is the whole stay (`nightly * nights`); resort, cleaning
//! and platform service fees are folded into the service fee.

use super::{int_between, money, pick, round_to, uniform};
use crate::domain::entities::{Filters, Offer, OfferBuilder};
use crate::domain::value_objects::PlatformId;
use rand::rngs::StdRng;
use rand::seq::IndexedRandom;
use serde_json::Value;

const ADJECTIVES: &[&str] = &[
    "Grand", "Royal", "Sunset", "Ocean View", "Downtown", "Luxe", "Comfort", "Budget",
];
const KINDS: &[&str] = &["Hotel", "Inn", "Suites", "Resort", "Lodge", "B&B"];
const AMENITIES: &[&str] = &["WiFi", "Kitchen", "Pool", "Parking", "Fireplace", "Patio"];

#[derive(Debug, Clone, Copy)]
enum ExtraFee {
    Absent,
    Resort(&'static [f64]),
    Cleaning((f64, f64)),
}

#[derive(Debug, Clone, Copy)]
pub(super) struct HotelProfile {
    storefront: &'static str,
    nightly: (f64, f64),
    tax_rate: f64,
    extra_fee: ExtraFee,
    service_rate: f64,
    rating: (f64, f64),
    rating_count: (u32, u32),
    cancellation: &'static [&'static str],
    image: &'static str,
    link: &'static str,
}

pub(super) fn profile(platform: &str) -> Option<HotelProfile> {
    let free_or_not: &'static [&'static str] = &["Free cancellation", "Non-refundable"];
    let profile = match platform {
        "booking" => HotelProfile {
            storefront: "Booking.com",
            nightly: (50.0, 400.0),
            tax_rate: 0.12,
            extra_fee: ExtraFee::Resort(&[0.0, 0.0, 15.0, 25.0, 35.0]),
            service_rate: 0.0,
            rating: (7.0, 9.8),
            rating_count: (100, 5000),
            cancellation: free_or_not,
            image: "https://img.placeholder.com/booking.jpg",
            link: "https://booking.com/hotel/example",
        },
        "expedia" => HotelProfile {
            storefront: "Expedia",
            nightly: (45.0, 380.0),
            tax_rate: 0.13,
            extra_fee: ExtraFee::Resort(&[0.0, 0.0, 20.0, 30.0]),
            service_rate: 0.0,
            rating: (3.0, 5.0),
            rating_count: (50, 3000),
            cancellation: free_or_not,
            image: "https://img.placeholder.com/expedia.jpg",
            link: "https://expedia.com/hotel/example",
        },
        "airbnb" => HotelProfile {
            storefront: "Airbnb",
            nightly: (40.0, 350.0),
            tax_rate: 0.10,
            extra_fee: ExtraFee::Cleaning((20.0, 80.0)),
            service_rate: 0.14,
            rating: (4.0, 5.0),
            rating_count: (10, 2000),
            cancellation: &["Flexible", "Moderate", "Strict"],
            image: "https://img.placeholder.com/airbnb.jpg",
            link: "https://airbnb.com/rooms/example",
        },
        "hotels_com" => HotelProfile {
            storefront: "Hotels.com",
            nightly: (55.0, 420.0),
            tax_rate: 0.12,
            extra_fee: ExtraFee::Absent,
            service_rate: 0.0,
            rating: (6.0, 9.5),
            rating_count: (80, 4000),
            cancellation: free_or_not,
            image: "https://img.placeholder.com/hotels.jpg",
            link: "https://hotels.com/ho/example",
        },
        "vrbo" => HotelProfile {
            storefront: "Vrbo",
            nightly: (60.0, 500.0),
            tax_rate: 0.11,
            extra_fee: ExtraFee::Cleaning((30.0, 100.0)),
            service_rate: 0.0,
            rating: (4.0, 5.0),
            rating_count: (10, 1500),
            cancellation: &["Full refund", "Partial refund", "No refund"],
            image: "https://img.placeholder.com/vrbo.jpg",
            link: "https://vrbo.com/listing/example",
        },
        _ => return None,
    };
    Some(profile)
}

impl HotelProfile {
    pub(super) fn generate(&self, rng: &mut StdRng, platform: &PlatformId, filters: &Filters) -> Vec<Offer> {
        let nights = filters.get_u64(Filters::NIGHTS).filter(|n| *n > 0).unwrap_or(1);
        let nightly = round_to(uniform(rng, self.nightly), 2);
        let stay = round_to(nightly * nights as f64, 2);
        let tax = round_to(stay * self.tax_rate, 2);
        let extra_fee = match self.extra_fee {
            ExtraFee::Absent => 0.0,
            ExtraFee::Resort(choices) => pick(rng, choices, 0.0),
            ExtraFee::Cleaning(range) => round_to(uniform(rng, range), 2),
        };
        let service = round_to(stay * self.service_rate, 2);

        let name = format!(
            "{} {} - {}",
            pick(rng, ADJECTIVES, "Grand"),
            pick(rng, KINDS, "Hotel"),
            self.storefront
        );
        let amenities: Vec<Value> = AMENITIES
            .choose_multiple(rng, 3)
            .map(|a| Value::from(*a))
            .collect();

        let offer = OfferBuilder::new(platform.clone(), name, money(stay))
            .service_fee(money(extra_fee + service))
            .tax(money(tax))
            .rating(round_to(uniform(rng, self.rating), 1))
            .rating_count(int_between(rng, self.rating_count))
            .image_url(self.image)
            .deep_link(self.link)
            .extra("nightly_rate", nightly)
            .extra("nights", nights)
            .extra("cancellation", pick(rng, self.cancellation, "Non-refundable"))
            .extra("amenities", amenities)
            .build();

        vec![offer]
    }
}
