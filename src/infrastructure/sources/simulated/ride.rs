//! Ride profiles.
//!
//! Each platform quotes several vehicle classes under one surge multiplier.
//! The booking fee is a service fee and the pickup ETA is the time metric.

use super::{int_between, money, round_to, uniform};
use crate::domain::entities::{Filters, Offer, OfferBuilder};
use crate::domain::value_objects::PlatformId;
use rand::rngs::StdRng;

#[derive(Debug, Clone, Copy)]
pub(super) struct RideProfile {
    classes: &'static [(&'static str, f64)],
    fare: (f64, f64),
    surge: (f64, f64),
    booking_fee: f64,
    tax_rate: f64,
    eta_minutes: (u32, u32),
    rating: (f64, f64),
    rating_places: i32,
    link: Option<&'static str>,
}

pub(super) fn profile(platform: &str) -> Option<RideProfile> {
    let profile = match platform {
        "uber" => RideProfile {
            classes: &[
                ("UberX", 1.0),
                ("Uber Comfort", 1.3),
                ("Uber XL", 1.5),
                ("Uber Black", 2.0),
            ],
            fare: (8.0, 30.0),
            surge: (1.0, 2.5),
            booking_fee: 2.50,
            tax_rate: 0.06,
            eta_minutes: (2, 15),
            rating: (4.5, 5.0),
            rating_places: 2,
            link: Some("https://uber.com/ride"),
        },
        "lyft" => RideProfile {
            classes: &[
                ("Lyft", 1.0),
                ("Lyft XL", 1.4),
                ("Lux", 1.8),
                ("Lux Black", 2.2),
            ],
            fare: (7.0, 28.0),
            surge: (1.0, 2.0),
            booking_fee: 2.00,
            tax_rate: 0.06,
            eta_minutes: (2, 15),
            rating: (4.5, 5.0),
            rating_places: 2,
            link: Some("https://lyft.com/ride"),
        },
        "taxi" => RideProfile {
            classes: &[("Standard Taxi", 1.0)],
            fare: (15.0, 50.0),
            surge: (1.0, 1.0),
            booking_fee: 0.0,
            tax_rate: 0.05,
            eta_minutes: (5, 20),
            rating: (3.5, 4.5),
            rating_places: 1,
            link: None,
        },
        _ => return None,
    };
    Some(profile)
}

impl RideProfile {
    pub(super) fn generate(
        &self,
        rng: &mut StdRng,
        platform: &PlatformId,
        subject: &str,
        filters: &Filters,
    ) -> Vec<Offer> {
        let origin = filters
            .get_str("origin")
            .or_else(|| filters.location())
            .unwrap_or("current")
            .to_string();
        let destination = filters.get_str("destination").unwrap_or(subject).to_string();
        let surge = uniform(rng, self.surge);

        self.classes
            .iter()
            .map(|(class, multiplier)| {
                let fare = round_to(uniform(rng, self.fare) * multiplier * surge, 2);
                let tax = round_to(fare * self.tax_rate, 2);
                let eta = int_between(rng, self.eta_minutes);

                let mut builder = OfferBuilder::new(platform.clone(), *class, money(fare))
                    .service_fee(money(self.booking_fee))
                    .tax(money(tax))
                    .delivery_time_min(eta)
                    .rating(round_to(uniform(rng, self.rating), self.rating_places))
                    .extra("surge_multiplier", round_to(surge, 2))
                    .extra("trip_time_min", int_between(rng, (10, 45)))
                    .extra("eta_min", eta)
                    .extra("origin", origin.clone())
                    .extra("destination", destination.clone());
                if let Some(link) = self.link {
                    builder = builder.deep_link(link);
                }
                builder.build()
            })
            .collect()
    }
}
