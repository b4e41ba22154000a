//! Food delivery profiles.

use super::{int_between, money, round_to, uniform};
use crate::domain::entities::{Offer, OfferBuilder};
use crate::domain::value_objects::PlatformId;
use rand::rngs::StdRng;

#[derive(Debug, Clone, Copy)]
pub(super) struct FoodProfile {
    storefront: &'static str,
    base: (f64, f64),
    max_delivery_fee: f64,
    service_rate: f64,
    tax_rate: f64,
    delivery_minutes: (u32, u32),
    rating: (f64, f64),
    rating_count: (u32, u32),
    image: &'static str,
    link: &'static str,
}

pub(super) fn profile(platform: &str) -> Option<FoodProfile> {
    let profile = match platform {
        "uber_eats" => FoodProfile {
            storefront: "UberEats Restaurant",
            base: (8.0, 25.0),
            max_delivery_fee: 5.99,
            service_rate: 0.15,
            tax_rate: 0.08,
            delivery_minutes: (15, 45),
            rating: (3.5, 5.0),
            rating_count: (50, 2000),
            image: "https://img.placeholder.com/ubereats.jpg",
            link: "https://ubereats.com/store/example",
        },
        "doordash" => FoodProfile {
            storefront: "DoorDash Place",
            base: (7.0, 24.0),
            max_delivery_fee: 6.99,
            service_rate: 0.12,
            tax_rate: 0.08,
            delivery_minutes: (20, 50),
            rating: (3.5, 5.0),
            rating_count: (50, 3000),
            image: "https://img.placeholder.com/doordash.jpg",
            link: "https://doordash.com/store/example",
        },
        "grubhub" => FoodProfile {
            storefront: "Grubhub Kitchen",
            base: (7.5, 23.0),
            max_delivery_fee: 4.99,
            service_rate: 0.10,
            tax_rate: 0.07,
            delivery_minutes: (20, 55),
            rating: (3.2, 4.9),
            rating_count: (30, 1500),
            image: "https://img.placeholder.com/grubhub.jpg",
            link: "https://grubhub.com/restaurant/example",
        },
        "postmates" => FoodProfile {
            storefront: "Postmates Spot",
            base: (8.5, 26.0),
            max_delivery_fee: 7.99,
            service_rate: 0.18,
            tax_rate: 0.09,
            delivery_minutes: (18, 40),
            rating: (3.0, 4.8),
            rating_count: (20, 1000),
            image: "https://img.placeholder.com/postmates.jpg",
            link: "https://postmates.com/store/example",
        },
        _ => return None,
    };
    Some(profile)
}

impl FoodProfile {
    pub(super) fn generate(&self, rng: &mut StdRng, platform: &PlatformId, subject: &str) -> Vec<Offer> {
        let base = round_to(uniform(rng, self.base), 2);
        let delivery = round_to(uniform(rng, (0.0, self.max_delivery_fee)), 2);
        let service = round_to(base * self.service_rate, 2);
        let tax = round_to((base + delivery + service) * self.tax_rate, 2);

        let offer = OfferBuilder::new(
            platform.clone(),
            format!("{subject} - {}", self.storefront),
            money(base),
        )
        .delivery_fee(money(delivery))
        .service_fee(money(service))
        .tax(money(tax))
        .delivery_time_min(int_between(rng, self.delivery_minutes))
        .rating(round_to(uniform(rng, self.rating), 1))
        .rating_count(int_between(rng, self.rating_count))
        .image_url(self.image)
        .deep_link(self.link)
        .build();

        vec![offer]
    }
}
