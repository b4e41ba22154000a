//! Retail profiles.
//!
//! Shipping lands in the delivery fee; delivery days become minutes.

use super::{int_between, money, pick, round_to, uniform};
use crate::domain::entities::{Offer, OfferBuilder};
use crate::domain::value_objects::PlatformId;
use rand::Rng;
use rand::rngs::StdRng;

const MINUTES_PER_DAY: u32 = 24 * 60;

#[derive(Debug, Clone, Copy)]
pub(super) struct ProductProfile {
    storefront: &'static str,
    price: (f64, f64),
    shipping: &'static [f64],
    tax_rate: f64,
    rating: (f64, f64),
    rating_count: (u32, u32),
    delivery_days: &'static [u32],
    seller: &'static str,
    offers_prime: bool,
    image: &'static str,
    link: &'static str,
}

pub(super) fn profile(platform: &str) -> Option<ProductProfile> {
    let profile = match platform {
        "amazon" => ProductProfile {
            storefront: "Amazon",
            price: (5.0, 500.0),
            shipping: &[0.0, 0.0, 0.0, 5.99, 9.99],
            tax_rate: 0.08,
            rating: (3.0, 5.0),
            rating_count: (100, 50_000),
            delivery_days: &[1, 2, 3, 5, 7],
            seller: "Amazon.com",
            offers_prime: true,
            image: "https://img.placeholder.com/amazon.jpg",
            link: "https://amazon.com/dp/example",
        },
        "ebay" => ProductProfile {
            storefront: "eBay",
            price: (3.0, 480.0),
            shipping: &[0.0, 0.0, 4.99, 7.99, 12.99],
            tax_rate: 0.07,
            rating: (3.0, 5.0),
            rating_count: (10, 10_000),
            delivery_days: &[3, 5, 7, 10, 14],
            seller: "top_rated_seller",
            offers_prime: false,
            image: "https://img.placeholder.com/ebay.jpg",
            link: "https://ebay.com/itm/example",
        },
        "walmart" => ProductProfile {
            storefront: "Walmart",
            price: (4.0, 450.0),
            shipping: &[0.0, 0.0, 5.99],
            tax_rate: 0.08,
            rating: (3.0, 5.0),
            rating_count: (50, 20_000),
            delivery_days: &[2, 3, 5],
            seller: "Walmart.com",
            offers_prime: false,
            image: "https://img.placeholder.com/walmart.jpg",
            link: "https://walmart.com/ip/example",
        },
        "target" => ProductProfile {
            storefront: "Target",
            price: (5.0, 400.0),
            shipping: &[0.0, 0.0, 5.99],
            tax_rate: 0.075,
            rating: (3.5, 5.0),
            rating_count: (20, 8000),
            delivery_days: &[2, 3, 5, 7],
            seller: "Target",
            offers_prime: false,
            image: "https://img.placeholder.com/target.jpg",
            link: "https://target.com/p/example",
        },
        "bestbuy" => ProductProfile {
            storefront: "Best Buy",
            price: (10.0, 2000.0),
            shipping: &[0.0, 0.0, 0.0, 5.99],
            tax_rate: 0.08,
            rating: (3.5, 5.0),
            rating_count: (30, 15_000),
            delivery_days: &[1, 2, 3, 5],
            seller: "Best Buy",
            offers_prime: false,
            image: "https://img.placeholder.com/bestbuy.jpg",
            link: "https://bestbuy.com/site/example",
        },
        _ => return None,
    };
    Some(profile)
}

impl ProductProfile {
    pub(super) fn generate(&self, rng: &mut StdRng, platform: &PlatformId, subject: &str) -> Vec<Offer> {
        let price = round_to(uniform(rng, self.price), 2);
        let shipping = pick(rng, self.shipping, 0.0);
        let tax = round_to(price * self.tax_rate, 2);
        let days = pick(rng, self.delivery_days, 5);
        let prime = self.offers_prime && rng.random_bool(0.5);

        let offer = OfferBuilder::new(
            platform.clone(),
            format!("{subject} - {}", self.storefront),
            money(price),
        )
        .delivery_fee(money(shipping))
        .tax(money(tax))
        .delivery_time_min(days * MINUTES_PER_DAY)
        .rating(round_to(uniform(rng, self.rating), 1))
        .rating_count(int_between(rng, self.rating_count))
        .image_url(self.image)
        .deep_link(self.link)
        .extra("seller", self.seller)
        .extra("prime", prime)
        .extra("delivery_days", days)
        .build();

        vec![offer]
    }
}
