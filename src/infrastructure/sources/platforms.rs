//! # Known Platforms
//!
//! Identifiers of the platforms shipped with simulated adapters.

use crate::domain::value_objects::{Category, PlatformId};

/// Food delivery platforms.
pub const FOOD_PLATFORMS: &[&str] = &["uber_eats", "doordash", "grubhub", "postmates"];

/// Retail platforms.
pub const PRODUCT_PLATFORMS: &[&str] = &["amazon", "ebay", "walmart", "target", "bestbuy"];

/// Ride platforms.
pub const RIDE_PLATFORMS: &[&str] = &["uber", "lyft", "taxi"];

/// Accommodation platforms.
pub const HOTEL_PLATFORMS: &[&str] = &["booking", "expedia", "airbnb", "hotels_com", "vrbo"];

/// Returns the platform names of a category.
#[must_use]
pub fn platforms_for(category: Category) -> &'static [&'static str] {
    match category {
        Category::Food => FOOD_PLATFORMS,
        Category::Product => PRODUCT_PLATFORMS,
        Category::Ride => RIDE_PLATFORMS,
        Category::Hotel => HOTEL_PLATFORMS,
    }
}

/// Returns the category a known platform belongs to.
#[must_use]
pub fn category_of(platform: &PlatformId) -> Option<Category> {
    Category::ALL
        .into_iter()
        .find(|c| platforms_for(*c).contains(&platform.as_str()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_platform_maps_back_to_its_category() {
        for category in Category::ALL {
            for name in platforms_for(category) {
                assert_eq!(category_of(&PlatformId::new(*name)), Some(category));
            }
        }
    }

    #[test]
    fn seventeen_platforms() {
        let total: usize = Category::ALL.iter().map(|c| platforms_for(*c).len()).sum();
        assert_eq!(total, 17);
        assert_eq!(category_of(&PlatformId::new("myspace")), None);
    }
}
