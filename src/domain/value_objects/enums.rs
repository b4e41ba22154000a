//! # Domain Enums
//!
//! Enumeration types for domain concepts.
//!
//! - [`Category`] - Offer category (food, product, ride, hotel)
//! - [`DealKind`] - Kind of discount record
//!
//! All enums implement `Debug`, `Clone`, `Copy`, `PartialEq`, `Eq`, `Hash`,
//! `Display`, `FromStr`, and Serde traits.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Error returned when a string does not name a known enum variant.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseEnumError {
    /// The value is not a valid variant of the named enum.
    #[error("invalid {0} value: {1}")]
    InvalidValue(&'static str, String),
}

/// Offer category.
///
/// The declaration order is significant: it is the tie-break order used
/// by intent detection.
///
/// # Examples
///
/// ```
/// use smart_dealer::domain::value_objects::enums::Category;
///
/// assert_eq!(Category::ALL[0], Category::Food);
/// assert_eq!(Category::Hotel.to_string(), "hotel");
/// assert_eq!("RIDE".parse::<Category>().ok(), Some(Category::Ride));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[repr(u8)]
pub enum Category {
    /// Food delivery.
    Food = 0,
    /// Retail products.
    Product = 1,
    /// Ride hailing and taxis.
    Ride = 2,
    /// Hotels and short-term rentals.
    Hotel = 3,
}

impl Category {
    /// Every category in tie-break order.
    pub const ALL: [Self; 4] = [Self::Food, Self::Product, Self::Ride, Self::Hotel];

    /// Returns the lowercase wire name.
    #[inline]
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Food => "food",
            Self::Product => "product",
            Self::Ride => "ride",
            Self::Hotel => "hotel",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "food" => Ok(Self::Food),
            "product" => Ok(Self::Product),
            "ride" => Ok(Self::Ride),
            "hotel" => Ok(Self::Hotel),
            _ => Err(ParseEnumError::InvalidValue("Category", s.to_string())),
        }
    }
}

/// Kind of discount record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[repr(u8)]
pub enum DealKind {
    /// Redeemable promo code.
    PromoCode = 0,
    /// Cashback credited after purchase.
    Cashback = 1,
    /// Credit card reward.
    CreditCard = 2,
    /// Seasonal sale.
    Seasonal = 3,
    /// Short-lived flash sale.
    FlashSale = 4,
    /// Loyalty programme discount.
    Loyalty = 5,
}

impl DealKind {
    /// Returns the snake_case wire name.
    #[inline]
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::PromoCode => "promo_code",
            Self::Cashback => "cashback",
            Self::CreditCard => "credit_card",
            Self::Seasonal => "seasonal",
            Self::FlashSale => "flash_sale",
            Self::Loyalty => "loyalty",
        }
    }
}

impl fmt::Display for DealKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DealKind {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().replace('-', "_").as_str() {
            "promo_code" | "promocode" => Ok(Self::PromoCode),
            "cashback" => Ok(Self::Cashback),
            "credit_card" | "creditcard" => Ok(Self::CreditCard),
            "seasonal" => Ok(Self::Seasonal),
            "flash_sale" | "flashsale" => Ok(Self::FlashSale),
            "loyalty" => Ok(Self::Loyalty),
            _ => Err(ParseEnumError::InvalidValue("DealKind", s.to_string())),
        }
    }
}
