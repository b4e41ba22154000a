//! # Price
//!
//! Non-negative decimal money amount.
//!
//! All monetary values in offers, fee breakdowns and deals are [`Price`]s.
//! Arithmetic that could go negative saturates at zero, so an offer's total
//! can never drop below zero.

use crate::domain::errors::{DomainError, DomainResult};
use rust_decimal::Decimal;
use rust_decimal::prelude::{FromPrimitive, ToPrimitive};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A non-negative money amount.
///
/// # Examples
///
/// ```
/// use smart_dealer::domain::value_objects::Price;
///
/// let price = Price::new(19.996).unwrap().round_cents();
/// assert_eq!(price.to_string(), "20.00");
/// assert!(Price::new(-1.0).is_err());
/// ```
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Price(Decimal);

impl Price {
    /// Zero.
    pub const ZERO: Self = Self(Decimal::ZERO);

    /// Creates a price from a float.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidPrice` if the value is negative or not
    /// finite.
    pub fn new(value: f64) -> DomainResult<Self> {
        let decimal = Decimal::from_f64(value)
            .ok_or_else(|| DomainError::InvalidPrice(format!("not representable: {value}")))?;
        Self::from_decimal(decimal)
    }

    /// Creates a price from a decimal.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidPrice` if the value is negative.
    pub fn from_decimal(value: Decimal) -> DomainResult<Self> {
        if value.is_sign_negative() && !value.is_zero() {
            return Err(DomainError::InvalidPrice(format!("negative: {value}")));
        }
        Ok(Self(value))
    }

    /// Creates a price from a float, clamping invalid input to zero and
    /// rounding to cents.
    ///
    /// Used for synthetic values that are positive by construction.
    #[must_use]
    pub fn from_f64_lossy(value: f64) -> Self {
        Self::new(value).map(Self::round_cents).unwrap_or(Self::ZERO)
    }

    /// Returns the inner decimal.
    #[inline]
    #[must_use]
    pub const fn get(&self) -> Decimal {
        self.0
    }

    /// Returns the amount as a float.
    #[must_use]
    pub fn to_f64(&self) -> f64 {
        self.0.to_f64().unwrap_or(0.0)
    }

    /// Returns true if the amount is zero.
    #[inline]
    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    /// Rounds to two decimal places (banker's rounding) and pins the scale
    /// to two, so `32` renders as `32.00`.
    #[must_use]
    pub fn round_cents(self) -> Self {
        let mut rounded = self.0.round_dp(2);
        rounded.rescale(2);
        Self(rounded)
    }

    /// Adds two prices, returning `None` on overflow.
    #[must_use]
    pub fn checked_add(self, other: Self) -> Option<Self> {
        self.0.checked_add(other.0).map(Self)
    }

    /// Subtracts, saturating at zero.
    #[must_use]
    pub fn saturating_sub(self, other: Self) -> Self {
        let diff = self.0.checked_sub(other.0).unwrap_or(Decimal::ZERO);
        if diff.is_sign_negative() {
            Self::ZERO
        } else {
            Self(diff)
        }
    }

    /// Returns `percent` percent of this amount, unrounded.
    #[must_use]
    pub fn percent_of(self, percent: Decimal) -> Self {
        let value = self
            .0
            .checked_mul(percent)
            .and_then(|v| v.checked_div(Decimal::ONE_HUNDRED))
            .unwrap_or(Decimal::ZERO);
        if value.is_sign_negative() {
            Self::ZERO
        } else {
            Self(value)
        }
    }

    /// Sums an iterator of prices, saturating at the largest representable
    /// value.
    #[must_use]
    pub fn sum<I: IntoIterator<Item = Self>>(prices: I) -> Self {
        prices.into_iter().fold(Self::ZERO, |acc, p| {
            acc.checked_add(p).unwrap_or(Self(Decimal::MAX))
        })
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<f64> for Price {
    type Error = DomainError;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn rejects_negative_and_nan() {
        assert!(Price::new(-0.01).is_err());
        assert!(Price::new(f64::NAN).is_err());
        assert!(Price::new(0.0).is_ok());
    }

    #[test]
    fn round_cents_pins_scale() {
        assert_eq!(Price::new(32.0).unwrap().round_cents().to_string(), "32.00");
        assert_eq!(Price::new(8.004).unwrap().round_cents().to_string(), "8.00");
        assert_eq!(Price::new(8.017).unwrap().round_cents().to_string(), "8.02");
    }

    #[test]
    fn saturating_sub_never_goes_negative() {
        let five = Price::new(5.0).unwrap();
        let ten = Price::new(10.0).unwrap();
        assert_eq!(five.saturating_sub(ten), Price::ZERO);
        assert_eq!(ten.saturating_sub(five), five);
    }

    #[test]
    fn percent_of_amount() {
        let forty = Price::new(40.0).unwrap();
        let eight = forty.percent_of(Decimal::from(20));
        assert_eq!(eight, Price::new(8.0).unwrap());
    }

    #[test]
    fn sum_of_prices() {
        let total = Price::sum([
            Price::new(1.25).unwrap(),
            Price::new(2.5).unwrap(),
            Price::ZERO,
        ]);
        assert_eq!(total, Price::new(3.75).unwrap());
    }

    #[test]
    fn lossy_constructor_clamps() {
        assert_eq!(Price::from_f64_lossy(-3.0), Price::ZERO);
        assert_eq!(Price::from_f64_lossy(12.346).to_string(), "12.35");
    }
}
