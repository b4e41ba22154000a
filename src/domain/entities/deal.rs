//! # Deal Entity
//!
//! A discount record that may apply to offers from one platform.
//!
//! A deal carries either a fixed `discount_amount` or a `discount_percent`
//! (the amount wins when both are set). A deal with neither has no effect.

use crate::domain::value_objects::{DealId, DealKind, PlatformId, Price};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use rust_decimal::prelude::FromPrimitive;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Period during which a deal may be redeemed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ValidityWindow {
    /// Start of validity; unbounded when absent.
    pub valid_from: Option<DateTime<Utc>>,
    /// End of validity; unbounded when absent.
    pub valid_until: Option<DateTime<Utc>>,
}

impl ValidityWindow {
    /// A window with no bounds.
    #[must_use]
    pub const fn unbounded() -> Self {
        Self {
            valid_from: None,
            valid_until: None,
        }
    }

    /// A window between two instants.
    #[must_use]
    pub const fn between(valid_from: DateTime<Utc>, valid_until: DateTime<Utc>) -> Self {
        Self {
            valid_from: Some(valid_from),
            valid_until: Some(valid_until),
        }
    }

    /// Returns true if `at` falls inside the window.
    #[must_use]
    pub fn contains(&self, at: DateTime<Utc>) -> bool {
        self.valid_from.is_none_or(|from| from <= at)
            && self.valid_until.is_none_or(|until| at <= until)
    }
}

/// A discount record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Deal {
    id: DealId,
    platform: PlatformId,
    kind: DealKind,
    code: Option<String>,
    description: String,
    discount_amount: Option<Price>,
    discount_percent: Option<Decimal>,
    min_order: Option<Price>,
    max_discount: Option<Price>,
    validity: ValidityWindow,
    active: bool,
}

impl Deal {
    /// Returns the deal ID.
    #[inline]
    #[must_use]
    pub fn id(&self) -> DealId {
        self.id
    }

    /// Returns the platform the deal applies to.
    #[inline]
    #[must_use]
    pub fn platform(&self) -> &PlatformId {
        &self.platform
    }

    /// Returns the deal kind.
    #[must_use]
    pub fn kind(&self) -> DealKind {
        self.kind
    }

    /// Returns the promo code, if any.
    #[must_use]
    pub fn code(&self) -> Option<&str> {
        self.code.as_deref()
    }

    /// Returns the human-readable description.
    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Returns the fixed discount amount, if any.
    #[must_use]
    pub fn discount_amount(&self) -> Option<Price> {
        self.discount_amount
    }

    /// Returns the percentage discount, if any.
    #[must_use]
    pub fn discount_percent(&self) -> Option<Decimal> {
        self.discount_percent
    }

    /// Returns the minimum order total, if any.
    #[must_use]
    pub fn min_order(&self) -> Option<Price> {
        self.min_order
    }

    /// Returns the discount cap, if any.
    #[must_use]
    pub fn max_discount(&self) -> Option<Price> {
        self.max_discount
    }

    /// Returns the validity window.
    #[must_use]
    pub fn validity(&self) -> &ValidityWindow {
        &self.validity
    }

    /// Returns the active flag.
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Returns true if the deal can change a price at all.
    #[must_use]
    pub fn has_effect(&self) -> bool {
        self.discount_amount.is_some() || self.discount_percent.is_some()
    }

    /// Returns true if the deal is active and `now` is inside its window.
    #[must_use]
    pub fn is_currently_valid(&self, now: DateTime<Utc>) -> bool {
        self.active && self.validity.contains(now)
    }

    /// Returns the label recorded on offers this deal is applied to.
    ///
    /// # Examples
    ///
    /// ```
    /// use smart_dealer::domain::entities::DealBuilder;
    /// use smart_dealer::domain::value_objects::{DealKind, PlatformId, Price};
    ///
    /// let deal = DealBuilder::new(PlatformId::new("uber"), DealKind::PromoCode, "$10 off next ride")
    ///     .code("RIDE10")
    ///     .amount_off(Price::new(10.0).unwrap())
    ///     .build();
    /// assert_eq!(deal.label(), "$10 off next ride (code: RIDE10)");
    /// ```
    #[must_use]
    pub fn label(&self) -> String {
        match &self.code {
            Some(code) => format!("{} (code: {})", self.description, code),
            None => self.description.clone(),
        }
    }
}

impl fmt::Display for Deal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Deal({} {}: {})", self.platform, self.kind, self.label())
    }
}

/// Builder for [`Deal`].
#[derive(Debug, Clone)]
pub struct DealBuilder {
    platform: PlatformId,
    kind: DealKind,
    description: String,
    code: Option<String>,
    discount_amount: Option<Price>,
    discount_percent: Option<Decimal>,
    min_order: Option<Price>,
    max_discount: Option<Price>,
    validity: ValidityWindow,
    active: bool,
}

impl DealBuilder {
    /// Creates a builder for an active, unbounded deal with no effect yet.
    #[must_use]
    pub fn new(platform: PlatformId, kind: DealKind, description: impl Into<String>) -> Self {
        Self {
            platform,
            kind,
            description: description.into(),
            code: None,
            discount_amount: None,
            discount_percent: None,
            min_order: None,
            max_discount: None,
            validity: ValidityWindow::unbounded(),
            active: true,
        }
    }

    /// Sets the promo code.
    #[must_use]
    pub fn code(mut self, code: impl Into<String>) -> Self {
        self.code = Some(code.into());
        self
    }

    /// Sets a fixed discount amount.
    #[must_use]
    pub fn amount_off(mut self, amount: Price) -> Self {
        self.discount_amount = Some(amount);
        self
    }

    /// Sets a percentage discount; non-finite values are ignored.
    #[must_use]
    pub fn percent_off(mut self, percent: f64) -> Self {
        self.discount_percent = Decimal::from_f64(percent);
        self
    }

    /// Sets the minimum order total.
    #[must_use]
    pub fn min_order(mut self, min_order: Price) -> Self {
        self.min_order = Some(min_order);
        self
    }

    /// Sets the discount cap.
    #[must_use]
    pub fn max_discount(mut self, max_discount: Price) -> Self {
        self.max_discount = Some(max_discount);
        self
    }

    /// Sets the validity window.
    #[must_use]
    pub fn validity(mut self, validity: ValidityWindow) -> Self {
        self.validity = validity;
        self
    }

    /// Sets the active flag.
    #[must_use]
    pub fn active(mut self, active: bool) -> Self {
        self.active = active;
        self
    }

    /// Builds the deal.
    #[must_use]
    pub fn build(self) -> Deal {
        Deal {
            id: DealId::new_v4(),
            platform: self.platform,
            kind: self.kind,
            code: self.code,
            description: self.description,
            discount_amount: self.discount_amount,
            discount_percent: self.discount_percent,
            min_order: self.min_order,
            max_discount: self.max_discount,
            validity: self.validity,
            active: self.active,
        }
    }
}
