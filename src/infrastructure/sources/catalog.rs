//! # Static Deal Catalog
//!
//! A [`DealSource`] backed by a fixed list of sample deals.
//!
//! Each deal is materialised on lookup with a validity window of
//! `[now - 1 day, now + valid_days]`.

use crate::domain::entities::{Deal, DealBuilder, Filters, ValidityWindow};
use crate::domain::value_objects::{Category, DealKind, PlatformId, Price};
use crate::infrastructure::sources::error::SourceResult;
use crate::infrastructure::sources::platforms::category_of;
use crate::infrastructure::sources::traits::DealSource;
use async_trait::async_trait;
use chrono::{Duration, Utc};

#[derive(Debug, Clone, Copy)]
struct DealTemplate {
    platform: &'static str,
    kind: DealKind,
    code: Option<&'static str>,
    description: &'static str,
    amount_off: Option<f64>,
    percent_off: Option<f64>,
    min_order: Option<f64>,
    max_discount: Option<f64>,
    valid_days: i64,
}

const SAMPLE_DEALS: &[DealTemplate] = &[
    DealTemplate {
        platform: "uber_eats",
        kind: DealKind::PromoCode,
        code: Some("EAT20OFF"),
        description: "20% off your first order",
        amount_off: None,
        percent_off: Some(20.0),
        min_order: None,
        max_discount: Some(10.0),
        valid_days: 30,
    },
    DealTemplate {
        platform: "doordash",
        kind: DealKind::PromoCode,
        code: Some("DASH5"),
        description: "$5 off orders over $25",
        amount_off: Some(5.0),
        percent_off: None,
        min_order: Some(25.0),
        max_discount: None,
        valid_days: 14,
    },
    DealTemplate {
        platform: "amazon",
        kind: DealKind::Cashback,
        code: None,
        description: "5% cashback with Amazon Prime credit card",
        amount_off: None,
        percent_off: Some(5.0),
        min_order: None,
        max_discount: None,
        valid_days: 365,
    },
    DealTemplate {
        platform: "uber",
        kind: DealKind::PromoCode,
        code: Some("RIDE10"),
        description: "$10 off next ride",
        amount_off: Some(10.0),
        percent_off: None,
        min_order: None,
        max_discount: None,
        valid_days: 7,
    },
    DealTemplate {
        platform: "booking",
        kind: DealKind::Seasonal,
        code: None,
        description: "Genius member 15% discount",
        amount_off: None,
        percent_off: Some(15.0),
        min_order: None,
        max_discount: None,
        valid_days: 60,
    },
    DealTemplate {
        platform: "lyft",
        kind: DealKind::PromoCode,
        code: Some("LYFT15"),
        description: "15% off next 3 rides",
        amount_off: None,
        percent_off: Some(15.0),
        min_order: None,
        max_discount: Some(8.0),
        valid_days: 14,
    },
    DealTemplate {
        platform: "walmart",
        kind: DealKind::FlashSale,
        code: None,
        description: "Flash sale - up to 30% off electronics",
        amount_off: None,
        percent_off: Some(30.0),
        min_order: None,
        max_discount: None,
        valid_days: 2,
    },
    DealTemplate {
        platform: "airbnb",
        kind: DealKind::Seasonal,
        code: None,
        description: "Weekly stay discount - 10% off 7+ nights",
        amount_off: None,
        percent_off: Some(10.0),
        min_order: None,
        max_discount: None,
        valid_days: 90,
    },
];

impl DealTemplate {
    fn materialise(&self) -> Deal {
        let now = Utc::now();
        let mut builder = DealBuilder::new(PlatformId::new(self.platform), self.kind, self.description)
            .validity(ValidityWindow::between(
                now - Duration::days(1),
                now + Duration::days(self.valid_days),
            ));
        if let Some(code) = self.code {
            builder = builder.code(code);
        }
        if let Some(amount) = self.amount_off {
            builder = builder.amount_off(Price::from_f64_lossy(amount));
        }
        if let Some(percent) = self.percent_off {
            builder = builder.percent_off(percent);
        }
        if let Some(min_order) = self.min_order {
            builder = builder.min_order(Price::from_f64_lossy(min_order));
        }
        if let Some(cap) = self.max_discount {
            builder = builder.max_discount(Price::from_f64_lossy(cap));
        }
        builder.build()
    }
}

/// Deal source over the built-in sample deals.
#[derive(Debug, Clone, Copy, Default)]
pub struct StaticDealSource;

impl StaticDealSource {
    /// Creates the source.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl DealSource for StaticDealSource {
    fn name(&self) -> &str {
        "static_catalog"
    }

    async fn find_deals(&self, category: Category, filters: &Filters) -> SourceResult<Vec<Deal>> {
        let allow = filters.platforms();
        let deals = SAMPLE_DEALS
            .iter()
            .filter(|t| category_of(&PlatformId::new(t.platform)) == Some(category))
            .filter(|t| {
                allow
                    .as_ref()
                    .is_none_or(|list| list.iter().any(|p| p.as_str() == t.platform))
            })
            .map(DealTemplate::materialise)
            .collect();
        Ok(deals)
    }
}
