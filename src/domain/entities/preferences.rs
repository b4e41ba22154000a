//! # User Preferences
//!
//! Caller-scoped preferences consulted by the search pipeline.

use crate::domain::value_objects::{PlatformId, Price};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Maximum number of recorded choices kept per caller.
pub const MAX_CHOICE_HISTORY: usize = 50;

/// Stored preferences for one caller.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserPreferences {
    /// Per-dimension ranking weight overrides (`price`, `time`, `rating`,
    /// `fees`, `user_pref`).
    pub ranking_weights: Option<HashMap<String, f64>>,
    /// Lower budget bound.
    pub budget_min: Option<f64>,
    /// Upper budget bound.
    pub budget_max: Option<f64>,
    /// Preferred platforms per category name.
    pub preferred_platforms: HashMap<String, Vec<PlatformId>>,
    /// Dietary restrictions.
    pub dietary_restrictions: Vec<String>,
    /// Loyalty membership identifiers keyed by platform.
    pub loyalty_memberships: HashMap<String, String>,
    /// Default location.
    pub default_location: Option<String>,
    /// Preferred currency code.
    pub preferred_currency: String,
    /// Number of recorded choices since creation.
    pub search_history_count: u64,
    /// Most recent choices, oldest first.
    pub choice_history: Vec<RecordedChoice>,
}

impl Default for UserPreferences {
    fn default() -> Self {
        Self {
            ranking_weights: None,
            budget_min: None,
            budget_max: None,
            preferred_platforms: HashMap::new(),
            dietary_restrictions: Vec::new(),
            loyalty_memberships: HashMap::new(),
            default_location: None,
            preferred_currency: "USD".to_string(),
            search_history_count: 0,
            choice_history: Vec::new(),
        }
    }
}

impl UserPreferences {
    /// Applies every field present in `update`.
    pub fn apply(&mut self, update: PreferencesUpdate) {
        if let Some(weights) = update.ranking_weights {
            self.ranking_weights = Some(weights);
        }
        if let Some(min) = update.budget_min {
            self.budget_min = Some(min);
        }
        if let Some(max) = update.budget_max {
            self.budget_max = Some(max);
        }
        if let Some(platforms) = update.preferred_platforms {
            self.preferred_platforms = platforms;
        }
        if let Some(restrictions) = update.dietary_restrictions {
            self.dietary_restrictions = restrictions;
        }
        if let Some(memberships) = update.loyalty_memberships {
            self.loyalty_memberships = memberships;
        }
        if let Some(location) = update.default_location {
            self.default_location = Some(location);
        }
        if let Some(currency) = update.preferred_currency {
            self.preferred_currency = currency;
        }
    }

    /// Appends a choice, dropping the oldest beyond [`MAX_CHOICE_HISTORY`].
    pub fn record(&mut self, choice: RecordedChoice) {
        self.choice_history.push(choice);
        if self.choice_history.len() > MAX_CHOICE_HISTORY {
            let excess = self.choice_history.len() - MAX_CHOICE_HISTORY;
            self.choice_history.drain(..excess);
        }
        self.search_history_count = self.search_history_count.saturating_add(1);
    }
}

/// Partial update; `None` fields are left unchanged.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PreferencesUpdate {
    /// Ranking weight overrides.
    pub ranking_weights: Option<HashMap<String, f64>>,
    /// Lower budget bound.
    pub budget_min: Option<f64>,
    /// Upper budget bound.
    pub budget_max: Option<f64>,
    /// Preferred platforms per category name.
    pub preferred_platforms: Option<HashMap<String, Vec<PlatformId>>>,
    /// Dietary restrictions.
    pub dietary_restrictions: Option<Vec<String>>,
    /// Loyalty memberships.
    pub loyalty_memberships: Option<HashMap<String, String>>,
    /// Default location.
    pub default_location: Option<String>,
    /// Preferred currency code.
    pub preferred_currency: Option<String>,
}

/// An offer the caller picked.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecordedChoice {
    /// Platform of the chosen offer.
    pub platform: PlatformId,
    /// Display name of the chosen offer.
    pub item_name: String,
    /// Total paid.
    pub total_price: Price,
    /// When the choice was recorded.
    pub recorded_at: DateTime<Utc>,
}

impl RecordedChoice {
    /// Creates a choice stamped with the current time.
    #[must_use]
    pub fn new(platform: PlatformId, item_name: impl Into<String>, total_price: Price) -> Self {
        Self {
            platform,
            item_name: item_name.into(),
            total_price,
            recorded_at: Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_new_caller() {
        let prefs = UserPreferences::default();
        assert_eq!(prefs.preferred_currency, "USD");
        assert!(prefs.ranking_weights.is_none());
        assert_eq!(prefs.search_history_count, 0);
    }

    #[test]
    fn update_only_touches_present_fields() {
        let mut prefs = UserPreferences {
            default_location: Some("Austin".to_string()),
            ..UserPreferences::default()
        };
        prefs.apply(PreferencesUpdate {
            budget_max: Some(40.0),
            ..PreferencesUpdate::default()
        });
        assert_eq!(prefs.budget_max, Some(40.0));
        assert_eq!(prefs.default_location.as_deref(), Some("Austin"));
    }

    #[test]
    fn history_keeps_last_fifty() {
        let mut prefs = UserPreferences::default();
        for i in 0..60 {
            prefs.record(RecordedChoice::new(
                PlatformId::new("uber"),
                format!("ride {i}"),
                Price::ZERO,
            ));
        }
        assert_eq!(prefs.choice_history.len(), MAX_CHOICE_HISTORY);
        assert_eq!(prefs.search_history_count, 60);
        assert_eq!(
            prefs.choice_history.first().map(|c| c.item_name.as_str()),
            Some("ride 10")
        );
    }
}
