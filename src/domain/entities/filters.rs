//! # Search Filters
//!
//! String-keyed filter mapping passed read-only to every source.
//!
//! Well-known keys have typed accessors; anything else is carried through
//! untouched so platform-specific sources can read their own keys
//! (`nights`, `origin`, `destination`, ...).

use crate::domain::value_objects::PlatformId;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Filter mapping of string keys to JSON-compatible values.
///
/// Keys are kept in sorted order, so serialisation is deterministic.
///
/// # Examples
///
/// ```
/// use smart_dealer::domain::entities::Filters;
///
/// let mut filters = Filters::new();
/// filters.insert(Filters::BUDGET_MAX, 15.0);
/// assert_eq!(filters.budget_max(), Some(15.0));
/// ```
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Filters(Map<String, Value>);

impl Filters {
    /// Maximum total price.
    pub const BUDGET_MAX: &'static str = "budget_max";
    /// Free-text time constraint, e.g. `"30 minutes"`.
    pub const TIME_CONSTRAINT: &'static str = "time_constraint";
    /// Free-text location.
    pub const LOCATION: &'static str = "location";
    /// Platform allow-list.
    pub const PLATFORMS: &'static str = "platforms";
    /// Number of nights for accommodation.
    pub const NIGHTS: &'static str = "nights";

    /// Creates an empty filter set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Wraps an existing JSON map.
    #[must_use]
    pub fn from_map(map: Map<String, Value>) -> Self {
        Self(map)
    }

    /// Sets a value, replacing any previous one.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        self.0.insert(key.into(), value.into());
    }

    /// Builder-style [`insert`](Self::insert).
    #[must_use]
    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.insert(key, value);
        self
    }

    /// Removes a key, returning its value.
    pub fn remove(&mut self, key: &str) -> Option<Value> {
        self.0.remove(key)
    }

    /// Returns the raw value for a key.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    /// Returns a numeric value, accepting numbers and numeric strings.
    #[must_use]
    pub fn get_f64(&self, key: &str) -> Option<f64> {
        match self.0.get(key)? {
            Value::Number(n) => n.as_f64(),
            Value::String(s) => s.trim().parse().ok(),
            _ => None,
        }
    }

    /// Returns a non-negative integer value.
    #[must_use]
    pub fn get_u64(&self, key: &str) -> Option<u64> {
        match self.0.get(key)? {
            Value::Number(n) => n.as_u64(),
            Value::String(s) => s.trim().parse().ok(),
            _ => None,
        }
    }

    /// Returns a string value.
    #[must_use]
    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.0.get(key).and_then(Value::as_str)
    }

    /// Returns the budget ceiling if present and positive.
    #[must_use]
    pub fn budget_max(&self) -> Option<f64> {
        self.get_f64(Self::BUDGET_MAX)
            .filter(|b| b.is_finite() && *b > 0.0)
    }

    /// Returns the location, if any.
    #[must_use]
    pub fn location(&self) -> Option<&str> {
        self.get_str(Self::LOCATION)
    }

    /// Returns the platform allow-list, if any.
    ///
    /// Accepts a JSON array of strings or a comma-separated string. An empty
    /// list means no restriction.
    #[must_use]
    pub fn platforms(&self) -> Option<Vec<PlatformId>> {
        let platforms: Vec<PlatformId> = match self.0.get(Self::PLATFORMS)? {
            Value::Array(items) => items
                .iter()
                .filter_map(Value::as_str)
                .map(PlatformId::new)
                .collect(),
            Value::String(s) => s
                .split(',')
                .map(str::trim)
                .filter(|p| !p.is_empty())
                .map(PlatformId::new)
                .collect(),
            _ => return None,
        };
        (!platforms.is_empty()).then_some(platforms)
    }

    /// Sets the platform allow-list.
    pub fn set_platforms(&mut self, platforms: &[PlatformId]) {
        let values = platforms
            .iter()
            .map(|p| Value::String(p.as_str().to_string()))
            .collect::<Vec<_>>();
        self.0.insert(Self::PLATFORMS.to_string(), Value::Array(values));
    }

    /// Returns a copy of `self` overlaid with `other`; `other` wins on key
    /// collision.
    #[must_use]
    pub fn merged_with(&self, other: &Filters) -> Filters {
        let mut merged = self.0.clone();
        for (key, value) in &other.0 {
            merged.insert(key.clone(), value.clone());
        }
        Filters(merged)
    }

    /// Returns the number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns true if there are no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns an iterator over the entries.
    pub fn iter(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.0.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn merge_prefers_overlay() {
        let base = Filters::new()
            .with(Filters::BUDGET_MAX, 15.0)
            .with(Filters::TIME_CONSTRAINT, "30 minutes");
        let overlay = Filters::new().with(Filters::BUDGET_MAX, 20.0);

        let merged = base.merged_with(&overlay);
        assert_eq!(merged.budget_max(), Some(20.0));
        assert_eq!(merged.get_str(Filters::TIME_CONSTRAINT), Some("30 minutes"));
        assert_eq!(merged.len(), 2);
    }

    #[test]
    fn budget_must_be_positive() {
        assert_eq!(Filters::new().with(Filters::BUDGET_MAX, 0.0).budget_max(), None);
        assert_eq!(Filters::new().with(Filters::BUDGET_MAX, -4).budget_max(), None);
        assert_eq!(
            Filters::new().with(Filters::BUDGET_MAX, "12.5").budget_max(),
            Some(12.5)
        );
    }

    #[test]
    fn platforms_from_array_or_string() {
        let filters = Filters::new().with(Filters::PLATFORMS, json!(["uber", "lyft"]));
        assert_eq!(
            filters.platforms(),
            Some(vec![PlatformId::new("uber"), PlatformId::new("lyft")])
        );

        let filters = Filters::new().with(Filters::PLATFORMS, "amazon, ebay");
        assert_eq!(
            filters.platforms(),
            Some(vec![PlatformId::new("amazon"), PlatformId::new("ebay")])
        );

        assert_eq!(Filters::new().platforms(), None);
    }

    #[test]
    fn empty_platform_list_is_unrestricted() {
        assert!(Filters::new().with(Filters::PLATFORMS, json!([])).platforms().is_none());
        assert!(Filters::new().with(Filters::PLATFORMS, " , ").platforms().is_none());
    }

    #[test]
    fn set_platforms_roundtrip() {
        let mut filters = Filters::new();
        filters.set_platforms(&[PlatformId::new("taxi")]);
        assert_eq!(filters.platforms(), Some(vec![PlatformId::new("taxi")]));
    }

    #[test]
    fn serializes_as_plain_object() {
        let filters = Filters::new().with(Filters::NIGHTS, 3);
        assert_eq!(serde_json::to_value(&filters).ok(), Some(json!({"nights": 3})));
        assert_eq!(filters.get_u64(Filters::NIGHTS), Some(3));
    }
}
