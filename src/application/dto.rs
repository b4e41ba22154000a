//! # Data Transfer Objects
//!
//! Inbound search request and outbound search response.
//!
//! Both are plain serde types; any JSON-compatible encoding works.

use crate::application::error::{ApplicationError, ApplicationResult};
use crate::domain::entities::{Deal, Filters, Offer, PipelineState};
use crate::domain::value_objects::{Category, PlatformId, SearchStatus, SessionId};
use serde::{Deserialize, Serialize};

/// Minimum query length in characters.
pub const MIN_QUERY_CHARS: usize = 3;

/// Maximum query length in characters.
pub const MAX_QUERY_CHARS: usize = 500;

/// A search request.
///
/// # Examples
///
/// ```
/// use smart_dealer::application::dto::SearchRequest;
/// use smart_dealer::domain::value_objects::Category;
///
/// let request = SearchRequest::new("cheap pizza")
///     .with_category(Category::Food)
///     .with_budget_max(20.0);
/// assert!(request.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchRequest {
    /// Free-text query.
    pub query: String,
    /// Category override; wins over the parsed category.
    #[serde(default)]
    pub category: Option<Category>,
    /// Caller filters; win over filters parsed from the query.
    #[serde(default)]
    pub filters: Filters,
    /// Location override.
    #[serde(default)]
    pub location: Option<String>,
    /// Budget ceiling.
    #[serde(default)]
    pub budget_max: Option<f64>,
    /// Platform allow-list.
    #[serde(default)]
    pub platforms: Option<Vec<PlatformId>>,
}

impl SearchRequest {
    /// Creates a request with only a query.
    #[must_use]
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            category: None,
            filters: Filters::new(),
            location: None,
            budget_max: None,
            platforms: None,
        }
    }

    /// Forces the category.
    #[must_use]
    pub fn with_category(mut self, category: Category) -> Self {
        self.category = Some(category);
        self
    }

    /// Sets caller filters.
    #[must_use]
    pub fn with_filters(mut self, filters: Filters) -> Self {
        self.filters = filters;
        self
    }

    /// Sets the location.
    #[must_use]
    pub fn with_location(mut self, location: impl Into<String>) -> Self {
        self.location = Some(location.into());
        self
    }

    /// Sets the budget ceiling.
    #[must_use]
    pub fn with_budget_max(mut self, budget_max: f64) -> Self {
        self.budget_max = Some(budget_max);
        self
    }

    /// Restricts the search to the given platforms.
    #[must_use]
    pub fn with_platforms(mut self, platforms: Vec<PlatformId>) -> Self {
        self.platforms = Some(platforms);
        self
    }

    /// Validates the request.
    ///
    /// # Errors
    ///
    /// Returns `ApplicationError::Validation` if the query is not 3 to 500
    /// characters long or `budget_max` is not a positive number.
    pub fn validate(&self) -> ApplicationResult<()> {
        let chars = self.query.chars().count();
        if !(MIN_QUERY_CHARS..=MAX_QUERY_CHARS).contains(&chars) {
            return Err(ApplicationError::validation(format!(
                "query must be {MIN_QUERY_CHARS}-{MAX_QUERY_CHARS} characters, got {chars}"
            )));
        }
        if let Some(budget) = self.budget_max.filter(|b| !(b.is_finite() && *b > 0.0)) {
            return Err(ApplicationError::validation(format!(
                "budget_max must be positive, got {budget}"
            )));
        }
        Ok(())
    }
}

/// Result of one search.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchResponse {
    /// Session of the request.
    pub session_id: SessionId,
    /// Original query.
    pub query: String,
    /// Category searched, if the request got that far.
    pub category: Option<Category>,
    /// Final status.
    pub status: SearchStatus,
    /// Number of entries in `results`.
    pub result_count: usize,
    /// Ranked offers, best first.
    pub results: Vec<Offer>,
    /// Deals that were considered.
    pub deals_found: Vec<Deal>,
    /// Wall time of the request.
    pub search_time_ms: u64,
    /// Non-fatal and fatal error messages, in the order they occurred.
    #[serde(default)]
    pub errors: Vec<String>,
    /// True when the category came from the no-signal fallback.
    #[serde(default)]
    pub low_confidence: bool,
}

impl SearchResponse {
    /// Builds the response from a finished pipeline state.
    #[must_use]
    pub fn from_state(mut state: PipelineState) -> Self {
        let results = state.take_ranked();
        let deals_found = state.take_deals();
        Self {
            session_id: state.session_id(),
            query: state.query().to_string(),
            category: state.category(),
            status: state.status(),
            result_count: results.len(),
            results,
            deals_found,
            search_time_ms: state.elapsed_ms(),
            errors: state.errors().to_vec(),
            low_confidence: state.intent().is_some_and(|i| i.is_low_confidence()),
        }
    }

    /// Returns the best offer, if any.
    #[must_use]
    pub fn best_offer(&self) -> Option<&Offer> {
        self.results.first()
    }

    /// Returns true if the search produced a usable result set.
    #[must_use]
    pub fn is_success(&self) -> bool {
        matches!(self.status, SearchStatus::Completed | SearchStatus::Partial)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn query_length_bounds() {
        assert!(SearchRequest::new("ab").validate().is_err());
        assert!(SearchRequest::new("abc").validate().is_ok());
        assert!(SearchRequest::new("x".repeat(500)).validate().is_ok());
        assert!(SearchRequest::new("x".repeat(501)).validate().is_err());
    }

    #[test]
    fn query_length_counts_characters() {
        // three characters, six bytes
        assert!(SearchRequest::new("été").validate().is_ok());
    }

    #[test]
    fn budget_must_be_positive() {
        let err = SearchRequest::new("laptop")
            .with_budget_max(0.0)
            .validate()
            .unwrap_err();
        assert!(err.is_validation());
        assert!(SearchRequest::new("laptop").with_budget_max(f64::NAN).validate().is_err());
        assert!(SearchRequest::new("laptop").with_budget_max(0.01).validate().is_ok());
    }

    #[test]
    fn request_deserializes_with_defaults() {
        let request: SearchRequest =
            serde_json::from_str(r#"{"query": "ride to the airport", "category": "ride"}"#)
                .unwrap();
        assert_eq!(request.category, Some(Category::Ride));
        assert!(request.filters.is_empty());
        assert!(request.platforms.is_none());
    }

    #[test]
    fn response_from_failed_state() {
        let mut state = PipelineState::new("??", None);
        state.fail("query too short");
        let response = SearchResponse::from_state(state);

        assert_eq!(response.status, SearchStatus::Failed);
        assert_eq!(response.result_count, 0);
        assert!(response.category.is_none());
        assert!(!response.is_success());
        assert!(response.best_offer().is_none());
        assert_eq!(response.errors, ["query too short".to_string()]);
    }

    #[test]
    fn response_serializes_status_lowercase() {
        let response = SearchResponse::from_state(PipelineState::new("pizza", None));
        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["status"], "pending");
        assert_eq!(json["result_count"], 0);
    }
}
