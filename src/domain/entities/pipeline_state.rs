//! # Pipeline State
//!
//! Per-request record threaded through the search stages.
//!
//! Owned exclusively by one request. Offers, deals and errors only grow
//! until the final stage takes the offers for ranking; status changes go
//! through [`SearchStatus::can_transition_to`].

use crate::domain::entities::{Deal, Filters, Intent, Offer, UserPreferences};
use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::value_objects::{Category, SearchStatus, SessionId};
use std::time::Instant;

/// Mutable state of one search request.
#[derive(Debug)]
pub struct PipelineState {
    session_id: SessionId,
    query: String,
    caller_id: Option<String>,
    intent: Option<Intent>,
    category: Option<Category>,
    filters: Filters,
    preferences: UserPreferences,
    offers: Vec<Offer>,
    deals: Vec<Deal>,
    ranked: Vec<Offer>,
    status: SearchStatus,
    errors: Vec<String>,
    started_at: Instant,
}

impl PipelineState {
    /// Creates a pending state for a query.
    #[must_use]
    pub fn new(query: impl Into<String>, caller_id: Option<String>) -> Self {
        Self {
            session_id: SessionId::new_v4(),
            query: query.into(),
            caller_id,
            intent: None,
            category: None,
            filters: Filters::new(),
            preferences: UserPreferences::default(),
            offers: Vec::new(),
            deals: Vec::new(),
            ranked: Vec::new(),
            status: SearchStatus::Pending,
            errors: Vec::new(),
            started_at: Instant::now(),
        }
    }

    /// Returns the session ID.
    #[inline]
    #[must_use]
    pub fn session_id(&self) -> SessionId {
        self.session_id
    }

    /// Returns the original query.
    #[must_use]
    pub fn query(&self) -> &str {
        &self.query
    }

    /// Returns the caller ID, if any.
    #[must_use]
    pub fn caller_id(&self) -> Option<&str> {
        self.caller_id.as_deref()
    }

    /// Returns the parsed intent, if parsing has run.
    #[must_use]
    pub fn intent(&self) -> Option<&Intent> {
        self.intent.as_ref()
    }

    /// Records the parsed intent and the category to route on.
    pub fn set_intent(&mut self, intent: Intent, category: Category) {
        self.intent = Some(intent);
        self.category = Some(category);
    }

    /// Returns the resolved category, if any.
    #[must_use]
    pub fn category(&self) -> Option<Category> {
        self.category
    }

    /// Returns the merged filters.
    #[must_use]
    pub fn filters(&self) -> &Filters {
        &self.filters
    }

    /// Replaces the merged filters.
    pub fn set_filters(&mut self, filters: Filters) {
        self.filters = filters;
    }

    /// Returns the caller's preferences.
    #[must_use]
    pub fn preferences(&self) -> &UserPreferences {
        &self.preferences
    }

    /// Replaces the caller's preferences.
    pub fn set_preferences(&mut self, preferences: UserPreferences) {
        self.preferences = preferences;
    }

    /// Returns the accumulated offers.
    #[must_use]
    pub fn offers(&self) -> &[Offer] {
        &self.offers
    }

    /// Appends offers from one source.
    pub fn extend_offers(&mut self, offers: impl IntoIterator<Item = Offer>) {
        self.offers.extend(offers);
    }

    /// Removes and returns the accumulated offers.
    pub fn take_offers(&mut self) -> Vec<Offer> {
        std::mem::take(&mut self.offers)
    }

    /// Returns the accumulated deals.
    #[must_use]
    pub fn deals(&self) -> &[Deal] {
        &self.deals
    }

    /// Appends deals from one source.
    pub fn extend_deals(&mut self, deals: impl IntoIterator<Item = Deal>) {
        self.deals.extend(deals);
    }

    /// Returns the ranked offers.
    #[must_use]
    pub fn ranked(&self) -> &[Offer] {
        &self.ranked
    }

    /// Stores the ranked offers.
    pub fn set_ranked(&mut self, ranked: Vec<Offer>) {
        self.ranked = ranked;
    }

    /// Removes and returns the ranked offers.
    pub fn take_ranked(&mut self) -> Vec<Offer> {
        std::mem::take(&mut self.ranked)
    }

    /// Removes and returns the accumulated deals.
    pub fn take_deals(&mut self) -> Vec<Deal> {
        std::mem::take(&mut self.deals)
    }

    /// Returns the current status.
    #[inline]
    #[must_use]
    pub fn status(&self) -> SearchStatus {
        self.status
    }

    /// Moves to `next`.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidStatusTransition` if the state machine
    /// does not allow the move.
    pub fn transition_to(&mut self, next: SearchStatus) -> DomainResult<()> {
        if !self.status.can_transition_to(next) {
            return Err(DomainError::InvalidStatusTransition {
                from: self.status,
                to: next,
            });
        }
        self.status = next;
        Ok(())
    }

    /// Forces the failed status and drops any ranked results.
    ///
    /// Used when the stage sequence itself broke, so it bypasses the
    /// transition table.
    pub fn fail(&mut self, error: impl Into<String>) {
        self.errors.push(error.into());
        self.ranked.clear();
        self.status = SearchStatus::Failed;
    }

    /// Returns the recorded error messages.
    #[must_use]
    pub fn errors(&self) -> &[String] {
        &self.errors
    }

    /// Records a non-fatal error.
    pub fn record_error(&mut self, error: impl Into<String>) {
        self.errors.push(error.into());
    }

    /// Returns true if any error has been recorded.
    #[must_use]
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    /// Returns milliseconds since the state was created.
    #[must_use]
    pub fn elapsed_ms(&self) -> u64 {
        u64::try_from(self.started_at.elapsed().as_millis()).unwrap_or(u64::MAX)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_state_is_pending_and_empty() {
        let state = PipelineState::new("cheap pizza", None);
        assert_eq!(state.status(), SearchStatus::Pending);
        assert!(state.offers().is_empty());
        assert!(!state.has_errors());
        assert!(state.intent().is_none());
    }

    #[test]
    fn transitions_follow_state_machine() {
        let mut state = PipelineState::new("cheap pizza", None);
        assert!(state.transition_to(SearchStatus::Completed).is_err());
        assert!(state.transition_to(SearchStatus::Processing).is_ok());
        assert!(state.transition_to(SearchStatus::Partial).is_ok());
        assert!(state.transition_to(SearchStatus::Processing).is_err());
        assert_eq!(state.status(), SearchStatus::Partial);
    }

    #[test]
    fn fail_clears_results_from_any_state() {
        let mut state = PipelineState::new("cheap pizza", Some("u1".to_string()));
        state.set_ranked(Vec::new());
        state.fail("boom");
        assert_eq!(state.status(), SearchStatus::Failed);
        assert_eq!(state.errors(), ["boom".to_string()]);
        assert_eq!(state.caller_id(), Some("u1"));
    }

    #[test]
    fn errors_are_append_only() {
        let mut state = PipelineState::new("cheap pizza", None);
        state.record_error("a");
        state.record_error("b");
        assert_eq!(state.errors(), ["a".to_string(), "b".to_string()]);
    }
}
