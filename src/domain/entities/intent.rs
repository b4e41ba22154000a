//! # Intent
//!
//! Structured interpretation of a free-text query.

use crate::domain::entities::filters::Filters;
use crate::domain::value_objects::Category;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Structured interpretation of a free-text query.
///
/// Immutable once built. The `with_*` methods consume and return the intent
/// so it can be assembled in one expression.
///
/// # Examples
///
/// ```
/// use smart_dealer::domain::entities::Intent;
/// use smart_dealer::domain::value_objects::Category;
///
/// let intent = Intent::new(Category::Food, "sushi").with_budget(15.0);
/// assert_eq!(intent.budget(), Some(15.0));
/// assert_eq!(intent.filters().budget_max(), Some(15.0));
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Intent {
    category: Category,
    subject: String,
    filters: Filters,
    location: Option<String>,
    time_constraint: Option<String>,
    budget: Option<f64>,
    low_confidence: bool,
}

impl Intent {
    /// Creates an intent with no constraints.
    #[must_use]
    pub fn new(category: Category, subject: impl Into<String>) -> Self {
        Self {
            category,
            subject: subject.into(),
            filters: Filters::new(),
            location: None,
            time_constraint: None,
            budget: None,
            low_confidence: false,
        }
    }

    /// Sets the budget ceiling; non-positive values are ignored.
    #[must_use]
    pub fn with_budget(mut self, budget: f64) -> Self {
        if budget.is_finite() && budget > 0.0 {
            self.budget = Some(budget);
            self.filters.insert(Filters::BUDGET_MAX, budget);
        }
        self
    }

    /// Sets the time constraint.
    #[must_use]
    pub fn with_time_constraint(mut self, constraint: impl Into<String>) -> Self {
        let constraint = constraint.into();
        self.filters
            .insert(Filters::TIME_CONSTRAINT, constraint.clone());
        self.time_constraint = Some(constraint);
        self
    }

    /// Sets the location.
    #[must_use]
    pub fn with_location(mut self, location: impl Into<String>) -> Self {
        self.location = Some(location.into());
        self
    }

    /// Marks the category as a fallback rather than a keyword match.
    #[must_use]
    pub fn with_low_confidence(mut self, low_confidence: bool) -> Self {
        self.low_confidence = low_confidence;
        self
    }

    /// Returns the detected category.
    #[inline]
    #[must_use]
    pub fn category(&self) -> Category {
        self.category
    }

    /// Returns the subject item, e.g. `"sushi delivery"`.
    #[inline]
    #[must_use]
    pub fn subject(&self) -> &str {
        &self.subject
    }

    /// Returns the filters derived from the query.
    #[inline]
    #[must_use]
    pub fn filters(&self) -> &Filters {
        &self.filters
    }

    /// Returns the location, if any.
    #[must_use]
    pub fn location(&self) -> Option<&str> {
        self.location.as_deref()
    }

    /// Returns the time constraint, if any.
    #[must_use]
    pub fn time_constraint(&self) -> Option<&str> {
        self.time_constraint.as_deref()
    }

    /// Returns the budget ceiling, if any.
    #[must_use]
    pub fn budget(&self) -> Option<f64> {
        self.budget
    }

    /// Returns true if no category keyword matched and the default
    /// category was used.
    #[must_use]
    pub fn is_low_confidence(&self) -> bool {
        self.low_confidence
    }
}

impl fmt::Display for Intent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Intent({} \"{}\"", self.category, self.subject)?;
        if let Some(budget) = self.budget {
            write!(f, " budget={budget}")?;
        }
        if let Some(location) = &self.location {
            write!(f, " location={location}")?;
        }
        write!(f, ")")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn non_positive_budget_is_ignored() {
        let intent = Intent::new(Category::Product, "laptop").with_budget(0.0);
        assert_eq!(intent.budget(), None);
        assert!(intent.filters().is_empty());
    }

    #[test]
    fn time_constraint_lands_in_filters() {
        let intent = Intent::new(Category::Food, "pizza").with_time_constraint("30 minutes");
        assert_eq!(intent.time_constraint(), Some("30 minutes"));
        assert_eq!(
            intent.filters().get_str(Filters::TIME_CONSTRAINT),
            Some("30 minutes")
        );
    }

    #[test]
    fn display_includes_constraints() {
        let intent = Intent::new(Category::Hotel, "hotel")
            .with_budget(200.0)
            .with_location("Paris");
        assert_eq!(
            intent.to_string(),
            "Intent(hotel \"hotel\" budget=200 location=Paris)"
        );
    }
}
