//! # Intent Parser
//!
//! Rule-based extraction of an [`Intent`] from a free-text query.
//!
//! # Algorithm
//!
//! 1. **Category**: count distinct keywords of each category that occur as
//!    substrings of the lower-cased query. The highest count wins, ties go
//!    to the earlier entry of [`Category::ALL`], and a query with no hits
//!    falls back to [`Category::Product`] with the low-confidence flag set.
//! 2. **Budget**: the first budget pattern that matches, in priority order.
//!    A number followed by `min` is a duration, not a budget.
//! 3. **Time**: `within|in|under N min(ute)(s)` becomes `"N minutes"`.
//! 4. **Location**: a capitalised phrase (or `the ...`) after a preposition,
//!    terminated by a stop word or end of text.
//! 5. **Subject**: the query with filler prefix, trailing constraint
//!    clause and leading superlative removed. Empty results fall back to
//!    the query.
//!
//! Parsing never fails.
//!
//! # Examples
//!
//! ```
//! use smart_dealer::domain::services::IntentParser;
//! use smart_dealer::domain::value_objects::Category;
//!
//! let intent = IntentParser::new().parse("Find me the cheapest sushi delivery under $15");
//! assert_eq!(intent.category(), Category::Food);
//! assert_eq!(intent.subject(), "sushi delivery");
//! assert_eq!(intent.budget(), Some(15.0));
//! ```

use crate::domain::entities::Intent;
use crate::domain::value_objects::Category;
use regex::Regex;
use std::sync::LazyLock;
use tracing::debug;

const FOOD_KEYWORDS: &[&str] = &[
    "pizza", "burger", "sushi", "tacos", "food", "delivery", "restaurant", "eat", "meal",
    "lunch", "dinner", "breakfast", "wings", "chinese", "indian", "thai", "mexican",
    "italian", "noodles", "rice", "salad", "sandwich", "soup", "steak", "chicken", "vegan",
    "vegetarian", "dessert", "coffee", "bubble tea", "fries", "pasta", "ramen",
];

const PRODUCT_KEYWORDS: &[&str] = &[
    "buy", "product", "price", "laptop", "phone", "headphones", "tv", "camera", "tablet",
    "monitor", "keyboard", "mouse", "watch", "shoes", "clothing", "book", "electronics",
    "appliance", "gadget", "deal", "purchase", "shop", "compare", "cheapest",
];

const RIDE_KEYWORDS: &[&str] = &[
    "ride", "uber", "lyft", "taxi", "cab", "drive", "airport", "transport", "pickup", "drop",
    "commute", "carpool",
];

const HOTEL_KEYWORDS: &[&str] = &[
    "hotel", "motel", "resort", "airbnb", "vrbo", "stay", "accommodation", "booking",
    "lodge", "hostel", "room", "suite", "night", "check-in", "vacation", "rental",
    "bed and breakfast",
];

/// Keyword sets in tie-break order.
const CATEGORY_KEYWORDS: [(Category, &[&str]); 4] = [
    (Category::Food, FOOD_KEYWORDS),
    (Category::Product, PRODUCT_KEYWORDS),
    (Category::Ride, RIDE_KEYWORDS),
    (Category::Hotel, HOTEL_KEYWORDS),
];

const BUDGET_PATTERNS: &[&str] = &[
    r"(?i)\bunder\s+\$?(\d+(?:\.\d+)?)",
    r"(?i)\bbelow\s+\$?(\d+(?:\.\d+)?)",
    r"(?i)\bless\s+than\s+\$?(\d+(?:\.\d+)?)",
    r"(?i)\bmax(?:imum)?\s+\$?(\d+(?:\.\d+)?)",
    r"(?i)\bbudget\s+(?:of\s+)?\$?(\d+(?:\.\d+)?)",
    r"(?i)\$(\d+(?:\.\d+)?)\s*(?:max|limit|budget)",
    r"(?i)\bup\s+to\s+\$?(\d+(?:\.\d+)?)",
];

const TIME_PATTERNS: &[&str] = &[
    r"(?i)\bwithin\s+(\d+)\s*min(?:ute)?s?",
    r"(?i)\bin\s+(\d+)\s*min(?:ute)?s?",
    r"(?i)\bunder\s+(\d+)\s*min(?:ute)?s?",
];

const LOCATION_PATTERNS: &[&str] = &[
    r"\b(?:in|near|around|to|from|at)\s+([A-Z][a-zA-Z\s]+?)(?:\s+(?:for|under|within|below|max|this|next)\b|$)",
    r"\b(?:in|near|around|to|from|at)\s+the\s+([a-zA-Z\s]+?)(?:\s+(?:for|under|within|below|max|this|next)\b|$)",
];

const FILLER_PREFIX: &str = r"(?i)^(?:find\s+(?:me\s+)?(?:the\s+)?|search\s+(?:for\s+)?|compare\s+|get\s+(?:me\s+)?|show\s+(?:me\s+)?|i\s+(?:want|need)\s+(?:a\s+)?|what(?:'s|\s+is)\s+the\s+)";
const TRAILING_CLAUSE: &str =
    r"(?i)\s+(?:under|below|less\s+than|within|in|near|around|for|max)\b.*$";
const LEADING_SUPERLATIVE: &str =
    r"(?i)^(?:cheapest|best|fastest|nearest|lowest|most\s+affordable)\s+";

fn compile(patterns: &[&str]) -> Vec<Regex> {
    patterns.iter().filter_map(|p| Regex::new(p).ok()).collect()
}

static BUDGET_RES: LazyLock<Vec<Regex>> = LazyLock::new(|| compile(BUDGET_PATTERNS));
static TIME_RES: LazyLock<Vec<Regex>> = LazyLock::new(|| compile(TIME_PATTERNS));
static LOCATION_RES: LazyLock<Vec<Regex>> = LazyLock::new(|| compile(LOCATION_PATTERNS));
static SUBJECT_RES: LazyLock<Vec<Regex>> =
    LazyLock::new(|| compile(&[FILLER_PREFIX, TRAILING_CLAUSE, LEADING_SUPERLATIVE]));

/// Stateless rule-based query parser.
#[derive(Debug, Clone, Copy, Default)]
pub struct IntentParser;

impl IntentParser {
    /// Creates a parser.
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Parses a query into an intent.
    #[must_use]
    pub fn parse(&self, query: &str) -> Intent {
        let (category, low_confidence) = detect_category(&query.to_lowercase());
        let mut intent =
            Intent::new(category, extract_subject(query)).with_low_confidence(low_confidence);

        if let Some(budget) = extract_budget(query) {
            intent = intent.with_budget(budget);
        }
        if let Some(time) = extract_time(query) {
            intent = intent.with_time_constraint(time);
        }
        if let Some(location) = extract_location(query) {
            intent = intent.with_location(location);
        }

        debug!(
            category = %intent.category(),
            subject = intent.subject(),
            budget = ?intent.budget(),
            location = ?intent.location(),
            low_confidence,
            "intent extracted"
        );
        intent
    }
}

/// Returns the winning category and whether it is the no-signal fallback.
fn detect_category(query_lower: &str) -> (Category, bool) {
    let mut best = (Category::Product, 0usize);
    for (category, keywords) in CATEGORY_KEYWORDS {
        let score = keywords.iter().filter(|kw| query_lower.contains(*kw)).count();
        if score > best.1 {
            best = (category, score);
        }
    }
    (best.0, best.1 == 0)
}

/// First budget pattern with a match wins. A number directly followed by
/// "min" is a duration ("under 30 minutes") and is never a budget.
fn extract_budget(query: &str) -> Option<f64> {
    BUDGET_RES.iter().find_map(|re| {
        re.captures_iter(query).find_map(|caps| {
            let whole = caps.get(0)?;
            let rest = query.get(whole.end()..).unwrap_or_default();
            if rest.trim_start().to_lowercase().starts_with("min") {
                return None;
            }
            caps.get(1)?.as_str().parse::<f64>().ok()
        })
    })
}

fn extract_time(query: &str) -> Option<String> {
    TIME_RES.iter().find_map(|re| {
        re.captures(query)
            .and_then(|caps| caps.get(1))
            .map(|m| format!("{} minutes", m.as_str()))
    })
}

fn extract_location(query: &str) -> Option<String> {
    LOCATION_RES.iter().find_map(|re| {
        re.captures(query)
            .and_then(|caps| caps.get(1))
            .map(|m| m.as_str().trim().to_string())
            .filter(|loc| !loc.is_empty())
    })
}

fn extract_subject(query: &str) -> String {
    let mut cleaned = query.trim().to_string();
    for re in SUBJECT_RES.iter() {
        cleaned = re.replace(cleaned.trim(), "").into_owned();
    }
    let cleaned = cleaned.trim();
    if cleaned.is_empty() {
        query.to_string()
    } else {
        cleaned.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(query: &str) -> Intent {
        IntentParser::new().parse(query)
    }

    #[test]
    fn sushi_example() {
        let intent = parse("Find me the cheapest sushi delivery under $15");
        assert_eq!(intent.category(), Category::Food);
        assert_eq!(intent.subject(), "sushi delivery");
        assert_eq!(intent.budget(), Some(15.0));
        assert_eq!(intent.filters().budget_max(), Some(15.0));
        assert!(!intent.is_low_confidence());
    }

    #[test]
    fn no_keywords_defaults_to_product() {
        let intent = parse("something nice for grandma");
        assert_eq!(intent.category(), Category::Product);
        assert!(intent.is_low_confidence());
    }

    #[test]
    fn ties_go_to_earlier_category() {
        // one food keyword, one ride keyword
        let intent = parse("pizza ride");
        assert_eq!(intent.category(), Category::Food);
    }

    #[test]
    fn ride_and_hotel_detection() {
        assert_eq!(parse("uber to the airport").category(), Category::Ride);
        assert_eq!(parse("hotel for 3 nights in Paris").category(), Category::Hotel);
    }

    #[test]
    fn budget_patterns() {
        assert_eq!(parse("laptop below 900").budget(), Some(900.0));
        assert_eq!(parse("headphones less than $49.99").budget(), Some(49.99));
        assert_eq!(parse("tv max $500").budget(), Some(500.0));
        assert_eq!(parse("phone with a budget of $300").budget(), Some(300.0));
        assert_eq!(parse("shoes $80 limit").budget(), Some(80.0));
        assert_eq!(parse("camera up to 250").budget(), Some(250.0));
        assert_eq!(parse("laptop").budget(), None);
    }

    #[test]
    fn durations_are_not_budgets() {
        let intent = parse("pizza delivery under 30 minutes");
        assert_eq!(intent.budget(), None);
        assert_eq!(intent.time_constraint(), Some("30 minutes"));
    }

    #[test]
    fn time_constraint_patterns() {
        assert_eq!(
            parse("burger within 20 mins").time_constraint(),
            Some("20 minutes")
        );
        assert_eq!(parse("ramen in 45 min").time_constraint(), Some("45 minutes"));
        assert_eq!(parse("ramen").time_constraint(), None);
    }

    #[test]
    fn location_capitalised_phrase() {
        let intent = parse("hotel in San Francisco for 2 nights");
        assert_eq!(intent.location(), Some("San Francisco"));

        let intent = parse("cheap tacos near Austin");
        assert_eq!(intent.location(), Some("Austin"));
    }

    #[test]
    fn location_with_article() {
        let intent = parse("ride to the airport");
        assert_eq!(intent.location(), Some("airport"));
    }

    #[test]
    fn subject_strips_filler_and_clauses() {
        assert_eq!(parse("search for best laptop under $900").subject(), "laptop");
        assert_eq!(parse("show me hotels in Paris").subject(), "hotels");
        assert_eq!(parse("I want a pizza").subject(), "pizza");
    }

    #[test]
    fn empty_subject_falls_back_to_query() {
        assert_eq!(parse("   ").subject(), "   ");
    }
}
