//! # Search Pipeline
//!
//! Orchestrates one search request from query text to ranked offers.
//!
//! This module provides the [`SearchPipeline`], which runs five stages in
//! order over a [`PipelineState`]:
//!
//! 1. **parse**: intent extraction, `pending -> processing`. A category with
//!    no registered offer sources fails the request here.
//! 2. **preferences**: caller weight overrides. Lookup failures are logged
//!    and ignored.
//! 3. **search**: concurrent fan-out to the category's offer sources, each
//!    bounded by a timeout and isolated from its siblings. Offers over the
//!    budget are dropped.
//! 4. **deals**: concurrent fan-out to deal sources with the same isolation.
//! 5. **apply & rank**: discounts once, rank, truncate, then `completed` or
//!    `partial` if any source error was recorded.
//!
//! The pipeline never returns an error. A panic escaping the stages turns
//! into a `failed` response with no results.

use crate::application::dto::{SearchRequest, SearchResponse};
use crate::application::error::ApplicationResult;
use crate::application::services::ranking_strategy::{
    RankingStrategy, RankingWeights, WeightedValueStrategy,
};
use crate::domain::entities::{Filters, Intent, Offer, PipelineState};
use crate::domain::services::{DiscountEngine, IntentParser};
use crate::domain::value_objects::{Category, SearchStatus};
use crate::infrastructure::sources::error::SourceError;
use crate::infrastructure::sources::registry::SourceRegistry;
use crate::infrastructure::sources::traits::PreferenceStore;
use chrono::Utc;
use futures::FutureExt;
use rust_decimal::Decimal;
use rust_decimal::prelude::FromPrimitive;
use serde::{Deserialize, Serialize};
use std::panic::AssertUnwindSafe;
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio::time::timeout;
use tracing::{error, info, warn};

/// Configuration for the search pipeline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    /// Timeout of a single source call in milliseconds.
    pub per_source_timeout_ms: u64,
    /// Maximum number of ranked offers returned.
    pub max_results: usize,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            per_source_timeout_ms: 5000,
            max_results: 10,
        }
    }
}

impl PipelineConfig {
    /// Sets the per-source timeout.
    #[must_use]
    pub fn with_per_source_timeout(mut self, timeout_ms: u64) -> Self {
        self.per_source_timeout_ms = timeout_ms;
        self
    }

    /// Sets the maximum number of results.
    #[must_use]
    pub fn with_max_results(mut self, max_results: usize) -> Self {
        self.max_results = max_results;
        self
    }

    fn source_timeout(&self) -> Duration {
        Duration::from_millis(self.per_source_timeout_ms)
    }
}

/// Spawned source call labelled with the source it came from.
type SourceTask<T> = (String, JoinHandle<Result<Vec<T>, SourceError>>);

/// Query-to-ranked-offers pipeline.
#[derive(Debug)]
pub struct SearchPipeline {
    registry: Arc<SourceRegistry>,
    preference_store: Option<Arc<dyn PreferenceStore>>,
    parser: IntentParser,
    discounts: DiscountEngine,
    ranking_strategy: Arc<dyn RankingStrategy>,
    weights: RankingWeights,
    config: PipelineConfig,
}

impl SearchPipeline {
    /// Creates a new pipeline.
    #[must_use]
    pub fn new(
        registry: Arc<SourceRegistry>,
        ranking_strategy: Arc<dyn RankingStrategy>,
        config: PipelineConfig,
    ) -> Self {
        Self {
            registry,
            preference_store: None,
            parser: IntentParser::new(),
            discounts: DiscountEngine::new(),
            ranking_strategy,
            weights: RankingWeights::default(),
            config,
        }
    }

    /// Creates a pipeline with weighted value ranking and default
    /// configuration.
    #[must_use]
    pub fn with_defaults(registry: Arc<SourceRegistry>) -> Self {
        Self::new(
            registry,
            Arc::new(WeightedValueStrategy::new()),
            PipelineConfig::default(),
        )
    }

    /// Attaches a preference store.
    #[must_use]
    pub fn with_preference_store(mut self, store: Arc<dyn PreferenceStore>) -> Self {
        self.preference_store = Some(store);
        self
    }

    /// Sets the default ranking weights.
    #[must_use]
    pub fn with_weights(mut self, weights: RankingWeights) -> Self {
        self.weights = weights;
        self
    }

    /// Returns the current configuration.
    #[must_use]
    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Returns the ranking strategy name.
    #[must_use]
    pub fn ranking_strategy_name(&self) -> &'static str {
        self.ranking_strategy.name()
    }

    /// Runs an anonymous search.
    pub async fn execute(&self, request: SearchRequest) -> SearchResponse {
        self.execute_for(request, None).await
    }

    /// Runs a search on behalf of `caller_id`.
    ///
    /// Invalid requests come back as `failed` responses carrying the
    /// validation message.
    pub async fn execute_for(
        &self,
        request: SearchRequest,
        caller_id: Option<&str>,
    ) -> SearchResponse {
        let mut state = PipelineState::new(request.query.clone(), caller_id.map(str::to_string));

        if let Err(e) = request.validate() {
            warn!(session_id = %state.session_id(), error = %e, "request rejected");
            state.fail(e.to_string());
            return SearchResponse::from_state(state);
        }

        info!(
            session_id = %state.session_id(),
            query = state.query(),
            caller_id = ?caller_id,
            "pipeline.start"
        );

        let outcome = AssertUnwindSafe(self.run_stages(&mut state, &request))
            .catch_unwind()
            .await;
        match outcome {
            Ok(Ok(())) => {}
            Ok(Err(e)) => {
                error!(session_id = %state.session_id(), error = %e, "pipeline.failed");
                state.fail(e.to_string());
            }
            Err(_) => {
                error!(session_id = %state.session_id(), "pipeline.failed");
                state.fail("pipeline stage panicked");
            }
        }

        let response = SearchResponse::from_state(state);
        info!(
            session_id = %response.session_id,
            status = %response.status,
            result_count = response.result_count,
            errors = response.errors.len(),
            search_time_ms = response.search_time_ms,
            "pipeline.complete"
        );
        response
    }

    async fn run_stages(
        &self,
        state: &mut PipelineState,
        request: &SearchRequest,
    ) -> ApplicationResult<()> {
        let Some(category) = self.stage_parse(state, request)? else {
            return Ok(());
        };
        let weights = self.stage_preferences(state).await;
        self.stage_search(state, request, category).await;
        self.stage_deals(state, category).await;
        self.stage_rank(state, &weights)
    }

    /// Returns the routable category, or `None` after failing the request.
    fn stage_parse(
        &self,
        state: &mut PipelineState,
        request: &SearchRequest,
    ) -> ApplicationResult<Option<Category>> {
        let intent = self.parser.parse(state.query());
        let category = request.category.unwrap_or_else(|| intent.category());
        info!(
            session_id = %state.session_id(),
            category = %category,
            subject = intent.subject(),
            low_confidence = intent.is_low_confidence(),
            "query.parsed"
        );
        state.set_intent(intent, category);
        state.transition_to(SearchStatus::Processing)?;

        if !self.registry.has_offer_sources(category) {
            let message = format!("no offer sources registered for category '{category}'");
            error!(session_id = %state.session_id(), %category, "pipeline.failed");
            state.fail(message);
            return Ok(None);
        }
        Ok(Some(category))
    }

    async fn stage_preferences(&self, state: &mut PipelineState) -> RankingWeights {
        let (Some(store), Some(caller_id)) = (&self.preference_store, state.caller_id()) else {
            return self.weights;
        };
        let caller_id = caller_id.to_string();

        match timeout(self.config.source_timeout(), store.get(&caller_id)).await {
            Ok(Ok(preferences)) => {
                let overrides = preferences.ranking_weights.clone().unwrap_or_default();
                state.set_preferences(preferences);
                self.weights.with_overrides(&overrides)
            }
            Ok(Err(e)) => {
                warn!(session_id = %state.session_id(), caller_id = caller_id.as_str(), error = %e, "preferences unavailable");
                self.weights
            }
            Err(_) => {
                warn!(session_id = %state.session_id(), caller_id = caller_id.as_str(), "preferences lookup timed out");
                self.weights
            }
        }
    }

    async fn stage_search(
        &self,
        state: &mut PipelineState,
        request: &SearchRequest,
        category: Category,
    ) {
        let (subject, filters) = match state.intent() {
            Some(intent) => (intent.subject().to_string(), merge_filters(intent, request)),
            None => (state.query().to_string(), request.filters.clone()),
        };

        let allow = filters.platforms();
        let sources = self
            .registry
            .offer_sources_for(category, allow.as_deref());
        let source_count = sources.len();
        let per_source_timeout = self.config.source_timeout();

        let mut tasks: Vec<SourceTask<Offer>> = Vec::with_capacity(source_count);
        for source in sources {
            let label = source.platform().to_string();
            let subject = subject.clone();
            let filters = filters.clone();
            let handle = tokio::spawn(async move {
                match timeout(per_source_timeout, source.search(&subject, &filters)).await {
                    Ok(result) => result,
                    Err(_) => Err(SourceError::timeout(
                        "source call timed out",
                        duration_ms(per_source_timeout),
                    )),
                }
            });
            tasks.push((label, handle));
        }

        let (mut offers, errors) = join_isolated(tasks).await;
        for message in &errors {
            warn!(session_id = %state.session_id(), error = message.as_str(), "search.source_failed");
        }

        let collected = offers.len();
        if let Some(budget) = filters.budget_max().and_then(Decimal::from_f64) {
            offers.retain(|o| o.total_price().get() <= budget);
        }

        info!(
            session_id = %state.session_id(),
            sources = source_count,
            failed = errors.len(),
            collected,
            within_budget = offers.len(),
            "search.completed"
        );

        for message in errors {
            state.record_error(message);
        }
        state.set_filters(filters);
        state.extend_offers(offers);
    }

    async fn stage_deals(&self, state: &mut PipelineState, category: Category) {
        let per_source_timeout = self.config.source_timeout();
        let mut tasks = Vec::with_capacity(self.registry.deal_sources().len());

        for source in self.registry.deal_sources() {
            let source = Arc::clone(source);
            let label = source.name().to_string();
            let filters = state.filters().clone();
            let handle = tokio::spawn(async move {
                match timeout(per_source_timeout, source.find_deals(category, &filters)).await {
                    Ok(result) => result,
                    Err(_) => Err(SourceError::timeout(
                        "deal lookup timed out",
                        duration_ms(per_source_timeout),
                    )),
                }
            });
            tasks.push((label, handle));
        }

        let (deals, errors) = join_isolated(tasks).await;
        for message in &errors {
            warn!(session_id = %state.session_id(), error = message.as_str(), "deals.source_failed");
        }

        let now = Utc::now();
        let valid: Vec<_> = deals
            .into_iter()
            .filter(|d| d.is_currently_valid(now))
            .collect();
        info!(session_id = %state.session_id(), count = valid.len(), "deals.found");

        for message in errors {
            state.record_error(message);
        }
        state.extend_deals(valid);
    }

    fn stage_rank(
        &self,
        state: &mut PipelineState,
        weights: &RankingWeights,
    ) -> ApplicationResult<()> {
        let offers = state.take_offers();
        let discounted = self.discounts.apply(offers, state.deals());
        let mut ranked = self.ranking_strategy.rank(discounted, weights);
        ranked.truncate(self.config.max_results);

        info!(
            session_id = %state.session_id(),
            strategy = self.ranking_strategy.name(),
            count = ranked.len(),
            top_score = ?ranked.first().and_then(Offer::value_score),
            "results.ranked"
        );
        state.set_ranked(ranked);

        let status = if state.has_errors() {
            SearchStatus::Partial
        } else {
            SearchStatus::Completed
        };
        state.transition_to(status)?;
        Ok(())
    }
}

/// Intent filters, then caller filters, then the request's explicit fields.
fn merge_filters(intent: &Intent, request: &SearchRequest) -> Filters {
    let mut filters = intent.filters().merged_with(&request.filters);
    if let Some(budget) = request.budget_max {
        filters.insert(Filters::BUDGET_MAX, budget);
    }
    if let Some(location) = request.location.as_deref().or_else(|| intent.location()) {
        filters.insert(Filters::LOCATION, location);
    }
    if let Some(platforms) = request.platforms.as_ref().filter(|p| !p.is_empty()) {
        filters.set_platforms(platforms);
    }
    filters
}

/// Awaits every task in spawn order, keeping successes and turning each
/// failure into a labelled message.
async fn join_isolated<T>(tasks: Vec<SourceTask<T>>) -> (Vec<T>, Vec<String>) {
    let mut items = Vec::new();
    let mut errors = Vec::new();

    for (label, handle) in tasks {
        match handle.await {
            Ok(Ok(batch)) => items.extend(batch),
            Ok(Err(e)) => errors.push(format!("{label}: {e}")),
            Err(e) => errors.push(format!("{label}: task panicked: {e}")),
        }
    }

    (items, errors)
}

fn duration_ms(duration: Duration) -> u64 {
    u64::try_from(duration.as_millis()).unwrap_or(u64::MAX)
}
