//! # Application Services
//!
//! Services that orchestrate domain logic and infrastructure.
//!
//! This module provides application-level services including:
//! - [`SearchPipeline`]: Query-to-ranked-offers orchestration
//! - [`RankingStrategy`]: Strategies for ranking offers

pub mod ranking_strategy;
pub mod search_pipeline;

pub use ranking_strategy::{
    RankingStrategy, RankingWeights, ScoreComponents, WeightedValueStrategy, score_components,
};
pub use search_pipeline::{PipelineConfig, SearchPipeline};
