//! Command-line front end: runs one search over the simulated platforms and
//! prints the JSON response.

use anyhow::Context;
use clap::Parser;
use smart_dealer::application::SearchRequest;
use smart_dealer::application::services::{SearchPipeline, WeightedValueStrategy};
use smart_dealer::domain::value_objects::{Category, PlatformId};
use smart_dealer::infrastructure::config::{DEFAULT_CONFIG_FILE, Settings};
use smart_dealer::infrastructure::persistence::InMemoryPreferenceStore;
use smart_dealer::infrastructure::sources::simulated_registry;
use smart_dealer::infrastructure::telemetry::init_tracing;
use std::sync::Arc;

#[derive(Debug, Parser)]
#[command(name = "smart-dealer")]
#[command(about = "Compare offers across platforms for a free-text query")]
struct Cli {
    /// Query, e.g. "cheapest sushi delivery under $15".
    query: String,

    /// Force a category instead of detecting it.
    #[arg(long)]
    category: Option<Category>,

    /// Budget ceiling.
    #[arg(long)]
    budget: Option<f64>,

    /// Location override.
    #[arg(long)]
    location: Option<String>,

    /// Restrict to a platform; repeatable.
    #[arg(long = "platform")]
    platforms: Vec<String>,

    /// Caller ID for preference lookup.
    #[arg(long)]
    user: Option<String>,

    /// RNG seed for reproducible simulated offers.
    #[arg(long)]
    seed: Option<u64>,

    /// Settings file without extension.
    #[arg(long, default_value = DEFAULT_CONFIG_FILE)]
    config: String,

    /// Print compact JSON.
    #[arg(long)]
    compact: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    let mut settings = Settings::load_from(&cli.config).context("loading settings")?;
    init_tracing(&settings.logging.level, settings.logging.format)
        .context("initialising tracing")?;

    if let Some(seed) = cli.seed {
        settings.simulation.seed = Some(seed);
    }

    let registry = simulated_registry(&settings.simulation);
    let mut pipeline = SearchPipeline::new(
        Arc::new(registry),
        Arc::new(WeightedValueStrategy::new()),
        settings.pipeline_config(),
    )
    .with_weights(settings.ranking_weights());
    if cli.user.is_some() {
        pipeline = pipeline.with_preference_store(Arc::new(InMemoryPreferenceStore::new()));
    }

    let mut request = SearchRequest::new(cli.query);
    if let Some(category) = cli.category {
        request = request.with_category(category);
    }
    if let Some(budget) = cli.budget {
        request = request.with_budget_max(budget);
    }
    if let Some(location) = cli.location {
        request = request.with_location(location);
    }
    if !cli.platforms.is_empty() {
        request = request.with_platforms(cli.platforms.into_iter().map(PlatformId::new).collect());
    }

    let response = pipeline.execute_for(request, cli.user.as_deref()).await;

    let json = if cli.compact {
        serde_json::to_string(&response)
    } else {
        serde_json::to_string_pretty(&response)
    }
    .context("serialising response")?;
    println!("{json}");

    Ok(())
}
