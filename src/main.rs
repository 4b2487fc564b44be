//! House Price Predictor - Main Entry Point
//!
//! Reads one housing observation as JSON from stdin, prices it with the
//! configured pipeline artifact, and prints the estimate as JSON.

use std::io::Read;

use anyhow::{Context, Result};
use house_price_predictor::{
    config::AppConfig,
    model::{ArtifactCache, InferenceEngine},
    types::{HousingFeatures, PriceEstimate},
};
use tracing::info;

fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("house_price_predictor=info".parse()?),
        )
        .init();

    info!("Starting House Price Predictor");

    // Load configuration
    let config = AppConfig::load()?;
    info!(
        artifact = %config.artifact.path,
        timeout_ms = config.artifact.load_timeout_ms,
        "Configuration loaded successfully"
    );

    // Initialize components
    let cache = ArtifactCache::new(config.artifact.loader());
    let engine = InferenceEngine::new();

    // Read one observation from stdin
    let mut input = String::new();
    std::io::stdin()
        .read_to_string(&mut input)
        .context("Failed to read observation from stdin")?;
    let features: HousingFeatures =
        serde_json::from_str(&input).context("Failed to parse observation JSON")?;

    // Load the pipeline and price the observation
    let pipeline = cache.get_or_load()?;
    let price = engine.predict(&pipeline, &features.feature_vector())?;

    let estimate = PriceEstimate::new(price, &pipeline);
    info!(
        estimate_id = %estimate.estimate_id,
        price = estimate.price,
        model = %estimate.model,
        "Price estimate produced"
    );

    println!("{}", serde_json::to_string_pretty(&estimate)?);

    Ok(())
}
