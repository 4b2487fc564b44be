//! Pipeline Artifact Writer
//!
//! Serializes the bundled reference pipeline to disk so the predictor
//! has an artifact to load.

use std::io::Write;
use std::path::PathBuf;

use flate2::write::GzEncoder;
use flate2::Compression;
use house_price_predictor::model::{ArtifactEncoding, PricePipeline};
use tracing::info;

fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("make_artifact=info".parse()?),
        )
        .init();

    info!("Starting Pipeline Artifact Writer");

    // Parse arguments
    let args: Vec<String> = std::env::args().collect();
    let path = PathBuf::from(
        args.get(1)
            .map(|s| s.as_str())
            .unwrap_or("models/house_pricer.bin.gz"),
    );
    let encoding = ArtifactEncoding::from_path(&path);

    let pipeline = PricePipeline::reference();
    let bytes = bincode::serialize(&pipeline)?;

    let payload = match encoding {
        ArtifactEncoding::Raw => bytes,
        ArtifactEncoding::Gzip => {
            let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
            encoder.write_all(&bytes)?;
            encoder.finish()?
        }
    };

    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    std::fs::write(&path, &payload)?;

    info!(
        path = %path.display(),
        encoding = ?encoding,
        model = %pipeline.model,
        features = pipeline.feature_width(),
        bytes = payload.len(),
        "Artifact written"
    );

    Ok(())
}
