//! Single-observation price inference.

use tracing::{debug, warn};

use crate::error::InferenceError;
use crate::model::pipeline::PricePipeline;
use crate::schema;

/// Runs the loaded pipeline on one observation at a time.
#[derive(Debug, Default)]
pub struct InferenceEngine;

impl InferenceEngine {
    /// Create a new inference engine.
    pub fn new() -> Self {
        Self
    }

    /// Predict a price, in thousands of dollars, for one feature vector.
    ///
    /// The vector must carry exactly the housing schema's features in
    /// schema order; that is checked before the pipeline runs, so a
    /// malformed observation never reaches the capability. A negative
    /// price is surfaced as-is, the caller decides how to present it.
    pub fn predict(
        &self,
        pipeline: &PricePipeline,
        features: &[f64],
    ) -> Result<f64, InferenceError> {
        schema::check_width(features.len())?;

        if pipeline.feature_width() != schema::feature_count() {
            return Err(InferenceError::ComputationFailed {
                reason: format!(
                    "artifact expects {} features, schema has {}",
                    pipeline.feature_width(),
                    schema::feature_count()
                ),
            });
        }

        let batch = [features.to_vec()];
        let prices = pipeline.predict_batch(&batch)?;
        let price = prices
            .first()
            .copied()
            .ok_or_else(|| InferenceError::ComputationFailed {
                reason: "pipeline returned an empty batch".to_string(),
            })?;

        if !price.is_finite() {
            return Err(InferenceError::ComputationFailed {
                reason: format!("pipeline produced a non-finite value: {price}"),
            });
        }
        if price < 0.0 {
            warn!(price, "Predicted price is negative; surfacing unclamped");
        }

        debug!(price, "Inference complete");
        Ok(price)
    }
}
