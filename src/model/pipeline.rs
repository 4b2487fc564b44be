//! Deserialized regression pipeline and its prediction capability.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::InferenceError;

/// A trained standardize-then-regress pipeline reconstructed from an artifact.
///
/// The artifact stores everything the prediction needs: per-feature scaling
/// statistics, coefficients in standardized space, the intercept, and the
/// hyperparameters the training run selected. The loader deserializes this
/// structure as-is and performs no consistency checks; [`predict_batch`]
/// rejects incompatible shapes at call time instead.
///
/// [`predict_batch`]: PricePipeline::predict_batch
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PricePipeline {
    /// Model family the training run selected, e.g. "ridge".
    pub model: String,

    /// Per-feature means subtracted before the coefficients apply.
    pub feature_means: Vec<f64>,

    /// Per-feature scale divisors (training standard deviations).
    pub feature_scales: Vec<f64>,

    /// Regression coefficients in schema order, in standardized space.
    pub coefficients: Vec<f64>,

    /// Constant added to the weighted sum.
    pub intercept: f64,

    /// Training hyperparameters, kept verbatim for display.
    pub hyperparameters: BTreeMap<String, String>,
}

impl PricePipeline {
    /// Number of features a row must carry.
    pub fn feature_width(&self) -> usize {
        self.coefficients.len()
    }

    /// Predict a price for every row in the batch.
    ///
    /// Each value is standardized with the stored statistics and folded
    /// through the linear coefficients, in row order. A row whose width
    /// disagrees with the stored coefficients, or an artifact whose internal
    /// arrays disagree with each other, is a capability fault.
    pub fn predict_batch(&self, rows: &[Vec<f64>]) -> Result<Vec<f64>, InferenceError> {
        let width = self.feature_width();
        if self.feature_means.len() != width || self.feature_scales.len() != width {
            return Err(InferenceError::ComputationFailed {
                reason: format!(
                    "artifact shape is inconsistent: {} coefficients, {} means, {} scales",
                    width,
                    self.feature_means.len(),
                    self.feature_scales.len()
                ),
            });
        }

        rows.iter()
            .map(|row| {
                if row.len() != width {
                    return Err(InferenceError::ComputationFailed {
                        reason: format!(
                            "pipeline expects {} features, row has {}",
                            width,
                            row.len()
                        ),
                    });
                }

                let mut sum = 0.0;
                for (i, &value) in row.iter().enumerate() {
                    sum += (value - self.feature_means[i]) / self.feature_scales[i]
                        * self.coefficients[i];
                }
                Ok(sum + self.intercept)
            })
            .collect()
    }

    /// The pipeline bundled with this crate, fitted on the Boston housing data.
    ///
    /// Deployments normally load the artifact written by the `make_artifact`
    /// tool, which serializes exactly this pipeline. Prices come out in
    /// thousands of dollars, the unit the training targets used.
    pub fn reference() -> Self {
        let hyperparameters = BTreeMap::from([
            ("alpha".to_string(), "1.0".to_string()),
            ("fit_intercept".to_string(), "true".to_string()),
            ("solver".to_string(), "cholesky".to_string()),
        ]);

        Self {
            model: "ridge".to_string(),
            feature_means: vec![
                3.6135, 11.3636, 11.1368, 0.0692, 0.5547, 6.2846, 68.5749, 3.7950, 9.5493,
                408.2372, 18.4555, 356.6740, 12.6531,
            ],
            feature_scales: vec![
                8.6015, 23.3225, 6.8604, 0.2540, 0.1159, 0.7026, 28.1489, 2.1057, 8.7073,
                168.5371, 2.1649, 91.2949, 7.1411,
            ],
            coefficients: vec![
                -0.9281, 1.0816, 0.1409, 0.6817, -2.0567, 2.6742, 0.0195, -3.1040, 2.6622,
                -2.0768, -2.0606, 0.8493, -3.7436,
            ],
            intercept: 22.5328,
            hyperparameters,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn two_feature_pipeline() -> PricePipeline {
        PricePipeline {
            model: "ridge".to_string(),
            feature_means: vec![0.0, 0.0],
            feature_scales: vec![1.0, 1.0],
            coefficients: vec![2.0, -1.0],
            intercept: 1.0,
            hyperparameters: BTreeMap::new(),
        }
    }

    #[test]
    fn test_predict_batch_linear_math() {
        let pipeline = two_feature_pipeline();

        let prices = pipeline
            .predict_batch(&[vec![3.0, 4.0], vec![0.0, 0.0]])
            .unwrap();

        assert_eq!(prices, vec![3.0, 1.0]);
    }

    #[test]
    fn test_predict_batch_applies_scaling() {
        let pipeline = PricePipeline {
            feature_means: vec![10.0, 0.0],
            feature_scales: vec![2.0, 1.0],
            ..two_feature_pipeline()
        };

        // (14 - 10) / 2 * 2 + (1 - 0) / 1 * -1 + 1 = 4 - 1 + 1
        let prices = pipeline.predict_batch(&[vec![14.0, 1.0]]).unwrap();
        assert_eq!(prices, vec![4.0]);
    }

    #[test]
    fn test_predict_batch_rejects_wrong_row_width() {
        let pipeline = two_feature_pipeline();

        let err = pipeline.predict_batch(&[vec![1.0, 2.0, 3.0]]).unwrap_err();
        match err {
            InferenceError::ComputationFailed { reason } => {
                assert!(reason.contains("expects 2 features"), "reason: {reason}");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_predict_batch_rejects_inconsistent_artifact() {
        let pipeline = PricePipeline {
            feature_means: vec![0.0],
            ..two_feature_pipeline()
        };

        let err = pipeline.predict_batch(&[vec![1.0, 2.0]]).unwrap_err();
        match err {
            InferenceError::ComputationFailed { reason } => {
                assert!(reason.contains("inconsistent"), "reason: {reason}");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_reference_pipeline_is_deterministic() {
        let pipeline = PricePipeline::reference();
        let row = vec![
            0.006, 18.0, 2.31, 0.0, 0.538, 6.575, 65.2, 4.09, 1.0, 296.0, 15.3, 396.9, 4.98,
        ];

        let first = pipeline.predict_batch(&[row.clone()]).unwrap()[0];
        let second = pipeline.predict_batch(&[row]).unwrap()[0];

        assert_eq!(first, second);
        assert!((first - 29.996_600_617_010_934).abs() < 1e-9, "price: {first}");
    }

    #[test]
    fn test_serialized_round_trip_preserves_predictions() {
        let pipeline = PricePipeline::reference();
        let bytes = bincode::serialize(&pipeline).unwrap();
        let restored: PricePipeline = bincode::deserialize(&bytes).unwrap();

        assert_eq!(pipeline, restored);
        assert_eq!(restored.hyperparameters.get("alpha").map(String::as_str), Some("1.0"));
    }
}
