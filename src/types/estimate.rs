//! Price estimate data structures

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::model::PricePipeline;

/// Price estimate produced for one housing observation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PriceEstimate {
    /// Unique estimate identifier
    pub estimate_id: String,

    /// Predicted price in thousands of dollars
    pub price: f64,

    /// Model family that produced the estimate
    pub model: String,

    /// Hyperparameters of the training run, for display
    pub hyperparameters: BTreeMap<String, String>,

    /// Estimate generation timestamp
    pub timestamp: DateTime<Utc>,
}

impl PriceEstimate {
    /// Create a new estimate from a predicted price and the pipeline that produced it
    pub fn new(price: f64, pipeline: &PricePipeline) -> Self {
        Self {
            estimate_id: uuid::Uuid::new_v4().to_string(),
            price,
            model: pipeline.model.clone(),
            hyperparameters: pipeline.hyperparameters.clone(),
            timestamp: Utc::now(),
        }
    }
}
