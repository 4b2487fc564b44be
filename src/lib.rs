//! House Price Predictor Library
//!
//! Loads a pre-trained Boston housing regression pipeline from a serialized
//! artifact and prices individual observations with it.

pub mod config;
pub mod error;
pub mod model;
pub mod schema;
pub mod types;

pub use config::AppConfig;
pub use error::{InferenceError, LoadError};
pub use model::{ArtifactCache, ArtifactEncoding, ArtifactLoader, InferenceEngine, PricePipeline};
pub use types::{estimate::PriceEstimate, request::HousingFeatures};
