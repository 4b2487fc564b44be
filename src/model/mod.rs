//! Pipeline artifact handling and inference components

pub mod cache;
pub mod inference;
pub mod loader;
pub mod pipeline;

pub use cache::ArtifactCache;
pub use inference::InferenceEngine;
pub use loader::{ArtifactEncoding, ArtifactLoader};
pub use pipeline::PricePipeline;
