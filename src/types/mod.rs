//! Type definitions for the price prediction service

pub mod estimate;
pub mod request;

pub use estimate::PriceEstimate;
pub use request::HousingFeatures;
