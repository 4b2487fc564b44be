//! Fixed feature contract for the housing price model.
//!
//! The order below is the column order the pipeline was trained on and must
//! never change independently of the artifact.

use crate::error::InferenceError;

/// Feature names in training order.
pub const FEATURE_NAMES: [&str; 13] = [
    "CRIM", "ZN", "INDUS", "CHAS", "NOX", "RM", "AGE", "DIS", "RAD", "TAX", "PTRATIO", "B",
    "LSTAT",
];

/// Number of features the pipeline expects.
pub const fn feature_count() -> usize {
    FEATURE_NAMES.len()
}

/// Position of a named feature in the schema, if it is part of it.
pub fn index_of(name: &str) -> Option<usize> {
    FEATURE_NAMES.iter().position(|&n| n == name)
}

/// Check that a feature vector has the cardinality the schema requires.
pub fn check_width(actual: usize) -> Result<(), InferenceError> {
    if actual == feature_count() {
        Ok(())
    } else {
        Err(InferenceError::SchemaMismatch {
            expected: feature_count(),
            actual,
        })
    }
}
