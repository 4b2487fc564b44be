//! Structured failure types for artifact loading and inference.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Failure while locating, decoding or deserializing the model artifact.
///
/// Loading is all-or-nothing: any variant here means no usable pipeline was
/// produced. A failed load never poisons the process; the next request may
/// try again.
#[derive(Debug, Error)]
pub enum LoadError {
    /// No artifact file exists at the configured path.
    #[error("artifact not found at {}", path.display())]
    NotFound { path: PathBuf },

    /// The gzip container is truncated, corrupt, or not gzip at all.
    #[error("failed to decompress artifact {}", path.display())]
    DecompressionFailed {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The decoded bytes do not describe a valid pipeline object.
    #[error("failed to deserialize artifact {}: {reason}", path.display())]
    DeserializationFailed { path: PathBuf, reason: String },

    /// Permission or other IO fault while reading the artifact.
    #[error("could not read artifact {}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Reading the artifact did not finish within the configured bound.
    #[error("timed out after {waited_ms} ms reading artifact {}", path.display())]
    Timeout { path: PathBuf, waited_ms: u64 },
}

/// Failure while invoking the prediction capability.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum InferenceError {
    /// The feature vector does not match the fixed schema cardinality.
    #[error("feature vector has {actual} values, schema expects {expected}")]
    SchemaMismatch { expected: usize, actual: usize },

    /// The pipeline raised, or produced a non-finite result.
    #[error("prediction failed: {reason}")]
    ComputationFailed { reason: String },
}
