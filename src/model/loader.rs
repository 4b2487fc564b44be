//! Artifact reading, decompression, and deserialization.

use std::io::{self, Read};
use std::path::{Path, PathBuf};
use std::sync::mpsc;
use std::thread;
use std::time::Duration;

use flate2::read::GzDecoder;
use serde::Deserialize;
use tracing::{error, info, warn};

use crate::error::LoadError;
use crate::model::pipeline::PricePipeline;

/// On-disk encoding of a pipeline artifact.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ArtifactEncoding {
    /// Serialized bytes written directly to the file.
    Raw,
    /// Serialized bytes wrapped in a gzip stream.
    Gzip,
}

impl ArtifactEncoding {
    /// Infer the encoding from the file extension: `.gz` means gzip,
    /// anything else means raw. The file contents are never sniffed.
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("gz") => Self::Gzip,
            _ => Self::Raw,
        }
    }
}

/// Loads a [`PricePipeline`] from a serialized artifact on disk.
///
/// The encoding is fixed at construction, either explicitly or inferred
/// from the path. Reads are bounded by a timeout so a hung filesystem
/// surfaces as an error instead of stalling the caller.
#[derive(Debug)]
pub struct ArtifactLoader {
    path: PathBuf,
    encoding: ArtifactEncoding,
    read_timeout: Duration,
}

impl ArtifactLoader {
    /// Create a loader with an explicit encoding.
    pub fn new(
        path: impl Into<PathBuf>,
        encoding: ArtifactEncoding,
        read_timeout: Duration,
    ) -> Self {
        Self {
            path: path.into(),
            encoding,
            read_timeout,
        }
    }

    /// Create a loader that infers the encoding from the file extension.
    pub fn from_extension(path: impl Into<PathBuf>, read_timeout: Duration) -> Self {
        let path = path.into();
        let encoding = ArtifactEncoding::from_path(&path);
        Self::new(path, encoding, read_timeout)
    }

    /// Path this loader reads from.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Encoding this loader decodes with.
    pub fn encoding(&self) -> ArtifactEncoding {
        self.encoding
    }

    /// Read, decode, and deserialize the artifact into a ready pipeline.
    ///
    /// Every failure maps to the [`LoadError`] variant naming the stage
    /// that failed, so callers can distinguish a missing file from a
    /// corrupt one.
    pub fn load(&self) -> Result<PricePipeline, LoadError> {
        info!(
            path = %self.path.display(),
            encoding = ?self.encoding,
            "Loading pipeline artifact"
        );

        let bytes = self.read_bytes()?;

        let serialized = match self.encoding {
            ArtifactEncoding::Raw => bytes,
            ArtifactEncoding::Gzip => {
                let mut decoded = Vec::new();
                GzDecoder::new(bytes.as_slice())
                    .read_to_end(&mut decoded)
                    .map_err(|source| {
                        error!(
                            path = %self.path.display(),
                            error = %source,
                            "Failed to decompress artifact"
                        );
                        LoadError::DecompressionFailed {
                            path: self.path.clone(),
                            source,
                        }
                    })?;
                decoded
            }
        };

        let pipeline: PricePipeline = bincode::deserialize(&serialized).map_err(|e| {
            error!(
                path = %self.path.display(),
                error = %e,
                "Failed to deserialize artifact"
            );
            LoadError::DeserializationFailed {
                path: self.path.clone(),
                reason: e.to_string(),
            }
        })?;

        info!(
            model = %pipeline.model,
            features = pipeline.feature_width(),
            "Pipeline artifact loaded"
        );

        Ok(pipeline)
    }

    /// Read the artifact bytes, giving up after the configured timeout.
    ///
    /// The read runs on a helper thread; if it does not finish in time the
    /// caller gets [`LoadError::Timeout`] and the thread is left to finish
    /// on its own.
    fn read_bytes(&self) -> Result<Vec<u8>, LoadError> {
        let (tx, rx) = mpsc::channel();
        let path = self.path.clone();
        thread::spawn(move || {
            let _ = tx.send(std::fs::read(&path));
        });

        match rx.recv_timeout(self.read_timeout) {
            Ok(Ok(bytes)) => Ok(bytes),
            Ok(Err(source)) if source.kind() == io::ErrorKind::NotFound => {
                Err(LoadError::NotFound {
                    path: self.path.clone(),
                })
            }
            Ok(Err(source)) => Err(LoadError::Io {
                path: self.path.clone(),
                source,
            }),
            Err(mpsc::RecvTimeoutError::Timeout) => {
                let waited_ms = self.read_timeout.as_millis() as u64;
                warn!(
                    path = %self.path.display(),
                    waited_ms,
                    "Artifact read did not complete in time"
                );
                Err(LoadError::Timeout {
                    path: self.path.clone(),
                    waited_ms,
                })
            }
            Err(mpsc::RecvTimeoutError::Disconnected) => Err(LoadError::Io {
                path: self.path.clone(),
                source: io::Error::new(io::ErrorKind::Other, "artifact reader thread terminated"),
            }),
        }
    }
}
