//! Configuration management for the price prediction service

use std::path::Path;
use std::time::Duration;

use anyhow::{Context, Result};
use config::{Config, File};
use serde::Deserialize;

use crate::model::{ArtifactEncoding, ArtifactLoader};

/// Main application configuration
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub artifact: ArtifactConfig,
    pub logging: LoggingConfig,
}

/// Pipeline artifact configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ArtifactConfig {
    /// Path to the serialized pipeline artifact
    pub path: String,
    /// Artifact encoding: "raw" or "gzip"; inferred from the extension when absent
    #[serde(default)]
    pub encoding: Option<ArtifactEncoding>,
    /// Artifact read timeout in milliseconds (default: 5000)
    #[serde(default = "default_load_timeout_ms")]
    pub load_timeout_ms: u64,
}

fn default_load_timeout_ms() -> u64 {
    5_000
}

impl ArtifactConfig {
    /// Build the loader this configuration describes
    pub fn loader(&self) -> ArtifactLoader {
        let timeout = Duration::from_millis(self.load_timeout_ms);
        match self.encoding {
            Some(encoding) => ArtifactLoader::new(&self.path, encoding, timeout),
            None => ArtifactLoader::from_extension(&self.path, timeout),
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    pub level: String,
    /// Log format (json, pretty)
    pub format: String,
}

impl AppConfig {
    /// Load configuration from file
    pub fn load() -> Result<Self> {
        Self::load_from_path("config/config.toml")
    }

    /// Load configuration from a specific path
    pub fn load_from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let config = Config::builder()
            .add_source(File::from(path.as_ref()))
            .build()
            .context("Failed to build configuration")?;

        config
            .try_deserialize()
            .context("Failed to deserialize configuration")
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            artifact: ArtifactConfig {
                path: "models/house_pricer.bin.gz".to_string(),
                encoding: None,
                load_timeout_ms: default_load_timeout_ms(),
            },
            logging: LoggingConfig {
                level: "info".to_string(),
                format: "pretty".to_string(),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.artifact.path, "models/house_pricer.bin.gz");
        assert_eq!(config.artifact.encoding, None);
        assert_eq!(config.artifact.load_timeout_ms, 5_000);
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn test_loader_infers_encoding_from_extension() {
        let config = AppConfig::default();
        let loader = config.artifact.loader();

        assert_eq!(loader.encoding(), ArtifactEncoding::Gzip);
    }

    #[test]
    fn test_explicit_encoding_overrides_extension() {
        let config = ArtifactConfig {
            path: "models/house_pricer.bin.gz".to_string(),
            encoding: Some(ArtifactEncoding::Raw),
            load_timeout_ms: 100,
        };

        assert_eq!(config.loader().encoding(), ArtifactEncoding::Raw);
    }

    #[test]
    fn test_load_from_toml_file() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(
            &path,
            r#"
[artifact]
path = "models/pricer.bin"
encoding = "raw"

[logging]
level = "debug"
format = "json"
"#,
        )
        .unwrap();

        let config = AppConfig::load_from_path(&path).unwrap();

        assert_eq!(config.artifact.path, "models/pricer.bin");
        assert_eq!(config.artifact.encoding, Some(ArtifactEncoding::Raw));
        assert_eq!(config.artifact.load_timeout_ms, 5_000);
        assert_eq!(config.logging.level, "debug");
    }
}
