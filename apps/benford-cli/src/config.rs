//! Configuration for the benford command
//!
//! Read from a TOML file with two optional sections:
//!
//! ```toml
//! [ingest]
//! encoding_sample_bytes = 10000
//! dialect_sample_bytes = 1024
//! preview_rows = 6
//!
//! [report]
//! significance = "0.05"
//! format = "text"
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use benford_io::IngestOptions;
use benford_stats::SignificanceLevel;
use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Output format for reports
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// Report settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReportConfig {
    /// Level whose verdict is highlighted in text reports
    pub significance: SignificanceLevel,
    /// Default output format
    pub format: OutputFormat,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            significance: SignificanceLevel::P05,
            format: OutputFormat::Text,
        }
    }
}

/// Top-level configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BenfordConfig {
    /// How files are sampled when loaded
    pub ingest: IngestOptions,
    /// How results are reported
    pub report: ReportConfig,
}

/// Configuration loading or validation error
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error reading {path}: {message}")]
    Io { path: String, message: String },

    #[error("TOML parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("TOML serialize error: {0}")]
    Serialize(#[from] toml::ser::Error),

    #[error("Value out of range: {0}")]
    OutOfRange(String),
}

impl BenfordConfig {
    /// Default location: `<config dir>/benford/config.toml`
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("benford").join("config.toml"))
    }

    /// Load configuration
    ///
    /// An explicit path must exist. Without one, the default location is
    /// used if present, otherwise built-in defaults.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let path = match path {
            Some(path) => path.to_path_buf(),
            None => match Self::default_path().filter(|p| p.exists()) {
                Some(path) => path,
                None => {
                    tracing::debug!("no config file found, using defaults");
                    return Ok(Self::default());
                }
            },
        };

        let content = fs::read_to_string(&path).map_err(|e| ConfigError::Io {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;

        let config = Self::from_toml(&content)?;
        config.validate()?;
        tracing::debug!("loaded config from {}", path.display());
        Ok(config)
    }

    /// Parse configuration from a TOML string
    pub fn from_toml(toml_str: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(toml_str)?)
    }

    /// Serialize configuration to TOML
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.ingest.encoding_sample_bytes == 0 {
            return Err(ConfigError::OutOfRange(
                "encoding_sample_bytes must be positive".to_string(),
            ));
        }

        if self.ingest.dialect_sample_bytes == 0 {
            return Err(ConfigError::OutOfRange(
                "dialect_sample_bytes must be positive".to_string(),
            ));
        }

        if self.ingest.preview_rows == 0 {
            return Err(ConfigError::OutOfRange(
                "preview_rows must be positive".to_string(),
            ));
        }

        Ok(())
    }
}
