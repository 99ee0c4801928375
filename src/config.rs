//! Configuration for the command-line tool.
//!
//! The library itself takes no configuration: every parameter is a type or
//! an argument. The binary reads an optional TOML file choosing the buffer
//! width, the entropy source and the measurement sizes.

use serde::{Deserialize, Serialize};
use std::path::Path;

/// Configuration validation errors.
#[derive(Debug, Clone, thiserror::Error)]
pub enum ConfigError {
    #[error("unsupported buffer width {0} (must be 16, 32 or 64)")]
    InvalidWidth(u32),
    #[error("trial count must be positive")]
    InvalidTrials,
    #[error("deck size must be at least 2")]
    InvalidDeckSize,
    #[error("failed to read config file: {0}")]
    FileReadError(String),
    #[error("failed to parse config file: {0}")]
    ParseError(String),
}

/// Converter settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ConverterConfig {
    /// Width in bits of the integer buffering output entropy.
    pub width: u32,
    /// Seed for a reproducible ChaCha20 source; the OS source is used if
    /// absent.
    pub seed: Option<u64>,
}

impl Default for ConverterConfig {
    fn default() -> Self {
        Self {
            width: 64,
            seed: None,
        }
    }
}

impl ConverterConfig {
    /// Validates the configuration parameters.
    pub fn validate(&self) -> Result<(), ConfigError> {
        match self.width {
            16 | 32 | 64 => Ok(()),
            other => Err(ConfigError::InvalidWidth(other)),
        }
    }
}

/// Measurement run sizes.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MeasurementConfig {
    /// Number of trials per measurement.
    pub trials: u64,
    /// Cards in the shuffled deck.
    pub deck_size: u64,
}

impl Default for MeasurementConfig {
    fn default() -> Self {
        Self {
            trials: 1000,
            deck_size: 52,
        }
    }
}

impl MeasurementConfig {
    /// Validates the configuration parameters.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.trials == 0 {
            return Err(ConfigError::InvalidTrials);
        }
        if self.deck_size < 2 {
            return Err(ConfigError::InvalidDeckSize);
        }
        Ok(())
    }
}

/// Full configuration file format.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct FileConfig {
    #[serde(default)]
    pub converter: ConverterConfig,
    #[serde(default)]
    pub measurement: MeasurementConfig,
}

impl FileConfig {
    /// Loads configuration from a TOML file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| ConfigError::FileReadError(e.to_string()))?;
        Self::from_toml(&content)
    }

    /// Parses and validates configuration from TOML text.
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        let config: FileConfig =
            toml::from_str(content).map_err(|e| ConfigError::ParseError(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Validates every section.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.converter.validate()?;
        self.measurement.validate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_valid() {
        assert!(FileConfig::default().validate().is_ok());
    }

    #[test]
    fn test_partial_file_uses_defaults() {
        let config = FileConfig::from_toml("[converter]\nwidth = 32\n").unwrap();
        assert_eq!(config.converter.width, 32);
        assert_eq!(config.converter.seed, None);
        assert_eq!(config.measurement.deck_size, 52);
    }

    #[test]
    fn test_seed_parsed() {
        let config = FileConfig::from_toml(
            "[converter]\nwidth = 16\nseed = 99\n\n[measurement]\ntrials = 10\ndeck_size = 5\n",
        )
        .unwrap();
        assert_eq!(config.converter.seed, Some(99));
        assert_eq!(config.measurement.trials, 10);
    }

    #[test]
    fn test_odd_width_invalid() {
        assert!(matches!(
            FileConfig::from_toml("[converter]\nwidth = 24\n"),
            Err(ConfigError::InvalidWidth(24))
        ));
    }

    #[test]
    fn test_zero_trials_invalid() {
        let mut config = FileConfig::default();
        config.measurement.trials = 0;
        assert!(matches!(config.validate(), Err(ConfigError::InvalidTrials)));
    }

    #[test]
    fn test_missing_file() {
        assert!(matches!(
            FileConfig::from_file("/nonexistent/entropy-converter.toml"),
            Err(ConfigError::FileReadError(_))
        ));
    }
}
