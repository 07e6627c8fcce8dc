//! Expansion and split configuration

use ndarray::{Array2, ArrayView2};
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::expand::{expand, expand_parallel, DEFAULT_SCALE};

/// Settings for preparing a dataset before fitting
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExpansionConfig {
    /// Divisor applied to every pairwise product
    pub scale: f64,
    /// Fraction of leading rows used for training
    pub train_fraction: f64,
    /// Compute rows on the rayon pool (requires the `parallel` feature)
    pub parallel: bool,
}

impl Default for ExpansionConfig {
    fn default() -> Self {
        Self {
            scale: DEFAULT_SCALE,
            train_fraction: 0.9,
            parallel: false,
        }
    }
}

impl ExpansionConfig {
    /// Create a new configuration with defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Load configuration from a TOML string
    pub fn from_toml(toml_str: &str) -> std::result::Result<Self, toml::de::Error> {
        toml::from_str(toml_str)
    }

    /// Serialize configuration to TOML
    pub fn to_toml(&self) -> std::result::Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }

    /// Load configuration from a JSON string
    pub fn from_json(json_str: &str) -> std::result::Result<Self, serde_json::Error> {
        serde_json::from_str(json_str)
    }

    /// Serialize configuration to JSON
    pub fn to_json(&self) -> std::result::Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Validate configuration values
    pub fn validate(&self) -> std::result::Result<(), ConfigError> {
        if !(self.scale.is_finite() && self.scale > 0.0) {
            return Err(ConfigError::OutOfRange(format!(
                "scale must be positive and finite, got {}",
                self.scale
            )));
        }

        if !(0.0..=1.0).contains(&self.train_fraction) {
            return Err(ConfigError::OutOfRange(format!(
                "train_fraction must be between 0.0 and 1.0, got {}",
                self.train_fraction
            )));
        }

        Ok(())
    }

    /// Expand `x` with this configuration's scale and execution mode
    pub fn expand(&self, x: ArrayView2<'_, f64>) -> Result<Array2<f64>> {
        if self.parallel {
            expand_parallel(x, self.scale)
        } else {
            expand(x, self.scale)
        }
    }
}

/// Configuration validation error
#[derive(Debug, Clone, thiserror::Error)]
pub enum ConfigError {
    /// Value is out of valid range
    #[error("Value out of range: {0}")]
    OutOfRange(String),
}
