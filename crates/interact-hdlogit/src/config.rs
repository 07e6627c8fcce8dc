//! Configuration for the high-dimensional logistic regression

use serde::{Deserialize, Serialize};

use crate::criterion::InformationCriterion;
use crate::solver::SolverOptions;

/// Estimator settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HdLogitConfig {
    /// Criterion used to truncate the greedy path and to trim
    pub ic: InformationCriterion,
    /// Magnitude of the high-dimensional penalty
    pub wn: f64,
    /// Prepend a column of ones and fit an unpenalized intercept
    pub fit_intercept: bool,
    /// Scales the number of greedy steps, `ceil(kn * sqrt(n / ln p))`
    pub kn: f64,
    /// Newton gradient tolerance
    pub tol: f64,
    /// Newton iteration cap per refit
    pub max_iter: usize,
}

impl Default for HdLogitConfig {
    fn default() -> Self {
        Self {
            ic: InformationCriterion::Hqic,
            wn: 1.0,
            fit_intercept: true,
            kn: 1.0,
            tol: 1e-8,
            max_iter: 100,
        }
    }
}

impl HdLogitConfig {
    /// Create a new configuration with defaults
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_ic(mut self, ic: InformationCriterion) -> Self {
        self.ic = ic;
        self
    }

    pub fn with_wn(mut self, wn: f64) -> Self {
        self.wn = wn;
        self
    }

    pub fn with_kn(mut self, kn: f64) -> Self {
        self.kn = kn;
        self
    }

    pub fn with_intercept(mut self, fit_intercept: bool) -> Self {
        self.fit_intercept = fit_intercept;
        self
    }

    /// Newton stopping rules derived from `tol` and `max_iter`
    pub fn solver_options(&self) -> SolverOptions {
        SolverOptions {
            tol: self.tol,
            max_iter: self.max_iter,
        }
    }

    /// Load configuration from a TOML string
    pub fn from_toml(toml_str: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(toml_str)
    }

    /// Serialize configuration to TOML
    pub fn to_toml(&self) -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }

    /// Load configuration from a JSON string
    pub fn from_json(json_str: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json_str)
    }

    /// Serialize configuration to JSON
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.wn.is_finite() && self.wn > 0.0) {
            return Err(ConfigError::OutOfRange(format!(
                "wn must be positive, got {}",
                self.wn
            )));
        }

        if !(self.kn.is_finite() && self.kn > 0.0) {
            return Err(ConfigError::OutOfRange(format!(
                "kn must be positive, got {}",
                self.kn
            )));
        }

        if !(self.tol.is_finite() && self.tol > 0.0) {
            return Err(ConfigError::OutOfRange(format!(
                "tol must be positive, got {}",
                self.tol
            )));
        }

        if self.max_iter == 0 {
            return Err(ConfigError::OutOfRange(
                "max_iter must be positive".to_string(),
            ));
        }

        Ok(())
    }
}

/// Configuration validation error
#[derive(Debug, Clone, thiserror::Error)]
pub enum ConfigError {
    /// Value is out of valid range
    #[error("Value out of range: {0}")]
    OutOfRange(String),
}
