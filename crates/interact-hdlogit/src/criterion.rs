//! Information criteria for model selection
//!
//! `loss` is always the negative *average* log-likelihood, so every criterion
//! starts from `2n * loss`. The high-dimensional variants multiply the
//! penalty by `wn * ln(p)`, where `p` is the number of candidate columns.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Criterion used to choose a model size
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum InformationCriterion {
    /// Hannan-Quinn
    Hqic,
    /// Akaike
    Aic,
    /// Bayesian (Schwarz)
    Bic,
}

impl Default for InformationCriterion {
    fn default() -> Self {
        Self::Hqic
    }
}

impl InformationCriterion {
    /// High-dimensional criterion for a model with `k` free parameters
    ///
    /// - HQIC: `2n loss + 2k wn ln(ln n) ln p`
    /// - AIC:  `2n loss + 2k wn ln p`
    /// - BIC:  `2n loss + k wn ln n ln p`
    pub fn hd_value(&self, loss: f64, k: usize, wn: f64, n: usize, p: usize) -> f64 {
        let (n, k, p) = (n as f64, k as f64, p as f64);
        let fit = 2.0 * n * loss;
        match self {
            Self::Hqic => fit + 2.0 * k * wn * n.ln().ln() * p.ln(),
            Self::Aic => fit + 2.0 * k * wn * p.ln(),
            Self::Bic => fit + k * wn * n.ln() * p.ln(),
        }
    }

    /// Classical criterion for a model with `k` free parameters
    ///
    /// - HQIC: `2n loss + k ln(ln n)`
    /// - AIC:  `2n loss + 2k`
    /// - BIC:  `2n loss + k ln n`
    pub fn value(&self, loss: f64, k: usize, n: usize) -> f64 {
        let (n, k) = (n as f64, k as f64);
        let fit = 2.0 * n * loss;
        match self {
            Self::Hqic => fit + k * n.ln().ln(),
            Self::Aic => fit + 2.0 * k,
            Self::Bic => fit + k * n.ln(),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Hqic => "HQIC",
            Self::Aic => "AIC",
            Self::Bic => "BIC",
        }
    }
}

impl fmt::Display for InformationCriterion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for InformationCriterion {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "HQIC" => Ok(Self::Hqic),
            "AIC" => Ok(Self::Aic),
            "BIC" => Ok(Self::Bic),
            other => Err(format!("unknown information criterion: {}", other)),
        }
    }
}
