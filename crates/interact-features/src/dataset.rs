//! Labelled sample matrices and the static train/test split
//!
//! A [`Dataset`] pairs an `N x D` sample matrix with `N` integer labels.
//! Expansion is applied once to the full dataset; the expanded dataset is then
//! split by row index, never re-expanded per slice.

use ndarray::{s, Array1, Array2, ArrayView1, ArrayView2};
use serde::{Deserialize, Serialize};

use crate::config::ExpansionConfig;
use crate::error::{FeatureError, Result};
use crate::expand::expand;

/// Sample matrix with one label per row
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Dataset {
    data: Array2<f64>,
    target: Array1<usize>,
}

impl Dataset {
    /// Pair samples with labels, checking that the row counts agree
    pub fn new(data: Array2<f64>, target: Array1<usize>) -> Result<Self> {
        if data.nrows() != target.len() {
            return Err(FeatureError::ShapeMismatch {
                rows: data.nrows(),
                labels: target.len(),
            });
        }
        Ok(Self { data, target })
    }

    /// Number of samples
    pub fn n_samples(&self) -> usize {
        self.data.nrows()
    }

    /// Number of feature columns
    pub fn n_features(&self) -> usize {
        self.data.ncols()
    }

    pub fn data(&self) -> ArrayView2<'_, f64> {
        self.data.view()
    }

    pub fn target(&self) -> ArrayView1<'_, usize> {
        self.target.view()
    }

    /// Number of distinct classes, assuming labels `0..k`
    pub fn n_classes(&self) -> usize {
        self.target.iter().max().map_or(0, |max| max + 1)
    }

    /// Dataset with pairwise interaction columns appended
    pub fn expanded(&self, scale: f64) -> Result<Self> {
        Ok(Self {
            data: expand(self.data.view(), scale)?,
            target: self.target.clone(),
        })
    }

    /// Like [`Dataset::expanded`], with the scale and execution mode of `config`
    pub fn expanded_with(&self, config: &ExpansionConfig) -> Result<Self> {
        Ok(Self {
            data: config.expand(self.data.view())?,
            target: self.target.clone(),
        })
    }

    /// Split into `(train, test)` at row `floor(fraction * N)`
    ///
    /// Rows keep their order: the first rows train, the remainder test.
    pub fn split_prefix(&self, fraction: f64) -> Result<(Self, Self)> {
        let boundary = split_index(self.n_samples(), fraction)?;
        let train = Self {
            data: self.data.slice(s![..boundary, ..]).to_owned(),
            target: self.target.slice(s![..boundary]).to_owned(),
        };
        let test = Self {
            data: self.data.slice(s![boundary.., ..]).to_owned(),
            target: self.target.slice(s![boundary..]).to_owned(),
        };
        Ok((train, test))
    }
}

/// Row index where the test slice begins: `floor(fraction * n)`
pub fn split_index(n: usize, fraction: f64) -> Result<usize> {
    if !(0.0..=1.0).contains(&fraction) {
        return Err(FeatureError::InvalidFraction { fraction });
    }
    Ok(((n as f64) * fraction).floor() as usize)
}
