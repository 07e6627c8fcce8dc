//! The high-dimensional logistic regression estimator
//!
//! Binary classifier for settings where the number of candidate features is
//! large relative to the sample size, such as 64 pixels expanded with all
//! 2016 pairwise products. Variables are chosen by the Chebyshev greedy
//! algorithm, the path is truncated by a high-dimensional information
//! criterion and the survivors are trimmed (see [`crate::trim`]).

use ndarray::{Array1, ArrayView1, ArrayView2};

use crate::classifier::{Classifier, ProbabilisticClassifier};
use crate::config::HdLogitConfig;
use crate::criterion::InformationCriterion;
use crate::error::{HdLogitError, Result};
use crate::objective::sigmoid;
use crate::trim::{cga_hdic_trim, HdicFit};

/// Default search range for `wn`: ten evenly spaced values in [0.6, 1.2]
pub fn default_wn_grid() -> Vec<f64> {
    Array1::linspace(0.6, 1.2, 10).to_vec()
}

/// CGA + HDIC + Trim logistic regression
#[derive(Debug, Clone, Default)]
pub struct HighDimensionalLogisticRegression {
    config: HdLogitConfig,
    fitted: Option<HdicFit>,
}

impl HighDimensionalLogisticRegression {
    pub fn new(config: HdLogitConfig) -> Self {
        Self {
            config,
            fitted: None,
        }
    }

    pub fn config(&self) -> &HdLogitConfig {
        &self.config
    }

    /// The fitted model, if any
    pub fn fitted(&self) -> Option<&HdicFit> {
        self.fitted.as_ref()
    }

    /// Linear predictor `intercept + x . coef` for each row
    pub fn decision_function(&self, x: ArrayView2<'_, f64>) -> Result<Array1<f64>> {
        let fit = self.fitted_model()?;
        if x.ncols() != fit.coef.len() {
            return Err(HdLogitError::FeatureCountMismatch {
                expected: fit.coef.len(),
                actual: x.ncols(),
            });
        }

        // coef is zero outside the model
        let mut eta = Array1::from_elem(x.nrows(), fit.intercept);
        for &j in &fit.model {
            eta.scaled_add(fit.coef[j], &x.column(j));
        }
        Ok(eta)
    }

    /// Fraction of rows whose prediction disagrees with `y`
    pub fn hamming_loss(&self, x: ArrayView2<'_, f64>, y: ArrayView1<'_, usize>) -> Result<f64> {
        Ok(1.0 - self.score(x, y)?)
    }

    /// Tune `wn` with a classical information criterion
    ///
    /// Refits the model for every value in `grid` and keeps the fit with the
    /// smallest `ic_wn` criterion, starting from the current fit. Returns the
    /// chosen `wn`.
    pub fn tune_wn_via_ic(
        &mut self,
        x: ArrayView2<'_, f64>,
        y: ArrayView1<'_, usize>,
        ic_wn: InformationCriterion,
        grid: &[f64],
    ) -> Result<f64> {
        let n = x.nrows();
        let current = self.fitted_model()?;
        let mut best = ic_wn.value(current.loss, current.model.len(), n);

        for &wn in grid {
            let config = self.config.clone().with_wn(wn);
            let candidate = cga_hdic_trim(x, y, &config)?;
            let criterion = ic_wn.value(candidate.loss, candidate.model.len(), n);
            tracing::debug!(wn, criterion, best, "wn candidate");
            if criterion < best {
                best = criterion;
                self.config = config;
                self.fitted = Some(candidate);
            }
        }

        tracing::info!(wn = self.config.wn, criterion = best, ic = %ic_wn, "tuned wn");
        Ok(self.config.wn)
    }

    fn fitted_model(&self) -> Result<&HdicFit> {
        self.fitted.as_ref().ok_or(HdLogitError::NotFitted)
    }
}

impl Classifier for HighDimensionalLogisticRegression {
    fn fit(&mut self, x: ArrayView2<'_, f64>, y: ArrayView1<'_, usize>) -> Result<()> {
        let fit = cga_hdic_trim(x, y, &self.config)?;
        tracing::debug!(
            features = x.ncols(),
            selected = fit.model.len(),
            loss = fit.loss,
            "fitted high-dimensional logistic regression"
        );
        self.fitted = Some(fit);
        Ok(())
    }

    /// 1 when the positive-class probability exceeds 0.5
    fn predict(&self, x: ArrayView2<'_, f64>) -> Result<Array1<usize>> {
        Ok(self.predict_proba(x)?.mapv(|p| usize::from(p > 0.5)))
    }

    fn name(&self) -> &str {
        "high-dimensional logistic regression"
    }
}

impl ProbabilisticClassifier for HighDimensionalLogisticRegression {
    fn predict_proba(&self, x: ArrayView2<'_, f64>) -> Result<Array1<f64>> {
        Ok(self.decision_function(x)?.mapv(sigmoid))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::{array, Array2};

    fn toy() -> (Array2<f64>, Array1<usize>) {
        let x = array![
            [0.3, -2.0],
            [-0.1, -1.5],
            [0.2, -1.0],
            [-0.4, -0.5],
            [0.1, 0.5],
            [0.4, 1.0],
            [-0.2, 1.5],
            [0.0, 2.0],
            [0.3, 0.2],
            [-0.3, -0.2],
        ];
        let y = array![0, 0, 0, 1, 1, 1, 1, 1, 0, 1];
        (x, y)
    }

    #[test]
    fn test_not_fitted() {
        let estimator = HighDimensionalLogisticRegression::default();
        let (x, y) = toy();
        assert!(matches!(
            estimator.predict(x.view()),
            Err(HdLogitError::NotFitted)
        ));
        assert!(matches!(
            estimator.score(x.view(), y.view()),
            Err(HdLogitError::NotFitted)
        ));
    }

    #[test]
    fn test_fit_predict_score() {
        let (x, y) = toy();
        let mut estimator = HighDimensionalLogisticRegression::default();
        estimator.fit(x.view(), y.view()).unwrap();

        let proba = estimator.predict_proba(x.view()).unwrap();
        assert!(proba.iter().all(|p| (0.0..=1.0).contains(p)));

        let score = estimator.score(x.view(), y.view()).unwrap();
        let loss = estimator.hamming_loss(x.view(), y.view()).unwrap();
        assert!((score + loss - 1.0).abs() < 1e-12);
        assert!(score >= 0.6);
    }

    #[test]
    fn test_feature_count_mismatch() {
        let (x, y) = toy();
        let mut estimator = HighDimensionalLogisticRegression::default();
        estimator.fit(x.view(), y.view()).unwrap();

        let wide = Array2::zeros((2, 3));
        assert!(matches!(
            estimator.predict(wide.view()),
            Err(HdLogitError::FeatureCountMismatch { expected: 2, actual: 3 })
        ));
    }

    #[test]
    fn test_invalid_labels() {
        let (x, _) = toy();
        let y = Array1::from_elem(10, 3);
        let mut estimator = HighDimensionalLogisticRegression::default();
        assert!(matches!(
            estimator.fit(x.view(), y.view()),
            Err(HdLogitError::InvalidLabel { label: 3 })
        ));
    }

    #[test]
    fn test_invalid_config_rejected() {
        let (x, y) = toy();
        let mut estimator = HighDimensionalLogisticRegression::new(HdLogitConfig::new().with_wn(-1.0));
        assert!(matches!(
            estimator.fit(x.view(), y.view()),
            Err(HdLogitError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_default_wn_grid() {
        let grid = default_wn_grid();
        assert_eq!(grid.len(), 10);
        assert!((grid[0] - 0.6).abs() < 1e-12);
        assert!((grid[9] - 1.2).abs() < 1e-12);
    }

    #[test]
    fn test_tune_requires_fit() {
        let (x, y) = toy();
        let mut estimator = HighDimensionalLogisticRegression::default();
        assert!(matches!(
            estimator.tune_wn_via_ic(x.view(), y.view(), InformationCriterion::Bic, &default_wn_grid()),
            Err(HdLogitError::NotFitted)
        ));
    }

    #[test]
    fn test_tune_keeps_wn_from_grid_or_original() {
        let (x, y) = toy();
        let mut estimator = HighDimensionalLogisticRegression::default();
        estimator.fit(x.view(), y.view()).unwrap();

        let grid = default_wn_grid();
        let wn = estimator
            .tune_wn_via_ic(x.view(), y.view(), InformationCriterion::Bic, &grid)
            .unwrap();
        assert!(wn == 1.0 || grid.contains(&wn));
        assert_eq!(estimator.config().wn, wn);
        assert!(estimator.fitted().is_some());
    }
}
