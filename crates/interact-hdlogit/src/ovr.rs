//! One-vs-rest multiclass wrapper
//!
//! A K-class problem becomes K binary problems, class `c` against all others.
//! Prediction picks the class whose estimator reports the highest
//! positive-class probability.

use ndarray::{Array1, Array2, ArrayView1, ArrayView2};

use crate::classifier::{Classifier, ProbabilisticClassifier};
use crate::error::{HdLogitError, Result};

/// K binary estimators cloned from a template
#[derive(Debug, Clone)]
pub struct OneVsRest<C> {
    template: C,
    estimators: Vec<C>,
}

impl<C> OneVsRest<C>
where
    C: ProbabilisticClassifier + Clone,
{
    /// Wrap an unfitted binary estimator
    pub fn new(template: C) -> Self {
        Self {
            template,
            estimators: Vec::new(),
        }
    }

    /// Number of classes seen during fit
    pub fn n_classes(&self) -> usize {
        self.estimators.len()
    }

    /// Fitted per-class estimators, indexed by class
    pub fn estimators(&self) -> &[C] {
        &self.estimators
    }

    /// Positive-class probability of every estimator, `rows x classes`
    pub fn class_probabilities(&self, x: ArrayView2<'_, f64>) -> Result<Array2<f64>> {
        if self.estimators.is_empty() {
            return Err(HdLogitError::NotFitted);
        }

        let mut probabilities: Array2<f64> = Array2::zeros((x.nrows(), self.estimators.len()));
        for (c, estimator) in self.estimators.iter().enumerate() {
            probabilities
                .column_mut(c)
                .assign(&estimator.predict_proba(x)?);
        }
        Ok(probabilities)
    }
}

impl<C> Classifier for OneVsRest<C>
where
    C: ProbabilisticClassifier + Clone,
{
    fn fit(&mut self, x: ArrayView2<'_, f64>, y: ArrayView1<'_, usize>) -> Result<()> {
        if x.nrows() != y.len() {
            return Err(HdLogitError::ShapeMismatch {
                rows: x.nrows(),
                labels: y.len(),
            });
        }
        let n_classes = y.iter().max().map(|max| max + 1).ok_or(HdLogitError::NoClasses)?;

        let mut estimators = Vec::with_capacity(n_classes);
        for class in 0..n_classes {
            let binary: Array1<usize> = y.mapv(|label| usize::from(label == class));
            let mut estimator = self.template.clone();
            estimator.fit(x, binary.view())?;
            tracing::info!(
                class,
                positives = binary.sum(),
                estimator = estimator.name(),
                "fitted one-vs-rest estimator"
            );
            estimators.push(estimator);
        }

        self.estimators = estimators;
        Ok(())
    }

    fn predict(&self, x: ArrayView2<'_, f64>) -> Result<Array1<usize>> {
        let probabilities = self.class_probabilities(x)?;
        Ok(probabilities
            .rows()
            .into_iter()
            .map(|row| {
                row.iter()
                    .enumerate()
                    .fold((0, f64::NEG_INFINITY), |best, (c, &p)| {
                        if p > best.1 {
                            (c, p)
                        } else {
                            best
                        }
                    })
                    .0
            })
            .collect())
    }

    fn name(&self) -> &str {
        "one-vs-rest"
    }
}
