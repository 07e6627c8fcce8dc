//! Classifier contract shared by the estimators
//!
//! Mirrors the `fit` / `predict` / `score` surface the evaluation harness
//! expects. Labels are class indices `0..k`.

use ndarray::{Array1, ArrayView1, ArrayView2};

use crate::error::{HdLogitError, Result};

/// A trainable classifier over dense feature matrices
pub trait Classifier {
    /// Fit the model to samples `x` with labels `y`
    fn fit(&mut self, x: ArrayView2<'_, f64>, y: ArrayView1<'_, usize>) -> Result<()>;

    /// Predict one label per row of `x`
    fn predict(&self, x: ArrayView2<'_, f64>) -> Result<Array1<usize>>;

    /// Mean accuracy on `x` against `y`, in [0, 1]
    fn score(&self, x: ArrayView2<'_, f64>, y: ArrayView1<'_, usize>) -> Result<f64> {
        let predicted = self.predict(x)?;
        accuracy(predicted.view(), y)
    }

    /// Optional human readable name for the model
    fn name(&self) -> &str {
        "classifier"
    }
}

/// Classifier that also reports the probability of the positive class
pub trait ProbabilisticClassifier: Classifier {
    fn predict_proba(&self, x: ArrayView2<'_, f64>) -> Result<Array1<f64>>;
}

/// Fraction of matching labels
pub fn accuracy(predicted: ArrayView1<'_, usize>, actual: ArrayView1<'_, usize>) -> Result<f64> {
    if predicted.len() != actual.len() {
        return Err(HdLogitError::ShapeMismatch {
            rows: predicted.len(),
            labels: actual.len(),
        });
    }
    if actual.is_empty() {
        return Err(HdLogitError::EmptyInput);
    }
    let hits = predicted
        .iter()
        .zip(actual.iter())
        .filter(|(p, a)| p == a)
        .count();
    Ok(hits as f64 / actual.len() as f64)
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    #[test]
    fn test_accuracy() {
        let predicted = array![0, 1, 2, 1];
        let actual = array![0, 1, 1, 1];
        assert_eq!(accuracy(predicted.view(), actual.view()).unwrap(), 0.75);
    }

    #[test]
    fn test_accuracy_errors() {
        assert!(matches!(
            accuracy(array![0, 1].view(), array![0].view()),
            Err(HdLogitError::ShapeMismatch { .. })
        ));
        assert!(matches!(
            accuracy(Array1::zeros(0).view(), Array1::zeros(0).view()),
            Err(HdLogitError::EmptyInput)
        ));
    }
}
