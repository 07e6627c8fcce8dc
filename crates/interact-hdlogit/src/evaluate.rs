//! Holdout evaluation on a prefix split
//!
//! Fits a classifier on the leading `floor(fraction * N)` rows of a dataset
//! and reports accuracy on the remaining rows.

use interact_features::{Dataset, ExpansionConfig};
use serde::{Deserialize, Serialize};

use crate::classifier::Classifier;
use crate::error::{HdLogitError, Result};

/// Outcome of a single holdout run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HoldoutReport {
    /// Name reported by the classifier
    pub model: String,
    pub features: usize,
    pub train_samples: usize,
    pub test_samples: usize,
    /// Accuracy on the test rows, in [0, 1]
    pub accuracy: f64,
}

/// Fit on the training prefix and score on the test suffix
pub fn holdout_score<C: Classifier>(
    classifier: &mut C,
    dataset: &Dataset,
    train_fraction: f64,
) -> Result<HoldoutReport> {
    let (train, test) = dataset.split_prefix(train_fraction)?;
    if train.n_samples() == 0 || test.n_samples() == 0 {
        return Err(HdLogitError::EmptyInput);
    }

    classifier.fit(train.data(), train.target())?;
    let accuracy = classifier.score(test.data(), test.target())?;

    let report = HoldoutReport {
        model: classifier.name().to_string(),
        features: dataset.n_features(),
        train_samples: train.n_samples(),
        test_samples: test.n_samples(),
        accuracy,
    };
    tracing::info!(
        model = %report.model,
        features = report.features,
        train = report.train_samples,
        test = report.test_samples,
        accuracy,
        "holdout evaluation"
    );
    Ok(report)
}

/// Expand `dataset` with `config`, then hold out at `config.train_fraction`
pub fn holdout_with_config<C: Classifier>(
    classifier: &mut C,
    dataset: &Dataset,
    config: &ExpansionConfig,
) -> Result<HoldoutReport> {
    let expanded = dataset.expanded_with(config)?;
    holdout_score(classifier, &expanded, config.train_fraction)
}
