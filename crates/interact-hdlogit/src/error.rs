//! Error types for interact-hdlogit

use interact_features::FeatureError;
use thiserror::Error;

use crate::config::ConfigError;

/// Result type alias for estimator operations
pub type Result<T> = std::result::Result<T, HdLogitError>;

/// Main error type for fitting and prediction
#[derive(Error, Debug)]
pub enum HdLogitError {
    /// Feature preparation errors
    #[error("Feature error: {0}")]
    Feature(#[from] FeatureError),

    /// Invalid estimator configuration
    #[error("Invalid configuration: {0}")]
    InvalidConfig(#[from] ConfigError),

    /// Sample and label counts disagree
    #[error("Shape mismatch: {rows} samples but {labels} labels")]
    ShapeMismatch { rows: usize, labels: usize },

    /// No samples to fit or score
    #[error("Empty input: at least one sample is required")]
    EmptyInput,

    /// Binary estimator received a label other than 0 or 1
    #[error("Invalid label {label}: binary estimator expects 0 or 1")]
    InvalidLabel { label: usize },

    /// Prediction requested before fit
    #[error("Estimator is not fitted")]
    NotFitted,

    /// Prediction input has a different width than the training data
    #[error("Expected {expected} features, got {actual}")]
    FeatureCountMismatch { expected: usize, actual: usize },

    /// Every column of the design matrix is numerically zero
    #[error("Design matrix has no informative columns")]
    NoInformativeColumns,

    /// Multiclass training labels are empty
    #[error("No classes in training labels")]
    NoClasses,
}
