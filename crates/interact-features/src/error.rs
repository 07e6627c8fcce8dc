//! Error types for interact-features

use thiserror::Error;

/// Result type alias for feature operations
pub type Result<T> = std::result::Result<T, FeatureError>;

/// Errors raised while validating or expanding a feature matrix
#[derive(Error, Debug)]
pub enum FeatureError {
    /// The base matrix has no columns
    #[error("Feature matrix has no columns")]
    NoFeatures,

    /// The normalization divisor is zero, negative, or not finite
    #[error("Invalid interaction scale {scale}: must be positive and finite")]
    InvalidScale { scale: f64 },

    /// Sample and label counts disagree
    #[error("Shape mismatch: {rows} samples but {labels} labels")]
    ShapeMismatch { rows: usize, labels: usize },

    /// Train fraction outside [0, 1]
    #[error("Invalid train fraction {fraction}: must be within [0, 1]")]
    InvalidFraction { fraction: f64 },

    /// Output buffer could not be shaped into a matrix
    #[error("Array shape error: {0}")]
    Shape(#[from] ndarray::ShapeError),
}
