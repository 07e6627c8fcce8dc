//! interact-hdlogit - High-dimensional logistic regression
//!
//! Sparse logistic regression for feature sets much wider than the sample,
//! built in three stages:
//!
//! - **CGA**: Chebyshev greedy algorithm, forward selection by the largest
//!   absolute gradient of the logistic loss
//! - **HDIC**: truncate the greedy path at the minimum of a high-dimensional
//!   information criterion (HQIC, AIC or BIC with a `wn * ln p` penalty)
//! - **Trim**: drop variables whose removal lowers the criterion
//!
//! The crate also provides the [`Classifier`] contract, a [`OneVsRest`]
//! wrapper for multiclass labels and [`holdout_score`] for prefix-split
//! evaluation.

pub mod cga;
pub mod classifier;
pub mod config;
pub mod criterion;
pub mod error;
pub mod estimator;
pub mod evaluate;
pub mod objective;
pub mod ovr;
pub mod solver;
pub mod trim;

pub use cga::{chebyshev_greedy_path, CgaPath};
pub use classifier::{accuracy, Classifier, ProbabilisticClassifier};
pub use config::{ConfigError, HdLogitConfig};
pub use criterion::InformationCriterion;
pub use error::{HdLogitError, Result};
pub use estimator::{default_wn_grid, HighDimensionalLogisticRegression};
pub use evaluate::{holdout_score, holdout_with_config, HoldoutReport};
pub use ovr::OneVsRest;
pub use solver::{minimize, Solution, SolverOptions};
pub use trim::{cga_hdic_trim, HdicFit};
