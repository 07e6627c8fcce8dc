//! interact-features - Pairwise feature interactions for linear classifiers
//!
//! This crate prepares sample matrices for linear models:
//!
//! - **expand**: append `x[i] * x[j] / scale` for every pair of distinct features
//! - **PairLayout**: the documented bijection between pairs and expanded columns
//! - **Dataset**: samples plus labels, with the static prefix train/test split
//! - **ExpansionConfig**: scale, split fraction and execution mode
//!
//! # Example
//!
//! ```
//! use interact_features::{expand, PairLayout};
//! use ndarray::array;
//!
//! let x = array![[3.0, 5.0, 6.0]];
//! let out = expand(x.view(), 15.0).unwrap();
//! assert_eq!(out.ncols(), PairLayout::new(3).width());
//! assert_eq!(out[[0, 3]], 1.0);
//! ```

pub mod config;
pub mod dataset;
pub mod error;
pub mod expand;
pub mod layout;

pub use config::*;
pub use dataset::*;
pub use error::{FeatureError, Result};
pub use expand::*;
pub use layout::*;
