//! Pairwise feature-interaction expansion
//!
//! Augments each sample with the scaled product of every pair of distinct
//! base features, letting a linear model pick up multiplicative effects.
//! The column layout is described by [`PairLayout`].
//!
//! # Parallel Processing
//!
//! Rows are independent. When the `parallel` feature is enabled,
//! [`expand_parallel`] fills rows on the rayon thread pool and produces the
//! same matrix bit for bit.

use ndarray::{Array2, ArrayView1, ArrayView2};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

use crate::error::{FeatureError, Result};
use crate::layout::PairLayout;

/// Largest pixel intensity in the 8x8 digits data, used as the default divisor
pub const DEFAULT_SCALE: f64 = 15.0;

/// Expand an `N x D` matrix into `N x (D + D(D-1)/2)` columns
///
/// Column `k < D` is copied from the input; the remaining columns hold
/// `x[i] * x[j] / scale` for every `i < j`, in [`PairLayout`] order.
///
/// Time and space complexity: O(N * D^2)
pub fn expand(x: ArrayView2<'_, f64>, scale: f64) -> Result<Array2<f64>> {
    let layout = check_input(x, scale)?;
    let (n, width) = (x.nrows(), layout.width());

    let mut buffer = vec![0.0; n * width];
    for (row, out) in x.rows().into_iter().zip(buffer.chunks_mut(width)) {
        fill_row(&layout, row, scale, out);
    }

    Ok(Array2::from_shape_vec((n, width), buffer)?)
}

/// Same as [`expand`], computing rows on the rayon thread pool
#[cfg(feature = "parallel")]
pub fn expand_parallel(x: ArrayView2<'_, f64>, scale: f64) -> Result<Array2<f64>> {
    let layout = check_input(x, scale)?;
    let (n, width) = (x.nrows(), layout.width());

    let mut buffer = vec![0.0; n * width];
    buffer
        .par_chunks_mut(width)
        .enumerate()
        .for_each(|(r, out)| fill_row(&layout, x.row(r), scale, out));

    Ok(Array2::from_shape_vec((n, width), buffer)?)
}

/// Same as [`expand`]; rows are computed sequentially without the `parallel` feature
#[cfg(not(feature = "parallel"))]
pub fn expand_parallel(x: ArrayView2<'_, f64>, scale: f64) -> Result<Array2<f64>> {
    expand(x, scale)
}

fn check_input(x: ArrayView2<'_, f64>, scale: f64) -> Result<PairLayout> {
    let d = x.ncols();
    if d == 0 {
        return Err(FeatureError::NoFeatures);
    }
    if !(scale.is_finite() && scale > 0.0) {
        return Err(FeatureError::InvalidScale { scale });
    }
    Ok(PairLayout::new(d))
}

fn fill_row(layout: &PairLayout, row: ArrayView1<'_, f64>, scale: f64, out: &mut [f64]) {
    let d = layout.base_features();
    for (dst, src) in out[..d].iter_mut().zip(row.iter()) {
        *dst = *src;
    }

    for i in 0..d {
        let start = layout.block_start(i);
        let xi = row[i];
        let block = &mut out[start..start + (d - i - 1)];
        for (dst, xj) in block.iter_mut().zip(row.iter().skip(i + 1)) {
            *dst = xi * xj / scale;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::{array, Array2};

    #[test]
    fn test_two_features() {
        let x = array![[3.0, 5.0], [15.0, 0.0]];
        let out = expand(x.view(), DEFAULT_SCALE).unwrap();

        assert_eq!(out.dim(), (2, 3));
        assert_eq!(out.row(0).to_vec(), vec![3.0, 5.0, 3.0 * 5.0 / 15.0]);
        assert_eq!(out.row(1).to_vec(), vec![15.0, 0.0, 0.0]);
    }

    #[test]
    fn test_three_features_pair_order() {
        let (a, b, c) = (2.0, 7.0, 11.0);
        let x = array![[a, b, c]];
        let out = expand(x.view(), 15.0).unwrap();

        assert_eq!(
            out.row(0).to_vec(),
            vec![a, b, c, a * b / 15.0, a * c / 15.0, b * c / 15.0]
        );
    }

    #[test]
    fn test_single_feature_is_identity() {
        let x = array![[1.0], [4.0], [9.0]];
        let out = expand(x.view(), 15.0).unwrap();
        assert_eq!(out, x);
    }

    #[test]
    fn test_sixty_four_pixel_width() {
        let x = Array2::<f64>::from_elem((4, 64), 1.0);
        let out = expand(x.view(), 15.0).unwrap();
        assert_eq!(out.dim(), (4, 64 + 64 * 63 / 2));
        assert!(out.slice(ndarray::s![.., 64..]).iter().all(|v| *v == 1.0 / 15.0));
    }

    #[test]
    fn test_empty_rows() {
        let x = Array2::<f64>::zeros((0, 5));
        let out = expand(x.view(), 15.0).unwrap();
        assert_eq!(out.dim(), (0, 15));
    }

    #[test]
    fn test_no_features_rejected() {
        let x = Array2::<f64>::zeros((3, 0));
        assert!(matches!(
            expand(x.view(), 15.0),
            Err(FeatureError::NoFeatures)
        ));
    }

    #[test]
    fn test_invalid_scale_rejected() {
        let x = array![[1.0, 2.0]];
        for scale in [0.0, -1.0, f64::NAN, f64::INFINITY] {
            assert!(matches!(
                expand(x.view(), scale),
                Err(FeatureError::InvalidScale { .. })
            ));
        }
    }

    #[test]
    fn test_matches_layout_bijection() {
        let x = array![[1.0, 2.0, 3.0, 4.0, 5.0]];
        let out = expand(x.view(), 2.0).unwrap();
        let layout = PairLayout::new(5);
        for (i, j) in layout.pairs() {
            let column = layout.column(i, j).unwrap();
            assert_eq!(out[[0, column]], x[[0, i]] * x[[0, j]] / 2.0);
        }
    }

    #[test]
    fn test_parallel_matches_sequential() {
        let x = Array2::from_shape_fn((37, 8), |(r, c)| ((r * 7 + c * 3) % 16) as f64);
        let sequential = expand(x.view(), 15.0).unwrap();
        let parallel = expand_parallel(x.view(), 15.0).unwrap();
        assert_eq!(sequential, parallel);
    }

    #[test]
    fn test_input_untouched() {
        let x = array![[1.0, 2.0, 3.0]];
        let before = x.clone();
        let _ = expand(x.view(), 15.0).unwrap();
        assert_eq!(x, before);
    }
}
