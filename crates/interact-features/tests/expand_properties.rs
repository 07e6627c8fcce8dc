//! Property tests for the pairwise interaction expansion

use interact_features::{expand, expand_parallel, PairLayout};
use ndarray::{concatenate, s, Array2, ArrayView2, Axis};
use proptest::prelude::*;

/// Random `n x d` pixel matrix with intensities in [0, 15]
fn pixel_matrix() -> impl Strategy<Value = Array2<f64>> {
    (1usize..9, 0usize..16).prop_flat_map(|(d, n)| {
        prop::collection::vec(0u8..=15, n * d).prop_map(move |values| {
            let values: Vec<f64> = values.into_iter().map(f64::from).collect();
            Array2::from_shape_vec((n, d), values).unwrap()
        })
    })
}

fn permuted(x: ArrayView2<'_, f64>, order: &[usize]) -> Array2<f64> {
    x.select(Axis(0), order)
}

proptest! {
    #[test]
    fn test_output_width_depends_only_on_d(x in pixel_matrix()) {
        let (n, d) = x.dim();
        let out = expand(x.view(), 15.0).unwrap();
        prop_assert_eq!(out.dim(), (n, d + d * (d - 1) / 2));
    }

    #[test]
    fn test_base_columns_copied(x in pixel_matrix()) {
        let d = x.ncols();
        let out = expand(x.view(), 15.0).unwrap();
        prop_assert_eq!(out.slice(s![.., ..d]), x.view());
    }

    #[test]
    fn test_products_follow_layout(x in pixel_matrix(), scale in 0.5f64..32.0) {
        let layout = PairLayout::new(x.ncols());
        let out = expand(x.view(), scale).unwrap();
        for r in 0..x.nrows() {
            for (i, j) in layout.pairs() {
                let column = layout.column(i, j).unwrap();
                prop_assert_eq!(out[[r, column]], x[[r, i]] * x[[r, j]] / scale);
            }
        }
    }

    #[test]
    fn test_repeat_is_bit_identical(x in pixel_matrix()) {
        let first = expand(x.view(), 15.0).unwrap();
        let second = expand(x.view(), 15.0).unwrap();
        prop_assert!(first
            .iter()
            .zip(second.iter())
            .all(|(a, b)| a.to_bits() == b.to_bits()));
    }

    #[test]
    fn test_row_permutation_commutes(
        (x, order) in pixel_matrix().prop_flat_map(|x| {
            let order: Vec<usize> = (0..x.nrows()).collect();
            (Just(x), Just(order).prop_shuffle())
        })
    ) {
        let expanded_then_permuted = permuted(expand(x.view(), 15.0).unwrap().view(), &order);
        let permuted_then_expanded = expand(permuted(x.view(), &order).view(), 15.0).unwrap();
        prop_assert_eq!(expanded_then_permuted, permuted_then_expanded);
    }

    #[test]
    fn test_worker_split_matches_sequential(x in pixel_matrix(), workers in 1usize..5) {
        prop_assume!(x.nrows() > 0);
        let sequential = expand(x.view(), 15.0).unwrap();

        let chunk = x.nrows().div_ceil(workers);
        let parts: Vec<Array2<f64>> = std::thread::scope(|scope| {
            let handles: Vec<_> = x
                .axis_chunks_iter(Axis(0), chunk)
                .map(|rows| scope.spawn(move || expand(rows, 15.0).unwrap()))
                .collect();
            handles.into_iter().map(|h| h.join().unwrap()).collect()
        });
        let views: Vec<_> = parts.iter().map(|p| p.view()).collect();
        let joined = concatenate(Axis(0), &views).unwrap();

        prop_assert_eq!(joined, sequential.clone());
        prop_assert_eq!(expand_parallel(x.view(), 15.0).unwrap(), sequential);
    }
}

#[test]
fn test_single_feature_unchanged() {
    let x = Array2::from_shape_vec((4, 1), vec![0.0, 5.0, 10.0, 15.0]).unwrap();
    assert_eq!(expand(x.view(), 15.0).unwrap(), x);
}
