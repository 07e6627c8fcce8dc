//! Deterministic synthetic data for estimator tests

#![allow(dead_code)]

use interact_hdlogit::objective::sigmoid;
use ndarray::{Array1, Array2};

/// Seeded linear congruential generator for deterministic fixtures
pub struct Lcg(u64);

impl Lcg {
    pub fn new(seed: u64) -> Self {
        Self(seed)
    }

    /// Uniform draw in [0, 1)
    pub fn next_f64(&mut self) -> f64 {
        self.0 = self
            .0
            .wrapping_mul(6364136223846793005)
            .wrapping_add(1442695040888963407);
        (self.0 >> 11) as f64 / (1u64 << 53) as f64
    }

    pub fn uniform(&mut self, lo: f64, hi: f64) -> f64 {
        lo + (hi - lo) * self.next_f64()
    }
}

/// Features uniform in [-1, 1]
pub fn uniform_features(rng: &mut Lcg, n: usize, d: usize) -> Array2<f64> {
    Array2::from_shape_simple_fn((n, d), || rng.uniform(-1.0, 1.0))
}

/// Labels drawn from a logistic model with the given coefficients
pub fn logistic_labels(rng: &mut Lcg, x: &Array2<f64>, coef: &[(usize, f64)]) -> Array1<usize> {
    x.rows()
        .into_iter()
        .map(|row| {
            let eta: f64 = coef.iter().map(|&(j, b)| b * row[j]).sum();
            usize::from(rng.next_f64() < sigmoid(eta))
        })
        .collect()
}

/// Labels `1` when `x0 * x1 > 0`, flipped with probability `noise`
pub fn xor_labels(rng: &mut Lcg, x: &Array2<f64>, noise: f64) -> Array1<usize> {
    x.rows()
        .into_iter()
        .map(|row| {
            let label = usize::from(row[0] * row[1] > 0.0);
            if rng.next_f64() < noise {
                1 - label
            } else {
                label
            }
        })
        .collect()
}

/// Three classes split into 120 degree sectors of the (x0, x1) plane
pub fn sector_labels(x: &Array2<f64>) -> Array1<usize> {
    let directions = [(1.0, 0.0), (-0.5, 0.866), (-0.5, -0.866)];
    x.rows()
        .into_iter()
        .map(|row| {
            directions
                .iter()
                .map(|(a, b)| a * row[0] + b * row[1])
                .enumerate()
                .fold((0, f64::NEG_INFINITY), |best, (c, s)| if s > best.1 { (c, s) } else { best })
                .0
        })
        .collect()
}
