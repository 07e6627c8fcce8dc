//! Damped Newton minimization of the logistic objective
//!
//! Each iteration solves `H d = -g` by Cholesky factorization. When the
//! Hessian is not numerically positive definite a growing ridge is added to
//! its diagonal. Steps are shortened by Armijo backtracking.

use nalgebra::{DMatrix, DVector};
use ndarray::Array1;
use serde::{Deserialize, Serialize};

use crate::objective::LogisticObjective;

const ARMIJO_C: f64 = 1e-4;
const MIN_STEP: f64 = 1e-12;
const MAX_RIDGE_ATTEMPTS: usize = 12;

/// Stopping rules for the Newton iteration
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SolverOptions {
    /// Stop once the largest gradient component is below this value
    pub tol: f64,
    /// Maximum number of Newton iterations
    pub max_iter: usize,
}

impl Default for SolverOptions {
    fn default() -> Self {
        Self {
            tol: 1e-8,
            max_iter: 100,
        }
    }
}

/// Result of a minimization
#[derive(Debug, Clone)]
pub struct Solution {
    /// Minimizing coefficients
    pub beta: Array1<f64>,
    /// Objective value at `beta`
    pub loss: f64,
    pub iterations: usize,
    /// Whether the gradient tolerance was reached
    pub converged: bool,
}

/// Minimize `objective` starting from `x0`
pub fn minimize(
    objective: &LogisticObjective<'_>,
    x0: Array1<f64>,
    options: &SolverOptions,
) -> Solution {
    let mut beta = x0;
    let mut loss = objective.loss(beta.view());
    let mut converged = false;
    let mut iterations = 0;

    while iterations < options.max_iter {
        let grad = objective.gradient(beta.view());
        if grad.iter().fold(0.0f64, |m, g| m.max(g.abs())) < options.tol {
            converged = true;
            break;
        }

        let direction = newton_direction(objective, &beta, &grad);
        let slope = direction.dot(&grad);

        let mut step = 1.0;
        let mut accepted = None;
        while step > MIN_STEP {
            let candidate = &beta + &(&direction * step);
            let candidate_loss = objective.loss(candidate.view());
            if candidate_loss <= loss + ARMIJO_C * step * slope {
                accepted = Some((candidate, candidate_loss));
                break;
            }
            step *= 0.5;
        }

        iterations += 1;
        match accepted {
            Some((candidate, candidate_loss)) => {
                beta = candidate;
                loss = candidate_loss;
            }
            None => {
                // No decrease along the Newton direction: at the numerical optimum
                tracing::debug!(iterations, loss, "line search stalled");
                break;
            }
        }
    }

    if !converged {
        let grad = objective.gradient(beta.view());
        converged = grad.iter().all(|g| g.abs() < options.tol);
    }
    if !converged {
        tracing::debug!(iterations, loss, "newton solver stopped before reaching tolerance");
    }

    Solution {
        beta,
        loss,
        iterations,
        converged,
    }
}

fn newton_direction(
    objective: &LogisticObjective<'_>,
    beta: &Array1<f64>,
    grad: &Array1<f64>,
) -> Array1<f64> {
    let k = grad.len();
    let hess = objective.hessian(beta.view());
    let h = DMatrix::from_fn(k, k, |i, j| hess[[i, j]]);
    let g = DVector::from_iterator(k, grad.iter().map(|v| -v));

    let scale = (0..k).map(|i| h[(i, i)].abs()).fold(0.0f64, f64::max).max(1.0);
    let mut ridge = 0.0;
    for _ in 0..MAX_RIDGE_ATTEMPTS {
        let mut shifted = h.clone();
        for i in 0..k {
            shifted[(i, i)] += ridge;
        }
        if let Some(chol) = shifted.cholesky() {
            let d = chol.solve(&g);
            if d.iter().all(|v| v.is_finite()) {
                return Array1::from_iter(d.iter().copied());
            }
        }
        ridge = if ridge == 0.0 { 1e-10 * scale } else { ridge * 10.0 };
    }

    // Steepest descent fallback
    grad.mapv(|v| -v)
}
