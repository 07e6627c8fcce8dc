//! Chebyshev greedy algorithm (CGA)
//!
//! Forward selection for logistic regression: at every step the column with
//! the largest absolute loss gradient joins the model and the model is refit
//! on all selected columns. The number of steps is
//! `min(rank(X), ceil(kn * sqrt(n / ln p)) + fit_intercept)`.

use ndarray::{s, Array1, Array2, ArrayView1, ArrayView2, Axis};
use serde::{Deserialize, Serialize};

use crate::config::HdLogitConfig;
use crate::error::{HdLogitError, Result};
use crate::objective::{full_gradient, LogisticObjective};
use crate::solver::minimize;

/// Residual norms below this fraction of the largest column norm count as zero
const RANK_RTOL: f64 = 1e-10;

/// Every step of a greedy path, in design-matrix coordinates
///
/// When an intercept is fitted, column 0 is the intercept and `path[0] == 0`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CgaPath {
    /// Coefficients after each step, `p x steps`
    pub beta: Array2<f64>,
    /// Column chosen at each step
    pub path: Vec<usize>,
    /// High-dimensional criterion after each step
    pub hdic: Vec<f64>,
    /// Average loss after each step
    pub loss: Vec<f64>,
    pub steps: usize,
    /// Samples used for the fit
    pub n_samples: usize,
    /// Columns of the design matrix, intercept included
    pub n_columns: usize,
}

/// Run CGA on raw features `x`, adding the intercept column when configured
pub fn chebyshev_greedy_path(
    x: ArrayView2<'_, f64>,
    y: ArrayView1<'_, usize>,
    config: &HdLogitConfig,
) -> Result<CgaPath> {
    config.validate()?;
    let targets = binary_targets(x, y)?;
    let design = design_matrix(x, config.fit_intercept);
    greedy_path(design.view(), targets.view(), config)
}

/// Prepend a column of ones when `fit_intercept` is set
pub(crate) fn design_matrix(x: ArrayView2<'_, f64>, fit_intercept: bool) -> Array2<f64> {
    if !fit_intercept {
        return x.to_owned();
    }
    let mut design = Array2::ones((x.nrows(), x.ncols() + 1));
    design.slice_mut(s![.., 1..]).assign(&x);
    design
}

/// Check shapes and convert 0/1 labels to floats
pub(crate) fn binary_targets(
    x: ArrayView2<'_, f64>,
    y: ArrayView1<'_, usize>,
) -> Result<Array1<f64>> {
    if x.nrows() != y.len() {
        return Err(HdLogitError::ShapeMismatch {
            rows: x.nrows(),
            labels: y.len(),
        });
    }
    if x.nrows() == 0 {
        return Err(HdLogitError::EmptyInput);
    }
    y.iter()
        .map(|&label| match label {
            0 => Ok(0.0),
            1 => Ok(1.0),
            label => Err(HdLogitError::InvalidLabel { label }),
        })
        .collect()
}

/// CGA over an already assembled design matrix
pub(crate) fn greedy_path(
    design: ArrayView2<'_, f64>,
    y: ArrayView1<'_, f64>,
    config: &HdLogitConfig,
) -> Result<CgaPath> {
    let (n, p) = design.dim();
    let budget = step_budget(n, p, config.kn, config.fit_intercept);
    let steps = bounded_rank(design, budget);
    if steps == 0 {
        return Err(HdLogitError::NoInformativeColumns);
    }
    tracing::debug!(n, p, budget, steps, "starting greedy path");

    let options = config.solver_options();
    let mut beta: Array2<f64> = Array2::zeros((p, steps));
    let mut path = Vec::with_capacity(steps);
    let mut hdic = Vec::with_capacity(steps);
    let mut losses = Vec::with_capacity(steps);
    let mut selected = vec![false; p];
    let mut coef: Array1<f64> = Array1::zeros(0);
    let mut eta: Array1<f64> = Array1::zeros(n);

    for k in 0..steps {
        let column = if k == 0 && config.fit_intercept {
            0
        } else {
            let grad = full_gradient(design, y, eta.view());
            match steepest_unselected(&grad, &selected) {
                Some(column) => column,
                None => break,
            }
        };
        selected[column] = true;
        path.push(column);

        let objective = LogisticObjective::new(design, y, &path);
        let mut x0: Array1<f64> = Array1::zeros(path.len());
        x0.slice_mut(s![..coef.len()]).assign(&coef);
        let solution = minimize(&objective, x0, &options);

        for (&j, &b) in path.iter().zip(solution.beta.iter()) {
            beta[[j, k]] = b;
        }
        let criterion = config.ic.hd_value(solution.loss, k + 1, config.wn, n, p);
        tracing::debug!(step = k, column, loss = solution.loss, hdic = criterion, "greedy step");

        eta = objective.linear_predictor(solution.beta.view());
        coef = solution.beta;
        losses.push(solution.loss);
        hdic.push(criterion);
    }

    let steps = path.len();
    Ok(CgaPath {
        beta: beta.slice(s![.., ..steps]).to_owned(),
        path,
        hdic,
        loss: losses,
        steps,
        n_samples: n,
        n_columns: p,
    })
}

/// `ceil(kn * sqrt(n / ln p)) + fit_intercept`, capped at `p`
fn step_budget(n: usize, p: usize, kn: f64, fit_intercept: bool) -> usize {
    let raw = (kn * (n as f64 / (p as f64).ln()).sqrt()).ceil();
    // `as` saturates: ln(1) = 0 yields an unbounded budget
    let raw = if raw.is_nan() { 0 } else { raw as usize };
    raw.saturating_add(usize::from(fit_intercept)).min(p)
}

/// Numerical rank of `x`, but never more than `limit`
///
/// Column-pivoted Gram-Schmidt stopped after `limit` pivots, which costs
/// O(limit * n * p) instead of a full decomposition.
pub(crate) fn bounded_rank(x: ArrayView2<'_, f64>, limit: usize) -> usize {
    let (n, p) = x.dim();
    if n == 0 || p == 0 {
        return 0;
    }

    let mut residual = x.to_owned();
    let mut norms: Vec<f64> = residual
        .axis_iter(Axis(1))
        .map(|c| c.dot(&c))
        .collect();
    let largest = norms.iter().copied().fold(0.0f64, f64::max).sqrt();
    let tolerance = largest * RANK_RTOL;

    let mut rank = 0;
    while rank < limit.min(p) {
        let (pivot, norm_sq) = norms
            .iter()
            .copied()
            .enumerate()
            .fold((0, -1.0), |best, (j, v)| if v > best.1 { (j, v) } else { best });
        if norm_sq.sqrt() <= tolerance {
            break;
        }

        let q = residual.column(pivot).mapv(|v| v / norm_sq.sqrt());
        for (j, mut column) in residual.axis_iter_mut(Axis(1)).enumerate() {
            if norms[j] <= 0.0 {
                continue;
            }
            let projection = q.dot(&column);
            column.scaled_add(-projection, &q);
            norms[j] = column.dot(&column);
        }
        norms[pivot] = 0.0;
        rank += 1;
    }
    rank
}

fn steepest_unselected(grad: &Array1<f64>, selected: &[bool]) -> Option<usize> {
    grad.iter()
        .enumerate()
        .filter(|(j, _)| !selected[*j])
        .fold(None, |best: Option<(usize, f64)>, (j, g)| match best {
            Some((_, b)) if b >= g.abs() => best,
            _ => Some((j, g.abs())),
        })
        .map(|(j, _)| j)
}
