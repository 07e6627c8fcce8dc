//! Three-stage fit: CGA + HDIC + Trim
//!
//! 1. Run the greedy path.
//! 2. Truncate it at the step with the smallest high-dimensional criterion.
//! 3. Drop every variable whose removal alone lowers that criterion, then
//!    refit the survivors.
//!
//! Reported indices refer to the caller's feature columns: when an intercept
//! is fitted it is split off and every index is shifted down by one.

use ndarray::{s, Array1, Array2, ArrayView1, ArrayView2};
use serde::{Deserialize, Serialize};

use crate::cga::{binary_targets, design_matrix, greedy_path, CgaPath};
use crate::config::HdLogitConfig;
use crate::error::Result;
use crate::objective::LogisticObjective;
use crate::solver::minimize;

/// A fitted high-dimensional logistic model
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HdicFit {
    /// Intercept, 0 when none is fitted
    pub intercept: f64,
    /// One coefficient per feature, zero outside `model`
    pub coef: Array1<f64>,
    /// Selected feature columns after trimming, in path order
    pub model: Vec<usize>,
    /// Average loss of the final model
    pub loss: f64,
    /// Feature chosen at each greedy step
    pub path: Vec<usize>,
    /// Intercept after each greedy step
    pub intercept_path: Array1<f64>,
    /// Feature coefficients after each greedy step, `features x steps`
    pub coef_path: Array2<f64>,
    /// High-dimensional criterion after each greedy step
    pub hdic: Vec<f64>,
    /// Number of greedy steps over the features
    pub steps: usize,
}

/// Fit with CGA, truncate by HDIC and trim
pub fn cga_hdic_trim(
    x: ArrayView2<'_, f64>,
    y: ArrayView1<'_, usize>,
    config: &HdLogitConfig,
) -> Result<HdicFit> {
    config.validate()?;
    let targets = binary_targets(x, y)?;
    let design = design_matrix(x, config.fit_intercept);
    let cga = greedy_path(design.view(), targets.view(), config)?;

    let (beta_hat, model, loss) = truncate_and_trim(design.view(), targets.view(), &cga, config);
    Ok(into_feature_coordinates(cga, beta_hat, model, loss, config.fit_intercept))
}

/// HDIC truncation and trimming in design coordinates
///
/// Returns the full coefficient vector, the surviving columns and the loss.
fn truncate_and_trim(
    design: ArrayView2<'_, f64>,
    y: ArrayView1<'_, f64>,
    cga: &CgaPath,
    config: &HdLogitConfig,
) -> (Array1<f64>, Vec<usize>, f64) {
    let (n, p) = (cga.n_samples, cga.n_columns);
    let options = config.solver_options();

    let k_hdic = argmin(&cga.hdic);
    let model = &cga.path[..=k_hdic];
    let best = cga.hdic[k_hdic];
    let warm = |columns: &[usize]| -> Array1<f64> {
        columns.iter().map(|&j| cga.beta[[j, k_hdic]]).collect()
    };

    let mut dropped = Vec::new();
    if model.len() > 1 {
        let first = usize::from(config.fit_intercept);
        for position in first..model.len() {
            let reduced: Vec<usize> = model
                .iter()
                .enumerate()
                .filter(|(m, _)| *m != position)
                .map(|(_, &j)| j)
                .collect();
            let objective = LogisticObjective::new(design, y, &reduced);
            let solution = minimize(&objective, warm(&reduced), &options);
            let criterion = config.ic.hd_value(solution.loss, k_hdic, config.wn, n, p);
            if criterion < best {
                tracing::debug!(column = model[position], criterion, best, "trimming column");
                dropped.push(position);
            }
        }
    }

    let kept: Vec<usize> = model
        .iter()
        .enumerate()
        .filter(|(m, _)| !dropped.contains(m))
        .map(|(_, &j)| j)
        .collect();

    let mut beta_hat: Array1<f64> = Array1::zeros(p);
    let loss = if dropped.is_empty() {
        for &j in &kept {
            beta_hat[j] = cga.beta[[j, k_hdic]];
        }
        cga.loss[k_hdic]
    } else {
        let objective = LogisticObjective::new(design, y, &kept);
        let solution = minimize(&objective, warm(&kept), &options);
        for (&j, &b) in kept.iter().zip(solution.beta.iter()) {
            beta_hat[j] = b;
        }
        solution.loss
    };

    tracing::info!(
        steps = cga.steps,
        truncated_at = k_hdic,
        kept = kept.len(),
        trimmed = dropped.len(),
        loss,
        "hdic trim complete"
    );
    (beta_hat, kept, loss)
}

fn into_feature_coordinates(
    cga: CgaPath,
    beta_hat: Array1<f64>,
    model: Vec<usize>,
    loss: f64,
    fit_intercept: bool,
) -> HdicFit {
    if !fit_intercept {
        return HdicFit {
            intercept: 0.0,
            coef: beta_hat,
            model,
            loss,
            path: cga.path,
            intercept_path: Array1::zeros(cga.steps),
            coef_path: cga.beta,
            hdic: cga.hdic,
            steps: cga.steps,
        };
    }

    // the intercept is path[0] and is never trimmed
    HdicFit {
        intercept: beta_hat[0],
        coef: beta_hat.slice(s![1..]).to_owned(),
        model: model.iter().skip(1).map(|j| j - 1).collect(),
        loss,
        path: cga.path.iter().skip(1).map(|j| j - 1).collect(),
        intercept_path: cga.beta.row(0).to_owned(),
        coef_path: cga.beta.slice(s![1.., ..]).to_owned(),
        hdic: cga.hdic[1..].to_vec(),
        steps: cga.steps - 1,
    }
}

/// Index of the first minimum
fn argmin(values: &[f64]) -> usize {
    values
        .iter()
        .enumerate()
        .fold((0, f64::INFINITY), |best, (i, &v)| if v < best.1 { (i, v) } else { best })
        .0
}
