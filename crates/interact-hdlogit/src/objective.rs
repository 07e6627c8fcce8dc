//! Logistic log-likelihood over a subset of design columns
//!
//! For the selected columns `Xs` and binary targets `y`:
//!
//! - loss(b) = mean(log(1 + exp(Xs b))) - y . Xs b / n
//! - grad(b) = (sigmoid(Xs b) - y)^T Xs / n
//! - hess(b) = Xs^T diag(sigmoid (1 - sigmoid)) Xs / n
//!
//! The loss is the negative average log-likelihood, so it is what the
//! information criteria scale by `2n`.

use ndarray::{Array1, Array2, ArrayView1, ArrayView2, Axis};

/// Numerically stable logistic function
pub fn sigmoid(z: f64) -> f64 {
    if z >= 0.0 {
        1.0 / (1.0 + (-z).exp())
    } else {
        let e = z.exp();
        e / (1.0 + e)
    }
}

/// Numerically stable `log(1 + exp(z))`
pub fn softplus(z: f64) -> f64 {
    if z > 0.0 {
        z + (-z).exp().ln_1p()
    } else {
        z.exp().ln_1p()
    }
}

/// Gradient of the average loss with respect to every design column
///
/// `eta` is the current linear predictor `X b`.
pub fn full_gradient(
    x: ArrayView2<'_, f64>,
    y: ArrayView1<'_, f64>,
    eta: ArrayView1<'_, f64>,
) -> Array1<f64> {
    let n = x.nrows().max(1) as f64;
    let residual: Array1<f64> = eta
        .iter()
        .zip(y.iter())
        .map(|(e, t)| sigmoid(*e) - t)
        .collect();
    x.t().dot(&residual) / n
}

/// Logistic objective restricted to a set of columns
#[derive(Debug, Clone)]
pub struct LogisticObjective<'a> {
    xs: Array2<f64>,
    y: ArrayView1<'a, f64>,
}

impl<'a> LogisticObjective<'a> {
    /// Objective over `columns` of the design matrix `x`
    pub fn new(x: ArrayView2<'_, f64>, y: ArrayView1<'a, f64>, columns: &[usize]) -> Self {
        Self {
            xs: x.select(Axis(1), columns),
            y,
        }
    }

    /// Number of coefficients
    pub fn dim(&self) -> usize {
        self.xs.ncols()
    }

    /// Linear predictor `Xs b`
    pub fn linear_predictor(&self, beta: ArrayView1<'_, f64>) -> Array1<f64> {
        self.xs.dot(&beta)
    }

    pub fn loss(&self, beta: ArrayView1<'_, f64>) -> f64 {
        let n = self.n();
        let eta = self.linear_predictor(beta);
        eta.iter()
            .zip(self.y.iter())
            .map(|(e, t)| softplus(*e) - t * e)
            .sum::<f64>()
            / n
    }

    pub fn gradient(&self, beta: ArrayView1<'_, f64>) -> Array1<f64> {
        let eta = self.linear_predictor(beta);
        full_gradient(self.xs.view(), self.y, eta.view())
    }

    pub fn hessian(&self, beta: ArrayView1<'_, f64>) -> Array2<f64> {
        let n = self.n();
        let eta = self.linear_predictor(beta);
        let weights = eta.mapv(|e| {
            let p = sigmoid(e);
            p * (1.0 - p)
        });
        let weighted = &self.xs * &weights.insert_axis(Axis(1));
        self.xs.t().dot(&weighted) / n
    }

    fn n(&self) -> f64 {
        self.xs.nrows().max(1) as f64
    }
}
