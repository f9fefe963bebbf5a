//! Ordinary least squares regression

use faer::Mat;
use serde::Serialize;

use super::{Matrix, ModelError, Regressor};

/// Relative ridge added to the Gram diagonal. Collinear building features
/// (surface, wall and roof area) make `XᵀX` rank deficient without it.
const RIDGE_JITTER: f64 = 1e-8;

/// Number of times the jitter is scaled up by 100x before giving up.
const MAX_JITTER_RETRIES: usize = 4;

/// Linear regression with intercept, fitted through the normal equations.
#[derive(Debug, Clone, Default, Serialize)]
pub struct LinearRegression {
    coefficients: Option<Vec<f64>>,
    intercept: f64,
}

impl LinearRegression {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn coefficients(&self) -> Option<&[f64]> {
        self.coefficients.as_deref()
    }

    pub fn intercept(&self) -> f64 {
        self.intercept
    }
}

impl Regressor for LinearRegression {
    fn name(&self) -> &'static str {
        "LinearRegression"
    }

    fn fit(&mut self, x: &Matrix, y: &[f64]) -> Result<(), ModelError> {
        let (n, p) = x.shape();
        if n == 0 {
            return Err(ModelError::EmptyInput {
                model: self.name(),
            });
        }
        if y.len() != n {
            return Err(ModelError::ShapeMismatch {
                expected: format!("y length = {}", n),
                actual: format!("y length = {}", y.len()),
            });
        }

        // Center so the intercept drops out of the system
        let x_means: Vec<f64> = (0..p)
            .map(|j| (0..n).map(|i| x[(i, j)]).sum::<f64>() / n as f64)
            .collect();
        let y_mean = y.iter().sum::<f64>() / n as f64;

        let xc = Mat::<f64>::from_fn(n, p, |i, j| x[(i, j)] - x_means[j]);
        let yc = Mat::<f64>::from_fn(n, 1, |i, _| y[i] - y_mean);

        let gram = xc.transpose() * &xc;
        let rhs = xc.transpose() * &yc;

        let a: Vec<Vec<f64>> = (0..p).map(|i| (0..p).map(|j| gram[(i, j)]).collect()).collect();
        let b: Vec<f64> = (0..p).map(|i| rhs[(i, 0)]).collect();

        let weights = if p == 0 { Vec::new() } else { solve_regularized(&a, &b)? };

        self.intercept = y_mean
            - weights
                .iter()
                .zip(x_means.iter())
                .map(|(w, m)| w * m)
                .sum::<f64>();
        self.coefficients = Some(weights);
        Ok(())
    }

    fn predict(&self, x: &Matrix) -> Result<Vec<f64>, ModelError> {
        let coefficients = self.coefficients.as_ref().ok_or(ModelError::NotFitted {
            model: self.name(),
        })?;
        if x.ncols() != coefficients.len() {
            return Err(ModelError::ShapeMismatch {
                expected: format!("{} features", coefficients.len()),
                actual: format!("{} features", x.ncols()),
            });
        }
        Ok((0..x.nrows())
            .map(|i| {
                self.intercept
                    + x.row(i)
                        .iter()
                        .zip(coefficients.iter())
                        .map(|(v, w)| v * w)
                        .sum::<f64>()
            })
            .collect())
    }
}

/// Solve `(A + λI) w = b` for symmetric positive semi-definite `A`, growing λ
/// until the Cholesky factorization succeeds.
fn solve_regularized(a: &[Vec<f64>], b: &[f64]) -> Result<Vec<f64>, ModelError> {
    let n = a.len();
    let mean_diag = (0..n).map(|i| a[i][i].abs()).sum::<f64>() / n as f64;
    let base = if mean_diag > 0.0 { mean_diag } else { 1.0 };

    let mut ridge = RIDGE_JITTER * base;
    for _ in 0..=MAX_JITTER_RETRIES {
        let mut reg = a.to_vec();
        for (i, row) in reg.iter_mut().enumerate() {
            row[i] += ridge;
        }
        if let Some(w) = cholesky_solve(&reg, b) {
            return Ok(w);
        }
        ridge *= 100.0;
    }
    Err(ModelError::Singular { size: n })
}

/// Cholesky decomposition `A = L Lᵀ` followed by forward/back substitution.
/// Returns `None` when `A` is not positive definite.
fn cholesky_solve(a: &[Vec<f64>], b: &[f64]) -> Option<Vec<f64>> {
    let n = a.len();
    let mut l = vec![vec![0.0; n]; n];

    for i in 0..n {
        for j in 0..=i {
            let sum: f64 = (0..j).map(|k| l[i][k] * l[j][k]).sum();
            if i == j {
                let diag = a[i][i] - sum;
                if diag <= 0.0 || !diag.is_finite() {
                    return None;
                }
                l[i][j] = diag.sqrt();
            } else {
                l[i][j] = (a[i][j] - sum) / l[j][j];
            }
        }
    }

    let mut z = vec![0.0; n];
    for i in 0..n {
        let sum: f64 = (0..i).map(|j| l[i][j] * z[j]).sum();
        z[i] = (b[i] - sum) / l[i][i];
    }

    let mut w = vec![0.0; n];
    for i in (0..n).rev() {
        let sum: f64 = ((i + 1)..n).map(|j| l[j][i] * w[j]).sum();
        w[i] = (z[i] - sum) / l[i][i];
    }

    Some(w)
}
