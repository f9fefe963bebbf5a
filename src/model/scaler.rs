//! Z-score standardization

use serde::Serialize;

use super::{Matrix, ModelError};

/// Column-wise standard scaler: `(x - mean) / std` with population std.
///
/// Constant columns get a scale of 1.0 so they map to zero instead of NaN.
#[derive(Debug, Clone, Default, Serialize)]
pub struct StandardScaler {
    means: Vec<f64>,
    scales: Vec<f64>,
    fitted: bool,
}

impl StandardScaler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a scaler from precomputed statistics
    pub fn from_stats(means: Vec<f64>, scales: Vec<f64>) -> Self {
        let scales = scales
            .into_iter()
            .map(|s| if s == 0.0 || !s.is_finite() { 1.0 } else { s })
            .collect();
        Self {
            means,
            scales,
            fitted: true,
        }
    }

    pub fn fit(&mut self, x: &Matrix) -> Result<&mut Self, ModelError> {
        let (n, p) = x.shape();
        if n == 0 {
            return Err(ModelError::EmptyInput {
                model: "StandardScaler",
            });
        }
        let mut means = vec![0.0; p];
        let mut scales = vec![0.0; p];
        for j in 0..p {
            let column = x.column(j);
            let (mean, std) = mean_and_std(&column);
            means[j] = mean;
            scales[j] = std;
        }
        *self = Self::from_stats(means, scales);
        Ok(self)
    }

    pub fn transform(&self, x: &Matrix) -> Result<Matrix, ModelError> {
        if !self.fitted {
            return Err(ModelError::NotFitted {
                model: "StandardScaler",
            });
        }
        if x.ncols() != self.means.len() {
            return Err(ModelError::ShapeMismatch {
                expected: format!("{} features", self.means.len()),
                actual: format!("{} features", x.ncols()),
            });
        }
        let mut out = x.clone();
        for i in 0..x.nrows() {
            for j in 0..x.ncols() {
                out[(i, j)] = (x[(i, j)] - self.means[j]) / self.scales[j];
            }
        }
        Ok(out)
    }

    pub fn fit_transform(&mut self, x: &Matrix) -> Result<Matrix, ModelError> {
        self.fit(x)?;
        self.transform(x)
    }

    /// Standardize a single column of values with the statistics of column `j`
    pub fn transform_value(&self, j: usize, value: f64) -> f64 {
        (value - self.means[j]) / self.scales[j]
    }

    pub fn means(&self) -> &[f64] {
        &self.means
    }

    pub fn scales(&self) -> &[f64] {
        &self.scales
    }
}

/// Mean and population standard deviation
pub fn mean_and_std(values: &[f64]) -> (f64, f64) {
    if values.is_empty() {
        return (0.0, 0.0);
    }
    let n = values.len() as f64;
    let mean = values.iter().sum::<f64>() / n;
    let var = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / n;
    (mean, var.sqrt())
}
