//! Regression metrics: R², RMSE, MAE

use anyhow::{bail, Result};
use serde::Serialize;

/// Scores for one prediction vector against its ground truth
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RegressionMetrics {
    pub r2: f64,
    pub rmse: f64,
    pub mae: f64,
}

impl RegressionMetrics {
    pub fn compute(y_true: &[f64], y_pred: &[f64]) -> Result<Self> {
        Ok(Self {
            r2: r2_score(y_true, y_pred)?,
            rmse: rmse(y_true, y_pred)?,
            mae: mae(y_true, y_pred)?,
        })
    }

    /// Element-wise mean of several metric sets (uniform average)
    pub fn mean(items: &[RegressionMetrics]) -> Option<Self> {
        if items.is_empty() {
            return None;
        }
        let n = items.len() as f64;
        Some(Self {
            r2: items.iter().map(|m| m.r2).sum::<f64>() / n,
            rmse: items.iter().map(|m| m.rmse).sum::<f64>() / n,
            mae: items.iter().map(|m| m.mae).sum::<f64>() / n,
        })
    }
}

fn check_inputs(y_true: &[f64], y_pred: &[f64]) -> Result<()> {
    if y_true.is_empty() {
        bail!("Cannot score an empty prediction set");
    }
    if y_true.len() != y_pred.len() {
        bail!(
            "Length mismatch: {} true values vs {} predictions",
            y_true.len(),
            y_pred.len()
        );
    }
    Ok(())
}

/// Coefficient of determination.
///
/// A constant ground truth gives 1.0 for a perfect prediction and 0.0 otherwise.
pub fn r2_score(y_true: &[f64], y_pred: &[f64]) -> Result<f64> {
    check_inputs(y_true, y_pred)?;
    let mean = y_true.iter().sum::<f64>() / y_true.len() as f64;
    let ss_res: f64 = y_true
        .iter()
        .zip(y_pred.iter())
        .map(|(t, p)| (t - p).powi(2))
        .sum();
    let ss_tot: f64 = y_true.iter().map(|t| (t - mean).powi(2)).sum();

    if ss_tot == 0.0 {
        return Ok(if ss_res == 0.0 { 1.0 } else { 0.0 });
    }
    Ok(1.0 - ss_res / ss_tot)
}

pub fn mean_squared_error(y_true: &[f64], y_pred: &[f64]) -> Result<f64> {
    check_inputs(y_true, y_pred)?;
    Ok(y_true
        .iter()
        .zip(y_pred.iter())
        .map(|(t, p)| (t - p).powi(2))
        .sum::<f64>()
        / y_true.len() as f64)
}

pub fn rmse(y_true: &[f64], y_pred: &[f64]) -> Result<f64> {
    Ok(mean_squared_error(y_true, y_pred)?.sqrt())
}

pub fn mae(y_true: &[f64], y_pred: &[f64]) -> Result<f64> {
    check_inputs(y_true, y_pred)?;
    Ok(y_true
        .iter()
        .zip(y_pred.iter())
        .map(|(t, p)| (t - p).abs())
        .sum::<f64>()
        / y_true.len() as f64)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_perfect_prediction() {
        let y = [1.0, 2.0, 3.0];
        let m = RegressionMetrics::compute(&y, &y).unwrap();
        assert_eq!(m.r2, 1.0);
        assert_eq!(m.rmse, 0.0);
        assert_eq!(m.mae, 0.0);
    }

    #[test]
    fn test_known_values() {
        let t = [3.0, -0.5, 2.0, 7.0];
        let p = [2.5, 0.0, 2.0, 8.0];
        // Reference values from the usual textbook example
        assert!((r2_score(&t, &p).unwrap() - 0.948_608_137).abs() < 1e-6);
        assert!((mean_squared_error(&t, &p).unwrap() - 0.375).abs() < 1e-12);
        assert!((mae(&t, &p).unwrap() - 0.5).abs() < 1e-12);
        assert!((rmse(&t, &p).unwrap() - 0.375f64.sqrt()).abs() < 1e-12);
    }

    #[test]
    fn test_mean_prediction_scores_zero() {
        let t = [1.0, 2.0, 3.0];
        let p = [2.0, 2.0, 2.0];
        assert!(r2_score(&t, &p).unwrap().abs() < 1e-12);
    }

    #[test]
    fn test_constant_truth() {
        assert_eq!(r2_score(&[2.0, 2.0], &[2.0, 2.0]).unwrap(), 1.0);
        assert_eq!(r2_score(&[2.0, 2.0], &[2.0, 3.0]).unwrap(), 0.0);
    }

    #[test]
    fn test_invalid_inputs() {
        assert!(r2_score(&[], &[]).is_err());
        assert!(mae(&[1.0, 2.0], &[1.0]).is_err());
    }

    #[test]
    fn test_metrics_mean() {
        let a = RegressionMetrics { r2: 0.8, rmse: 2.0, mae: 1.0 };
        let b = RegressionMetrics { r2: 0.6, rmse: 4.0, mae: 3.0 };
        let m = RegressionMetrics::mean(&[a, b]).unwrap();
        assert!((m.r2 - 0.7).abs() < 1e-12);
        assert_eq!(m.rmse, 3.0);
        assert_eq!(m.mae, 2.0);
        assert!(RegressionMetrics::mean(&[]).is_none());
    }
}
