//! IQR-based outlier detection and removal

use std::collections::BTreeSet;

use anyhow::{Context, Result};
use polars::prelude::*;
use serde::Serialize;

use super::numeric::column_values;

/// Multiplier applied to the interquartile range
pub const IQR_FACTOR: f64 = 1.5;

/// Fences computed for one column
#[derive(Debug, Clone, Serialize)]
pub struct ColumnBounds {
    pub column: String,
    pub q1: f64,
    pub q3: f64,
    pub lower: f64,
    pub upper: f64,
    /// Rows of this column outside the fences
    pub outliers: usize,
}

/// Result of outlier screening
#[derive(Debug, Clone, Default, Serialize)]
pub struct OutlierReport {
    /// Positional row indices flagged in any column, sorted and unique
    pub rows: Vec<usize>,
    pub bounds: Vec<ColumnBounds>,
    /// Listed columns that were not in the frame
    pub skipped: Vec<String>,
}

/// Percentile of already sorted values with linear interpolation between
/// closest ranks: `rank = p/100 * (n - 1)`.
pub fn percentile(sorted: &[f64], p: f64) -> f64 {
    if sorted.is_empty() {
        return f64::NAN;
    }
    let rank = (p / 100.0) * (sorted.len() - 1) as f64;
    let lo = rank.floor() as usize;
    let hi = rank.ceil() as usize;
    let frac = rank - lo as f64;
    sorted[lo] + (sorted[hi] - sorted[lo]) * frac
}

/// Flag rows with a value strictly outside `[Q1 - 1.5·IQR, Q3 + 1.5·IQR]` in
/// any listed column. Nulls never flag a row; columns with no valid value are
/// skipped.
pub fn detect_outliers(df: &DataFrame, columns: &[String]) -> Result<OutlierReport> {
    let mut rows = BTreeSet::new();
    let mut report = OutlierReport::default();

    for name in columns {
        if df.column(name).is_err() {
            report.skipped.push(name.clone());
            continue;
        }

        let values = column_values(df, name)?;
        let mut valid: Vec<f64> = values.iter().flatten().copied().collect();
        if valid.is_empty() {
            continue;
        }
        valid.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));

        let q1 = percentile(&valid, 25.0);
        let q3 = percentile(&valid, 75.0);
        let iqr = q3 - q1;
        let lower = q1 - IQR_FACTOR * iqr;
        let upper = q3 + IQR_FACTOR * iqr;

        let mut count = 0;
        for (idx, value) in values.iter().enumerate() {
            if let Some(v) = value {
                if *v < lower || *v > upper {
                    rows.insert(idx);
                    count += 1;
                }
            }
        }

        report.bounds.push(ColumnBounds {
            column: name.clone(),
            q1,
            q3,
            lower,
            upper,
            outliers: count,
        });
    }

    report.rows = rows.into_iter().collect();
    Ok(report)
}

/// Drop the given positional rows
pub fn remove_outliers(df: &DataFrame, rows: &[usize]) -> Result<DataFrame> {
    if rows.is_empty() {
        return Ok(df.clone());
    }
    let drop: BTreeSet<usize> = rows.iter().copied().collect();
    let keep: Vec<bool> = (0..df.height()).map(|i| !drop.contains(&i)).collect();
    let mask = BooleanChunked::from_slice("keep".into(), &keep);
    df.filter(&mask).context("Failed to drop outlier rows")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_percentile_linear_interpolation() {
        let v = [1.0, 2.0, 3.0, 4.0];
        assert_eq!(percentile(&v, 0.0), 1.0);
        assert_eq!(percentile(&v, 100.0), 4.0);
        assert!((percentile(&v, 25.0) - 1.75).abs() < 1e-12);
        assert!((percentile(&v, 50.0) - 2.5).abs() < 1e-12);
        assert!((percentile(&v, 75.0) - 3.25).abs() < 1e-12);
    }

    #[test]
    fn test_percentile_single_value() {
        assert_eq!(percentile(&[7.0], 25.0), 7.0);
        assert!(percentile(&[], 50.0).is_nan());
    }
}
