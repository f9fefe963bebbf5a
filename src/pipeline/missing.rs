//! Median imputation of missing values

use anyhow::{Context, Result};
use polars::prelude::*;
use serde::Serialize;

use super::numeric::{column_values, count_missing};
use super::outliers::percentile;

/// Outcome of an imputation pass
#[derive(Debug, Clone, Default, Serialize)]
pub struct ImputationReport {
    pub missing_before: usize,
    pub missing_after: usize,
    /// Median used per column (only columns that had a median)
    pub medians: Vec<(String, f64)>,
    /// Listed columns that were not in the frame
    pub skipped: Vec<String>,
}

/// Median of the non-null values, `None` if there are none
pub fn median(values: &[Option<f64>]) -> Option<f64> {
    let mut valid: Vec<f64> = values.iter().flatten().copied().collect();
    if valid.is_empty() {
        return None;
    }
    valid.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
    Some(percentile(&valid, 50.0))
}

/// Fill nulls of each listed column with that column's median.
///
/// Columns without any non-null value are left untouched.
pub fn impute_missing(df: &mut DataFrame, columns: &[String]) -> Result<ImputationReport> {
    let mut report = ImputationReport {
        missing_before: count_missing(df),
        ..Default::default()
    };

    for name in columns {
        if df.column(name).is_err() {
            report.skipped.push(name.clone());
            continue;
        }

        let values = column_values(df, name)?;
        let Some(fill) = median(&values) else {
            continue;
        };

        let filled: Float64Chunked = values.iter().map(|v| Some(v.unwrap_or(fill))).collect();
        df.with_column(filled.with_name(name.as_str().into()).into_series())
            .with_context(|| format!("Failed to replace column '{}'", name))?;
        report.medians.push((name.clone(), fill));
    }

    report.missing_after = count_missing(df);
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_median_odd_and_even() {
        assert_eq!(median(&[Some(3.0), Some(1.0), Some(2.0)]), Some(2.0));
        assert_eq!(median(&[Some(4.0), None, Some(1.0), Some(2.0), Some(3.0)]), Some(2.5));
    }

    #[test]
    fn test_median_all_missing() {
        assert_eq!(median(&[None, None]), None);
        assert_eq!(median(&[]), None);
    }
}
