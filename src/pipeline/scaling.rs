//! In-place standardization of DataFrame columns

use anyhow::{Context, Result};
use polars::prelude::*;

use super::numeric::column_values;
use crate::model::scaler::{mean_and_std, StandardScaler};

/// Z-score the listed columns in place and return the fitted scaler.
///
/// Statistics ignore nulls; nulls stay null. Missing columns are an error
/// because the caller asked for them explicitly.
pub fn standardize(df: &mut DataFrame, columns: &[String]) -> Result<StandardScaler> {
    let mut means = Vec::with_capacity(columns.len());
    let mut scales = Vec::with_capacity(columns.len());
    let mut all_values = Vec::with_capacity(columns.len());

    for name in columns {
        let values = column_values(df, name)?;
        let valid: Vec<f64> = values.iter().flatten().copied().collect();
        let (mean, std) = mean_and_std(&valid);
        means.push(mean);
        scales.push(std);
        all_values.push(values);
    }

    let scaler = StandardScaler::from_stats(means, scales);

    for (j, (name, values)) in columns.iter().zip(all_values).enumerate() {
        let scaled: Float64Chunked = values
            .iter()
            .map(|v| v.map(|x| scaler.transform_value(j, x)))
            .collect();
        df.with_column(scaled.with_name(name.as_str().into()).into_series())
            .with_context(|| format!("Failed to replace column '{}'", name))?;
    }

    Ok(scaler)
}
