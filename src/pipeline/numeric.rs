//! Numeric type coercion

use anyhow::{Context, Result};
use polars::prelude::*;

/// Coerce each listed column to Float64.
///
/// Values that cannot be parsed become null, and so does NaN, so that missing
/// data has a single representation downstream. Listed columns that are not in
/// the frame are skipped and returned.
pub fn convert_numeric(df: &mut DataFrame, columns: &[String]) -> Result<Vec<String>> {
    let mut skipped = Vec::new();

    for name in columns {
        let Ok(column) = df.column(name) else {
            skipped.push(name.clone());
            continue;
        };

        let casted = cast_to_f64(column)
            .with_context(|| format!("Failed to cast column '{}' to Float64", name))?;
        let values: Float64Chunked = casted
            .f64()
            .with_context(|| format!("Column '{}' is not Float64 after cast", name))?
            .iter()
            .map(|v| v.filter(|x| !x.is_nan()))
            .collect();

        df.with_column(values.with_name(name.as_str().into()).into_series())
            .with_context(|| format!("Failed to replace column '{}'", name))?;
    }

    Ok(skipped)
}

/// Total number of nulls across all columns
pub fn count_missing(df: &DataFrame) -> usize {
    df.get_columns().iter().map(|c| c.null_count()).sum()
}

/// Null count per column, in column order
pub fn missing_per_column(df: &DataFrame) -> Vec<(String, usize)> {
    df.get_columns()
        .iter()
        .map(|c| (c.name().to_string(), c.null_count()))
        .collect()
}

/// Extract a column as `Option<f64>` values, casting when needed
pub fn column_values(df: &DataFrame, name: &str) -> Result<Vec<Option<f64>>> {
    let column = df
        .column(name)
        .with_context(|| format!("Column '{}' not found", name))?;
    let casted = cast_to_f64(column)
        .with_context(|| format!("Column '{}' cannot be cast to Float64", name))?;
    Ok(casted.f64()?.iter().collect())
}

/// Non-strict cast to Float64. String values are trimmed first so padded
/// numbers like `" 12.5"` still parse; anything else unparseable becomes null.
fn cast_to_f64(column: &Column) -> PolarsResult<Series> {
    let series = column.as_materialized_series();
    if series.dtype() != &DataType::String {
        return series.cast(&DataType::Float64);
    }
    let trimmed: StringChunked = series.str()?.iter().map(|v| v.map(str::trim)).collect();
    trimmed
        .with_name(series.name().clone())
        .into_series()
        .cast(&DataType::Float64)
}

/// Names of the numeric columns of the frame
pub fn numeric_column_names(df: &DataFrame) -> Vec<String> {
    df.get_columns()
        .iter()
        .filter(|col| col.dtype().is_primitive_numeric())
        .map(|col| col.name().to_string())
        .collect()
}
