//! Dataset loading, column renaming, CSV export and DVC tracking

use std::path::{Path, PathBuf};
use std::process::Command;

use anyhow::{Context, Result};
use polars::prelude::*;

/// Load a dataset from a file (CSV or Parquet based on extension)
pub fn load_dataset(path: &Path, infer_schema_length: usize) -> Result<DataFrame> {
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_lowercase();

    // 0 means full table scan
    let schema_length = if infer_schema_length == 0 {
        None
    } else {
        Some(infer_schema_length)
    };

    let lf = match extension.as_str() {
        "csv" => LazyCsvReader::new(path)
            .with_infer_schema_length(schema_length)
            .finish()
            .with_context(|| format!("Failed to load CSV file: {}", path.display()))?,
        "parquet" => LazyFrame::scan_parquet(path, Default::default())
            .with_context(|| format!("Failed to load Parquet file: {}", path.display()))?,
        _ => anyhow::bail!(
            "Unsupported file format: {}. Supported formats: csv, parquet",
            extension
        ),
    };

    lf.collect()
        .with_context(|| format!("Failed to read dataset: {}", path.display()))
}

/// Get column names from the file schema without reading the data
pub fn get_column_names(path: &Path) -> Result<Vec<String>> {
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_lowercase();

    let mut lf = match extension.as_str() {
        "csv" => LazyCsvReader::new(path)
            .finish()
            .with_context(|| format!("Failed to load CSV file: {}", path.display()))?,
        "parquet" => LazyFrame::scan_parquet(path, Default::default())
            .with_context(|| format!("Failed to load Parquet file: {}", path.display()))?,
        _ => anyhow::bail!(
            "Unsupported file format: {}. Supported formats: csv, parquet",
            extension
        ),
    };

    let schema = lf.collect_schema()?;
    Ok(schema.iter_names().map(|s| s.to_string()).collect())
}

/// Rename columns present in `naming_map`. Map entries without a matching
/// column are ignored, unmapped columns keep their name.
pub fn rename_columns(mut df: DataFrame, naming_map: &[(String, String)]) -> Result<DataFrame> {
    let existing: Vec<String> = df
        .get_column_names()
        .iter()
        .map(|s| s.to_string())
        .collect();

    for (from, to) in naming_map {
        if existing.contains(from) {
            df.rename(from, to.as_str().into())
                .with_context(|| format!("Failed to rename column '{}' to '{}'", from, to))?;
        }
    }

    Ok(df)
}

/// Load a dataset and apply the naming map
pub fn load_renamed(
    path: &Path,
    infer_schema_length: usize,
    naming_map: &[(String, String)],
) -> Result<DataFrame> {
    let df = load_dataset(path, infer_schema_length)?;
    rename_columns(df, naming_map)
}

/// Write `df` as CSV (no index column) into `dir/file_name`, creating `dir`.
/// Returns the written path.
pub fn save_dataset(df: &mut DataFrame, dir: &Path, file_name: &str) -> Result<PathBuf> {
    std::fs::create_dir_all(dir)
        .with_context(|| format!("Failed to create output directory: {}", dir.display()))?;

    let path = dir.join(file_name);
    let mut file = std::fs::File::create(&path)
        .with_context(|| format!("Failed to create output file: {}", path.display()))?;
    CsvWriter::new(&mut file)
        .include_header(true)
        .finish(df)
        .with_context(|| format!("Failed to write CSV file: {}", path.display()))?;

    Ok(path)
}

/// Run `<program> add <path>`. A missing executable or a non-zero exit is an error.
pub fn track_with_dvc(program: &str, path: &Path) -> Result<()> {
    let status = Command::new(program)
        .arg("add")
        .arg(path)
        .status()
        .with_context(|| format!("Failed to launch '{} add {}'", program, path.display()))?;

    if !status.success() {
        anyhow::bail!(
            "'{} add {}' exited with {}",
            program,
            path.display(),
            status
        );
    }

    Ok(())
}
