//! Shared test utilities and fixture generators

#![allow(dead_code)]

use polars::prelude::*;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use std::path::PathBuf;
use tempfile::TempDir;

/// Feature and target values of one synthetic building
struct Building {
    compactness: f64,
    surface: f64,
    wall: f64,
    roof: f64,
    height: f64,
    orientation: f64,
    glazing: f64,
    distribution: f64,
    heating: f64,
    cooling: f64,
}

fn synthetic_buildings(rows: usize, seed: u64) -> Vec<Building> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    (0..rows)
        .map(|i| {
            let compactness = 0.62 + 0.04 * (i % 10) as f64;
            let surface = 514.5 + 24.5 * (i % 9) as f64;
            let wall = 245.0 + 24.5 * (i % 7) as f64;
            let roof = 110.25 + 36.75 * (i % 4) as f64;
            let height = if i % 2 == 0 { 3.5 } else { 7.0 };
            let orientation = (2 + (i / 3) % 4) as f64;
            let glazing = [0.0, 0.1, 0.25, 0.4][(i / 4) % 4];
            let distribution = (i % 6) as f64;
            let heating = 4.0 + 3.0 * height + 20.0 * glazing + 0.01 * surface
                + rng.gen_range(-0.5..0.5);
            let cooling = 8.0 + 2.5 * height + 15.0 * glazing + 0.02 * wall
                + rng.gen_range(-0.5..0.5);
            Building {
                compactness,
                surface,
                wall,
                roof,
                height,
                orientation,
                glazing,
                distribution,
                heating,
                cooling,
            }
        })
        .collect()
}

fn mixed_values(rows: usize) -> Vec<String> {
    (0..rows)
        .map(|i| {
            if i % 7 == 3 {
                "n/a".to_string()
            } else {
                format!("{}", 10 + i % 5)
            }
        })
        .collect()
}

/// Raw UCI-style energy efficiency frame: `X1..X8`, `Y1`, `Y2` plus a
/// `mixed_type_col` of numeric strings with unparseable entries.
pub fn create_raw_energy_dataframe(rows: usize) -> DataFrame {
    let b = synthetic_buildings(rows, 7);
    let col = |name: &str, f: fn(&Building) -> f64| -> Column {
        Column::new(name.into(), b.iter().map(f).collect::<Vec<f64>>())
    };
    DataFrame::new(vec![
        col("X1", |b| b.compactness),
        col("X2", |b| b.surface),
        col("X3", |b| b.wall),
        col("X4", |b| b.roof),
        col("X5", |b| b.height),
        col("X6", |b| b.orientation),
        col("X7", |b| b.glazing),
        col("X8", |b| b.distribution),
        col("Y1", |b| b.heating),
        col("Y2", |b| b.cooling),
        Column::new("mixed_type_col".into(), mixed_values(rows)),
    ])
    .unwrap()
}

/// Same data with descriptive column names, all numeric, no missing values
pub fn create_energy_dataframe(rows: usize) -> DataFrame {
    let b = synthetic_buildings(rows, 7);
    let col = |name: &str, f: fn(&Building) -> f64| -> Column {
        Column::new(name.into(), b.iter().map(f).collect::<Vec<f64>>())
    };
    DataFrame::new(vec![
        col("relative_compactness", |b| b.compactness),
        col("surface_area", |b| b.surface),
        col("wall_area", |b| b.wall),
        col("roof_area", |b| b.roof),
        col("overall_height", |b| b.height),
        col("orientation", |b| b.orientation),
        col("glazing_area", |b| b.glazing),
        col("glazing_area_distribution", |b| b.distribution),
        col("heating_load", |b| b.heating),
        col("cooling_load", |b| b.cooling),
    ])
    .unwrap()
}

/// Small frame with missing values and one obvious outlier in row 5
pub fn create_dirty_dataframe() -> DataFrame {
    df! {
        "a" => [
            Some(1.0f64), Some(2.0), None, Some(4.0), Some(5.0), Some(100.0), Some(3.0), Some(2.5),
        ],
        "b" => [
            Some(10.0f64), None, Some(12.0), Some(11.0), None, Some(13.0), Some(12.5), Some(11.5),
        ],
        "c" => [None::<f64>, None, None, None, None, None, None, None],
        "label" => ["x", "y", "x", "y", "x", "y", "x", "y"],
    }
    .unwrap()
}

pub fn names(cols: &[&str]) -> Vec<String> {
    cols.iter().map(|s| s.to_string()).collect()
}

/// Create a temporary directory with a test CSV file
pub fn create_temp_csv(df: &mut DataFrame) -> (TempDir, PathBuf) {
    let temp_dir = TempDir::new().unwrap();
    let csv_path = temp_dir.path().join("test_data.csv");

    let mut file = std::fs::File::create(&csv_path).unwrap();
    CsvWriter::new(&mut file).finish(df).unwrap();

    (temp_dir, csv_path)
}

/// Create a temporary directory with a test Parquet file
pub fn create_temp_parquet(df: &mut DataFrame) -> (TempDir, PathBuf) {
    let temp_dir = TempDir::new().unwrap();
    let parquet_path = temp_dir.path().join("test_data.parquet");

    let file = std::fs::File::create(&parquet_path).unwrap();
    ParquetWriter::new(file).finish(df).unwrap();

    (temp_dir, parquet_path)
}

/// Assert that a DataFrame has expected shape
pub fn assert_shape(df: &DataFrame, expected_rows: usize, expected_cols: usize) {
    let (rows, cols) = df.shape();
    assert_eq!(
        rows, expected_rows,
        "Row count mismatch: expected {}, got {}",
        expected_rows, rows
    );
    assert_eq!(
        cols, expected_cols,
        "Column count mismatch: expected {}, got {}",
        expected_cols, cols
    );
}

/// Assert that a DataFrame contains specific columns
pub fn assert_has_columns(df: &DataFrame, expected_cols: &[&str]) {
    let actual_cols: Vec<String> = df.get_column_names().iter().map(|s| s.to_string()).collect();
    for col in expected_cols {
        assert!(
            actual_cols.contains(&col.to_string()),
            "Missing expected column: '{}'. Actual columns: {:?}",
            col,
            actual_cols
        );
    }
}

pub fn assert_close(actual: f64, expected: f64, tol: f64) {
    assert!(
        (actual - expected).abs() <= tol,
        "Expected {} within {}, got {}",
        expected,
        tol,
        actual
    );
}
