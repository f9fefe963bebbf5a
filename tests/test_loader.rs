//! Tests for dataset loading, renaming, saving and DVC tracking

mod common;

use common::{
    assert_has_columns, assert_shape, create_energy_dataframe, create_raw_energy_dataframe,
    create_temp_csv, create_temp_parquet,
};
use eneff::config::naming_map;
use eneff::pipeline::{
    get_column_names, load_dataset, load_renamed, rename_columns, save_dataset, track_with_dvc,
};
use polars::prelude::*;
use tempfile::TempDir;

#[test]
fn test_load_csv() {
    let mut df = create_raw_energy_dataframe(20);
    let (_dir, path) = create_temp_csv(&mut df);

    let loaded = load_dataset(&path, 10000).unwrap();
    assert_shape(&loaded, 20, 11);
    assert_has_columns(&loaded, &["X1", "Y2", "mixed_type_col"]);
}

#[test]
fn test_load_parquet() {
    let mut df = create_energy_dataframe(15);
    let (_dir, path) = create_temp_parquet(&mut df);

    let loaded = load_dataset(&path, 10000).unwrap();
    assert_shape(&loaded, 15, 10);
}

#[test]
fn test_load_unsupported_format() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("data.xlsx");
    std::fs::write(&path, "not a dataset").unwrap();

    let err = load_dataset(&path, 10000).unwrap_err();
    assert!(err.to_string().contains("Unsupported file format"));
}

#[test]
fn test_load_missing_file_is_error() {
    let dir = TempDir::new().unwrap();
    assert!(load_dataset(&dir.path().join("absent.csv"), 10000).is_err());
}

#[test]
fn test_get_column_names_from_schema() {
    let mut df = create_raw_energy_dataframe(5);
    let (_dir, path) = create_temp_csv(&mut df);

    let columns = get_column_names(&path).unwrap();
    assert_eq!(columns.len(), 11);
    assert_eq!(columns[0], "X1");
    assert_eq!(columns[10], "mixed_type_col");
}

#[test]
fn test_rename_columns_applies_naming_map() {
    let df = create_raw_energy_dataframe(5);
    let renamed = rename_columns(df, &naming_map()).unwrap();

    assert_has_columns(
        &renamed,
        &[
            "relative_compactness",
            "glazing_area_distribution",
            "heating_load",
            "cooling_load",
            "mixed_type_col",
        ],
    );
    assert!(renamed.column("X1").is_err());
}

#[test]
fn test_rename_columns_ignores_absent_keys() {
    let df = df! {
        "X1" => [1.0f64, 2.0],
        "other" => [3.0f64, 4.0],
    }
    .unwrap();
    let renamed = rename_columns(df, &naming_map()).unwrap();

    let names: Vec<String> = renamed
        .get_column_names()
        .iter()
        .map(|s| s.to_string())
        .collect();
    assert_eq!(names, vec!["relative_compactness", "other"]);
}

#[test]
fn test_load_renamed() {
    let mut df = create_raw_energy_dataframe(8);
    let (_dir, path) = create_temp_csv(&mut df);

    let loaded = load_renamed(&path, 10000, &naming_map()).unwrap();
    assert_has_columns(&loaded, &["surface_area", "cooling_load"]);
}

#[test]
fn test_save_dataset_creates_directory() {
    let dir = TempDir::new().unwrap();
    let out_dir = dir.path().join("data").join("processed");
    let mut df = create_energy_dataframe(12);

    let path = save_dataset(&mut df, &out_dir, "clean.csv").unwrap();

    assert_eq!(path, out_dir.join("clean.csv"));
    assert!(path.exists());

    let reloaded = load_dataset(&path, 10000).unwrap();
    // no index column is written
    assert_shape(&reloaded, 12, 10);
    let header = std::fs::read_to_string(&path).unwrap();
    assert!(header.starts_with("relative_compactness,surface_area"));
}

#[test]
fn test_track_with_missing_program_is_error() {
    let dir = TempDir::new().unwrap();
    let err = track_with_dvc("eneff-definitely-not-a-program", &dir.path().join("x.csv"))
        .unwrap_err();
    assert!(err.to_string().contains("Failed to launch"));
}

#[cfg(unix)]
#[test]
fn test_track_with_exit_status() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("x.csv");

    assert!(track_with_dvc("true", &path).is_ok());

    let err = track_with_dvc("false", &path).unwrap_err();
    assert!(err.to_string().contains("exited with"));
}
