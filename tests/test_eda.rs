//! Tests for the exploratory data analysis views

mod common;

use common::{assert_close, create_dirty_dataframe, create_energy_dataframe};
use eneff::report::eda::{box_summary, column_info, histogram, HISTOGRAM_BINS};
use eneff::report::{
    correlation_matrix, describe, overview, plot_boxplots, plot_correlation_heatmap,
    plot_histograms,
};
use polars::prelude::*;

#[test]
fn test_describe_numeric_columns_only() {
    let df = create_dirty_dataframe();
    let stats = describe(&df).unwrap();

    // "label" is not numeric and "c" has no values
    let columns: Vec<&str> = stats.iter().map(|s| s.column.as_str()).collect();
    assert_eq!(columns, vec!["a", "b"]);

    let a = &stats[0];
    assert_eq!(a.count, 7);
    assert_eq!(a.min, 1.0);
    assert_eq!(a.max, 100.0);
    assert_eq!(a.median, 3.0);
    assert_close(a.q25, 2.25, 1e-12);
}

#[test]
fn test_column_info_counts_non_null() {
    let df = create_dirty_dataframe();
    let info = column_info(&df);
    assert_eq!(info.len(), 4);
    assert_eq!(info[0].non_null, 7);
    assert_eq!(info[2].non_null, 0);
    assert_eq!(info[3].dtype, "str");
}

#[test]
fn test_correlation_matrix_known_relationships() {
    let df = df! {
        "a" => [1.0f64, 2.0, 3.0, 4.0, 5.0, 6.0],
        "b" => [2.0f64, 4.0, 6.0, 8.0, 10.0, 12.0],
        "c" => [6.0f64, 5.0, 4.0, 3.0, 2.0, 1.0],
        "k" => [1.0f64; 6],
    }
    .unwrap();

    let (names, corr) = correlation_matrix(&df).unwrap();
    assert_eq!(names, vec!["a", "b", "c", "k"]);
    assert_close(corr[(0, 1)], 1.0, 1e-12);
    assert_close(corr[(0, 2)], -1.0, 1e-12);
    assert_close(corr[(1, 0)], corr[(0, 1)], 1e-15);
    assert!(corr[(0, 3)].is_nan(), "constant column has no correlation");
}

#[test]
fn test_correlation_matrix_pairwise_with_nulls() {
    let df = df! {
        "a" => [Some(1.0f64), Some(2.0), None, Some(4.0), Some(5.0)],
        "b" => [Some(2.0f64), Some(4.0), Some(-50.0), Some(8.0), Some(10.0)],
    }
    .unwrap();

    let (_, corr) = correlation_matrix(&df).unwrap();
    assert_close(corr[(0, 1)], 1.0, 1e-12);
    assert_close(corr[(1, 1)], 1.0, 1e-12);
}

#[test]
fn test_histogram_uses_fifteen_bins() {
    let values: Vec<Option<f64>> = (0..100).map(|i| Some(i as f64)).collect();
    let bins = histogram(&values, HISTOGRAM_BINS);
    assert_eq!(bins.len(), 15);
    assert_eq!(bins.iter().map(|b| b.count).sum::<usize>(), 100);
}

#[test]
fn test_box_summary_ignores_nulls() {
    let summary = box_summary(&[Some(1.0), None, Some(2.0), Some(3.0)]).unwrap();
    assert_eq!(summary.median, 2.0);
    assert_eq!(summary.outliers, 0);
    assert!(box_summary(&[None]).is_none());
}

#[test]
fn test_views_render_without_error() {
    let df = create_energy_dataframe(30);
    overview(&df).unwrap();
    plot_histograms(&df).unwrap();
    plot_boxplots(&df).unwrap();
    plot_correlation_heatmap(&df).unwrap();

    let dirty = create_dirty_dataframe();
    overview(&dirty).unwrap();
    plot_histograms(&dirty).unwrap();
    plot_correlation_heatmap(&dirty).unwrap();
}
