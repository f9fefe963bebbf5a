//! Tests for the regressors, the multi-output wrapper and the scaling pipeline

mod common;

use common::assert_close;
use eneff::model::{
    BoostingConfig, ForestConfig, GradientBoostingRegressor, LinearRegression, Matrix,
    ModelError, ModelKind, MultiOutputRegressor, RandomForestRegressor, RegressionPipeline,
    Regressor,
};
use eneff::pipeline::r2_score;

/// y = 3 + 2·x0 - x1 on a small grid
fn linear_problem() -> (Matrix, Vec<f64>) {
    let rows: Vec<Vec<f64>> = (0..40)
        .map(|i| vec![(i % 8) as f64, (i / 8) as f64 * 1.5])
        .collect();
    let y = rows.iter().map(|r| 3.0 + 2.0 * r[0] - r[1]).collect();
    (Matrix::from_rows(&rows).unwrap(), y)
}

/// Step function on x0 that trees capture and lines don't
fn step_problem() -> (Matrix, Vec<f64>) {
    let rows: Vec<Vec<f64>> = (0..60).map(|i| vec![i as f64, (i % 5) as f64]).collect();
    let y = rows
        .iter()
        .map(|r| if r[0] < 20.0 { 1.0 } else if r[0] < 40.0 { 10.0 } else { 4.0 })
        .collect();
    (Matrix::from_rows(&rows).unwrap(), y)
}

fn small_forest(seed: u64) -> ForestConfig {
    ForestConfig {
        n_estimators: 25,
        max_depth: Some(6),
        random_state: seed,
        ..Default::default()
    }
}

#[test]
fn test_linear_regression_recovers_coefficients() {
    let (x, y) = linear_problem();
    let mut model = LinearRegression::new();
    model.fit(&x, &y).unwrap();

    let coef = model.coefficients().unwrap();
    assert_close(coef[0], 2.0, 1e-6);
    assert_close(coef[1], -1.0, 1e-6);
    assert_close(model.intercept(), 3.0, 1e-6);

    let pred = model.predict(&x).unwrap();
    assert_close(r2_score(&y, &pred).unwrap(), 1.0, 1e-9);
}

#[test]
fn test_linear_regression_requires_fit() {
    let (x, _) = linear_problem();
    let model = LinearRegression::new();
    assert!(matches!(model.predict(&x), Err(ModelError::NotFitted { .. })));
}

#[test]
fn test_random_forest_is_deterministic_for_seed() {
    let (x, y) = step_problem();

    let mut a = RandomForestRegressor::new(small_forest(42));
    let mut b = RandomForestRegressor::new(small_forest(42));
    a.fit(&x, &y).unwrap();
    b.fit(&x, &y).unwrap();

    assert_eq!(a.n_trees(), 25);
    assert_eq!(a.predict(&x).unwrap(), b.predict(&x).unwrap());
}

#[test]
fn test_random_forest_fits_step_function() {
    let (x, y) = step_problem();
    let mut forest = RandomForestRegressor::new(small_forest(1));
    forest.fit(&x, &y).unwrap();

    let pred = forest.predict(&x).unwrap();
    assert!(r2_score(&y, &pred).unwrap() > 0.9);
}

#[test]
fn test_gradient_boosting_beats_mean() {
    let (x, y) = step_problem();
    let mut gb = GradientBoostingRegressor::new(BoostingConfig {
        n_estimators: 50,
        learning_rate: 0.1,
        max_depth: 3,
        ..Default::default()
    });
    gb.fit(&x, &y).unwrap();

    assert_eq!(gb.n_stages(), 50);
    let losses = gb.train_loss();
    assert!(losses.last().unwrap() < losses.first().unwrap());
    let pred = gb.predict(&x).unwrap();
    assert!(r2_score(&y, &pred).unwrap() > 0.95);
}

#[test]
fn test_gradient_boosting_rejects_bad_learning_rate() {
    let (x, y) = step_problem();
    let mut gb = GradientBoostingRegressor::new(BoostingConfig {
        learning_rate: 0.0,
        ..Default::default()
    });
    assert!(matches!(
        gb.fit(&x, &y),
        Err(ModelError::InvalidParameter { .. })
    ));
}

#[test]
fn test_multi_output_fits_one_estimator_per_target() {
    let (x, y0) = linear_problem();
    let y1: Vec<f64> = y0.iter().map(|v| -0.5 * v + 1.0).collect();
    let y = Matrix::from_columns(&[y0.clone(), y1.clone()]).unwrap();

    let mut model = MultiOutputRegressor::new(ModelKind::LinearRegression);
    model.fit(&x, &y).unwrap();
    assert_eq!(model.n_outputs(), 2);

    let pred = model.predict(&x).unwrap();
    assert_eq!(pred.shape(), (40, 2));
    assert_close(r2_score(&y0, &pred.column(0)).unwrap(), 1.0, 1e-9);
    assert_close(r2_score(&y1, &pred.column(1)).unwrap(), 1.0, 1e-9);
}

#[test]
fn test_multi_output_row_mismatch() {
    let (x, y0) = linear_problem();
    let y = Matrix::from_columns(&[y0[..10].to_vec()]).unwrap();
    let mut model = MultiOutputRegressor::new(ModelKind::LinearRegression);
    assert!(matches!(
        model.fit(&x, &y),
        Err(ModelError::ShapeMismatch { .. })
    ));
}

#[test]
fn test_pipeline_scaling_is_invisible_to_linear_fit() {
    let (x, y0) = linear_problem();
    let y = Matrix::from_columns(&[y0.clone()]).unwrap();

    let mut pipeline = RegressionPipeline::new(ModelKind::LinearRegression);
    pipeline.fit(&x, &y).unwrap();
    assert_eq!(pipeline.name(), "LinearRegression");

    // unseen rows go through the scaler fitted on training rows
    let unseen = Matrix::from_rows(&[vec![10.0, 0.0], vec![0.0, 20.0]]).unwrap();
    let pred = pipeline.predict(&unseen).unwrap();
    assert_close(pred[(0, 0)], 23.0, 1e-6);
    assert_close(pred[(1, 0)], -17.0, 1e-6);
}

#[test]
fn test_model_kind_builds_named_estimators() {
    assert_eq!(ModelKind::LinearRegression.build().name(), "LinearRegression");
    assert_eq!(
        ModelKind::RandomForest(ForestConfig::default()).build().name(),
        "RandomForest"
    );
    assert_eq!(
        ModelKind::GradientBoosting(BoostingConfig::default()).to_string(),
        "GradientBoosting"
    );
}
