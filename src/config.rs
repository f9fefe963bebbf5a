//! Project constants and runtime configuration

use std::path::PathBuf;

use serde::Serialize;

use crate::model::{Algorithm, BoostingConfig, ForestConfig, ModelKind};

/// Raw UCI column names mapped to descriptive names
pub const NAMING_MAP: [(&str, &str); 10] = [
    ("X1", "relative_compactness"),
    ("X2", "surface_area"),
    ("X3", "wall_area"),
    ("X4", "roof_area"),
    ("X5", "overall_height"),
    ("X6", "orientation"),
    ("X7", "glazing_area"),
    ("X8", "glazing_area_distribution"),
    ("Y1", "heating_load"),
    ("Y2", "cooling_load"),
];

/// Columns coerced to numeric, imputed and screened for outliers
pub const NUMERIC_COLS: [&str; 11] = [
    "relative_compactness",
    "surface_area",
    "wall_area",
    "roof_area",
    "overall_height",
    "orientation",
    "glazing_area",
    "glazing_area_distribution",
    "heating_load",
    "cooling_load",
    "mixed_type_col",
];

pub const TARGET_COLS: [&str; 2] = ["heating_load", "cooling_load"];

pub const TEST_SIZE: f64 = 0.2;
pub const RANDOM_STATE: u64 = 42;
pub const CV_FOLDS: usize = 5;

pub const RAW_DATA_FILE: &str = "data/raw/energy_efficiency_modified.csv";
pub const PROCESSED_DATA_DIR: &str = "data/processed";
pub const PROCESSED_DATA_FILE: &str = "energy_efficiency_modified.csv";

/// Executable used to version the processed dataset
pub const DVC_PROGRAM: &str = "dvc";

/// Random forest hyperparameters used by the trainer
pub fn forest_config(random_state: u64) -> ForestConfig {
    ForestConfig {
        n_estimators: 600,
        max_depth: Some(12),
        min_samples_split: 4,
        min_samples_leaf: 1,
        max_features: None,
        bootstrap: true,
        random_state,
    }
}

/// Gradient boosting hyperparameters used by the trainer
pub fn boosting_config(random_state: u64) -> BoostingConfig {
    BoostingConfig {
        n_estimators: 300,
        learning_rate: 0.08,
        max_depth: 4,
        min_samples_split: 2,
        min_samples_leaf: 1,
        subsample: 1.0,
        random_state,
    }
}

/// Full configuration of one pipeline run
#[derive(Debug, Clone, Serialize)]
pub struct PipelineConfig {
    pub input: PathBuf,
    pub output_dir: PathBuf,
    pub output_file: String,
    pub targets: Vec<String>,
    pub numeric_columns: Vec<String>,
    pub test_size: f64,
    pub random_state: u64,
    /// 0 disables cross-validation
    pub cv_folds: usize,
    pub models: Vec<Algorithm>,
    pub standardize: bool,
    pub show_eda: bool,
    pub use_dvc: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub report: Option<PathBuf>,
    pub infer_schema_length: usize,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            input: PathBuf::from(RAW_DATA_FILE),
            output_dir: PathBuf::from(PROCESSED_DATA_DIR),
            output_file: PROCESSED_DATA_FILE.to_string(),
            targets: TARGET_COLS.iter().map(|s| s.to_string()).collect(),
            numeric_columns: NUMERIC_COLS.iter().map(|s| s.to_string()).collect(),
            test_size: TEST_SIZE,
            random_state: RANDOM_STATE,
            cv_folds: CV_FOLDS,
            models: Algorithm::ALL.to_vec(),
            standardize: false,
            show_eda: false,
            use_dvc: true,
            report: None,
            infer_schema_length: 10000,
        }
    }
}

impl PipelineConfig {
    /// Model kinds with their hyperparameters, in the configured order
    pub fn model_kinds(&self) -> Vec<ModelKind> {
        self.models
            .iter()
            .map(|algorithm| match algorithm {
                Algorithm::Linear => ModelKind::LinearRegression,
                Algorithm::RandomForest => {
                    ModelKind::RandomForest(forest_config(self.random_state))
                }
                Algorithm::GradientBoosting => {
                    ModelKind::GradientBoosting(boosting_config(self.random_state))
                }
            })
            .collect()
    }

    pub fn output_path(&self) -> PathBuf {
        self.output_dir.join(&self.output_file)
    }
}

/// Naming map as owned pairs
pub fn naming_map() -> Vec<(String, String)> {
    NAMING_MAP
        .iter()
        .map(|(from, to)| (from.to_string(), to.to_string()))
        .collect()
}
