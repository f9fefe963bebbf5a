//! Command-line argument definitions using clap

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::config::{
    PipelineConfig, CV_FOLDS, NUMERIC_COLS, PROCESSED_DATA_DIR, PROCESSED_DATA_FILE,
    RAW_DATA_FILE, RANDOM_STATE, TEST_SIZE,
};
use crate::model::Algorithm;

/// eneff - Predict building heating and cooling load from energy efficiency data
#[derive(Parser, Debug)]
#[command(name = "eneff")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Input file path (CSV or Parquet)
    #[arg(short, long, default_value = RAW_DATA_FILE)]
    pub input: PathBuf,

    /// Directory the cleansed dataset is written to
    #[arg(short, long, default_value = PROCESSED_DATA_DIR)]
    pub output_dir: PathBuf,

    /// File name of the cleansed dataset (CSV)
    #[arg(long, default_value = PROCESSED_DATA_FILE)]
    pub output_file: String,

    /// Target columns (comma-separated), predicted jointly
    #[arg(
        short,
        long,
        value_delimiter = ',',
        default_value = "heating_load,cooling_load"
    )]
    pub targets: Vec<String>,

    /// Fraction of rows held out for testing, in (0, 1)
    #[arg(long, default_value_t = TEST_SIZE, value_parser = validate_test_size)]
    pub test_size: f64,

    /// Seed for the split, cross-validation folds and the tree ensembles
    #[arg(long, default_value_t = RANDOM_STATE)]
    pub random_state: u64,

    /// Cross-validation folds on the training split. 0 disables cross-validation.
    #[arg(long, default_value_t = CV_FOLDS, value_parser = validate_cv_folds)]
    pub cv_folds: usize,

    /// Models to train (comma-separated)
    #[arg(
        long,
        value_enum,
        value_delimiter = ',',
        default_value = "linear,random-forest,gradient-boosting"
    )]
    pub models: Vec<Algorithm>,

    /// Z-score the numeric columns after outlier removal
    #[arg(long, default_value = "false")]
    pub standardize: bool,

    /// Render histograms, boxplots and the correlation heatmap before and after cleansing
    #[arg(long, default_value = "false")]
    pub eda: bool,

    /// Skip versioning the cleansed dataset with `dvc add`
    #[arg(long, default_value = "false")]
    pub no_dvc: bool,

    /// Write a JSON evaluation report to this path
    #[arg(long)]
    pub report: Option<PathBuf>,

    /// Number of rows to use for schema inference (CSV only).
    /// Use 0 for full table scan.
    #[arg(long, default_value = "10000")]
    pub infer_schema_length: usize,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Load a dataset, apply the column naming map and print an overview
    Inspect {
        /// Input file path (CSV or Parquet)
        input: PathBuf,

        /// Also render histograms, boxplots and the correlation heatmap
        #[arg(long, default_value = "false")]
        plots: bool,

        /// Number of rows to use for schema inference (CSV only)
        #[arg(long, default_value = "10000")]
        infer_schema_length: usize,
    },
}

impl Cli {
    /// Runtime configuration of the main pipeline
    pub fn to_config(&self) -> PipelineConfig {
        let mut models = Vec::with_capacity(self.models.len());
        for model in &self.models {
            if !models.contains(model) {
                models.push(*model);
            }
        }

        PipelineConfig {
            input: self.input.clone(),
            output_dir: self.output_dir.clone(),
            output_file: self.output_file.clone(),
            targets: self.targets.clone(),
            numeric_columns: NUMERIC_COLS.iter().map(|s| s.to_string()).collect(),
            test_size: self.test_size,
            random_state: self.random_state,
            cv_folds: self.cv_folds,
            models,
            standardize: self.standardize,
            show_eda: self.eda,
            use_dvc: !self.no_dvc,
            report: self.report.clone(),
            infer_schema_length: self.infer_schema_length,
        }
    }
}

/// Validator for test_size: open interval (0, 1)
fn validate_test_size(s: &str) -> Result<f64, String> {
    let value: f64 = s
        .parse()
        .map_err(|_| format!("'{}' is not a valid number", s))?;

    if value > 0.0 && value < 1.0 {
        Ok(value)
    } else {
        Err(format!(
            "test_size must be strictly between 0.0 and 1.0, got {}",
            value
        ))
    }
}

/// Validator for cv_folds: 0 (disabled) or at least 2
fn validate_cv_folds(s: &str) -> Result<usize, String> {
    let value: usize = s
        .parse()
        .map_err(|_| format!("'{}' is not a valid fold count", s))?;

    if value == 1 {
        Err("cv_folds must be 0 (disabled) or at least 2, got 1".to_string())
    } else {
        Ok(value)
    }
}
