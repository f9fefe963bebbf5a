//! JSON export of the evaluation results

use std::path::Path;

use anyhow::{Context, Result};
use chrono::Utc;
use serde::Serialize;

use crate::config::PipelineConfig;
use crate::model::Algorithm;
use crate::pipeline::{CvSummary, EvaluationRow, RegressionMetrics};

/// Metadata about the run
#[derive(Serialize)]
pub struct ReportMetadata {
    /// Timestamp of the run (RFC 3339)
    pub timestamp: String,
    pub eneff_version: String,
    pub input_file: String,
    pub targets: Vec<String>,
    pub test_size: f64,
    pub random_state: u64,
    pub cv_folds: usize,
    pub standardize: bool,
    pub models: Vec<Algorithm>,
}

/// Shape of the data that reached the models
#[derive(Serialize, Debug, Clone, Default)]
pub struct DataSummary {
    pub rows_loaded: usize,
    pub missing_imputed: usize,
    pub outlier_rows_removed: usize,
    pub rows_modeled: usize,
    pub train_rows: usize,
    pub test_rows: usize,
    pub features: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub excluded_columns: Vec<String>,
}

/// Cross-validation result as written to the report
#[derive(Serialize)]
pub struct CvExportEntry {
    pub model: String,
    pub n_splits: usize,
    pub mean: RegressionMetrics,
    pub folds: Vec<RegressionMetrics>,
}

/// Complete evaluation report
#[derive(Serialize)]
pub struct EvaluationReport {
    pub metadata: ReportMetadata,
    pub data: DataSummary,
    pub results: Vec<EvaluationRow>,
    pub cross_validation: Vec<CvExportEntry>,
}

impl EvaluationReport {
    pub fn new(
        config: &PipelineConfig,
        data: DataSummary,
        rows: &[EvaluationRow],
        cv: &[CvSummary],
    ) -> Self {
        Self {
            metadata: ReportMetadata {
                timestamp: Utc::now().to_rfc3339(),
                eneff_version: env!("CARGO_PKG_VERSION").to_string(),
                input_file: config.input.display().to_string(),
                targets: config.targets.clone(),
                test_size: config.test_size,
                random_state: config.random_state,
                cv_folds: config.cv_folds,
                standardize: config.standardize,
                models: config.models.clone(),
            },
            data,
            results: rows.to_vec(),
            cross_validation: cv
                .iter()
                .map(|s| CvExportEntry {
                    model: s.model.clone(),
                    n_splits: s.n_splits,
                    mean: s.mean,
                    folds: s.folds.clone(),
                })
                .collect(),
        }
    }
}

/// Write the evaluation report as pretty JSON, creating parent directories
pub fn export_report(
    output_path: &Path,
    config: &PipelineConfig,
    data: DataSummary,
    rows: &[EvaluationRow],
    cv: &[CvSummary],
) -> Result<()> {
    let report = EvaluationReport::new(config, data, rows, cv);

    if let Some(parent) = output_path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory {}", parent.display()))?;
    }

    let json = serde_json::to_string_pretty(&report)
        .context("Failed to serialize evaluation report to JSON")?;

    std::fs::write(output_path, json).with_context(|| {
        format!(
            "Failed to write evaluation report to {}",
            output_path.display()
        )
    })?;

    Ok(())
}
