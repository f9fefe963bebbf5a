//! Held-out evaluation of trained pipelines

use anyhow::{bail, Context, Result};
use console::style;
use serde::Serialize;

use super::cross_validation::CvSummary;
use super::metrics::RegressionMetrics;
use super::training::TrainedModel;
use crate::model::Matrix;

/// Metrics of one model on one target
#[derive(Debug, Clone, Serialize)]
pub struct EvaluationRow {
    pub model: String,
    pub target: String,
    pub r2: f64,
    pub rmse: f64,
    pub mae: f64,
}

/// Scores trained pipelines on the test split
pub struct ModelEvaluator<'a> {
    models: &'a [TrainedModel],
    x_test: &'a Matrix,
    y_test: &'a Matrix,
    target_names: &'a [String],
    validation_reports: &'a [CvSummary],
}

impl<'a> ModelEvaluator<'a> {
    pub fn new(
        models: &'a [TrainedModel],
        x_test: &'a Matrix,
        y_test: &'a Matrix,
        target_names: &'a [String],
        validation_reports: &'a [CvSummary],
    ) -> Result<Self> {
        if y_test.ncols() != target_names.len() {
            bail!(
                "Test targets have {} column(s) but {} target name(s) were given",
                y_test.ncols(),
                target_names.len()
            );
        }
        if x_test.nrows() != y_test.nrows() {
            bail!(
                "Test features have {} row(s) but targets have {}",
                x_test.nrows(),
                y_test.nrows()
            );
        }
        Ok(Self {
            models,
            x_test,
            y_test,
            target_names,
            validation_reports,
        })
    }

    pub fn list_models(&self) {
        println!();
        println!("    {}", style("Trained models:").white().bold());
        for model in self.models {
            println!("      {} {}", style("•").dim(), model.name());
        }
    }

    /// Score one prediction vector and print the result line
    pub fn evaluate_model(
        &self,
        y_true: &[f64],
        y_pred: &[f64],
        name: &str,
        target: &str,
    ) -> Result<RegressionMetrics> {
        let metrics = RegressionMetrics::compute(y_true, y_pred)
            .with_context(|| format!("Failed to score {} on {}", name, target))?;
        println!(
            "      {:<20} | Target: {:<15} | R²: {:.4} | RMSE: {:.4} | MAE: {:.4}",
            name, target, metrics.r2, metrics.rmse, metrics.mae
        );
        Ok(metrics)
    }

    /// Evaluate every model on every target, in model then target order
    pub fn evaluate_all(&self) -> Result<Vec<EvaluationRow>> {
        self.list_models();
        println!();
        println!("    {}", style("Model evaluation:").white().bold());
        println!();

        let mut rows = Vec::with_capacity(self.models.len() * self.target_names.len());
        for model in self.models {
            let name = model.name();
            let predictions = model
                .pipeline
                .predict(self.x_test)
                .with_context(|| format!("Failed to predict with {}", name))?;

            for (j, target) in self.target_names.iter().enumerate() {
                let metrics = self.evaluate_model(
                    &self.y_test.column(j),
                    &predictions.column(j),
                    name,
                    target,
                )?;
                rows.push(EvaluationRow {
                    model: name.to_string(),
                    target: target.clone(),
                    r2: metrics.r2,
                    rmse: metrics.rmse,
                    mae: metrics.mae,
                });
            }

            if let Some(cv) = self.validation_reports.iter().find(|cv| cv.model == name) {
                println!(
                    "      {} CV mean scores | R²: {:.4} | RMSE: {:.4} | MAE: {:.4}",
                    style("->").dim(),
                    cv.mean.r2,
                    cv.mean.rmse,
                    cv.mean.mae
                );
            }
        }

        Ok(rows)
    }
}
