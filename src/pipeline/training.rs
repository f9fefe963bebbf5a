//! Model training: train/test split, per-algorithm pipelines, cross-validation

use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use console::style;

use super::cross_validation::{cross_validate, CvSummary};
use super::dataset::{train_test_split, Dataset, TrainTestSplit};
use crate::config::PipelineConfig;
use crate::model::{ModelKind, RegressionPipeline};
use crate::utils::{create_progress_bar, finish_with_success, print_info, print_success};

/// A fitted pipeline plus how long it took to fit
pub struct TrainedModel {
    pub pipeline: RegressionPipeline,
    pub fit_time: Duration,
}

impl TrainedModel {
    pub fn name(&self) -> &'static str {
        self.pipeline.name()
    }
}

/// Trains one standardization + multi-output pipeline per selected algorithm
pub struct ModelTrainer {
    dataset: Dataset,
    kinds: Vec<ModelKind>,
    test_size: f64,
    random_state: u64,
    cv_folds: usize,
    split: Option<TrainTestSplit>,
    models: Vec<TrainedModel>,
    validation_reports: Vec<CvSummary>,
}

impl ModelTrainer {
    pub fn new(dataset: Dataset, config: &PipelineConfig) -> Self {
        Self {
            dataset,
            kinds: config.model_kinds(),
            test_size: config.test_size,
            random_state: config.random_state,
            cv_folds: config.cv_folds,
            split: None,
            models: Vec::new(),
            validation_reports: Vec::new(),
        }
    }

    /// Split rows into train and test partitions
    pub fn split_data(&mut self) -> Result<&TrainTestSplit> {
        let split = train_test_split(&self.dataset, self.test_size, self.random_state)
            .context("Failed to split dataset")?;
        print_success(&format!(
            "Data split: {} train, {} test",
            split.x_train.nrows(),
            split.x_test.nrows()
        ));
        let split = self.split.insert(split);
        Ok(&*split)
    }

    pub fn list_models(&self) {
        println!();
        println!("    {}", style("Models to train:").white().bold());
        for kind in &self.kinds {
            println!("      {} {}", style("•").dim(), kind);
        }
    }

    /// Fit every selected pipeline on the training split; cross-validate on the
    /// training split too when `cv_folds >= 2`.
    pub fn train_models(&mut self) -> Result<()> {
        let split = self
            .split
            .as_ref()
            .context("Data must be split before training; call split_data first")?;

        let pb = create_progress_bar(self.kinds.len() as u64, "Training models");
        let mut models = Vec::with_capacity(self.kinds.len());
        for kind in &self.kinds {
            pb.set_message(format!("Training {}", kind));
            let start = Instant::now();
            let mut pipeline = RegressionPipeline::new(*kind);
            pipeline
                .fit(&split.x_train, &split.y_train)
                .with_context(|| format!("Failed to fit {}", kind))?;
            models.push(TrainedModel {
                pipeline,
                fit_time: start.elapsed(),
            });
            pb.inc(1);
        }
        finish_with_success(&pb, &format!("Trained {} model(s)", models.len()));
        self.models = models;

        self.validation_reports.clear();
        if self.cv_folds >= 2 {
            let pb = create_progress_bar(self.kinds.len() as u64, "Cross-validating");
            for kind in &self.kinds {
                pb.set_message(format!("{}-fold CV {}", self.cv_folds, kind));
                let summary = cross_validate(
                    kind,
                    &split.x_train,
                    &split.y_train,
                    self.cv_folds,
                    self.random_state,
                )
                .with_context(|| format!("Cross-validation failed for {}", kind))?;
                self.validation_reports.push(summary);
                pb.inc(1);
            }
            finish_with_success(&pb, "Cross-validation complete");
        } else {
            print_info("Cross-validation disabled");
        }

        Ok(())
    }

    pub fn models(&self) -> &[TrainedModel] {
        &self.models
    }

    pub fn validation_reports(&self) -> &[CvSummary] {
        &self.validation_reports
    }

    /// Hand over the fitted models, the split and the CV summaries
    pub fn into_parts(self) -> (Vec<TrainedModel>, Option<TrainTestSplit>, Vec<CvSummary>) {
        (self.models, self.split, self.validation_reports)
    }
}
