//! K-fold cross-validation of regression pipelines

use anyhow::{bail, Result};
use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use rayon::prelude::*;
use serde::Serialize;

use super::metrics::RegressionMetrics;
use crate::model::{Matrix, ModelKind, RegressionPipeline};

/// A single train/validation split
#[derive(Debug, Clone)]
pub struct Fold {
    pub train_indices: Vec<usize>,
    pub test_indices: Vec<usize>,
    pub fold_idx: usize,
}

/// Shuffled k-fold splitter
#[derive(Debug, Clone, Copy)]
pub struct KFold {
    pub n_splits: usize,
    pub shuffle: bool,
    pub random_state: u64,
}

impl KFold {
    pub fn new(n_splits: usize, random_state: u64) -> Self {
        Self {
            n_splits,
            shuffle: true,
            random_state,
        }
    }

    /// Fold sizes differ by at most one; the first `n % k` folds get the extra row.
    pub fn split(&self, n_samples: usize) -> Result<Vec<Fold>> {
        if self.n_splits < 2 {
            bail!("n_splits must be at least 2, got {}", self.n_splits);
        }
        if n_samples < self.n_splits {
            bail!(
                "n_samples ({}) must be >= n_splits ({})",
                n_samples,
                self.n_splits
            );
        }

        let mut indices: Vec<usize> = (0..n_samples).collect();
        if self.shuffle {
            let mut rng = ChaCha8Rng::seed_from_u64(self.random_state);
            indices.shuffle(&mut rng);
        }

        let base = n_samples / self.n_splits;
        let remainder = n_samples % self.n_splits;

        let mut folds = Vec::with_capacity(self.n_splits);
        let mut current = 0;
        for fold_idx in 0..self.n_splits {
            let size = if fold_idx < remainder { base + 1 } else { base };
            let test_indices = indices[current..current + size].to_vec();
            let train_indices = indices[..current]
                .iter()
                .chain(indices[current + size..].iter())
                .copied()
                .collect();
            folds.push(Fold {
                train_indices,
                test_indices,
                fold_idx,
            });
            current += size;
        }

        Ok(folds)
    }
}

/// Cross-validation scores of one model
#[derive(Debug, Clone, Serialize)]
pub struct CvSummary {
    pub model: String,
    pub n_splits: usize,
    /// Per-fold scores, uniformly averaged over targets
    pub folds: Vec<RegressionMetrics>,
    pub mean: RegressionMetrics,
}

/// Score a fitted pipeline on `x`/`y`, averaging the metrics of all targets
pub fn score_uniform(
    pipeline: &RegressionPipeline,
    x: &Matrix,
    y: &Matrix,
) -> Result<RegressionMetrics> {
    let pred = pipeline.predict(x)?;
    let per_target: Vec<RegressionMetrics> = (0..y.ncols())
        .map(|j| RegressionMetrics::compute(&y.column(j), &pred.column(j)))
        .collect::<Result<_>>()?;
    RegressionMetrics::mean(&per_target)
        .ok_or_else(|| anyhow::anyhow!("No target columns to score"))
}

/// Fit a fresh pipeline per fold and score its held-out part. Folds run in parallel.
pub fn cross_validate(
    kind: &ModelKind,
    x: &Matrix,
    y: &Matrix,
    n_splits: usize,
    random_state: u64,
) -> Result<CvSummary> {
    let folds = KFold::new(n_splits, random_state).split(x.nrows())?;

    let scores: Vec<RegressionMetrics> = folds
        .par_iter()
        .map(|fold| {
            let mut pipeline = RegressionPipeline::new(*kind);
            pipeline.fit(
                &x.select_rows(&fold.train_indices),
                &y.select_rows(&fold.train_indices),
            )?;
            score_uniform(
                &pipeline,
                &x.select_rows(&fold.test_indices),
                &y.select_rows(&fold.test_indices),
            )
        })
        .collect::<Result<_>>()?;

    let mean = RegressionMetrics::mean(&scores)
        .ok_or_else(|| anyhow::anyhow!("Cross-validation produced no folds"))?;

    Ok(CvSummary {
        model: kind.name().to_string(),
        n_splits,
        folds: scores,
        mean,
    })
}
