//! Feature/target matrices and the train/test split

use anyhow::{bail, Context, Result};
use polars::prelude::*;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use super::numeric::column_values;
use crate::model::Matrix;

/// Modeling view of a cleansed DataFrame
#[derive(Debug, Clone)]
pub struct Dataset {
    pub feature_names: Vec<String>,
    pub target_names: Vec<String>,
    pub x: Matrix,
    pub y: Matrix,
    /// Non-numeric columns left out of the features
    pub excluded: Vec<String>,
}

impl Dataset {
    /// Features are every numeric non-target column, targets keep the given order.
    pub fn from_dataframe(df: &DataFrame, targets: &[String]) -> Result<Self> {
        if targets.is_empty() {
            bail!("At least one target column is required");
        }

        let column_names: Vec<String> = df
            .get_column_names()
            .iter()
            .map(|s| s.to_string())
            .collect();
        for target in targets {
            if !column_names.contains(target) {
                bail!(
                    "Target column '{}' not found in dataset. Available columns: {:?}",
                    target,
                    column_names
                );
            }
        }

        let mut feature_names = Vec::new();
        let mut excluded = Vec::new();
        for col in df.get_columns() {
            let name = col.name().to_string();
            if targets.contains(&name) {
                continue;
            }
            if col.dtype().is_primitive_numeric() {
                feature_names.push(name);
            } else {
                excluded.push(name);
            }
        }

        if feature_names.is_empty() {
            bail!("No numeric feature columns left after excluding targets");
        }

        let x = to_matrix(df, &feature_names)?;
        let y = to_matrix(df, targets)?;

        Ok(Self {
            feature_names,
            target_names: targets.to_vec(),
            x,
            y,
            excluded,
        })
    }

    pub fn n_samples(&self) -> usize {
        self.x.nrows()
    }
}

/// Dense matrix of the given columns; nulls are an error
fn to_matrix(df: &DataFrame, columns: &[String]) -> Result<Matrix> {
    let mut dense = Vec::with_capacity(columns.len());
    for name in columns {
        let values = column_values(df, name)?;
        let nulls = values.iter().filter(|v| v.is_none()).count();
        if nulls > 0 {
            bail!(
                "Column '{}' still has {} missing value(s); impute before training",
                name,
                nulls
            );
        }
        dense.push(values.into_iter().flatten().collect::<Vec<f64>>());
    }
    Matrix::from_columns(&dense).context("Failed to assemble matrix")
}

/// Row-aligned train and test partitions
#[derive(Debug, Clone)]
pub struct TrainTestSplit {
    pub x_train: Matrix,
    pub x_test: Matrix,
    pub y_train: Matrix,
    pub y_test: Matrix,
    pub train_indices: Vec<usize>,
    pub test_indices: Vec<usize>,
}

/// Shuffle rows with a seeded RNG; the first `ceil(test_size · n)` rows form
/// the test set.
pub fn train_test_split(dataset: &Dataset, test_size: f64, seed: u64) -> Result<TrainTestSplit> {
    if !(test_size > 0.0 && test_size < 1.0) {
        bail!("test_size must be in (0, 1), got {}", test_size);
    }
    let n = dataset.n_samples();
    let n_test = (test_size * n as f64).ceil() as usize;
    if n_test == 0 || n_test >= n {
        bail!(
            "Cannot split {} sample(s) with test_size {}: train or test set would be empty",
            n,
            test_size
        );
    }

    let mut indices: Vec<usize> = (0..n).collect();
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    indices.shuffle(&mut rng);

    let test_indices = indices[..n_test].to_vec();
    let train_indices = indices[n_test..].to_vec();

    Ok(TrainTestSplit {
        x_train: dataset.x.select_rows(&train_indices),
        x_test: dataset.x.select_rows(&test_indices),
        y_train: dataset.y.select_rows(&train_indices),
        y_test: dataset.y.select_rows(&test_indices),
        train_indices,
        test_indices,
    })
}
