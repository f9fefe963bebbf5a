//! Random forest regressor

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use rayon::prelude::*;
use serde::Serialize;

use super::tree::{DecisionTreeRegressor, TreeParams};
use super::{Matrix, ModelError, Regressor};

/// Random forest hyperparameters
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ForestConfig {
    pub n_estimators: usize,
    pub max_depth: Option<usize>,
    pub min_samples_split: usize,
    pub min_samples_leaf: usize,
    /// Features examined per split; `None` uses all of them
    pub max_features: Option<usize>,
    pub bootstrap: bool,
    pub random_state: u64,
}

impl Default for ForestConfig {
    fn default() -> Self {
        Self {
            n_estimators: 100,
            max_depth: None,
            min_samples_split: 2,
            min_samples_leaf: 1,
            max_features: None,
            bootstrap: true,
            random_state: 42,
        }
    }
}

/// Bagged ensemble of regression trees; prediction is the mean of the trees.
#[derive(Debug, Clone)]
pub struct RandomForestRegressor {
    config: ForestConfig,
    trees: Vec<DecisionTreeRegressor>,
}

impl RandomForestRegressor {
    pub fn new(config: ForestConfig) -> Self {
        Self {
            config,
            trees: Vec::new(),
        }
    }

    pub fn config(&self) -> &ForestConfig {
        &self.config
    }

    pub fn n_trees(&self) -> usize {
        self.trees.len()
    }
}

impl Regressor for RandomForestRegressor {
    fn name(&self) -> &'static str {
        "RandomForestRegressor"
    }

    fn fit(&mut self, x: &Matrix, y: &[f64]) -> Result<(), ModelError> {
        let n_samples = x.nrows();
        if n_samples == 0 {
            return Err(ModelError::EmptyInput {
                model: self.name(),
            });
        }
        if self.config.n_estimators == 0 {
            return Err(ModelError::InvalidParameter {
                model: self.name(),
                message: "n_estimators must be at least 1".to_string(),
            });
        }

        let params = TreeParams {
            max_depth: self.config.max_depth,
            min_samples_split: self.config.min_samples_split,
            min_samples_leaf: self.config.min_samples_leaf,
            max_features: self.config.max_features,
        };
        let base_seed = self.config.random_state;
        let bootstrap = self.config.bootstrap;

        // Tree seed is the forest seed plus the tree index
        let trees: Result<Vec<DecisionTreeRegressor>, ModelError> = (0..self.config.n_estimators)
            .into_par_iter()
            .map(|tree_idx| {
                let seed = base_seed.wrapping_add(tree_idx as u64);
                let mut rng = ChaCha8Rng::seed_from_u64(seed);

                let sample_indices: Vec<usize> = if bootstrap {
                    (0..n_samples).map(|_| rng.gen_range(0..n_samples)).collect()
                } else {
                    (0..n_samples).collect()
                };

                let mut tree = DecisionTreeRegressor::new(params).with_seed(rng.gen());
                tree.fit_indices(x, y, &sample_indices)?;
                Ok(tree)
            })
            .collect();

        self.trees = trees?;
        Ok(())
    }

    fn predict(&self, x: &Matrix) -> Result<Vec<f64>, ModelError> {
        if self.trees.is_empty() {
            return Err(ModelError::NotFitted {
                model: self.name(),
            });
        }

        let per_tree: Result<Vec<Vec<f64>>, ModelError> =
            self.trees.par_iter().map(|tree| tree.predict(x)).collect();
        let per_tree = per_tree?;

        let n_trees = per_tree.len() as f64;
        let mut out = vec![0.0; x.nrows()];
        for preds in &per_tree {
            for (o, p) in out.iter_mut().zip(preds.iter()) {
                *o += p;
            }
        }
        out.iter_mut().for_each(|o| *o /= n_trees);
        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn noisy_line() -> (Matrix, Vec<f64>) {
        let xs: Vec<f64> = (0..60).map(|i| i as f64 / 6.0).collect();
        let y: Vec<f64> = xs
            .iter()
            .enumerate()
            .map(|(i, v)| 2.0 * v + if i % 2 == 0 { 0.1 } else { -0.1 })
            .collect();
        (Matrix::from_columns(&[xs]).unwrap(), y)
    }

    #[test]
    fn test_forest_fits_line() {
        let (x, y) = noisy_line();
        let mut forest = RandomForestRegressor::new(ForestConfig {
            n_estimators: 25,
            ..Default::default()
        });
        forest.fit(&x, &y).unwrap();
        assert_eq!(forest.n_trees(), 25);

        let pred = forest.predict(&x).unwrap();
        let mse: f64 = pred
            .iter()
            .zip(y.iter())
            .map(|(p, t)| (p - t).powi(2))
            .sum::<f64>()
            / y.len() as f64;
        assert!(mse < 0.5, "MSE too high: {}", mse);
    }

    #[test]
    fn test_same_seed_same_predictions() {
        let (x, y) = noisy_line();
        let config = ForestConfig {
            n_estimators: 10,
            max_depth: Some(4),
            ..Default::default()
        };
        let mut a = RandomForestRegressor::new(config);
        let mut b = RandomForestRegressor::new(config);
        a.fit(&x, &y).unwrap();
        b.fit(&x, &y).unwrap();
        assert_eq!(a.predict(&x).unwrap(), b.predict(&x).unwrap());
    }

    #[test]
    fn test_zero_estimators_rejected() {
        let (x, y) = noisy_line();
        let mut forest = RandomForestRegressor::new(ForestConfig {
            n_estimators: 0,
            ..Default::default()
        });
        assert!(matches!(
            forest.fit(&x, &y),
            Err(ModelError::InvalidParameter { .. })
        ));
    }
}
