//! Gradient boosted regression trees (squared loss)

use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::Serialize;

use super::tree::{DecisionTreeRegressor, TreeParams};
use super::{Matrix, ModelError, Regressor};

/// Gradient boosting configuration
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BoostingConfig {
    /// Number of boosting stages
    pub n_estimators: usize,
    /// Shrinkage applied to every stage
    pub learning_rate: f64,
    pub max_depth: usize,
    pub min_samples_split: usize,
    pub min_samples_leaf: usize,
    /// Fraction of rows drawn (without replacement) per stage; 1.0 uses every row
    pub subsample: f64,
    pub random_state: u64,
}

impl Default for BoostingConfig {
    fn default() -> Self {
        Self {
            n_estimators: 100,
            learning_rate: 0.1,
            max_depth: 3,
            min_samples_split: 2,
            min_samples_leaf: 1,
            subsample: 1.0,
            random_state: 42,
        }
    }
}

/// Stagewise additive model: `F(x) = mean(y) + η · Σ tree_m(x)`, each tree fit
/// to the residuals of the previous stages.
#[derive(Debug, Clone)]
pub struct GradientBoostingRegressor {
    config: BoostingConfig,
    initial_prediction: f64,
    stages: Vec<DecisionTreeRegressor>,
    train_loss: Vec<f64>,
}

impl GradientBoostingRegressor {
    pub fn new(config: BoostingConfig) -> Self {
        Self {
            config,
            initial_prediction: 0.0,
            stages: Vec::new(),
            train_loss: Vec::new(),
        }
    }

    pub fn config(&self) -> &BoostingConfig {
        &self.config
    }

    pub fn n_stages(&self) -> usize {
        self.stages.len()
    }

    /// Training MSE after each stage
    pub fn train_loss(&self) -> &[f64] {
        &self.train_loss
    }

    fn validate(&self) -> Result<(), ModelError> {
        let message = if self.config.n_estimators == 0 {
            Some("n_estimators must be at least 1")
        } else if !(self.config.learning_rate > 0.0) {
            Some("learning_rate must be positive")
        } else if !(self.config.subsample > 0.0 && self.config.subsample <= 1.0) {
            Some("subsample must be in (0, 1]")
        } else {
            None
        };
        match message {
            Some(m) => Err(ModelError::InvalidParameter {
                model: "GradientBoostingRegressor",
                message: m.to_string(),
            }),
            None => Ok(()),
        }
    }
}

impl Regressor for GradientBoostingRegressor {
    fn name(&self) -> &'static str {
        "GradientBoostingRegressor"
    }

    fn fit(&mut self, x: &Matrix, y: &[f64]) -> Result<(), ModelError> {
        self.validate()?;
        let n_samples = x.nrows();
        if n_samples == 0 {
            return Err(ModelError::EmptyInput {
                model: self.name(),
            });
        }
        if y.len() != n_samples {
            return Err(ModelError::ShapeMismatch {
                expected: format!("y length = {}", n_samples),
                actual: format!("y length = {}", y.len()),
            });
        }

        self.initial_prediction = y.iter().sum::<f64>() / n_samples as f64;
        let mut predictions = vec![self.initial_prediction; n_samples];
        let mut rng = ChaCha8Rng::seed_from_u64(self.config.random_state);

        let params = TreeParams {
            max_depth: Some(self.config.max_depth),
            min_samples_split: self.config.min_samples_split,
            min_samples_leaf: self.config.min_samples_leaf,
            max_features: None,
        };
        let sample_size = ((n_samples as f64) * self.config.subsample).ceil() as usize;
        let all_rows: Vec<usize> = (0..n_samples).collect();

        self.stages.clear();
        self.train_loss.clear();

        for _ in 0..self.config.n_estimators {
            let residuals: Vec<f64> = y
                .iter()
                .zip(predictions.iter())
                .map(|(t, p)| t - p)
                .collect();

            let rows = if sample_size >= n_samples {
                all_rows.clone()
            } else {
                let mut shuffled = all_rows.clone();
                shuffled.shuffle(&mut rng);
                shuffled.truncate(sample_size.max(1));
                shuffled
            };

            let mut tree = DecisionTreeRegressor::new(params);
            tree.fit_indices(x, &residuals, &rows)?;

            // Every row moves, not only the sampled ones
            let update = tree.predict(x)?;
            for (p, u) in predictions.iter_mut().zip(update.iter()) {
                *p += self.config.learning_rate * u;
            }

            let mse = y
                .iter()
                .zip(predictions.iter())
                .map(|(t, p)| (t - p).powi(2))
                .sum::<f64>()
                / n_samples as f64;
            self.train_loss.push(mse);
            self.stages.push(tree);
        }

        Ok(())
    }

    fn predict(&self, x: &Matrix) -> Result<Vec<f64>, ModelError> {
        if self.stages.is_empty() {
            return Err(ModelError::NotFitted {
                model: self.name(),
            });
        }
        let mut out = vec![self.initial_prediction; x.nrows()];
        for tree in &self.stages {
            let update = tree.predict(x)?;
            for (o, u) in out.iter_mut().zip(update.iter()) {
                *o += self.config.learning_rate * u;
            }
        }
        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn quadratic() -> (Matrix, Vec<f64>) {
        let xs: Vec<f64> = (0..40).map(|i| i as f64 / 4.0).collect();
        let y: Vec<f64> = xs.iter().map(|v| v * v).collect();
        (Matrix::from_columns(&[xs]).unwrap(), y)
    }

    #[test]
    fn test_training_loss_decreases() {
        let (x, y) = quadratic();
        let mut model = GradientBoostingRegressor::new(BoostingConfig {
            n_estimators: 50,
            ..Default::default()
        });
        model.fit(&x, &y).unwrap();

        let loss = model.train_loss();
        assert_eq!(loss.len(), 50);
        assert!(loss[49] < loss[0]);
        for w in loss.windows(2) {
            assert!(w[1] <= w[0] + 1e-9, "loss went up: {} -> {}", w[0], w[1]);
        }
    }

    #[test]
    fn test_predict_matches_training_fit() {
        let (x, y) = quadratic();
        let mut model = GradientBoostingRegressor::new(BoostingConfig {
            n_estimators: 200,
            learning_rate: 0.1,
            max_depth: 3,
            ..Default::default()
        });
        model.fit(&x, &y).unwrap();
        let pred = model.predict(&x).unwrap();
        let mse: f64 = pred
            .iter()
            .zip(y.iter())
            .map(|(p, t)| (p - t).powi(2))
            .sum::<f64>()
            / y.len() as f64;
        assert!((mse - model.train_loss()[199]).abs() < 1e-9);
        assert!(mse < 0.5, "MSE too high: {}", mse);
    }

    #[test]
    fn test_invalid_learning_rate() {
        let (x, y) = quadratic();
        let mut model = GradientBoostingRegressor::new(BoostingConfig {
            learning_rate: 0.0,
            ..Default::default()
        });
        assert!(model.fit(&x, &y).is_err());
    }
}
