//! Model module - regressors, multi-output wrapping and scaling pipelines

pub mod boosting;
pub mod error;
pub mod forest;
pub mod linear;
pub mod matrix;
pub mod scaler;
pub mod tree;

use std::fmt;

use serde::Serialize;

pub use boosting::{BoostingConfig, GradientBoostingRegressor};
pub use error::ModelError;
pub use forest::{ForestConfig, RandomForestRegressor};
pub use linear::LinearRegression;
pub use matrix::Matrix;
pub use scaler::StandardScaler;
pub use tree::{DecisionTreeRegressor, TreeParams};

/// A single-target regression estimator.
pub trait Regressor: Send + Sync {
    fn name(&self) -> &'static str;

    /// Fit on `x` (n x p) and `y` (length n)
    fn fit(&mut self, x: &Matrix, y: &[f64]) -> Result<(), ModelError>;

    /// Predict one value per row of `x`
    fn predict(&self, x: &Matrix) -> Result<Vec<f64>, ModelError>;
}

/// The algorithms the trainer knows how to build
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub enum ModelKind {
    LinearRegression,
    RandomForest(ForestConfig),
    GradientBoosting(BoostingConfig),
}

impl ModelKind {
    /// Display name used as the model key in reports
    pub fn name(&self) -> &'static str {
        match self {
            ModelKind::LinearRegression => "LinearRegression",
            ModelKind::RandomForest(_) => "RandomForest",
            ModelKind::GradientBoosting(_) => "GradientBoosting",
        }
    }

    /// Build a fresh, unfitted base estimator
    pub fn build(&self) -> Box<dyn Regressor> {
        match self {
            ModelKind::LinearRegression => Box::new(LinearRegression::new()),
            ModelKind::RandomForest(config) => Box::new(RandomForestRegressor::new(*config)),
            ModelKind::GradientBoosting(config) => {
                Box::new(GradientBoostingRegressor::new(*config))
            }
        }
    }
}

impl fmt::Display for ModelKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Algorithm selector without hyperparameters, as given on the command line
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, clap::ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum Algorithm {
    Linear,
    RandomForest,
    GradientBoosting,
}

impl Algorithm {
    pub const ALL: [Algorithm; 3] = [
        Algorithm::Linear,
        Algorithm::RandomForest,
        Algorithm::GradientBoosting,
    ];
}

/// Fits one independent base estimator per target column.
pub struct MultiOutputRegressor {
    kind: ModelKind,
    estimators: Vec<Box<dyn Regressor>>,
}

impl MultiOutputRegressor {
    pub fn new(kind: ModelKind) -> Self {
        Self {
            kind,
            estimators: Vec::new(),
        }
    }

    pub fn kind(&self) -> &ModelKind {
        &self.kind
    }

    pub fn n_outputs(&self) -> usize {
        self.estimators.len()
    }

    /// Fit on `x` (n x p) and `y` (n x k)
    pub fn fit(&mut self, x: &Matrix, y: &Matrix) -> Result<(), ModelError> {
        if x.nrows() != y.nrows() {
            return Err(ModelError::ShapeMismatch {
                expected: format!("{} target rows", x.nrows()),
                actual: format!("{} target rows", y.nrows()),
            });
        }
        if y.ncols() == 0 {
            return Err(ModelError::InvalidParameter {
                model: "MultiOutputRegressor",
                message: "at least one target column is required".to_string(),
            });
        }

        let mut estimators = Vec::with_capacity(y.ncols());
        for j in 0..y.ncols() {
            let mut estimator = self.kind.build();
            estimator.fit(x, &y.column(j))?;
            estimators.push(estimator);
        }
        self.estimators = estimators;
        Ok(())
    }

    /// Predict an n x k matrix, columns in target order
    pub fn predict(&self, x: &Matrix) -> Result<Matrix, ModelError> {
        if self.estimators.is_empty() {
            return Err(ModelError::NotFitted {
                model: "MultiOutputRegressor",
            });
        }
        let columns: Vec<Vec<f64>> = self
            .estimators
            .iter()
            .map(|e| e.predict(x))
            .collect::<Result<_, _>>()?;
        Matrix::from_columns(&columns)
    }
}

/// Standardization followed by a multi-output estimator. The scaler only ever
/// sees training rows.
pub struct RegressionPipeline {
    scaler: StandardScaler,
    model: MultiOutputRegressor,
}

impl RegressionPipeline {
    pub fn new(kind: ModelKind) -> Self {
        Self {
            scaler: StandardScaler::new(),
            model: MultiOutputRegressor::new(kind),
        }
    }

    pub fn name(&self) -> &'static str {
        self.model.kind().name()
    }

    pub fn kind(&self) -> &ModelKind {
        self.model.kind()
    }

    pub fn fit(&mut self, x: &Matrix, y: &Matrix) -> Result<(), ModelError> {
        let x_scaled = self.scaler.fit_transform(x)?;
        self.model.fit(&x_scaled, y)
    }

    pub fn predict(&self, x: &Matrix) -> Result<Matrix, ModelError> {
        let x_scaled = self.scaler.transform(x)?;
        self.model.predict(&x_scaled)
    }
}
