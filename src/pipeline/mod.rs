//! Pipeline module - loading, cleansing, training and evaluation steps

pub mod cross_validation;
pub mod dataset;
pub mod evaluation;
pub mod loader;
pub mod metrics;
pub mod missing;
pub mod numeric;
pub mod outliers;
pub mod scaling;
pub mod training;

pub use cross_validation::{cross_validate, CvSummary, Fold, KFold};
pub use dataset::{train_test_split, Dataset, TrainTestSplit};
pub use evaluation::{EvaluationRow, ModelEvaluator};
pub use loader::*;
pub use metrics::*;
pub use missing::*;
pub use numeric::*;
pub use outliers::*;
pub use scaling::standardize;
pub use training::{ModelTrainer, TrainedModel};
