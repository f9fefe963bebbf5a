//! Error types for the estimators

use thiserror::Error;

/// Errors raised while fitting or applying a model.
#[derive(Debug, Error)]
pub enum ModelError {
    /// Input dimensions do not line up (rows of X vs. length of y, feature count, ...).
    #[error("Shape mismatch: expected {expected}, got {actual}")]
    ShapeMismatch { expected: String, actual: String },

    /// Fitting requires at least one sample.
    #[error("Cannot fit {model} on an empty dataset")]
    EmptyInput { model: &'static str },

    /// `predict`/`transform` called before `fit`.
    #[error("{model} has not been fitted")]
    NotFitted { model: &'static str },

    /// A hyperparameter is outside its valid range.
    #[error("Invalid parameter for {model}: {message}")]
    InvalidParameter { model: &'static str, message: String },

    /// The normal equations could not be solved even after regularization.
    #[error("Linear system is singular ({size} x {size})")]
    Singular { size: usize },
}
