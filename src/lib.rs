//! eneff: Building Energy Efficiency Regression
//!
//! A library for cleansing the UCI energy efficiency dataset and predicting
//! heating and cooling load with linear, random forest and gradient boosting
//! regressors.

pub mod cli;
pub mod config;
pub mod model;
pub mod pipeline;
pub mod report;
pub mod utils;
