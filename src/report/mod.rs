//! Report module - exploratory views, evaluation summary and JSON export

pub mod eda;
pub mod export;
pub mod summary;

pub use eda::{
    correlation_matrix, describe, overview, plot_boxplots, plot_correlation_heatmap,
    plot_histograms, ColumnStats,
};
pub use export::*;
pub use summary::*;
