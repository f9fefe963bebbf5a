//! Dataset inspection without cleansing or training

use std::path::Path;

use anyhow::Result;
use console::style;

use crate::config::naming_map;
use crate::pipeline::{count_missing, load_renamed};
use crate::report::{overview, plot_boxplots, plot_correlation_heatmap, plot_histograms};
use crate::utils::{create_spinner, finish_with_success};

/// Load and rename a dataset, then print its overview and optionally the plots
pub fn run_inspect(input: &Path, plots: bool, infer_schema_length: usize) -> Result<()> {
    println!("\n {} Inspecting dataset", style("◆").cyan().bold());
    println!("   Input: {}", style(input.display()).dim());
    println!();

    let spinner = create_spinner("Loading dataset...");
    let df = load_renamed(input, infer_schema_length, &naming_map())?;
    finish_with_success(&spinner, "Dataset loaded");

    println!();
    println!(
        "   {} rows × {} columns, {} missing value(s)",
        style(df.height()).yellow(),
        style(df.width()).yellow(),
        style(count_missing(&df)).yellow()
    );

    overview(&df)?;

    if plots {
        plot_histograms(&df)?;
        plot_boxplots(&df)?;
        plot_correlation_heatmap(&df)?;
    }

    println!();
    println!(" {} Inspection complete!", style("✓").green().bold());

    Ok(())
}
