//! eneff: Building Energy Efficiency Regression CLI
//!
//! Loads the energy efficiency dataset, cleanses it, versions the result with
//! DVC and trains/evaluates multi-output regressors for heating and cooling load.

use std::time::Instant;

use anyhow::Result;
use clap::Parser;
use console::style;
use polars::prelude::DataFrame;

use eneff::cli::{inspect::run_inspect, Cli, Commands};
use eneff::config::{naming_map, PipelineConfig, DVC_PROGRAM};
use eneff::pipeline::{
    convert_numeric, detect_outliers, impute_missing, load_renamed, remove_outliers,
    save_dataset, standardize, track_with_dvc, Dataset, ModelEvaluator, ModelTrainer,
};
use eneff::report::{
    export_report, overview, plot_boxplots, plot_correlation_heatmap, plot_histograms,
    DataSummary, EvaluationSummary,
};
use eneff::utils::{
    create_spinner, finish_with_success, finish_with_warning, print_banner, print_completion,
    print_config, print_count, print_info, print_step_header, print_step_time, print_success,
    print_warning,
};

fn main() -> Result<()> {
    let cli = Cli::parse();

    if let Some(command) = &cli.command {
        return match command {
            Commands::Inspect {
                input,
                plots,
                infer_schema_length,
            } => run_inspect(input, *plots, *infer_schema_length),
        };
    }

    let config = cli.to_config();
    run_pipeline(&config)
}

fn render_plots(df: &DataFrame) -> Result<()> {
    plot_histograms(df)?;
    plot_boxplots(df)?;
    plot_correlation_heatmap(df)
}

fn run_pipeline(config: &PipelineConfig) -> Result<()> {
    print_banner(env!("CARGO_PKG_VERSION"));
    print_config(config);

    let mut data_summary = DataSummary::default();

    // Step 1: Load and rename
    print_step_header(1, "Load Dataset");
    let step_start = Instant::now();
    let spinner = create_spinner("Loading dataset...");
    let mut df = load_renamed(&config.input, config.infer_schema_length, &naming_map())?;
    finish_with_success(&spinner, &format!("Loaded {}", config.input.display()));

    println!("\n    {} Dataset Statistics:", style("✧").cyan());
    println!("      Rows: {}", df.height());
    println!("      Columns: {}", df.width());
    data_summary.rows_loaded = df.height();
    print_step_time(step_start.elapsed());

    // Step 2: Numeric coercion and overview
    print_step_header(2, "Type Conversion");
    let step_start = Instant::now();
    let skipped = convert_numeric(&mut df, &config.numeric_columns)?;
    for column in &skipped {
        print_warning(&format!("Column '{}' not in dataset, skipped", column));
    }
    let numeric_columns: Vec<String> = config
        .numeric_columns
        .iter()
        .filter(|c| !skipped.contains(c))
        .cloned()
        .collect();
    print_success(&format!(
        "Converted {} column(s) to Float64",
        numeric_columns.len()
    ));

    print_info("Data overview before cleansing");
    overview(&df)?;
    if config.show_eda {
        print_info("Visual EDA before cleansing");
        render_plots(&df)?;
    }
    print_step_time(step_start.elapsed());

    // Step 3: Cleansing
    print_step_header(3, "Data Cleansing");
    let step_start = Instant::now();

    let imputation = impute_missing(&mut df, &numeric_columns)?;
    print_count(
        "missing value(s) before imputation",
        imputation.missing_before,
        None,
    );
    print_count(
        "missing value(s) after imputation",
        imputation.missing_after,
        None,
    );
    data_summary.missing_imputed = imputation
        .missing_before
        .saturating_sub(imputation.missing_after);

    let outliers = detect_outliers(&df, &numeric_columns)?;
    for bounds in outliers.bounds.iter().filter(|b| b.outliers > 0) {
        println!(
            "      {} {} {}",
            style("•").dim(),
            bounds.column,
            style(format!(
                "{} outside [{:.3}, {:.3}]",
                bounds.outliers, bounds.lower, bounds.upper
            ))
            .dim()
        );
    }
    print_count(
        "row(s) detected as outliers",
        outliers.rows.len(),
        Some("(1.5 x IQR)"),
    );
    df = remove_outliers(&df, &outliers.rows)?;
    data_summary.outlier_rows_removed = outliers.rows.len();
    print_success(&format!("Outliers removed, {} row(s) remain", df.height()));

    if config.standardize {
        standardize(&mut df, &numeric_columns)?;
        print_success(&format!(
            "Standardized {} numeric column(s)",
            numeric_columns.len()
        ));
    }

    print_info("Data overview after cleansing");
    overview(&df)?;
    print_step_time(step_start.elapsed());

    // Step 4: Save and version
    print_step_header(4, "Save Cleansed Dataset");
    let step_start = Instant::now();
    let spinner = create_spinner("Writing output file...");
    let output_path = save_dataset(&mut df, &config.output_dir, &config.output_file)?;
    finish_with_success(&spinner, &format!("Saved to {}", output_path.display()));

    if config.use_dvc {
        let spinner = create_spinner("Tracking with DVC...");
        match track_with_dvc(DVC_PROGRAM, &output_path) {
            Ok(()) => finish_with_success(&spinner, "Tracked with DVC"),
            Err(e) => {
                finish_with_warning(&spinner, "DVC tracking failed");
                return Err(e);
            }
        }
    } else {
        print_info("DVC tracking skipped");
    }
    print_step_time(step_start.elapsed());

    // Step 5: Training
    print_step_header(5, "Model Training");
    let step_start = Instant::now();
    let dataset = Dataset::from_dataframe(&df, &config.targets)?;
    for column in &dataset.excluded {
        print_warning(&format!("Non-numeric column '{}' excluded from features", column));
    }
    data_summary.rows_modeled = dataset.n_samples();
    data_summary.features = dataset.feature_names.clone();
    data_summary.excluded_columns = dataset.excluded.clone();
    let target_names = dataset.target_names.clone();

    let mut trainer = ModelTrainer::new(dataset, config);
    trainer.split_data()?;
    trainer.list_models();
    trainer.train_models()?;
    for model in trainer.models() {
        println!(
            "      {} {} {}",
            style("•").dim(),
            model.name(),
            style(format!("fitted in {:.2}s", model.fit_time.as_secs_f64())).dim()
        );
    }
    print_step_time(step_start.elapsed());

    // Step 6: Evaluation
    print_step_header(6, "Model Evaluation");
    let step_start = Instant::now();
    let (models, split, validation_reports) = trainer.into_parts();
    let split = split.ok_or_else(|| anyhow::anyhow!("Training finished without a data split"))?;
    data_summary.train_rows = split.x_train.nrows();
    data_summary.test_rows = split.x_test.nrows();

    let evaluator = ModelEvaluator::new(
        &models,
        &split.x_test,
        &split.y_test,
        &target_names,
        &validation_reports,
    )?;
    let rows = evaluator.evaluate_all()?;
    print_step_time(step_start.elapsed());

    if let Some(report_path) = &config.report {
        export_report(report_path, config, data_summary, &rows, &validation_reports)?;
        print_success(&format!("Report written to {}", report_path.display()));
    }

    let summary = EvaluationSummary::new(rows, validation_reports);
    summary.display();

    if config.show_eda {
        print_info("Visual EDA after cleansing");
        render_plots(&df)?;
    }

    print_completion();

    Ok(())
}
