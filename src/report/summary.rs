//! Evaluation summary table

use comfy_table::{presets::UTF8_FULL_CONDENSED, Attribute, Cell, CellAlignment, Color, Table};
use console::style;

use crate::pipeline::{CvSummary, EvaluationRow};

/// Metrics of every (model, target) pair plus cross-validation means
#[derive(Debug, Default)]
pub struct EvaluationSummary {
    pub rows: Vec<EvaluationRow>,
    pub cv: Vec<CvSummary>,
}

impl EvaluationSummary {
    pub fn new(rows: Vec<EvaluationRow>, cv: Vec<CvSummary>) -> Self {
        Self { rows, cv }
    }

    /// Row with the highest R² for a target
    pub fn best_for_target(&self, target: &str) -> Option<&EvaluationRow> {
        self.rows
            .iter()
            .filter(|r| r.target == target && !r.r2.is_nan())
            .max_by(|a, b| a.r2.partial_cmp(&b.r2).unwrap_or(std::cmp::Ordering::Equal))
    }

    pub fn display(&self) {
        println!();
        println!(
            "    {} {}",
            style("📋").cyan(),
            style("EVALUATION SUMMARY").white().bold()
        );
        println!("    {}", style("─".repeat(50)).dim());
        println!();

        let mut table = Table::new();
        table.load_preset(UTF8_FULL_CONDENSED);
        table.set_header(vec![
            Cell::new("Model").add_attribute(Attribute::Bold),
            Cell::new("Target").add_attribute(Attribute::Bold),
            Cell::new("R²").add_attribute(Attribute::Bold),
            Cell::new("RMSE").add_attribute(Attribute::Bold),
            Cell::new("MAE").add_attribute(Attribute::Bold),
        ]);

        for row in &self.rows {
            let is_best = self
                .best_for_target(&row.target)
                .is_some_and(|best| best.model == row.model);
            let r2_color = if row.r2 >= 0.9 {
                Color::Green
            } else if row.r2 >= 0.7 {
                Color::Yellow
            } else {
                Color::Red
            };

            let mut r2_cell = Cell::new(format!("{:.4}", row.r2))
                .fg(r2_color)
                .set_alignment(CellAlignment::Right);
            if is_best {
                r2_cell = r2_cell.add_attribute(Attribute::Bold);
            }

            table.add_row(vec![
                Cell::new(&row.model),
                Cell::new(&row.target),
                r2_cell,
                Cell::new(format!("{:.4}", row.rmse)).set_alignment(CellAlignment::Right),
                Cell::new(format!("{:.4}", row.mae)).set_alignment(CellAlignment::Right),
            ]);
        }

        for line in table.to_string().lines() {
            println!("    {}", line);
        }

        if !self.cv.is_empty() {
            println!();
            println!(
                "    {} {}",
                style("🔁").cyan(),
                style("CROSS-VALIDATION (mean over folds)").white().bold()
            );
            println!("    {}", style("─".repeat(50)).dim());
            println!();

            let mut table = Table::new();
            table.load_preset(UTF8_FULL_CONDENSED);
            table.set_header(vec![
                Cell::new("Model").add_attribute(Attribute::Bold),
                Cell::new("Folds").add_attribute(Attribute::Bold),
                Cell::new("R²").add_attribute(Attribute::Bold),
                Cell::new("RMSE").add_attribute(Attribute::Bold),
                Cell::new("MAE").add_attribute(Attribute::Bold),
            ]);
            for cv in &self.cv {
                table.add_row(vec![
                    Cell::new(&cv.model),
                    Cell::new(cv.n_splits),
                    Cell::new(format!("{:.4}", cv.mean.r2)).set_alignment(CellAlignment::Right),
                    Cell::new(format!("{:.4}", cv.mean.rmse)).set_alignment(CellAlignment::Right),
                    Cell::new(format!("{:.4}", cv.mean.mae)).set_alignment(CellAlignment::Right),
                ]);
            }
            for line in table.to_string().lines() {
                println!("    {}", line);
            }
        }

        let mut targets: Vec<&str> = Vec::new();
        for row in &self.rows {
            if !targets.contains(&row.target.as_str()) {
                targets.push(&row.target);
            }
        }
        if !targets.is_empty() {
            println!();
            for target in targets {
                if let Some(best) = self.best_for_target(target) {
                    println!(
                        "      {} Best for {}: {} {}",
                        style("★").yellow(),
                        style(target).cyan(),
                        style(&best.model).green().bold(),
                        style(format!("(R² {:.4})", best.r2)).dim()
                    );
                }
            }
        }
    }
}
