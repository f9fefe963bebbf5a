//! Terminal styling helpers for pipeline output

use std::path::Path;
use std::time::Duration;

use console::{style, Emoji};

use crate::config::PipelineConfig;

// Emoji icons with fallbacks for terminals that don't support them
pub static INFO: Emoji<'_, '_> = Emoji("ℹ️  ", "[*] ");
pub static WARN: Emoji<'_, '_> = Emoji("⚠️  ", "[!] ");
pub static ROCKET: Emoji<'_, '_> = Emoji("🚀 ", ">> ");
pub static CHART: Emoji<'_, '_> = Emoji("📊 ", "");
pub static FOLDER: Emoji<'_, '_> = Emoji("📂 ", "");
pub static TARGET: Emoji<'_, '_> = Emoji("🎯 ", "");
pub static SAVE: Emoji<'_, '_> = Emoji("💾 ", "");
pub static GEAR: Emoji<'_, '_> = Emoji("⚙️  ", "");
pub static CLOCK: Emoji<'_, '_> = Emoji("⏱  ", "");

const BOX_WIDTH: usize = 60;

/// Print the application banner
pub fn print_banner(version: &str) {
    let banner = r#"
    ███████╗███╗   ██╗███████╗███████╗███████╗
    ██╔════╝████╗  ██║██╔════╝██╔════╝██╔════╝
    █████╗  ██╔██╗ ██║█████╗  █████╗  █████╗
    ██╔══╝  ██║╚██╗██║██╔══╝  ██╔══╝  ██╔══╝
    ███████╗██║ ╚████║███████╗██║     ██║
    ╚══════╝╚═╝  ╚═══╝╚══════╝╚═╝     ╚═╝
    "#;

    println!();
    println!("{}", style(banner).cyan().bold());
    println!(
        "    {}",
        style("Heating and cooling load regression").dim()
    );
    println!("    {}", style(format!("v{}", version)).dim());
    println!("    {}", style("━".repeat(50)).dim());
    println!();
}

/// Print the configuration card
pub fn print_config(config: &PipelineConfig) {
    let inner = BOX_WIDTH - 2;
    let line = "─".repeat(inner);
    let models = config
        .models
        .iter()
        .map(|m| format!("{:?}", m))
        .collect::<Vec<_>>()
        .join(", ");
    let cv = if config.cv_folds >= 2 {
        format!("{} folds", config.cv_folds)
    } else {
        "disabled".to_string()
    };

    println!("    ┌{}┐", line);
    card_row(&format!("{}{}", GEAR, style("Configuration").cyan().bold()), inner);
    println!("    ├{}┤", line);
    card_row(&format!("{}Input:   {}", FOLDER, truncate_path(&config.input, 42)), inner);
    let targets = config.targets.join(", ");
    card_row(
        &format!("{}Targets: {}", TARGET, truncate_string(&targets, 42)),
        inner,
    );
    card_row(&format!("{}Output:  {}", SAVE, truncate_path(&config.output_path(), 42)), inner);
    println!("    ├{}┤", line);
    card_row(&format!("   Models:  {}", truncate_string(&models, 42)), inner);
    card_row(
        &format!(
            "{}Test size {:.2} | seed {} | CV {}",
            CHART, config.test_size, config.random_state, cv
        ),
        inner,
    );
    card_row(
        &format!(
            "   Standardize: {} | EDA plots: {} | DVC: {}",
            yes_no(config.standardize),
            yes_no(config.show_eda),
            yes_no(config.use_dvc)
        ),
        inner,
    );
    println!("    └{}┘", line);
    println!();
}

fn card_row(text: &str, inner: usize) {
    let visible = console::measure_text_width(text);
    let pad = inner.saturating_sub(visible + 1);
    println!("    │ {}{}│", text, " ".repeat(pad));
}

fn yes_no(flag: bool) -> &'static str {
    if flag {
        "yes"
    } else {
        "no"
    }
}

/// Print a step header
pub fn print_step_header(step_num: u8, title: &str) {
    println!();
    println!(
        "    {} {} {}",
        style(format!("STEP {}", step_num)).cyan().bold(),
        style("│").dim(),
        style(title).white().bold()
    );
    println!("    {}", style("─".repeat(50)).dim());
}

pub fn print_success(message: &str) {
    println!("    {} {}", style("✓").green().bold(), style(message).green());
}

pub fn print_info(message: &str) {
    println!("    {}{}", INFO, message);
}

pub fn print_warning(message: &str) {
    println!("    {}{}", WARN, style(message).yellow());
}

/// Print a styled count message
pub fn print_count(description: &str, count: usize, detail: Option<&str>) {
    if let Some(detail) = detail {
        println!(
            "      Found {} {} {}",
            style(count).yellow().bold(),
            description,
            style(detail).dim()
        );
    } else {
        println!("      Found {} {}", style(count).yellow().bold(), description);
    }
}

/// Print the elapsed time of a step
pub fn print_step_time(elapsed: Duration) {
    println!(
        "    {}{}",
        CLOCK,
        style(format!("{:.2}s", elapsed.as_secs_f64())).dim()
    );
}

/// Print the final completion message
pub fn print_completion() {
    println!();
    println!(
        "    {}{}",
        ROCKET,
        style("Energy efficiency pipeline complete!").green().bold()
    );
    println!();
}

fn truncate_path(path: &Path, max_len: usize) -> String {
    truncate_string(&path.display().to_string(), max_len)
}

fn truncate_string(s: &str, max_len: usize) -> String {
    let chars: Vec<char> = s.chars().collect();
    if chars.len() <= max_len {
        s.to_string()
    } else {
        let tail: String = chars[chars.len() - (max_len - 3)..].iter().collect();
        format!("...{}", tail)
    }
}
