//! Exploratory data analysis: overview tables and terminal plots

use anyhow::{Context, Result};
use comfy_table::{presets::UTF8_FULL_CONDENSED, Attribute, Cell, CellAlignment, Color, Table};
use console::style;
use faer::Mat;
use polars::prelude::*;
use serde::Serialize;

use crate::pipeline::numeric::{column_values, missing_per_column, numeric_column_names};
use crate::pipeline::outliers::{percentile, IQR_FACTOR};

/// Bins used by the terminal histograms
pub const HISTOGRAM_BINS: usize = 15;

const BAR_WIDTH: usize = 40;
const STRIP_WIDTH: usize = 50;

/// Name, dtype and non-null count of one column
#[derive(Debug, Clone, Serialize)]
pub struct ColumnInfo {
    pub name: String,
    pub dtype: String,
    pub non_null: usize,
}

/// Descriptive statistics of one numeric column
#[derive(Debug, Clone, Serialize)]
pub struct ColumnStats {
    pub column: String,
    pub count: usize,
    pub mean: f64,
    /// Sample standard deviation (n - 1), NaN below two values
    pub std: f64,
    pub min: f64,
    pub q25: f64,
    pub median: f64,
    pub q75: f64,
    pub max: f64,
}

impl ColumnStats {
    /// Statistics over the non-null values; `None` when there are none
    pub fn from_values(column: &str, values: &[Option<f64>]) -> Option<Self> {
        let mut valid: Vec<f64> = values.iter().flatten().copied().collect();
        if valid.is_empty() {
            return None;
        }
        valid.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));

        let n = valid.len();
        let mean = valid.iter().sum::<f64>() / n as f64;
        let std = if n > 1 {
            (valid.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / (n - 1) as f64).sqrt()
        } else {
            f64::NAN
        };

        Some(Self {
            column: column.to_string(),
            count: n,
            mean,
            std,
            min: valid[0],
            q25: percentile(&valid, 25.0),
            median: percentile(&valid, 50.0),
            q75: percentile(&valid, 75.0),
            max: valid[n - 1],
        })
    }
}

pub fn column_info(df: &DataFrame) -> Vec<ColumnInfo> {
    df.get_columns()
        .iter()
        .map(|c| ColumnInfo {
            name: c.name().to_string(),
            dtype: c.dtype().to_string(),
            non_null: c.len() - c.null_count(),
        })
        .collect()
}

/// Descriptive statistics of every numeric column with at least one value
pub fn describe(df: &DataFrame) -> Result<Vec<ColumnStats>> {
    let mut stats = Vec::new();
    for name in numeric_column_names(df) {
        let values = column_values(df, &name)?;
        if let Some(s) = ColumnStats::from_values(&name, &values) {
            stats.push(s);
        }
    }
    Ok(stats)
}

fn section_title(title: &str) {
    println!();
    println!("    {} {}", style("▸").cyan(), style(title).white().bold());
    println!("    {}", style("─".repeat(50)).dim());
}

fn print_indented(table: &Table) {
    for line in table.to_string().lines() {
        println!("    {}", line);
    }
}

fn fmt_stat(v: f64) -> String {
    if v.is_nan() {
        "NaN".to_string()
    } else {
        format!("{:.4}", v)
    }
}

/// Print column info, descriptive statistics and missing counts
pub fn overview(df: &DataFrame) -> Result<()> {
    section_title(&format!(
        "Column info ({} rows x {} columns)",
        df.height(),
        df.width()
    ));
    let mut table = Table::new();
    table.load_preset(UTF8_FULL_CONDENSED);
    table.set_header(vec![
        Cell::new("Column").add_attribute(Attribute::Bold),
        Cell::new("Dtype").add_attribute(Attribute::Bold),
        Cell::new("Non-Null").add_attribute(Attribute::Bold),
    ]);
    for info in column_info(df) {
        table.add_row(vec![
            Cell::new(info.name),
            Cell::new(info.dtype).fg(Color::Cyan),
            Cell::new(info.non_null).set_alignment(CellAlignment::Right),
        ]);
    }
    print_indented(&table);

    section_title("Descriptive statistics");
    let stats = describe(df).context("Failed to compute descriptive statistics")?;
    let mut table = Table::new();
    table.load_preset(UTF8_FULL_CONDENSED);
    table.set_header(
        ["Column", "count", "mean", "std", "min", "25%", "50%", "75%", "max"]
            .iter()
            .map(|h| Cell::new(h).add_attribute(Attribute::Bold))
            .collect::<Vec<_>>(),
    );
    for s in &stats {
        let mut row = vec![Cell::new(&s.column), Cell::new(s.count)];
        row.extend(
            [s.mean, s.std, s.min, s.q25, s.median, s.q75, s.max]
                .iter()
                .map(|v| Cell::new(fmt_stat(*v)).set_alignment(CellAlignment::Right)),
        );
        table.add_row(row);
    }
    print_indented(&table);

    section_title("Missing values");
    let mut table = Table::new();
    table.load_preset(UTF8_FULL_CONDENSED);
    table.set_header(vec![
        Cell::new("Column").add_attribute(Attribute::Bold),
        Cell::new("Missing").add_attribute(Attribute::Bold),
    ]);
    for (name, missing) in missing_per_column(df) {
        table.add_row(vec![
            Cell::new(name),
            Cell::new(missing).fg(if missing == 0 { Color::White } else { Color::Red }),
        ]);
    }
    print_indented(&table);

    Ok(())
}

/// One histogram bin, `[lower, upper)` except the last which is closed
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HistogramBin {
    pub lower: f64,
    pub upper: f64,
    pub count: usize,
}

/// Equal-width histogram of the non-null values
pub fn histogram(values: &[Option<f64>], bins: usize) -> Vec<HistogramBin> {
    let valid: Vec<f64> = values.iter().flatten().copied().collect();
    if valid.is_empty() || bins == 0 {
        return Vec::new();
    }
    let min = valid.iter().copied().fold(f64::INFINITY, f64::min);
    let max = valid.iter().copied().fold(f64::NEG_INFINITY, f64::max);

    if max == min {
        return vec![HistogramBin {
            lower: min,
            upper: max,
            count: valid.len(),
        }];
    }

    let width = (max - min) / bins as f64;
    let mut counts = vec![0usize; bins];
    for v in &valid {
        let idx = (((v - min) / width).floor() as usize).min(bins - 1);
        counts[idx] += 1;
    }

    counts
        .into_iter()
        .enumerate()
        .map(|(i, count)| HistogramBin {
            lower: min + i as f64 * width,
            upper: if i == bins - 1 { max } else { min + (i + 1) as f64 * width },
            count,
        })
        .collect()
}

/// 15-bin terminal histogram per numeric column
pub fn plot_histograms(df: &DataFrame) -> Result<()> {
    section_title("Histograms");
    for name in numeric_column_names(df) {
        let values = column_values(df, &name)?;
        let bins = histogram(&values, HISTOGRAM_BINS);
        println!();
        println!("      {}", style(&name).cyan().bold());
        if bins.is_empty() {
            println!("      {}", style("(no values)").dim());
            continue;
        }
        let peak = bins.iter().map(|b| b.count).max().unwrap_or(0).max(1);
        for bin in &bins {
            let len = (bin.count * BAR_WIDTH).div_ceil(peak);
            let bar = format!("{:<width$}", "█".repeat(len), width = BAR_WIDTH);
            println!(
                "      {:>12.4} │{} {}",
                bin.lower,
                style(bar).blue(),
                style(bin.count).dim()
            );
        }
    }
    Ok(())
}

/// Five-number summary with Tukey whiskers
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoxSummary {
    pub min: f64,
    pub lower_whisker: f64,
    pub q1: f64,
    pub median: f64,
    pub q3: f64,
    pub upper_whisker: f64,
    pub max: f64,
    pub outliers: usize,
}

/// Box summary of the non-null values; `None` when there are none
pub fn box_summary(values: &[Option<f64>]) -> Option<BoxSummary> {
    let mut valid: Vec<f64> = values.iter().flatten().copied().collect();
    if valid.is_empty() {
        return None;
    }
    valid.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));

    let q1 = percentile(&valid, 25.0);
    let q3 = percentile(&valid, 75.0);
    let iqr = q3 - q1;
    let lower_fence = q1 - IQR_FACTOR * iqr;
    let upper_fence = q3 + IQR_FACTOR * iqr;

    let inside: Vec<f64> = valid
        .iter()
        .copied()
        .filter(|v| *v >= lower_fence && *v <= upper_fence)
        .collect();

    Some(BoxSummary {
        min: valid[0],
        lower_whisker: inside.first().copied().unwrap_or(q1),
        q1,
        median: percentile(&valid, 50.0),
        q3,
        upper_whisker: inside.last().copied().unwrap_or(q3),
        max: valid[valid.len() - 1],
        outliers: valid.len() - inside.len(),
    })
}

fn render_strip(summary: &BoxSummary) -> String {
    let span = summary.max - summary.min;
    let pos = |v: f64| -> usize {
        if span == 0.0 {
            STRIP_WIDTH / 2
        } else {
            (((v - summary.min) / span) * (STRIP_WIDTH - 1) as f64).round() as usize
        }
    };

    let mut strip = vec![' '; STRIP_WIDTH];
    for cell in strip
        .iter_mut()
        .take(pos(summary.upper_whisker) + 1)
        .skip(pos(summary.lower_whisker))
    {
        *cell = '─';
    }
    for cell in strip.iter_mut().take(pos(summary.q3) + 1).skip(pos(summary.q1)) {
        *cell = '█';
    }
    strip[pos(summary.median)] = '┃';
    if summary.min < summary.lower_whisker {
        strip[0] = '•';
    }
    if summary.max > summary.upper_whisker {
        strip[STRIP_WIDTH - 1] = '•';
    }
    strip.into_iter().collect()
}

/// Terminal box-and-whisker strip per numeric column
pub fn plot_boxplots(df: &DataFrame) -> Result<()> {
    section_title("Boxplots");
    for name in numeric_column_names(df) {
        let values = column_values(df, &name)?;
        let Some(summary) = box_summary(&values) else {
            continue;
        };
        println!();
        println!(
            "      {} {}",
            style(&name).cyan().bold(),
            style(format!(
                "[min {:.3} | Q1 {:.3} | median {:.3} | Q3 {:.3} | max {:.3}]",
                summary.min, summary.q1, summary.median, summary.q3, summary.max
            ))
            .dim()
        );
        println!("      {}", style(render_strip(&summary)).magenta());
        if summary.outliers > 0 {
            println!(
                "      {} outlier(s) beyond the whiskers",
                style(summary.outliers).yellow()
            );
        }
    }
    Ok(())
}

/// Pearson correlation of every numeric column pair.
///
/// Complete frames use a single `Zᵀ Z` product; frames with nulls fall back to
/// pairwise complete observations. Pairs with a constant side are NaN.
pub fn correlation_matrix(df: &DataFrame) -> Result<(Vec<String>, Mat<f64>)> {
    let names = numeric_column_names(df);
    let columns: Vec<Vec<Option<f64>>> = names
        .iter()
        .map(|name| column_values(df, name))
        .collect::<Result<_>>()?;

    let complete = columns.iter().all(|c| c.iter().all(|v| v.is_some()));
    let matrix = if complete {
        let dense: Vec<Vec<f64>> = columns
            .iter()
            .map(|c| c.iter().flatten().copied().collect())
            .collect();
        correlation_dense(&dense)
    } else {
        correlation_pairwise(&columns)
    };

    Ok((names, matrix))
}

fn correlation_dense(columns: &[Vec<f64>]) -> Mat<f64> {
    let k = columns.len();
    let n = columns.first().map_or(0, |c| c.len());
    let mut z = Mat::<f64>::zeros(n, k);
    let mut constant = vec![false; k];

    for (j, col) in columns.iter().enumerate() {
        if n == 0 {
            constant[j] = true;
            continue;
        }
        let mean = col.iter().sum::<f64>() / n as f64;
        let ss: f64 = col.iter().map(|v| (v - mean).powi(2)).sum();
        if ss == 0.0 {
            constant[j] = true;
            continue;
        }
        let norm = ss.sqrt();
        for (i, v) in col.iter().enumerate() {
            z[(i, j)] = (v - mean) / norm;
        }
    }

    let mut corr = z.transpose() * &z;
    for i in 0..k {
        for j in 0..k {
            if constant[i] || constant[j] {
                corr[(i, j)] = f64::NAN;
            } else {
                corr[(i, j)] = corr[(i, j)].clamp(-1.0, 1.0);
            }
        }
    }
    corr
}

fn correlation_pairwise(columns: &[Vec<Option<f64>>]) -> Mat<f64> {
    let k = columns.len();
    let mut corr = Mat::<f64>::zeros(k, k);
    for i in 0..k {
        for j in i..k {
            let r = pearson_pairwise(&columns[i], &columns[j]);
            corr[(i, j)] = r;
            corr[(j, i)] = r;
        }
    }
    corr
}

/// Pearson correlation over rows where both values are present
pub fn pearson_pairwise(a: &[Option<f64>], b: &[Option<f64>]) -> f64 {
    let pairs: Vec<(f64, f64)> = a
        .iter()
        .zip(b.iter())
        .filter_map(|(x, y)| Some(((*x)?, (*y)?)))
        .collect();
    if pairs.len() < 2 {
        return f64::NAN;
    }
    let n = pairs.len() as f64;
    let mean_x = pairs.iter().map(|p| p.0).sum::<f64>() / n;
    let mean_y = pairs.iter().map(|p| p.1).sum::<f64>() / n;

    let mut cov = 0.0;
    let mut var_x = 0.0;
    let mut var_y = 0.0;
    for (x, y) in &pairs {
        let dx = x - mean_x;
        let dy = y - mean_y;
        cov += dx * dy;
        var_x += dx * dx;
        var_y += dy * dy;
    }
    if var_x == 0.0 || var_y == 0.0 {
        return f64::NAN;
    }
    (cov / (var_x.sqrt() * var_y.sqrt())).clamp(-1.0, 1.0)
}

fn heat_color(r: f64) -> Color {
    if r.is_nan() {
        Color::DarkGrey
    } else if r >= 0.7 {
        Color::Red
    } else if r >= 0.3 {
        Color::Yellow
    } else if r <= -0.7 {
        Color::Blue
    } else if r <= -0.3 {
        Color::Cyan
    } else {
        Color::White
    }
}

/// Correlation matrix rendered as a colored table with two decimals
pub fn plot_correlation_heatmap(df: &DataFrame) -> Result<()> {
    section_title("Correlation heatmap");
    let (names, corr) = correlation_matrix(df)?;
    if names.is_empty() {
        println!("      {}", style("(no numeric columns)").dim());
        return Ok(());
    }

    let mut table = Table::new();
    table.load_preset(UTF8_FULL_CONDENSED);
    let mut header = vec![Cell::new("")];
    header.extend(
        (0..names.len()).map(|j| Cell::new(format!("c{}", j)).add_attribute(Attribute::Bold)),
    );
    table.set_header(header);

    for (i, name) in names.iter().enumerate() {
        let mut row = vec![Cell::new(format!("c{} {}", i, name)).add_attribute(Attribute::Bold)];
        row.extend((0..names.len()).map(|j| {
            let r = corr[(i, j)];
            let text = if r.is_nan() {
                "  -  ".to_string()
            } else {
                format!("{:+.2}", r)
            };
            Cell::new(text)
                .fg(heat_color(r))
                .set_alignment(CellAlignment::Right)
        }));
        table.add_row(row);
    }
    print_indented(&table);
    Ok(())
}
