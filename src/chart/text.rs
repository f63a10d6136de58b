//! Terminal summaries of a rendered view.

use super::generator::{format_value, truncate_label};
use crate::dashboard::{ChartSection, DashboardReport, OverviewSummary, Outcome};

const RESET: &str = "\x1b[0m";
const BAR_ANSI: &str = "\x1b[34m";
const WARN_ANSI: &str = "\x1b[33m";
const BAR_WIDTH: usize = 40;

/// Full text summary of a report: overview block (if any) then every chart
pub fn generate_report_summary(report: &DashboardReport, max_lines: usize) -> String {
    let mut blocks = vec![format!(
        "  {} ({} rows from {})",
        report.view.title(),
        report.row_count,
        report.source_file
    )];

    if let Some(overview) = &report.overview {
        blocks.push(generate_overview_summary(overview));
    }
    blocks.extend(
        report
            .sections
            .iter()
            .map(|s| generate_text_summary(s, max_lines)),
    );

    blocks.join("\n\n")
}

/// Ranked table with proportional bars for one chart
pub fn generate_text_summary(section: &ChartSection, max_lines: usize) -> String {
    let mut lines = vec![format!("  📊 {}", section.title)];

    let result = match &section.outcome {
        Outcome::Value(result) => result,
        Outcome::Error(msg) => {
            lines.push(format!("  {}⚠ Chart unavailable: {}{}", WARN_ANSI, msg, RESET));
            return lines.join("\n");
        }
    };

    if result.pairs.is_empty() {
        lines.push("  (no data)".to_string());
        return lines.join("\n");
    }

    let peak = result
        .pairs
        .iter()
        .map(|p| p.value.abs())
        .fold(0.0_f64, f64::max)
        .max(f64::MIN_POSITIVE);

    lines.push(format!(
        "  ┃ {:<32} ┃ {:>14} ┃ {:<width$}",
        section.x_label,
        section.y_label,
        "",
        width = BAR_WIDTH
    ));
    for pair in result.pairs.iter().take(max_lines) {
        let bar_len = ((pair.value.abs() / peak) * BAR_WIDTH as f64).round() as usize;
        lines.push(format!(
            "  ┃ {:<32} ┃ {:>14} ┃ {}{}{}",
            truncate_label(&pair.key, 32),
            format_value(pair.value),
            BAR_ANSI,
            "█".repeat(bar_len),
            RESET
        ));
    }

    if result.pairs.len() > max_lines {
        lines.push(format!(
            "   (Showing top {} of {} groups)",
            max_lines,
            result.pairs.len()
        ));
    }
    if result.dropped_rows > 0 {
        lines.push(format!(
            "   ({} row(s) skipped: missing {} or {})",
            result.dropped_rows, section.group_by, section.metric
        ));
    }

    lines.join("\n")
}

/// Dataset summary, descriptive statistics and missing values
pub fn generate_overview_summary(overview: &OverviewSummary) -> String {
    let mut lines = vec![
        "  Dataset Summary:".to_string(),
        format!("    Total Records: {}", overview.total_records),
    ];
    for dc in &overview.distinct_counts {
        match &dc.outcome {
            Outcome::Value(n) => lines.push(format!("    {}: {}", dc.label, n)),
            Outcome::Error(msg) => lines.push(format!("    {}: unavailable ({})", dc.label, msg)),
        }
    }

    lines.push(String::new());
    lines.push("  Descriptive Statistics:".to_string());
    lines.push(format!(
        "    {:<10} {:>8} {:>12} {:>12} {:>12} {:>12} {:>12} {:>12} {:>12}",
        "", "count", "mean", "std", "min", "25%", "50%", "75%", "max"
    ));
    for entry in &overview.statistics {
        match &entry.outcome {
            Outcome::Value(s) => lines.push(format!(
                "    {:<10} {:>8} {:>12} {:>12} {:>12} {:>12} {:>12} {:>12} {:>12}",
                entry.column,
                s.count,
                stat(s.mean),
                stat(s.std),
                stat(s.min),
                stat(s.q25),
                stat(s.median),
                stat(s.q75),
                stat(s.max)
            )),
            Outcome::Error(msg) => {
                lines.push(format!("    {:<10} unavailable ({})", entry.column, msg))
            }
        }
    }

    lines.push(String::new());
    lines.push("  Missing Values per Column:".to_string());
    if overview.missing_values.is_empty() {
        lines.push("    (none)".to_string());
    }
    for mv in &overview.missing_values {
        lines.push(format!("    {:<24} {}", mv.column, mv.missing));
    }

    lines.join("\n")
}

fn stat(value: Option<f64>) -> String {
    value
        .map(|v| format!("{:.4}", v))
        .unwrap_or_else(|| "-".to_string())
}
