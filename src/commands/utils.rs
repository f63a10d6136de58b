use crate::dashboard::Outcome;
use crate::output::read_report;
use crate::utils::config::{DATE_COLUMNS, REQUIRED_COLUMNS, SCHEMA_VERSION};
use anyhow::Result;
use std::path::PathBuf;

/// Validate a report JSON file
pub fn validate_report_file(file_path: PathBuf) -> Result<()> {
    println!("Validating report: {}", file_path.display());

    let report = read_report(&file_path)?;
    let failed = report
        .sections
        .iter()
        .filter(|s| matches!(s.outcome, Outcome::Error(_)))
        .count();

    println!("✓ Valid report JSON");
    println!("  Version: {}", report.version);
    println!("  View: {}", report.view);
    println!("  Source: {}", report.source_file);
    println!("  Rows: {}", report.row_count);
    println!("  Charts: {} ({} unavailable)", report.sections.len(), failed);
    println!("  Overview: {}", if report.overview.is_some() { "yes" } else { "no" });

    Ok(())
}

/// Display schema information
pub fn display_schema(show_details: bool) {
    println!("Sales Dash Report Schema");
    println!("Current Version: {}", SCHEMA_VERSION);
    println!();
    println!("Expected input columns:");
    for column in REQUIRED_COLUMNS {
        let note = if DATE_COLUMNS.contains(column) { " (date)" } else { "" };
        println!("  {}{}", column, note);
    }
    println!();

    if show_details {
        println!("Report Structure:");
        println!("  version: string          - Schema version (e.g., '1.0.0')");
        println!("  view: string             - overview | products | customers");
        println!("  source_file: string      - Uploaded file name");
        println!("  row_count: number        - Rows in the uploaded table");
        println!("  overview: object?        - Overview view only");
        println!("    total_records: number");
        println!("    distinct_counts: array - Distinct Country/Segment/Category counts");
        println!("    statistics: array      - count/mean/std/min/quartiles/max per column");
        println!("    missing_values: array  - Columns with at least one null");
        println!("  sections: array          - One entry per chart");
        println!("    id, title, x_label, y_label, style, group_by, metric, func");
        println!("    outcome: object        - {{value: {{pairs, dropped_rows, group_count}}}} or {{error}}");
        println!("  generated_at: string     - ISO 8601 timestamp");
    } else {
        println!("Use --show for detailed schema information");
    }
}

/// Display version information
pub fn display_version() {
    println!("Sales Dash v{}", env!("CARGO_PKG_VERSION"));
    println!("Report Schema: v{}", SCHEMA_VERSION);
    println!();
    println!("Top-N sales insights from CSV or Excel order exports.");
}
