//! Render command implementation.
//!
//! The render command:
//! 1. Loads the uploaded file into a session
//! 2. Renders the selected view
//! 3. Generates one SVG per chart
//! 4. Writes the JSON report

use crate::chart::{generate_bar_chart, generate_report_summary, ChartConfig};
use crate::dashboard::{Session, View};
use crate::output::{chart_path, write_report, write_svg};
use crate::utils::config::{DEFAULT_LIMIT, MAX_LIMIT};
use crate::utils::error::ChartError;
use anyhow::{Context, Result};
use log::{debug, info, warn};
use std::path::PathBuf;
use std::time::Instant;

/// Arguments for the render command
///
/// **Public** - used by main.rs to construct from CLI args
#[derive(Debug, Clone)]
pub struct RenderArgs {
    /// Uploaded CSV or XLSX file
    pub input: PathBuf,

    /// Page to render
    pub view: View,

    /// Directory receiving one SVG per chart
    pub output_dir: PathBuf,

    /// Output path for the JSON report
    pub report: PathBuf,

    /// Groups kept per chart
    pub limit: usize,

    /// Chart configuration
    pub chart_config: ChartConfig,

    /// Print text summary to stdout
    pub print_summary: bool,
}

impl Default for RenderArgs {
    fn default() -> Self {
        Self {
            input: PathBuf::new(),
            view: View::Overview,
            output_dir: PathBuf::from("charts"),
            report: PathBuf::from("report.json"),
            limit: DEFAULT_LIMIT,
            chart_config: ChartConfig::default(),
            print_summary: false,
        }
    }
}

/// Counts of what a render produced
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RenderOutcome {
    pub charts_written: usize,
    pub charts_skipped: usize,
}

/// Execute the render command
///
/// **Public** - main entry point called from main.rs
///
/// # Arguments
/// * `args` - Render configuration
///
/// # Returns
/// How many chart SVGs were written and how many were skipped.
/// Charts that cannot be computed are reported and skipped, not fatal.
///
/// # Errors
/// * Unreadable or malformed upload
/// * Limit out of range
/// * File write errors
///
/// # Example
/// ```ignore
/// let args = RenderArgs {
///     input: PathBuf::from("orders.csv"),
///     view: View::Products,
///     ..Default::default()
/// };
/// let outcome = execute_render(args)?;
/// ```
pub fn execute_render(args: RenderArgs) -> Result<RenderOutcome> {
    let start_time = Instant::now();

    info!("Rendering {} view for: {}", args.view, args.input.display());

    // Step 1: Upload
    info!("Step 1/4: Loading dataset...");
    let mut session = Session::new();
    session
        .upload_path(&args.input)
        .with_context(|| format!("Failed to load {}", args.input.display()))?;

    // Step 2: Aggregate
    info!("Step 2/4: Computing {} view...", args.view);
    let report = session
        .render(args.view, args.limit)
        .context("Failed to render view")?;

    // Step 3: Charts
    info!("Step 3/4: Generating {} chart(s)...", report.sections.len());
    let mut outcome = RenderOutcome::default();
    for section in &report.sections {
        match generate_bar_chart(section, Some(&args.chart_config)) {
            Ok(svg) => {
                let path = chart_path(&args.output_dir, &section.id);
                write_svg(&svg, &path)
                    .with_context(|| format!("Failed to write chart {}", path.display()))?;
                outcome.charts_written += 1;
            }
            Err(ChartError::EmptyData) => {
                debug!("{}: no groups, chart skipped", section.id);
                outcome.charts_skipped += 1;
            }
            Err(e) => {
                warn!("{} omitted: {}", section.title, e);
                outcome.charts_skipped += 1;
            }
        }
    }

    // Step 4: Report
    info!("Step 4/4: Writing report...");
    write_report(&report, &args.report).context("Failed to write report JSON")?;
    info!("✓ Report written to: {}", args.report.display());

    if args.print_summary {
        println!("\n{}", "=".repeat(80));
        println!("{}", generate_report_summary(&report, args.limit));
        println!("{}", "=".repeat(80));
    }

    let elapsed = start_time.elapsed();
    info!(
        "Render completed in {:.2}s ({} chart(s) written, {} skipped)",
        elapsed.as_secs_f64(),
        outcome.charts_written,
        outcome.charts_skipped
    );

    Ok(outcome)
}

/// Validate render arguments
///
/// **Public** - can be called before execute_render for early validation
pub fn validate_args(args: &RenderArgs) -> Result<()> {
    if args.input.as_os_str().is_empty() {
        anyhow::bail!("Input file cannot be empty");
    }

    if !args.input.exists() {
        anyhow::bail!("Input file not found: {}", args.input.display());
    }

    if args.limit == 0 {
        anyhow::bail!("limit must be greater than 0");
    }

    if args.limit > MAX_LIMIT {
        anyhow::bail!("limit is too large (max {})", MAX_LIMIT);
    }

    if args.chart_config.width < 200 {
        anyhow::bail!("chart width must be at least 200 pixels");
    }

    Ok(())
}
