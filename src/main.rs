//! Sales Dash CLI
//!
//! Upload a sales export (CSV or Excel) and render one dashboard view:
//! overview statistics, product rankings or customer rankings.

use anyhow::Result;
use clap::{Parser, Subcommand};
use env_logger::Env;
use std::path::PathBuf;

use sales_dash::chart::ChartConfig;
use sales_dash::commands::{
    display_schema, display_version, execute_render, validate_args, validate_report_file,
    RenderArgs,
};
use sales_dash::dashboard::View;
use sales_dash::utils::config::{DEFAULT_CHART_WIDTH, DEFAULT_LIMIT};

/// Sales Dash - top-N sales insights from order exports
#[derive(Parser, Debug)]
#[command(name = "sales-dash")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

/// Available commands
#[derive(Subcommand, Debug)]
enum Commands {
    /// Load a dataset and render one view
    Render {
        /// CSV or XLSX file to load
        #[arg(short, long)]
        file: PathBuf,

        /// View to render
        #[arg(long, value_enum)]
        view: View,

        /// Directory for SVG charts
        #[arg(short, long, default_value = "charts")]
        output_dir: PathBuf,

        /// Output path for the JSON report
        #[arg(short, long, default_value = "report.json")]
        report: PathBuf,

        /// Number of groups per chart
        #[arg(long, env = "SALES_DASH_LIMIT", default_value_t = DEFAULT_LIMIT)]
        limit: usize,

        /// Chart width in pixels
        #[arg(long, default_value_t = DEFAULT_CHART_WIDTH)]
        width: usize,

        /// Print text summary to stdout
        #[arg(long)]
        summary: bool,
    },

    /// Validate a report JSON file
    Validate {
        /// Path to report JSON file
        #[arg(short, long)]
        file: PathBuf,
    },

    /// Display expected columns and report schema
    Schema {
        /// Show full schema details
        #[arg(long)]
        show: bool,
    },

    /// Display version information
    Version,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let log_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(Env::default().default_filter_or(log_level)).init();

    match cli.command {
        Commands::Render {
            file,
            view,
            output_dir,
            report,
            limit,
            width,
            summary,
        } => {
            let args = RenderArgs {
                input: file,
                view,
                output_dir,
                report,
                limit,
                chart_config: ChartConfig::new().with_width(width),
                print_summary: summary,
            };

            validate_args(&args)?;
            execute_render(args)?;
        }

        Commands::Validate { file } => {
            validate_report_file(file)?;
        }

        Commands::Schema { show } => {
            display_schema(show);
        }

        Commands::Version => {
            display_version();
        }
    }

    Ok(())
}
