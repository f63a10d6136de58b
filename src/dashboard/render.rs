//! One render pass: compute everything a view displays from the table.
//!
//! Each chart and overview line is computed independently. A schema error
//! becomes an inline notice on that entry and the rest of the view still
//! renders.

use super::schema::{
    ChartSection, DashboardReport, DistinctCount, OverviewSummary, StatisticsEntry,
};
use super::view::{ChartSpec, View};
use crate::aggregator::{aggregate, describe_column, distinct_count, missing_values};
use crate::parser::Table;
use crate::utils::config::{OVERVIEW_DISTINCT_COLUMNS, SCHEMA_VERSION, SUMMARY_COLUMNS};
use log::{debug, info, warn};

/// Render a view of the table into a report
///
/// **Public** - main entry point for a dashboard interaction
///
/// # Arguments
/// * `table` - The uploaded table (never modified)
/// * `view` - Selected page
/// * `limit` - Groups kept per chart
/// * `source_file` - Upload name recorded in the report
///
/// # Returns
/// The report for the view. A chart whose query fails carries the error
/// message in place of its data; the limit is checked per chart, so a
/// zero limit turns every chart into such a notice.
///
/// # Example
/// ```ignore
/// let table = load_table(&bytes, FileFormat::Csv)?;
/// let report = render_view(&table, View::Products, 10, "orders.csv");
/// write_report(&report, "report.json")?;
/// ```
pub fn render_view(table: &Table, view: View, limit: usize, source_file: &str) -> DashboardReport {
    info!("Rendering {} view over {} rows", view, table.len());

    let overview = match view {
        View::Overview => Some(build_overview(table)),
        View::Products | View::Customers => None,
    };

    let sections: Vec<ChartSection> = view
        .charts(limit)
        .into_iter()
        .map(|spec| render_chart(table, spec))
        .collect();

    let failed = sections.iter().filter(|s| s.outcome.is_error()).count();
    if failed > 0 {
        warn!("{} of {} charts could not be computed", failed, sections.len());
    }

    DashboardReport {
        version: SCHEMA_VERSION.to_string(),
        view,
        source_file: source_file.to_string(),
        row_count: table.len(),
        overview,
        sections,
        generated_at: chrono::Utc::now().to_rfc3339(),
    }
}

/// Run one chart's query and wrap it in a section
pub fn render_chart(table: &Table, spec: ChartSpec) -> ChartSection {
    let result = aggregate(table, &spec.request);

    match &result {
        Ok(r) if r.dropped_rows > 0 => debug!(
            "{}: {} row(s) skipped for missing {} or {}",
            spec.id, r.dropped_rows, spec.request.group_by, spec.request.metric
        ),
        Err(e) => warn!("{}: {}", spec.id, e),
        _ => {}
    }

    ChartSection {
        id: spec.id.to_string(),
        title: spec.title,
        x_label: spec.x_label.to_string(),
        y_label: spec.y_label.to_string(),
        style: spec.style,
        group_by: spec.request.group_by,
        metric: spec.request.metric,
        func: spec.request.func,
        outcome: result.into(),
    }
}

/// Dataset counts, descriptive statistics and missing values
pub fn build_overview(table: &Table) -> OverviewSummary {
    let distinct_counts = OVERVIEW_DISTINCT_COLUMNS
        .iter()
        .map(|(label, column)| DistinctCount {
            label: label.to_string(),
            column: column.to_string(),
            outcome: distinct_count(table, column).into(),
        })
        .collect();

    let statistics = SUMMARY_COLUMNS
        .iter()
        .map(|column| StatisticsEntry {
            column: column.to_string(),
            outcome: describe_column(table, column).into(),
        })
        .collect();

    OverviewSummary {
        total_records: table.len(),
        distinct_counts,
        statistics,
        missing_values: missing_values(table),
    }
}
