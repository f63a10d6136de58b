//! Dashboard views, render pass and session state.
//!
//! A view is a fixed list of chart queries. Rendering runs every query of
//! the selected view against the current table and collects the results
//! (or per-chart notices) into a [`DashboardReport`].

pub mod render;
pub mod schema;
pub mod session;
pub mod view;

// Re-export main types
pub use render::{build_overview, render_chart, render_view};
pub use schema::{
    ChartSection, DashboardReport, DistinctCount, OverviewSummary, Outcome, StatisticsEntry,
};
pub use session::Session;
pub use view::{ChartSpec, ChartStyle, View};
