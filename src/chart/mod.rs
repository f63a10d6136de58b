//! Chart rendering for computed views.
//!
//! Converts ranked aggregation results into SVG bar charts and terminal
//! summaries. The renderer never re-sorts or re-limits its input.

pub mod generator;
pub mod text;

// Re-export main types
pub use generator::{generate_bar_chart, ChartConfig};
pub use text::{generate_overview_summary, generate_report_summary, generate_text_summary};
