//! Report JSON schema definitions.
//!
//! This module defines the structure of the report we write to disk for
//! every rendered view. Schema is versioned to allow future evolution.

use super::view::{ChartStyle, View};
use crate::aggregator::{AggregateFn, AggregationResult, ColumnSummary, MissingCount};
use serde::{Deserialize, Serialize};

/// Either a computed value or the notice shown in its place
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Outcome<T> {
    Value(T),
    Error(String),
}

impl<T> Outcome<T> {
    pub fn value(&self) -> Option<&T> {
        match self {
            Outcome::Value(v) => Some(v),
            Outcome::Error(_) => None,
        }
    }

    pub fn is_error(&self) -> bool {
        matches!(self, Outcome::Error(_))
    }
}

impl<T, E: std::fmt::Display> From<Result<T, E>> for Outcome<T> {
    fn from(result: Result<T, E>) -> Self {
        match result {
            Ok(v) => Outcome::Value(v),
            Err(e) => Outcome::Error(e.to_string()),
        }
    }
}

/// Top-level report written to JSON
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardReport {
    /// Schema version for compatibility checking
    pub version: String,

    /// Which page was rendered
    pub view: View,

    /// Name of the uploaded file
    pub source_file: String,

    /// Rows in the uploaded table
    pub row_count: usize,

    /// Overview content (overview view only)
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub overview: Option<OverviewSummary>,

    /// One entry per chart, in display order
    pub sections: Vec<ChartSection>,

    /// Timestamp when the report was generated
    pub generated_at: String,
}

/// A chart slot on a view
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartSection {
    pub id: String,
    pub title: String,
    pub x_label: String,
    pub y_label: String,
    pub style: ChartStyle,
    pub group_by: String,
    pub metric: String,
    pub func: AggregateFn,
    pub outcome: Outcome<AggregationResult>,
}

/// Dataset summary shown on the overview page
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OverviewSummary {
    pub total_records: usize,
    pub distinct_counts: Vec<DistinctCount>,
    pub statistics: Vec<StatisticsEntry>,
    pub missing_values: Vec<MissingCount>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DistinctCount {
    pub label: String,
    pub column: String,
    pub outcome: Outcome<usize>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatisticsEntry {
    pub column: String,
    pub outcome: Outcome<ColumnSummary>,
}
