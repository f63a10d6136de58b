//! Aggregation of the record table into ranked summaries.
//!
//! This module turns the uploaded table into:
//! - Top-N group rankings (sum, mean, distinct count)
//! - Descriptive statistics for numeric columns
//! - Missing-value and distinct-value counts

pub mod engine;
pub mod stats;

// Re-export main types and functions
pub use engine::{
    aggregate, AggregateFn, AggregationRequest, AggregationResult, GroupValue, SortOrder,
};
pub use stats::{
    describe_column, distinct_count, missing_values, quantile, ColumnSummary, MissingCount,
};
