//! Descriptive statistics for the overview page.
//!
//! Mirrors a classic `describe()`: count, mean, sample standard deviation,
//! min, quartiles and max, each column ignoring its own nulls.

use crate::parser::table::Table;
use crate::utils::error::SchemaError;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Summary of one numeric column.
///
/// Statistics that are undefined for the number of values present are `None`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnSummary {
    pub column: String,
    pub count: usize,
    pub mean: Option<f64>,
    pub std: Option<f64>,
    pub min: Option<f64>,
    pub q25: Option<f64>,
    pub median: Option<f64>,
    pub q75: Option<f64>,
    pub max: Option<f64>,
}

/// Null count of one column
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MissingCount {
    pub column: String,
    pub missing: usize,
}

/// Describe a numeric column
///
/// **Public** - used by the overview view
///
/// Non-numeric cells are skipped along with nulls.
pub fn describe_column(table: &Table, column: &str) -> Result<ColumnSummary, SchemaError> {
    let mut values: Vec<f64> = table.column(column)?.filter_map(|v| v.as_number()).collect();
    values.sort_by(f64::total_cmp);

    let count = values.len();
    let mean = (count > 0).then(|| values.iter().sum::<f64>() / count as f64);
    let std = match (mean, count) {
        (Some(mean), n) if n > 1 => {
            let sq: f64 = values.iter().map(|v| (v - mean).powi(2)).sum();
            Some((sq / (n - 1) as f64).sqrt())
        }
        _ => None,
    };

    Ok(ColumnSummary {
        column: column.to_string(),
        count,
        mean: finite(mean),
        std: finite(std),
        min: values.first().copied(),
        q25: finite(quantile(&values, 0.25)),
        median: finite(quantile(&values, 0.5)),
        q75: finite(quantile(&values, 0.75)),
        max: values.last().copied(),
    })
}

/// Statistics that overflow `f64` are reported as undefined
fn finite(stat: Option<f64>) -> Option<f64> {
    stat.filter(|v| v.is_finite())
}

/// Quantile of already-sorted values, interpolating linearly between the
/// two closest ranks
pub fn quantile(sorted: &[f64], q: f64) -> Option<f64> {
    if sorted.is_empty() || !(0.0..=1.0).contains(&q) {
        return None;
    }
    let pos = q * (sorted.len() - 1) as f64;
    let lo = pos.floor() as usize;
    let hi = pos.ceil() as usize;
    let frac = pos - lo as f64;
    Some(sorted[lo] + (sorted[hi] - sorted[lo]) * frac)
}

/// Columns with at least one null, in header order
pub fn missing_values(table: &Table) -> Vec<MissingCount> {
    table
        .null_counts()
        .into_iter()
        .map(|(column, missing)| MissingCount { column, missing })
        .collect()
}

/// Number of distinct non-null values in a column
pub fn distinct_count(table: &Table, column: &str) -> Result<usize, SchemaError> {
    let distinct: HashSet<String> = table.column(column)?.filter_map(|v| v.key()).collect();
    Ok(distinct.len())
}
