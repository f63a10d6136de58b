//! Group-by / reduce / rank queries over a record table.
//!
//! Every chart on the dashboard is one [`AggregationRequest`]: group rows by
//! a column, reduce a metric column per group, sort the groups descending and
//! keep the first `limit`.

use crate::parser::table::{Table, Value};
use crate::utils::config::DEFAULT_LIMIT;
use crate::utils::error::AggregateError;
use log::debug;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use std::fmt;

/// Reduction applied to the metric column within each group
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AggregateFn {
    /// Arithmetic total
    Sum,
    /// Arithmetic average
    Mean,
    /// Number of unique non-null values of the metric column
    CountDistinct,
}

impl fmt::Display for AggregateFn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AggregateFn::Sum => write!(f, "sum"),
            AggregateFn::Mean => write!(f, "mean"),
            AggregateFn::CountDistinct => write!(f, "count_distinct"),
        }
    }
}

/// Ranking direction. The dashboard only ranks largest-first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortOrder {
    #[default]
    Descending,
}

/// One top-N query
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AggregationRequest {
    pub group_by: String,
    pub metric: String,
    pub func: AggregateFn,
    pub limit: usize,
    pub order: SortOrder,
}

impl AggregationRequest {
    pub fn new(group_by: impl Into<String>, metric: impl Into<String>, func: AggregateFn) -> Self {
        Self {
            group_by: group_by.into(),
            metric: metric.into(),
            func,
            limit: DEFAULT_LIMIT,
            order: SortOrder::Descending,
        }
    }

    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = limit;
        self
    }
}

/// A ranked (group key, value) pair
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GroupValue {
    pub key: String,
    pub value: f64,
}

impl GroupValue {
    pub fn new(key: impl Into<String>, value: f64) -> Self {
        Self {
            key: key.into(),
            value,
        }
    }
}

/// Output of [`aggregate`]
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct AggregationResult {
    /// Ranked pairs, at most `limit` long
    pub pairs: Vec<GroupValue>,

    /// Rows skipped because the group key or metric was missing
    pub dropped_rows: usize,

    /// Number of groups before truncation
    pub group_count: usize,
}

impl AggregationResult {
    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }
}

/// Per-group running state
enum Accumulator {
    Sum(f64),
    Mean { total: f64, count: usize },
    Distinct(HashSet<String>),
}

impl Accumulator {
    fn new(func: AggregateFn) -> Self {
        match func {
            AggregateFn::Sum => Accumulator::Sum(0.0),
            AggregateFn::Mean => Accumulator::Mean { total: 0.0, count: 0 },
            AggregateFn::CountDistinct => Accumulator::Distinct(HashSet::new()),
        }
    }

    fn finish(self) -> f64 {
        match self {
            Accumulator::Sum(total) => total,
            // Groups are only created with a first value, so count >= 1
            Accumulator::Mean { total, count } => total / count as f64,
            Accumulator::Distinct(seen) => seen.len() as f64,
        }
    }
}

/// Metric contribution of a single cell, `None` when the row must be dropped
enum Contribution {
    Number(f64),
    Key(String),
}

fn contribution(func: AggregateFn, cell: &Value) -> Option<Contribution> {
    match func {
        AggregateFn::Sum | AggregateFn::Mean => cell.as_number().map(Contribution::Number),
        AggregateFn::CountDistinct => cell.key().map(Contribution::Key),
    }
}

/// Run one aggregation request against a table
///
/// **Public** - main entry point for the engine
///
/// # Arguments
/// * `table` - Table to read; never modified
/// * `request` - Group column, metric column, reduction and limit
///
/// # Returns
/// Pairs sorted by value descending, first-seen group first on ties,
/// truncated to `request.limit`. An empty table yields an empty result.
///
/// # Errors
/// * `AggregateError::InvalidLimit` - `request.limit` is zero
/// * `AggregateError::Schema` - group or metric column is not in the header
/// * `AggregateError::NonFinite` - a group's value overflowed `f64`
///
/// # Example
/// ```ignore
/// let request = AggregationRequest::new("Product Name", "Sales", AggregateFn::Sum).with_limit(5);
/// let top = aggregate(&table, &request)?;
/// ```
pub fn aggregate(
    table: &Table,
    request: &AggregationRequest,
) -> Result<AggregationResult, AggregateError> {
    if request.limit == 0 {
        return Err(AggregateError::InvalidLimit);
    }
    if table.is_empty() {
        return Ok(AggregationResult::default());
    }

    let group_idx = table.column_index(&request.group_by)?;
    let metric_idx = table.column_index(&request.metric)?;

    let mut index: HashMap<String, usize> = HashMap::new();
    let mut groups: Vec<(String, Accumulator)> = Vec::new();
    let mut dropped_rows = 0usize;

    for row in table.rows() {
        let (Some(key), Some(contrib)) = (
            row[group_idx].key(),
            contribution(request.func, &row[metric_idx]),
        ) else {
            dropped_rows += 1;
            continue;
        };

        let slot = match index.get(&key) {
            Some(&slot) => slot,
            None => {
                groups.push((key.clone(), Accumulator::new(request.func)));
                index.insert(key, groups.len() - 1);
                groups.len() - 1
            }
        };

        match (&mut groups[slot].1, contrib) {
            (Accumulator::Sum(total), Contribution::Number(n)) => *total += n,
            (Accumulator::Mean { total, count }, Contribution::Number(n)) => {
                *total += n;
                *count += 1;
            }
            (Accumulator::Distinct(seen), Contribution::Key(k)) => {
                seen.insert(k);
            }
            // contribution() always matches the accumulator built for the same func
            _ => {}
        }
    }

    let group_count = groups.len();
    let mut pairs: Vec<GroupValue> = groups
        .into_iter()
        .map(|(key, acc)| GroupValue::new(key, acc.finish()))
        .collect();

    if let Some(pair) = pairs.iter().find(|p| !p.value.is_finite()) {
        return Err(AggregateError::NonFinite {
            func: request.func.to_string(),
            metric: request.metric.clone(),
            group: pair.key.clone(),
        });
    }

    // sort_by is stable: equal values keep first-seen order
    match request.order {
        SortOrder::Descending => pairs.sort_by(|a, b| b.value.total_cmp(&a.value)),
    }
    pairs.truncate(request.limit);

    debug!(
        "{}({}) by {}: {} groups, kept {}, dropped {} rows",
        request.func,
        request.metric,
        request.group_by,
        group_count,
        pairs.len(),
        dropped_rows
    );

    Ok(AggregationResult {
        pairs,
        dropped_rows,
        group_count,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::error::SchemaError;
    use pretty_assertions::assert_eq;

    fn sales_table(rows: &[(&str, f64)]) -> Table {
        Table::new(
            ["Product Name", "Sales"],
            rows.iter()
                .map(|(name, sales)| vec![Value::from(*name), Value::from(*sales)])
                .collect(),
        )
        .unwrap()
    }

    #[test]
    fn test_sum_ranks_descending() {
        let table = sales_table(&[("A", 10.0), ("B", 30.0), ("A", 5.0)]);
        let request = AggregationRequest::new("Product Name", "Sales", AggregateFn::Sum);

        let result = aggregate(&table, &request).unwrap();

        assert_eq!(
            result.pairs,
            vec![GroupValue::new("B", 30.0), GroupValue::new("A", 15.0)]
        );
        assert_eq!(result.group_count, 2);
        assert_eq!(result.dropped_rows, 0);
    }

    #[test]
    fn test_mean() {
        let table = sales_table(&[("A", 0.2), ("A", 0.4), ("B", 0.1)]);
        let request = AggregationRequest::new("Product Name", "Sales", AggregateFn::Mean);

        let result = aggregate(&table, &request).unwrap();

        assert_eq!(result.pairs[0].key, "A");
        assert!((result.pairs[0].value - 0.3).abs() < 1e-12);
        assert_eq!(result.pairs[1], GroupValue::new("B", 0.1));
    }

    #[test]
    fn test_ties_keep_first_seen_order() {
        let table = sales_table(&[("C", 5.0), ("A", 5.0), ("B", 5.0), ("D", 9.0)]);
        let request = AggregationRequest::new("Product Name", "Sales", AggregateFn::Sum);

        let keys: Vec<String> = aggregate(&table, &request)
            .unwrap()
            .pairs
            .into_iter()
            .map(|p| p.key)
            .collect();

        assert_eq!(keys, vec!["D", "C", "A", "B"]);
    }

    #[test]
    fn test_limit_truncates() {
        let table = sales_table(&[("A", 1.0), ("B", 2.0), ("C", 3.0)]);
        let request =
            AggregationRequest::new("Product Name", "Sales", AggregateFn::Sum).with_limit(2);

        let result = aggregate(&table, &request).unwrap();

        assert_eq!(result.pairs.len(), 2);
        assert_eq!(result.group_count, 3);
        assert_eq!(result.pairs[0].key, "C");
    }

    #[test]
    fn test_nulls_and_text_metrics_are_dropped() {
        let table = Table::new(
            ["Product Name", "Sales"],
            vec![
                vec![Value::from("A"), Value::from(10.0)],
                vec![Value::Null, Value::from(99.0)],
                vec![Value::from("A"), Value::Null],
                vec![Value::from("B"), Value::from("n/a-ish")],
            ],
        )
        .unwrap();
        let request = AggregationRequest::new("Product Name", "Sales", AggregateFn::Sum);

        let result = aggregate(&table, &request).unwrap();

        assert_eq!(result.pairs, vec![GroupValue::new("A", 10.0)]);
        assert_eq!(result.dropped_rows, 3);
    }

    #[test]
    fn test_count_distinct() {
        let table = Table::new(
            ["Customer Name", "Order ID"],
            vec![
                vec![Value::from("X"), Value::from("O-1")],
                vec![Value::from("X"), Value::from("O-1")],
                vec![Value::from("Y"), Value::from("O-2")],
                vec![Value::from("Y"), Value::from("O-3")],
                vec![Value::from("Y"), Value::Null],
            ],
        )
        .unwrap();
        let request =
            AggregationRequest::new("Customer Name", "Order ID", AggregateFn::CountDistinct);

        let result = aggregate(&table, &request).unwrap();

        assert_eq!(
            result.pairs,
            vec![GroupValue::new("Y", 2.0), GroupValue::new("X", 1.0)]
        );
        assert_eq!(result.dropped_rows, 1);
    }

    #[test]
    fn test_empty_table_is_not_an_error() {
        let table = Table::new(["Product Name", "Sales"], vec![]).unwrap();
        let request = AggregationRequest::new("Product Name", "Sales", AggregateFn::Sum);

        let result = aggregate(&table, &request).unwrap();

        assert!(result.is_empty());
    }

    #[test]
    fn test_missing_column() {
        let table = sales_table(&[("A", 1.0)]);
        let request = AggregationRequest::new("Product Name", "Profit", AggregateFn::Sum);

        assert_eq!(
            aggregate(&table, &request),
            Err(AggregateError::Schema(SchemaError::MissingColumn(
                "Profit".to_string()
            )))
        );
    }

    #[test]
    fn test_zero_limit_is_rejected() {
        let table = sales_table(&[("A", 1.0)]);
        let request =
            AggregationRequest::new("Product Name", "Sales", AggregateFn::Sum).with_limit(0);

        assert_eq!(aggregate(&table, &request), Err(AggregateError::InvalidLimit));
    }

    #[test]
    fn test_overflowing_sum_is_an_error() {
        let table = sales_table(&[("A", 1e308), ("B", 1.0), ("A", 1e308)]);
        let request = AggregationRequest::new("Product Name", "Sales", AggregateFn::Sum);

        let err = aggregate(&table, &request).unwrap_err();

        assert_eq!(
            err,
            AggregateError::NonFinite {
                func: "sum".to_string(),
                metric: "Sales".to_string(),
                group: "A".to_string(),
            }
        );
        assert_eq!(err.to_string(), "sum of Sales for 'A' is too large to represent");
    }

    #[test]
    fn test_overflowing_mean_is_an_error() {
        let table = sales_table(&[("A", 1e308), ("A", 1e308)]);
        let request = AggregationRequest::new("Product Name", "Sales", AggregateFn::Mean);

        assert!(matches!(
            aggregate(&table, &request),
            Err(AggregateError::NonFinite { .. })
        ));
    }

    #[test]
    fn test_numeric_group_keys() {
        let table = Table::new(
            ["Postal Code", "Sales"],
            vec![
                vec![Value::from(10024.0), Value::from(1.0)],
                vec![Value::from(10024.0), Value::from(2.0)],
            ],
        )
        .unwrap();
        let request = AggregationRequest::new("Postal Code", "Sales", AggregateFn::Sum);

        let result = aggregate(&table, &request).unwrap();

        assert_eq!(result.pairs, vec![GroupValue::new("10024", 3.0)]);
    }
}
