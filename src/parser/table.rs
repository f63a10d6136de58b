//! In-memory record table built from an upload.
//!
//! A table is an ordered header plus rows holding exactly one cell per
//! header. It is immutable once built; a new upload builds a new table.

use crate::utils::config::NULL_MARKERS;
use crate::utils::error::{ParseError, SchemaError};
use chrono::NaiveDate;
use std::collections::HashSet;

/// A single cell
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Null,
    Number(f64),
    Text(String),
    Date(NaiveDate),
}

impl Value {
    /// Type a raw text cell.
    ///
    /// Null markers become `Null`, finite numbers become `Number`,
    /// everything else stays `Text` (trimmed).
    pub fn parse(raw: &str) -> Self {
        let trimmed = raw.trim();
        if NULL_MARKERS.contains(&trimmed) {
            return Value::Null;
        }
        match trimmed.parse::<f64>() {
            Ok(n) if n.is_finite() => Value::Number(n),
            _ => Value::Text(trimmed.to_string()),
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Numeric view of the cell, `None` for anything that is not a number
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Value::Number(n) => Some(*n),
            _ => None,
        }
    }

    /// String form used as a group key or distinct key; `None` for nulls
    pub fn key(&self) -> Option<String> {
        match self {
            Value::Null => None,
            Value::Text(s) => Some(s.clone()),
            Value::Number(n) => Some(format_number(*n)),
            Value::Date(d) => Some(d.format("%Y-%m-%d").to_string()),
        }
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Text(s.to_string())
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Value::Number(n)
    }
}

impl From<NaiveDate> for Value {
    fn from(d: NaiveDate) -> Self {
        Value::Date(d)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self {
        v.map(Into::into).unwrap_or(Value::Null)
    }
}

/// Integral values print without a fractional part (`2016`, not `2016.0`)
fn format_number(n: f64) -> String {
    if n.fract() == 0.0 && n.abs() < 1e15 {
        format!("{}", n as i64)
    } else {
        format!("{}", n)
    }
}

/// Borrowed view of one row as a column-name mapping
#[derive(Debug, Clone, Copy)]
pub struct Record<'a> {
    headers: &'a [String],
    cells: &'a [Value],
}

impl<'a> Record<'a> {
    pub fn get(&self, column: &str) -> Option<&'a Value> {
        self.headers
            .iter()
            .position(|h| h == column)
            .map(|i| &self.cells[i])
    }
}

/// Ordered header plus rows of typed cells
#[derive(Debug, Clone, PartialEq)]
pub struct Table {
    headers: Vec<String>,
    rows: Vec<Vec<Value>>,
}

impl Table {
    /// Build a table, rejecting empty/duplicate header names and rows
    /// wider than the header. Short rows are padded with `Null`.
    pub fn new<H: Into<String>>(
        headers: impl IntoIterator<Item = H>,
        rows: Vec<Vec<Value>>,
    ) -> Result<Self, ParseError> {
        let headers: Vec<String> = headers.into_iter().map(Into::into).collect();

        let mut seen = HashSet::new();
        for (i, name) in headers.iter().enumerate() {
            if name.trim().is_empty() {
                return Err(ParseError::InvalidFormat(format!(
                    "column {} has an empty header",
                    i + 1
                )));
            }
            if !seen.insert(name.as_str()) {
                return Err(ParseError::InvalidFormat(format!(
                    "duplicate column header: {}",
                    name
                )));
            }
        }

        let width = headers.len();
        let mut rows = rows;
        for (i, row) in rows.iter_mut().enumerate() {
            if row.len() > width {
                return Err(ParseError::InvalidFormat(format!(
                    "row {} has {} fields but the header has {}",
                    i + 1,
                    row.len(),
                    width
                )));
            }
            row.resize(width, Value::Null);
        }

        Ok(Self { headers, rows })
    }

    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.headers.iter().any(|h| h == name)
    }

    /// Position of a column in the header
    pub fn column_index(&self, name: &str) -> Result<usize, SchemaError> {
        self.headers
            .iter()
            .position(|h| h == name)
            .ok_or_else(|| SchemaError::MissingColumn(name.to_string()))
    }

    /// Cells of one column, top to bottom
    pub fn column(&self, name: &str) -> Result<impl Iterator<Item = &Value> + '_, SchemaError> {
        let idx = self.column_index(name)?;
        Ok(self.rows.iter().map(move |row| &row[idx]))
    }

    /// Raw row slices in table order
    pub fn rows(&self) -> impl Iterator<Item = &[Value]> + '_ {
        self.rows.iter().map(Vec::as_slice)
    }

    pub fn records(&self) -> impl Iterator<Item = Record<'_>> + '_ {
        self.rows.iter().map(move |cells| Record {
            headers: &self.headers,
            cells,
        })
    }

    /// Rewrite every cell of a column, consuming the table.
    ///
    /// Used only while a table is being built; a missing column is a no-op.
    pub fn map_column(mut self, name: &str, mut f: impl FnMut(Value) -> Value) -> Self {
        if let Ok(idx) = self.column_index(name) {
            for row in &mut self.rows {
                let cell = std::mem::replace(&mut row[idx], Value::Null);
                row[idx] = f(cell);
            }
        }
        self
    }

    /// Per-column null counts in header order, only columns with at least one null
    pub fn null_counts(&self) -> Vec<(String, usize)> {
        self.headers
            .iter()
            .enumerate()
            .map(|(idx, name)| {
                let nulls = self.rows.iter().filter(|row| row[idx].is_null()).count();
                (name.clone(), nulls)
            })
            .filter(|(_, nulls)| *nulls > 0)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_value_parse() {
        assert_eq!(Value::parse("  12.5 "), Value::Number(12.5));
        assert_eq!(Value::parse("CA-2016-152156"), Value::Text("CA-2016-152156".to_string()));
        assert_eq!(Value::parse(""), Value::Null);
        assert_eq!(Value::parse("NaN"), Value::Null);
        assert_eq!(Value::parse("#N/A"), Value::Null);
        assert_eq!(Value::parse("inf"), Value::Text("inf".to_string()));
    }

    #[test]
    fn test_value_key() {
        assert_eq!(Value::Number(2016.0).key(), Some("2016".to_string()));
        assert_eq!(Value::Number(0.25).key(), Some("0.25".to_string()));
        assert_eq!(
            Value::Date(NaiveDate::from_ymd_opt(2016, 11, 8).unwrap()).key(),
            Some("2016-11-08".to_string())
        );
        assert_eq!(Value::Null.key(), None);
    }

    #[test]
    fn test_new_pads_short_rows() {
        let table = Table::new(
            ["a", "b"],
            vec![vec![Value::from("x")], vec![Value::from("y"), Value::from(1.0)]],
        )
        .unwrap();

        assert_eq!(table.len(), 2);
        assert_eq!(table.records().next().unwrap().get("b"), Some(&Value::Null));
    }

    #[test]
    fn test_new_rejects_wide_rows() {
        let result = Table::new(["a"], vec![vec![Value::from("x"), Value::from("y")]]);
        assert!(matches!(result, Err(ParseError::InvalidFormat(_))));
    }

    #[test]
    fn test_new_rejects_duplicate_headers() {
        let result = Table::new(["a", "a"], vec![]);
        assert!(matches!(result, Err(ParseError::InvalidFormat(_))));
    }

    #[test]
    fn test_column_missing() {
        let table = Table::new(["a"], vec![]).unwrap();
        assert_eq!(
            table.column_index("b"),
            Err(SchemaError::MissingColumn("b".to_string()))
        );
    }

    #[test]
    fn test_null_counts_only_reports_columns_with_nulls() {
        let table = Table::new(
            ["a", "b", "c"],
            vec![
                vec![Value::Null, Value::from(1.0), Value::Null],
                vec![Value::from("x"), Value::from(2.0), Value::Null],
            ],
        )
        .unwrap();

        assert_eq!(
            table.null_counts(),
            vec![("a".to_string(), 1), ("c".to_string(), 2)]
        );
    }
}
