//! Date coercion for the order/ship date columns.
//!
//! Every cell either becomes a `Value::Date` or `Value::Null`; coercion
//! never fails. Columns that are not present are left alone.

use super::table::{Table, Value};
use crate::utils::config::{
    DATETIME_FORMATS, DATE_COLUMNS, DATE_FORMATS, MAX_SERIAL_DATE, MIN_SERIAL_DATE,
};
use chrono::{DateTime, Duration, NaiveDate, NaiveDateTime};
use log::debug;

/// Coerce the configured date columns of a freshly parsed table
pub fn coerce_date_columns(table: Table) -> Table {
    DATE_COLUMNS
        .iter()
        .fold(table, |table, column| coerce_column(table, column))
}

/// Coerce one column to dates; unparseable cells become null
pub fn coerce_column(table: Table, column: &str) -> Table {
    if !table.has_column(column) {
        debug!("Date column '{}' not present, skipping coercion", column);
        return table;
    }

    let mut coerced_to_null = 0usize;
    let table = table.map_column(column, |cell| {
        let was_null = cell.is_null();
        let out = coerce_cell(cell);
        if !was_null && out.is_null() {
            coerced_to_null += 1;
        }
        out
    });

    if coerced_to_null > 0 {
        debug!(
            "Column '{}': {} unparseable value(s) replaced with null",
            column, coerced_to_null
        );
    }
    table
}

fn coerce_cell(cell: Value) -> Value {
    match cell {
        Value::Date(d) => Value::Date(d),
        Value::Text(s) => parse_date(&s).into(),
        Value::Number(n) => serial_to_date(n).into(),
        Value::Null => Value::Null,
    }
}

/// Parse a textual date in any of the accepted layouts
pub fn parse_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }

    DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(raw, fmt).ok())
        .or_else(|| {
            DATETIME_FORMATS
                .iter()
                .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
                .map(|dt| dt.date())
        })
        .or_else(|| {
            DateTime::parse_from_rfc3339(raw)
                .ok()
                .map(|dt| dt.date_naive())
        })
}

/// Spreadsheet serial day number (days since 1899-12-30) to a date
pub fn serial_to_date(serial: f64) -> Option<NaiveDate> {
    if !(MIN_SERIAL_DATE..=MAX_SERIAL_DATE).contains(&serial) {
        return None;
    }
    let epoch = NaiveDate::from_ymd_opt(1899, 12, 30)?;
    epoch.checked_add_signed(Duration::days(serial.trunc() as i64))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_parse_date_layouts() {
        assert_eq!(parse_date("2016-11-08"), Some(ymd(2016, 11, 8)));
        assert_eq!(parse_date("11/8/2016"), Some(ymd(2016, 11, 8)));
        assert_eq!(parse_date("2016/11/08"), Some(ymd(2016, 11, 8)));
        assert_eq!(parse_date("November 8, 2016"), Some(ymd(2016, 11, 8)));
        assert_eq!(parse_date("8 Nov 2016"), Some(ymd(2016, 11, 8)));
        assert_eq!(parse_date("2016-11-08 13:45:00"), Some(ymd(2016, 11, 8)));
        assert_eq!(parse_date("2016-11-08T23:30:00+02:00"), Some(ymd(2016, 11, 8)));
    }

    #[test]
    fn test_slash_dates_are_month_first() {
        assert_eq!(parse_date("01/02/2024"), Some(ymd(2024, 1, 2)));
    }

    #[test]
    fn test_parse_date_rejects_garbage() {
        assert_eq!(parse_date("not-a-date"), None);
        assert_eq!(parse_date("2016-13-40"), None);
        assert_eq!(parse_date(""), None);
    }

    #[test]
    fn test_serial_to_date() {
        assert_eq!(serial_to_date(42682.0), Some(ymd(2016, 11, 8)));
        assert_eq!(serial_to_date(0.0), None);
        assert_eq!(serial_to_date(-5.0), None);
    }

    #[test]
    fn test_coerce_column_nulls_bad_cells_only() {
        let table = Table::new(
            ["Order Date", "Sales"],
            vec![
                vec![Value::from("2016-11-08"), Value::from(10.0)],
                vec![Value::from("not-a-date"), Value::from(20.0)],
            ],
        )
        .unwrap();

        let table = coerce_column(table, "Order Date");
        let dates: Vec<&Value> = table.column("Order Date").unwrap().collect();
        let sales: Vec<&Value> = table.column("Sales").unwrap().collect();

        assert_eq!(dates, vec![&Value::Date(ymd(2016, 11, 8)), &Value::Null]);
        assert_eq!(sales, vec![&Value::Number(10.0), &Value::Number(20.0)]);
    }

    #[test]
    fn test_coerce_missing_column_is_noop() {
        let table = Table::new(["Sales"], vec![vec![Value::from(1.0)]]).unwrap();
        let coerced = coerce_date_columns(table.clone());
        assert_eq!(coerced, table);
    }
}
