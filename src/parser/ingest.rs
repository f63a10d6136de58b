//! File ingestion: CSV and XLSX uploads into a [`Table`].
//!
//! Parsing is all-or-nothing. Any malformed input yields a `ParseError`
//! and no table. Date columns are coerced as the last ingestion step.

use super::dates::coerce_date_columns;
use super::table::{Table, Value};
use crate::utils::error::ParseError;
use calamine::{open_workbook_from_rs, Data, Reader, Xlsx};
use log::{debug, info};
use std::collections::HashSet;
use std::fmt;
use std::io::Cursor;
use std::path::Path;
use std::str::FromStr;

/// Declared type of an upload
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileFormat {
    Csv,
    Xlsx,
}

impl FileFormat {
    /// Detect the format from a file extension (case-insensitive)
    pub fn from_path(path: &Path) -> Result<Self, ParseError> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or_default();
        ext.parse()
    }
}

impl FromStr for FileFormat {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "csv" => Ok(FileFormat::Csv),
            "xlsx" => Ok(FileFormat::Xlsx),
            other => Err(ParseError::UnsupportedFormat(other.to_string())),
        }
    }
}

impl fmt::Display for FileFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FileFormat::Csv => write!(f, "csv"),
            FileFormat::Xlsx => write!(f, "xlsx"),
        }
    }
}

/// Parse an uploaded byte stream into a date-coerced table
///
/// **Public** - main entry point for ingestion
///
/// # Arguments
/// * `bytes` - Raw upload contents
/// * `format` - Declared upload type
///
/// # Returns
/// The table with blank headers named `Unnamed: N`, repeated headers
/// suffixed `.1`, `.2`, ... and date columns coerced
///
/// # Errors
/// * `ParseError::EmptyInput` - no header row
/// * `ParseError::InvalidFormat` - a row is wider than the header
/// * `ParseError::Csv` / `ParseError::Xlsx` - the underlying reader failed
///
/// # Example
/// ```ignore
/// let table = load_table(&std::fs::read("orders.csv")?, FileFormat::Csv)?;
/// ```
pub fn load_table(bytes: &[u8], format: FileFormat) -> Result<Table, ParseError> {
    debug!("Parsing {} upload ({} bytes)", format, bytes.len());

    let table = match format {
        FileFormat::Csv => parse_csv(bytes)?,
        FileFormat::Xlsx => parse_xlsx(bytes)?,
    };
    let table = coerce_date_columns(table);

    info!(
        "Loaded {} rows x {} columns from {} upload",
        table.len(),
        table.headers().len(),
        format
    );
    Ok(table)
}

/// Read a file from disk, detecting its format from the extension
///
/// # Errors
/// * `ParseError::UnsupportedFormat` - extension is not `csv` or `xlsx`
/// * `ParseError::Io` - the file cannot be read
/// * Any error of [`load_table`]
pub fn load_table_from_path(path: impl AsRef<Path>) -> Result<Table, ParseError> {
    let path = path.as_ref();
    let format = FileFormat::from_path(path)?;
    let bytes = std::fs::read(path)?;
    load_table(&bytes, format)
}

fn parse_csv(bytes: &[u8]) -> Result<Table, ParseError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        // Short rows are padded by Table::new; long rows are rejected there.
        .flexible(true)
        .from_reader(bytes);

    let headers: Vec<String> = reader
        .headers()?
        .iter()
        .map(|h| h.trim().to_string())
        .collect();
    if headers.is_empty() {
        return Err(ParseError::EmptyInput);
    }
    let headers = normalize_headers(headers);

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record?;
        rows.push(record.iter().map(Value::parse).collect());
    }

    Table::new(headers, rows)
}

fn parse_xlsx(bytes: &[u8]) -> Result<Table, ParseError> {
    let mut workbook: Xlsx<_> = open_workbook_from_rs(Cursor::new(bytes))?;
    let range = workbook
        .worksheet_range_at(0)
        .ok_or(ParseError::EmptyInput)??;

    let mut sheet_rows = range.rows();
    let header_row = sheet_rows.next().ok_or(ParseError::EmptyInput)?;

    let headers: Vec<String> = header_row
        .iter()
        .map(|cell| cell.to_string().trim().to_string())
        .collect();
    let rows: Vec<Vec<Value>> = sheet_rows
        .map(|cells| cells.iter().map(excel_cell).collect())
        .collect();

    // The used range can extend past the last named or filled column
    let named = headers.iter().rposition(|h| !h.is_empty()).map_or(0, |i| i + 1);
    let filled = rows
        .iter()
        .filter_map(|row| row.iter().rposition(|v| !v.is_null()))
        .map(|i| i + 1)
        .max()
        .unwrap_or(0);
    let width = named.max(filled);
    if width == 0 {
        return Err(ParseError::EmptyInput);
    }

    let mut headers = headers;
    headers.resize(width, String::new());
    let headers = normalize_headers(headers);
    let rows = rows
        .into_iter()
        .map(|mut row| {
            row.truncate(width);
            row
        })
        .collect();

    Table::new(headers, rows)
}

/// Name blank headers `Unnamed: {index}` and suffix repeats with `.1`, `.2`, ...
///
/// Matches the column names a pandas export reads back with, so a CSV
/// written with its index column still loads.
fn normalize_headers(headers: Vec<String>) -> Vec<String> {
    let named: Vec<String> = headers
        .into_iter()
        .enumerate()
        .map(|(i, h)| if h.is_empty() { format!("Unnamed: {}", i) } else { h })
        .collect();

    let mut seen: HashSet<String> = HashSet::with_capacity(named.len());
    let mut out = Vec::with_capacity(named.len());
    for name in named {
        let mut candidate = name.clone();
        let mut n = 0;
        while seen.contains(&candidate) {
            n += 1;
            candidate = format!("{}.{}", name, n);
        }
        seen.insert(candidate.clone());
        out.push(candidate);
    }
    out
}

fn excel_cell(cell: &Data) -> Value {
    match cell {
        Data::Empty | Data::Error(_) => Value::Null,
        Data::Float(f) if f.is_finite() => Value::Number(*f),
        Data::Float(_) => Value::Null,
        Data::Int(i) => Value::Number(*i as f64),
        Data::Bool(b) => Value::Number(if *b { 1.0 } else { 0.0 }),
        Data::String(s) | Data::DateTimeIso(s) | Data::DurationIso(s) => Value::parse(s),
        Data::DateTime(dt) => dt.as_datetime().map(|d| d.date()).into(),
    }
}
