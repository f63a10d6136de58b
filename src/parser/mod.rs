//! Upload parsing and the record table model.
//!
//! This module handles:
//! - Reading CSV and XLSX uploads
//! - Typing raw cells
//! - Coercing the date columns

pub mod dates;
pub mod ingest;
pub mod table;

// Re-export main types
pub use dates::{coerce_column, coerce_date_columns, parse_date};
pub use ingest::{load_table, load_table_from_path, FileFormat};
pub use table::{Record, Table, Value};
