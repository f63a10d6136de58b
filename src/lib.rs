//! Sales Dash
//!
//! Top-N sales insights and bar charts from CSV or Excel order exports.
//!
//! An upload is parsed into an immutable [`parser::Table`], its date columns
//! are coerced, and one of three views is rendered by running a fixed list
//! of group-by/aggregate/rank queries against it.
//!
//! ## Getting Started
//!
//! ```bash
//! sales-dash render --file orders.csv --view products --summary
//! sales-dash --help
//! ```

pub mod aggregator;
pub mod chart;
pub mod commands;
pub mod dashboard;
pub mod output;
pub mod parser;
pub mod utils;
