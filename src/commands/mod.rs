//! CLI command implementations.
//!
//! Commands orchestrate the various library components to perform user tasks.

pub mod render;
pub mod utils;

// Re-export main command functions
pub use render::{execute_render, validate_args, RenderArgs, RenderOutcome};
pub use utils::{display_schema, display_version, validate_report_file};
