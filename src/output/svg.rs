//! SVG chart output writer.

use super::validate_output_path;
use crate::utils::error::OutputError;
use log::{debug, info};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

/// Write SVG content to a file
///
/// **Public** - main entry point for SVG output
///
/// # Arguments
/// * `svg_content` - SVG document as a string
/// * `output_path` - Path to output SVG file
///
/// # Returns
/// Ok if file written successfully
///
/// # Errors
/// * `OutputError::WriteFailed` - I/O error during write
/// * `OutputError::InvalidPath` - Path is invalid
pub fn write_svg(svg_content: &str, output_path: impl AsRef<Path>) -> Result<(), OutputError> {
    let output_path = output_path.as_ref();

    debug!("Writing SVG to: {}", output_path.display());

    validate_output_path(output_path)?;

    if let Some(ext) = output_path.extension() {
        if ext != "svg" {
            debug!(
                "Warning: File does not have .svg extension: {}",
                output_path.display()
            );
        }
    }

    let file = File::create(output_path).map_err(OutputError::WriteFailed)?;
    let mut writer = BufWriter::new(file);

    writer
        .write_all(svg_content.as_bytes())
        .map_err(OutputError::WriteFailed)?;
    writer.flush().map_err(OutputError::WriteFailed)?;

    info!(
        "✓ Chart written to: {} ({:.2} KB)",
        output_path.display(),
        svg_content.len() as f64 / 1024.0
    );

    Ok(())
}

/// Path of a chart's SVG inside the output directory
pub fn chart_path(output_dir: &Path, chart_id: &str) -> PathBuf {
    output_dir.join(format!("{}.svg", chart_id))
}
