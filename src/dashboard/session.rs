//! The uploaded dataset held between interactions.

use super::render::render_view;
use super::schema::DashboardReport;
use super::view::View;
use crate::parser::{load_table, FileFormat, Table};
use crate::utils::config::MAX_LIMIT;
use crate::utils::error::{ParseError, SessionError};
use log::{info, warn};
use std::path::Path;

/// Owns at most one table. A new upload replaces it wholesale; a failed
/// upload leaves the session empty.
#[derive(Debug, Default)]
pub struct Session {
    dataset: Option<Dataset>,
}

#[derive(Debug)]
struct Dataset {
    name: String,
    table: Table,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse an upload and make it the current dataset
    pub fn upload(
        &mut self,
        name: &str,
        bytes: &[u8],
        format: FileFormat,
    ) -> Result<&Table, ParseError> {
        // Views stay inaccessible until a valid file arrives
        self.dataset = None;

        let table = load_table(bytes, format).map_err(|e| {
            warn!("Upload '{}' rejected: {}", name, e);
            e
        })?;
        info!("Dataset '{}' loaded", name);

        let dataset = self.dataset.insert(Dataset {
            name: name.to_string(),
            table,
        });
        Ok(&dataset.table)
    }

    /// Read a file from disk and upload it
    pub fn upload_path(&mut self, path: &Path) -> Result<&Table, ParseError> {
        self.dataset = None;
        let format = FileFormat::from_path(path)?;
        let bytes = std::fs::read(path)?;
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        self.upload(&name, &bytes, format)
    }

    pub fn table(&self) -> Option<&Table> {
        self.dataset.as_ref().map(|d| &d.table)
    }

    pub fn source_name(&self) -> Option<&str> {
        self.dataset.as_ref().map(|d| d.name.as_str())
    }

    /// Render a view of the current dataset
    ///
    /// **Public** - one dashboard interaction
    ///
    /// # Arguments
    /// * `view` - Selected page
    /// * `limit` - Groups kept per chart, `1..=MAX_LIMIT`
    ///
    /// # Errors
    /// * `SessionError::InvalidLimit` - `limit` is out of range
    /// * `SessionError::NoDataset` - nothing uploaded, or the last upload failed
    ///
    /// # Example
    /// ```ignore
    /// session.upload_path(Path::new("orders.xlsx"))?;
    /// let report = session.render(View::Customers, 10)?;
    /// ```
    pub fn render(&self, view: View, limit: usize) -> Result<DashboardReport, SessionError> {
        if !(1..=MAX_LIMIT).contains(&limit) {
            return Err(SessionError::InvalidLimit {
                limit,
                max: MAX_LIMIT,
            });
        }
        let dataset = self.dataset.as_ref().ok_or(SessionError::NoDataset)?;
        Ok(render_view(&dataset.table, view, limit, &dataset.name))
    }
}
