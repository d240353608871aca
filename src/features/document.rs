//! Table documents: a serializable description of one table
//!
//! A document lists cell text row by row, the merged regions and the
//! per-cell styles, next to the column registry, dialect and options. It is
//! the input format of the command line tool and can be written as TOML,
//! JSON or YAML:
//!
//! ```toml
//! dialect = "rules"
//! rows = [["Name", "Score"], ["Ada", "10"]]
//!
//! [[merges]]
//! row = 0
//! col = 0
//! cols = 2
//! ```

use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{debug, info};

use crate::core::columns::{ColumnSpec, ColumnSpecs};
use crate::core::dialect::{Dialect, GlobalOptions};
use crate::core::grid::{CellRange, CellStyle, Grid};
use crate::core::session::TableSession;
use crate::utils::error::{TableError, TableResult};

/// On-disk encoding of a document
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentFormat {
    Toml,
    Json,
    Yaml,
}

impl DocumentFormat {
    /// Guess from a file extension
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?.to_lowercase();
        match ext.as_str() {
            "toml" => Some(DocumentFormat::Toml),
            "json" => Some(DocumentFormat::Json),
            "yaml" | "yml" => Some(DocumentFormat::Yaml),
            _ => None,
        }
    }
}

fn one() -> usize {
    1
}

/// A merged region, top-left corner plus spans
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MergeSpec {
    pub row: usize,
    pub col: usize,
    #[serde(default = "one")]
    pub rows: usize,
    #[serde(default = "one")]
    pub cols: usize,
}

impl MergeSpec {
    /// The covered rectangle, or an error when the spans run past `usize`
    pub fn range(&self) -> TableResult<CellRange> {
        let end_row = self.row.checked_add(self.rows.max(1));
        let end_col = self.col.checked_add(self.cols.max(1));
        match (end_row, end_col) {
            (Some(end_row), Some(end_col)) => {
                Ok(CellRange::new(self.row, self.col, end_row - 1, end_col - 1))
            }
            _ => Err(TableError::invalid_document(format!(
                "merge at ({}, {}) spans {}x{} cells",
                self.row, self.col, self.rows, self.cols
            ))),
        }
    }
}

/// Style of one visible cell
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StyleSpec {
    pub row: usize,
    pub col: usize,
    #[serde(flatten)]
    pub style: CellStyle,
}

/// Serializable table
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TableDocument {
    pub dialect: Dialect,
    /// Cell text, row by row; short rows are padded
    pub rows: Vec<Vec<String>>,
    pub options: GlobalOptions,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub columns: Vec<ColumnSpec>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub merges: Vec<MergeSpec>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub styles: Vec<StyleSpec>,
}

impl TableDocument {
    /// Parse a document from text
    pub fn parse(text: &str, format: DocumentFormat) -> TableResult<Self> {
        let parsed = match format {
            DocumentFormat::Toml => toml::from_str(text).map_err(|e| e.to_string()),
            DocumentFormat::Json => serde_json::from_str(text).map_err(|e| e.to_string()),
            DocumentFormat::Yaml => serde_yaml::from_str(text).map_err(|e| e.to_string()),
        };
        parsed.map_err(TableError::invalid_document)
    }

    /// Encode as text
    pub fn to_text(&self, format: DocumentFormat) -> TableResult<String> {
        let encoded = match format {
            DocumentFormat::Toml => toml::to_string_pretty(self).map_err(|e| e.to_string()),
            DocumentFormat::Json => serde_json::to_string_pretty(self).map_err(|e| e.to_string()),
            DocumentFormat::Yaml => serde_yaml::to_string(self).map_err(|e| e.to_string()),
        };
        encoded.map_err(TableError::invalid_document)
    }

    /// Load a document, the format following the file extension
    pub fn load(path: &Path) -> TableResult<Self> {
        let format = DocumentFormat::from_path(path).ok_or_else(|| {
            TableError::invalid_document(format!(
                "cannot tell the format of {} (expected .toml, .json or .yaml)",
                path.display()
            ))
        })?;
        let content = std::fs::read_to_string(path)?;
        let document = Self::parse(&content, format)?;
        info!("Loaded table document from {}", path.display());
        Ok(document)
    }

    /// Save a document, the format following the file extension
    pub fn save(&self, path: &Path) -> TableResult<()> {
        let format = DocumentFormat::from_path(path).unwrap_or(DocumentFormat::Toml);
        let content = self.to_text(format)?;
        std::fs::write(path, content)?;
        info!("Saved table document to {}", path.display());
        Ok(())
    }

    /// Snapshot an editing session
    pub fn from_session(session: &TableSession) -> Self {
        let grid = session.grid();

        let rows = grid
            .iter_rows()
            .map(|cells| cells.iter().map(|cell| cell.content.clone()).collect())
            .collect();

        let merges = grid
            .regions()
            .into_iter()
            .map(|region| MergeSpec {
                row: region.min_row,
                col: region.min_col,
                rows: region.row_count(),
                cols: region.col_count(),
            })
            .collect();

        let mut styles = Vec::new();
        for (row, cells) in grid.iter_rows().enumerate() {
            for (col, cell) in cells.iter().enumerate() {
                if !cell.hidden && !cell.style.is_unset() {
                    styles.push(StyleSpec {
                        row,
                        col,
                        style: cell.style.clone(),
                    });
                }
            }
        }

        TableDocument {
            dialect: session.dialect(),
            rows,
            options: session.options().clone(),
            columns: session.columns().as_slice().to_vec(),
            merges,
            styles,
        }
    }

    /// Build an editing session.
    ///
    /// The grid is as wide as the longest row or the column list, whichever
    /// is larger. Merges may not overlap, and styles may only target
    /// visible cells.
    pub fn into_session(self) -> TableResult<TableSession> {
        let width = self
            .rows
            .iter()
            .map(Vec::len)
            .chain(std::iter::once(self.columns.len()))
            .max()
            .unwrap_or(0)
            .max(1);

        let mut rows = self.rows;
        if rows.is_empty() {
            rows.push(Vec::new());
        }
        for row in &mut rows {
            row.resize(width, String::new());
        }
        let mut grid = Grid::from_rows(&rows);

        let mut merged: Vec<CellRange> = Vec::new();
        for merge in &self.merges {
            let range = merge.range()?;
            if let Some(other) = merged.iter().find(|r| r.intersects(&range)) {
                return Err(TableError::invalid_document(format!(
                    "merge at ({}, {}) overlaps the merge at ({}, {})",
                    merge.row, merge.col, other.min_row, other.min_col
                )));
            }
            // Text of covered cells is dropped by the merge
            grid.merge(&range)?;
            merged.push(range);
        }

        for spec in self.styles {
            let applied = grid.update_cell(spec.row, spec.col, |edit| *edit.style = spec.style)?;
            if !applied {
                return Err(TableError::invalid_document(format!(
                    "style targets the covered cell ({}, {})",
                    spec.row, spec.col
                )));
            }
        }

        let mut columns = self.columns;
        columns.resize(width, ColumnSpec::default());

        let mut session = TableSession::from_parts(grid, ColumnSpecs::from_specs(columns))?;
        session.set_dialect(self.dialect);
        session.set_options(self.options);
        debug!(
            rows = session.grid().rows(),
            cols = session.grid().cols(),
            "built session from document"
        );
        Ok(session)
    }
}
