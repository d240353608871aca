//! # texgrid
//!
//! Table authoring engine that generates LaTeX in three dialects.
//!
//! ## Features
//!
//! - **Grid Model**: rectangular cell arena with merge/split and row/column editing
//! - **Selection**: drag selection with a focused cell driving style toggles
//! - **Column Types**: left/center/right, flexible and paragraph columns with widths
//! - **Three Dialects**: `tabularray`, classic `tabular` and `booktabs`
//! - **Diagnostics**: reports what a dialect cannot express before you render
//! - **WASM Support**: compiles to WebAssembly for browser editors
//!
//! ## Usage Examples
//!
//! ### One-shot rendering
//!
//! ```rust
//! use texgrid::{table_to_latex, Dialect};
//!
//! let latex = table_to_latex(&[vec!["a", "b"], vec!["c", "d"]], Dialect::Plain);
//! assert!(latex.contains("a & b \\\\"));
//! ```
//!
//! ### Editing session
//!
//! ```rust
//! use texgrid::{Dialect, StyleCommand, TableSession};
//!
//! let mut session = TableSession::new(3, 3);
//! session.begin_selection(0, 0).unwrap();
//! session.extend_selection(0, 2);
//! session.end_selection();
//! session.merge_selection().unwrap();
//! session.set_content(0, 0, "Header").unwrap();
//! session.apply_style(&StyleCommand::ToggleBold).unwrap();
//!
//! session.set_dialect(Dialect::Modern);
//! assert!(session.serialize().contains("cell{1}{1} = {c=3}{font=\\bfseries}"));
//! ```

/// Core table engine
pub mod core;

/// Data layer - static tables and validated values
pub mod data;

/// Feature modules - packages, import and table documents
pub mod features;

/// Utility modules
pub mod utils;

/// WASM bindings (feature-gated)
#[cfg(feature = "wasm")]
pub mod wasm;

// Re-export core types
pub use crate::core::columns::{ColumnKind, ColumnSpec, ColumnSpecs, MappedColumn, Mapping};
pub use crate::core::dialect::{serialize, Dialect, GlobalOptions, Serializer};
pub use crate::core::grid::{
    apply_style, clear_styles, Cell, CellRange, CellStyle, Grid, HAlign, SelectionModel,
    StyleCommand, VAlign,
};
pub use crate::core::session::TableSession;

// Re-export data modules
pub use data::colors;
pub use data::colors::Color;

// Re-export feature modules
pub use features::packages;
#[cfg(feature = "data-loading")]
pub use features::{document, import};

// Re-export utilities
pub use utils::diagnostics;
pub use utils::error::{Axis, TableError, TableResult};

/// Render rows of cell text as a table with default options
///
/// # Arguments
/// * `rows` - Cell text, row by row; short rows are padded
/// * `dialect` - Output grammar
///
/// # Returns
/// LaTeX fragment
pub fn table_to_latex<S: AsRef<str>>(rows: &[Vec<S>], dialect: Dialect) -> String {
    table_to_latex_with_options(rows, dialect, &GlobalOptions::default())
}

/// Render rows of cell text as a table with custom options
pub fn table_to_latex_with_options<S: AsRef<str>>(
    rows: &[Vec<S>],
    dialect: Dialect,
    options: &GlobalOptions,
) -> String {
    let grid = Grid::from_rows(rows);
    let columns = ColumnSpecs::new(grid.cols());
    serialize(dialect, &grid, &columns, options)
}

/// Render a table document (TOML, JSON or YAML text)
///
/// The dialect and options stored in the document are used.
#[cfg(feature = "data-loading")]
pub fn render_document(text: &str, format: document::DocumentFormat) -> TableResult<String> {
    let session = document::TableDocument::parse(text, format)?.into_session()?;
    Ok(session.serialize())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_to_latex_per_dialect() {
        let rows = [vec!["x", "y"]];
        assert!(table_to_latex(&rows, Dialect::Modern).contains("\\begin{tblr}"));
        assert!(table_to_latex(&rows, Dialect::Plain).contains("\\begin{tabular}{|c|c|}"));
        assert!(table_to_latex(&rows, Dialect::Rules).contains("\\toprule"));
    }

    #[test]
    fn test_with_options() {
        let options = GlobalOptions::booktabs().with_caption("Scores");
        let latex = table_to_latex_with_options(&[vec!["1"]], Dialect::Rules, &options);
        assert!(latex.contains("\\caption{Scores}"));
    }

    #[test]
    fn test_ragged_rows_are_padded() {
        let rows = vec![vec!["a", "b", "c"], vec!["d"]];
        let latex = table_to_latex(&rows, Dialect::Plain);
        assert!(latex.contains("  d &  &  \\\\"));
    }

    #[cfg(feature = "data-loading")]
    #[test]
    fn test_render_document() {
        let text = r#"{"dialect": "rules", "rows": [["a", "b"]], "options": {"centering": false}}"#;
        let latex = render_document(text, document::DocumentFormat::Json).unwrap();
        assert!(latex.starts_with("\\begin{tabular}{cc}\n\\toprule"));
    }

    #[cfg(feature = "data-loading")]
    #[test]
    fn test_render_document_error() {
        let err = render_document("rows = 3", document::DocumentFormat::Toml).unwrap_err();
        assert!(matches!(err, TableError::InvalidDocument { .. }));
    }
}
