//! Core table engine
//!
//! This module contains the table model and its serializers:
//! - `grid`: cells, merge/split, selection and style commands
//! - `columns`: per-column types and their mapping onto each dialect
//! - `dialect`: the Modern, Plain and Rules LaTeX serializers
//! - `session`: one editing session tying the above together

pub mod columns;
pub mod dialect;
pub mod grid;
pub mod session;

// Re-export main types
pub use columns::{ColumnKind, ColumnSpec, ColumnSpecs, MappedColumn, Mapping};
pub use dialect::{serialize, Dialect, GlobalOptions, Serializer};
pub use grid::{Cell, CellRange, CellStyle, Grid, HAlign, SelectionModel, StyleCommand, VAlign};
pub use session::TableSession;
