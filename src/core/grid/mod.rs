//! Table grid engine
//!
//! An in-memory grid of editable cells with rectangular merge/split,
//! per-cell styling and a drag selection model.
//!
//! # Architecture
//!
//! ```text
//! Selection gesture -> CellRange -> Grid mutation (merge/split/update) -> Serializer
//! ```
//!
//! # Example
//!
//! ```
//! use texgrid::core::grid::{CellRange, Grid};
//!
//! let mut grid = Grid::default();
//! grid.merge(&CellRange::new(0, 0, 1, 1)).unwrap();
//! grid.set_content(0, 0, "Header").unwrap();
//! assert!(grid.cell(1, 1).unwrap().hidden);
//! ```

mod cell;
mod model;
mod selection;
mod style;


// Re-export public API
pub use cell::{Cell, CellStyle, HAlign, VAlign};
pub use model::{CellEdit, Grid, DEFAULT_COLS, DEFAULT_ROWS};
pub use selection::{CellRange, Selection, SelectionModel};
pub use style::{apply_style, clear_styles, StyleCommand};
