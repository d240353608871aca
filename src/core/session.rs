//! One editing session: the grid, its column registry and the selection
//!
//! Structural edits go through the session so the registry always has one
//! entry per grid column, and style commands always see the focused cell.

use tracing::{debug, trace};

use crate::core::columns::{ColumnKind, ColumnSpecs, MappedColumn};
use crate::core::dialect::{self, Dialect, GlobalOptions};
use crate::core::grid::{self, CellRange, Grid, SelectionModel, StyleCommand};
use crate::utils::error::{TableError, TableResult};

/// Editing state of a single table
#[derive(Debug, Clone)]
pub struct TableSession {
    grid: Grid,
    columns: ColumnSpecs,
    selection: SelectionModel,
    dialect: Dialect,
    options: GlobalOptions,
}

impl Default for TableSession {
    fn default() -> Self {
        Self::new(grid::DEFAULT_ROWS, grid::DEFAULT_COLS)
    }
}

impl TableSession {
    /// Empty `rows x cols` table with centred columns
    pub fn new(rows: usize, cols: usize) -> Self {
        let grid = Grid::new(rows, cols);
        let columns = ColumnSpecs::new(grid.cols());
        TableSession {
            grid,
            columns,
            selection: SelectionModel::new(),
            dialect: Dialect::default(),
            options: GlobalOptions::default(),
        }
    }

    /// Build from existing parts; the registry must match the grid width
    pub fn from_parts(grid: Grid, columns: ColumnSpecs) -> TableResult<Self> {
        if columns.len() != grid.cols() {
            return Err(TableError::invalid_document(format!(
                "{} column specs for a {}-column grid",
                columns.len(),
                grid.cols()
            )));
        }
        grid.validate()?;
        Ok(TableSession {
            grid,
            columns,
            selection: SelectionModel::new(),
            dialect: Dialect::default(),
            options: GlobalOptions::default(),
        })
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn columns(&self) -> &ColumnSpecs {
        &self.columns
    }

    pub fn selection(&self) -> &SelectionModel {
        &self.selection
    }

    pub fn dialect(&self) -> Dialect {
        self.dialect
    }

    pub fn set_dialect(&mut self, dialect: Dialect) {
        debug!(%dialect, "dialect changed");
        self.dialect = dialect;
    }

    pub fn options(&self) -> &GlobalOptions {
        &self.options
    }

    pub fn options_mut(&mut self) -> &mut GlobalOptions {
        &mut self.options
    }

    pub fn set_options(&mut self, options: GlobalOptions) {
        self.options = options;
    }

    /// Decompose into grid and registry
    pub fn into_parts(self) -> (Grid, ColumnSpecs) {
        (self.grid, self.columns)
    }

    // ------------------------------------------------------------------
    // Selection
    // ------------------------------------------------------------------

    pub fn begin_selection(&mut self, row: usize, col: usize) -> TableResult<()> {
        self.grid.cell(row, col)?;
        self.selection.begin_selection(row, col);
        Ok(())
    }

    /// Coordinates past the edge are pulled back onto the grid
    pub fn extend_selection(&mut self, row: usize, col: usize) {
        let row = row.min(self.grid.rows() - 1);
        let col = col.min(self.grid.cols() - 1);
        self.selection.extend_selection(row, col);
    }

    pub fn end_selection(&mut self) {
        self.selection.end_selection();
        trace!(range = ?self.selection.normalize(), "selection finished");
    }

    pub fn select_all(&mut self) {
        self.selection.select_all(self.grid.rows(), self.grid.cols());
    }

    /// The current selection as a range
    pub fn selected_range(&self) -> CellRange {
        self.selection.normalize()
    }

    // ------------------------------------------------------------------
    // Structure
    // ------------------------------------------------------------------

    pub fn add_row(&mut self) {
        self.grid.add_row();
    }

    pub fn add_col(&mut self) {
        self.grid.add_col();
        self.columns.push_default();
    }

    pub fn insert_row(&mut self, at: usize) -> TableResult<()> {
        self.grid.insert_row(at)
    }

    pub fn insert_col(&mut self, at: usize) -> TableResult<()> {
        self.grid.insert_col(at)?;
        self.columns.insert_default(at)
    }

    pub fn delete_row(&mut self, row: usize) -> TableResult<()> {
        self.grid.delete_row(row)?;
        self.selection.clamp_to(self.grid.rows(), self.grid.cols());
        Ok(())
    }

    pub fn delete_col(&mut self, col: usize) -> TableResult<()> {
        self.grid.delete_col(col)?;
        self.columns.remove(col)?;
        self.selection.clamp_to(self.grid.rows(), self.grid.cols());
        Ok(())
    }

    pub fn row_has_content(&self, row: usize) -> TableResult<bool> {
        self.grid.row_has_content(row)
    }

    pub fn col_has_content(&self, col: usize) -> TableResult<bool> {
        self.grid.col_has_content(col)
    }

    /// Merge the selected rectangle
    pub fn merge_selection(&mut self) -> TableResult<()> {
        let range = self.selection.normalize();
        self.grid.merge(&range)
    }

    /// Split every region whose master is selected, returning how many were split
    pub fn split_selection(&mut self) -> TableResult<usize> {
        let range = self.selection.normalize();
        self.grid.split(&range)
    }

    // ------------------------------------------------------------------
    // Content and style
    // ------------------------------------------------------------------

    pub fn set_content(
        &mut self,
        row: usize,
        col: usize,
        content: impl Into<String>,
    ) -> TableResult<bool> {
        self.grid.set_content(row, col, content)
    }

    /// Apply a style command to the selection, toggles reading the focused cell
    pub fn apply_style(&mut self, command: &StyleCommand) -> TableResult<usize> {
        let range = self.selection.normalize();
        let focused = self.selection.active_cell();
        grid::apply_style(&mut self.grid, &range, focused, command)
    }

    pub fn set_column_kind(&mut self, col: usize, kind: ColumnKind) -> TableResult<()> {
        self.columns.set_kind(col, kind)
    }

    pub fn set_column_width(&mut self, col: usize, width: Option<&str>) -> TableResult<()> {
        self.columns.set_width(col, width)
    }

    // ------------------------------------------------------------------
    // Output
    // ------------------------------------------------------------------

    /// Column tokens as the active dialect will emit them
    pub fn column_mappings(&self) -> Vec<MappedColumn> {
        self.columns.map_for_dialect(self.dialect)
    }

    /// Serialize with the active dialect and options
    pub fn serialize(&self) -> String {
        self.serialize_as(self.dialect)
    }

    pub fn serialize_as(&self, dialect: Dialect) -> String {
        dialect::serialize(dialect, &self.grid, &self.columns, &self.options)
    }
}
