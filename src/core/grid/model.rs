//! Canonical grid store
//!
//! The grid is a row-major arena of fixed-size cells. A merged region is
//! encoded by span counts on its top-left master and a `hidden` flag on
//! every other cell of its footprint; no cell is ever removed by merge or
//! split.

use tracing::{debug, trace};

use super::cell::{Cell, CellStyle};
use super::selection::CellRange;
use crate::utils::error::{Axis, TableError, TableResult};

/// Default grid size of a freshly opened table
pub const DEFAULT_ROWS: usize = 4;
pub const DEFAULT_COLS: usize = 4;

/// Mutable view of the user-editable part of a cell.
///
/// Spans and visibility are owned by the grid; updates only ever see
/// content and style.
pub struct CellEdit<'a> {
    pub content: &'a mut String,
    pub style: &'a mut CellStyle,
}

/// Rectangular matrix of cells
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    rows: usize,
    cols: usize,
    cells: Vec<Cell>,
}

impl Grid {
    /// Create an empty `rows x cols` grid (each dimension at least 1)
    pub fn new(rows: usize, cols: usize) -> Self {
        let rows = rows.max(1);
        let cols = cols.max(1);
        Grid {
            rows,
            cols,
            cells: vec![Cell::empty(); rows * cols],
        }
    }

    /// Build an unmerged grid from rows of text. Short rows are padded.
    pub fn from_rows<S: AsRef<str>>(data: &[Vec<S>]) -> Self {
        let cols = data.iter().map(Vec::len).max().unwrap_or(0);
        let mut grid = Grid::new(data.len(), cols);
        for (r, row) in data.iter().enumerate() {
            for (c, text) in row.iter().enumerate() {
                grid.cells[r * grid.cols + c].content = text.as_ref().to_string();
            }
        }
        grid
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    fn index(&self, row: usize, col: usize) -> usize {
        row * self.cols + col
    }

    fn check(&self, row: usize, col: usize) -> TableResult<()> {
        if row < self.rows && col < self.cols {
            Ok(())
        } else {
            Err(TableError::out_of_bounds(row, col, self.rows, self.cols))
        }
    }

    fn check_range(&self, range: &CellRange) -> TableResult<()> {
        self.check(range.min_row, range.min_col)?;
        self.check(range.max_row, range.max_col)
    }

    /// Cell at `(row, col)`
    pub fn cell(&self, row: usize, col: usize) -> TableResult<&Cell> {
        self.check(row, col)?;
        Ok(&self.cells[self.index(row, col)])
    }

    /// Cell at `(row, col)`, `None` when out of range
    pub fn get(&self, row: usize, col: usize) -> Option<&Cell> {
        if row < self.rows && col < self.cols {
            Some(&self.cells[self.index(row, col)])
        } else {
            None
        }
    }

    /// The cells of one row, left to right
    pub fn row(&self, row: usize) -> TableResult<&[Cell]> {
        self.check(row, 0)?;
        let start = self.index(row, 0);
        Ok(&self.cells[start..start + self.cols])
    }

    /// Iterate over all rows
    pub fn iter_rows(&self) -> impl Iterator<Item = &[Cell]> {
        self.cells.chunks(self.cols)
    }

    /// Every visible master with a span larger than 1x1, row-major, with
    /// its footprint
    pub fn regions(&self) -> Vec<CellRange> {
        let mut regions = Vec::new();
        for r in 0..self.rows {
            for c in 0..self.cols {
                let cell = &self.cells[self.index(r, c)];
                if cell.is_master() {
                    regions.push(CellRange::from_span(r, c, cell.row_span, cell.col_span));
                }
            }
        }
        regions
    }

    /// The master owning `(row, col)`: the cell itself when visible,
    /// otherwise the master whose footprint covers it
    pub fn master_of(&self, row: usize, col: usize) -> TableResult<(usize, usize)> {
        self.check(row, col)?;
        if !self.cells[self.index(row, col)].hidden {
            return Ok((row, col));
        }
        for mr in (0..=row).rev() {
            for mc in (0..=col).rev() {
                let cell = &self.cells[self.index(mr, mc)];
                if cell.is_master()
                    && CellRange::from_span(mr, mc, cell.row_span, cell.col_span).contains(row, col)
                {
                    return Ok((mr, mc));
                }
            }
        }
        Ok((row, col))
    }

    // ------------------------------------------------------------------
    // Row / column structure
    // ------------------------------------------------------------------

    /// Append a row of fresh cells
    pub fn add_row(&mut self) {
        // Appending never crosses a region, so this cannot fail
        let _ = self.insert_row(self.rows);
    }

    /// Append a column of fresh cells
    pub fn add_col(&mut self) {
        let _ = self.insert_col(self.cols);
    }

    /// Insert a row of fresh cells before index `at` (`at == rows` appends).
    ///
    /// A region running across the insertion boundary grows by one row and
    /// the new cells under it become its shadows.
    pub fn insert_row(&mut self, at: usize) -> TableResult<()> {
        if at > self.rows {
            return Err(TableError::out_of_bounds(at, 0, self.rows, self.cols));
        }

        let crossing: Vec<CellRange> = self
            .regions()
            .into_iter()
            .filter(|region| region.min_row < at && at <= region.max_row)
            .collect();

        for region in &crossing {
            let idx = self.index(region.min_row, region.min_col);
            self.cells[idx].row_span += 1;
        }

        let new_row: Vec<Cell> = (0..self.cols)
            .map(|c| {
                if crossing
                    .iter()
                    .any(|region| (region.min_col..=region.max_col).contains(&c))
                {
                    Cell::shadow()
                } else {
                    Cell::empty()
                }
            })
            .collect();

        let start = at * self.cols;
        self.cells.splice(start..start, new_row);
        self.rows += 1;

        debug!(at, rows = self.rows, grown = crossing.len(), "inserted row");
        Ok(())
    }

    /// Insert a column of fresh cells before index `at` (`at == cols` appends).
    pub fn insert_col(&mut self, at: usize) -> TableResult<()> {
        if at > self.cols {
            return Err(TableError::out_of_bounds(0, at, self.rows, self.cols));
        }

        let crossing: Vec<CellRange> = self
            .regions()
            .into_iter()
            .filter(|region| region.min_col < at && at <= region.max_col)
            .collect();

        for region in &crossing {
            let idx = self.index(region.min_row, region.min_col);
            self.cells[idx].col_span += 1;
        }

        let new_cols = self.cols + 1;
        let mut cells = Vec::with_capacity(self.rows * new_cols);
        for (r, row) in self.cells.chunks(self.cols).enumerate() {
            cells.extend_from_slice(&row[..at]);
            let covered = crossing
                .iter()
                .any(|region| (region.min_row..=region.max_row).contains(&r));
            cells.push(if covered { Cell::shadow() } else { Cell::empty() });
            cells.extend_from_slice(&row[at..]);
        }

        self.cells = cells;
        self.cols = new_cols;

        debug!(at, cols = self.cols, grown = crossing.len(), "inserted column");
        Ok(())
    }

    /// Remove row `row`.
    ///
    /// Refuses to remove the last row. Regions crossing the row shrink by
    /// one; a region whose master sits on the row hands mastership to the
    /// cell below it.
    pub fn delete_row(&mut self, row: usize) -> TableResult<()> {
        self.check(row, 0)?;
        if self.rows == 1 {
            return Err(TableError::minimum_size(Axis::Row));
        }

        for region in self.regions() {
            if !(region.min_row..=region.max_row).contains(&row) {
                continue;
            }
            let master_idx = self.index(region.min_row, region.min_col);
            if region.min_row < row {
                self.cells[master_idx].row_span -= 1;
            } else if region.row_count() > 1 {
                let style = self.cells[master_idx].style.clone();
                let heir_idx = self.index(row + 1, region.min_col);
                let heir = &mut self.cells[heir_idx];
                heir.hidden = false;
                heir.row_span = region.row_count() - 1;
                heir.col_span = region.col_count();
                heir.style = style;
            }
        }

        let start = row * self.cols;
        self.cells.drain(start..start + self.cols);
        self.rows -= 1;

        debug!(row, rows = self.rows, "deleted row");
        Ok(())
    }

    /// Remove column `col`. Mirrors [`Grid::delete_row`].
    pub fn delete_col(&mut self, col: usize) -> TableResult<()> {
        self.check(0, col)?;
        if self.cols == 1 {
            return Err(TableError::minimum_size(Axis::Column));
        }

        for region in self.regions() {
            if !(region.min_col..=region.max_col).contains(&col) {
                continue;
            }
            let master_idx = self.index(region.min_row, region.min_col);
            if region.min_col < col {
                self.cells[master_idx].col_span -= 1;
            } else if region.col_count() > 1 {
                let style = self.cells[master_idx].style.clone();
                let heir_idx = self.index(region.min_row, col + 1);
                let heir = &mut self.cells[heir_idx];
                heir.hidden = false;
                heir.row_span = region.row_count();
                heir.col_span = region.col_count() - 1;
                heir.style = style;
            }
        }

        let cols = self.cols;
        self.cells = self
            .cells
            .chunks(cols)
            .flat_map(|row| {
                row.iter()
                    .enumerate()
                    .filter(|(c, _)| *c != col)
                    .map(|(_, cell)| cell.clone())
            })
            .collect();
        self.cols -= 1;

        debug!(col, cols = self.cols, "deleted column");
        Ok(())
    }

    /// Whether deleting row `row` would discard user text
    pub fn row_has_content(&self, row: usize) -> TableResult<bool> {
        Ok(self.row(row)?.iter().any(Cell::has_content))
    }

    /// Whether deleting column `col` would discard user text
    pub fn col_has_content(&self, col: usize) -> TableResult<bool> {
        self.check(0, col)?;
        Ok((0..self.rows).any(|r| self.cells[self.index(r, col)].has_content()))
    }

    // ------------------------------------------------------------------
    // Merge / split
    // ------------------------------------------------------------------

    /// Turn a region back into independent 1x1 cells. Covered cells come
    /// back empty; the master keeps its content and style.
    fn dissolve(&mut self, region: &CellRange) {
        for (r, c) in region.cells() {
            let idx = self.index(r, c);
            if (r, c) == (region.min_row, region.min_col) {
                let master = &mut self.cells[idx];
                master.row_span = 1;
                master.col_span = 1;
                master.hidden = false;
            } else {
                self.cells[idx] = Cell::empty();
            }
        }
    }

    /// Merge the cells of `range` into one region owned by its top-left
    /// cell. Single-cell ranges are a no-op. Regions overlapping the range
    /// are dissolved first, so their text outside the master is dropped
    /// with the rest of the covered cells.
    pub fn merge(&mut self, range: &CellRange) -> TableResult<()> {
        self.check_range(range)?;
        if range.is_single() {
            return Ok(());
        }

        let absorbed: Vec<CellRange> = self
            .regions()
            .into_iter()
            .filter(|region| region.intersects(range))
            .collect();
        for region in &absorbed {
            self.dissolve(region);
        }

        for (r, c) in range.cells() {
            let idx = self.index(r, c);
            if (r, c) == (range.min_row, range.min_col) {
                let master = &mut self.cells[idx];
                master.row_span = range.row_count();
                master.col_span = range.col_count();
                master.hidden = false;
            } else {
                self.cells[idx] = Cell::shadow();
            }
        }

        debug!(
            row = range.min_row,
            col = range.min_col,
            row_span = range.row_count(),
            col_span = range.col_count(),
            absorbed = absorbed.len(),
            "merged cells"
        );
        Ok(())
    }

    /// Dissolve every region whose master lies inside `range`. Regions the
    /// range only reaches through shadow cells stay merged. Returns how many
    /// regions were split.
    pub fn split(&mut self, range: &CellRange) -> TableResult<usize> {
        self.check_range(range)?;

        let targets: Vec<CellRange> = self
            .regions()
            .into_iter()
            .filter(|region| range.contains(region.min_row, region.min_col))
            .collect();
        for region in &targets {
            self.dissolve(region);
        }

        debug!(split = targets.len(), "split cells");
        Ok(targets.len())
    }

    // ------------------------------------------------------------------
    // Content / style updates
    // ------------------------------------------------------------------

    /// Apply `f` to one cell. Hidden cells are skipped; returns whether the
    /// update was applied.
    pub fn update_cell<F>(&mut self, row: usize, col: usize, f: F) -> TableResult<bool>
    where
        F: FnOnce(CellEdit<'_>),
    {
        self.check(row, col)?;
        let idx = self.index(row, col);
        let cell = &mut self.cells[idx];
        if cell.hidden {
            trace!(row, col, "skipped update of hidden cell");
            return Ok(false);
        }
        f(CellEdit {
            content: &mut cell.content,
            style: &mut cell.style,
        });
        Ok(true)
    }

    /// Apply `f` to every visible cell of `range`. Returns how many cells
    /// were updated.
    pub fn update_cells_in_range<F>(&mut self, range: &CellRange, mut f: F) -> TableResult<usize>
    where
        F: FnMut(CellEdit<'_>),
    {
        self.check_range(range)?;
        let mut updated = 0;
        for (r, c) in range.cells() {
            let idx = self.index(r, c);
            let cell = &mut self.cells[idx];
            if cell.hidden {
                continue;
            }
            f(CellEdit {
                content: &mut cell.content,
                style: &mut cell.style,
            });
            updated += 1;
        }
        Ok(updated)
    }

    /// Replace the text of one cell (no-op on hidden cells)
    pub fn set_content(
        &mut self,
        row: usize,
        col: usize,
        content: impl Into<String>,
    ) -> TableResult<bool> {
        let content = content.into();
        self.update_cell(row, col, |edit| *edit.content = content)
    }

    // ------------------------------------------------------------------
    // Invariants
    // ------------------------------------------------------------------

    /// Check the master/shadow encoding: every hidden cell is a cleared
    /// 1x1 shadow covered by exactly one master, and every master's
    /// footprint fits the grid and covers only hidden cells.
    pub fn validate(&self) -> TableResult<()> {
        if self.cells.len() != self.rows * self.cols {
            return Err(TableError::invalid_document(format!(
                "{} cells stored for a {}x{} grid",
                self.cells.len(),
                self.rows,
                self.cols
            )));
        }

        let mut owners = vec![0usize; self.cells.len()];
        for region in self.regions() {
            if region.max_row >= self.rows || region.max_col >= self.cols {
                return Err(TableError::invalid_document(format!(
                    "cell ({}, {}) spans outside the grid",
                    region.min_row, region.min_col
                )));
            }
            for (r, c) in region.cells().skip(1) {
                owners[self.index(r, c)] += 1;
            }
        }

        for r in 0..self.rows {
            for c in 0..self.cols {
                let idx = self.index(r, c);
                let cell = &self.cells[idx];
                let expected = usize::from(cell.hidden);
                if owners[idx] != expected {
                    return Err(TableError::invalid_document(format!(
                        "cell ({}, {}) is covered by {} regions",
                        r, c, owners[idx]
                    )));
                }
                if cell.hidden && *cell != Cell::shadow() {
                    return Err(TableError::invalid_document(format!(
                        "hidden cell ({}, {}) carries data",
                        r, c
                    )));
                }
            }
        }
        Ok(())
    }
}

impl Default for Grid {
    fn default() -> Self {
        Grid::new(DEFAULT_ROWS, DEFAULT_COLS)
    }
}
