//! Rectangular selection over the grid
//!
//! A drag gesture produces an anchor and a free corner in any order. Every
//! consumer works on the normalized [`CellRange`] instead, never on the raw
//! corners.

/// Normalized, inclusive rectangle of cells
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CellRange {
    pub min_row: usize,
    pub max_row: usize,
    pub min_col: usize,
    pub max_col: usize,
}

impl CellRange {
    /// Build a range from two arbitrary corners
    pub fn new(row_a: usize, col_a: usize, row_b: usize, col_b: usize) -> Self {
        CellRange {
            min_row: row_a.min(row_b),
            max_row: row_a.max(row_b),
            min_col: col_a.min(col_b),
            max_col: col_a.max(col_b),
        }
    }

    /// A single-cell range
    pub fn single(row: usize, col: usize) -> Self {
        Self::new(row, col, row, col)
    }

    /// The footprint of a cell spanning `row_span x col_span` from `(row, col)`
    pub fn from_span(row: usize, col: usize, row_span: usize, col_span: usize) -> Self {
        CellRange {
            min_row: row,
            max_row: row.saturating_add(row_span.max(1) - 1),
            min_col: col,
            max_col: col.saturating_add(col_span.max(1) - 1),
        }
    }

    pub fn is_single(&self) -> bool {
        self.min_row == self.max_row && self.min_col == self.max_col
    }

    pub fn row_count(&self) -> usize {
        self.max_row - self.min_row + 1
    }

    pub fn col_count(&self) -> usize {
        self.max_col - self.min_col + 1
    }

    pub fn contains(&self, row: usize, col: usize) -> bool {
        (self.min_row..=self.max_row).contains(&row) && (self.min_col..=self.max_col).contains(&col)
    }

    pub fn intersects(&self, other: &CellRange) -> bool {
        self.min_row <= other.max_row
            && other.min_row <= self.max_row
            && self.min_col <= other.max_col
            && other.min_col <= self.max_col
    }

    /// Row-major iterator over every coordinate in the range
    pub fn cells(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        (self.min_row..=self.max_row)
            .flat_map(move |r| (self.min_col..=self.max_col).map(move |c| (r, c)))
    }
}

/// Raw drag selection: anchor plus free corner
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Selection {
    pub start_row: usize,
    pub start_col: usize,
    pub end_row: usize,
    pub end_col: usize,
}

impl Selection {
    /// Degenerate selection on one cell
    pub fn at(row: usize, col: usize) -> Self {
        Selection {
            start_row: row,
            start_col: col,
            end_row: row,
            end_col: col,
        }
    }

    /// Sorted bounds of the selection
    pub fn normalize(&self) -> CellRange {
        CellRange::new(self.start_row, self.start_col, self.end_row, self.end_col)
    }
}

/// Tracks the active selection rectangle and the focused cell
#[derive(Debug, Clone, Default)]
pub struct SelectionModel {
    selection: Selection,
    selecting: bool,
}

impl SelectionModel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pointer down: anchor and free corner both land on `(row, col)`
    pub fn begin_selection(&mut self, row: usize, col: usize) {
        self.selection = Selection::at(row, col);
        self.selecting = true;
    }

    /// Pointer move: only honored between `begin_selection` and `end_selection`
    pub fn extend_selection(&mut self, row: usize, col: usize) {
        if !self.selecting {
            return;
        }
        self.selection.end_row = row;
        self.selection.end_col = col;
    }

    /// Pointer up: the rectangle stays for later styling commands
    pub fn end_selection(&mut self) {
        self.selecting = false;
    }

    pub fn is_selecting(&self) -> bool {
        self.selecting
    }

    /// The raw selection, for display only
    pub fn selection(&self) -> Selection {
        self.selection
    }

    /// The focused cell (the anchor of the gesture)
    pub fn active_cell(&self) -> (usize, usize) {
        (self.selection.start_row, self.selection.start_col)
    }

    pub fn normalize(&self) -> CellRange {
        self.selection.normalize()
    }

    /// Select the whole `rows x cols` grid, focusing the top-left cell
    pub fn select_all(&mut self, rows: usize, cols: usize) {
        self.selection = Selection {
            start_row: 0,
            start_col: 0,
            end_row: rows.saturating_sub(1),
            end_col: cols.saturating_sub(1),
        };
        self.selecting = false;
    }

    /// Pull both corners back inside a grid that just shrank
    pub fn clamp_to(&mut self, rows: usize, cols: usize) {
        let max_row = rows.saturating_sub(1);
        let max_col = cols.saturating_sub(1);
        let s = &mut self.selection;
        s.start_row = s.start_row.min(max_row);
        s.end_row = s.end_row.min(max_row);
        s.start_col = s.start_col.min(max_col);
        s.end_col = s.end_col.min(max_col);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_drag_up_left_normalizes() {
        let mut model = SelectionModel::new();
        model.begin_selection(3, 2);
        model.extend_selection(1, 0);
        model.end_selection();

        assert_eq!(model.normalize(), CellRange::new(1, 0, 3, 2));
        assert_eq!(model.active_cell(), (3, 2));
        assert!(!model.is_selecting());
    }

    #[test]
    fn test_extend_without_begin_is_ignored() {
        let mut model = SelectionModel::new();
        model.extend_selection(2, 2);
        assert!(model.normalize().is_single());

        model.begin_selection(1, 1);
        model.end_selection();
        model.extend_selection(3, 3);
        assert_eq!(model.normalize(), CellRange::single(1, 1));
    }

    #[test]
    fn test_selection_persists_after_end() {
        let mut model = SelectionModel::new();
        model.begin_selection(0, 0);
        model.extend_selection(0, 3);
        model.end_selection();
        assert_eq!(model.normalize().col_count(), 4);
    }

    #[test]
    fn test_clamp_after_shrink() {
        let mut model = SelectionModel::new();
        model.begin_selection(3, 3);
        model.extend_selection(1, 1);
        model.clamp_to(2, 2);
        assert_eq!(model.normalize(), CellRange::single(1, 1));
        assert_eq!(model.active_cell(), (1, 1));
    }

    #[test]
    fn test_range_geometry() {
        let span = CellRange::from_span(1, 1, 2, 3);
        assert_eq!(span, CellRange::new(1, 1, 2, 3));
        assert!(span.contains(2, 3));
        assert!(!span.contains(0, 1));
        assert!(span.intersects(&CellRange::single(2, 2)));
        assert!(!span.intersects(&CellRange::new(3, 0, 3, 3)));
        assert_eq!(span.cells().count(), 6);
        assert_eq!(span.cells().next(), Some((1, 1)));
    }

    #[test]
    fn test_span_footprint_saturates() {
        let span = CellRange::from_span(2, 1, usize::MAX, 1);
        assert_eq!(span.max_row, usize::MAX);
        assert_eq!(span.max_col, 1);
    }
}
