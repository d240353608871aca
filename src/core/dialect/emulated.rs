//! Row emission shared by the tabular-based dialects
//!
//! These grammars have no declarative cell properties, so spans are
//! emulated with `\multicolumn` / `\multirow` and emphasis wraps the cell
//! text directly. Shadow cells in the master's own row are consumed by the
//! `\multicolumn`; shadow cells in later rows of a multi-row region emit
//! one empty placeholder unit per region so every row keeps the header's
//! column count.

use crate::core::columns::{ColumnKind, MappedColumn};
use crate::core::grid::{Cell, Grid, HAlign};

/// Emits the cell units of a tabular body
pub(crate) struct EmulatedRows<'a> {
    grid: &'a Grid,
    columns: &'a [MappedColumn],
    vertical_rules: bool,
}

impl<'a> EmulatedRows<'a> {
    pub fn new(grid: &'a Grid, columns: &'a [MappedColumn], vertical_rules: bool) -> Self {
        EmulatedRows {
            grid,
            columns,
            vertical_rules,
        }
    }

    /// The units of row `row`, left to right. Joining them with ` & `
    /// gives the row body.
    pub fn row_units(&self, row: usize) -> Vec<String> {
        let mut units = Vec::new();
        let mut col = 0;

        while col < self.grid.cols() {
            let Some(cell) = self.grid.get(row, col) else {
                break;
            };

            if !cell.hidden {
                units.push(self.master_unit(cell, col));
                col += cell.col_span.max(1);
                continue;
            }

            match self.grid.master_of(row, col) {
                Ok((master_row, master_col)) if master_row < row && master_col == col => {
                    let master = self.grid.get(master_row, master_col);
                    let span = master.map_or(1, |m| m.col_span.max(1));
                    units.push(self.continuation_unit(master, col, span));
                    col += span;
                }
                Ok((master_row, _)) if master_row < row => {
                    // Covered from the left by a region already emitted
                    col += 1;
                }
                Ok(_) => col += 1,
                Err(_) => {
                    units.push(String::new());
                    col += 1;
                }
            }
        }

        units
    }

    /// Unit for a visible cell, spanning or not
    fn master_unit(&self, cell: &Cell, col: usize) -> String {
        let mut text = wrap_emphasis(cell);

        if cell.row_span > 1 {
            let position = cell
                .style
                .valign
                .map(|v| format!("[{}]", v.to_multirow()))
                .unwrap_or_default();
            text = format!(
                "\\multirow{}{{{}}}{{*}}{{{}}}",
                position, cell.row_span, text
            );
        }

        if let Some(bg) = &cell.style.bg_color {
            text = format!("\\cellcolor{} {}", bg.to_latex_args(), text);
        }

        let span = cell.col_span.max(1);
        if span > 1 || self.overrides_alignment(cell, col) {
            let spec = self.multicolumn_spec(cell.style.halign, col, span);
            format!("\\multicolumn{{{}}}{{{}}}{{{}}}", span, spec, text)
        } else {
            text
        }
    }

    /// Empty placeholder under a multi-row master
    fn continuation_unit(&self, master: Option<&Cell>, col: usize, span: usize) -> String {
        let fill = master
            .and_then(|m| m.style.bg_color.as_ref())
            .map(|bg| format!("\\cellcolor{}", bg.to_latex_args()))
            .unwrap_or_default();

        if span > 1 {
            let halign = master.and_then(|m| m.style.halign);
            let spec = self.multicolumn_spec(halign, col, span);
            format!("\\multicolumn{{{}}}{{{}}}{{{}}}", span, spec, fill)
        } else {
            fill
        }
    }

    /// Whether a single-column cell needs `\multicolumn{1}` to change its
    /// alignment away from the column's
    fn overrides_alignment(&self, cell: &Cell, col: usize) -> bool {
        let Some(halign) = cell.style.halign else {
            return false;
        };
        let column = self.columns.get(col);
        match (halign, column.map(|c| c.kind)) {
            (HAlign::Left, Some(ColumnKind::Left)) => false,
            (HAlign::Center, Some(ColumnKind::Center)) => false,
            (HAlign::Right, Some(ColumnKind::Right)) => false,
            (HAlign::Justify, Some(ColumnKind::Paragraph)) => false,
            _ => true,
        }
    }

    /// Column spec argument of a `\multicolumn` starting at `col`
    fn multicolumn_spec(&self, halign: Option<HAlign>, col: usize, span: usize) -> String {
        let column = self.columns.get(col);
        let align = match halign {
            Some(HAlign::Justify) => match column {
                // A justified single paragraph column keeps its width
                Some(c) if span == 1 && c.kind == ColumnKind::Paragraph => c.token.clone(),
                _ => "l".to_string(),
            },
            Some(h) => h.to_char().to_string(),
            None => column.map_or('c', MappedColumn::align_char).to_string(),
        };

        if self.vertical_rules {
            let left = if col == 0 { "|" } else { "" };
            format!("{}{}|", left, align)
        } else {
            align
        }
    }
}

/// Cell text with inline emphasis and foreground color applied
pub(crate) fn wrap_emphasis(cell: &Cell) -> String {
    let mut text = cell.content.trim().to_string();
    if text.is_empty() {
        return text;
    }
    if cell.style.is_italic() {
        text = format!("\\textit{{{}}}", text);
    }
    if cell.style.is_bold() {
        text = format!("\\textbf{{{}}}", text);
    }
    if let Some(fg) = &cell.style.fg_color {
        text = format!("\\textcolor{}{{{}}}", fg.to_latex_args(), text);
    }
    text
}

/// Column specification string, e.g. `|l|c|p{3cm}|` or `lcr`
pub(crate) fn column_spec(columns: &[MappedColumn], vertical_rules: bool) -> String {
    if vertical_rules {
        let mut spec = String::from("|");
        for column in columns {
            spec.push_str(&column.token);
            spec.push('|');
        }
        spec
    } else {
        columns.iter().map(|c| c.token.as_str()).collect()
    }
}

/// Environment holding the tabular body
pub(crate) fn environment(long_table: bool) -> &'static str {
    if long_table {
        "longtable"
    } else {
        "tabular"
    }
}

/// Caption and label lines at the head of a `longtable`
pub(crate) fn long_caption(options: &super::GlobalOptions) -> Option<String> {
    let caption = options.caption_text()?;
    let label = options
        .label_text()
        .map(|l| format!("\\label{{{}}}", l))
        .unwrap_or_default();
    Some(format!("\\caption{{{}}}{} \\\\", caption, label))
}
