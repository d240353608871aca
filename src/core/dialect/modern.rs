//! `tabularray` output
//!
//! tabularray describes spans and cell formatting declaratively in the
//! table's header block, so cell bodies carry only their text. Every grid
//! slot is emitted; slots covered by a span are left empty.

use indexmap::IndexSet;
use std::fmt::Write;

use super::options::{begin_frame, end_frame, GlobalOptions};
use super::{resolve_columns, Dialect, Serializer};
use crate::core::columns::ColumnSpecs;
use crate::core::grid::{Cell, Grid};
use crate::data::colors::Color;

/// Serializer for the Modern dialect
#[derive(Debug, Clone, Copy, Default)]
pub struct ModernSerializer;

impl Serializer for ModernSerializer {
    fn dialect(&self) -> Dialect {
        Dialect::Modern
    }

    fn serialize(&self, grid: &Grid, columns: &ColumnSpecs, options: &GlobalOptions) -> String {
        let mapped = resolve_columns(grid, columns, Dialect::Modern);
        let colspec: String = mapped.iter().map(|c| c.token.as_str()).collect();
        let env = if options.long_table { "longtblr" } else { "tblr" };
        let mut output = String::new();

        let mut definitions = IndexSet::new();
        collect_definitions(grid, &mut definitions);
        for definition in &definitions {
            let _ = writeln!(output, "{}", definition);
        }

        begin_frame(&mut output, options);

        let outer = outer_keys(options);
        if outer.is_empty() {
            let _ = writeln!(output, "\\begin{{{}}}{{", env);
        } else {
            let _ = writeln!(output, "\\begin{{{}}}[{}]{{", env, outer.join(","));
        }

        let mut inner = vec![format!("colspec = {{{}}}", colspec)];
        if options.horizontal_rules {
            inner.push("hlines".to_string());
        }
        if options.vertical_rules {
            inner.push("vlines".to_string());
        }
        for (row, cells) in grid.iter_rows().enumerate() {
            for (col, cell) in cells.iter().enumerate() {
                if let Some(annotation) = cell_annotation(cell, row, col) {
                    inner.push(annotation);
                }
            }
        }
        let _ = writeln!(output, "  {}", inner.join(",\n  "));
        let _ = writeln!(output, "}}");

        for cells in grid.iter_rows() {
            let units: Vec<&str> = cells
                .iter()
                .map(|cell| {
                    if cell.hidden {
                        ""
                    } else {
                        cell.content.trim()
                    }
                })
                .collect();
            let _ = writeln!(output, "  {} \\\\", units.join(" & "));
        }

        let _ = writeln!(output, "\\end{{{}}}", env);
        end_frame(&mut output, options);

        output.trim_end().to_string()
    }
}

/// Keys of the optional outer specification
fn outer_keys(options: &GlobalOptions) -> Vec<String> {
    let mut keys = Vec::new();
    if options.long_table {
        match options.caption_text() {
            Some(caption) => {
                keys.push(format!("caption={{{}}}", caption));
                if let Some(label) = options.label_text() {
                    keys.push(format!("label={{{}}}", label));
                }
            }
            None => {
                keys.push("entry=none".to_string());
                keys.push("label=none".to_string());
            }
        }
    }
    if let Some(theme) = options.theme_name() {
        keys.push(format!("theme={}", theme));
    }
    keys
}

/// `cell{r}{c} = ...` entry for a visible cell with spans or an effective style
fn cell_annotation(cell: &Cell, row: usize, col: usize) -> Option<String> {
    if cell.hidden || (!cell.is_spanning() && !cell.style.has_effect()) {
        return None;
    }

    let mut keys = Vec::new();
    let style = &cell.style;
    if let Some(halign) = style.halign {
        keys.push(format!("halign={}", halign.to_char()));
    }
    if let Some(valign) = style.valign {
        keys.push(format!("valign={}", valign.to_tblr()));
    }
    if let Some(fg) = &style.fg_color {
        keys.push(format!("fg={}", fg.key_name()));
    }
    if let Some(bg) = &style.bg_color {
        keys.push(format!("bg={}", bg.key_name()));
    }
    let mut font = String::new();
    if style.is_bold() {
        font.push_str("\\bfseries");
    }
    if style.is_italic() {
        font.push_str("\\itshape");
    }
    if !font.is_empty() {
        keys.push(format!("font={}", font));
    }

    let target = format!("cell{{{}}}{{{}}}", row + 1, col + 1);
    if cell.is_spanning() {
        let mut spans = Vec::new();
        if cell.row_span > 1 {
            spans.push(format!("r={}", cell.row_span));
        }
        if cell.col_span > 1 {
            spans.push(format!("c={}", cell.col_span));
        }
        Some(format!(
            "{} = {{{}}}{{{}}}",
            target,
            spans.join(","),
            keys.join(",")
        ))
    } else {
        Some(format!("{} = {{{}}}", target, keys.join(",")))
    }
}

/// `\definecolor` lines for every HTML color in use, in first-use order
fn collect_definitions(grid: &Grid, definitions: &mut IndexSet<String>) {
    let colors = grid
        .iter_rows()
        .flatten()
        .filter(|cell| !cell.hidden)
        .flat_map(|cell| [&cell.style.fg_color, &cell.style.bg_color])
        .flatten();
    for color in colors {
        if let Some(definition) = Color::definition(color) {
            definitions.insert(definition);
        }
    }
}
