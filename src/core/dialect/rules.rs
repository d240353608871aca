//! `booktabs` output: the `tabular` grammar with typographic rules

use std::fmt::Write;

use super::emulated::{column_spec, environment, long_caption, EmulatedRows};
use super::hline::{boundary_lines, join_lines, HLineStyle, LatexHLine};
use super::options::{begin_frame, end_frame, GlobalOptions};
use super::{resolve_columns, Dialect, Serializer};
use crate::core::columns::ColumnSpecs;
use crate::core::grid::Grid;

/// Serializer for the Rules dialect. Vertical rules are never drawn.
#[derive(Debug, Clone, Copy, Default)]
pub struct RulesSerializer;

impl Serializer for RulesSerializer {
    fn dialect(&self) -> Dialect {
        Dialect::Rules
    }

    fn serialize(&self, grid: &Grid, columns: &ColumnSpecs, options: &GlobalOptions) -> String {
        let mapped = resolve_columns(grid, columns, Dialect::Rules);
        let env = environment(options.long_table);
        let last_row = grid.rows() - 1;
        let mut output = String::new();

        begin_frame(&mut output, options);
        let _ = writeln!(
            output,
            "\\begin{{{}}}{{{}}}",
            env,
            column_spec(&mapped, false)
        );
        if options.long_table {
            if let Some(caption) = long_caption(options) {
                let _ = writeln!(output, "{}", caption);
            }
        }
        let top = LatexHLine::full(HLineStyle::TopRule);
        let _ = writeln!(output, "{}", top.to_latex_with_cols(grid.cols()));

        let rows = EmulatedRows::new(grid, &mapped, false);
        for row in 0..grid.rows() {
            let _ = writeln!(output, "  {} \\\\", rows.row_units(row).join(" & "));

            // The header rule is always drawn, the others only on request
            if row < last_row && (row == 0 || options.horizontal_rules) {
                let lines = boundary_lines(grid, row, HLineStyle::MidRule);
                if let Some(line) = join_lines(&lines, grid.cols()) {
                    let _ = writeln!(output, "{}", line);
                }
            }
        }

        let bottom = LatexHLine::full(HLineStyle::BottomRule);
        let _ = writeln!(output, "{}", bottom.to_latex_with_cols(grid.cols()));
        let _ = writeln!(output, "\\end{{{}}}", env);
        end_frame(&mut output, options);

        output.trim_end().to_string()
    }
}
