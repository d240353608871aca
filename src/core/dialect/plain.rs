//! Classic `tabular` / `longtable` output with `\hline` rules

use std::fmt::Write;

use super::emulated::{column_spec, environment, long_caption, EmulatedRows};
use super::hline::{boundary_lines, join_lines, HLineStyle};
use super::options::{begin_frame, end_frame, GlobalOptions};
use super::{resolve_columns, Dialect, Serializer};
use crate::core::columns::ColumnSpecs;
use crate::core::grid::Grid;

/// Serializer for the Plain dialect
#[derive(Debug, Clone, Copy, Default)]
pub struct PlainSerializer;

impl Serializer for PlainSerializer {
    fn dialect(&self) -> Dialect {
        Dialect::Plain
    }

    fn serialize(&self, grid: &Grid, columns: &ColumnSpecs, options: &GlobalOptions) -> String {
        let mapped = resolve_columns(grid, columns, Dialect::Plain);
        let env = environment(options.long_table);
        let mut output = String::new();

        begin_frame(&mut output, options);
        let _ = writeln!(
            output,
            "\\begin{{{}}}{{{}}}",
            env,
            column_spec(&mapped, options.vertical_rules)
        );
        if options.long_table {
            if let Some(caption) = long_caption(options) {
                let _ = writeln!(output, "{}", caption);
            }
        }

        if options.horizontal_rules {
            let _ = writeln!(output, "\\hline");
        }

        let rows = EmulatedRows::new(grid, &mapped, options.vertical_rules);
        for row in 0..grid.rows() {
            let _ = writeln!(output, "  {} \\\\", rows.row_units(row).join(" & "));

            if options.horizontal_rules {
                let lines = boundary_lines(grid, row, HLineStyle::Normal);
                if let Some(line) = join_lines(&lines, grid.cols()) {
                    let _ = writeln!(output, "{}", line);
                }
            }
        }

        let _ = writeln!(output, "\\end{{{}}}", env);
        end_frame(&mut output, options);

        output.trim_end().to_string()
    }
}
