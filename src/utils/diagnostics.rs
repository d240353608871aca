//! Table diagnostics
//!
//! Checks a table against the dialect it is about to be serialized with
//! and reports what will not come out as authored:
//!
//! - Column types the dialect degrades (fallback mappings)
//! - Paragraph columns without a width
//! - Cell text that breaks the tabular grammar (unescaped `&`, unbalanced braces)
//! - Colors xcolor does not know
//! - Options the dialect ignores (themes, labels without a caption)
//!
//! ## Example
//!
//! ```rust
//! use texgrid::core::columns::{ColumnKind, ColumnSpec, ColumnSpecs};
//! use texgrid::core::dialect::{Dialect, GlobalOptions};
//! use texgrid::core::grid::Grid;
//! use texgrid::diagnostics::check_table;
//!
//! let grid = Grid::from_rows(&[vec!["a", "b"]]);
//! let columns = ColumnSpecs::from_specs(vec![
//!     ColumnSpec::new(ColumnKind::FlexibleRatio),
//!     ColumnSpec::new(ColumnKind::Center),
//! ]);
//! let result = check_table(&grid, &columns, Dialect::Plain, &GlobalOptions::default());
//! assert_eq!(result.warnings, 1);
//! ```

use std::fmt;

use crate::core::columns::{ColumnKind, ColumnSpecs, Mapping};
use crate::core::dialect::{Dialect, GlobalOptions};
use crate::core::grid::Grid;
use crate::utils::escape::has_unescaped_ampersand;

/// Diagnostic severity level
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum DiagnosticLevel {
    /// Informational note
    Info,
    /// Warning - output differs from what was authored
    Warning,
    /// Error - output will not compile
    Error,
}

impl fmt::Display for DiagnosticLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DiagnosticLevel::Info => write!(f, "info"),
            DiagnosticLevel::Warning => write!(f, "warning"),
            DiagnosticLevel::Error => write!(f, "error"),
        }
    }
}

/// A single diagnostic message
#[derive(Debug, Clone)]
pub struct Diagnostic {
    /// Severity level
    pub level: DiagnosticLevel,
    /// Human-readable message
    pub message: String,
    /// Row number (1-indexed)
    pub row: Option<usize>,
    /// Column number (1-indexed)
    pub column: Option<usize>,
    /// Relevant cell text
    pub source_text: Option<String>,
    /// Suggested fix
    pub suggestion: Option<String>,
}

impl Diagnostic {
    /// Create a new diagnostic
    pub fn new(level: DiagnosticLevel, message: impl Into<String>) -> Self {
        Self {
            level,
            message: message.into(),
            row: None,
            column: None,
            source_text: None,
            suggestion: None,
        }
    }

    /// Attach a cell position (0-indexed in, 1-indexed stored)
    pub fn at_cell(mut self, row: usize, col: usize) -> Self {
        self.row = Some(row + 1);
        self.column = Some(col + 1);
        self
    }

    /// Attach a column position (0-indexed in, 1-indexed stored)
    pub fn at_column(mut self, col: usize) -> Self {
        self.column = Some(col + 1);
        self
    }

    /// Add source text
    pub fn with_source(mut self, text: impl Into<String>) -> Self {
        self.source_text = Some(text.into());
        self
    }

    /// Add suggestion
    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestion = Some(suggestion.into());
        self
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Format: level: message
        //         --> cell 2:3
        //         |
        //         | source text
        //         = help: suggestion

        write!(f, "{}: {}", self.level, self.message)?;

        match (self.row, self.column) {
            (Some(row), Some(col)) => write!(f, "\n  --> cell {}:{}", row, col)?,
            (None, Some(col)) => write!(f, "\n  --> column {}", col)?,
            _ => {}
        }

        if let Some(ref source) = self.source_text {
            write!(f, "\n  |\n  | {}", source)?;
        }

        if let Some(ref suggestion) = self.suggestion {
            write!(f, "\n  = help: {}", suggestion)?;
        }

        Ok(())
    }
}

/// Check result with summary
#[derive(Debug, Default)]
pub struct CheckResult {
    /// All diagnostics
    pub diagnostics: Vec<Diagnostic>,
    /// Number of errors
    pub errors: usize,
    /// Number of warnings
    pub warnings: usize,
    /// Number of info messages
    pub infos: usize,
}

impl CheckResult {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a diagnostic
    pub fn add(&mut self, diag: Diagnostic) {
        match diag.level {
            DiagnosticLevel::Error => self.errors += 1,
            DiagnosticLevel::Warning => self.warnings += 1,
            DiagnosticLevel::Info => self.infos += 1,
        }
        self.diagnostics.push(diag);
    }

    /// Check if there are any errors
    pub fn has_errors(&self) -> bool {
        self.errors > 0
    }

    /// Check if there are any issues at all
    pub fn is_empty(&self) -> bool {
        self.diagnostics.is_empty()
    }

    /// Get summary string
    pub fn summary(&self) -> String {
        let mut parts = Vec::new();
        if self.errors > 0 {
            parts.push(format!(
                "{} error{}",
                self.errors,
                if self.errors == 1 { "" } else { "s" }
            ));
        }
        if self.warnings > 0 {
            parts.push(format!(
                "{} warning{}",
                self.warnings,
                if self.warnings == 1 { "" } else { "s" }
            ));
        }
        if self.infos > 0 {
            parts.push(format!(
                "{} note{}",
                self.infos,
                if self.infos == 1 { "" } else { "s" }
            ));
        }
        if parts.is_empty() {
            "no issues found".to_string()
        } else {
            parts.join(", ")
        }
    }
}

/// Check a table before serializing it with `dialect`
pub fn check_table(
    grid: &Grid,
    columns: &ColumnSpecs,
    dialect: Dialect,
    options: &GlobalOptions,
) -> CheckResult {
    let mut result = CheckResult::new();

    if let Err(e) = grid.validate() {
        result.add(Diagnostic::new(DiagnosticLevel::Error, e.to_string()));
    }

    if columns.len() != grid.cols() {
        result.add(
            Diagnostic::new(
                DiagnosticLevel::Error,
                format!(
                    "{} column specs for a {}-column table",
                    columns.len(),
                    grid.cols()
                ),
            )
            .with_suggestion("Missing columns are emitted as centred columns"),
        );
    }

    check_columns(columns, dialect, &mut result);
    check_cells(grid, &mut result);
    check_options(dialect, options, &mut result);

    result
}

/// Fallback mappings and width problems
fn check_columns(columns: &ColumnSpecs, dialect: Dialect, result: &mut CheckResult) {
    let mapped = columns.map_for_dialect(dialect);

    for (col, (spec, column)) in columns.iter().zip(&mapped).enumerate() {
        if spec.kind == ColumnKind::Paragraph && spec.effective_width().is_none() {
            result.add(
                Diagnostic::new(
                    DiagnosticLevel::Warning,
                    "paragraph column has no width, emitted as a left column",
                )
                .at_column(col)
                .with_suggestion("Set a width such as 3cm or 0.3"),
            );
            continue;
        }

        if let Mapping::Fallback { from, to } = column.mapping {
            result.add(
                Diagnostic::new(
                    DiagnosticLevel::Warning,
                    format!(
                        "{} column is not available in the {} dialect, emitted as {}",
                        from, dialect, to
                    ),
                )
                .at_column(col)
                .with_source(column.token.clone()),
            );
        }
    }
}

/// Cell text and colors
fn check_cells(grid: &Grid, result: &mut CheckResult) {
    let mut any_content = false;

    for (row, cells) in grid.iter_rows().enumerate() {
        for (col, cell) in cells.iter().enumerate() {
            if cell.hidden {
                continue;
            }
            any_content |= cell.has_content();

            if has_unescaped_ampersand(&cell.content) {
                result.add(
                    Diagnostic::new(
                        DiagnosticLevel::Error,
                        "unescaped '&' would start a new cell",
                    )
                    .at_cell(row, col)
                    .with_source(cell.content.clone())
                    .with_suggestion("Write \\& for a literal ampersand"),
                );
            }

            check_brace_balance(&cell.content, row, col, result);

            for color in [&cell.style.fg_color, &cell.style.bg_color]
                .into_iter()
                .flatten()
            {
                for name in color.unknown_names() {
                    result.add(
                        Diagnostic::new(
                            DiagnosticLevel::Warning,
                            format!("color '{}' is not predefined by xcolor", name),
                        )
                        .at_cell(row, col)
                        .with_suggestion("Define it with \\definecolor or use an HTML value"),
                    );
                }
            }
        }
    }

    if !any_content {
        result.add(Diagnostic::new(DiagnosticLevel::Info, "table has no content"));
    }
}

/// Check for unbalanced braces in one cell
fn check_brace_balance(text: &str, row: usize, col: usize, result: &mut CheckResult) {
    let mut depth = 0i32;
    let mut escaped = false;

    for c in text.chars() {
        match c {
            '\\' => {
                escaped = !escaped;
                continue;
            }
            '{' if !escaped => depth += 1,
            '}' if !escaped => {
                depth -= 1;
                if depth < 0 {
                    result.add(
                        Diagnostic::new(DiagnosticLevel::Error, "unmatched closing brace '}'")
                            .at_cell(row, col)
                            .with_source(text)
                            .with_suggestion("Check for missing opening brace"),
                    );
                    depth = 0;
                }
            }
            _ => {}
        }
        escaped = false;
    }

    if depth > 0 {
        result.add(
            Diagnostic::new(
                DiagnosticLevel::Error,
                format!(
                    "{} unclosed brace{}",
                    depth,
                    if depth == 1 { "" } else { "s" }
                ),
            )
            .at_cell(row, col)
            .with_source(text)
            .with_suggestion("Check for missing closing brace '}'"),
        );
    }
}

/// Options the dialect will not honor
fn check_options(dialect: Dialect, options: &GlobalOptions, result: &mut CheckResult) {
    if let Some(theme) = options.theme_name() {
        if dialect != Dialect::Modern {
            result.add(Diagnostic::new(
                DiagnosticLevel::Info,
                format!("theme '{}' is ignored by the {} dialect", theme, dialect),
            ));
        }
    }

    if options.caption_text().is_none() {
        if let Some(label) = options.label.as_deref().map(str::trim) {
            if !label.is_empty() {
                result.add(
                    Diagnostic::new(
                        DiagnosticLevel::Warning,
                        format!("label '{}' is dropped because the table has no caption", label),
                    )
                    .with_suggestion("Add a caption to make the table referable"),
                );
            }
        }
    }

    if dialect == Dialect::Rules && options.vertical_rules {
        result.add(Diagnostic::new(
            DiagnosticLevel::Info,
            "vertical rules are not drawn in the rules dialect",
        ));
    }
}

/// Format check results for terminal output
pub fn format_diagnostics(result: &CheckResult, use_color: bool) -> String {
    let mut output = String::new();

    for diag in &result.diagnostics {
        if use_color {
            let color = match diag.level {
                DiagnosticLevel::Error => "\x1b[31m",   // Red
                DiagnosticLevel::Warning => "\x1b[33m", // Yellow
                DiagnosticLevel::Info => "\x1b[34m",    // Blue
            };
            output.push_str(color);
            output.push_str(&format!("{}", diag));
            output.push_str("\x1b[0m\n\n");
        } else {
            output.push_str(&format!("{}\n\n", diag));
        }
    }

    // Summary
    if use_color {
        if result.has_errors() {
            output.push_str("\x1b[31m");
        } else if result.warnings > 0 {
            output.push_str("\x1b[33m");
        } else {
            output.push_str("\x1b[32m");
        }
    }

    output.push_str(&format!("Summary: {}", result.summary()));

    if use_color {
        output.push_str("\x1b[0m");
    }

    output
}
