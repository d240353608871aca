//! Delimited text (CSV, TSV, ...) to grid import

use std::io::Cursor;

use tracing::debug;

use crate::core::grid::{CellRange, Grid};
use crate::utils::error::{TableError, TableResult};
use crate::utils::escape::escape_latex_text;

/// Field delimiter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Delimiter {
    #[default]
    Comma,
    Tab,
    Semicolon,
    Pipe,
}

impl Delimiter {
    pub fn char(&self) -> char {
        match self {
            Delimiter::Comma => ',',
            Delimiter::Tab => '\t',
            Delimiter::Semicolon => ';',
            Delimiter::Pipe => '|',
        }
    }

    /// Parse from a user-facing name
    pub fn from_name(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "comma" | "," | "csv" => Some(Delimiter::Comma),
            "tab" | "\\t" | "tsv" => Some(Delimiter::Tab),
            "semicolon" | ";" => Some(Delimiter::Semicolon),
            "pipe" | "|" => Some(Delimiter::Pipe),
            _ => None,
        }
    }
}

/// Detect delimiter by analyzing first few lines
pub fn detect_delimiter(content: &str) -> Delimiter {
    let first_lines: String = content.lines().take(5).collect::<Vec<_>>().join("\n");

    let comma_count = first_lines.matches(',').count();
    let tab_count = first_lines.matches('\t').count();
    let pipe_count = first_lines.matches('|').count();
    let semi_count = first_lines.matches(';').count();

    let max = comma_count.max(tab_count).max(pipe_count).max(semi_count);

    if max == 0 {
        return Delimiter::Comma;
    }

    if tab_count == max {
        Delimiter::Tab
    } else if pipe_count == max {
        Delimiter::Pipe
    } else if semi_count == max {
        Delimiter::Semicolon
    } else {
        Delimiter::Comma
    }
}

/// Import settings
#[derive(Debug, Clone)]
pub struct ImportOptions {
    /// `None` detects the delimiter from the content
    pub delimiter: Option<Delimiter>,
    /// Escape LaTeX special characters in every field
    pub escape: bool,
    /// Bold the first row
    pub bold_header: bool,
}

impl Default for ImportOptions {
    fn default() -> Self {
        Self {
            delimiter: None,
            escape: true,
            bold_header: false,
        }
    }
}

/// Read delimited text into a grid. Short records are padded with empty cells.
pub fn import_delimited(content: &str, options: &ImportOptions) -> TableResult<Grid> {
    let delimiter = options
        .delimiter
        .unwrap_or_else(|| detect_delimiter(content));

    let mut reader = csv::ReaderBuilder::new()
        .delimiter(delimiter.char() as u8)
        .has_headers(false)
        .flexible(true)
        .from_reader(Cursor::new(content.as_bytes()));

    let mut rows: Vec<Vec<String>> = Vec::new();
    for (line_num, result) in reader.records().enumerate() {
        let record = result.map_err(|e| {
            TableError::invalid_document(format!("line {}: {}", line_num + 1, e))
        })?;
        let row = record
            .iter()
            .map(|field| {
                let field = field.trim();
                if options.escape {
                    escape_latex_text(field)
                } else {
                    field.to_string()
                }
            })
            .collect();
        rows.push(row);
    }

    if rows.is_empty() {
        return Err(TableError::invalid_document("no rows to import"));
    }

    let mut grid = Grid::from_rows(&rows);
    if options.bold_header {
        let header = CellRange::new(0, 0, 0, grid.cols() - 1);
        grid.update_cells_in_range(&header, |edit| edit.style.bold = Some(true))?;
    }

    debug!(
        rows = grid.rows(),
        cols = grid.cols(),
        delimiter = ?delimiter,
        "imported delimited text"
    );
    Ok(grid)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detect_delimiter() {
        assert_eq!(detect_delimiter("a,b,c\n1,2,3"), Delimiter::Comma);
        assert_eq!(detect_delimiter("a\tb\tc"), Delimiter::Tab);
        assert_eq!(detect_delimiter("a;b;c"), Delimiter::Semicolon);
        assert_eq!(detect_delimiter("plain"), Delimiter::Comma);
    }

    #[test]
    fn test_import_csv() {
        let grid = import_delimited("Name,Score\nAda,10\nBob", &ImportOptions::default()).unwrap();
        assert_eq!((grid.rows(), grid.cols()), (3, 2));
        assert_eq!(grid.cell(1, 0).unwrap().content, "Ada");
        assert_eq!(grid.cell(2, 1).unwrap().content, "");
    }

    #[test]
    fn test_import_escapes_latex() {
        let grid = import_delimited("R&D,50%\n\"a, b\",$x_1$", &ImportOptions::default()).unwrap();
        assert_eq!(grid.cell(0, 0).unwrap().content, "R\\&D");
        assert_eq!(grid.cell(0, 1).unwrap().content, "50\\%");
        assert_eq!(grid.cell(1, 0).unwrap().content, "a, b");
        assert_eq!(grid.cell(1, 1).unwrap().content, "\\$x\\_1\\$");
    }

    #[test]
    fn test_import_raw_with_header() {
        let options = ImportOptions {
            delimiter: Some(Delimiter::Tab),
            escape: false,
            bold_header: true,
        };
        let grid = import_delimited("$a$\tb\nc\td", &options).unwrap();
        assert_eq!(grid.cell(0, 0).unwrap().content, "$a$");
        assert!(grid.cell(0, 1).unwrap().style.is_bold());
        assert!(!grid.cell(1, 0).unwrap().style.is_bold());
    }

    #[test]
    fn test_import_empty_is_error() {
        assert!(matches!(
            import_delimited("", &ImportOptions::default()),
            Err(TableError::InvalidDocument { .. })
        ));
    }

    #[test]
    fn test_delimiter_names() {
        assert_eq!(Delimiter::from_name("tsv"), Some(Delimiter::Tab));
        assert_eq!(Delimiter::from_name("|"), Some(Delimiter::Pipe));
        assert_eq!(Delimiter::from_name("space"), None);
    }
}
