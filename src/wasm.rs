//! WASM bindings for texgrid
//!
//! This module exposes an editing session to JavaScript. A browser editor
//! keeps one `TableEditor`, forwards pointer gestures and toolbar actions to
//! it, and reads back the LaTeX after every change.

#[cfg(feature = "wasm")]
use wasm_bindgen::prelude::*;

#[cfg(feature = "wasm")]
use serde::{Deserialize, Serialize};

#[cfg(feature = "wasm")]
use crate::{
    diagnostics::{check_table, DiagnosticLevel},
    packages::usepackage_lines,
    Color, ColumnKind, Dialect, GlobalOptions, HAlign, StyleCommand, TableError, TableSession,
    VAlign,
};

/// Table options (exposed to WASM)
#[cfg(feature = "wasm")]
#[derive(Serialize, Deserialize)]
pub struct EditorOptions {
    #[serde(default)]
    pub caption: Option<String>,
    #[serde(default)]
    pub label: Option<String>,
    /// Paginated output (longtable / longtblr)
    #[serde(default)]
    pub long_table: bool,
    #[serde(default = "default_true")]
    pub horizontal_rules: bool,
    #[serde(default = "default_true")]
    pub vertical_rules: bool,
    #[serde(default = "default_true")]
    pub centering: bool,
    /// tabularray theme name
    #[serde(default)]
    pub theme: Option<String>,
}

#[cfg(feature = "wasm")]
fn default_true() -> bool {
    true
}

#[cfg(feature = "wasm")]
impl From<EditorOptions> for GlobalOptions {
    fn from(opts: EditorOptions) -> Self {
        GlobalOptions {
            caption: opts.caption,
            label: opts.label,
            long_table: opts.long_table,
            horizontal_rules: opts.horizontal_rules,
            vertical_rules: opts.vertical_rules,
            centering: opts.centering,
            theme: opts.theme,
        }
    }
}

/// Summary of table check results
#[cfg(feature = "wasm")]
#[derive(Serialize, Deserialize)]
pub struct CheckSummary {
    pub errors: Vec<String>,
    pub warnings: Vec<String>,
    pub infos: Vec<String>,
    pub has_errors: bool,
}

/// Initialize panic hook for better error messages in browser console
#[cfg(feature = "wasm")]
#[wasm_bindgen(start)]
pub fn init() {
    console_error_panic_hook::set_once();
}

/// Get version information
#[cfg(feature = "wasm")]
#[wasm_bindgen(js_name = "getVersion")]
pub fn get_version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

#[cfg(feature = "wasm")]
fn to_js(err: TableError) -> JsValue {
    JsValue::from_str(&err.to_string())
}

#[cfg(feature = "wasm")]
fn parse_color(value: &str) -> Result<Option<Color>, JsValue> {
    if value.trim().is_empty() {
        return Ok(None);
    }
    Color::parse(value).map(Some).map_err(to_js)
}

/// Editing session held by the browser
#[cfg(feature = "wasm")]
#[wasm_bindgen]
pub struct TableEditor {
    session: TableSession,
}

#[cfg(feature = "wasm")]
#[wasm_bindgen]
impl TableEditor {
    /// New `rows x cols` table of empty cells (at least 1x1)
    #[wasm_bindgen(constructor)]
    pub fn new(rows: usize, cols: usize) -> TableEditor {
        TableEditor {
            session: TableSession::new(rows, cols),
        }
    }

    pub fn rows(&self) -> usize {
        self.session.grid().rows()
    }

    pub fn cols(&self) -> usize {
        self.session.grid().cols()
    }

    /// The cell at `(row, col)` as a plain object
    #[wasm_bindgen(js_name = "cellAt")]
    pub fn cell_at(&self, row: usize, col: usize) -> Result<JsValue, JsValue> {
        let cell = self.session.grid().cell(row, col).map_err(to_js)?;
        let view = CellView {
            content: cell.content.clone(),
            row_span: cell.row_span,
            col_span: cell.col_span,
            hidden: cell.hidden,
            bold: cell.style.is_bold(),
            italic: cell.style.is_italic(),
        };
        serde_wasm_bindgen::to_value(&view).map_err(|e| JsValue::from_str(&e.to_string()))
    }

    // Selection gestures

    #[wasm_bindgen(js_name = "beginSelection")]
    pub fn begin_selection(&mut self, row: usize, col: usize) -> Result<(), JsValue> {
        self.session.begin_selection(row, col).map_err(to_js)
    }

    #[wasm_bindgen(js_name = "extendSelection")]
    pub fn extend_selection(&mut self, row: usize, col: usize) {
        self.session.extend_selection(row, col);
    }

    #[wasm_bindgen(js_name = "endSelection")]
    pub fn end_selection(&mut self) {
        self.session.end_selection();
    }

    #[wasm_bindgen(js_name = "selectAll")]
    pub fn select_all(&mut self) {
        self.session.select_all();
    }

    /// The normalized selection as `{min_row, min_col, max_row, max_col}`
    pub fn selection(&self) -> Result<JsValue, JsValue> {
        let range = self.session.selected_range();
        let view = RangeView {
            min_row: range.min_row,
            min_col: range.min_col,
            max_row: range.max_row,
            max_col: range.max_col,
        };
        serde_wasm_bindgen::to_value(&view).map_err(|e| JsValue::from_str(&e.to_string()))
    }

    // Regions

    #[wasm_bindgen(js_name = "mergeSelection")]
    pub fn merge_selection(&mut self) -> Result<(), JsValue> {
        self.session.merge_selection().map_err(to_js)
    }

    /// Returns how many regions were dissolved
    #[wasm_bindgen(js_name = "splitSelection")]
    pub fn split_selection(&mut self) -> Result<usize, JsValue> {
        self.session.split_selection().map_err(to_js)
    }

    // Structure

    #[wasm_bindgen(js_name = "addRow")]
    pub fn add_row(&mut self) {
        self.session.add_row();
    }

    #[wasm_bindgen(js_name = "addCol")]
    pub fn add_col(&mut self) {
        self.session.add_col();
    }

    #[wasm_bindgen(js_name = "insertRow")]
    pub fn insert_row(&mut self, at: usize) -> Result<(), JsValue> {
        self.session.insert_row(at).map_err(to_js)
    }

    #[wasm_bindgen(js_name = "insertCol")]
    pub fn insert_col(&mut self, at: usize) -> Result<(), JsValue> {
        self.session.insert_col(at).map_err(to_js)
    }

    #[wasm_bindgen(js_name = "deleteRow")]
    pub fn delete_row(&mut self, row: usize) -> Result<(), JsValue> {
        self.session.delete_row(row).map_err(to_js)
    }

    #[wasm_bindgen(js_name = "deleteCol")]
    pub fn delete_col(&mut self, col: usize) -> Result<(), JsValue> {
        self.session.delete_col(col).map_err(to_js)
    }

    /// Whether deleting the row would lose text (for a confirmation prompt)
    #[wasm_bindgen(js_name = "rowHasContent")]
    pub fn row_has_content(&self, row: usize) -> Result<bool, JsValue> {
        self.session.row_has_content(row).map_err(to_js)
    }

    #[wasm_bindgen(js_name = "colHasContent")]
    pub fn col_has_content(&self, col: usize) -> Result<bool, JsValue> {
        self.session.col_has_content(col).map_err(to_js)
    }

    // Content and style

    /// Returns false when the cell is covered by a merge
    #[wasm_bindgen(js_name = "setContent")]
    pub fn set_content(&mut self, row: usize, col: usize, text: &str) -> Result<bool, JsValue> {
        self.session.set_content(row, col, text).map_err(to_js)
    }

    #[wasm_bindgen(js_name = "toggleBold")]
    pub fn toggle_bold(&mut self) -> Result<usize, JsValue> {
        self.apply(StyleCommand::ToggleBold)
    }

    #[wasm_bindgen(js_name = "toggleItalic")]
    pub fn toggle_italic(&mut self) -> Result<usize, JsValue> {
        self.apply(StyleCommand::ToggleItalic)
    }

    /// `left`, `center`, `right`, or an empty string to unset
    #[wasm_bindgen(js_name = "setHAlign")]
    pub fn set_halign(&mut self, align: &str) -> Result<usize, JsValue> {
        let align = match align.trim() {
            "" => None,
            name => Some(HAlign::from_name(name).ok_or_else(|| {
                JsValue::from_str(&format!("unknown horizontal alignment '{}'", name))
            })?),
        };
        self.apply(StyleCommand::HAlign(align))
    }

    /// `top`, `middle`, `bottom`, or an empty string to unset
    #[wasm_bindgen(js_name = "setVAlign")]
    pub fn set_valign(&mut self, align: &str) -> Result<usize, JsValue> {
        let align = match align.trim() {
            "" => None,
            name => Some(VAlign::from_name(name).ok_or_else(|| {
                JsValue::from_str(&format!("unknown vertical alignment '{}'", name))
            })?),
        };
        self.apply(StyleCommand::VAlign(align))
    }

    /// Text color; an empty string unsets it
    #[wasm_bindgen(js_name = "setTextColor")]
    pub fn set_text_color(&mut self, color: &str) -> Result<usize, JsValue> {
        let color = parse_color(color)?;
        self.apply(StyleCommand::Foreground(color))
    }

    /// Background color; an empty string unsets it
    #[wasm_bindgen(js_name = "setBackgroundColor")]
    pub fn set_background_color(&mut self, color: &str) -> Result<usize, JsValue> {
        let color = parse_color(color)?;
        self.apply(StyleCommand::Background(color))
    }

    #[wasm_bindgen(js_name = "clearStyles")]
    pub fn clear_styles(&mut self) -> Result<usize, JsValue> {
        self.apply(StyleCommand::Clear)
    }

    // Columns

    #[wasm_bindgen(js_name = "setColumnKind")]
    pub fn set_column_kind(&mut self, col: usize, kind: &str) -> Result<(), JsValue> {
        let kind = ColumnKind::from_name(kind)
            .ok_or_else(|| JsValue::from_str(&format!("unknown column type '{}'", kind)))?;
        self.session.set_column_kind(col, kind).map_err(to_js)
    }

    /// An empty string clears the width
    #[wasm_bindgen(js_name = "setColumnWidth")]
    pub fn set_column_width(&mut self, col: usize, width: &str) -> Result<(), JsValue> {
        let width = Some(width.trim()).filter(|w| !w.is_empty());
        self.session.set_column_width(col, width).map_err(to_js)
    }

    // Output

    #[wasm_bindgen(js_name = "setDialect")]
    pub fn set_dialect(&mut self, name: &str) -> Result<(), JsValue> {
        let dialect: Dialect = name.parse().map_err(|e: String| JsValue::from_str(&e))?;
        self.session.set_dialect(dialect);
        Ok(())
    }

    pub fn dialect(&self) -> String {
        self.session.dialect().name().to_string()
    }

    /// Replace the table options; missing fields take their defaults
    #[wasm_bindgen(js_name = "setOptions")]
    pub fn set_options(&mut self, options: JsValue) -> Result<(), JsValue> {
        let opts: EditorOptions = serde_wasm_bindgen::from_value(options)
            .map_err(|e| JsValue::from_str(&e.to_string()))?;
        self.session.set_options(opts.into());
        Ok(())
    }

    /// LaTeX for the current dialect
    pub fn serialize(&self) -> String {
        self.session.serialize()
    }

    /// The `\usepackage` lines the output needs
    pub fn packages(&self) -> String {
        usepackage_lines(
            self.session.grid(),
            self.session.dialect(),
            self.session.options(),
        )
    }

    /// Check the table against the current dialect
    #[wasm_bindgen(js_name = "checkTable")]
    pub fn check_table(&self) -> Result<JsValue, JsValue> {
        let result = check_table(
            self.session.grid(),
            self.session.columns(),
            self.session.dialect(),
            self.session.options(),
        );

        // Group diagnostics by level
        let mut errors = Vec::new();
        let mut warnings = Vec::new();
        let mut infos = Vec::new();

        for d in &result.diagnostics {
            match d.level {
                DiagnosticLevel::Error => errors.push(d.to_string()),
                DiagnosticLevel::Warning => warnings.push(d.to_string()),
                DiagnosticLevel::Info => infos.push(d.to_string()),
            }
        }

        let summary = CheckSummary {
            errors,
            warnings,
            infos,
            has_errors: result.has_errors(),
        };
        serde_wasm_bindgen::to_value(&summary).map_err(|e| JsValue::from_str(&e.to_string()))
    }
}

#[cfg(feature = "wasm")]
impl TableEditor {
    fn apply(&mut self, command: StyleCommand) -> Result<usize, JsValue> {
        self.session.apply_style(&command).map_err(to_js)
    }
}

#[cfg(feature = "wasm")]
#[derive(Serialize)]
struct CellView {
    content: String,
    row_span: usize,
    col_span: usize,
    hidden: bool,
    bold: bool,
    italic: bool,
}

#[cfg(feature = "wasm")]
#[derive(Serialize)]
struct RangeView {
    min_row: usize,
    min_col: usize,
    max_row: usize,
    max_col: usize,
}
