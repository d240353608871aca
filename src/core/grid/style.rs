//! Selection-wide style commands
//!
//! Bold and italic use toggle-by-example: the focused cell's current flag
//! decides whether the whole selection is switched on or off. Alignment and
//! colors are plain assignments.

use tracing::debug;

use super::cell::{CellStyle, HAlign, VAlign};
use super::model::Grid;
use super::selection::CellRange;
use crate::data::colors::Color;
use crate::utils::error::TableResult;

/// A style change applied to a selection
#[derive(Debug, Clone, PartialEq)]
pub enum StyleCommand {
    ToggleBold,
    ToggleItalic,
    HAlign(Option<HAlign>),
    VAlign(Option<VAlign>),
    Foreground(Option<Color>),
    Background(Option<Color>),
    Clear,
}

/// Apply `command` to every visible cell of `range`.
///
/// `focused` is the cell whose current state drives the toggles. A hidden
/// focused cell reads as unstyled. Returns how many cells changed.
pub fn apply_style(
    grid: &mut Grid,
    range: &CellRange,
    focused: (usize, usize),
    command: &StyleCommand,
) -> TableResult<usize> {
    let focused_style = grid.cell(focused.0, focused.1)?.style.clone();

    let updated = match command {
        StyleCommand::ToggleBold => {
            let value = !focused_style.is_bold();
            grid.update_cells_in_range(range, |edit| edit.style.bold = Some(value))?
        }
        StyleCommand::ToggleItalic => {
            let value = !focused_style.is_italic();
            grid.update_cells_in_range(range, |edit| edit.style.italic = Some(value))?
        }
        StyleCommand::HAlign(align) => {
            grid.update_cells_in_range(range, |edit| edit.style.halign = *align)?
        }
        StyleCommand::VAlign(align) => {
            grid.update_cells_in_range(range, |edit| edit.style.valign = *align)?
        }
        StyleCommand::Foreground(color) => {
            grid.update_cells_in_range(range, |edit| edit.style.fg_color = color.clone())?
        }
        StyleCommand::Background(color) => {
            grid.update_cells_in_range(range, |edit| edit.style.bg_color = color.clone())?
        }
        StyleCommand::Clear => return clear_styles(grid, range),
    };

    debug!(?command, updated, "applied style");
    Ok(updated)
}

/// Reset every style field to unset on the visible cells of `range`
pub fn clear_styles(grid: &mut Grid, range: &CellRange) -> TableResult<usize> {
    let updated = grid.update_cells_in_range(range, |edit| *edit.style = CellStyle::default())?;
    debug!(updated, "cleared styles");
    Ok(updated)
}
