//! Cell types and per-cell style for the table grid

use crate::data::colors::Color;

/// Horizontal alignment override for a single cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "lowercase")
)]
pub enum HAlign {
    Left,
    Center,
    Right,
    Justify,
}

impl HAlign {
    /// tabularray `halign` value / tabular column character
    pub fn to_char(&self) -> char {
        match self {
            HAlign::Left => 'l',
            HAlign::Center => 'c',
            HAlign::Right => 'r',
            HAlign::Justify => 'j',
        }
    }

    /// Parse from a user-facing name
    pub fn from_name(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "left" | "l" => Some(HAlign::Left),
            "center" | "centre" | "c" => Some(HAlign::Center),
            "right" | "r" => Some(HAlign::Right),
            "justify" | "j" => Some(HAlign::Justify),
            _ => None,
        }
    }
}

/// Vertical alignment override for a single cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "lowercase")
)]
pub enum VAlign {
    Head,
    Middle,
    Foot,
}

impl VAlign {
    /// tabularray `valign` value
    pub fn to_tblr(&self) -> char {
        match self {
            VAlign::Head => 'h',
            VAlign::Middle => 'm',
            VAlign::Foot => 'f',
        }
    }

    /// `\multirow` vertical position argument
    pub fn to_multirow(&self) -> char {
        match self {
            VAlign::Head => 't',
            VAlign::Middle => 'c',
            VAlign::Foot => 'b',
        }
    }

    /// Parse from a user-facing name
    pub fn from_name(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "head" | "top" | "h" | "t" => Some(VAlign::Head),
            "middle" | "m" => Some(VAlign::Middle),
            "foot" | "bottom" | "f" | "b" => Some(VAlign::Foot),
            _ => None,
        }
    }
}

/// Sparse per-cell style. Every `None` means "inherit the default".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(default)
)]
pub struct CellStyle {
    #[cfg_attr(feature = "serde", serde(skip_serializing_if = "Option::is_none"))]
    pub bold: Option<bool>,
    #[cfg_attr(feature = "serde", serde(skip_serializing_if = "Option::is_none"))]
    pub italic: Option<bool>,
    #[cfg_attr(feature = "serde", serde(skip_serializing_if = "Option::is_none"))]
    pub halign: Option<HAlign>,
    #[cfg_attr(feature = "serde", serde(skip_serializing_if = "Option::is_none"))]
    pub valign: Option<VAlign>,
    #[cfg_attr(feature = "serde", serde(skip_serializing_if = "Option::is_none"))]
    pub fg_color: Option<Color>,
    #[cfg_attr(feature = "serde", serde(skip_serializing_if = "Option::is_none"))]
    pub bg_color: Option<Color>,
}

impl CellStyle {
    /// Whether no field is set
    pub fn is_unset(&self) -> bool {
        *self == CellStyle::default()
    }

    /// Bold, treating "unset" as off
    pub fn is_bold(&self) -> bool {
        self.bold.unwrap_or(false)
    }

    /// Italic, treating "unset" as off
    pub fn is_italic(&self) -> bool {
        self.italic.unwrap_or(false)
    }

    /// Whether the style changes anything compared to the defaults.
    /// `bold: Some(false)` is set but has no visible effect.
    pub fn has_effect(&self) -> bool {
        self.is_bold()
            || self.is_italic()
            || self.halign.is_some()
            || self.valign.is_some()
            || self.fg_color.is_some()
            || self.bg_color.is_some()
    }
}

/// A single grid cell: either a master (possibly spanning) or a shadow
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Cell {
    /// Raw user text, may contain nested markup
    pub content: String,
    /// Number of rows this cell spans (masters only)
    pub row_span: usize,
    /// Number of columns this cell spans (masters only)
    pub col_span: usize,
    /// Whether this cell is covered by another cell's span
    pub hidden: bool,
    /// Per-cell style overrides
    pub style: CellStyle,
}

impl Cell {
    /// Create a new unmerged cell with content
    pub fn new(content: impl Into<String>) -> Self {
        Cell {
            content: content.into(),
            row_span: 1,
            col_span: 1,
            hidden: false,
            style: CellStyle::default(),
        }
    }

    /// Create an empty unmerged cell
    pub fn empty() -> Self {
        Self::new(String::new())
    }

    /// Create a cleared shadow cell
    pub fn shadow() -> Self {
        Cell {
            hidden: true,
            ..Self::empty()
        }
    }

    /// Whether this cell spans more than itself
    pub fn is_spanning(&self) -> bool {
        self.row_span > 1 || self.col_span > 1
    }

    /// Whether this cell is the visible owner of a merged region
    pub fn is_master(&self) -> bool {
        !self.hidden && self.is_spanning()
    }

    /// Whether the content has anything but whitespace
    pub fn has_content(&self) -> bool {
        !self.content.trim().is_empty()
    }
}

impl Default for Cell {
    fn default() -> Self {
        Self::empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shadow_is_cleared() {
        let cell = Cell::shadow();
        assert!(cell.hidden);
        assert_eq!(cell.row_span, 1);
        assert_eq!(cell.col_span, 1);
        assert!(cell.content.is_empty());
        assert!(cell.style.is_unset());
    }

    #[test]
    fn test_style_effect() {
        let mut style = CellStyle::default();
        assert!(style.is_unset());
        assert!(!style.has_effect());

        style.bold = Some(false);
        assert!(!style.is_unset());
        assert!(!style.has_effect());

        style.halign = Some(HAlign::Right);
        assert!(style.has_effect());
    }

    #[test]
    fn test_alignment_names() {
        assert_eq!(HAlign::from_name("Centre"), Some(HAlign::Center));
        assert_eq!(VAlign::from_name("bottom"), Some(VAlign::Foot));
        assert_eq!(VAlign::Head.to_multirow(), 't');
        assert_eq!(VAlign::Foot.to_tblr(), 'f');
        assert_eq!(HAlign::from_name("diagonal"), None);
    }

    #[test]
    fn test_whitespace_is_not_content() {
        assert!(!Cell::new("  \t").has_content());
        assert!(Cell::new(" x ").has_content());
    }
}
