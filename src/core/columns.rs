//! Column specifications and their mapping onto each dialect
//!
//! Every column carries a type and an optional width. The Modern dialect
//! expresses all types natively when the width suits the type; the
//! tabular-based dialects have no flexible columns and degrade them
//! deterministically to paragraph columns (or centred columns when no width
//! is known).

use lazy_static::lazy_static;
use regex::Regex;
use std::fmt;

use crate::core::dialect::Dialect;
use crate::utils::error::{TableError, TableResult};

lazy_static! {
    /// TeX dimension, including multiples of the usual length macros
    static ref DIMENSION: Regex = Regex::new(
        r"^(\d+(\.\d+)?|\.\d+)\s*(pt|mm|cm|in|em|ex|bp|pc|dd|cc|sp|\\linewidth|\\textwidth|\\columnwidth)$"
    )
    .unwrap();

    /// Unitless number: a weight for flexible-ratio columns, a fraction of
    /// the line width otherwise
    static ref RATIO: Regex = Regex::new(r"^(\d+(\.\d+)?|\.\d+)$").unwrap();
}

/// Column type as chosen in the column header menu
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "kebab-case")
)]
pub enum ColumnKind {
    Left,
    #[default]
    Center,
    Right,
    /// Stretches with a relative weight (`X[2]`)
    FlexibleRatio,
    /// Stretchable column with a fixed target width
    FlexibleFixed,
    /// Wrapped paragraph with a width (`p{3cm}`)
    Paragraph,
}

impl ColumnKind {
    /// Whether the width field means anything for this type
    pub fn uses_width(&self) -> bool {
        matches!(
            self,
            ColumnKind::FlexibleRatio | ColumnKind::FlexibleFixed | ColumnKind::Paragraph
        )
    }

    /// Parse from a user-facing name
    pub fn from_name(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "left" | "l" => Some(ColumnKind::Left),
            "center" | "centre" | "c" => Some(ColumnKind::Center),
            "right" | "r" => Some(ColumnKind::Right),
            "flexible-ratio" | "ratio" | "x" => Some(ColumnKind::FlexibleRatio),
            "flexible-fixed" | "fixed" => Some(ColumnKind::FlexibleFixed),
            "paragraph" | "p" => Some(ColumnKind::Paragraph),
            _ => None,
        }
    }
}

impl fmt::Display for ColumnKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ColumnKind::Left => "left",
            ColumnKind::Center => "center",
            ColumnKind::Right => "right",
            ColumnKind::FlexibleRatio => "flexible-ratio",
            ColumnKind::FlexibleFixed => "flexible-fixed",
            ColumnKind::Paragraph => "paragraph",
        };
        write!(f, "{}", name)
    }
}

/// How a width string reads
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WidthKind {
    /// `3cm`, `0.4\linewidth`
    Dimension,
    /// `2`, `0.25`
    Ratio,
}

/// Classify a width, `None` when it is neither a dimension nor a ratio
pub fn classify_width(width: &str) -> Option<WidthKind> {
    let width = width.trim();
    if DIMENSION.is_match(width) {
        Some(WidthKind::Dimension)
    } else if RATIO.is_match(width) {
        Some(WidthKind::Ratio)
    } else {
        None
    }
}

/// Per-column metadata
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(default)
)]
pub struct ColumnSpec {
    pub kind: ColumnKind,
    /// Kept even when the type ignores it, so switching back restores it
    #[cfg_attr(feature = "serde", serde(skip_serializing_if = "Option::is_none"))]
    pub width: Option<String>,
}

impl ColumnSpec {
    pub fn new(kind: ColumnKind) -> Self {
        ColumnSpec { kind, width: None }
    }

    pub fn with_width(kind: ColumnKind, width: impl Into<String>) -> Self {
        ColumnSpec {
            kind,
            width: Some(width.into()),
        }
    }

    /// The width when the type uses it and it is not blank
    pub fn effective_width(&self) -> Option<&str> {
        if !self.kind.uses_width() {
            return None;
        }
        self.width
            .as_deref()
            .map(str::trim)
            .filter(|w| !w.is_empty())
    }
}

/// Result of mapping a column onto a dialect
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mapping {
    /// The dialect has the column type
    Native,
    /// The type was degraded to another one
    Fallback { from: ColumnKind, to: ColumnKind },
}

/// A column as a given dialect will emit it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MappedColumn {
    /// Column specification token, e.g. `c`, `X[2]`, `p{3cm}`
    pub token: String,
    /// The type actually emitted
    pub kind: ColumnKind,
    pub mapping: Mapping,
}

impl MappedColumn {
    fn native(kind: ColumnKind, token: impl Into<String>) -> Self {
        MappedColumn {
            token: token.into(),
            kind,
            mapping: Mapping::Native,
        }
    }

    fn fallback(from: ColumnKind, to: ColumnKind, token: impl Into<String>) -> Self {
        MappedColumn {
            token: token.into(),
            kind: to,
            mapping: Mapping::Fallback { from, to },
        }
    }

    pub fn is_fallback(&self) -> bool {
        matches!(self.mapping, Mapping::Fallback { .. })
    }

    /// Single alignment character for `\multicolumn` specs
    pub fn align_char(&self) -> char {
        match self.kind {
            ColumnKind::Left | ColumnKind::Paragraph => 'l',
            ColumnKind::Right => 'r',
            _ => 'c',
        }
    }
}

/// Column registry, always as long as the grid is wide
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnSpecs {
    specs: Vec<ColumnSpec>,
}

impl ColumnSpecs {
    /// `cols` centred columns
    pub fn new(cols: usize) -> Self {
        ColumnSpecs {
            specs: vec![ColumnSpec::default(); cols],
        }
    }

    pub fn from_specs(specs: Vec<ColumnSpec>) -> Self {
        ColumnSpecs { specs }
    }

    pub fn len(&self) -> usize {
        self.specs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.specs.is_empty()
    }

    pub fn get(&self, col: usize) -> Option<&ColumnSpec> {
        self.specs.get(col)
    }

    pub fn iter(&self) -> impl Iterator<Item = &ColumnSpec> {
        self.specs.iter()
    }

    pub fn as_slice(&self) -> &[ColumnSpec] {
        &self.specs
    }

    fn check(&self, col: usize) -> TableResult<()> {
        if col < self.specs.len() {
            Ok(())
        } else {
            Err(TableError::out_of_bounds(0, col, 0, self.specs.len()))
        }
    }

    /// Append a default column
    pub fn push_default(&mut self) {
        self.specs.push(ColumnSpec::default());
    }

    /// Insert a default column before `at`
    pub fn insert_default(&mut self, at: usize) -> TableResult<()> {
        if at > self.specs.len() {
            return Err(TableError::out_of_bounds(0, at, 0, self.specs.len()));
        }
        self.specs.insert(at, ColumnSpec::default());
        Ok(())
    }

    /// Remove column `col`, returning its spec
    pub fn remove(&mut self, col: usize) -> TableResult<ColumnSpec> {
        self.check(col)?;
        Ok(self.specs.remove(col))
    }

    pub fn set_kind(&mut self, col: usize, kind: ColumnKind) -> TableResult<()> {
        self.check(col)?;
        self.specs[col].kind = kind;
        Ok(())
    }

    /// Set or clear a column width. Blank clears; anything else must be a
    /// TeX dimension or a unitless ratio.
    pub fn set_width(&mut self, col: usize, width: Option<&str>) -> TableResult<()> {
        self.check(col)?;
        let width = match width.map(str::trim).filter(|w| !w.is_empty()) {
            Some(w) if classify_width(w).is_none() => {
                return Err(TableError::invalid_dimension(w));
            }
            other => other.map(str::to_string),
        };
        self.specs[col].width = width;
        Ok(())
    }

    /// Map every column onto `dialect`.
    ///
    /// Pure function of the registry and the dialect: repeated calls give
    /// identical results.
    pub fn map_for_dialect(&self, dialect: Dialect) -> Vec<MappedColumn> {
        match dialect {
            Dialect::Modern => self.specs.iter().map(map_modern).collect(),
            Dialect::Plain | Dialect::Rules => {
                let ratio_total: f64 = self
                    .specs
                    .iter()
                    .filter(|spec| spec.kind == ColumnKind::FlexibleRatio)
                    .filter_map(|spec| spec.effective_width())
                    .filter_map(|w| w.parse::<f64>().ok())
                    .sum();
                self.specs
                    .iter()
                    .map(|spec| map_tabular(spec, ratio_total))
                    .collect()
            }
        }
    }
}

impl Default for ColumnSpecs {
    fn default() -> Self {
        ColumnSpecs::new(crate::core::grid::DEFAULT_COLS)
    }
}

fn map_modern(spec: &ColumnSpec) -> MappedColumn {
    let width = spec.effective_width();
    let width_kind = width.and_then(classify_width);
    match (spec.kind, width) {
        (ColumnKind::Left, _) => MappedColumn::native(spec.kind, "l"),
        (ColumnKind::Center, _) => MappedColumn::native(spec.kind, "c"),
        (ColumnKind::Right, _) => MappedColumn::native(spec.kind, "r"),
        (ColumnKind::FlexibleRatio, None) => MappedColumn::native(spec.kind, "X"),
        (ColumnKind::FlexibleRatio, Some(w)) => match width_kind {
            Some(WidthKind::Ratio) => MappedColumn::native(spec.kind, format!("X[{}]", w)),
            _ => MappedColumn::fallback(
                spec.kind,
                ColumnKind::FlexibleFixed,
                format!("Q[wd={}]", w),
            ),
        },
        (ColumnKind::FlexibleFixed, Some(w)) if width_kind != Some(WidthKind::Ratio) => {
            MappedColumn::native(spec.kind, format!("Q[wd={}]", w))
        }
        (ColumnKind::FlexibleFixed, _) => {
            MappedColumn::fallback(spec.kind, ColumnKind::FlexibleRatio, "X")
        }
        (ColumnKind::Paragraph, Some(w)) => {
            MappedColumn::native(spec.kind, format!("p{{{}}}", paragraph_width(w)))
        }
        (ColumnKind::Paragraph, None) => {
            MappedColumn::fallback(spec.kind, ColumnKind::Left, "l")
        }
    }
}

fn map_tabular(spec: &ColumnSpec, ratio_total: f64) -> MappedColumn {
    let width = spec.effective_width();
    match (spec.kind, width) {
        (ColumnKind::Left, _) => MappedColumn::native(spec.kind, "l"),
        (ColumnKind::Center, _) => MappedColumn::native(spec.kind, "c"),
        (ColumnKind::Right, _) => MappedColumn::native(spec.kind, "r"),
        (ColumnKind::Paragraph, Some(w)) => {
            MappedColumn::native(spec.kind, format!("p{{{}}}", paragraph_width(w)))
        }
        (ColumnKind::Paragraph, None) => {
            MappedColumn::fallback(spec.kind, ColumnKind::Left, "l")
        }
        (ColumnKind::FlexibleRatio, Some(w)) => {
            let token = match (classify_width(w), w.parse::<f64>()) {
                (Some(WidthKind::Ratio), Ok(weight)) if ratio_total > 0.0 => {
                    format!(
                        "p{{{}\\linewidth}}",
                        format_fraction(weight / ratio_total)
                    )
                }
                _ => format!("p{{{}}}", paragraph_width(w)),
            };
            MappedColumn::fallback(spec.kind, ColumnKind::Paragraph, token)
        }
        (ColumnKind::FlexibleFixed, Some(w)) => MappedColumn::fallback(
            spec.kind,
            ColumnKind::Paragraph,
            format!("p{{{}}}", paragraph_width(w)),
        ),
        (ColumnKind::FlexibleRatio | ColumnKind::FlexibleFixed, None) => {
            MappedColumn::fallback(spec.kind, ColumnKind::Center, "c")
        }
    }
}

/// Width argument for a `p{}` column: unitless values are fractions of
/// the line width
fn paragraph_width(width: &str) -> String {
    match classify_width(width) {
        Some(WidthKind::Ratio) => format!("{}\\linewidth", width),
        _ => width.to_string(),
    }
}

/// Three decimals, trailing zeros trimmed: `0.5`, `0.333`
fn format_fraction(value: f64) -> String {
    let text = format!("{:.3}", value);
    match text.trim_end_matches('0').trim_end_matches('.') {
        "" => "0".to_string(),
        trimmed => trimmed.to_string(),
    }
}
