//! LaTeX table dialects
//!
//! A grid, its column registry and the table-wide options are serialized
//! into one of three grammars:
//!
//! - `Modern`: `tabularray` (`tblr` / `longtblr`), declarative cell properties
//! - `Plain`: classic `tabular` / `longtable` with `\hline` and `|` rules
//! - `Rules`: `booktabs` rules on top of the `tabular` grammar
//!
//! # Architecture
//!
//! ```text
//! Grid + ColumnSpecs + GlobalOptions -> Serializer -> LaTeX fragment
//! ```
//!
//! # Example
//!
//! ```rust
//! use texgrid::core::columns::ColumnSpecs;
//! use texgrid::core::dialect::{serialize, Dialect, GlobalOptions};
//! use texgrid::core::grid::Grid;
//!
//! let grid = Grid::from_rows(&[vec!["a", "b"], vec!["c", "d"]]);
//! let columns = ColumnSpecs::new(grid.cols());
//! let latex = serialize(Dialect::Rules, &grid, &columns, &GlobalOptions::booktabs());
//! assert!(latex.contains("\\toprule"));
//! ```

mod emulated;
mod hline;
mod modern;
mod options;
mod plain;
mod rules;

#[cfg(test)]
mod tests;

use std::fmt;
use std::str::FromStr;

use crate::core::columns::{ColumnKind, ColumnSpecs, MappedColumn, Mapping};
use crate::core::grid::Grid;

// Re-export public API
pub use hline::{boundary_lines, HLineStyle, LatexHLine};
pub use modern::ModernSerializer;
pub use options::GlobalOptions;
pub use plain::PlainSerializer;
pub use rules::RulesSerializer;

/// Output grammar
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "lowercase")
)]
pub enum Dialect {
    /// tabularray
    #[default]
    Modern,
    /// tabular with `\hline`
    Plain,
    /// booktabs
    Rules,
}

impl Dialect {
    pub const ALL: [Dialect; 3] = [Dialect::Modern, Dialect::Plain, Dialect::Rules];

    pub fn name(&self) -> &'static str {
        match self {
            Dialect::Modern => "modern",
            Dialect::Plain => "plain",
            Dialect::Rules => "rules",
        }
    }

    /// Parse from a user-facing name, accepting the package names too
    pub fn from_name(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "modern" | "tabularray" | "tblr" => Some(Dialect::Modern),
            "plain" | "tabular" => Some(Dialect::Plain),
            "rules" | "booktabs" => Some(Dialect::Rules),
            _ => None,
        }
    }

    /// The serializer for this dialect
    pub fn serializer(&self) -> &'static dyn Serializer {
        match self {
            Dialect::Modern => &ModernSerializer,
            Dialect::Plain => &PlainSerializer,
            Dialect::Rules => &RulesSerializer,
        }
    }
}

impl fmt::Display for Dialect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for Dialect {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Dialect::from_name(s).ok_or_else(|| format!("unknown dialect '{}'", s))
    }
}

/// Turns a table into a LaTeX fragment
pub trait Serializer {
    fn dialect(&self) -> Dialect;

    fn serialize(&self, grid: &Grid, columns: &ColumnSpecs, options: &GlobalOptions) -> String;
}

/// Serialize with the given dialect
pub fn serialize(
    dialect: Dialect,
    grid: &Grid,
    columns: &ColumnSpecs,
    options: &GlobalOptions,
) -> String {
    dialect.serializer().serialize(grid, columns, options)
}

/// Column mapping sized to the grid.
///
/// A registry out of step with the grid is padded with centred columns
/// or truncated, so emitters can index it by grid column.
pub(crate) fn resolve_columns(
    grid: &Grid,
    columns: &ColumnSpecs,
    dialect: Dialect,
) -> Vec<MappedColumn> {
    let mut mapped = columns.map_for_dialect(dialect);
    if mapped.len() != grid.cols() {
        tracing::debug!(
            registry = mapped.len(),
            cols = grid.cols(),
            "column registry out of step with grid"
        );
    }
    mapped.truncate(grid.cols());
    while mapped.len() < grid.cols() {
        mapped.push(MappedColumn {
            token: "c".to_string(),
            kind: ColumnKind::Center,
            mapping: Mapping::Native,
        });
    }
    for (col, column) in mapped.iter().enumerate() {
        if let Mapping::Fallback { from, to } = column.mapping {
            tracing::debug!(col, %from, %to, dialect = %dialect, "column type fallback");
        }
    }
    mapped
}
