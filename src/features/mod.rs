//! Feature modules - everything around the core engine
//!
//! This module contains the pieces an embedding application needs besides
//! the serializer itself:
//! - Required `\usepackage` lines for a rendered table
//! - CSV/TSV import (feature `data-loading`)
//! - Table documents in TOML/JSON/YAML (feature `data-loading`)

pub mod packages;

#[cfg(feature = "data-loading")]
pub mod document;
#[cfg(feature = "data-loading")]
pub mod import;

// Re-export commonly used types
pub use packages::{required_packages, usepackage_lines, Package};

#[cfg(feature = "data-loading")]
pub use document::{DocumentFormat, MergeSpec, StyleSpec, TableDocument};
#[cfg(feature = "data-loading")]
pub use import::{detect_delimiter, import_delimited, Delimiter, ImportOptions};
