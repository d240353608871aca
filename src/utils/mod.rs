//! Utility modules
//!
//! This module contains utilities and helpers:
//! - Table diagnostics and their terminal formatting
//! - LaTeX text escaping
//! - Error types and result types

pub mod diagnostics;
pub mod error;
pub mod escape;

// Re-export commonly used items
pub use diagnostics::{check_table, format_diagnostics, CheckResult, Diagnostic, DiagnosticLevel};
pub use error::{Axis, TableError, TableResult};
pub use escape::escape_latex_text;
