//! Data layer - static tables and validated values
//!
//! This module contains the static data the serializers rely on:
//! - xcolor base and dvipsnames color names
//! - Color parsing and validation

pub mod colors;

// Re-export commonly used items
pub use colors::{Color, DVIPS_NAMES, XCOLOR_BASE_NAMES};
