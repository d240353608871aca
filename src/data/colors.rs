//! Color support for cell foreground and background
//!
//! Colors are kept in a form xcolor understands directly: either a named
//! color expression (`red`, `blue!20`, `red!30!white`) or an HTML hex
//! triplet. Both the `\cellcolor`/`\textcolor` commands and tabularray's
//! `fg=`/`bg=` keys accept these.

use lazy_static::lazy_static;
use phf::phf_set;
use regex::Regex;
use std::fmt;
use std::str::FromStr;

use crate::utils::error::{TableError, TableResult};

lazy_static! {
    /// xcolor color expression: `name`, `name!pct`, `name!pct!name`, ...
    static ref COLOR_EXPR: Regex =
        Regex::new(r"^[A-Za-z][A-Za-z0-9]*(![0-9]{1,3}(![A-Za-z][A-Za-z0-9]*)?)*$").unwrap();

    /// HTML hex triplet, with or without the leading `#`
    static ref HTML_COLOR: Regex = Regex::new(r"^#?([0-9A-Fa-f]{6})$").unwrap();
}

/// Colors xcolor defines without any package option
pub static XCOLOR_BASE_NAMES: phf::Set<&'static str> = phf_set! {
    "black", "blue", "brown", "cyan", "darkgray", "gray", "green", "lightgray",
    "lime", "magenta", "olive", "orange", "pink", "purple", "red", "teal",
    "violet", "white", "yellow",
};

/// Colors that need `\usepackage[dvipsnames]{xcolor}`
pub static DVIPS_NAMES: phf::Set<&'static str> = phf_set! {
    "Apricot", "Aquamarine", "Bittersweet", "Black", "Blue", "BlueGreen",
    "BlueViolet", "BrickRed", "Brown", "BurntOrange", "CadetBlue",
    "CarnationPink", "Cerulean", "CornflowerBlue", "Cyan", "Dandelion",
    "DarkOrchid", "Emerald", "ForestGreen", "Fuchsia", "Goldenrod", "Gray",
    "Green", "GreenYellow", "JungleGreen", "Lavender", "LimeGreen", "Magenta",
    "Mahogany", "Maroon", "Melon", "MidnightBlue", "Mulberry", "NavyBlue",
    "OliveGreen", "Orange", "OrangeRed", "Orchid", "Peach", "Periwinkle",
    "PineGreen", "Plum", "ProcessBlue", "Purple", "RawSienna", "Red",
    "RedOrange", "RedViolet", "Rhodamine", "RoyalBlue", "RoyalPurple",
    "RubineRed", "Salmon", "SeaGreen", "Sepia", "SkyBlue", "SpringGreen",
    "Tan", "TealBlue", "Thistle", "Turquoise", "Violet", "VioletRed", "White",
    "WildStrawberry", "Yellow", "YellowGreen", "YellowOrange",
};

/// A validated xcolor color
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(try_from = "String", into = "String")
)]
pub enum Color {
    /// Named color or color expression, e.g. `blue!20`
    Named(String),
    /// HTML hex triplet, stored as six uppercase hex digits
    Html(String),
}

impl Color {
    /// Parse and validate a color value
    pub fn parse(input: &str) -> TableResult<Self> {
        let value = input.trim();
        if let Some(caps) = HTML_COLOR.captures(value) {
            // A bare six-letter word like "indigo" is a name, not hex
            if value.starts_with('#') || value.chars().any(|c| c.is_ascii_digit()) {
                return Ok(Color::Html(caps[1].to_ascii_uppercase()));
            }
        }
        if COLOR_EXPR.is_match(value) {
            return Ok(Color::Named(value.to_string()));
        }
        Err(TableError::invalid_color(input))
    }

    /// The base color names referenced by this color (empty for HTML colors)
    pub fn base_names(&self) -> Vec<&str> {
        match self {
            Color::Named(expr) => expr
                .split('!')
                .filter(|part| !part.chars().all(|c| c.is_ascii_digit()))
                .collect(),
            Color::Html(_) => Vec::new(),
        }
    }

    /// Whether any referenced name comes from the dvipsnames set
    pub fn needs_dvipsnames(&self) -> bool {
        self.base_names().iter().any(|name| DVIPS_NAMES.contains(*name))
    }

    /// Names xcolor does not know out of the box or via dvipsnames
    pub fn unknown_names(&self) -> Vec<&str> {
        self.base_names()
            .into_iter()
            .filter(|name| !XCOLOR_BASE_NAMES.contains(*name) && !DVIPS_NAMES.contains(*name))
            .collect()
    }

    /// Arguments for `\cellcolor` / `\textcolor`: `{red!20}` or `[HTML]{1E90FF}`
    pub fn to_latex_args(&self) -> String {
        match self {
            Color::Named(expr) => format!("{{{}}}", expr),
            Color::Html(hex) => format!("[HTML]{{{}}}", hex),
        }
    }

    /// Name usable as a key value; HTML colors need a matching
    /// [`Color::definition`] emitted before use
    pub fn key_name(&self) -> String {
        match self {
            Color::Named(expr) => expr.clone(),
            Color::Html(hex) => format!("tgrid{}", hex),
        }
    }

    /// `\definecolor` line for HTML colors
    pub fn definition(&self) -> Option<String> {
        match self {
            Color::Named(_) => None,
            Color::Html(hex) => Some(format!(
                "\\definecolor{{{}}}{{HTML}}{{{}}}",
                self.key_name(),
                hex
            )),
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Color::Named(expr) => write!(f, "{}", expr),
            Color::Html(hex) => write!(f, "#{}", hex),
        }
    }
}

impl FromStr for Color {
    type Err = TableError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Color::parse(s)
    }
}

impl TryFrom<String> for Color {
    type Error = TableError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Color::parse(&value)
    }
}

impl From<Color> for String {
    fn from(color: Color) -> Self {
        color.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_named_colors() {
        assert_eq!(Color::parse("red").unwrap(), Color::Named("red".into()));
        assert_eq!(
            Color::parse(" blue!20 ").unwrap(),
            Color::Named("blue!20".into())
        );
        assert!(Color::parse("red!30!white").is_ok());
    }

    #[test]
    fn test_html_colors() {
        assert_eq!(
            Color::parse("#1e90ff").unwrap(),
            Color::Html("1E90FF".into())
        );
        assert_eq!(Color::parse("00FF00").unwrap(), Color::Html("00FF00".into()));
        // All-letter six character words stay names
        assert_eq!(Color::parse("indigo").unwrap(), Color::Named("indigo".into()));
    }

    #[test]
    fn test_invalid_colors() {
        assert!(Color::parse("").is_err());
        assert!(Color::parse("red!").is_err());
        assert!(Color::parse("rgb(1,2,3)").is_err());
        assert!(Color::parse("#12345").is_err());
    }

    #[test]
    fn test_latex_args() {
        assert_eq!(Color::parse("red!20").unwrap().to_latex_args(), "{red!20}");
        assert_eq!(
            Color::parse("#336699").unwrap().to_latex_args(),
            "[HTML]{336699}"
        );
    }

    #[test]
    fn test_definition() {
        let html = Color::parse("#336699").unwrap();
        assert_eq!(html.key_name(), "tgrid336699");
        assert_eq!(
            html.definition().unwrap(),
            "\\definecolor{tgrid336699}{HTML}{336699}"
        );
        assert!(Color::parse("red").unwrap().definition().is_none());
    }

    #[test]
    fn test_name_classification() {
        assert!(Color::parse("ForestGreen!40").unwrap().needs_dvipsnames());
        assert!(!Color::parse("red!40!white").unwrap().needs_dvipsnames());
        assert_eq!(
            Color::parse("Chartreuse").unwrap().unknown_names(),
            vec!["Chartreuse"]
        );
    }
}
