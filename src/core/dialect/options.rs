//! Table-wide output options

/// Options shared by every dialect
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(default)
)]
pub struct GlobalOptions {
    /// Table caption (optional)
    #[cfg_attr(feature = "serde", serde(skip_serializing_if = "Option::is_none"))]
    pub caption: Option<String>,
    /// Cross-reference label, emitted with the caption
    #[cfg_attr(feature = "serde", serde(skip_serializing_if = "Option::is_none"))]
    pub label: Option<String>,
    /// Paginated output (longtable / longtblr)
    pub long_table: bool,
    /// Rules between rows
    pub horizontal_rules: bool,
    /// Rules between columns (ignored by the booktabs dialect)
    pub vertical_rules: bool,
    /// Center the table horizontally
    pub centering: bool,
    /// tabularray theme name (Modern dialect only)
    #[cfg_attr(feature = "serde", serde(skip_serializing_if = "Option::is_none"))]
    pub theme: Option<String>,
}

impl Default for GlobalOptions {
    fn default() -> Self {
        Self {
            caption: None,
            label: None,
            long_table: false,
            horizontal_rules: true,
            vertical_rules: true,
            centering: true,
            theme: None,
        }
    }
}

impl GlobalOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// No rules at all, the usual starting point for booktabs tables
    pub fn booktabs() -> Self {
        Self {
            horizontal_rules: false,
            vertical_rules: false,
            ..Default::default()
        }
    }

    /// Paginated table
    pub fn long() -> Self {
        Self {
            long_table: true,
            ..Default::default()
        }
    }

    pub fn with_caption(mut self, caption: impl Into<String>) -> Self {
        self.caption = Some(caption.into());
        self
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    /// Caption text when set and not blank
    pub fn caption_text(&self) -> Option<&str> {
        non_blank(self.caption.as_deref())
    }

    /// Label, only meaningful next to a caption
    pub fn label_text(&self) -> Option<&str> {
        self.caption_text()?;
        non_blank(self.label.as_deref())
    }

    pub fn theme_name(&self) -> Option<&str> {
        non_blank(self.theme.as_deref())
    }

    /// Whether a non-paginated table goes into a `table` float
    pub fn wants_float(&self) -> bool {
        !self.long_table && self.caption_text().is_some()
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

/// Open the float or centering environment around a non-paginated table
pub(crate) fn begin_frame(out: &mut String, options: &GlobalOptions) {
    if options.long_table {
        return;
    }
    if options.wants_float() {
        out.push_str("\\begin{table}[htbp]\n");
        if options.centering {
            out.push_str("\\centering\n");
        }
    } else if options.centering {
        out.push_str("\\begin{center}\n");
    }
}

/// Close what [`begin_frame`] opened, adding caption and label to floats
pub(crate) fn end_frame(out: &mut String, options: &GlobalOptions) {
    if options.long_table {
        return;
    }
    if options.wants_float() {
        if let Some(caption) = options.caption_text() {
            out.push_str(&format!("\\caption{{{}}}\n", caption));
        }
        if let Some(label) = options.label_text() {
            out.push_str(&format!("\\label{{{}}}\n", label));
        }
        out.push_str("\\end{table}");
    } else if options.centering {
        out.push_str("\\end{center}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let opts = GlobalOptions::default();
        assert!(opts.horizontal_rules);
        assert!(opts.vertical_rules);
        assert!(opts.centering);
        assert!(!opts.long_table);
        assert!(!opts.wants_float());
    }

    #[test]
    fn test_label_needs_caption() {
        let opts = GlobalOptions::new().with_label("tab:x");
        assert_eq!(opts.label_text(), None);

        let opts = opts.with_caption("Results");
        assert_eq!(opts.label_text(), Some("tab:x"));
        assert!(opts.wants_float());
    }

    #[test]
    fn test_blank_caption_is_ignored() {
        let opts = GlobalOptions::new().with_caption("   ");
        assert_eq!(opts.caption_text(), None);
        assert!(!opts.wants_float());
    }

    #[test]
    fn test_frame_float() {
        let opts = GlobalOptions::new().with_caption("Cap").with_label("tab:a");
        let mut out = String::new();
        begin_frame(&mut out, &opts);
        out.push_str("BODY\n");
        end_frame(&mut out, &opts);
        assert_eq!(
            out,
            "\\begin{table}[htbp]\n\\centering\nBODY\n\\caption{Cap}\n\\label{tab:a}\n\\end{table}"
        );
    }

    #[test]
    fn test_frame_long_is_bare() {
        let opts = GlobalOptions::long().with_caption("Cap");
        let mut out = String::new();
        begin_frame(&mut out, &opts);
        end_frame(&mut out, &opts);
        assert!(out.is_empty());
    }
}
