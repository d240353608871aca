//! Horizontal rule types for the tabular-based dialects

use crate::core::grid::Grid;

/// Style of horizontal line
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HLineStyle {
    /// Standard \hline or \cline
    #[default]
    Normal,
    /// Booktabs \toprule
    TopRule,
    /// Booktabs \midrule or \cmidrule
    MidRule,
    /// Booktabs \bottomrule
    BottomRule,
}

/// A horizontal line in a tabular body
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LatexHLine {
    /// Start column (0-indexed, None = from beginning)
    pub start: Option<usize>,
    /// End column (0-indexed exclusive, None = to end)
    pub end: Option<usize>,
    /// Line style
    pub style: HLineStyle,
}

impl LatexHLine {
    /// Create a full-width horizontal line
    pub fn full(style: HLineStyle) -> Self {
        LatexHLine {
            start: None,
            end: None,
            style,
        }
    }

    /// Create a partial horizontal line over `start..end`
    pub fn partial(start: usize, end: usize, style: HLineStyle) -> Self {
        LatexHLine {
            start: Some(start),
            end: Some(end),
            style,
        }
    }

    /// Generate LaTeX code with known column count
    pub fn to_latex_with_cols(&self, col_count: usize) -> String {
        let range = match (self.start, self.end) {
            (None, None) => None,
            (start, end) => Some((start.unwrap_or(0) + 1, end.unwrap_or(col_count))),
        };
        match (self.style, range) {
            (HLineStyle::TopRule, _) => "\\toprule".to_string(),
            (HLineStyle::BottomRule, _) => "\\bottomrule".to_string(),
            (HLineStyle::MidRule, None) => "\\midrule".to_string(),
            (HLineStyle::MidRule, Some((s, e))) => format!("\\cmidrule(lr){{{}-{}}}", s, e),
            (HLineStyle::Normal, None) => "\\hline".to_string(),
            (HLineStyle::Normal, Some((s, e))) => format!("\\cline{{{}-{}}}", s, e),
        }
    }
}

/// Lines to draw under row `row`.
///
/// Columns where a merged region continues into the next row must not be
/// crossed, so the boundary is broken into partial lines over the remaining
/// column runs. Returns an empty list when every column is crossed.
pub fn boundary_lines(grid: &Grid, row: usize, style: HLineStyle) -> Vec<LatexHLine> {
    let cols = grid.cols();
    let mut blocked = vec![false; cols];
    for region in grid.regions() {
        if region.min_row <= row && row < region.max_row {
            for flag in &mut blocked[region.min_col..=region.max_col] {
                *flag = true;
            }
        }
    }

    if !blocked.contains(&true) {
        return vec![LatexHLine::full(style)];
    }

    let mut lines = Vec::new();
    let mut run_start: Option<usize> = None;
    for (col, &is_blocked) in blocked.iter().enumerate() {
        match (is_blocked, run_start) {
            (false, None) => run_start = Some(col),
            (true, Some(start)) => {
                lines.push(LatexHLine::partial(start, col, style));
                run_start = None;
            }
            _ => {}
        }
    }
    if let Some(start) = run_start {
        lines.push(LatexHLine::partial(start, cols, style));
    }
    lines
}

/// One boundary's lines on a single output line, `None` when there are none
pub(crate) fn join_lines(lines: &[LatexHLine], col_count: usize) -> Option<String> {
    if lines.is_empty() {
        return None;
    }
    let rendered: Vec<String> = lines
        .iter()
        .map(|line| line.to_latex_with_cols(col_count))
        .collect();
    Some(rendered.join(" "))
}
