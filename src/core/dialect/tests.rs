//! Tests for the three dialect serializers

use pretty_assertions::assert_eq;

use super::{serialize, Dialect, GlobalOptions};
use crate::core::columns::{ColumnKind, ColumnSpec, ColumnSpecs};
use crate::core::grid::{apply_style, CellRange, Grid, HAlign, StyleCommand, VAlign};
use crate::data::colors::Color;

fn two_by_two() -> Grid {
    Grid::from_rows(&[vec!["a", "b"], vec!["c", "d"]])
}

fn render(dialect: Dialect, grid: &Grid, options: &GlobalOptions) -> String {
    serialize(dialect, grid, &ColumnSpecs::new(grid.cols()), options)
}

/// Body rows, i.e. the lines ending in `\\`
fn body_rows(latex: &str) -> Vec<&str> {
    latex
        .lines()
        .filter(|line| line.trim_end().ends_with("\\\\") && !line.starts_with("\\caption"))
        .collect()
}

fn separators(row: &str) -> usize {
    row.matches('&').count()
}

// ============================================================================
// Plain
// ============================================================================

#[test]
fn test_plain_basic() {
    let latex = render(Dialect::Plain, &two_by_two(), &GlobalOptions::default());
    assert_eq!(
        latex,
        "\\begin{center}\n\
         \\begin{tabular}{|c|c|}\n\
         \\hline\n  a & b \\\\\n\
         \\hline\n  c & d \\\\\n\
         \\hline\n\
         \\end{tabular}\n\
         \\end{center}"
    );
}

#[test]
fn test_plain_without_rules() {
    let options = GlobalOptions {
        horizontal_rules: false,
        vertical_rules: false,
        centering: false,
        ..Default::default()
    };
    let latex = render(Dialect::Plain, &two_by_two(), &options);
    assert_eq!(
        latex,
        "\\begin{tabular}{cc}\n  a & b \\\\\n  c & d \\\\\n\\end{tabular}"
    );
}

#[test]
fn test_plain_header_scenario() {
    let mut grid = Grid::new(4, 4);
    grid.merge(&CellRange::new(0, 0, 1, 1)).unwrap();
    grid.set_content(0, 0, "Header").unwrap();
    apply_style(
        &mut grid,
        &CellRange::new(0, 0, 0, 3),
        (0, 0),
        &StyleCommand::ToggleBold,
    )
    .unwrap();

    let latex = render(Dialect::Plain, &grid, &GlobalOptions::default());
    let rows = body_rows(&latex);
    assert_eq!(rows.len(), 4);

    assert!(rows[0].contains("\\multicolumn{2}{|c|}{\\multirow{2}{*}{\\textbf{Header}}}"));
    assert_eq!(separators(rows[0]), 2);
    assert!(rows[1].contains("\\multicolumn{2}{|c|}{}"));
    assert_eq!(separators(rows[1]), 2);
    assert_eq!(separators(rows[2]), 3);
    assert_eq!(separators(rows[3]), 3);

    // The boundary under row 0 must not cut through the running multirow
    assert!(latex.contains("\\cline{3-4}"));
}

#[test]
fn test_plain_separator_counts_follow_units() {
    let mut grid = Grid::new(3, 4);
    grid.merge(&CellRange::new(0, 1, 1, 2)).unwrap();

    for dialect in [Dialect::Plain, Dialect::Rules] {
        let latex = render(dialect, &grid, &GlobalOptions::default());
        let counts: Vec<usize> = body_rows(&latex).into_iter().map(separators).collect();
        assert_eq!(counts, vec![2, 2, 3], "{}", dialect);
    }
}

#[test]
fn test_plain_emphasis_and_colors() {
    let mut grid = Grid::from_rows(&[vec!["x", "y"]]);
    grid.update_cell(0, 0, |edit| {
        edit.style.bold = Some(true);
        edit.style.italic = Some(true);
        edit.style.fg_color = Some(Color::parse("red").unwrap());
    })
    .unwrap();
    grid.update_cell(0, 1, |edit| {
        edit.style.bg_color = Some(Color::parse("#1e90ff").unwrap());
    })
    .unwrap();

    let latex = render(Dialect::Plain, &grid, &GlobalOptions::default());
    assert!(latex.contains("\\textcolor{red}{\\textbf{\\textit{x}}}"));
    assert!(latex.contains("\\cellcolor[HTML]{1E90FF} y"));
    assert!(!latex.contains("\\definecolor"));
}

#[test]
fn test_plain_alignment_override() {
    let mut grid = Grid::from_rows(&[vec!["x", "y", "z"]]);
    grid.update_cell(0, 0, |edit| edit.style.halign = Some(HAlign::Right))
        .unwrap();
    grid.update_cell(0, 1, |edit| edit.style.halign = Some(HAlign::Left))
        .unwrap();
    // Same as the column: no override needed
    grid.update_cell(0, 2, |edit| edit.style.halign = Some(HAlign::Center))
        .unwrap();

    let latex = render(Dialect::Plain, &grid, &GlobalOptions::default());
    assert!(latex.contains("\\multicolumn{1}{|r|}{x} & \\multicolumn{1}{l|}{y} & z \\\\"));
}

#[test]
fn test_plain_multirow_position() {
    let mut grid = Grid::new(2, 2);
    grid.merge(&CellRange::new(0, 0, 1, 0)).unwrap();
    grid.update_cell(0, 0, |edit| {
        *edit.content = "tall".to_string();
        edit.style.valign = Some(VAlign::Foot);
    })
    .unwrap();

    let latex = render(Dialect::Plain, &grid, &GlobalOptions::default());
    let rows = body_rows(&latex);
    assert!(rows[0].contains("\\multirow[b]{2}{*}{tall}"));
    // Single-column continuation is an empty unit
    assert_eq!(rows[1].trim(), "&  \\\\");
}

#[test]
fn test_plain_float_with_caption_and_label() {
    let options = GlobalOptions::new()
        .with_caption("Results")
        .with_label("tab:results");
    let latex = render(Dialect::Plain, &two_by_two(), &options);
    assert!(latex.starts_with("\\begin{table}[htbp]\n\\centering\n\\begin{tabular}"));
    assert!(latex.ends_with("\\end{tabular}\n\\caption{Results}\n\\label{tab:results}\n\\end{table}"));
}

#[test]
fn test_label_without_caption_is_dropped() {
    let options = GlobalOptions::new().with_label("tab:lonely");
    for dialect in Dialect::ALL {
        let latex = render(dialect, &two_by_two(), &options);
        assert!(!latex.contains("tab:lonely"), "{}", dialect);
        assert!(!latex.contains("\\begin{table}"), "{}", dialect);
    }
}

#[test]
fn test_plain_longtable() {
    let options = GlobalOptions::long()
        .with_caption("Long")
        .with_label("tab:long");
    let latex = render(Dialect::Plain, &two_by_two(), &options);
    assert!(latex.starts_with(
        "\\begin{longtable}{|c|c|}\n\\caption{Long}\\label{tab:long} \\\\\n\\hline"
    ));
    assert!(latex.ends_with("\\end{longtable}"));
    assert!(!latex.contains("\\begin{table}"));
    assert!(!latex.contains("\\begin{center}"));
}

#[test]
fn test_plain_column_fallbacks() {
    let grid = Grid::new(1, 3);
    let columns = ColumnSpecs::from_specs(vec![
        ColumnSpec::with_width(ColumnKind::FlexibleRatio, "2"),
        ColumnSpec::new(ColumnKind::FlexibleFixed),
        ColumnSpec::with_width(ColumnKind::Paragraph, "3cm"),
    ]);
    let latex = serialize(Dialect::Plain, &grid, &columns, &GlobalOptions::default());
    assert!(latex.contains("\\begin{tabular}{|p{1\\linewidth}|c|p{3cm}|}"));
}

#[test]
fn test_registry_shorter_than_grid_is_padded() {
    let grid = Grid::new(1, 3);
    let columns = ColumnSpecs::from_specs(vec![ColumnSpec::new(ColumnKind::Left)]);
    let latex = serialize(Dialect::Plain, &grid, &columns, &GlobalOptions::default());
    assert!(latex.contains("\\begin{tabular}{|l|c|c|}"));
}

// ============================================================================
// Rules
// ============================================================================

#[test]
fn test_rules_basic() {
    let latex = render(Dialect::Rules, &two_by_two(), &GlobalOptions::booktabs());
    assert_eq!(
        latex,
        "\\begin{center}\n\
         \\begin{tabular}{cc}\n\
         \\toprule\n  a & b \\\\\n\
         \\midrule\n  c & d \\\\\n\
         \\bottomrule\n\
         \\end{tabular}\n\
         \\end{center}"
    );
}

#[test]
fn test_rules_ignore_vertical_rules() {
    let latex = render(Dialect::Rules, &two_by_two(), &GlobalOptions::default());
    assert!(latex.contains("\\begin{tabular}{cc}"));
    assert!(!latex.contains('|'));
}

#[test]
fn test_rules_midrules_between_rows_on_request() {
    let grid = Grid::new(3, 2);

    let sparse = render(Dialect::Rules, &grid, &GlobalOptions::booktabs());
    assert_eq!(sparse.matches("\\midrule").count(), 1);

    let dense = render(Dialect::Rules, &grid, &GlobalOptions::default());
    assert_eq!(dense.matches("\\midrule").count(), 2);
    assert_eq!(dense.matches("\\toprule").count(), 1);
    assert_eq!(dense.matches("\\bottomrule").count(), 1);
}

#[test]
fn test_rules_cmidrule_around_multirow() {
    let mut grid = Grid::new(4, 2);
    grid.merge(&CellRange::new(1, 0, 2, 0)).unwrap();

    let latex = render(Dialect::Rules, &grid, &GlobalOptions::default());
    assert!(latex.contains("\\cmidrule(lr){2-2}"));
    assert_eq!(latex.matches("\\midrule").count(), 2);
}

#[test]
fn test_rules_single_row_has_no_midrule() {
    let grid = Grid::new(1, 2);
    let latex = render(Dialect::Rules, &grid, &GlobalOptions::default());
    assert!(!latex.contains("\\midrule"));
}

// ============================================================================
// Modern
// ============================================================================

#[test]
fn test_modern_basic() {
    let latex = render(Dialect::Modern, &two_by_two(), &GlobalOptions::default());
    assert_eq!(
        latex,
        "\\begin{center}\n\
         \\begin{tblr}{\n  colspec = {cc},\n  hlines,\n  vlines\n}\n  a & b \\\\\n  c & d \\\\\n\
         \\end{tblr}\n\
         \\end{center}"
    );
}

#[test]
fn test_modern_colspan_scenario() {
    let mut grid = Grid::new(2, 3);
    grid.merge(&CellRange::new(0, 0, 0, 1)).unwrap();

    let latex = render(Dialect::Modern, &grid, &GlobalOptions::default());
    assert_eq!(latex.matches("cell{1}{1}").count(), 1);
    assert!(latex.contains("cell{1}{1} = {c=2}{}"));
    assert!(!latex.contains("cell{1}{2}"));

    // Every slot is present, covered ones empty
    for row in body_rows(&latex) {
        assert_eq!(separators(row), 2);
    }
}

#[test]
fn test_modern_cell_keys() {
    let mut grid = Grid::new(3, 3);
    grid.merge(&CellRange::new(1, 1, 2, 2)).unwrap();
    grid.update_cell(1, 1, |edit| {
        *edit.content = "Total".to_string();
        edit.style.halign = Some(HAlign::Right);
        edit.style.valign = Some(VAlign::Middle);
        edit.style.bold = Some(true);
    })
    .unwrap();
    grid.update_cell(0, 2, |edit| {
        edit.style.italic = Some(true);
        edit.style.fg_color = Some(Color::parse("blue!50").unwrap());
        edit.style.bg_color = Some(Color::parse("#FFEE00").unwrap());
    })
    .unwrap();
    // Explicitly "not bold" has no effect and needs no entry
    grid.update_cell(0, 0, |edit| edit.style.bold = Some(false))
        .unwrap();

    let latex = render(Dialect::Modern, &grid, &GlobalOptions::default());
    assert!(latex.starts_with("\\definecolor{tgridFFEE00}{HTML}{FFEE00}\n"));
    assert!(latex.contains("cell{1}{3} = {fg=blue!50,bg=tgridFFEE00,font=\\itshape}"));
    assert!(latex.contains("cell{2}{2} = {r=2,c=2}{halign=r,valign=m,font=\\bfseries}"));
    assert!(!latex.contains("cell{1}{1}"));

    // Emphasis is declarative, the body stays plain
    assert!(latex.contains("  & Total &  \\\\"));
    assert!(!latex.contains("\\textbf"));
}

#[test]
fn test_modern_annotations_are_row_major() {
    let mut grid = Grid::new(2, 2);
    for (row, col) in [(1, 0), (0, 1)] {
        grid.update_cell(row, col, |edit| edit.style.bold = Some(true))
            .unwrap();
    }
    let latex = render(Dialect::Modern, &grid, &GlobalOptions::default());
    let first = latex.find("cell{1}{2}").unwrap();
    let second = latex.find("cell{2}{1}").unwrap();
    assert!(first < second);
}

#[test]
fn test_modern_longtblr() {
    let grid = two_by_two();

    let bare = render(Dialect::Modern, &grid, &GlobalOptions::long());
    assert!(bare.starts_with("\\begin{longtblr}[entry=none,label=none]{"));
    assert!(bare.ends_with("\\end{longtblr}"));

    let options = GlobalOptions::long()
        .with_caption("Data")
        .with_label("tab:data");
    let captioned = render(Dialect::Modern, &grid, &options);
    assert!(captioned.starts_with("\\begin{longtblr}[caption={Data},label={tab:data}]{"));
    assert!(!captioned.contains("\\begin{table}"));
}

#[test]
fn test_modern_theme_and_columns() {
    let grid = Grid::new(1, 3);
    let columns = ColumnSpecs::from_specs(vec![
        ColumnSpec::with_width(ColumnKind::FlexibleRatio, "2"),
        ColumnSpec::with_width(ColumnKind::FlexibleFixed, "4cm"),
        ColumnSpec::new(ColumnKind::Right),
    ]);
    let options = GlobalOptions {
        theme: Some("fancy".to_string()),
        horizontal_rules: false,
        vertical_rules: false,
        centering: false,
        ..Default::default()
    };
    let latex = serialize(Dialect::Modern, &grid, &columns, &options);
    assert_eq!(
        latex,
        "\\begin{tblr}[theme=fancy]{\n  colspec = {X[2]Q[wd=4cm]r}\n}\n   &  &  \\\\\n\\end{tblr}"
    );
}

#[test]
fn test_modern_float() {
    let options = GlobalOptions::new().with_caption("Cap");
    let latex = render(Dialect::Modern, &two_by_two(), &options);
    assert!(latex.starts_with("\\begin{table}[htbp]\n\\centering\n\\begin{tblr}{"));
    assert!(latex.ends_with("\\end{tblr}\n\\caption{Cap}\n\\end{table}"));
}

// ============================================================================
// Dialect selection
// ============================================================================

#[test]
fn test_dialect_names() {
    assert_eq!(Dialect::from_name("booktabs"), Some(Dialect::Rules));
    assert_eq!(Dialect::from_name("TBLR"), Some(Dialect::Modern));
    assert_eq!("plain".parse::<Dialect>(), Ok(Dialect::Plain));
    assert!("html".parse::<Dialect>().is_err());
    for dialect in Dialect::ALL {
        assert_eq!(dialect.serializer().dialect(), dialect);
        assert_eq!(Dialect::from_name(dialect.name()), Some(dialect));
    }
}

#[test]
fn test_serialization_is_deterministic() {
    let mut grid = Grid::new(3, 3);
    grid.merge(&CellRange::new(0, 0, 1, 1)).unwrap();
    grid.set_content(0, 0, "m").unwrap();
    for dialect in Dialect::ALL {
        let options = GlobalOptions::default();
        assert_eq!(
            render(dialect, &grid, &options),
            render(dialect, &grid, &options)
        );
    }
}
