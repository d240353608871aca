//! Preamble packages a serialized table depends on
//!
//! The fragment itself carries no preamble, so the caller is told which
//! `\usepackage` lines to add. Packages come out in a stable order and
//! each appears once, with its options merged.

use indexmap::{IndexMap, IndexSet};
use std::fmt;

use crate::core::dialect::{Dialect, GlobalOptions};
use crate::core::grid::Grid;

/// One `\usepackage` line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Package {
    pub name: &'static str,
    pub options: Vec<&'static str>,
}

impl fmt::Display for Package {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.options.is_empty() {
            write!(f, "\\usepackage{{{}}}", self.name)
        } else {
            write!(
                f,
                "\\usepackage[{}]{{{}}}",
                self.options.join(","),
                self.name
            )
        }
    }
}

#[derive(Default)]
struct PackageSet {
    packages: IndexMap<&'static str, IndexSet<&'static str>>,
}

impl PackageSet {
    fn require(&mut self, name: &'static str) {
        self.packages.entry(name).or_default();
    }

    fn require_with(&mut self, name: &'static str, option: &'static str) {
        self.packages.entry(name).or_default().insert(option);
    }

    fn into_packages(self) -> Vec<Package> {
        self.packages
            .into_iter()
            .map(|(name, options)| Package {
                name,
                options: options.into_iter().collect(),
            })
            .collect()
    }
}

/// Packages needed to compile what `dialect` emits for this table
pub fn required_packages(grid: &Grid, dialect: Dialect, options: &GlobalOptions) -> Vec<Package> {
    let mut set = PackageSet::default();

    match dialect {
        Dialect::Modern => set.require("tabularray"),
        Dialect::Plain => {}
        Dialect::Rules => set.require("booktabs"),
    }

    if dialect != Dialect::Modern {
        if options.long_table {
            set.require("longtable");
        }
        if grid.regions().iter().any(|region| region.row_count() > 1) {
            set.require("multirow");
        }
    }

    let visible = grid.iter_rows().flatten().filter(|cell| !cell.hidden);
    for cell in visible {
        let style = &cell.style;
        if let Some(fg) = &style.fg_color {
            set.require("xcolor");
            if fg.needs_dvipsnames() {
                set.require_with("xcolor", "dvipsnames");
            }
        }
        if let Some(bg) = &style.bg_color {
            set.require("xcolor");
            // \cellcolor comes from colortbl, loaded through xcolor's table option
            if dialect != Dialect::Modern {
                set.require_with("xcolor", "table");
            }
            if bg.needs_dvipsnames() {
                set.require_with("xcolor", "dvipsnames");
            }
        }
    }

    set.into_packages()
}

/// The `\usepackage` lines, one per line
pub fn usepackage_lines(grid: &Grid, dialect: Dialect, options: &GlobalOptions) -> String {
    required_packages(grid, dialect, options)
        .iter()
        .map(Package::to_string)
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::grid::CellRange;
    use crate::data::colors::Color;

    fn names(packages: &[Package]) -> Vec<&'static str> {
        packages.iter().map(|p| p.name).collect()
    }

    #[test]
    fn test_base_package_per_dialect() {
        let grid = Grid::new(2, 2);
        let opts = GlobalOptions::default();
        assert_eq!(
            names(&required_packages(&grid, Dialect::Modern, &opts)),
            vec!["tabularray"]
        );
        assert!(required_packages(&grid, Dialect::Plain, &opts).is_empty());
        assert_eq!(
            names(&required_packages(&grid, Dialect::Rules, &opts)),
            vec!["booktabs"]
        );
    }

    #[test]
    fn test_emulated_spans_need_multirow() {
        let mut grid = Grid::new(3, 3);
        grid.merge(&CellRange::new(0, 0, 0, 2)).unwrap();
        let opts = GlobalOptions::long();
        assert_eq!(
            names(&required_packages(&grid, Dialect::Plain, &opts)),
            vec!["longtable"]
        );

        grid.merge(&CellRange::new(1, 0, 2, 0)).unwrap();
        assert_eq!(
            names(&required_packages(&grid, Dialect::Rules, &opts)),
            vec!["booktabs", "longtable", "multirow"]
        );
        assert_eq!(
            names(&required_packages(&grid, Dialect::Modern, &opts)),
            vec!["tabularray"]
        );
    }

    #[test]
    fn test_color_options_are_merged() {
        let mut grid = Grid::new(1, 2);
        grid.update_cell(0, 0, |edit| {
            edit.style.fg_color = Some(Color::parse("ForestGreen").unwrap())
        })
        .unwrap();
        grid.update_cell(0, 1, |edit| {
            edit.style.bg_color = Some(Color::parse("gray!20").unwrap())
        })
        .unwrap();

        let lines = usepackage_lines(&grid, Dialect::Plain, &GlobalOptions::default());
        assert_eq!(lines, "\\usepackage[dvipsnames,table]{xcolor}");

        let lines = usepackage_lines(&grid, Dialect::Modern, &GlobalOptions::default());
        assert_eq!(
            lines,
            "\\usepackage{tabularray}\n\\usepackage[dvipsnames]{xcolor}"
        );
    }
}
