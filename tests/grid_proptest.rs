// Property-based tests for grid editing and serialization.
// CI: 256 cases (default). Soak: PROPTEST_CASES=10000 cargo test --release

use proptest::prelude::*;
use texgrid::{Dialect, GlobalOptions, StyleCommand, TableSession};

// ---------------------------------------------------------------------------
// Config
// ---------------------------------------------------------------------------

fn config() -> ProptestConfig {
    ProptestConfig {
        cases: std::env::var("PROPTEST_CASES")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(256),
        failure_persistence: None,
        ..ProptestConfig::default()
    }
}

// ---------------------------------------------------------------------------
// Generators
// ---------------------------------------------------------------------------

/// One editing step. Indices are reduced modulo the current size when applied.
#[derive(Debug, Clone)]
enum Op {
    AddRow,
    AddCol,
    InsertRow(usize),
    InsertCol(usize),
    DeleteRow(usize),
    DeleteCol(usize),
    Merge(usize, usize, usize, usize),
    Split(usize, usize, usize, usize),
    Type(usize, usize, String),
    Bold(usize, usize),
}

fn arb_op() -> impl Strategy<Value = Op> {
    let idx = 0..8usize;
    prop_oneof![
        1 => Just(Op::AddRow),
        1 => Just(Op::AddCol),
        2 => idx.clone().prop_map(Op::InsertRow),
        2 => idx.clone().prop_map(Op::InsertCol),
        2 => idx.clone().prop_map(Op::DeleteRow),
        2 => idx.clone().prop_map(Op::DeleteCol),
        4 => (idx.clone(), idx.clone(), idx.clone(), idx.clone())
            .prop_map(|(a, b, c, d)| Op::Merge(a, b, c, d)),
        2 => (idx.clone(), idx.clone(), idx.clone(), idx.clone())
            .prop_map(|(a, b, c, d)| Op::Split(a, b, c, d)),
        3 => (idx.clone(), idx.clone(), "[a-z0-9]{0,6}")
            .prop_map(|(r, c, text)| Op::Type(r, c, text)),
        1 => (idx.clone(), idx).prop_map(|(r, c)| Op::Bold(r, c)),
    ]
}

fn select(session: &mut TableSession, r0: usize, c0: usize, r1: usize, c1: usize) {
    let rows = session.grid().rows();
    let cols = session.grid().cols();
    session.begin_selection(r0 % rows, c0 % cols).unwrap();
    session.extend_selection(r1 % rows, c1 % cols);
    session.end_selection();
}

fn apply(session: &mut TableSession, op: &Op) {
    let rows = session.grid().rows();
    let cols = session.grid().cols();
    match op {
        Op::AddRow => session.add_row(),
        Op::AddCol => session.add_col(),
        Op::InsertRow(at) => session.insert_row(at % (rows + 1)).unwrap(),
        Op::InsertCol(at) => session.insert_col(at % (cols + 1)).unwrap(),
        Op::DeleteRow(row) => {
            let result = session.delete_row(row % rows);
            assert_eq!(result.is_ok(), rows > 1);
        }
        Op::DeleteCol(col) => {
            let result = session.delete_col(col % cols);
            assert_eq!(result.is_ok(), cols > 1);
        }
        Op::Merge(r0, c0, r1, c1) => {
            select(session, *r0, *c0, *r1, *c1);
            session.merge_selection().unwrap();
        }
        Op::Split(r0, c0, r1, c1) => {
            select(session, *r0, *c0, *r1, *c1);
            session.split_selection().unwrap();
        }
        Op::Type(row, col, text) => {
            session
                .set_content(row % rows, col % cols, text.clone())
                .unwrap();
        }
        Op::Bold(row, col) => {
            select(session, *row, *col, *row, *col);
            session.apply_style(&StyleCommand::ToggleBold).unwrap();
        }
    }
}

fn arb_session() -> impl Strategy<Value = TableSession> {
    (1..5usize, 1..5usize, prop::collection::vec(arb_op(), 0..24)).prop_map(
        |(rows, cols, ops)| {
            let mut session = TableSession::new(rows, cols);
            for op in &ops {
                apply(&mut session, op);
            }
            session
        },
    )
}

/// Body rows, i.e. the lines ending in `\\`
fn body_rows(latex: &str) -> Vec<&str> {
    latex
        .lines()
        .filter(|line| line.trim_end().ends_with("\\\\"))
        .collect()
}

/// Units an emulated dialect writes for `row`: one per column, except that
/// a region folds its columns into a single unit on every row it covers
fn emulated_units(session: &TableSession, row: usize) -> usize {
    let folded: usize = session
        .grid()
        .regions()
        .iter()
        .filter(|region| (region.min_row..=region.max_row).contains(&row))
        .map(|region| region.col_count() - 1)
        .sum();
    session.grid().cols() - folded
}

// ---------------------------------------------------------------------------
// Properties
// ---------------------------------------------------------------------------

proptest! {
    #![proptest_config(config())]

    #[test]
    fn grid_stays_rectangular_and_valid(session in arb_session()) {
        let grid = session.grid();
        prop_assert!(grid.rows() >= 1 && grid.cols() >= 1);
        prop_assert_eq!(session.columns().len(), grid.cols());
        prop_assert_eq!(grid.iter_rows().count(), grid.rows());
        for row in grid.iter_rows() {
            prop_assert_eq!(row.len(), grid.cols());
        }
        prop_assert!(grid.validate().is_ok());
    }

    #[test]
    fn hidden_cells_are_blank_shadows(session in arb_session()) {
        for cell in session.grid().iter_rows().flatten().filter(|cell| cell.hidden) {
            prop_assert!(cell.content.is_empty());
            prop_assert!(cell.style.is_unset());
            prop_assert_eq!((cell.row_span, cell.col_span), (1, 1));
        }
    }

    #[test]
    fn split_all_after_merge_all_leaves_no_regions(
        rows in 1..6usize,
        cols in 1..6usize,
    ) {
        let mut session = TableSession::new(rows, cols);
        session.select_all();
        session.merge_selection().unwrap();
        session.select_all();
        session.split_selection().unwrap();

        let grid = session.grid();
        prop_assert!(grid.regions().is_empty());
        for cell in grid.iter_rows().flatten() {
            prop_assert!(!cell.hidden);
            prop_assert!(cell.content.is_empty());
            prop_assert_eq!((cell.row_span, cell.col_span), (1, 1));
        }
    }

    #[test]
    fn emulated_rows_have_one_separator_between_units(session in arb_session()) {
        let options = GlobalOptions { centering: false, ..Default::default() };
        let mut session = session;
        session.set_options(options);

        for dialect in [Dialect::Plain, Dialect::Rules] {
            let latex = session.serialize_as(dialect);
            let rows = body_rows(&latex);
            prop_assert_eq!(rows.len(), session.grid().rows());
            for (r, line) in rows.iter().enumerate() {
                prop_assert_eq!(
                    line.matches('&').count(),
                    emulated_units(&session, r) - 1,
                    "{} row {}: {}", dialect, r, line
                );
            }
        }
    }

    #[test]
    fn modern_rows_keep_every_slot(session in arb_session()) {
        let latex = session.serialize_as(Dialect::Modern);
        let rows = body_rows(&latex);
        prop_assert_eq!(rows.len(), session.grid().rows());
        for line in rows {
            prop_assert_eq!(line.matches('&').count(), session.grid().cols() - 1);
        }
    }

    #[test]
    fn output_is_deterministic(session in arb_session()) {
        for dialect in Dialect::ALL {
            prop_assert_eq!(session.serialize_as(dialect), session.serialize_as(dialect));
            prop_assert_eq!(
                session.columns().map_for_dialect(dialect),
                session.columns().map_for_dialect(dialect)
            );
        }
    }
}
