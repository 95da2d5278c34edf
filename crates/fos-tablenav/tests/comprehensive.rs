//! Comprehensive tests for fos-tablenav
//!
//! Full build pipeline, header association and cursor behavior.

use fos_tablenav::{
    build, reattach, BuildOptions, ColumnGroups, ContainerId, Cursor, RawCell, RawCellHandle, Role,
    Scope, SourceRow, TableSession,
};

const HEAD: ContainerId = ContainerId(1);
const BODY: ContainerId = ContainerId(2);
const FOOT: ContainerId = ContainerId(3);

fn row(container: ContainerId, cells: Vec<RawCell>) -> SourceRow {
    SourceRow::new(container, cells)
}

fn h(row: usize, index: usize) -> RawCellHandle {
    RawCellHandle::new(row, index)
}

// ============================================================================
// SCENARIOS
// ============================================================================

#[test]
fn test_plain_2x2_has_no_headers() {
    let grid = build(
        vec![
            row(BODY, vec![RawCell::td(), RawCell::td()]),
            row(BODY, vec![RawCell::td(), RawCell::td()]),
        ],
        None,
        &BuildOptions::default(),
    );
    assert_eq!(grid.row_count(), 2);
    assert_eq!(grid.col_count(), 2);
    assert!(grid
        .slots()
        .all(|cell| cell.row_header_cells.is_empty() && cell.col_header_cells.is_empty()));
    assert!(grid.table_row_headers().is_empty());
    assert!(grid.table_col_headers().is_empty());
}

#[test]
fn test_spanning_header_governs_both_columns() {
    let grid = build(
        vec![
            row(BODY, vec![RawCell::th().with_colspan(2)]),
            row(BODY, vec![RawCell::td(), RawCell::td()]),
        ],
        None,
        &BuildOptions::default(),
    );

    let origin = grid.cell_at(0, 0).unwrap();
    let spanned = grid.cell_at(0, 1).unwrap();
    assert!(!origin.spanned);
    assert!(spanned.spanned);
    assert!(spanned.col_span_flag);
    assert_eq!(spanned.owner, origin.owner);

    assert_eq!(origin.scope, Some(Scope::Col));
    assert!(origin.is_col_header);
    assert_eq!(grid.col_headers_at(1, 0), &[h(0, 0)]);
    assert_eq!(grid.col_headers_at(1, 1), &[h(0, 0)]);
}

#[test]
fn test_rowspan_zero_is_one() {
    let grid = build(
        vec![
            row(BODY, vec![RawCell::td().with_rowspan(0), RawCell::td()]),
            row(BODY, vec![RawCell::td(), RawCell::td()]),
        ],
        None,
        &BuildOptions::default(),
    );
    assert_eq!(grid.footprint(h(0, 0)).unwrap().rows, 1);
    assert_eq!(grid.cell_at(1, 0).unwrap().owner, h(1, 0));
}

#[test]
fn test_rowspan_zero_strict_spans_group() {
    let grid = build(
        vec![
            row(BODY, vec![RawCell::td().with_rowspan(0), RawCell::td()]),
            row(BODY, vec![RawCell::td()]),
            row(FOOT, vec![RawCell::td(), RawCell::td()]),
        ],
        None,
        &BuildOptions::strict(),
    );
    assert_eq!(grid.footprint(h(0, 0)).unwrap().rows, 2);
    assert_eq!(grid.cell_at(1, 0).unwrap().owner, h(0, 0));
    assert_eq!(grid.cell_at(2, 0).unwrap().owner, h(2, 0));
}

#[test]
fn test_negative_colspan_is_one() {
    let grid = build(
        vec![row(BODY, vec![RawCell::td().with_colspan(-3), RawCell::td()])],
        None,
        &BuildOptions::default(),
    );
    assert_eq!(grid.col_count(), 2);
    assert_eq!(grid.cell_at(0, 1).unwrap().owner, h(0, 1));
}

#[test]
fn test_headers_attribute_one_row_above_is_column_header() {
    let grid = build(
        vec![
            row(BODY, vec![RawCell::td(), RawCell::td().with_id("y")]),
            row(BODY, vec![RawCell::td(), RawCell::td().with_headers("y")]),
        ],
        None,
        &BuildOptions::default(),
    );
    assert_eq!(grid.col_headers_at(1, 1), &[h(0, 1)]);
    assert!(grid.row_headers_at(1, 1).is_empty());
    assert_eq!(grid.table_col_headers(), &[h(0, 1)]);
}

#[test]
fn test_reattach_after_row_removed() {
    let three_rows: Vec<SourceRow> = (0..3)
        .map(|_| row(BODY, vec![RawCell::td(), RawCell::td()]))
        .collect();
    let old = build(three_rows.clone(), None, &BuildOptions::default());
    let new = build(three_rows[..2].to_vec(), None, &BuildOptions::default());

    let moved = reattach(Cursor::at(2, 1), &old, &new);
    assert_eq!(moved.position(), Some((1, 1)));

    // Column no longer in the last row: last cell of the table
    let narrow = build(
        vec![
            row(BODY, vec![RawCell::td(), RawCell::td()]),
            row(BODY, vec![RawCell::td()]),
        ],
        None,
        &BuildOptions::default(),
    );
    let moved = reattach(Cursor::at(2, 1), &old, &narrow);
    assert_eq!(moved.position(), Some((1, 0)));
}

// ============================================================================
// HEADER ASSOCIATION
// ============================================================================

#[test]
fn test_classic_header_table() {
    // Name  | Mon | Tue
    // Alice |  1  |  2
    // Bob   |  3  |  4
    let grid = build(
        vec![
            row(HEAD, vec![RawCell::th(), RawCell::th(), RawCell::th()]),
            row(BODY, vec![RawCell::th(), RawCell::td(), RawCell::td()]),
            row(BODY, vec![RawCell::th(), RawCell::td(), RawCell::td()]),
        ],
        None,
        &BuildOptions::default(),
    );

    assert_eq!(grid.col_headers_at(2, 2), &[h(0, 2)]);
    assert_eq!(grid.row_headers_at(2, 2), &[h(2, 0)]);
    assert_eq!(grid.col_headers_at(1, 1), &[h(0, 1)]);
    assert_eq!(grid.row_headers_at(1, 1), &[h(1, 0)]);
    assert_eq!(grid.col_headers_at(2, 0), &[h(0, 0)]);
    assert_eq!(grid.table_col_headers(), &[h(0, 0), h(0, 1), h(0, 2)]);
    assert_eq!(grid.table_row_headers(), &[h(1, 0), h(2, 0)]);
}

#[test]
fn test_data_corner_hides_first_header() {
    // Only the left neighbor is looked at when it exists, so the header next to
    // a data corner finds no header around it.
    let grid = build(
        vec![
            row(HEAD, vec![RawCell::td(), RawCell::th(), RawCell::th()]),
            row(BODY, vec![RawCell::td(), RawCell::td(), RawCell::td()]),
        ],
        None,
        &BuildOptions::default(),
    );
    assert!(!grid.cell_at(0, 1).unwrap().is_header());
    assert!(grid.cell_at(0, 2).unwrap().is_col_header);
    assert!(grid.col_headers_at(1, 1).is_empty());
    assert_eq!(grid.col_headers_at(1, 2), &[h(0, 2)]);
    assert_eq!(grid.candidate_headers(), &[(0, 1), (0, 2)]);
}

#[test]
fn test_rowgroup_header_spans_section() {
    let grid = build(
        vec![
            row(BODY, vec![RawCell::th().with_scope(Scope::RowGroup), RawCell::td()]),
            row(BODY, vec![RawCell::td(), RawCell::td()]),
            row(FOOT, vec![RawCell::td(), RawCell::td()]),
        ],
        None,
        &BuildOptions::default(),
    );
    assert_eq!(grid.row_headers_at(1, 1), &[h(0, 0)]);
    assert!(grid.row_headers_at(2, 1).is_empty());
    assert_eq!(grid.row_group_of(2), Some(1));
}

#[test]
fn test_colgroup_header_across_rows() {
    let groups = ColumnGroups::from_spans(&[1, 2]);
    let grid = build(
        vec![
            row(
                HEAD,
                vec![RawCell::td(), RawCell::th().with_scope(Scope::ColGroup).with_colspan(2)],
            ),
            row(BODY, vec![RawCell::td(), RawCell::td(), RawCell::td()]),
            row(BODY, vec![RawCell::td(), RawCell::td(), RawCell::td()]),
        ],
        Some(&groups),
        &BuildOptions::default(),
    );
    assert!(grid.col_headers_at(2, 0).is_empty());
    assert_eq!(grid.col_headers_at(2, 1), &[h(0, 1)]);
    assert_eq!(grid.col_headers_at(2, 2), &[h(0, 1)]);
}

#[test]
fn test_headers_attribute_same_row_is_row_header() {
    let grid = build(
        vec![row(
            BODY,
            vec![RawCell::td().with_id("name"), RawCell::td(), RawCell::td().with_headers("name")],
        )],
        None,
        &BuildOptions::default(),
    );
    assert_eq!(grid.row_headers_at(0, 2), &[h(0, 0)]);
    assert_eq!(grid.table_row_headers(), &[h(0, 0)]);
}

#[test]
fn test_headers_attribute_skips_structural_headers() {
    let grid = build(
        vec![
            row(HEAD, vec![RawCell::th().with_id("a"), RawCell::th().with_id("b")]),
            row(BODY, vec![RawCell::td(), RawCell::td().with_headers("a b")]),
        ],
        None,
        &BuildOptions::default(),
    );
    // "b" reaches (1,1) through propagation only; "a" is a structural header too
    assert_eq!(grid.col_headers_at(1, 1), &[h(0, 1)]);
    assert!(grid.row_headers_at(1, 1).is_empty());
}

#[test]
fn test_headers_attribute_applies_to_spanned_slots() {
    let grid = build(
        vec![row(
            BODY,
            vec![
                RawCell::td().with_id("label"),
                RawCell::td().with_colspan(2).with_headers("label"),
            ],
        )],
        None,
        &BuildOptions::default(),
    );
    assert_eq!(grid.row_headers_at(0, 1), &[h(0, 0)]);
    assert_eq!(grid.row_headers_at(0, 2), &[h(0, 0)]);
}

#[test]
fn test_describedby_requires_header_role() {
    let grid = build(
        vec![
            row(
                BODY,
                vec![
                    RawCell::td().with_id("rh").with_role(Role::RowHeader),
                    RawCell::td().with_id("plain"),
                    RawCell::td().with_described_by("rh plain ch"),
                ],
            ),
            row(BODY, vec![RawCell::td().with_id("ch").with_role(Role::ColumnHeader)]),
        ],
        None,
        &BuildOptions::default(),
    );
    assert_eq!(grid.row_headers_at(0, 2), &[h(0, 0)]);
    assert_eq!(grid.col_headers_at(0, 2), &[h(1, 0)]);
}

#[test]
fn test_cyclic_references_are_one_level() {
    let grid = build(
        vec![row(
            BODY,
            vec![
                RawCell::td().with_id("a").with_headers("b"),
                RawCell::td().with_id("b").with_headers("a"),
            ],
        )],
        None,
        &BuildOptions::default(),
    );
    assert_eq!(grid.row_headers_at(0, 0), &[h(0, 1)]);
    assert_eq!(grid.row_headers_at(0, 1), &[h(0, 0)]);
}

// ============================================================================
// SESSION
// ============================================================================

#[test]
fn test_session_navigation_and_rebuild() {
    let rows: Vec<SourceRow> = (0..4)
        .map(|_| row(BODY, vec![RawCell::td(), RawCell::td(), RawCell::td()]))
        .collect();
    let mut session = TableSession::new(rows);

    {
        let (grid, cursor) = session.navigate();
        cursor.next_row(grid).unwrap();
        cursor.next_row(grid).unwrap();
        cursor.next_col(grid).unwrap();
        assert_eq!(cursor.position(), Some((1, 1)));
    }

    // Row 1 loses two cells
    session.source_mut()[1].cells.truncate(1);
    session.rebuild();
    assert_eq!(session.cursor().position(), Some((1, 0)));

    // Everything goes away
    session.source_mut().clear();
    session.rebuild();
    assert!(!session.cursor().is_positioned());
    assert_eq!(session.generation(), 2);
}
