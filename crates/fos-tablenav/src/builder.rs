//! Grid Builder
//!
//! Lays source rows out on a dense grid, resolving row and column spans,
//! row groups and column groups.

use std::collections::HashMap;

use crate::grid::Footprint;
use crate::{
    BuildOptions, ColumnGroups, Grid, RawCell, RawCellHandle, ShadowCell, SourceRow, ZeroRowspan,
};

/// Structural pass of a build
#[derive(Debug, Clone, Default)]
pub struct GridBuilder {
    options: BuildOptions,
}

impl GridBuilder {
    /// Create a new builder with the given options
    pub fn new(options: BuildOptions) -> Self {
        Self { options }
    }

    /// Lay out `rows`. Header fields of the resulting slots are left empty.
    pub fn build(&self, rows: Vec<SourceRow>, column_groups: Option<&ColumnGroups>) -> Grid {
        let row_count = rows.len();
        let row_groups = assign_row_groups(&rows);
        let group_ends = row_group_ends(&row_groups);

        let mut slots: Vec<Vec<Option<ShadowCell>>> = (0..row_count).map(|_| Vec::new()).collect();
        let mut footprints = Vec::with_capacity(row_count);
        let mut id_index = HashMap::new();

        for (row, source_row) in rows.iter().enumerate() {
            let mut row_footprints = Vec::with_capacity(source_row.cells.len());
            let mut grid_col = 0;

            for (source_col, cell) in source_row.cells.iter().enumerate() {
                // Skip slots filled by a vertical span from above
                while matches!(slots[row].get(grid_col), Some(Some(_))) {
                    grid_col += 1;
                }

                let cols_spanned = self.effective_colspan(cell);
                let rows_spanned = self
                    .effective_rowspan(cell)
                    .unwrap_or(group_ends[row] - row)
                    .min(row_count - row);

                let owner = RawCellHandle::new(row, source_col);
                let col_group = |col: usize| column_groups.map_or(0, |groups| groups.group_of(col));

                for r in row..row + rows_spanned {
                    let line = &mut slots[r];
                    let end = grid_col + cols_spanned;
                    if line.len() < end {
                        line.resize_with(end, || None);
                    }
                    for c in grid_col..end {
                        // Overlapping spans: the first cell laid out keeps the slot
                        if line[c].is_some() {
                            tracing::trace!(row = r, col = c, "span slot kept by earlier cell");
                            continue;
                        }
                        line[c] = Some(ShadowCell {
                            row: r,
                            col: c,
                            owner,
                            spanned: r != row || c != grid_col,
                            row_span_flag: rows_spanned > 1,
                            col_span_flag: cols_spanned > 1,
                            row_group: row_groups[r],
                            col_group: col_group(c),
                            is_row_header: false,
                            is_col_header: false,
                            scope: None,
                            row_header_cells: Vec::new(),
                            col_header_cells: Vec::new(),
                        });
                    }
                }

                if let Some(id) = cell.id.as_deref().filter(|id| !id.is_empty()) {
                    // First cell in document order wins, like getElementById
                    id_index.entry(id.to_string()).or_insert((row, grid_col));
                }

                row_footprints.push(Footprint {
                    row,
                    col: grid_col,
                    rows: rows_spanned,
                    cols: cols_spanned,
                });
                grid_col += cols_spanned;
            }

            footprints.push(row_footprints);
        }

        let col_count = slots.iter().map(Vec::len).max().unwrap_or(0);

        Grid {
            slots,
            col_count,
            row_groups,
            source: rows,
            footprints,
            id_index,
            candidates: Vec::new(),
            table_row_headers: Vec::new(),
            table_col_headers: Vec::new(),
        }
    }

    /// Colspan after coercion: non-positive or missing values become 1
    pub fn effective_colspan(&self, cell: &RawCell) -> usize {
        match cell.colspan {
            Some(n) if n > 0 => clamp_span(n, self.options.max_colspan),
            Some(n) => {
                tracing::trace!(colspan = n, "coercing colspan to 1");
                1
            }
            None => 1,
        }
    }

    /// Rowspan after coercion. `None` means "to the end of the row group",
    /// which only happens for `rowspan="0"` under [`ZeroRowspan::RestOfGroup`].
    pub fn effective_rowspan(&self, cell: &RawCell) -> Option<usize> {
        match cell.rowspan {
            Some(n) if n > 0 => Some(clamp_span(n, self.options.max_rowspan)),
            Some(0) if self.options.zero_rowspan == ZeroRowspan::RestOfGroup => None,
            Some(n) => {
                tracing::trace!(rowspan = n, "coercing rowspan to 1");
                Some(1)
            }
            None => Some(1),
        }
    }
}

fn clamp_span(value: i64, max: usize) -> usize {
    usize::try_from(value).map_or(max, |v| v.min(max)).max(1)
}

/// Group index per row: a new group starts whenever the container changes
fn assign_row_groups(rows: &[SourceRow]) -> Vec<usize> {
    let mut groups = Vec::with_capacity(rows.len());
    let mut group = 0;
    for (i, row) in rows.iter().enumerate() {
        if i > 0 && row.container != rows[i - 1].container {
            group += 1;
        }
        groups.push(group);
    }
    groups
}

/// Exclusive end row of the group each row belongs to
fn row_group_ends(groups: &[usize]) -> Vec<usize> {
    let mut ends = vec![groups.len(); groups.len()];
    for i in (0..groups.len().saturating_sub(1)).rev() {
        ends[i] = if groups[i] == groups[i + 1] { ends[i + 1] } else { i + 1 };
    }
    ends
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{ContainerId, RawCell};

    fn body(cells: Vec<RawCell>) -> SourceRow {
        SourceRow::new(ContainerId(1), cells)
    }

    #[test]
    fn test_simple_layout() {
        let grid = GridBuilder::default().build(
            vec![
                body(vec![RawCell::td(), RawCell::td()]),
                body(vec![RawCell::td(), RawCell::td()]),
            ],
            None,
        );
        assert_eq!(grid.row_count(), 2);
        assert_eq!(grid.col_count(), 2);
        assert!(grid.slots().all(|cell| !cell.spanned));
    }

    #[test]
    fn test_rowspan_pushes_next_row_right() {
        let grid = GridBuilder::default().build(
            vec![
                body(vec![RawCell::td().with_rowspan(2), RawCell::td()]),
                body(vec![RawCell::td()]),
            ],
            None,
        );
        let below = grid.cell_at(1, 0).unwrap();
        assert_eq!(below.owner, RawCellHandle::new(0, 0));
        assert!(below.spanned);
        assert!(below.row_span_flag);
        assert_eq!(grid.cell_at(1, 1).unwrap().owner, RawCellHandle::new(1, 0));
    }

    #[test]
    fn test_colspan_coercion() {
        let builder = GridBuilder::default();
        assert_eq!(builder.effective_colspan(&RawCell::td().with_colspan(-3)), 1);
        assert_eq!(builder.effective_colspan(&RawCell::td().with_colspan(0)), 1);
        assert_eq!(builder.effective_colspan(&RawCell::td().with_colspan(4)), 4);
        assert_eq!(builder.effective_colspan(&RawCell::td().with_colspan(i64::MAX)), 1000);
    }

    #[test]
    fn test_rowspan_zero_policies() {
        let quirk = GridBuilder::default();
        assert_eq!(quirk.effective_rowspan(&RawCell::td().with_rowspan(0)), Some(1));

        let strict = GridBuilder::new(BuildOptions::strict());
        assert_eq!(strict.effective_rowspan(&RawCell::td().with_rowspan(0)), None);
        assert_eq!(strict.effective_rowspan(&RawCell::td().with_rowspan(-1)), Some(1));
    }

    #[test]
    fn test_rowspan_clamped_to_source_rows() {
        let grid = GridBuilder::default().build(
            vec![body(vec![RawCell::td().with_rowspan(5)]), body(vec![])],
            None,
        );
        assert_eq!(grid.row_count(), 2);
        let fp = grid.footprint(RawCellHandle::new(0, 0)).unwrap();
        assert_eq!(fp.rows, 2);
    }

    #[test]
    fn test_row_groups() {
        let rows = vec![
            SourceRow::new(ContainerId(1), vec![RawCell::th()]),
            SourceRow::new(ContainerId(2), vec![RawCell::td()]),
            SourceRow::new(ContainerId(2), vec![RawCell::td()]),
            SourceRow::new(ContainerId(3), vec![RawCell::td()]),
        ];
        let groups = assign_row_groups(&rows);
        assert_eq!(groups, vec![0, 1, 1, 2]);
        assert_eq!(row_group_ends(&groups), vec![1, 3, 3, 4]);
    }

    #[test]
    fn test_column_groups_applied() {
        let groups = ColumnGroups::from_spans(&[1, 2]);
        let grid = GridBuilder::default().build(
            vec![body(vec![RawCell::td(), RawCell::td(), RawCell::td()])],
            Some(&groups),
        );
        assert_eq!(grid.cell_at(0, 0).unwrap().col_group, 0);
        assert_eq!(grid.cell_at(0, 1).unwrap().col_group, 1);
        assert_eq!(grid.cell_at(0, 2).unwrap().col_group, 1);
    }

    #[test]
    fn test_duplicate_ids_keep_first() {
        let grid = GridBuilder::default().build(
            vec![body(vec![RawCell::td().with_id("a"), RawCell::td().with_id("a")])],
            None,
        );
        assert_eq!(grid.origin_by_id("a"), Some((0, 0)));
    }
}
