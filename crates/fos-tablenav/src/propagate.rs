//! Header Propagation
//!
//! Second header pass: applies each structural header's scope rule to the
//! slots it governs.

use crate::grid::{push_unique, Axis};
use crate::{ClassifiedHeader, Grid, Scope};

/// Header propagator
#[derive(Debug, Clone, Copy, Default)]
pub struct HeaderPropagator;

impl HeaderPropagator {
    /// Create a new propagator
    pub fn new() -> Self {
        Self
    }

    /// Propagate `headers` (in classification order) over `grid`
    pub fn propagate(&self, grid: &mut Grid, headers: &[ClassifiedHeader]) {
        for header in headers {
            match header.scope {
                Scope::Row => self.propagate_row(grid, header),
                Scope::Col => self.propagate_col(grid, header),
                Scope::RowGroup => self.propagate_row_group(grid, header),
                Scope::ColGroup => self.propagate_col_group(grid, header),
            }
            let axis = if header.scope.is_row() { Axis::Row } else { Axis::Col };
            grid.list_table_header(header.owner, axis);
        }
    }

    /// From the header's first owned slot to the end of each row it spans
    fn propagate_row(&self, grid: &mut Grid, header: &ClassifiedHeader) {
        for (row, start) in first_owned(grid, header, Axis::Row) {
            for col in start..grid.row_len(row) {
                if let Some(cell) = grid.cell_at_mut(row, col) {
                    push_unique(&mut cell.row_header_cells, header.owner);
                }
            }
        }
    }

    /// From the header's first owned slot down each column it spans,
    /// stopping at the first short row
    fn propagate_col(&self, grid: &mut Grid, header: &ClassifiedHeader) {
        for (col, start) in first_owned(grid, header, Axis::Col) {
            for row in start..grid.row_count() {
                let Some(cell) = grid.cell_at_mut(row, col) else { break };
                push_unique(&mut cell.col_header_cells, header.owner);
            }
        }
    }

    /// Rest of the header's row, then every cell of the following rows of
    /// the same row group
    fn propagate_row_group(&self, grid: &mut Grid, header: &ClassifiedHeader) {
        for col in header.col + 1..grid.row_len(header.row) {
            if let Some(cell) = grid.cell_at_mut(header.row, col) {
                push_unique(&mut cell.row_header_cells, header.owner);
            }
        }

        let group = grid.row_group_of(header.row);
        for row in header.row + 1..grid.row_count() {
            if grid.row_group_of(row) != group {
                break;
            }
            for cell in grid.slots[row].iter_mut().flatten() {
                push_unique(&mut cell.row_header_cells, header.owner);
            }
        }
    }

    /// Cells of the header's column group: the rest of its row, then every
    /// following row regardless of adjacency
    fn propagate_col_group(&self, grid: &mut Grid, header: &ClassifiedHeader) {
        let Some(group) = grid.cell_at(header.row, header.col).map(|cell| cell.col_group) else {
            return;
        };

        for col in header.col + 1..grid.row_len(header.row) {
            if let Some(cell) = grid.cell_at_mut(header.row, col) {
                if cell.col_group == group {
                    push_unique(&mut cell.col_header_cells, header.owner);
                }
            }
        }

        for row in header.row + 1..grid.row_count() {
            for cell in grid.slots[row].iter_mut().flatten() {
                if cell.col_group == group {
                    push_unique(&mut cell.col_header_cells, header.owner);
                }
            }
        }
    }
}

/// Rows (or columns) where the header actually owns slots, each with the
/// first owned column (or row) along it. Slots lost to an overlapping span
/// are left out.
fn first_owned(grid: &Grid, header: &ClassifiedHeader, axis: Axis) -> Vec<(usize, usize)> {
    let mut lines: Vec<(usize, usize)> = Vec::new();
    for (row, col) in grid.slots_of(header.owner) {
        let (line, offset) = match axis {
            Axis::Row => (row, col),
            Axis::Col => (col, row),
        };
        match lines.iter_mut().find(|(existing, _)| *existing == line) {
            Some((_, start)) => *start = (*start).min(offset),
            None => lines.push((line, offset)),
        }
    }
    lines
}
