//! Header Classification
//!
//! First header pass: decides which origin cells act as structural headers
//! and with which scope.

use crate::{Grid, RawCellHandle, Role, Scope};

/// A header cell with its resolved scope
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClassifiedHeader {
    pub row: usize,
    pub col: usize,
    pub owner: RawCellHandle,
    pub scope: Scope,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Direction {
    Left,
    Right,
    Up,
    Down,
}

/// Header classifier
#[derive(Debug, Clone, Copy, Default)]
pub struct HeaderClassifier;

impl HeaderClassifier {
    /// Create a new classifier
    pub fn new() -> Self {
        Self
    }

    /// Classify every candidate origin of `grid`, recording the result on the
    /// origin slots. Returns the structural headers in classification order.
    pub fn classify(&self, grid: &mut Grid) -> Vec<ClassifiedHeader> {
        let mut candidates = Vec::new();
        let mut headers = Vec::new();

        for row in 0..grid.row_count() {
            for col in 0..grid.row_len(row) {
                let Some(cell) = grid.cell_at(row, col) else { continue };
                if cell.spanned {
                    continue;
                }
                let owner = cell.owner;
                let Some(raw) = grid.raw_cell(owner) else { continue };
                if !raw.is_candidate_header() {
                    continue;
                }
                candidates.push((row, col));

                let scope = if raw.is_header_tag() && raw.scope.is_none() {
                    self.infer_scope(grid, row, col)
                } else if raw.scope.is_some() {
                    raw.scope
                } else {
                    match raw.role {
                        Some(Role::RowHeader) => Some(Scope::Row),
                        Some(Role::ColumnHeader) => Some(Scope::Col),
                        _ => None,
                    }
                };

                let Some(scope) = scope else { continue };
                if let Some(origin) = grid.cell_at_mut(row, col) {
                    origin.scope = Some(scope);
                    origin.is_row_header = scope.is_row();
                    origin.is_col_header = scope.is_col();
                }
                headers.push(ClassifiedHeader { row, col, owner, scope });
            }
        }

        tracing::trace!(
            candidates = candidates.len(),
            headers = headers.len(),
            "classified header candidates"
        );
        grid.candidates = candidates;
        headers
    }

    /// Scope of a header-tagged cell without a `scope` attribute, from the
    /// kind of its neighbors. A horizontal header neighbor (or no horizontal
    /// neighbor at all) makes it a column header; otherwise a vertical
    /// header neighbor (or none at all) makes it a row header.
    pub fn infer_scope(&self, grid: &Grid, row: usize, col: usize) -> Option<Scope> {
        let horizontal = self
            .neighbor(grid, row, col, Direction::Left)
            .or_else(|| self.neighbor(grid, row, col, Direction::Right));
        match horizontal {
            None => return Some(Scope::Col),
            Some(neighbor) if is_header_tagged(grid, neighbor) => return Some(Scope::Col),
            Some(_) => {}
        }

        let vertical = self
            .neighbor(grid, row, col, Direction::Up)
            .or_else(|| self.neighbor(grid, row, col, Direction::Down));
        match vertical {
            None => Some(Scope::Row),
            Some(neighbor) if is_header_tagged(grid, neighbor) => Some(Scope::Row),
            Some(_) => None,
        }
    }

    /// Owner of the slot directly next to `(row, col)`
    fn neighbor(
        &self,
        grid: &Grid,
        row: usize,
        col: usize,
        direction: Direction,
    ) -> Option<RawCellHandle> {
        let (r, c) = match direction {
            Direction::Left => (row, col.checked_sub(1)?),
            Direction::Up => (row.checked_sub(1)?, col),
            Direction::Right => (row, col + 1),
            Direction::Down => (row + 1, col),
        };
        grid.cell_at(r, c).map(|slot| slot.owner)
    }
}

fn is_header_tagged(grid: &Grid, handle: RawCellHandle) -> bool {
    grid.raw_cell(handle).is_some_and(|raw| raw.is_header_tag())
}
