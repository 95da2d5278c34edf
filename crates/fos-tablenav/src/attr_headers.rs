//! Attribute Header Resolution
//!
//! Third header pass: explicit `headers` and `aria-describedby` id
//! references. Only one level of indirection is followed; a referenced
//! cell's own references are not chased.

use crate::grid::Axis;
use crate::{Grid, RawCellHandle, Role};

/// Resolver for id-referenced headers
#[derive(Debug, Clone, Copy, Default)]
pub struct AttributeHeaderResolver;

impl AttributeHeaderResolver {
    /// Create a new resolver
    pub fn new() -> Self {
        Self
    }

    /// Resolve the references of every origin in `grid`
    pub fn resolve(&self, grid: &mut Grid) {
        let referencing: Vec<(usize, usize, RawCellHandle)> = grid
            .origins()
            .filter(|cell| {
                grid.raw_cell(cell.owner)
                    .is_some_and(|raw| !raw.headers.is_empty() || !raw.described_by.is_empty())
            })
            .map(|cell| (cell.row, cell.col, cell.owner))
            .collect();

        for (row, col, owner) in referencing {
            let Some(raw) = grid.raw_cell(owner) else { continue };
            let own_id = raw.id.clone();
            let headers = raw.headers.clone();
            let described_by = raw.described_by.clone();

            for token in &headers {
                let Some((target_row, target_col)) =
                    self.lookup(grid, token, own_id.as_deref(), (row, col))
                else {
                    continue;
                };
                let Some(target) = grid.cell_at(target_row, target_col) else { continue };
                // Structural headers already reached this cell through propagation
                if target.is_header() {
                    continue;
                }
                let target_owner = target.owner;
                let axis = self.axis_between((row, col), (target_row, target_col));
                grid.associate(owner, target_owner, axis);
            }

            for token in &described_by {
                let Some((target_row, target_col)) =
                    self.lookup(grid, token, own_id.as_deref(), (row, col))
                else {
                    continue;
                };
                let Some(target) = grid.cell_at(target_row, target_col) else { continue };
                let target_owner = target.owner;
                let axis = match grid.raw_cell(target_owner).and_then(|raw| raw.role) {
                    Some(Role::RowHeader) => Axis::Row,
                    Some(Role::ColumnHeader) => Axis::Col,
                    _ => continue,
                };
                grid.associate(owner, target_owner, axis);
            }
        }
    }

    /// Row header when on the same row or closer by rows than by columns
    pub fn axis_between(&self, from: (usize, usize), to: (usize, usize)) -> Axis {
        let d_row = from.0.abs_diff(to.0);
        let d_col = from.1.abs_diff(to.1);
        if d_row == 0 || d_row < d_col {
            Axis::Row
        } else {
            Axis::Col
        }
    }

    fn lookup(
        &self,
        grid: &Grid,
        token: &str,
        own_id: Option<&str>,
        own: (usize, usize),
    ) -> Option<(usize, usize)> {
        if own_id == Some(token) {
            return None;
        }
        match grid.origin_by_id(token) {
            Some(origin) if origin != own => Some(origin),
            Some(_) => None,
            None => {
                tracing::trace!(id = token, "dangling header reference");
                None
            }
        }
    }
}
