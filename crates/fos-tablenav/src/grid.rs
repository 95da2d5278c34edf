//! Shadow Table
//!
//! Dense, span-resolved logical grid over a source table.

use std::collections::HashMap;

use crate::{RawCell, RawCellHandle, Scope, SourceRow};

/// One slot of the grid
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct ShadowCell {
    pub row: usize,
    pub col: usize,
    /// Raw cell this slot represents
    pub owner: RawCellHandle,
    /// Not the top-left origin of the owner's rectangle
    pub spanned: bool,
    pub row_span_flag: bool,
    pub col_span_flag: bool,
    pub row_group: usize,
    pub col_group: usize,
    pub is_row_header: bool,
    pub is_col_header: bool,
    /// Resolved structural scope (origin slots only)
    pub scope: Option<Scope>,
    pub row_header_cells: Vec<RawCellHandle>,
    pub col_header_cells: Vec<RawCellHandle>,
}

impl ShadowCell {
    #[inline]
    pub fn is_origin(&self) -> bool {
        !self.spanned
    }

    /// Classified as a structural header
    #[inline]
    pub fn is_header(&self) -> bool {
        self.is_row_header || self.is_col_header
    }
}

/// Rectangle a raw cell was laid out on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Footprint {
    pub row: usize,
    pub col: usize,
    pub rows: usize,
    pub cols: usize,
}

/// Header association axis
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    Row,
    Col,
}

/// The shadow table
#[derive(Debug, Clone, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Grid {
    /// Slots per row; holes are `None`
    pub(crate) slots: Vec<Vec<Option<ShadowCell>>>,
    pub(crate) col_count: usize,
    /// Row group per row
    pub(crate) row_groups: Vec<usize>,
    /// Source rows the grid was built from
    pub(crate) source: Vec<SourceRow>,
    /// Footprint per raw cell, indexed like `source`
    pub(crate) footprints: Vec<Vec<Footprint>>,
    /// id → origin coordinate
    pub(crate) id_index: HashMap<String, (usize, usize)>,
    /// Origins eligible for header classification
    pub(crate) candidates: Vec<(usize, usize)>,
    pub(crate) table_row_headers: Vec<RawCellHandle>,
    pub(crate) table_col_headers: Vec<RawCellHandle>,
}

impl Grid {
    /// Number of source rows
    pub fn row_count(&self) -> usize {
        self.slots.len()
    }

    /// Longest row, in slots
    pub fn col_count(&self) -> usize {
        self.col_count
    }

    /// No cells at all
    pub fn is_empty(&self) -> bool {
        self.row_count() == 0 || self.col_count == 0
    }

    /// Slot at a position; `None` past the bounds or for a hole
    pub fn cell_at(&self, row: usize, col: usize) -> Option<&ShadowCell> {
        self.slots.get(row)?.get(col)?.as_ref()
    }

    pub(crate) fn cell_at_mut(&mut self, row: usize, col: usize) -> Option<&mut ShadowCell> {
        self.slots.get_mut(row)?.get_mut(col)?.as_mut()
    }

    /// Length of a row's slot list, holes included
    pub fn row_len(&self, row: usize) -> usize {
        self.slots.get(row).map_or(0, Vec::len)
    }

    /// Row group of a row
    pub fn row_group_of(&self, row: usize) -> Option<usize> {
        self.row_groups.get(row).copied()
    }

    /// Highest column holding a cell in `row`
    pub fn last_col_in_row(&self, row: usize) -> Option<usize> {
        self.slots.get(row)?.iter().rposition(Option::is_some)
    }

    /// Highest row holding a cell in `col`
    pub fn last_row_in_col(&self, col: usize) -> Option<usize> {
        (0..self.row_count())
            .rev()
            .find(|&row| self.cell_at(row, col).is_some())
    }

    /// Row header associations of a slot
    pub fn row_headers_at(&self, row: usize, col: usize) -> &[RawCellHandle] {
        self.cell_at(row, col)
            .map(|cell| cell.row_header_cells.as_slice())
            .unwrap_or_default()
    }

    /// Column header associations of a slot
    pub fn col_headers_at(&self, row: usize, col: usize) -> &[RawCellHandle] {
        self.cell_at(row, col)
            .map(|cell| cell.col_header_cells.as_slice())
            .unwrap_or_default()
    }

    /// Every row header of the table, in resolution order
    pub fn table_row_headers(&self) -> &[RawCellHandle] {
        &self.table_row_headers
    }

    /// Every column header of the table, in resolution order
    pub fn table_col_headers(&self) -> &[RawCellHandle] {
        &self.table_col_headers
    }

    /// Origins eligible for header classification, row-major
    pub fn candidate_headers(&self) -> &[(usize, usize)] {
        &self.candidates
    }

    /// Attributes of a raw cell
    pub fn raw_cell(&self, handle: RawCellHandle) -> Option<&RawCell> {
        self.source.get(handle.row)?.cells.get(handle.index)
    }

    /// Rows the grid was built from
    pub fn source_rows(&self) -> &[SourceRow] {
        &self.source
    }

    /// Rectangle a raw cell was laid out on
    pub fn footprint(&self, handle: RawCellHandle) -> Option<Footprint> {
        self.footprints.get(handle.row)?.get(handle.index).copied()
    }

    /// Origin coordinate of a raw cell
    pub fn origin_of(&self, handle: RawCellHandle) -> Option<(usize, usize)> {
        self.footprint(handle).map(|fp| (fp.row, fp.col))
    }

    /// Origin coordinate of the cell carrying `id`
    pub fn origin_by_id(&self, id: &str) -> Option<(usize, usize)> {
        self.id_index.get(id).copied()
    }

    /// Origin slot of the cell carrying `id`
    pub fn cell_by_id(&self, id: &str) -> Option<&ShadowCell> {
        let (row, col) = self.origin_by_id(id)?;
        self.cell_at(row, col)
    }

    /// All present slots, row-major
    pub fn slots(&self) -> impl Iterator<Item = &ShadowCell> + '_ {
        self.slots.iter().flatten().flatten()
    }

    /// Origin slots, row-major
    pub fn origins(&self) -> impl Iterator<Item = &ShadowCell> + '_ {
        self.slots().filter(|cell| cell.is_origin())
    }

    /// Positions of every slot owned by `handle`
    pub fn slots_of(&self, handle: RawCellHandle) -> Vec<(usize, usize)> {
        let Some(fp) = self.footprint(handle) else {
            return Vec::new();
        };
        let mut positions = Vec::with_capacity(fp.rows * fp.cols);
        for row in fp.row..fp.row + fp.rows {
            for col in fp.col..fp.col + fp.cols {
                if self.cell_at(row, col).is_some_and(|cell| cell.owner == handle) {
                    positions.push((row, col));
                }
            }
        }
        positions
    }

    /// Associate `header` with every slot of `owner` and list it at table level
    pub(crate) fn associate(&mut self, owner: RawCellHandle, header: RawCellHandle, axis: Axis) {
        for (row, col) in self.slots_of(owner) {
            if let Some(cell) = self.cell_at_mut(row, col) {
                match axis {
                    Axis::Row => push_unique(&mut cell.row_header_cells, header),
                    Axis::Col => push_unique(&mut cell.col_header_cells, header),
                }
            }
        }
        self.list_table_header(header, axis);
    }

    pub(crate) fn list_table_header(&mut self, header: RawCellHandle, axis: Axis) {
        match axis {
            Axis::Row => push_unique(&mut self.table_row_headers, header),
            Axis::Col => push_unique(&mut self.table_col_headers, header),
        }
    }
}

/// Append unless already present
pub(crate) fn push_unique(list: &mut Vec<RawCellHandle>, handle: RawCellHandle) {
    if !list.contains(&handle) {
        list.push(handle);
    }
}
