//! Table Cursor
//!
//! Logical `(row, col)` position over a grid. The cursor stores indices
//! only, so it survives rebuilds; see [`reattach`](crate::reattach).

use crate::{Grid, NavError, RawCellHandle, ShadowCell};

/// Table cursor
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Cursor {
    position: Option<(usize, usize)>,
}

impl Cursor {
    /// Unpositioned cursor
    pub fn new() -> Self {
        Self::default()
    }

    /// Cursor at a position, without validation
    pub fn at(row: usize, col: usize) -> Self {
        Self { position: Some((row, col)) }
    }

    pub fn position(&self) -> Option<(usize, usize)> {
        self.position
    }

    pub fn row(&self) -> Option<usize> {
        self.position.map(|(row, _)| row)
    }

    pub fn col(&self) -> Option<usize> {
        self.position.map(|(_, col)| col)
    }

    pub fn is_positioned(&self) -> bool {
        self.position.is_some()
    }

    /// Back to unpositioned
    pub fn reset(&mut self) {
        self.position = None;
    }

    /// Slot under the cursor
    pub fn cell<'g>(&self, grid: &'g Grid) -> Option<&'g ShadowCell> {
        let (row, col) = self.position?;
        grid.cell_at(row, col)
    }

    /// Move to a slot holding a cell
    pub fn move_to_cell(&mut self, grid: &Grid, row: usize, col: usize) -> Result<(), NavError> {
        check_row(grid, row)?;
        check_col(grid, col)?;
        if grid.cell_at(row, col).is_none() {
            return Err(NavError::NoCell { row, col });
        }
        self.position = Some((row, col));
        Ok(())
    }

    /// Move to a row, keeping the current column (0 when unpositioned)
    pub fn move_to_row(&mut self, grid: &Grid, row: usize) -> Result<(), NavError> {
        check_row(grid, row)?;
        self.position = Some((row, self.col().unwrap_or(0)));
        Ok(())
    }

    /// Move to a column, keeping the current row (0 when unpositioned)
    pub fn move_to_col(&mut self, grid: &Grid, col: usize) -> Result<(), NavError> {
        check_col(grid, col)?;
        self.position = Some((self.row().unwrap_or(0), col));
        Ok(())
    }

    /// One row down, or the first row when unpositioned
    pub fn next_row(&mut self, grid: &Grid) -> Result<(), NavError> {
        let target = match self.row() {
            None => 0,
            Some(row) if row + 1 < grid.row_count() => row + 1,
            Some(_) => return Err(edge(grid)),
        };
        self.move_to_row(grid, target)
    }

    /// One row up, or the last row when unpositioned
    pub fn prev_row(&mut self, grid: &Grid) -> Result<(), NavError> {
        let target = match self.row() {
            None => grid.row_count().checked_sub(1).ok_or(NavError::EmptyTable)?,
            Some(0) => return Err(edge(grid)),
            Some(row) => row - 1,
        };
        self.move_to_row(grid, target)
    }

    pub fn next_col(&mut self, grid: &Grid) -> Result<(), NavError> {
        let target = match self.col() {
            None => 0,
            Some(col) if col + 1 < grid.col_count() => col + 1,
            Some(_) => return Err(edge(grid)),
        };
        self.move_to_col(grid, target)
    }

    pub fn prev_col(&mut self, grid: &Grid) -> Result<(), NavError> {
        let target = match self.col() {
            None => grid.col_count().checked_sub(1).ok_or(NavError::EmptyTable)?,
            Some(0) => return Err(edge(grid)),
            Some(col) => col - 1,
        };
        self.move_to_col(grid, target)
    }

    /// Last cell of the last row that has one
    pub fn move_to_last_cell_of_table(&mut self, grid: &Grid) -> Result<(), NavError> {
        let last = (0..grid.row_count())
            .rev()
            .find_map(|row| grid.last_col_in_row(row).map(|col| (row, col)))
            .ok_or(NavError::EmptyTable)?;
        self.position = Some(last);
        Ok(())
    }

    /// Last cell of the current row (row 0 when unpositioned)
    pub fn move_to_last_cell_of_row(&mut self, grid: &Grid) -> Result<(), NavError> {
        let row = self.row().unwrap_or(0);
        check_row(grid, row)?;
        let col = grid.last_col_in_row(row).ok_or(NavError::NoCell { row, col: 0 })?;
        self.position = Some((row, col));
        Ok(())
    }

    /// Last cell of the current column (column 0 when unpositioned)
    pub fn move_to_last_cell_of_column(&mut self, grid: &Grid) -> Result<(), NavError> {
        let col = self.col().unwrap_or(0);
        check_col(grid, col)?;
        let row = grid.last_row_in_col(col).ok_or(NavError::NoCell { row: 0, col })?;
        self.position = Some((row, col));
        Ok(())
    }

    /// Move to the origin of a raw cell
    pub fn move_to_raw_cell(&mut self, grid: &Grid, handle: RawCellHandle) -> Result<(), NavError> {
        let (row, col) = grid.origin_of(handle).ok_or(NavError::UnknownCell(handle))?;
        self.move_to_cell(grid, row, col)
    }
}

fn check_row(grid: &Grid, row: usize) -> Result<(), NavError> {
    if grid.is_empty() {
        return Err(NavError::EmptyTable);
    }
    if row >= grid.row_count() {
        return Err(NavError::RowOutOfRange { row, rows: grid.row_count() });
    }
    Ok(())
}

fn check_col(grid: &Grid, col: usize) -> Result<(), NavError> {
    if grid.is_empty() {
        return Err(NavError::EmptyTable);
    }
    if col >= grid.col_count() {
        return Err(NavError::ColOutOfRange { col, cols: grid.col_count() });
    }
    Ok(())
}

fn edge(grid: &Grid) -> NavError {
    if grid.is_empty() { NavError::EmptyTable } else { NavError::AtEdge }
}
