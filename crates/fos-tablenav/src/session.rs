//! Table Session
//!
//! Owns a table source, its current grid and a cursor. The change notifier
//! of the host calls [`TableSession::rebuild`] whenever the source table
//! mutated.

use crate::{build_from, reattach, BuildOptions, Cursor, Grid, NavError, RawCellHandle, TableSource};

/// Navigation session over one table
#[derive(Debug)]
pub struct TableSession<S: TableSource> {
    source: S,
    options: BuildOptions,
    grid: Grid,
    cursor: Cursor,
    generation: u64,
}

impl<S: TableSource> TableSession<S> {
    /// Build the initial grid with default options
    pub fn new(source: S) -> Self {
        Self::with_options(source, BuildOptions::default())
    }

    /// Create a new session over `source`, building the first grid with
    /// `options`. The cursor starts unpositioned.
    pub fn with_options(source: S, options: BuildOptions) -> Self {
        let grid = build_from(&source, &options);
        Self {
            source,
            options,
            grid,
            cursor: Cursor::new(),
            generation: 0,
        }
    }

    /// Grid of the latest build
    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn cursor(&self) -> Cursor {
        self.cursor
    }

    /// Grid and cursor together, for cursor operations
    pub fn navigate(&mut self) -> (&Grid, &mut Cursor) {
        (&self.grid, &mut self.cursor)
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    /// Mutable source access; call [`rebuild`](Self::rebuild) afterwards
    pub fn source_mut(&mut self) -> &mut S {
        &mut self.source
    }

    pub fn options(&self) -> &BuildOptions {
        &self.options
    }

    /// Number of rebuilds since creation
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Rerun the whole pipeline, replace the grid and reattach the cursor
    pub fn rebuild(&mut self) {
        let grid = build_from(&self.source, &self.options);
        self.cursor = reattach(self.cursor, &self.grid, &grid);
        self.grid = grid;
        self.generation += 1;
        tracing::debug!(generation = self.generation, "table rebuilt");
    }

    /// Put the cursor on the cell owning `handle`, as resolved by the
    /// source from a document position
    pub fn locate(&mut self, handle: RawCellHandle) -> Result<(), NavError> {
        self.cursor.move_to_raw_cell(&self.grid, handle)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{ContainerId, RawCell, SourceRow};

    fn rows(count: usize) -> Vec<SourceRow> {
        (0..count)
            .map(|_| SourceRow::new(ContainerId(0), vec![RawCell::td(), RawCell::td()]))
            .collect()
    }

    #[test]
    fn test_rebuild_reattaches_cursor() {
        let mut session = TableSession::new(rows(3));
        {
            let (grid, cursor) = session.navigate();
            cursor.move_to_cell(grid, 2, 1).unwrap();
        }
        session.source_mut().pop();
        session.rebuild();
        assert_eq!(session.generation(), 1);
        assert_eq!(session.grid().row_count(), 2);
        assert_eq!(session.cursor().position(), Some((1, 1)));
    }

    #[test]
    fn test_locate() {
        let mut session = TableSession::new(rows(2));
        session.locate(RawCellHandle::new(1, 1)).unwrap();
        assert_eq!(session.cursor().position(), Some((1, 1)));
        assert!(session.locate(RawCellHandle::new(9, 0)).is_err());
    }
}
