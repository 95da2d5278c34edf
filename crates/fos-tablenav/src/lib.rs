//! fOS Table Navigation
//!
//! Shadow table engine for navigating markup tables by logical row and
//! column.
//!
//! A build runs four passes over the rows handed over by a [`TableSource`]:
//! - [`GridBuilder`]: dense grid with row/column spans resolved
//! - [`HeaderClassifier`]: which cells are headers, and of which scope
//! - [`HeaderPropagator`]: header associations per governed cell
//! - [`AttributeHeaderResolver`]: explicit `headers` / `aria-describedby`
//!
//! A [`Cursor`] walks the finished [`Grid`]; [`reattach`] moves it onto the
//! grid of a rebuild.
//!
//! # Example
//!
//! ```
//! use fos_tablenav::{build, BuildOptions, ContainerId, Cursor, RawCell, SourceRow};
//!
//! let rows = vec![
//!     SourceRow::new(ContainerId(0), vec![RawCell::th(), RawCell::th()]),
//!     SourceRow::new(ContainerId(0), vec![RawCell::td(), RawCell::td()]),
//! ];
//! let grid = build(rows, None, &BuildOptions::default());
//!
//! let mut cursor = Cursor::new();
//! cursor.move_to_cell(&grid, 1, 1).unwrap();
//! assert_eq!(grid.col_headers_at(1, 1).len(), 1);
//! ```

mod cell;
mod options;
mod source;
mod grid;
mod builder;
mod classify;
mod propagate;
mod attr_headers;
mod cursor;
mod reattach;
mod session;

pub use cell::{
    parse_span, split_id_list, CellKind, ContainerId, RawCell, RawCellHandle, Role, Scope,
    SourceRow,
};
pub use options::{BuildOptions, ZeroRowspan};
pub use source::{ColumnGroups, TableSource};
pub use grid::{Axis, Footprint, Grid, ShadowCell};
pub use builder::GridBuilder;
pub use classify::{ClassifiedHeader, HeaderClassifier};
pub use propagate::HeaderPropagator;
pub use attr_headers::AttributeHeaderResolver;
pub use cursor::Cursor;
pub use reattach::reattach;
pub use session::TableSession;

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Build a grid and resolve its header associations
pub fn build(
    rows: Vec<SourceRow>,
    column_groups: Option<&ColumnGroups>,
    options: &BuildOptions,
) -> Grid {
    let mut grid = GridBuilder::new(options.clone()).build(rows, column_groups);
    let headers = HeaderClassifier::new().classify(&mut grid);
    HeaderPropagator::new().propagate(&mut grid, &headers);
    AttributeHeaderResolver::new().resolve(&mut grid);

    tracing::debug!(
        rows = grid.row_count(),
        cols = grid.col_count(),
        row_headers = grid.table_row_headers().len(),
        col_headers = grid.table_col_headers().len(),
        "built shadow table"
    );
    grid
}

/// Build from a table source
pub fn build_from<S: TableSource + ?Sized>(source: &S, options: &BuildOptions) -> Grid {
    let groups = source.column_groups();
    build(source.rows(), groups.as_ref(), options)
}

/// Navigation error
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum NavError {
    #[error("Table has no cells")]
    EmptyTable,

    #[error("Row {row} out of range ({rows} rows)")]
    RowOutOfRange { row: usize, rows: usize },

    #[error("Column {col} out of range ({cols} columns)")]
    ColOutOfRange { col: usize, cols: usize },

    #[error("No cell at row {row}, column {col}")]
    NoCell { row: usize, col: usize },

    #[error("Already at the edge of the table")]
    AtEdge,

    #[error("Unknown cell {0}")]
    UnknownCell(RawCellHandle),
}
