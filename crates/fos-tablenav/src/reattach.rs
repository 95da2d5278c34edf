//! Cursor Reattachment
//!
//! Relocates a cursor onto a rebuilt grid.

use crate::{Cursor, Grid};

/// Move `cursor`, positioned against `old`, onto `new`.
///
/// Tried in order: the last cell of the same row; the same column in the
/// last row; the last cell of the table. An empty table, or an unpositioned
/// cursor, yields an unpositioned cursor.
pub fn reattach(cursor: Cursor, old: &Grid, new: &Grid) -> Cursor {
    let Some((row, col)) = cursor.position() else {
        return Cursor::new();
    };

    let target = if new.is_empty() {
        None
    } else {
        let same_row = new.last_col_in_row(row).map(|last| (row, last));
        let last_row = new.row_count() - 1;
        let same_col = || new.cell_at(last_row, col).map(|_| (last_row, col));
        let last_cell = || {
            let mut fallback = Cursor::new();
            fallback.move_to_last_cell_of_table(new).ok()?;
            fallback.position()
        };
        same_row.or_else(same_col).or_else(last_cell)
    };

    tracing::debug!(
        old_rows = old.row_count(),
        old_cols = old.col_count(),
        new_rows = new.row_count(),
        new_cols = new.col_count(),
        from = ?(row, col),
        to = ?target,
        "reattached cursor"
    );

    match target {
        Some((row, col)) => Cursor::at(row, col),
        None => Cursor::new(),
    }
}
