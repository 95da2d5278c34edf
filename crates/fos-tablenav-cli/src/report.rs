//! Table reports
//!
//! One built grid with the text of its source cells, printable as text or
//! serializable as JSON.

use std::fmt;

use fos_tablenav::{Grid, RawCellHandle, ShadowCell};
use fos_tablenav_html::HtmlTable;
use serde::Serialize;

/// Report for one table
#[derive(Debug, Serialize)]
pub struct TableReport {
    pub index: usize,
    /// Collapsed text per source cell, indexed like the source rows
    pub texts: Vec<Vec<String>>,
    pub grid: Grid,
}

impl TableReport {
    /// Create a new report for table `index`, collecting the text of each
    /// source cell
    pub fn new(index: usize, table: &HtmlTable, grid: Grid) -> Self {
        let texts = table
            .source_rows()
            .iter()
            .enumerate()
            .map(|(row, source)| {
                (0..source.cells.len())
                    .map(|i| {
                        let text = table.cell_text(RawCellHandle::new(row, i));
                        text.unwrap_or_default().to_string()
                    })
                    .collect()
            })
            .collect();

        Self { index, texts, grid }
    }

    fn text_of(&self, handle: RawCellHandle) -> &str {
        self.texts
            .get(handle.row)
            .and_then(|row| row.get(handle.index))
            .map_or("", String::as_str)
    }

    fn write_cell(&self, f: &mut fmt::Formatter<'_>, cell: &ShadowCell) -> fmt::Result {
        write!(
            f,
            "  ({}, {}) {} {:?} group {}/{}",
            cell.row,
            cell.col,
            cell.owner,
            self.text_of(cell.owner),
            cell.row_group,
            cell.col_group
        )?;
        if cell.spanned {
            f.write_str(" spanned")?;
        }
        if cell.row_span_flag {
            f.write_str(" rowspan")?;
        }
        if cell.col_span_flag {
            f.write_str(" colspan")?;
        }
        if let Some(scope) = cell.scope {
            write!(f, " {}-header", scope.as_str())?;
        }
        if !cell.row_header_cells.is_empty() {
            write!(f, " rows [{}]", join(&cell.row_header_cells))?;
        }
        if !cell.col_header_cells.is_empty() {
            write!(f, " cols [{}]", join(&cell.col_header_cells))?;
        }
        writeln!(f)
    }
}

impl fmt::Display for TableReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let grid = &self.grid;
        writeln!(
            f,
            "table {}: {} rows x {} columns",
            self.index,
            grid.row_count(),
            grid.col_count()
        )?;

        for row in 0..grid.row_count() {
            for col in 0..grid.row_len(row) {
                match grid.cell_at(row, col) {
                    Some(cell) => self.write_cell(f, cell)?,
                    None => writeln!(f, "  ({row}, {col}) -")?,
                }
            }
        }

        writeln!(f, "  row headers: {}", join_or_dash(grid.table_row_headers()))?;
        writeln!(f, "  col headers: {}", join_or_dash(grid.table_col_headers()))
    }
}

fn join(handles: &[RawCellHandle]) -> String {
    handles
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

fn join_or_dash(handles: &[RawCellHandle]) -> String {
    if handles.is_empty() {
        "-".to_string()
    } else {
        join(handles)
    }
}
