//! Table Sources
//!
//! The provider side of a build: ordered rows of raw cells plus an optional
//! column to column-group mapping.

use crate::SourceRow;

/// Supplies the structure of one table
pub trait TableSource {
    /// Rows in document order
    fn rows(&self) -> Vec<SourceRow>;

    /// Column to column-group mapping, if the table declares one
    fn column_groups(&self) -> Option<ColumnGroups> {
        None
    }
}

impl TableSource for Vec<SourceRow> {
    fn rows(&self) -> Vec<SourceRow> {
        self.clone()
    }
}

/// Column to column-group mapping
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ColumnGroups {
    /// Group index per column
    groups: Vec<usize>,
}

impl ColumnGroups {
    /// Build from the number of columns each group covers, in order.
    /// A zero width counts as one column.
    pub fn from_spans(spans: &[usize]) -> Self {
        let groups = spans
            .iter()
            .enumerate()
            .flat_map(|(group, &span)| std::iter::repeat(group).take(span.max(1)))
            .collect();
        Self { groups }
    }

    /// Group of a column. Columns past the mapping share one implicit
    /// trailing group.
    pub fn group_of(&self, col: usize) -> usize {
        match self.groups.get(col) {
            Some(&group) => group,
            None => self.groups.last().map_or(0, |&last| last + 1),
        }
    }

    /// Number of mapped columns
    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }
}
