//! Source Cells
//!
//! Static attributes of markup table cells, as handed over by a table
//! source for one build.

use std::fmt;

/// Markup kind of a cell
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum CellKind {
    /// `<th>`
    HeaderTag,
    /// `<td>`
    #[default]
    DataTag,
}

/// Header scope
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum Scope {
    Row,
    Col,
    RowGroup,
    ColGroup,
}

impl Scope {
    /// Parse a `scope` attribute value
    pub fn parse(s: &str) -> Option<Self> {
        Some(match s.trim().to_ascii_lowercase().as_str() {
            "row" => Self::Row,
            "col" => Self::Col,
            "rowgroup" => Self::RowGroup,
            "colgroup" => Self::ColGroup,
            _ => return None,
        })
    }

    /// Governs cells along a row (`row` or `rowgroup`)
    pub fn is_row(&self) -> bool {
        matches!(self, Self::Row | Self::RowGroup)
    }

    /// Governs cells along a column (`col` or `colgroup`)
    pub fn is_col(&self) -> bool {
        matches!(self, Self::Col | Self::ColGroup)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Row => "row",
            Self::Col => "col",
            Self::RowGroup => "rowgroup",
            Self::ColGroup => "colgroup",
        }
    }
}

/// ARIA role of a cell, reduced to what matters for table semantics
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum Role {
    RowHeader,
    ColumnHeader,
    Cell,
    GridCell,
    Presentation,
    Other,
}

impl Role {
    /// Parse a `role` attribute. Only the first token of the list counts.
    pub fn parse(s: &str) -> Option<Self> {
        let token = s.split_ascii_whitespace().next()?;
        Some(match token.to_ascii_lowercase().as_str() {
            "rowheader" => Self::RowHeader,
            "columnheader" => Self::ColumnHeader,
            "cell" => Self::Cell,
            "gridcell" => Self::GridCell,
            "none" | "presentation" => Self::Presentation,
            _ => Self::Other,
        })
    }
}

/// Identity of the structural container a row belongs to
/// (`<thead>`, `<tbody>`, `<tfoot>` or the table itself)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct ContainerId(pub u64);

/// Handle to a raw cell: its position in the source rows
/// (source row index, index within that row's cell list).
///
/// Handles are only meaningful against the grid that was built from the
/// same source rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct RawCellHandle {
    pub row: usize,
    pub index: usize,
}

impl RawCellHandle {
    /// Create a handle to cell `index` of source row `row`
    pub fn new(row: usize, index: usize) -> Self {
        Self { row, index }
    }
}

impl fmt::Display for RawCellHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.row, self.index)
    }
}

/// A source cell and its static attributes
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct RawCell {
    pub id: Option<String>,
    pub kind: CellKind,
    pub colspan: Option<i64>,
    pub rowspan: Option<i64>,
    pub scope: Option<Scope>,
    pub role: Option<Role>,
    /// `headers` id list
    pub headers: Vec<String>,
    /// `aria-describedby` id list
    pub described_by: Vec<String>,
}

impl RawCell {
    /// Create a new cell of `kind` with no attributes
    pub fn new(kind: CellKind) -> Self {
        Self { kind, ..Default::default() }
    }

    /// Header-tagged cell
    pub fn th() -> Self {
        Self::new(CellKind::HeaderTag)
    }

    /// Data-tagged cell
    pub fn td() -> Self {
        Self::new(CellKind::DataTag)
    }

    /// Set the id; an empty id clears it
    pub fn with_id(mut self, id: &str) -> Self {
        self.id = if id.is_empty() { None } else { Some(id.to_string()) };
        self
    }

    /// Set the raw `colspan`, unvalidated
    pub fn with_colspan(mut self, colspan: i64) -> Self {
        self.colspan = Some(colspan);
        self
    }

    /// Set the raw `rowspan`, unvalidated
    pub fn with_rowspan(mut self, rowspan: i64) -> Self {
        self.rowspan = Some(rowspan);
        self
    }

    /// Set the `scope` attribute
    pub fn with_scope(mut self, scope: Scope) -> Self {
        self.scope = Some(scope);
        self
    }

    /// Set the ARIA role
    pub fn with_role(mut self, role: Role) -> Self {
        self.role = Some(role);
        self
    }

    /// Set the `headers` list from a space-separated attribute value
    pub fn with_headers(mut self, value: &str) -> Self {
        self.headers = split_id_list(value);
        self
    }

    /// Set the `aria-describedby` list from a space-separated attribute value
    pub fn with_described_by(mut self, value: &str) -> Self {
        self.described_by = split_id_list(value);
        self
    }

    #[inline]
    pub fn is_header_tag(&self) -> bool {
        self.kind == CellKind::HeaderTag
    }

    /// Eligible for header classification
    pub fn is_candidate_header(&self) -> bool {
        self.is_header_tag() || !self.headers.is_empty()
    }
}

/// One source row
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct SourceRow {
    pub container: ContainerId,
    pub cells: Vec<RawCell>,
}

impl SourceRow {
    /// Create a new row inside `container`
    pub fn new(container: ContainerId, cells: Vec<RawCell>) -> Self {
        Self { container, cells }
    }
}

/// Parse a span attribute using the markup rules for integers:
/// leading whitespace, optional sign, then the leading run of digits.
/// Trailing garbage is ignored (`"3px"` is 3). No digits, or a value that
/// does not fit, yields `None`.
pub fn parse_span(value: &str) -> Option<i64> {
    let s = value.trim_start_matches(|c: char| c.is_ascii_whitespace());
    let (negative, digits) = match s.as_bytes().first() {
        Some(b'-') => (true, &s[1..]),
        Some(b'+') => (false, &s[1..]),
        _ => (false, s),
    };
    let end = digits
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(digits.len());
    if end == 0 {
        return None;
    }
    let magnitude = digits[..end].parse::<i64>().ok()?;
    Some(if negative { -magnitude } else { magnitude })
}

/// Split a space-separated id reference list
pub fn split_id_list(value: &str) -> Vec<String> {
    value.split_ascii_whitespace().map(str::to_string).collect()
}
