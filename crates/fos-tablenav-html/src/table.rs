//! HTML Tables
//!
//! Extracts the row/cell structure of every `<table>` in a document.
//! Only `table > (thead|tbody|tfoot) > tr > (th|td)` and `table > tr`
//! are walked, so the rows of a nested table never land in the outer one.

use std::collections::HashMap;
use std::io::Read;

use fos_tablenav::{
    parse_span, ColumnGroups, ContainerId, RawCell, RawCellHandle, Role, Scope, SourceRow,
    TableSource,
};

use crate::{Dom, DomNode, HtmlParser, SourceError};

/// Largest column group span taken from markup
const MAX_GROUP_SPAN: usize = 1000;

/// A parsed document and its tables
#[derive(Debug, Clone)]
pub struct HtmlDocument {
    dom: Dom,
    tables: Vec<HtmlTable>,
    ids: HashMap<String, usize>,
}

impl HtmlDocument {
    /// Parse an HTML string and collect its tables
    pub fn parse(html: &str) -> Result<Self, SourceError> {
        let dom = HtmlParser::new().parse(html)?;
        Ok(Self::from_dom(dom))
    }

    /// Parse UTF-8 HTML from a reader
    pub fn read<R: Read>(reader: &mut R) -> Result<Self, SourceError> {
        let dom = HtmlParser::new().read(reader)?;
        Ok(Self::from_dom(dom))
    }

    /// Create a new document from an already parsed DOM.
    ///
    /// Builds the id index (first occurrence wins) and extracts every
    /// `<table>`, nested ones included, in document order.
    pub fn from_dom(dom: Dom) -> Self {
        let mut ids = HashMap::new();
        let mut tables = Vec::new();
        for (index, node) in dom.nodes().iter().enumerate() {
            if let Some(id) = node.attr("id").filter(|id| !id.is_empty()) {
                ids.entry(id.to_string()).or_insert(index);
            }
            if node.is_element("table") {
                tables.push(HtmlTable::extract(&dom, index));
            }
        }
        tracing::debug!(tables = tables.len(), "collected HTML tables");
        Self { dom, tables, ids }
    }

    pub fn dom(&self) -> &Dom {
        &self.dom
    }

    /// Tables in document order, nested ones included
    pub fn tables(&self) -> &[HtmlTable] {
        &self.tables
    }

    pub fn len(&self) -> usize {
        self.tables.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tables.is_empty()
    }

    /// Table at `index` in document order
    pub fn table(&self, index: usize) -> Result<&HtmlTable, SourceError> {
        self.tables.get(index).ok_or(SourceError::NoSuchTable {
            index,
            count: self.tables.len(),
        })
    }

    /// Node index of the first element carrying `id`
    pub fn element_by_id(&self, id: &str) -> Option<usize> {
        self.ids.get(id).copied()
    }

    /// Innermost table around a document position
    pub fn table_containing(&self, position: usize) -> Option<usize> {
        self.tables
            .iter()
            .rposition(|table| table.node <= position && position < table.end)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct CellNode {
    start: usize,
    end: usize,
    text: String,
}

/// One `<table>` element as a table source
#[derive(Debug, Clone)]
pub struct HtmlTable {
    node: usize,
    end: usize,
    rows: Vec<SourceRow>,
    cells: Vec<Vec<CellNode>>,
    column_groups: Option<ColumnGroups>,
}

impl HtmlTable {
    fn extract(dom: &Dom, node: usize) -> Self {
        let table = dom.node(node);
        let mut extracted = Self {
            node,
            end: table.end,
            rows: Vec::new(),
            cells: Vec::new(),
            column_groups: None,
        };
        let mut group_spans = Vec::new();

        for &child in &table.children {
            let element = dom.node(child);
            match element.name() {
                Some("thead" | "tbody" | "tfoot") => {
                    let container = ContainerId(child as u64);
                    for &tr in &element.children {
                        if dom.node(tr).is_element("tr") {
                            extracted.push_row(dom, tr, container);
                        }
                    }
                }
                Some("tr") => extracted.push_row(dom, child, ContainerId(node as u64)),
                Some("colgroup") => group_spans.push(colgroup_span(dom, element)),
                _ => {}
            }
        }

        if !group_spans.is_empty() {
            extracted.column_groups = Some(ColumnGroups::from_spans(&group_spans));
        }
        tracing::trace!(node, rows = extracted.rows.len(), "extracted table");
        extracted
    }

    fn push_row(&mut self, dom: &Dom, tr: usize, container: ContainerId) {
        let mut raw = Vec::new();
        let mut nodes = Vec::new();
        for &child in &dom.node(tr).children {
            let element = dom.node(child);
            let Some(cell) = raw_cell(element) else { continue };
            raw.push(cell);
            nodes.push(CellNode {
                start: child,
                end: element.end,
                text: dom.text_content(child),
            });
        }
        self.rows.push(SourceRow::new(container, raw));
        self.cells.push(nodes);
    }

    /// Node index of the `<table>` element
    pub fn node(&self) -> usize {
        self.node
    }

    /// Extracted rows, without cloning
    pub fn source_rows(&self) -> &[SourceRow] {
        &self.rows
    }

    /// Collapsed text of a cell
    pub fn cell_text(&self, handle: RawCellHandle) -> Option<&str> {
        self.cell_node(handle).map(|cell| cell.text.as_str())
    }

    /// Node index of a cell element
    pub fn cell_element(&self, handle: RawCellHandle) -> Option<usize> {
        self.cell_node(handle).map(|cell| cell.start)
    }

    fn cell_node(&self, handle: RawCellHandle) -> Option<&CellNode> {
        self.cells.get(handle.row)?.get(handle.index)
    }

    /// Cell for a document position inside this table.
    ///
    /// Walks the cells in document order and returns the first one that
    /// contains the position or starts after it. Positions past every cell
    /// resolve to the last cell. Nested tables count as part of the cell
    /// holding them.
    pub fn cell_at_position(&self, position: usize) -> Option<RawCellHandle> {
        if position < self.node || position >= self.end {
            return None;
        }
        let mut last = None;
        for (row, cells) in self.cells.iter().enumerate() {
            for (index, cell) in cells.iter().enumerate() {
                let handle = RawCellHandle::new(row, index);
                if position < cell.end {
                    return Some(handle);
                }
                last = Some(handle);
            }
        }
        last
    }
}

impl TableSource for HtmlTable {
    fn rows(&self) -> Vec<SourceRow> {
        self.rows.clone()
    }

    fn column_groups(&self) -> Option<ColumnGroups> {
        self.column_groups.clone()
    }
}

/// Raw cell from a `<th>` or `<td>` element
fn raw_cell(element: &DomNode) -> Option<RawCell> {
    let mut cell = match element.name()? {
        "th" => RawCell::th(),
        "td" => RawCell::td(),
        _ => return None,
    };
    if let Some(id) = element.attr("id") {
        cell = cell.with_id(id);
    }
    cell.colspan = element.attr("colspan").and_then(parse_span);
    cell.rowspan = element.attr("rowspan").and_then(parse_span);
    cell.scope = element.attr("scope").and_then(Scope::parse);
    cell.role = element.attr("role").and_then(Role::parse);
    if let Some(headers) = element.attr("headers") {
        cell = cell.with_headers(headers);
    }
    if let Some(described_by) = element.attr("aria-describedby") {
        cell = cell.with_described_by(described_by);
    }
    Some(cell)
}

/// Columns covered by a `<colgroup>`: the sum of its `<col>` spans, or its
/// own `span` when it has no `<col>` children
fn colgroup_span(dom: &Dom, colgroup: &DomNode) -> usize {
    let cols: Vec<&DomNode> = colgroup
        .children
        .iter()
        .map(|&child| dom.node(child))
        .filter(|node| node.is_element("col"))
        .collect();
    if cols.is_empty() {
        return group_span(colgroup);
    }
    cols.into_iter().map(group_span).sum()
}

fn group_span(element: &DomNode) -> usize {
    element
        .attr("span")
        .and_then(parse_span)
        .filter(|&span| span > 0)
        .map_or(1, |span| (span as usize).min(MAX_GROUP_SPAN))
}
