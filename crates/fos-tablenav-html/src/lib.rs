//! fOS Table Navigation: HTML source
//!
//! Reads `<table>` structure out of an HTML document and hands it to the
//! shadow table engine as a [`TableSource`](fos_tablenav::TableSource).
//!
//! ```
//! use fos_tablenav::{build_from, BuildOptions};
//!
//! let html = "<table><tr><th>A</th><th>B</th></tr><tr><td>1</td><td>2</td></tr></table>";
//! let doc = fos_tablenav_html::parse(html).unwrap();
//! let grid = build_from(doc.table(0).unwrap(), &BuildOptions::default());
//! assert_eq!(grid.col_count(), 2);
//! ```

mod parser;
mod table;

pub use parser::{Dom, DomNode, HtmlParser, NodeKind};
pub use table::{HtmlDocument, HtmlTable};

/// Parse an HTML string and collect its tables
pub fn parse(html: &str) -> Result<HtmlDocument, SourceError> {
    HtmlDocument::parse(html)
}

/// Source error
#[derive(Debug, thiserror::Error)]
pub enum SourceError {
    #[error("No table {index} in document ({count} tables)")]
    NoSuchTable { index: usize, count: usize },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
