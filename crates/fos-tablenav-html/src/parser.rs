//! HTML5 Parser
//!
//! Parses with html5ever into an RcDom, then flattens the tree into a
//! pre-order arena. A node's arena index doubles as its document position.

use std::io::{self, Read};

use html5ever::parse_document;
use html5ever::tendril::TendrilSink;
use markup5ever_rcdom::{Handle, NodeData as RcNodeData, RcDom};

/// Kind of an arena node
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodeKind {
    Document,
    Element {
        /// Local name, lowercase
        name: String,
        attrs: Vec<(String, String)>,
    },
    Text(String),
    /// Comments, doctypes, processing instructions
    Other,
}

/// A node of the flattened document
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DomNode {
    pub kind: NodeKind,
    pub parent: Option<usize>,
    pub children: Vec<usize>,
    /// One past the index of the last descendant
    pub end: usize,
}

impl DomNode {
    /// Element local name
    pub fn name(&self) -> Option<&str> {
        match &self.kind {
            NodeKind::Element { name, .. } => Some(name),
            _ => None,
        }
    }

    #[inline]
    pub fn is_element(&self, name: &str) -> bool {
        self.name() == Some(name)
    }

    /// Attribute value by name
    pub fn attr(&self, name: &str) -> Option<&str> {
        match &self.kind {
            NodeKind::Element { attrs, .. } => attrs
                .iter()
                .find(|(key, _)| key == name)
                .map(|(_, value)| value.as_str()),
            _ => None,
        }
    }

    /// Whether `position` lies in this node's subtree
    pub fn contains(&self, index: usize, position: usize) -> bool {
        index <= position && position < self.end
    }
}

/// Pre-order node arena. Index 0 is the document node.
#[derive(Debug, Clone, Default)]
pub struct Dom {
    nodes: Vec<DomNode>,
}

impl Dom {
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&DomNode> {
        self.nodes.get(index)
    }

    pub fn nodes(&self) -> &[DomNode] {
        &self.nodes
    }

    /// Indices come from the arena itself
    pub(crate) fn node(&self, index: usize) -> &DomNode {
        &self.nodes[index]
    }

    /// Text of a subtree with whitespace collapsed
    pub fn text_content(&self, index: usize) -> String {
        let Some(node) = self.nodes.get(index) else {
            return String::new();
        };
        let mut words = Vec::new();
        for descendant in &self.nodes[index..node.end] {
            if let NodeKind::Text(text) = &descendant.kind {
                words.extend(text.split_whitespace());
            }
        }
        words.join(" ")
    }
}

/// HTML5 parser
pub struct HtmlParser;

impl HtmlParser {
    /// Create a new HTML parser
    pub fn new() -> Self {
        Self
    }

    /// Parse an HTML string
    pub fn parse(&self, html: &str) -> io::Result<Dom> {
        self.read(&mut html.as_bytes())
    }

    /// Parse UTF-8 HTML from a reader
    pub fn read<R: Read>(&self, reader: &mut R) -> io::Result<Dom> {
        let rc = parse_document(RcDom::default(), Default::default())
            .from_utf8()
            .read_from(reader)?;

        let mut dom = Dom::default();
        self.convert(&rc.document, &mut dom);
        tracing::debug!(nodes = dom.len(), "parsed HTML document");
        Ok(dom)
    }

    /// Flatten the RcDom in pre-order, with an explicit work stack
    fn convert(&self, root: &Handle, dom: &mut Dom) {
        let mut stack = vec![Step::Enter(root.clone(), None)];

        while let Some(step) = stack.pop() {
            let (handle, parent) = match step {
                Step::Enter(handle, parent) => (handle, parent),
                Step::Exit(index) => {
                    dom.nodes[index].end = dom.nodes.len();
                    continue;
                }
            };

            let index = dom.nodes.len();
            dom.nodes.push(DomNode {
                kind: node_kind(&handle),
                parent,
                children: Vec::new(),
                end: index + 1,
            });
            if let Some(parent) = parent {
                dom.nodes[parent].children.push(index);
            }

            stack.push(Step::Exit(index));
            for child in handle.children.borrow().iter().rev() {
                stack.push(Step::Enter(child.clone(), Some(index)));
            }
        }
    }
}

/// Pending work while flattening
enum Step {
    Enter(Handle, Option<usize>),
    /// Subtree of the node at this index is complete
    Exit(usize),
}

fn node_kind(handle: &Handle) -> NodeKind {
    match &handle.data {
        RcNodeData::Document => NodeKind::Document,
        RcNodeData::Element { name, attrs, .. } => NodeKind::Element {
            name: name.local.to_string(),
            attrs: attrs
                .borrow()
                .iter()
                .map(|attr| (attr.name.local.to_string(), attr.value.to_string()))
                .collect(),
        },
        RcNodeData::Text { contents } => NodeKind::Text(contents.borrow().to_string()),
        _ => NodeKind::Other,
    }
}

impl Default for HtmlParser {
    fn default() -> Self {
        Self::new()
    }
}
