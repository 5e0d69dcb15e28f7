//! YAML documents as an arena of nodes.
//!
//! Nodes are addressed by [`NodeId`] handles into a [`Document`]'s node vector,
//! so the tree can be mutated in place while it is being walked without any
//! parent/child reference cycles.
//!
//! ## Module Structure
//!
//! - `parser`: builds documents from YAML text (yaml-rust2 events)
//! - `comments`: recovers trailing line comments from the source text
//! - `walk`: depth-first traversal with read-only and mutating visitors
//! - `render`: writes changed comments back into the source text
//! - `scanner`: discovers resource files under a directory

mod comments;
mod parser;
mod render;
pub mod scanner;
mod walk;

pub use comments::find_comment_start;
pub use parser::{ParseError, parse_documents, parse_literal};
pub use render::{LineEdit, SourceFile};
pub use walk::{TraversalError, Visit, VisitMut, walk, walk_mut};

/// Handle of a node inside its [`Document`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind {
    Scalar,
    Sequence,
    Mapping,
    Alias,
}

/// Presentation style of a node.
///
/// `Folded` is only ever assigned by callers: a flow list that received a
/// setter annotation on its key is switched to it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Style {
    #[default]
    Block,
    Flow,
    Folded,
}

#[derive(Debug, Clone)]
pub struct Node {
    kind: NodeKind,
    value: String,
    line_comment: String,
    style: Style,
    elements: Vec<NodeId>,
    entries: Vec<(NodeId, NodeId)>,
    /// Source line (1-based) that carries this node's trailing comment.
    /// `None` when the node cannot hold one.
    line: Option<usize>,
    /// Laid out inside a flow collection in the source.
    flow_member: bool,
    original_comment: String,
}

impl Node {
    fn new(kind: NodeKind) -> Self {
        Self {
            kind,
            value: String::new(),
            line_comment: String::new(),
            style: Style::Block,
            elements: Vec::new(),
            entries: Vec::new(),
            line: None,
            flow_member: false,
            original_comment: String::new(),
        }
    }

    pub fn kind(&self) -> NodeKind {
        self.kind
    }

    /// Scalar text; empty for collections and aliases.
    pub fn value(&self) -> &str {
        &self.value
    }

    /// Full trailing comment including the leading `# `, or empty.
    pub fn line_comment(&self) -> &str {
        &self.line_comment
    }

    pub fn style(&self) -> Style {
        self.style
    }

    /// Sequence elements in document order.
    pub fn elements(&self) -> &[NodeId] {
        &self.elements
    }

    /// Mapping `(key, value)` pairs in document order.
    pub fn entries(&self) -> &[(NodeId, NodeId)] {
        &self.entries
    }

    pub fn line(&self) -> Option<usize> {
        self.line
    }

    pub fn is_flow_member(&self) -> bool {
        self.flow_member
    }

    pub fn is_comment_changed(&self) -> bool {
        self.line_comment != self.original_comment
    }

    pub fn set_value(&mut self, value: impl Into<String>) {
        self.value = value.into();
    }

    pub fn set_line_comment(&mut self, comment: impl Into<String>) {
        self.line_comment = comment.into();
    }

    pub fn set_style(&mut self, style: Style) {
        self.style = style;
    }
}

/// One YAML document (resource) from a source file.
#[derive(Debug, Clone)]
pub struct Document {
    file_path: String,
    nodes: Vec<Node>,
    root: NodeId,
}

impl Document {
    pub fn root(&self) -> NodeId {
        self.root
    }

    /// Path of the file this document was read from.
    pub fn file_path(&self) -> &str {
        &self.file_path
    }

    pub fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id.0]
    }

    pub fn node_mut(&mut self, id: NodeId) -> &mut Node {
        &mut self.nodes[id.0]
    }

    pub fn nodes(&self) -> impl Iterator<Item = (NodeId, &Node)> {
        self.nodes.iter().enumerate().map(|(i, n)| (NodeId(i), n))
    }

    /// Scalar values of a sequence's elements, in document order.
    ///
    /// Non-scalar elements contribute an empty string.
    pub fn element_values(&self, sequence: NodeId) -> Vec<String> {
        self.node(sequence)
            .elements()
            .iter()
            .map(|&id| self.node(id).value().to_string())
            .collect()
    }

    /// Look up a direct field of a mapping by key.
    pub fn field(&self, mapping: NodeId, key: &str) -> Option<(NodeId, NodeId)> {
        self.node(mapping)
            .entries()
            .iter()
            .copied()
            .find(|&(k, _)| self.node(k).kind() == NodeKind::Scalar && self.node(k).value() == key)
    }

    /// Follow a dotted field path from the root through mapping keys.
    pub fn lookup(&self, path: &str) -> Option<NodeId> {
        path.split('.').try_fold(self.root, |current, key| {
            self.field(current, key).map(|(_, value)| value)
        })
    }

    pub fn is_modified(&self) -> bool {
        self.nodes.iter().any(Node::is_comment_changed)
    }
}

/// Join a parent field path and a key, without a leading dot at the root.
pub fn field_path(parent: &str, key: &str) -> String {
    if parent.is_empty() {
        key.to_string()
    } else {
        format!("{}.{}", parent, key)
    }
}

/// Format list values the way setter list values are recorded: `[a b c]`.
pub fn format_list<S: AsRef<str>>(values: &[S]) -> String {
    let joined: Vec<&str> = values.iter().map(AsRef::as_ref).collect();
    format!("[{}]", joined.join(" "))
}
