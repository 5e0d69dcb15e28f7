//! Build [`Document`]s from YAML text.
//!
//! Uses the yaml-rust2 event parser and records every node into the arena as
//! its event arrives. Scalars keep their literal text (no type coercion), so
//! `1.7.1`, `007` and `true` stay exactly as written.

use std::collections::HashMap;
use std::sync::LazyLock;

use regex::Regex;
use thiserror::Error;
use yaml_rust2::parser::{Event, MarkedEventReceiver, Parser};
use yaml_rust2::scanner::{Marker, TScalarStyle};

use super::comments::{find_comment_start, trailing_comment};
use super::{Document, Node, NodeId, NodeKind, Style};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("{0}")]
    Syntax(String),
}

impl From<yaml_rust2::ScanError> for ParseError {
    fn from(err: yaml_rust2::ScanError) -> Self {
        ParseError::Syntax(err.to_string())
    }
}

/// Parse every document of a YAML stream.
///
/// Empty documents are dropped. Line numbers are relative to the whole
/// stream, so documents from the same file can be written back together.
pub fn parse_documents(content: &str, file_path: &str) -> Result<Vec<Document>, ParseError> {
    let mut parser = Parser::new_from_str(content);
    let mut builder = DocumentBuilder::new(content, file_path);
    parser.load(&mut builder, true)?;
    Ok(builder.documents)
}

/// Parse a raw literal (e.g. a setter value) into a single-document tree.
///
/// Empty input yields a document holding one empty scalar.
pub fn parse_literal(text: &str) -> Result<Document, ParseError> {
    let mut documents = parse_documents(text, "")?;
    if documents.is_empty() {
        return Ok(empty_scalar_document());
    }
    Ok(documents.swap_remove(0))
}

fn empty_scalar_document() -> Document {
    Document {
        file_path: String::new(),
        nodes: vec![Node::new(NodeKind::Scalar)],
        root: NodeId(0),
    }
}

/// Ends with a block scalar indicator: `|`, `>-`, `|2+`, ...
static BLOCK_SCALAR_HEADER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?:^|\s)[|>][0-9+-]*$").unwrap());

fn is_block_scalar_header(line: &str) -> bool {
    let code = match find_comment_start(line) {
        Some(start) => &line[..start],
        None => line,
    };
    BLOCK_SCALAR_HEADER.is_match(code.trim_end())
}

/// A collection under construction.
struct Frame {
    id: NodeId,
    /// Key waiting for its value (mappings only).
    pending_key: Option<NodeId>,
}

struct DocumentBuilder<'a> {
    chars: Vec<char>,
    lines: Vec<&'a str>,
    file_path: String,

    nodes: Vec<Node>,
    stack: Vec<Frame>,
    root: Option<NodeId>,
    /// `(line, node)` for every node that may own the comment of its line,
    /// in the order the nodes ended.
    claims: Vec<(usize, NodeId)>,

    documents: Vec<Document>,
}

impl<'a> DocumentBuilder<'a> {
    fn new(content: &'a str, file_path: &str) -> Self {
        Self {
            chars: content.chars().collect(),
            lines: content.lines().collect(),
            file_path: file_path.to_string(),
            nodes: Vec::new(),
            stack: Vec::new(),
            root: None,
            claims: Vec::new(),
            documents: Vec::new(),
        }
    }

    fn char_at(&self, index: usize) -> Option<char> {
        self.chars.get(index).copied()
    }

    fn alloc(&mut self, kind: NodeKind) -> NodeId {
        let parent = self.stack.last().map(|frame| frame.id);
        let mut node = Node::new(kind);
        if let Some(parent) = parent {
            let parent = &self.nodes[parent.0];
            node.flow_member = parent.flow_member || parent.style == Style::Flow;
        }
        let id = NodeId(self.nodes.len());
        self.nodes.push(node);
        id
    }

    /// Hook a freshly allocated node into its parent collection.
    fn attach(&mut self, id: NodeId) {
        let Some(frame) = self.stack.last_mut() else {
            self.root = Some(id);
            return;
        };
        let parent = frame.id;
        match self.nodes[parent.0].kind {
            NodeKind::Mapping => match frame.pending_key.take() {
                None => frame.pending_key = Some(id),
                Some(key) => {
                    self.nodes[parent.0].entries.push((key, id));
                    // A block collection's comment sits on its key's line.
                    let node = &self.nodes[id.0];
                    if node.kind != NodeKind::Scalar && node.style == Style::Block {
                        self.nodes[id.0].line = self.nodes[key.0].line;
                    }
                }
            },
            NodeKind::Sequence => self.nodes[parent.0].elements.push(id),
            NodeKind::Scalar | NodeKind::Alias => {}
        }
    }

    fn on_scalar(&mut self, value: String, style: TScalarStyle, marker: Marker) {
        let id = self.alloc(NodeKind::Scalar);
        let start = marker.index();

        // yaml-rust2 reports an implicit empty value as `~`
        let implicit_empty =
            matches!(style, TScalarStyle::Plain) && value == "~" && self.char_at(start) != Some('~');

        let line = match style {
            _ if implicit_empty => None,
            TScalarStyle::Literal | TScalarStyle::Folded => self.block_scalar_header(marker),
            _ if self.scalar_is_single_line(start, &value, style) => Some(marker.line()),
            _ => None,
        };

        let node = &mut self.nodes[id.0];
        node.value = if implicit_empty { String::new() } else { value };
        node.line = line;
        if let Some(line) = line {
            self.claims.push((line, id));
        }
        self.attach(id);
    }

    /// Whether a trailing comment can follow the scalar on its first line.
    fn scalar_is_single_line(&self, start: usize, value: &str, style: TScalarStyle) -> bool {
        match style {
            TScalarStyle::SingleQuoted | TScalarStyle::DoubleQuoted => {
                self.quoted_is_single_line(start)
            }
            _ => {
                let rest: String = self.chars[start.min(self.chars.len())..]
                    .iter()
                    .take_while(|&&c| c != '\n')
                    .collect();
                rest.starts_with(value)
            }
        }
    }

    /// Line of the `|` / `>` header of a block scalar.
    ///
    /// The event may point at the indicator or into the content. Only the
    /// header line can carry the scalar's comment; `#` inside the content is
    /// part of the value.
    fn block_scalar_header(&self, marker: Marker) -> Option<usize> {
        let end = marker.index().min(self.chars.len());
        let prefix: String = self.chars[end.saturating_sub(marker.col())..end].iter().collect();
        if matches!(self.char_at(marker.index()), Some('|' | '>')) || is_block_scalar_header(&prefix)
        {
            return Some(marker.line());
        }

        // leading blank lines belong to the content
        let header = (1..marker.line()).rev().find(|&n| {
            self.lines
                .get(n - 1)
                .is_some_and(|text| !text.trim().is_empty())
        })?;
        self.lines
            .get(header - 1)
            .filter(|text| is_block_scalar_header(text))
            .map(|_| header)
    }

    fn quoted_is_single_line(&self, start: usize) -> bool {
        let Some(quote) = self.char_at(start) else {
            return true;
        };
        let mut i = start + 1;
        while let Some(c) = self.char_at(i) {
            match c {
                '\n' => return false,
                '\\' if quote == '"' => i += 1,
                c if c == quote => {
                    if quote == '\'' && self.char_at(i + 1) == Some('\'') {
                        i += 1;
                    } else {
                        return true;
                    }
                }
                _ => {}
            }
            i += 1;
        }
        true
    }

    fn on_collection_start(&mut self, kind: NodeKind, marker: Marker) {
        let id = self.alloc(kind);
        let open = if kind == NodeKind::Sequence { '[' } else { '{' };
        if self.char_at(marker.index()) == Some(open) {
            self.nodes[id.0].style = Style::Flow;
        }
        self.attach(id);
        self.stack.push(Frame {
            id,
            pending_key: None,
        });
    }

    fn on_collection_end(&mut self, marker: Marker) {
        let Some(frame) = self.stack.pop() else {
            return;
        };
        // A flow collection owns the comment of the line it closes on.
        if self.nodes[frame.id.0].style == Style::Flow {
            self.nodes[frame.id.0].line = Some(marker.line());
            self.claims.push((marker.line(), frame.id));
        }
    }

    fn on_alias(&mut self) {
        let id = self.alloc(NodeKind::Alias);
        self.attach(id);
    }

    fn finish_document(&mut self) {
        self.stack.clear();
        let claims = std::mem::take(&mut self.claims);
        let nodes = std::mem::take(&mut self.nodes);
        let Some(root) = self.root.take() else {
            return;
        };

        let root_node = &nodes[root.0];
        if root_node.kind == NodeKind::Scalar && root_node.value.is_empty() && root_node.line.is_none()
        {
            return;
        }

        let mut document = Document {
            file_path: self.file_path.clone(),
            nodes,
            root,
        };

        // The last node to end on a line owns that line's comment.
        let mut owners: HashMap<usize, NodeId> = HashMap::new();
        for (line, id) in claims {
            owners.insert(line, id);
        }
        for (line, id) in owners {
            let Some(text) = line.checked_sub(1).and_then(|i| self.lines.get(i)) else {
                continue;
            };
            if let Some(comment) = trailing_comment(text) {
                let node = document.node_mut(id);
                node.line_comment = comment.to_string();
                node.original_comment = comment.to_string();
            }
        }

        self.documents.push(document);
    }
}

impl MarkedEventReceiver for DocumentBuilder<'_> {
    fn on_event(&mut self, ev: Event, marker: Marker) {
        match ev {
            Event::Scalar(value, style, ..) => self.on_scalar(value, style, marker),
            Event::SequenceStart(..) => self.on_collection_start(NodeKind::Sequence, marker),
            Event::MappingStart(..) => self.on_collection_start(NodeKind::Mapping, marker),
            Event::SequenceEnd | Event::MappingEnd => self.on_collection_end(marker),
            Event::Alias(..) => self.on_alias(),
            Event::DocumentEnd => self.finish_document(),
            _ => {}
        }
    }
}
