//! Write changed comments back into the original source text.
//!
//! Only the lines whose node comment changed are touched; indentation,
//! quoting, flow/block layout and line endings are preserved everywhere else.

use std::collections::BTreeMap;

use super::comments::rewrite_line;
use super::{Document, ParseError, parse_documents};

/// A single line rewrite.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineEdit {
    /// 1-based line number.
    pub line: usize,
    pub before: String,
    pub after: String,
}

/// A YAML file together with its parsed documents.
#[derive(Debug, Clone)]
pub struct SourceFile {
    path: String,
    content: String,
    documents: Vec<Document>,
}

impl SourceFile {
    pub fn parse(path: impl Into<String>, content: impl Into<String>) -> Result<Self, ParseError> {
        let path = path.into();
        let content = content.into();
        let documents = parse_documents(&content, &path)?;
        Ok(Self {
            path,
            content,
            documents,
        })
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn documents(&self) -> &[Document] {
        &self.documents
    }

    pub fn documents_mut(&mut self) -> &mut [Document] {
        &mut self.documents
    }

    pub fn is_modified(&self) -> bool {
        !self.edits().is_empty()
    }

    /// Number of changed comments that have no line to be written on.
    pub fn unwritable_count(&self) -> usize {
        self.documents
            .iter()
            .flat_map(|doc| doc.nodes())
            .filter(|(_, node)| node.is_comment_changed() && node.line().is_none())
            .count()
    }

    /// New comment per line. When several changed nodes share a line, the
    /// one created last wins.
    fn planned_comments(&self) -> BTreeMap<usize, &str> {
        let mut planned = BTreeMap::new();
        for doc in &self.documents {
            for (_, node) in doc.nodes() {
                if !node.is_comment_changed() {
                    continue;
                }
                if let Some(line) = node.line() {
                    planned.insert(line, node.line_comment());
                }
            }
        }
        planned
    }

    /// Line rewrites needed to persist the changed comments.
    pub fn edits(&self) -> Vec<LineEdit> {
        let planned = self.planned_comments();
        self.content
            .lines()
            .enumerate()
            .filter_map(|(i, text)| {
                let comment = planned.get(&(i + 1))?;
                let text = text.strip_suffix('\r').unwrap_or(text);
                let after = rewrite_line(text, comment);
                (after != text).then(|| LineEdit {
                    line: i + 1,
                    before: text.to_string(),
                    after,
                })
            })
            .collect()
    }

    /// The file content with all edits applied.
    pub fn render(&self) -> String {
        let edits: BTreeMap<usize, String> = self
            .edits()
            .into_iter()
            .map(|edit| (edit.line, edit.after))
            .collect();
        if edits.is_empty() {
            return self.content.clone();
        }

        let mut output = String::with_capacity(self.content.len() + edits.len() * 32);
        for (i, raw) in self.content.split_inclusive('\n').enumerate() {
            match edits.get(&(i + 1)) {
                Some(after) => {
                    let ending = if raw.ends_with("\r\n") {
                        "\r\n"
                    } else if raw.ends_with('\n') {
                        "\n"
                    } else {
                        ""
                    };
                    output.push_str(after);
                    output.push_str(ending);
                }
                None => output.push_str(raw),
            }
        }
        output
    }
}
