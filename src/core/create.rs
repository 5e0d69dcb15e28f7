//! Forward annotator: write `# kpt-set:` templates onto fields whose values
//! match registered setters.
//!
//! Scalars get a template built by substituting every scalar setter value
//! that occurs in the text. Lists are annotated only when a list setter holds
//! exactly the same elements (in any order).

use serde::Serialize;

use crate::document::{Document, NodeId, NodeKind, Style, VisitMut, field_path, format_list, walk_mut};

use super::annotation::{format_annotation, placeholder};
use super::error::{InputError, Result, SetterError, TraversalError};
use super::registry::SetterRegistry;

/// One visited field, annotated or not.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchResult {
    pub file_path: String,
    pub field_path: String,
    pub value: String,
    pub comment: String,
}

/// Annotator state for one run over a batch of documents.
pub struct CreateSetters<'a> {
    registry: &'a SetterRegistry,
    results: Vec<MatchResult>,
    annotated: usize,
    file_path: String,
}

impl<'a> CreateSetters<'a> {
    pub fn new(registry: &'a SetterRegistry) -> Self {
        Self {
            registry,
            results: Vec::new(),
            annotated: 0,
            file_path: String::new(),
        }
    }

    /// Annotate every document in order.
    ///
    /// A traversal failure stops the run; documents already visited keep
    /// their annotations and the results gathered so far stay available.
    pub fn filter(&mut self, documents: &mut [Document]) -> Result<()> {
        if self.registry.is_empty() {
            return Err(InputError::EmptyRegistry.into());
        }
        for doc in documents {
            self.file_path = doc.file_path().to_string();
            walk_mut(doc, self).map_err(|source| SetterError::Traversal {
                file_path: self.file_path.clone(),
                source,
            })?;
        }
        Ok(())
    }

    pub fn results(&self) -> &[MatchResult] {
        &self.results
    }

    pub fn into_results(self) -> Vec<MatchResult> {
        self.results
    }

    /// Number of annotations written so far.
    pub fn annotated_count(&self) -> usize {
        self.annotated
    }

    fn record(&mut self, field_path: String, value: String, comment: String) {
        self.results.push(MatchResult {
            file_path: self.file_path.clone(),
            field_path,
            value,
            comment,
        });
    }

    /// Whether any scalar setter value occurs in any of `values`.
    fn has_scalar_match(&self, values: &[String]) -> bool {
        values.iter().any(|value| {
            self.registry
                .scalars()
                .iter()
                .any(|setter| !setter.value.is_empty() && value.contains(&setter.value))
        })
    }

    fn visit_sequence_field(&mut self, doc: &mut Document, key: NodeId, value: NodeId, path: &str) {
        let registry = self.registry;
        let field = field_path(path, doc.node(key).value());
        let values = doc.element_values(value);

        if let Some(setter) = registry.lists().iter().find(|s| s.matches(&values)) {
            let comment = format_annotation(&placeholder(&setter.name));
            let target = if doc.node(value).style() == Style::Flow {
                doc.node_mut(value).set_style(Style::Folded);
                key
            } else {
                value
            };
            doc.node_mut(target).set_line_comment(comment.clone());
            self.annotated += 1;
            tracing::debug!(file = %self.file_path, field = %field, %comment, "annotated list");
            self.record(field, format_list(&values), comment);
            return;
        }

        if self.has_scalar_match(&values) {
            // partial match, no template is guessed
            let comment = doc.node(value).line_comment().to_string();
            self.record(field, format_list(&values), comment);
            return;
        }

        self.record(field, String::new(), String::new());
    }
}

impl VisitMut for CreateSetters<'_> {
    fn visit_mapping(
        &mut self,
        doc: &mut Document,
        node: NodeId,
        path: &str,
    ) -> std::result::Result<(), TraversalError> {
        let entries = doc.node(node).entries().to_vec();
        for (key, value) in entries {
            if doc.node(value).kind() == NodeKind::Sequence {
                self.visit_sequence_field(doc, key, value, path);
            }
        }
        Ok(())
    }

    fn visit_scalar(
        &mut self,
        doc: &mut Document,
        node: NodeId,
        path: &str,
    ) -> std::result::Result<(), TraversalError> {
        let original = doc.node(node).value().to_string();
        let template = substitute(self.registry, &original);

        // a one-line flow list cannot hold per-element comments, and a
        // comment cannot hold a line break
        let writable = |template: &String| {
            !doc.node(node).is_flow_member() && !template.contains(['\n', '\r'])
        };
        if let Some(template) = template.filter(writable) {
            let comment = format_annotation(&template);
            tracing::debug!(file = %self.file_path, field = path, %comment, "annotated scalar");
            doc.node_mut(node).set_line_comment(comment);
            self.annotated += 1;
        }

        let comment = doc.node(node).line_comment().to_string();
        self.record(path.to_string(), original, comment);
        Ok(())
    }
}

/// Build the template for `text`, or `None` when no setter value occurs in it.
///
/// Setters are applied in registry order. Occurrence is checked against the
/// original text; replacement happens on the template built so far.
pub fn substitute(registry: &SetterRegistry, text: &str) -> Option<String> {
    let mut output = text.to_string();
    let mut matched = false;
    for setter in registry.scalars() {
        if setter.value.is_empty() || !text.contains(&setter.value) {
            continue;
        }
        matched = true;
        output = output.replace(&setter.value, &placeholder(&setter.name));
    }
    matched.then_some(output)
}

/// Annotate `documents` in place and return one result per visited field.
pub fn annotate(registry: &SetterRegistry, documents: &mut [Document]) -> Result<Vec<MatchResult>> {
    let mut creator = CreateSetters::new(registry);
    creator.filter(documents)?;
    Ok(creator.into_results())
}
