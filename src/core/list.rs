//! Reverse resolver: recover setter values from existing `# kpt-set:`
//! annotations and count how often each registered value is in use.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::document::{Document, NodeId, NodeKind, Style, Visit, format_list, walk};

use super::annotation::{clean_placeholder, extract_template};
use super::error::{InputError, Result, SetterError, TraversalError};
use super::pattern::Template;
use super::registry::SetterRegistry;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SetterKind {
    Scalar,
    List,
}

impl SetterKind {
    pub fn as_str(self) -> &'static str {
        match self {
            SetterKind::Scalar => "scalar",
            SetterKind::List => "list",
        }
    }
}

/// Usage of one registered setter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TallyRecord {
    pub name: String,
    /// Registered value; lists are formatted as `[a b c]` with sorted elements.
    pub value: String,
    #[serde(rename = "type")]
    pub kind: SetterKind,
    pub count: usize,
}

/// Resolver state for one run over a batch of documents.
pub struct ListSetters<'a> {
    registry: &'a SetterRegistry,
    results: BTreeMap<String, TallyRecord>,
    file_path: String,
}

impl<'a> ListSetters<'a> {
    /// Seed one record per registered setter with a zero count.
    ///
    /// For duplicate names the first registration's value is kept.
    pub fn new(registry: &'a SetterRegistry) -> Self {
        let mut results = BTreeMap::new();
        for setter in registry.lists() {
            results.entry(setter.name.clone()).or_insert_with(|| TallyRecord {
                name: setter.name.clone(),
                value: setter.formatted(),
                kind: SetterKind::List,
                count: 0,
            });
        }
        for setter in registry.scalars() {
            results.entry(setter.name.clone()).or_insert_with(|| TallyRecord {
                name: setter.name.clone(),
                value: setter.value.clone(),
                kind: SetterKind::Scalar,
                count: 0,
            });
        }
        Self {
            registry,
            results,
            file_path: String::new(),
        }
    }

    pub fn filter(&mut self, documents: &[Document]) -> Result<()> {
        if self.registry.is_empty() {
            return Err(InputError::EmptyRegistry.into());
        }
        for doc in documents {
            self.file_path = doc.file_path().to_string();
            walk(doc, self).map_err(|source| SetterError::Traversal {
                file_path: self.file_path.clone(),
                source,
            })?;
        }
        Ok(())
    }

    /// Records keyed by setter name.
    pub fn results(&self) -> &BTreeMap<String, TallyRecord> {
        &self.results
    }

    pub fn into_results(self) -> BTreeMap<String, TallyRecord> {
        self.results
    }

    /// Count one occurrence of `name` if `observed` equals its recorded value.
    fn tally(&mut self, name: &str, observed: &str) {
        let Some(record) = self.results.get_mut(name) else {
            return;
        };
        if record.value == observed {
            record.count += 1;
            tracing::debug!(file = %self.file_path, name, count = record.count, "setter in use");
        }
    }

    fn visit_sequence_field(&mut self, doc: &Document, key: NodeId, value: NodeId) {
        let sequence = doc.node(value);
        let key = doc.node(key);
        // flow lists carry the comment on the value, block lists on the key
        let (primary, fallback) = if sequence.style() == Style::Flow {
            (sequence, key)
        } else {
            (key, sequence)
        };
        let comment = if primary.line_comment().is_empty() {
            fallback.line_comment()
        } else {
            primary.line_comment()
        };
        let Some(template) = extract_template(comment) else {
            return;
        };

        let mut values = doc.element_values(value);
        values.sort();
        self.tally(clean_placeholder(template), &format_list(&values));
    }
}

impl Visit for ListSetters<'_> {
    fn visit_mapping(
        &mut self,
        doc: &Document,
        node: NodeId,
        _path: &str,
    ) -> std::result::Result<(), TraversalError> {
        for &(key, value) in doc.node(node).entries() {
            if doc.node(value).kind() == NodeKind::Sequence {
                self.visit_sequence_field(doc, key, value);
            }
        }
        Ok(())
    }

    fn visit_scalar(
        &mut self,
        doc: &Document,
        node: NodeId,
        _path: &str,
    ) -> std::result::Result<(), TraversalError> {
        let node = doc.node(node);
        let Some(template) = extract_template(node.line_comment()) else {
            return Ok(());
        };
        let template = Template::parse(template);

        // no registered scalar setter referenced, nothing to report
        if !self
            .registry
            .scalars()
            .iter()
            .any(|setter| template.references(&setter.name))
        {
            return Ok(());
        }

        let Some(bindings) = template.resolve(node.value()) else {
            return Ok(());
        };
        for (name, value) in bindings.iter() {
            self.tally(name, value);
        }
        Ok(())
    }
}

/// Tally setter usage across `documents`.
pub fn resolve(
    registry: &SetterRegistry,
    documents: &[Document],
) -> Result<BTreeMap<String, TallyRecord>> {
    let mut lister = ListSetters::new(registry);
    lister.filter(documents)?;
    Ok(lister.into_results())
}
