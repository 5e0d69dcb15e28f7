//! Setter registry: the decoded, typed setter configuration.
//!
//! Scalar setters are kept in application order. After every insertion the
//! list is re-sorted with [`applies_before`] so that a setter whose value
//! contains another setter's name is applied after it.

use crate::document::{Document, NodeId, NodeKind, format_list, parse_literal};

use super::error::InputError;

/// Key of the nested map holding setters in a ConfigMap-style config.
const DATA_FIELD: &str = "data";

/// A named literal value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScalarSetter {
    pub name: String,
    pub value: String,
}

/// A named set of literal values. `values` is kept sorted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListSetter {
    pub name: String,
    pub values: Vec<String>,
}

impl ListSetter {
    pub fn new(name: impl Into<String>, values: impl IntoIterator<Item = impl Into<String>>) -> Self {
        let mut values: Vec<String> = values.into_iter().map(Into::into).collect();
        values.sort();
        Self {
            name: name.into(),
            values,
        }
    }

    /// Set equality against the elements of a document list.
    pub fn matches(&self, node_values: &[String]) -> bool {
        if node_values.len() != self.values.len() {
            return false;
        }
        let mut sorted = node_values.to_vec();
        sorted.sort();
        sorted == self.values
    }

    /// The recorded value, e.g. `[bar foo]`.
    pub fn formatted(&self) -> String {
        format_list(&self.values)
    }
}

/// Whether `a` is applied before `b`: always, unless `a`'s value contains
/// `b`'s name.
///
/// This is not a strict weak order (it can report both `a < b` and `b < a`),
/// so it must only drive the insertion sort in [`SetterRegistry::insert_scalar`].
pub fn applies_before(a: &ScalarSetter, b: &ScalarSetter) -> bool {
    !a.value.contains(&b.name)
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SetterRegistry {
    scalars: Vec<ScalarSetter>,
    lists: Vec<ListSetter>,
}

impl SetterRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Scalar setters in application order.
    pub fn scalars(&self) -> &[ScalarSetter] {
        &self.scalars
    }

    pub fn lists(&self) -> &[ListSetter] {
        &self.lists
    }

    pub fn is_empty(&self) -> bool {
        self.scalars.is_empty() && self.lists.is_empty()
    }

    pub fn len(&self) -> usize {
        self.scalars.len() + self.lists.len()
    }

    /// Register a scalar setter and re-sort the scalar list.
    ///
    /// Duplicate names are appended, not merged.
    pub fn insert_scalar(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.scalars.push(ScalarSetter {
            name: name.into(),
            value: value.into(),
        });
        // insertion sort, stable for equal elements
        for i in 1..self.scalars.len() {
            let mut j = i;
            while j > 0 && applies_before(&self.scalars[j], &self.scalars[j - 1]) {
                self.scalars.swap(j, j - 1);
                j -= 1;
            }
        }
    }

    pub fn insert_list(
        &mut self,
        name: impl Into<String>,
        values: impl IntoIterator<Item = impl Into<String>>,
    ) {
        self.lists.push(ListSetter::new(name, values));
    }

    /// Decode a setter configuration document.
    ///
    /// The setters are the `data` mapping when the root has one, otherwise
    /// the root mapping itself. Each value is a YAML literal: a string is
    /// parsed again, so `"[foo, bar]"` is a list setter, while a list written
    /// inline is taken as is.
    pub fn decode(doc: &Document) -> Result<Self, InputError> {
        let root = doc.root();
        let setters = match doc.field(root, DATA_FIELD) {
            Some((_, data)) if doc.node(data).kind() == NodeKind::Mapping => data,
            _ => root,
        };

        let mut registry = Self::new();
        match doc.node(setters).kind() {
            NodeKind::Mapping => {}
            // empty config
            NodeKind::Scalar if doc.node(setters).value().is_empty() => return Ok(registry),
            _ => {
                return Err(InputError::Decode {
                    name: String::new(),
                    message: "setter config must be a mapping".to_string(),
                });
            }
        }

        for &(key, value) in doc.node(setters).entries() {
            let key = doc.node(key);
            if key.kind() != NodeKind::Scalar {
                return Err(InputError::Decode {
                    name: String::new(),
                    message: "setter names must be scalars".to_string(),
                });
            }
            registry.decode_entry(key.value(), doc, value)?;
        }
        Ok(registry)
    }

    fn decode_entry(&mut self, name: &str, doc: &Document, value: NodeId) -> Result<(), InputError> {
        let node = doc.node(value);
        match node.kind() {
            NodeKind::Sequence => {
                self.insert_list(name, doc.element_values(value));
                Ok(())
            }
            NodeKind::Scalar => {
                let literal = parse_literal(node.value()).map_err(|e| InputError::Decode {
                    name: name.to_string(),
                    message: e.to_string(),
                })?;
                let parsed = literal.node(literal.root());
                match parsed.kind() {
                    NodeKind::Sequence => self.insert_list(name, literal.element_values(literal.root())),
                    // keep the declared text, not the re-parsed one
                    NodeKind::Scalar => self.insert_scalar(name, node.value()),
                    _ => {
                        return Err(InputError::Decode {
                            name: name.to_string(),
                            message: "value must be a scalar or a list".to_string(),
                        });
                    }
                }
                tracing::debug!(name, value = node.value(), "registered setter");
                Ok(())
            }
            NodeKind::Mapping | NodeKind::Alias => Err(InputError::Decode {
                name: name.to_string(),
                message: "value must be a scalar or a list".to_string(),
            }),
        }
    }
}
