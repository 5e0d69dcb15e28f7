//! Depth-first traversal of a document.
//!
//! Mappings are offered to `visit_mapping` before their field values are
//! walked with the path `parent.key`; sequence elements are walked with the
//! sequence's own path; scalars go to `visit_scalar`; aliases are skipped.
//! Changes a [`VisitMut`] makes are visible to every later visit.
//!
//! Every key of a mapping handed to `visit_mapping` is a scalar; the walk
//! fails before the visit otherwise.

use thiserror::Error;

use super::{Document, NodeId, NodeKind, field_path};

/// A node that the tree walk cannot iterate as expected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TraversalError {
    #[error("mapping key at line {line} is not a scalar")]
    NonScalarKey { line: usize },

    #[error("mapping key at an unknown line is not a scalar")]
    NonScalarKeyUnknownLine,
}

impl TraversalError {
    pub fn non_scalar_key(line: Option<usize>) -> Self {
        match line {
            Some(line) => Self::NonScalarKey { line },
            None => Self::NonScalarKeyUnknownLine,
        }
    }
}

/// Read-only visitor.
pub trait Visit {
    fn visit_mapping(
        &mut self,
        _doc: &Document,
        _node: NodeId,
        _path: &str,
    ) -> Result<(), TraversalError> {
        Ok(())
    }

    fn visit_scalar(
        &mut self,
        _doc: &Document,
        _node: NodeId,
        _path: &str,
    ) -> Result<(), TraversalError> {
        Ok(())
    }
}

/// Visitor that may mutate node values, comments and styles in place.
pub trait VisitMut {
    fn visit_mapping(
        &mut self,
        _doc: &mut Document,
        _node: NodeId,
        _path: &str,
    ) -> Result<(), TraversalError> {
        Ok(())
    }

    fn visit_scalar(
        &mut self,
        _doc: &mut Document,
        _node: NodeId,
        _path: &str,
    ) -> Result<(), TraversalError> {
        Ok(())
    }
}

pub fn walk<V: Visit + ?Sized>(doc: &Document, visitor: &mut V) -> Result<(), TraversalError> {
    walk_node(doc, doc.root(), "", visitor)
}

pub fn walk_mut<V: VisitMut + ?Sized>(
    doc: &mut Document,
    visitor: &mut V,
) -> Result<(), TraversalError> {
    let root = doc.root();
    walk_node_mut(doc, root, "", visitor)
}

fn check_keys(doc: &Document, mapping: NodeId) -> Result<(), TraversalError> {
    for &(key, _) in doc.node(mapping).entries() {
        let key = doc.node(key);
        if key.kind() != NodeKind::Scalar {
            return Err(TraversalError::non_scalar_key(key.line()));
        }
    }
    Ok(())
}

fn walk_node<V: Visit + ?Sized>(
    doc: &Document,
    id: NodeId,
    path: &str,
    visitor: &mut V,
) -> Result<(), TraversalError> {
    match doc.node(id).kind() {
        NodeKind::Mapping => {
            check_keys(doc, id)?;
            visitor.visit_mapping(doc, id, path)?;
            for &(key, value) in doc.node(id).entries() {
                let child = field_path(path, doc.node(key).value());
                walk_node(doc, value, &child, visitor)?;
            }
            Ok(())
        }
        NodeKind::Sequence => {
            for &element in doc.node(id).elements() {
                walk_node(doc, element, path, visitor)?;
            }
            Ok(())
        }
        NodeKind::Scalar => visitor.visit_scalar(doc, id, path),
        NodeKind::Alias => Ok(()),
    }
}

fn walk_node_mut<V: VisitMut + ?Sized>(
    doc: &mut Document,
    id: NodeId,
    path: &str,
    visitor: &mut V,
) -> Result<(), TraversalError> {
    match doc.node(id).kind() {
        NodeKind::Mapping => {
            check_keys(doc, id)?;
            visitor.visit_mapping(doc, id, path)?;
            let entries = doc.node(id).entries().to_vec();
            for (key, value) in entries {
                let child = field_path(path, doc.node(key).value());
                walk_node_mut(doc, value, &child, visitor)?;
            }
            Ok(())
        }
        NodeKind::Sequence => {
            let elements = doc.node(id).elements().to_vec();
            for element in elements {
                walk_node_mut(doc, element, path, visitor)?;
            }
            Ok(())
        }
        NodeKind::Scalar => visitor.visit_scalar(doc, id, path),
        NodeKind::Alias => Ok(()),
    }
}
