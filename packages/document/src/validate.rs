//! Structural invariant checks for documents loaded from outside.

use crate::node::Node;
use crate::registry::Registry;
use crate::Document;
use std::collections::HashSet;
use thiserror::Error;

/// One broken invariant
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Violation {
    #[error("node {id} has unknown type '{element_type}'")]
    UnknownType { id: String, element_type: String },

    #[error("node id {0} is used more than once")]
    DuplicateId(String),

    #[error("node {id} of type '{element_type}' has children but its type does not allow them")]
    ChildrenNotAllowed { id: String, element_type: String },

    #[error("node {id} of type '{element_type}' is missing its children list")]
    MissingChildren { id: String, element_type: String },

    #[error("node {id} records parent {recorded:?} but sits under {actual:?}")]
    ParentMismatch {
        id: String,
        recorded: Option<String>,
        actual: Option<String>,
    },
}

impl Document {
    /// Check every structural invariant against `registry`.
    ///
    /// Returns all violations found, not just the first.
    pub fn validate(&self, registry: &Registry) -> Result<(), Vec<Violation>> {
        let mut seen = HashSet::new();
        let mut violations = Vec::new();

        for node in self.elements() {
            check_node(node, None, registry, &mut seen, &mut violations);
        }

        if violations.is_empty() {
            Ok(())
        } else {
            Err(violations)
        }
    }
}

/// Check a detached subtree that is about to be placed under `parent_id`
pub(crate) fn check_subtree(node: &Node, parent_id: Option<&str>, registry: &Registry) -> Result<(), Vec<Violation>> {
    let mut seen = HashSet::new();
    let mut violations = Vec::new();
    check_node(node, parent_id, registry, &mut seen, &mut violations);

    if violations.is_empty() {
        Ok(())
    } else {
        Err(violations)
    }
}

fn check_node<'a>(
    node: &'a Node,
    actual_parent: Option<&str>,
    registry: &Registry,
    seen: &mut HashSet<&'a str>,
    violations: &mut Vec<Violation>,
) {
    if !seen.insert(node.id()) {
        violations.push(Violation::DuplicateId(node.id().to_string()));
    }

    if node.parent_id() != actual_parent {
        violations.push(Violation::ParentMismatch {
            id: node.id().to_string(),
            recorded: node.parent_id().map(str::to_string),
            actual: actual_parent.map(str::to_string),
        });
    }

    match registry.lookup(node.element_type()) {
        None => violations.push(Violation::UnknownType {
            id: node.id().to_string(),
            element_type: node.element_type().to_string(),
        }),
        Some(entry) if entry.allow_children && !node.is_container() => {
            violations.push(Violation::MissingChildren {
                id: node.id().to_string(),
                element_type: node.element_type().to_string(),
            })
        }
        Some(entry) if !entry.allow_children && node.is_container() => {
            violations.push(Violation::ChildrenNotAllowed {
                id: node.id().to_string(),
                element_type: node.element_type().to_string(),
            })
        }
        Some(_) => {}
    }

    for child in node.children().unwrap_or_default() {
        check_node(child, Some(node.id()), registry, seen, violations);
    }
}
