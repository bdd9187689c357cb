//! # Document Mutations
//!
//! Serializable editing intents applied to a page document.
//!
//! ## Design Principles
//!
//! 1. **Intent-preserving**: Each mutation is one user action in the builder
//! 2. **Validated**: Invalid targets are rejected before anything changes
//! 3. **Reversible**: Every effective mutation yields a replayable forward
//!    form and an inverse, which the undo stack records
//!
//! ## Mutation Semantics
//!
//! ### AddElement
//! - Creates a node from the catalog template with a fresh id
//! - Fails on unknown types and on missing or leaf parents
//!
//! ### UpdateElement / DeleteElement / DuplicateElement
//! - Target missing → `Noop`, never an error (the node may have been deleted
//!   by an earlier action in the same tick)
//!
//! ### Reorder
//! - Fails when either index is outside the sibling list
//!
//! ### InsertNode
//! - Places a complete subtree at an index; the replay form of add/duplicate
//!   and the inverse of delete
//! - Fails when the subtree breaks the catalog's rules or reuses ids

use pagecraft_document::{Document, ElementPatch, IdGenerator, Node, Registry, TreeError};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Semantic mutations (intent-preserving operations)
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "kind", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum Mutation {
    /// Create a node of `element_type` under `parent_id` (root when absent)
    AddElement {
        element_type: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        parent_id: Option<String>,
    },

    /// Patch name/content/styles of a node
    UpdateElement { node_id: String, patch: ElementPatch },

    /// Remove a node and its subtree
    DeleteElement { node_id: String },

    /// Copy a node's subtree next to it
    DuplicateElement { node_id: String },

    /// Move one item within a sibling list (root list when `container_id` is absent)
    Reorder {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        container_id: Option<String>,
        from_index: usize,
        to_index: usize,
    },

    /// Insert an existing subtree
    InsertNode {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        parent_id: Option<String>,
        index: usize,
        node: Node,
    },
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum MutationError {
    #[error(transparent)]
    Tree(#[from] TreeError),

    #[error("Unknown element type: {0}")]
    UnknownElementType(String),
}

/// Outcome of applying a mutation to a document
#[derive(Debug, Clone, PartialEq)]
pub enum Applied {
    Changed(Change),
    Noop { reason: String },
}

/// An effective change, with what is needed to redo and undo it
#[derive(Debug, Clone, PartialEq)]
pub struct Change {
    /// Id of the node this change created, if any
    pub created: Option<String>,

    /// Deterministic form of the mutation (no id generation on replay)
    pub replay: Mutation,

    /// Mutation that reverts this change
    pub inverse: Mutation,
}

impl Mutation {
    /// Debug name for logging
    pub fn name(&self) -> &'static str {
        match self {
            Mutation::AddElement { .. } => "AddElement",
            Mutation::UpdateElement { .. } => "UpdateElement",
            Mutation::DeleteElement { .. } => "DeleteElement",
            Mutation::DuplicateElement { .. } => "DuplicateElement",
            Mutation::Reorder { .. } => "Reorder",
            Mutation::InsertNode { .. } => "InsertNode",
        }
    }

    /// Apply mutation to the document
    pub fn apply(
        &self,
        doc: &mut Document,
        registry: &Registry,
        ids: &mut IdGenerator,
    ) -> Result<Applied, MutationError> {
        match self {
            Mutation::AddElement { element_type, parent_id } => {
                Self::apply_add(doc, registry, ids, element_type, parent_id.as_deref())
            }

            Mutation::UpdateElement { node_id, patch } => Ok(Self::apply_update(doc, node_id, patch)),

            Mutation::DeleteElement { node_id } => Ok(Self::apply_delete(doc, node_id)),

            Mutation::DuplicateElement { node_id } => Ok(Self::apply_duplicate(doc, ids, node_id)),

            Mutation::Reorder { container_id, from_index, to_index } => {
                Self::apply_reorder(doc, container_id.as_deref(), *from_index, *to_index)
            }

            Mutation::InsertNode { parent_id, index, node } => {
                Self::apply_insert(doc, registry, parent_id.as_deref(), *index, node)
            }
        }
    }

    fn apply_add(
        doc: &mut Document,
        registry: &Registry,
        ids: &mut IdGenerator,
        element_type: &str,
        parent_id: Option<&str>,
    ) -> Result<Applied, MutationError> {
        let entry = registry
            .lookup(element_type)
            .ok_or_else(|| MutationError::UnknownElementType(element_type.to_string()))?;

        let id = doc.add_element(entry, parent_id, ids)?;
        Ok(Self::created(doc, id))
    }

    fn apply_update(doc: &mut Document, node_id: &str, patch: &ElementPatch) -> Applied {
        let Some(node) = doc.find(node_id) else {
            return Self::missing(node_id);
        };

        let inverse = Mutation::UpdateElement {
            node_id: node_id.to_string(),
            patch: ElementPatch::snapshot_of(node),
        };
        doc.update_element(node_id, patch);

        Applied::Changed(Change {
            created: None,
            replay: Mutation::UpdateElement {
                node_id: node_id.to_string(),
                patch: patch.clone(),
            },
            inverse,
        })
    }

    fn apply_delete(doc: &mut Document, node_id: &str) -> Applied {
        let Some((parent_id, index)) = doc.position_of(node_id) else {
            return Self::missing(node_id);
        };
        let Some(node) = doc.delete_element(node_id) else {
            return Self::missing(node_id);
        };

        Applied::Changed(Change {
            created: None,
            replay: Mutation::DeleteElement {
                node_id: node_id.to_string(),
            },
            inverse: Mutation::InsertNode { parent_id, index, node },
        })
    }

    fn apply_duplicate(doc: &mut Document, ids: &mut IdGenerator, node_id: &str) -> Applied {
        match doc.duplicate_element(node_id, ids) {
            Some(copy_id) => Self::created(doc, copy_id),
            None => Self::missing(node_id),
        }
    }

    fn apply_reorder(
        doc: &mut Document,
        container_id: Option<&str>,
        from_index: usize,
        to_index: usize,
    ) -> Result<Applied, MutationError> {
        doc.reorder(container_id, from_index, to_index)?;

        if from_index == to_index {
            return Ok(Applied::Noop {
                reason: format!("item {} is already at index {}", from_index, to_index),
            });
        }

        let container_id = container_id.map(str::to_string);
        Ok(Applied::Changed(Change {
            created: None,
            replay: Mutation::Reorder {
                container_id: container_id.clone(),
                from_index,
                to_index,
            },
            inverse: Mutation::Reorder {
                container_id,
                from_index: to_index,
                to_index: from_index,
            },
        }))
    }

    fn apply_insert(
        doc: &mut Document,
        registry: &Registry,
        parent_id: Option<&str>,
        index: usize,
        node: &Node,
    ) -> Result<Applied, MutationError> {
        doc.insert_node(registry, parent_id, index, node.clone())?;
        Ok(Self::created(doc, node.id().to_string()))
    }

    /// Change record for a node that now exists in `doc`
    fn created(doc: &Document, id: String) -> Applied {
        let (parent_id, index, node) = match (doc.position_of(&id), doc.find(&id)) {
            (Some((parent_id, index)), Some(node)) => (parent_id, index, node.clone()),
            _ => return Self::missing(&id),
        };

        Applied::Changed(Change {
            created: Some(id.clone()),
            replay: Mutation::InsertNode { parent_id, index, node },
            inverse: Mutation::DeleteElement { node_id: id },
        })
    }

    fn missing(node_id: &str) -> Applied {
        Applied::Noop {
            reason: format!("node {} not found", node_id),
        }
    }
}

/// Result of applying a mutation through the editor
#[derive(Debug, Clone, PartialEq)]
pub enum MutationResult {
    /// Document changed; `version` is the new document version
    Applied { version: u64, created: Option<String> },

    /// Nothing changed
    Noop { reason: String },
}

impl MutationResult {
    pub fn is_applied(&self) -> bool {
        matches!(self, MutationResult::Applied { .. })
    }

    /// Id of the node created by this mutation, if any
    pub fn created(&self) -> Option<&str> {
        match self {
            MutationResult::Applied { created, .. } => created.as_deref(),
            MutationResult::Noop { .. } => None,
        }
    }
}
