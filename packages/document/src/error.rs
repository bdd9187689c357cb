//! Error types for tree operations

use crate::validate::Violation;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum TreeError {
    /// Target parent is missing or its type does not accept children
    #[error("Invalid parent {parent_id}: {reason}")]
    InvalidParent {
        parent_id: String,
        reason: &'static str,
    },

    #[error("Index {index} out of range for sibling list of length {len}")]
    IndexOutOfRange { index: usize, len: usize },

    #[error("Container not found: {0}")]
    ContainerNotFound(String),

    #[error("Duplicate node id: {0}")]
    DuplicateId(String),

    /// Inserted subtree breaks the catalog's structural rules
    #[error("Invalid subtree {id}: {} violation(s)", .violations.len())]
    InvalidSubtree { id: String, violations: Vec<Violation> },
}

impl TreeError {
    pub(crate) fn parent_not_found(parent_id: &str) -> Self {
        TreeError::InvalidParent {
            parent_id: parent_id.to_string(),
            reason: "not found",
        }
    }

    pub(crate) fn parent_is_leaf(parent_id: &str) -> Self {
        TreeError::InvalidParent {
            parent_id: parent_id.to_string(),
            reason: "element type does not accept children",
        }
    }
}
