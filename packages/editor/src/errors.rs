//! Error types for the editor

use pagecraft_document::Violation;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum EditorError {
    #[error("Mutation error: {0}")]
    Mutation(#[from] crate::mutations::MutationError),

    #[error("Persistence error: {0}")]
    Persistence(#[from] crate::gateway::PersistenceError),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Document failed validation: {}", describe(.0))]
    Invalid(Vec<Violation>),

    #[error("Unknown theme: {0}")]
    UnknownTheme(String),

    #[error("Document is not file-backed")]
    NotFileBacked,

    #[error("Cannot undo or redo while a batch is open")]
    BatchOpen,
}

fn describe(violations: &[Violation]) -> String {
    violations
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}
