//! # Pagecraft Editor
//!
//! Editing engine for page documents.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │ document: Node tree, registry, tree ops     │
//! └─────────────────────────────────────────────┘
//!                     ↓
//! ┌─────────────────────────────────────────────┐
//! │ editor: Document lifecycle + mutations      │
//! │  - Load/save documents                      │
//! │  - Apply mutations with validation          │
//! │  - Undo/redo history and selection          │
//! │  - Snapshots for persistence                │
//! └─────────────────────────────────────────────┘
//!                     ↓
//! ┌─────────────────────────────────────────────┐
//! │ gateway: HTTP / file / memory backends      │
//! └─────────────────────────────────────────────┘
//! ```
//!
//! ## Core Principles
//!
//! 1. **Document is plain data**: Serialization is lossless and needs no extra state
//! 2. **Mutations are intents**: Serializable, validated, reversible
//! 3. **Selection by id**: Never a reference into the tree
//! 4. **Persistence is a seam**: The editor only knows [`PersistenceGateway`]
//!
//! ## Usage
//!
//! ```rust
//! use pagecraft_document::Registry;
//! use pagecraft_editor::{DocumentHandle, EditSession, Mutation};
//!
//! let mut session = EditSession::new("local", DocumentHandle::new(Registry::page()));
//!
//! let container = session
//!     .apply(Mutation::AddElement { element_type: "container".into(), parent_id: None })?
//!     .created()
//!     .map(str::to_string);
//! session.apply(Mutation::AddElement { element_type: "button".into(), parent_id: container })?;
//!
//! assert_eq!(session.document().node_count(), 2);
//! session.undo()?;
//! assert_eq!(session.document().node_count(), 1);
//! # Ok::<(), pagecraft_editor::EditorError>(())
//! ```

mod document;
mod errors;
mod gateway;
mod mutations;
mod selection;
mod session;
mod undo_stack;

pub use document::{DocumentHandle, DocumentStorage};
pub use errors::EditorError;
pub use gateway::{PersistenceError, PersistenceGateway, PublishReceipt, SaveReceipt, Snapshot};
pub use mutations::{Applied, Change, Mutation, MutationError, MutationResult};
pub use selection::Selection;
pub use session::EditSession;
pub use undo_stack::{MutationBatch, UndoStack, DEFAULT_UNDO_LEVELS};

// Re-export document types for convenience
pub use pagecraft_document::{Document, ElementPatch, Node, Registry};
