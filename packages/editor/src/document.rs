//! # Document Handle
//!
//! Editing state around a single page document.
//!
//! A handle can be:
//! - **Memory-backed**: Created fresh or from a value, saved only through a gateway
//! - **File-backed**: Loaded from a JSON file and written back in place
//!
//! ## Lifecycle
//!
//! ```text
//! Load → Validate → Edit → Snapshot → Save / Publish
//!   ↓       ↓         ↓        ↓
//! File  Registry  Mutations  Gateway
//! ```

use crate::gateway::Snapshot;
use crate::mutations::{Applied, Change};
use crate::{EditorError, Mutation, MutationResult};
use chrono::Utc;
use pagecraft_document::{find_theme, Document, IdGenerator, Registry};
use std::path::{Path, PathBuf};

/// Editable page document
#[derive(Debug)]
pub struct DocumentHandle {
    document: Document,

    /// Element catalog this document is edited against
    registry: &'static Registry,

    ids: IdGenerator,

    /// Current version number (increments on each effective mutation)
    pub version: u64,

    /// Version last handed to a successful save
    saved_version: u64,

    /// Backing storage strategy
    storage: DocumentStorage,
}

/// Storage backend for a document handle
#[derive(Debug, Clone, PartialEq)]
pub enum DocumentStorage {
    /// In-memory only
    Memory,

    /// File-backed (single-user editing)
    File { path: PathBuf },
}

impl DocumentHandle {
    /// Empty memory-backed document
    pub fn new(registry: &'static Registry) -> Self {
        Self::with_storage(Document::new(), registry, DocumentStorage::Memory)
    }

    /// Wrap an existing document, rejecting structurally invalid trees
    pub fn from_document(document: Document, registry: &'static Registry) -> Result<Self, EditorError> {
        document.validate(registry).map_err(EditorError::Invalid)?;
        Ok(Self::with_storage(document, registry, DocumentStorage::Memory))
    }

    /// Load a document from a JSON file (file-backed)
    pub fn load(path: impl AsRef<Path>, registry: &'static Registry) -> Result<Self, EditorError> {
        let path = path.as_ref().to_path_buf();
        let source = std::fs::read_to_string(&path)?;
        let document = Document::from_json_str(&source)?;
        document.validate(registry).map_err(EditorError::Invalid)?;

        tracing::debug!(path = %path.display(), nodes = document.node_count(), "loaded document");
        Ok(Self::with_storage(document, registry, DocumentStorage::File { path }))
    }

    fn with_storage(document: Document, registry: &'static Registry, storage: DocumentStorage) -> Self {
        Self {
            document,
            registry,
            ids: IdGenerator::new(),
            version: 0,
            saved_version: 0,
            storage,
        }
    }

    /// Replace the id generator (deterministic ids in tests)
    pub fn with_ids(mut self, ids: IdGenerator) -> Self {
        self.ids = ids;
        self
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    pub fn registry(&self) -> &'static Registry {
        self.registry
    }

    pub fn storage(&self) -> &DocumentStorage {
        &self.storage
    }

    pub fn path(&self) -> Option<&Path> {
        match &self.storage {
            DocumentStorage::File { path } => Some(path),
            DocumentStorage::Memory => None,
        }
    }

    /// Apply a mutation
    pub fn apply(&mut self, mutation: &Mutation) -> Result<MutationResult, EditorError> {
        self.apply_recorded(mutation).map(|(result, _)| result)
    }

    /// Apply a mutation and return the change record used for undo
    pub(crate) fn apply_recorded(
        &mut self,
        mutation: &Mutation,
    ) -> Result<(MutationResult, Option<Change>), EditorError> {
        let applied = mutation
            .apply(&mut self.document, self.registry, &mut self.ids)
            .map_err(|err| {
                tracing::warn!(mutation = mutation.name(), error = %err, "mutation rejected");
                err
            })?;

        match applied {
            Applied::Changed(change) => {
                self.version += 1;
                tracing::debug!(mutation = mutation.name(), version = self.version, "mutation applied");

                let result = MutationResult::Applied {
                    version: self.version,
                    created: change.created.clone(),
                };
                Ok((result, Some(change)))
            }
            Applied::Noop { reason } => {
                tracing::debug!(mutation = mutation.name(), %reason, "mutation had no effect");
                Ok((MutationResult::Noop { reason }, None))
            }
        }
    }

    /// Recolor the document with a catalog theme
    pub fn apply_theme(&mut self, theme_id: &str) -> Result<(), EditorError> {
        let theme = find_theme(theme_id).ok_or_else(|| EditorError::UnknownTheme(theme_id.to_string()))?;
        self.document.apply_theme(&theme);
        self.version += 1;
        tracing::debug!(theme = theme_id, version = self.version, "theme applied");
        Ok(())
    }

    /// Immutable serialized copy of the current state
    pub fn snapshot(&self) -> Result<Snapshot, EditorError> {
        Ok(Snapshot {
            document_id: self.document.id.clone(),
            slug: self.document.slug.clone(),
            version: self.version,
            taken_at: Utc::now(),
            document: self.document.to_value()?,
        })
    }

    /// Record that `version` has been persisted
    pub fn mark_saved(&mut self, version: u64) {
        self.saved_version = self.saved_version.max(version);
    }

    /// Check if document has unsaved changes
    pub fn is_dirty(&self) -> bool {
        self.version != self.saved_version
    }

    /// Write back to the file this document was loaded from
    pub fn save_to_disk(&mut self) -> Result<(), EditorError> {
        let DocumentStorage::File { path } = &self.storage else {
            return Err(EditorError::NotFileBacked);
        };

        std::fs::write(path, self.document.to_json_pretty()?)?;
        tracing::info!(path = %path.display(), version = self.version, "document written");
        self.saved_version = self.version;
        Ok(())
    }
}
