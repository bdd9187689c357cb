//! # Edit Session Management
//!
//! One user's editing session over a document: the document handle, the
//! current selection and the undo history, plus save/publish through a
//! [`PersistenceGateway`].

use crate::gateway::{PersistenceGateway, PublishReceipt, SaveReceipt};
use crate::selection::Selection;
use crate::{DocumentHandle, EditorError, Mutation, MutationResult, UndoStack};
use pagecraft_document::{Document, Node};

/// Single-user edit session
pub struct EditSession {
    /// Unique session identifier
    pub id: String,

    handle: DocumentHandle,

    selection: Selection,

    history: UndoStack,
}

impl EditSession {
    /// Create new edit session
    pub fn new(id: impl Into<String>, handle: DocumentHandle) -> Self {
        Self {
            id: id.into(),
            handle,
            selection: Selection::new(),
            history: UndoStack::new(),
        }
    }

    /// Limit the undo history (0 = unlimited)
    pub fn with_undo_levels(mut self, levels: usize) -> Self {
        self.history = UndoStack::with_max_levels(levels);
        self
    }

    pub fn handle(&self) -> &DocumentHandle {
        &self.handle
    }

    pub fn document(&self) -> &Document {
        self.handle.document()
    }

    pub fn history(&self) -> &UndoStack {
        &self.history
    }

    pub fn history_mut(&mut self) -> &mut UndoStack {
        &mut self.history
    }

    /// Apply a mutation with undo support.
    ///
    /// Newly added nodes become the selection; a selection whose node was
    /// removed is cleared.
    pub fn apply(&mut self, mutation: Mutation) -> Result<MutationResult, EditorError> {
        let result = self.history.apply(&mutation, &mut self.handle)?;

        if let (Mutation::AddElement { .. }, Some(created)) = (&mutation, result.created()) {
            self.selection.select(created);
        }
        self.selection.revalidate(self.handle.document());

        Ok(result)
    }

    pub fn undo(&mut self) -> Result<bool, EditorError> {
        let undone = self.history.undo(&mut self.handle)?;
        self.selection.revalidate(self.handle.document());
        Ok(undone)
    }

    pub fn redo(&mut self) -> Result<bool, EditorError> {
        let redone = self.history.redo(&mut self.handle)?;
        self.selection.revalidate(self.handle.document());
        Ok(redone)
    }

    /// Select a node by id. Returns `false` (and leaves the selection
    /// unchanged) if no such node exists.
    pub fn select(&mut self, id: &str) -> bool {
        if !self.handle.document().contains(id) {
            return false;
        }
        self.selection.select(id);
        true
    }

    pub fn clear_selection(&mut self) {
        self.selection.clear();
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    /// The selected node, if it still exists
    pub fn selected(&self) -> Option<&Node> {
        self.selection.current(self.handle.document())
    }

    /// Switch the document theme (not recorded in undo history)
    pub fn apply_theme(&mut self, theme_id: &str) -> Result<(), EditorError> {
        self.handle.apply_theme(theme_id)
    }

    /// Save the current document through `gateway`.
    ///
    /// The document is never modified; on success it is marked clean up to
    /// the saved version.
    pub fn save(&mut self, gateway: &dyn PersistenceGateway) -> Result<SaveReceipt, EditorError> {
        let snapshot = self.handle.snapshot()?;
        let receipt = gateway.save(&snapshot).map_err(|err| {
            tracing::warn!(session = %self.id, error = %err, "save failed");
            err
        })?;

        self.handle.mark_saved(snapshot.version);
        tracing::info!(session = %self.id, version = snapshot.version, "document saved");
        Ok(receipt)
    }

    /// Publish the current document through `gateway`
    pub fn publish(&mut self, gateway: &dyn PersistenceGateway) -> Result<PublishReceipt, EditorError> {
        let snapshot = self.handle.snapshot()?;
        let receipt = gateway.publish(&snapshot).map_err(|err| {
            tracing::warn!(session = %self.id, error = %err, "publish failed");
            err
        })?;

        tracing::info!(session = %self.id, version = snapshot.version, url = ?receipt.url, "document published");
        Ok(receipt)
    }

    pub fn is_dirty(&self) -> bool {
        self.handle.is_dirty()
    }

    /// Give back the document handle, dropping session state
    pub fn into_handle(self) -> DocumentHandle {
        self.handle
    }
}
