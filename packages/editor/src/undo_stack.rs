//! # Undo/Redo Stack
//!
//! Tracks mutation history and enables undo/redo operations.
//!
//! ## Design
//!
//! - Each effective mutation is recorded with its replay form and inverse
//! - Undo applies the inverses and moves the batch to the redo stack
//! - Redo reapplies the replay forms, so regenerated ids match the originals
//! - New mutations clear the redo stack
//! - Supports batched operations (group multiple mutations as one undo step)
//! - A batch whose replay fails part way is rolled back and stays on its stack
//!
//! ## Example
//!
//! ```rust
//! use pagecraft_document::Registry;
//! use pagecraft_editor::{DocumentHandle, Mutation, UndoStack};
//!
//! let mut doc = DocumentHandle::new(Registry::page());
//! let mut stack = UndoStack::new();
//!
//! let add = Mutation::AddElement { element_type: "heading".into(), parent_id: None };
//! stack.apply(&add, &mut doc)?;
//! assert_eq!(doc.document().elements().len(), 1);
//!
//! stack.undo(&mut doc)?;
//! assert!(doc.document().is_empty());
//!
//! stack.redo(&mut doc)?;
//! assert_eq!(doc.document().elements().len(), 1);
//! # Ok::<(), pagecraft_editor::EditorError>(())
//! ```

use crate::mutations::Change;
use crate::{DocumentHandle, EditorError, Mutation, MutationResult};

/// Default number of undo levels kept
pub const DEFAULT_UNDO_LEVELS: usize = 100;

/// A group of mutations that should be undone/redone together
#[derive(Debug, Clone, PartialEq)]
pub struct MutationBatch {
    /// Replayable mutations (in application order)
    pub mutations: Vec<Mutation>,

    /// The inverse mutations (in reverse order for undo)
    pub inverses: Vec<Mutation>,

    /// Optional description of this batch
    pub description: Option<String>,
}

impl MutationBatch {
    fn empty() -> Self {
        Self {
            mutations: Vec::new(),
            inverses: Vec::new(),
            description: None,
        }
    }

    /// Add a description
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    fn record(&mut self, change: Change) {
        self.mutations.push(change.replay);
        self.inverses.insert(0, change.inverse);
    }
}

/// Undo/redo stack for document editing
#[derive(Debug)]
pub struct UndoStack {
    /// Stack of applied mutations (most recent last)
    undo_stack: Vec<MutationBatch>,

    /// Stack of undone mutations (most recent last)
    redo_stack: Vec<MutationBatch>,

    /// Maximum number of undo levels (0 = unlimited)
    max_levels: usize,

    /// Currently building a batch
    current_batch: Option<MutationBatch>,
}

impl UndoStack {
    /// Create a new undo stack with default max levels (100)
    pub fn new() -> Self {
        Self::with_max_levels(DEFAULT_UNDO_LEVELS)
    }

    /// Create an undo stack with custom max levels
    pub fn with_max_levels(max_levels: usize) -> Self {
        Self {
            undo_stack: Vec::new(),
            redo_stack: Vec::new(),
            max_levels,
            current_batch: None,
        }
    }

    /// Apply a mutation and record it for undo. Noops are not recorded.
    pub fn apply(&mut self, mutation: &Mutation, doc: &mut DocumentHandle) -> Result<MutationResult, EditorError> {
        let (result, change) = doc.apply_recorded(mutation)?;

        if let Some(change) = change {
            if let Some(batch) = &mut self.current_batch {
                batch.record(change);
            } else {
                let mut batch = MutationBatch::empty();
                batch.record(change);
                self.push_batch(batch.with_description(mutation.name()));
            }
        }

        Ok(result)
    }

    /// Start a batch of mutations (will be undone/redone together)
    pub fn begin_batch(&mut self) {
        self.current_batch = Some(MutationBatch::empty());
    }

    /// End the current batch and push to undo stack
    pub fn end_batch(&mut self) {
        if let Some(batch) = self.current_batch.take() {
            if !batch.mutations.is_empty() {
                self.push_batch(batch);
            }
        }
    }

    /// Set description for current batch (if batching)
    pub fn set_batch_description(&mut self, description: impl Into<String>) {
        if let Some(batch) = &mut self.current_batch {
            batch.description = Some(description.into());
        }
    }

    /// Push a batch to the undo stack
    fn push_batch(&mut self, batch: MutationBatch) {
        self.undo_stack.push(batch);

        // Trim if exceeded max levels
        if self.max_levels > 0 && self.undo_stack.len() > self.max_levels {
            self.undo_stack.remove(0);
        }

        // New action invalidates future
        self.redo_stack.clear();
    }

    /// Undo the most recent mutation/batch
    pub fn undo(&mut self, doc: &mut DocumentHandle) -> Result<bool, EditorError> {
        if self.current_batch.is_some() {
            return Err(EditorError::BatchOpen);
        }
        let Some(batch) = self.undo_stack.pop() else {
            return Ok(false);
        };

        if let Err(err) = replay(doc, &batch.inverses, &batch.mutations) {
            self.undo_stack.push(batch);
            return Err(err);
        }
        tracing::debug!(description = ?batch.description, "undo");

        self.redo_stack.push(batch);
        Ok(true)
    }

    /// Redo the most recently undone mutation/batch
    pub fn redo(&mut self, doc: &mut DocumentHandle) -> Result<bool, EditorError> {
        if self.current_batch.is_some() {
            return Err(EditorError::BatchOpen);
        }
        let Some(batch) = self.redo_stack.pop() else {
            return Ok(false);
        };

        if let Err(err) = replay(doc, &batch.mutations, &batch.inverses) {
            self.redo_stack.push(batch);
            return Err(err);
        }
        tracing::debug!(description = ?batch.description, "redo");

        self.undo_stack.push(batch);
        Ok(true)
    }

    /// Check if undo is available
    pub fn can_undo(&self) -> bool {
        !self.undo_stack.is_empty()
    }

    /// Check if redo is available
    pub fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }

    /// Get the number of undo levels available
    pub fn undo_levels(&self) -> usize {
        self.undo_stack.len()
    }

    /// Get the number of redo levels available
    pub fn redo_levels(&self) -> usize {
        self.redo_stack.len()
    }

    /// Clear all undo/redo history
    pub fn clear(&mut self) {
        self.undo_stack.clear();
        self.redo_stack.clear();
        self.current_batch = None;
    }

    /// Get description of the next undo operation
    pub fn undo_description(&self) -> Option<&str> {
        self.undo_stack.last().and_then(|batch| batch.description.as_deref())
    }

    /// Get description of the next redo operation
    pub fn redo_description(&self) -> Option<&str> {
        self.redo_stack.last().and_then(|batch| batch.description.as_deref())
    }
}

/// Apply `steps` in order. On failure, revert the steps already applied
/// using `reverts`, which lists the counterpart of `steps[i]` at
/// `reverts[len - 1 - i]`.
fn replay(doc: &mut DocumentHandle, steps: &[Mutation], reverts: &[Mutation]) -> Result<(), EditorError> {
    for (applied, step) in steps.iter().enumerate() {
        if let Err(err) = doc.apply_recorded(step) {
            let start = reverts.len() - applied;
            for revert in &reverts[start..] {
                if let Err(rollback) = doc.apply_recorded(revert) {
                    tracing::error!(error = %rollback, "rollback failed");
                }
            }
            return Err(err);
        }
    }
    Ok(())
}

impl Default for UndoStack {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pagecraft_document::{ElementPatch, IdGenerator, Registry};

    fn handle() -> DocumentHandle {
        DocumentHandle::new(Registry::page()).with_ids(IdGenerator::from_seed(1))
    }

    fn add(stack: &mut UndoStack, doc: &mut DocumentHandle, element_type: &str, parent: Option<&str>) -> String {
        let mutation = Mutation::AddElement {
            element_type: element_type.to_string(),
            parent_id: parent.map(str::to_string),
        };
        stack.apply(&mutation, doc).unwrap().created().unwrap().to_string()
    }

    #[test]
    fn test_undo_stack_creation() {
        let stack = UndoStack::new();
        assert_eq!(stack.undo_levels(), 0);
        assert_eq!(stack.redo_levels(), 0);
        assert!(!stack.can_undo());
        assert!(!stack.can_redo());
    }

    #[test]
    fn test_apply_and_undo_update() {
        let mut doc = handle();
        let mut stack = UndoStack::new();
        let heading = add(&mut stack, &mut doc, "heading", None);

        let mutation = Mutation::UpdateElement {
            node_id: heading.clone(),
            patch: ElementPatch::name("Hero title"),
        };
        stack.apply(&mutation, &mut doc).unwrap();

        assert_eq!(stack.undo_levels(), 2);
        assert_eq!(stack.undo_description(), Some("UpdateElement"));

        assert!(stack.undo(&mut doc).unwrap());
        assert_eq!(doc.document().find(&heading).unwrap().name(), "Heading");
        assert_eq!(stack.redo_levels(), 1);

        assert!(stack.redo(&mut doc).unwrap());
        assert_eq!(doc.document().find(&heading).unwrap().name(), "Hero title");
        assert_eq!(stack.undo_levels(), 2);
        assert_eq!(stack.redo_levels(), 0);
    }

    #[test]
    fn test_redo_restores_same_ids() {
        let mut doc = handle();
        let mut stack = UndoStack::new();
        let container = add(&mut stack, &mut doc, "container", None);
        add(&mut stack, &mut doc, "button", Some(&container));

        let copy = stack
            .apply(
                &Mutation::DuplicateElement {
                    node_id: container.clone(),
                },
                &mut doc,
            )
            .unwrap()
            .created()
            .unwrap()
            .to_string();
        let after = doc.document().clone();

        stack.undo(&mut doc).unwrap();
        assert!(!doc.document().contains(&copy));

        stack.redo(&mut doc).unwrap();
        assert_eq!(doc.document(), &after);
    }

    #[test]
    fn test_undo_delete_restores_position() {
        let mut doc = handle();
        let mut stack = UndoStack::new();
        let column = add(&mut stack, &mut doc, "column", None);
        add(&mut stack, &mut doc, "heading", Some(&column));
        let middle = add(&mut stack, &mut doc, "paragraph", Some(&column));
        add(&mut stack, &mut doc, "button", Some(&column));
        let before = doc.document().clone();

        stack
            .apply(&Mutation::DeleteElement { node_id: middle }, &mut doc)
            .unwrap();
        stack.undo(&mut doc).unwrap();

        assert_eq!(doc.document(), &before);
    }

    #[test]
    fn test_noops_are_not_recorded() {
        let mut doc = handle();
        let mut stack = UndoStack::new();

        let result = stack
            .apply(
                &Mutation::DeleteElement {
                    node_id: "ghost".to_string(),
                },
                &mut doc,
            )
            .unwrap();

        assert!(!result.is_applied());
        assert!(!stack.can_undo());
    }

    #[test]
    fn test_batched_mutations() {
        let mut doc = handle();
        let mut stack = UndoStack::new();

        stack.begin_batch();
        stack.set_batch_description("Add hero");
        let section = add(&mut stack, &mut doc, "section", None);
        add(&mut stack, &mut doc, "heading", Some(&section));
        add(&mut stack, &mut doc, "button", Some(&section));
        stack.end_batch();

        assert_eq!(stack.undo_levels(), 1);
        assert_eq!(stack.undo_description(), Some("Add hero"));

        stack.undo(&mut doc).unwrap();
        assert!(doc.document().is_empty());

        stack.redo(&mut doc).unwrap();
        assert_eq!(doc.document().node_count(), 3);
    }

    #[test]
    fn test_undo_refused_while_batch_open() {
        let mut doc = handle();
        let mut stack = UndoStack::new();
        add(&mut stack, &mut doc, "heading", None);

        stack.begin_batch();
        add(&mut stack, &mut doc, "paragraph", None);

        assert!(matches!(stack.undo(&mut doc), Err(EditorError::BatchOpen)));
        assert!(matches!(stack.redo(&mut doc), Err(EditorError::BatchOpen)));
        assert_eq!(doc.document().node_count(), 2);

        stack.end_batch();
        assert!(stack.undo(&mut doc).unwrap());
        assert_eq!(doc.document().node_count(), 1);
    }

    #[test]
    fn test_failed_redo_rolls_back_and_keeps_batch() {
        let mut doc = handle();
        let mut stack = UndoStack::new();

        stack.begin_batch();
        add(&mut stack, &mut doc, "container", None);
        let heading = add(&mut stack, &mut doc, "heading", None);
        stack.end_batch();
        let heading_node = doc.document().find(&heading).unwrap().clone();

        stack.undo(&mut doc).unwrap();

        // Outside the history, take the id the batch's second step needs
        doc.apply(&Mutation::InsertNode {
            parent_id: None,
            index: 0,
            node: heading_node,
        })
        .unwrap();
        let before = doc.document().clone();

        let err = stack.redo(&mut doc).unwrap_err();

        assert!(matches!(err, EditorError::Mutation(_)));
        assert_eq!(doc.document(), &before);
        assert_eq!(stack.redo_levels(), 1);
        assert_eq!(stack.undo_levels(), 0);
    }

    #[test]
    fn test_new_mutation_clears_redo() {
        let mut doc = handle();
        let mut stack = UndoStack::new();

        add(&mut stack, &mut doc, "spacer", None);
        stack.undo(&mut doc).unwrap();
        assert_eq!(stack.redo_levels(), 1);

        add(&mut stack, &mut doc, "divider", None);
        assert_eq!(stack.redo_levels(), 0);
    }

    #[test]
    fn test_max_levels_enforced() {
        let mut doc = handle();
        let mut stack = UndoStack::with_max_levels(2);

        for _ in 0..3 {
            add(&mut stack, &mut doc, "paragraph", None);
        }

        assert_eq!(stack.undo_levels(), 2);
    }
}
