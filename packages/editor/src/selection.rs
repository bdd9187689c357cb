//! Currently selected element.
//!
//! The selection stores an id only. It never holds a reference into the
//! document, so it can go stale; [`Selection::revalidate`] drops it once
//! the node is gone.

use pagecraft_document::{Document, Node};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Selection {
    selected: Option<String>,
}

impl Selection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn select(&mut self, id: impl Into<String>) {
        self.selected = Some(id.into());
    }

    pub fn clear(&mut self) {
        self.selected = None;
    }

    pub fn id(&self) -> Option<&str> {
        self.selected.as_deref()
    }

    pub fn is_empty(&self) -> bool {
        self.selected.is_none()
    }

    /// Resolve the selected id against `doc`
    pub fn current<'a>(&self, doc: &'a Document) -> Option<&'a Node> {
        doc.find(self.selected.as_deref()?)
    }

    /// Clear the selection if its node no longer exists.
    /// Returns `true` when the selection was dropped.
    pub fn revalidate(&mut self, doc: &Document) -> bool {
        match &self.selected {
            Some(id) if !doc.contains(id) => {
                self.selected = None;
                true
            }
            _ => false,
        }
    }
}
