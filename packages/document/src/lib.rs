//! # Pagecraft Document
//!
//! Document model for visually composed pages and storefronts.
//!
//! ```text
//! Registry ──template──▶ Node ──owned by──▶ Document.elements (ordered forest)
//!                                   │
//!                                   └── children (only for container types)
//! ```
//!
//! A [`Document`] is plain data: it serializes to JSON as-is and node
//! parents are recorded as id strings, never pointers.
//!
//! ## Usage
//!
//! ```rust
//! use pagecraft_document::{Document, IdGenerator, Registry};
//!
//! let registry = Registry::page();
//! let mut doc = Document::new();
//! let mut ids = IdGenerator::new();
//!
//! let container = doc.add_element(registry.lookup("container").unwrap(), None, &mut ids)?;
//! let button = doc.add_element(registry.lookup("button").unwrap(), Some(&container), &mut ids)?;
//!
//! assert_eq!(doc.elements().len(), 1);
//! assert_eq!(doc.find(&button).unwrap().parent_id(), Some(container.as_str()));
//! # Ok::<(), pagecraft_document::TreeError>(())
//! ```

mod document;
mod error;
mod id_generator;
mod node;
mod registry;
mod theme;
mod tree;
mod validate;

pub use document::{Document, Fonts, GlobalStyles, Seo, Spacing, ThemeColors};
pub use error::TreeError;
pub use id_generator::IdGenerator;
pub use node::{ElementPatch, Node, Payload};
pub use registry::{Registry, RegistryEntry};
pub use theme::{find_theme, page_themes, store_themes, Theme};
pub use tree::Nodes;
pub use validate::Violation;

/// Serialize a document to a JSON value
pub fn serialize(doc: &Document) -> Result<serde_json::Value, serde_json::Error> {
    doc.to_value()
}

/// Rebuild a document from a JSON value
pub fn deserialize(value: serde_json::Value) -> Result<Document, serde_json::Error> {
    Document::from_value(value)
}
