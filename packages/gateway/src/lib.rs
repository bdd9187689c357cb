//! # Pagecraft Gateway
//!
//! [`PersistenceGateway`] backends for saving and publishing page documents.
//!
//! - [`HttpGateway`]: page-builder REST API with bearer auth
//! - [`FileGateway`]: JSON files in a local directory
//! - [`MemoryGateway`]: records requests, for tests and dry runs

mod file;
mod http;
mod memory;

pub use file::FileGateway;
pub use http::HttpGateway;
pub use memory::{MemoryGateway, Request};

pub use pagecraft_editor::{PersistenceError, PersistenceGateway, PublishReceipt, SaveReceipt, Snapshot};
