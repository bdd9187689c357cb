//! # Persistence Gateway
//!
//! Seam between the editor and wherever documents are stored or published.
//!
//! The editor hands a gateway an immutable [`Snapshot`] of the serialized
//! document. Implementations live outside this crate (HTTP, filesystem,
//! in-memory for tests).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use thiserror::Error;

/// Serialized document at a specific version
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Snapshot {
    pub document_id: String,
    pub slug: String,
    pub version: u64,
    pub taken_at: DateTime<Utc>,

    /// Full document JSON (metadata plus `elements`)
    pub document: Value,
}

impl Snapshot {
    /// Request body for publishing: `{ "pageId": ..., "config": ... }`
    pub fn publish_body(&self) -> Value {
        json!({
            "pageId": self.document_id,
            "config": self.document,
        })
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SaveReceipt {
    /// Where the document ended up, when the backend reports it
    pub location: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PublishReceipt {
    /// Public URL of the published page
    pub url: Option<String>,
}

#[derive(Error, Debug)]
pub enum PersistenceError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("Request rejected with status {status}: {body}")]
    Rejected { status: u16, body: String },

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Storage backend for saving and publishing documents
pub trait PersistenceGateway {
    fn save(&self, snapshot: &Snapshot) -> Result<SaveReceipt, PersistenceError>;

    fn publish(&self, snapshot: &Snapshot) -> Result<PublishReceipt, PersistenceError>;
}

impl<G: PersistenceGateway + ?Sized> PersistenceGateway for Box<G> {
    fn save(&self, snapshot: &Snapshot) -> Result<SaveReceipt, PersistenceError> {
        (**self).save(snapshot)
    }

    fn publish(&self, snapshot: &Snapshot) -> Result<PublishReceipt, PersistenceError> {
        (**self).publish(snapshot)
    }
}
