//! In-memory backend that records every request.

use pagecraft_editor::{PersistenceError, PersistenceGateway, PublishReceipt, SaveReceipt, Snapshot};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;

/// A request received by [`MemoryGateway`]
#[derive(Debug, Clone, PartialEq)]
pub enum Request {
    Save(Snapshot),
    Publish(Snapshot),
}

#[derive(Default)]
pub struct MemoryGateway {
    requests: Mutex<Vec<Request>>,
    fail: AtomicBool,
}

impl MemoryGateway {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every following request fail with a network error
    pub fn set_failing(&self, fail: bool) {
        self.fail.store(fail, Ordering::SeqCst);
    }

    pub fn requests(&self) -> Vec<Request> {
        self.requests.lock().map(|requests| requests.clone()).unwrap_or_default()
    }

    /// Most recently saved snapshot
    pub fn last_saved(&self) -> Option<Snapshot> {
        self.requests().into_iter().rev().find_map(|request| match request {
            Request::Save(snapshot) => Some(snapshot),
            Request::Publish(_) => None,
        })
    }

    fn record(&self, request: Request) -> Result<(), PersistenceError> {
        if self.fail.load(Ordering::SeqCst) {
            return Err(PersistenceError::Network("memory gateway set to fail".to_string()));
        }

        self.requests
            .lock()
            .map_err(|_| PersistenceError::Network("memory gateway poisoned".to_string()))?
            .push(request);
        Ok(())
    }
}

impl PersistenceGateway for MemoryGateway {
    fn save(&self, snapshot: &Snapshot) -> Result<SaveReceipt, PersistenceError> {
        self.record(Request::Save(snapshot.clone()))?;
        Ok(SaveReceipt {
            location: Some(format!("memory://{}", snapshot.document_id)),
        })
    }

    fn publish(&self, snapshot: &Snapshot) -> Result<PublishReceipt, PersistenceError> {
        self.record(Request::Publish(snapshot.clone()))?;
        Ok(PublishReceipt {
            url: Some(format!("memory://published/{}", snapshot.slug)),
        })
    }
}
