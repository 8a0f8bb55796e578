//! Per-contact ledger of message fetches in flight.

use std::collections::HashSet;
use std::sync::{Mutex, PoisonError};

#[derive(Debug, Default)]
pub struct PendingRequests {
    ids: Mutex<HashSet<String>>,
}

impl PendingRequests {
    pub fn new() -> Self {
        Self::default()
    }

    /// Marks `id` as pending.
    ///
    /// Returns `None` if a request for `id` is already pending. The entry is
    /// removed when the returned guard is dropped.
    pub fn try_begin(&self, id: &str) -> Option<PendingGuard<'_>> {
        let inserted = self.lock().insert(id.to_string());
        inserted.then(|| PendingGuard {
            ledger: self,
            id: id.to_string(),
        })
    }

    pub fn is_pending(&self, id: &str) -> bool {
        self.lock().contains(id)
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, HashSet<String>> {
        self.ids.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[must_use = "the ledger entry is released when the guard is dropped"]
pub struct PendingGuard<'a> {
    ledger: &'a PendingRequests,
    id: String,
}

impl PendingGuard<'_> {
    pub fn id(&self) -> &str {
        &self.id
    }
}

impl Drop for PendingGuard<'_> {
    fn drop(&mut self) {
        self.ledger.lock().remove(&self.id);
    }
}
