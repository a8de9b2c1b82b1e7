//! Backend client boundary
//!
//! The core depends on exactly four operations: subscribe, insert,
//! update, remove. Tenant scoping is part of the contract; nothing
//! here knows about the backend's schema language or access control.

use async_trait::async_trait;
use sd_core::{DataRow, RowId};
use tokio::sync::mpsc;

use crate::DataError;

/// A change emitted by the backend for a live collection.
///
/// `revision` increases monotonically per collection; the store uses
/// it to discard payloads older than a locally-confirmed mutation.
#[derive(Debug, Clone)]
pub enum ChangeEvent {
    Upsert { row: DataRow, revision: u64 },
    Remove { row_id: RowId, revision: u64 },
}

impl ChangeEvent {
    pub fn revision(&self) -> u64 {
        match self {
            ChangeEvent::Upsert { revision, .. } | ChangeEvent::Remove { revision, .. } => *revision,
        }
    }

    pub fn row_id(&self) -> Option<&str> {
        match self {
            ChangeEvent::Upsert { row, .. } => row.id(),
            ChangeEvent::Remove { row_id, .. } => Some(row_id),
        }
    }
}

/// A mutation acknowledged by the backend: the persisted row plus the
/// revision it was committed at.
#[derive(Debug, Clone)]
pub struct Committed {
    pub row: DataRow,
    pub revision: u64,
}

/// Releases the backend channel when the owning view goes away.
///
/// Fires on every exit path via `Drop`; releasing twice is a no-op.
pub struct SubscriptionGuard {
    release: Option<Box<dyn FnOnce() + Send>>,
}

impl SubscriptionGuard {
    pub fn new(release: impl FnOnce() + Send + 'static) -> Self {
        Self {
            release: Some(Box::new(release)),
        }
    }

    /// Explicit release; subsequent calls do nothing.
    pub fn release(&mut self) {
        if let Some(release) = self.release.take() {
            release();
        }
    }
}

impl Drop for SubscriptionGuard {
    fn drop(&mut self) {
        self.release();
    }
}

/// A live view of one collection, scoped to one workspace.
pub struct Subscription {
    /// Snapshot at subscribe time, already tenant-filtered.
    pub initial: Vec<DataRow>,
    /// Collection revision the snapshot was taken at.
    pub revision: u64,
    /// Changes after the snapshot, in backend emission order.
    pub changes: mpsc::UnboundedReceiver<ChangeEvent>,
    pub guard: SubscriptionGuard,
}

/// External collaborator providing tenant-scoped collection access.
#[async_trait]
pub trait BackendClient: Send + Sync {
    /// Open a live subscription filtered to one workspace. The channel
    /// resource is held until the returned guard releases it.
    async fn subscribe(&self, collection: &str, workspace_id: &str)
        -> Result<Subscription, DataError>;

    /// Persist a new row; the backend assigns the id. Resolves with the
    /// persisted row.
    async fn insert(&self, collection: &str, row: DataRow) -> Result<Committed, DataError>;

    /// Partial update; last-write-wins at the backend.
    async fn update(&self, collection: &str, id: &str, patch: DataRow)
        -> Result<Committed, DataError>;

    /// Delete a row; returns the revision the delete committed at.
    async fn remove(&self, collection: &str, id: &str) -> Result<u64, DataError>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    #[test]
    fn guard_releases_exactly_once() {
        let count = Arc::new(AtomicUsize::new(0));
        let counted = Arc::clone(&count);
        let mut guard = SubscriptionGuard::new(move || {
            counted.fetch_add(1, Ordering::SeqCst);
        });
        guard.release();
        guard.release();
        drop(guard);
        assert_eq!(count.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn guard_releases_on_drop() {
        let count = Arc::new(AtomicUsize::new(0));
        let counted = Arc::clone(&count);
        drop(SubscriptionGuard::new(move || {
            counted.fetch_add(1, Ordering::SeqCst);
        }));
        assert_eq!(count.load(Ordering::SeqCst), 1);
    }
}
