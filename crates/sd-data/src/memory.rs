//! In-memory backend
//!
//! Backs the demo workspace and doubles as the test double for the
//! live store and the page shell. Revisions increase monotonically per
//! collection; change events are fanned out only to subscribers of the
//! matching workspace.

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;

use ahash::AHashMap;
use async_trait::async_trait;
use indexmap::IndexMap;
use parking_lot::RwLock;
use sd_core::{DataRow, RowId};
use tokio::sync::mpsc;
use tracing::debug;
use uuid::Uuid;

use crate::client::{BackendClient, ChangeEvent, Committed, Subscription, SubscriptionGuard};
use crate::DataError;

#[derive(Default)]
struct Collection {
    rows: IndexMap<RowId, DataRow>,
    revision: u64,
}

struct Subscriber {
    collection: String,
    workspace_id: String,
    sender: mpsc::UnboundedSender<ChangeEvent>,
}

#[derive(Default)]
struct Inner {
    collections: AHashMap<String, Collection>,
    subscribers: AHashMap<u64, Subscriber>,
    next_subscriber: u64,
}

impl Inner {
    fn broadcast(&self, collection: &str, workspace_id: &str, event: ChangeEvent) {
        for subscriber in self.subscribers.values() {
            if subscriber.collection == collection && subscriber.workspace_id == workspace_id {
                let _ = subscriber.sender.send(event.clone());
            }
        }
    }
}

/// A complete backend living in process memory.
#[derive(Default)]
pub struct InMemoryBackend {
    inner: Arc<RwLock<Inner>>,
    subscribe_calls: AtomicUsize,
    fail_mutations: AtomicBool,
    fail_subscriptions: AtomicBool,
}

impl InMemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load rows without broadcasting; used for startup seeding. Rows
    /// must carry `id` and `workspace_id` already.
    pub fn seed(&self, collection: &str, rows: Vec<DataRow>) {
        let mut inner = self.inner.write();
        let coll = inner.collections.entry(collection.to_owned()).or_default();
        for row in rows {
            coll.revision += 1;
            if let Some(id) = row.id() {
                coll.rows.insert(id.to_owned(), row);
            }
        }
    }

    /// Number of `subscribe` calls ever made, regardless of outcome.
    pub fn subscribe_calls(&self) -> usize {
        self.subscribe_calls.load(Ordering::SeqCst)
    }

    /// Number of currently open subscriptions.
    pub fn subscriber_count(&self) -> usize {
        self.inner.read().subscribers.len()
    }

    /// Make every subsequent mutation fail, for rollback testing.
    pub fn set_failing(&self, failing: bool) {
        self.fail_mutations.store(failing, Ordering::SeqCst);
    }

    /// Make every subsequent subscribe fail.
    pub fn set_subscriptions_failing(&self, failing: bool) {
        self.fail_subscriptions.store(failing, Ordering::SeqCst);
    }

    fn mutation_guard(&self, collection: &str) -> Result<(), DataError> {
        if self.fail_mutations.load(Ordering::SeqCst) {
            Err(DataError::Mutation {
                collection: collection.to_owned(),
                reason: "backend rejected the write".to_owned(),
            })
        } else {
            Ok(())
        }
    }
}

#[async_trait]
impl BackendClient for InMemoryBackend {
    async fn subscribe(
        &self,
        collection: &str,
        workspace_id: &str,
    ) -> Result<Subscription, DataError> {
        self.subscribe_calls.fetch_add(1, Ordering::SeqCst);

        if self.fail_subscriptions.load(Ordering::SeqCst) {
            return Err(DataError::Subscription {
                collection: collection.to_owned(),
                reason: "channel unavailable".to_owned(),
            });
        }

        let mut inner = self.inner.write();
        let (initial, revision) = match inner.collections.get(collection) {
            Some(coll) => (
                coll.rows
                    .values()
                    .filter(|row| row.workspace_id() == Some(workspace_id))
                    .cloned()
                    .collect(),
                coll.revision,
            ),
            None => (Vec::new(), 0),
        };

        let (sender, changes) = mpsc::unbounded_channel();
        let subscriber_id = inner.next_subscriber;
        inner.next_subscriber += 1;
        inner.subscribers.insert(
            subscriber_id,
            Subscriber {
                collection: collection.to_owned(),
                workspace_id: workspace_id.to_owned(),
                sender,
            },
        );
        debug!(collection, workspace_id, subscriber_id, "subscription opened");

        let guard = {
            let inner = Arc::clone(&self.inner);
            SubscriptionGuard::new(move || {
                inner.write().subscribers.remove(&subscriber_id);
                debug!(subscriber_id, "subscription released");
            })
        };

        Ok(Subscription {
            initial,
            revision,
            changes,
            guard,
        })
    }

    async fn insert(&self, collection: &str, mut row: DataRow) -> Result<Committed, DataError> {
        self.mutation_guard(collection)?;

        let workspace_id = row
            .workspace_id()
            .map(str::to_owned)
            .ok_or_else(|| DataError::Mutation {
                collection: collection.to_owned(),
                reason: "row has no workspace_id".to_owned(),
            })?;

        if row.id().is_none() {
            row.set_id(Uuid::new_v4().to_string());
        }
        let id = row.id().unwrap_or_default().to_owned();

        let mut inner = self.inner.write();
        let coll = inner.collections.entry(collection.to_owned()).or_default();
        coll.revision += 1;
        let revision = coll.revision;
        coll.rows.insert(id, row.clone());

        inner.broadcast(
            collection,
            &workspace_id,
            ChangeEvent::Upsert {
                row: row.clone(),
                revision,
            },
        );

        Ok(Committed { row, revision })
    }

    async fn update(
        &self,
        collection: &str,
        id: &str,
        patch: DataRow,
    ) -> Result<Committed, DataError> {
        self.mutation_guard(collection)?;

        let mut inner = self.inner.write();
        let coll = inner
            .collections
            .get_mut(collection)
            .ok_or_else(|| DataError::RowNotFound(id.to_owned()))?;
        let row = coll
            .rows
            .get_mut(id)
            .ok_or_else(|| DataError::RowNotFound(id.to_owned()))?;

        row.merge_patch(&patch);
        let row = row.clone();
        coll.revision += 1;
        let revision = coll.revision;

        let workspace_id = row.workspace_id().unwrap_or_default().to_owned();
        inner.broadcast(
            collection,
            &workspace_id,
            ChangeEvent::Upsert {
                row: row.clone(),
                revision,
            },
        );

        Ok(Committed { row, revision })
    }

    async fn remove(&self, collection: &str, id: &str) -> Result<u64, DataError> {
        self.mutation_guard(collection)?;

        let mut inner = self.inner.write();
        let coll = inner
            .collections
            .get_mut(collection)
            .ok_or_else(|| DataError::RowNotFound(id.to_owned()))?;
        let row = coll
            .rows
            .shift_remove(id)
            .ok_or_else(|| DataError::RowNotFound(id.to_owned()))?;

        coll.revision += 1;
        let revision = coll.revision;

        let workspace_id = row.workspace_id().unwrap_or_default().to_owned();
        inner.broadcast(
            collection,
            &workspace_id,
            ChangeEvent::Remove {
                row_id: id.to_owned(),
                revision,
            },
        );

        Ok(revision)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn row(value: serde_json::Value) -> DataRow {
        DataRow::from_value(value).unwrap()
    }

    #[tokio::test]
    async fn insert_assigns_id_and_bumps_revision() {
        let backend = InMemoryBackend::new();
        let first = backend
            .insert("assets", row(json!({"workspace_id": "w1", "name": "PA rig"})))
            .await
            .unwrap();
        let second = backend
            .insert("assets", row(json!({"workspace_id": "w1", "name": "Truss"})))
            .await
            .unwrap();

        assert!(first.row.id().is_some());
        assert!(second.revision > first.revision);
    }

    #[tokio::test]
    async fn insert_without_workspace_is_rejected() {
        let backend = InMemoryBackend::new();
        let result = backend.insert("assets", row(json!({"name": "PA rig"}))).await;
        assert!(matches!(result, Err(DataError::Mutation { .. })));
    }

    #[tokio::test]
    async fn events_fan_out_only_to_matching_workspace() {
        let backend = InMemoryBackend::new();
        let mut sub_a = backend.subscribe("assets", "w1").await.unwrap();
        let mut sub_b = backend.subscribe("assets", "w2").await.unwrap();

        backend
            .insert("assets", row(json!({"workspace_id": "w1", "name": "PA rig"})))
            .await
            .unwrap();

        assert!(sub_a.changes.try_recv().is_ok());
        assert!(sub_b.changes.try_recv().is_err());
    }

    #[tokio::test]
    async fn update_of_missing_row_is_row_not_found() {
        let backend = InMemoryBackend::new();
        let result = backend.update("assets", "ghost", row(json!({"name": "x"}))).await;
        assert!(matches!(result, Err(DataError::RowNotFound(_))));
    }
}
