//! Live store: one subscription, optimistic CRUD, frame-driven pumping
//!
//! A `LiveStore` owns the backend channel for exactly one
//! `(collection, workspace)` pair. The UI calls [`LiveStore::pump`]
//! once per frame to drain pending changes in receipt order; CRUD runs
//! on the tokio runtime and applies its results through a weak handle,
//! so results arriving after the owning view unmounted are dropped.

use std::sync::{Arc, Weak};

use ahash::AHashMap;
use indexmap::IndexMap;
use parking_lot::RwLock;
use sd_core::{DataRow, RowId};
use tokio::runtime::Handle;
use tokio::sync::{mpsc, oneshot};
use tracing::{debug, error, info};

use crate::client::{BackendClient, ChangeEvent, Subscription, SubscriptionGuard};
use crate::reconcile::{apply_ack, apply_remote, MutationLedger};
use crate::DataError;

/// Transient user-facing notification, drained by the shell each frame.
#[derive(Debug, Clone)]
pub struct Notice {
    pub message: String,
}

#[derive(Default)]
struct StoreShared {
    rows: IndexMap<RowId, DataRow>,
    // Newest revision reflected in `rows` per id, from stream or ack.
    applied: AHashMap<RowId, u64>,
    loading: bool,
    error: Option<DataError>,
    ledger: MutationLedger,
    notices: Vec<Notice>,
}

/// Cloned view of the store state for one frame of rendering.
#[derive(Debug, Clone)]
pub struct StoreSnapshot {
    pub rows: Vec<DataRow>,
    pub loading: bool,
    pub error: Option<DataError>,
}

/// Live view over one backing collection, scoped to one workspace.
pub struct LiveStore {
    client: Arc<dyn BackendClient>,
    collection: String,
    workspace_id: String,
    runtime: Handle,
    shared: Arc<RwLock<StoreShared>>,
    pending: Option<oneshot::Receiver<Result<Subscription, DataError>>>,
    changes: Option<mpsc::UnboundedReceiver<ChangeEvent>>,
    guard: Option<SubscriptionGuard>,
}

impl LiveStore {
    /// Open a subscription. Returns immediately in the loading state;
    /// the handshake completes on a later [`pump`](Self::pump).
    pub fn open(
        client: Arc<dyn BackendClient>,
        collection: impl Into<String>,
        workspace_id: impl Into<String>,
        runtime: Handle,
    ) -> Self {
        let collection = collection.into();
        let workspace_id = workspace_id.into();

        let (tx, rx) = oneshot::channel();
        {
            let client = Arc::clone(&client);
            let collection = collection.clone();
            let workspace_id = workspace_id.clone();
            runtime.spawn(async move {
                let result = client.subscribe(&collection, &workspace_id).await;
                let _ = tx.send(result);
            });
        }

        let shared = StoreShared {
            loading: true,
            ..StoreShared::default()
        };

        Self {
            client,
            collection,
            workspace_id,
            runtime,
            shared: Arc::new(RwLock::new(shared)),
            pending: Some(rx),
            changes: None,
            guard: None,
        }
    }

    pub fn collection(&self) -> &str {
        &self.collection
    }

    pub fn workspace_id(&self) -> &str {
        &self.workspace_id
    }

    pub fn is_loading(&self) -> bool {
        self.shared.read().loading
    }

    pub fn row_count(&self) -> usize {
        self.shared.read().rows.len()
    }

    /// Clone the current state for rendering.
    pub fn snapshot(&self) -> StoreSnapshot {
        let shared = self.shared.read();
        StoreSnapshot {
            rows: shared.rows.values().cloned().collect(),
            loading: shared.loading,
            error: shared.error.clone(),
        }
    }

    pub fn row(&self, id: &str) -> Option<DataRow> {
        self.shared.read().rows.get(id).cloned()
    }

    /// Drain pending mutation-failure notifications.
    pub fn take_notices(&self) -> Vec<Notice> {
        std::mem::take(&mut self.shared.write().notices)
    }

    /// Advance the store: complete the subscription handshake if it is
    /// still pending, then apply queued changes in receipt order.
    pub fn pump(&mut self) {
        if let Some(mut rx) = self.pending.take() {
            use oneshot::error::TryRecvError;
            match rx.try_recv() {
                Ok(Ok(subscription)) => self.install(subscription),
                Ok(Err(err)) => self.fail(err),
                Err(TryRecvError::Empty) => self.pending = Some(rx),
                Err(TryRecvError::Closed) => self.fail(DataError::Subscription {
                    collection: self.collection.clone(),
                    reason: "subscribe task dropped".to_owned(),
                }),
            }
        }

        if let Some(mut changes) = self.changes.take() {
            use mpsc::error::TryRecvError;
            let dropped = loop {
                match changes.try_recv() {
                    Ok(event) => {
                        let mut guard = self.shared.write();
                        let shared = &mut *guard;
                        apply_remote(
                            &mut shared.rows,
                            &mut shared.applied,
                            &shared.ledger,
                            &self.workspace_id,
                            event,
                        );
                    }
                    Err(TryRecvError::Empty) => break false,
                    Err(TryRecvError::Disconnected) => break true,
                }
            };
            if dropped {
                self.fail(DataError::Subscription {
                    collection: self.collection.clone(),
                    reason: "live channel closed".to_owned(),
                });
            } else {
                self.changes = Some(changes);
            }
        }
    }

    fn install(&mut self, subscription: Subscription) {
        let mut shared = self.shared.write();
        shared.rows.clear();
        shared.applied.clear();
        for row in subscription.initial {
            // The snapshot is tenant-filtered by contract; re-check so a
            // misbehaving backend still cannot leak another workspace.
            if row.workspace_id() != Some(self.workspace_id.as_str()) {
                continue;
            }
            if let Some(id) = row.id().map(str::to_owned) {
                // An ack committed at or before the snapshot revision is
                // already reflected here.
                shared.applied.insert(id.clone(), subscription.revision);
                shared.rows.insert(id, row);
            }
        }
        shared.loading = false;
        debug!(
            collection = %self.collection,
            rows = shared.rows.len(),
            revision = subscription.revision,
            "subscription established"
        );
        drop(shared);

        self.changes = Some(subscription.changes);
        self.guard = Some(subscription.guard);
    }

    fn fail(&mut self, err: DataError) {
        error!(collection = %self.collection, %err, "live store failed");
        let mut shared = self.shared.write();
        shared.loading = false;
        shared.error = Some(err);
        drop(shared);
        // Release the channel on the error path too.
        self.guard = None;
        self.changes = None;
    }

    /// Persist a new row. The current workspace is injected before
    /// submission; the backend assigns the id.
    pub async fn create(&self, row: DataRow) -> Result<DataRow, DataError> {
        Self::do_create(
            Arc::clone(&self.client),
            self.collection.clone(),
            self.workspace_id.clone(),
            Arc::downgrade(&self.shared),
            row,
        )
        .await
    }

    /// Fire-and-forget create for UI callers; failures surface as
    /// notices.
    pub fn create_detached(&self, row: DataRow) {
        let fut = Self::do_create(
            Arc::clone(&self.client),
            self.collection.clone(),
            self.workspace_id.clone(),
            Arc::downgrade(&self.shared),
            row,
        );
        self.runtime.spawn(async move {
            let _ = fut.await;
        });
    }

    /// Partial update, applied optimistically and rolled back if the
    /// backend rejects it.
    pub async fn update(&self, id: &str, patch: DataRow) -> Result<DataRow, DataError> {
        Self::do_update(
            Arc::clone(&self.client),
            self.collection.clone(),
            Arc::downgrade(&self.shared),
            id.to_owned(),
            patch,
        )
        .await
    }

    pub fn update_detached(&self, id: &str, patch: DataRow) {
        let fut = Self::do_update(
            Arc::clone(&self.client),
            self.collection.clone(),
            Arc::downgrade(&self.shared),
            id.to_owned(),
            patch,
        );
        self.runtime.spawn(async move {
            let _ = fut.await;
        });
    }

    /// Delete a row, optimistically removed and restored on rejection.
    pub async fn remove(&self, id: &str) -> Result<(), DataError> {
        Self::do_remove(
            Arc::clone(&self.client),
            self.collection.clone(),
            Arc::downgrade(&self.shared),
            id.to_owned(),
        )
        .await
    }

    pub fn remove_detached(&self, id: &str) {
        let fut = Self::do_remove(
            Arc::clone(&self.client),
            self.collection.clone(),
            Arc::downgrade(&self.shared),
            id.to_owned(),
        );
        self.runtime.spawn(async move {
            let _ = fut.await;
        });
    }

    async fn do_create(
        client: Arc<dyn BackendClient>,
        collection: String,
        workspace_id: String,
        shared: Weak<RwLock<StoreShared>>,
        mut row: DataRow,
    ) -> Result<DataRow, DataError> {
        row.set_workspace_id(workspace_id);

        match client.insert(&collection, row).await {
            Ok(committed) => {
                if let Some(shared) = shared.upgrade() {
                    let mut guard = shared.write();
                    let state = &mut *guard;
                    if let Some(id) = committed.row.id().map(str::to_owned) {
                        state.ledger.confirm(&id, committed.revision);
                        apply_ack(
                            &mut state.rows,
                            &mut state.applied,
                            &id,
                            committed.row.clone(),
                            committed.revision,
                        );
                    }
                }
                info!(%collection, "row created");
                Ok(committed.row)
            }
            Err(err) => {
                if let Some(shared) = shared.upgrade() {
                    shared.write().notices.push(Notice {
                        message: err.to_string(),
                    });
                }
                Err(err)
            }
        }
    }

    async fn do_update(
        client: Arc<dyn BackendClient>,
        collection: String,
        shared: Weak<RwLock<StoreShared>>,
        id: String,
        patch: DataRow,
    ) -> Result<DataRow, DataError> {
        // Optimistic apply, remembering the prior row for rollback.
        let prior = shared.upgrade().and_then(|shared| {
            let mut shared = shared.write();
            let prior = shared.rows.get(&id).cloned();
            if let Some(row) = shared.rows.get_mut(&id) {
                row.merge_patch(&patch);
            }
            prior
        });

        match client.update(&collection, &id, patch).await {
            Ok(committed) => {
                if let Some(shared) = shared.upgrade() {
                    let mut guard = shared.write();
                    let state = &mut *guard;
                    state.ledger.confirm(&id, committed.revision);
                    // The change stream may have moved past this commit
                    // while the ack was in flight; never step backwards.
                    apply_ack(
                        &mut state.rows,
                        &mut state.applied,
                        &id,
                        committed.row.clone(),
                        committed.revision,
                    );
                }
                Ok(committed.row)
            }
            Err(err) => {
                if let Some(shared) = shared.upgrade() {
                    let mut shared = shared.write();
                    if let Some(prev) = prior {
                        shared.rows.insert(id, prev);
                    }
                    shared.notices.push(Notice {
                        message: err.to_string(),
                    });
                }
                Err(err)
            }
        }
    }

    async fn do_remove(
        client: Arc<dyn BackendClient>,
        collection: String,
        shared: Weak<RwLock<StoreShared>>,
        id: String,
    ) -> Result<(), DataError> {
        let prior = shared
            .upgrade()
            .and_then(|shared| shared.write().rows.shift_remove(&id));

        match client.remove(&collection, &id).await {
            Ok(revision) => {
                if let Some(shared) = shared.upgrade() {
                    shared.write().ledger.confirm(&id, revision);
                }
                Ok(())
            }
            Err(err) => {
                if let Some(shared) = shared.upgrade() {
                    let mut shared = shared.write();
                    if let Some(prev) = prior {
                        shared.rows.insert(id, prev);
                    }
                    shared.notices.push(Notice {
                        message: err.to_string(),
                    });
                }
                Err(err)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::Committed;
    use crate::memory::InMemoryBackend;
    use async_trait::async_trait;
    use serde_json::json;
    use tokio::sync::Notify;

    fn row(value: serde_json::Value) -> DataRow {
        DataRow::from_value(value).unwrap()
    }

    /// Delegating client that holds update acknowledgements at a gate
    /// until released, while the commit itself lands immediately.
    struct GatedClient {
        inner: Arc<InMemoryBackend>,
        gate: Arc<Notify>,
    }

    #[async_trait]
    impl BackendClient for GatedClient {
        async fn subscribe(
            &self,
            collection: &str,
            workspace_id: &str,
        ) -> Result<Subscription, DataError> {
            self.inner.subscribe(collection, workspace_id).await
        }

        async fn insert(&self, collection: &str, row: DataRow) -> Result<Committed, DataError> {
            self.inner.insert(collection, row).await
        }

        async fn update(
            &self,
            collection: &str,
            id: &str,
            patch: DataRow,
        ) -> Result<Committed, DataError> {
            let committed = self.inner.update(collection, id, patch).await?;
            self.gate.notified().await;
            Ok(committed)
        }

        async fn remove(&self, collection: &str, id: &str) -> Result<u64, DataError> {
            self.inner.remove(collection, id).await
        }
    }

    async fn open_settled(backend: &Arc<InMemoryBackend>, collection: &str, workspace: &str) -> LiveStore {
        let client: Arc<dyn BackendClient> = backend.clone();
        let mut store = LiveStore::open(client, collection, workspace, Handle::current());
        for _ in 0..200 {
            store.pump();
            if !store.is_loading() {
                break;
            }
            tokio::task::yield_now().await;
        }
        store
    }

    fn seeded_backend() -> Arc<InMemoryBackend> {
        let backend = Arc::new(InMemoryBackend::new());
        backend.seed(
            "events",
            vec![
                row(json!({"id": "e1", "workspace_id": "w1", "name": "Load-in", "status": "draft"})),
                row(json!({"id": "e2", "workspace_id": "w1", "name": "Soundcheck", "status": "draft"})),
                row(json!({"id": "e9", "workspace_id": "w2", "name": "Other tenant", "status": "draft"})),
            ],
        );
        backend
    }

    #[tokio::test]
    async fn initial_snapshot_is_tenant_scoped() {
        let backend = seeded_backend();
        let store = open_settled(&backend, "events", "w1").await;

        let snapshot = store.snapshot();
        assert!(snapshot.error.is_none());
        assert_eq!(snapshot.rows.len(), 2);
        assert!(snapshot.rows.iter().all(|r| r.workspace_id() == Some("w1")));
    }

    #[tokio::test]
    async fn live_updates_apply_in_receipt_order() {
        let backend = seeded_backend();
        let mut store = open_settled(&backend, "events", "w1").await;

        let client: Arc<dyn BackendClient> = backend.clone();
        client
            .update("events", "e1", row(json!({"status": "confirmed"})))
            .await
            .unwrap();
        client
            .update("events", "e1", row(json!({"status": "cancelled"})))
            .await
            .unwrap();

        store.pump();
        assert_eq!(store.row("e1").unwrap().display_value("status"), "cancelled");
    }

    #[tokio::test]
    async fn delayed_ack_does_not_revert_newer_remote() {
        let backend = seeded_backend();
        let gate = Arc::new(Notify::new());
        let client: Arc<dyn BackendClient> = Arc::new(GatedClient {
            inner: Arc::clone(&backend),
            gate: Arc::clone(&gate),
        });

        let mut store = LiveStore::open(client, "events", "w1", Handle::current());
        for _ in 0..200 {
            store.pump();
            if !store.is_loading() {
                break;
            }
            tokio::task::yield_now().await;
        }

        // Our edit commits, but its acknowledgement is held at the gate.
        store.update_detached("e1", row(json!({"status": "confirmed"})));
        for _ in 0..20 {
            tokio::task::yield_now().await;
        }

        // Another writer lands a newer revision while the ack is in
        // flight; the stream delivers it first.
        backend
            .update("events", "e1", row(json!({"status": "cancelled"})))
            .await
            .unwrap();
        store.pump();
        assert_eq!(store.row("e1").unwrap().display_value("status"), "cancelled");

        // Releasing the stale acknowledgement must not step backwards.
        gate.notify_one();
        for _ in 0..20 {
            tokio::task::yield_now().await;
            store.pump();
        }
        assert_eq!(store.row("e1").unwrap().display_value("status"), "cancelled");
    }

    #[tokio::test]
    async fn create_injects_workspace_and_suppresses_echo() {
        let backend = seeded_backend();
        let mut store = open_settled(&backend, "events", "w1").await;

        let created = store
            .create(row(json!({"name": "Doors open", "status": "draft"})))
            .await
            .unwrap();
        assert_eq!(created.workspace_id(), Some("w1"));
        let id = created.id().unwrap().to_owned();

        // The subscription echo of our own insert must not duplicate or
        // revert anything.
        store.pump();
        assert_eq!(store.row_count(), 3);
        assert_eq!(store.row(&id).unwrap().display_value("name"), "Doors open");
    }

    #[tokio::test]
    async fn rejected_update_rolls_back_optimistic_change() {
        let backend = seeded_backend();
        let store = open_settled(&backend, "events", "w1").await;

        backend.set_failing(true);
        let result = store.update("e1", row(json!({"status": "confirmed"}))).await;
        assert!(result.is_err());

        assert_eq!(store.row("e1").unwrap().display_value("status"), "draft");
        assert_eq!(store.take_notices().len(), 1);
        assert!(store.take_notices().is_empty());
    }

    #[tokio::test]
    async fn rejected_remove_restores_row() {
        let backend = seeded_backend();
        let store = open_settled(&backend, "events", "w1").await;

        backend.set_failing(true);
        assert!(store.remove("e2").await.is_err());
        assert!(store.row("e2").is_some());
    }

    #[tokio::test]
    async fn drop_releases_the_subscription() {
        let backend = seeded_backend();
        let store = open_settled(&backend, "events", "w1").await;
        assert_eq!(backend.subscriber_count(), 1);

        drop(store);
        assert_eq!(backend.subscriber_count(), 0);
    }

    #[tokio::test]
    async fn subscription_failure_is_a_persistent_error() {
        let backend = Arc::new(InMemoryBackend::new());
        backend.set_subscriptions_failing(true);
        let store = open_settled(&backend, "events", "w1").await;

        let snapshot = store.snapshot();
        assert!(!snapshot.loading);
        assert!(matches!(
            snapshot.error,
            Some(DataError::Subscription { ref collection, .. }) if collection == "events"
        ));
    }

    #[tokio::test]
    async fn workspace_switch_leaks_no_stale_rows() {
        let backend = seeded_backend();
        let store_a = open_settled(&backend, "events", "w1").await;
        assert_eq!(store_a.row_count(), 2);
        drop(store_a);

        let store_b = open_settled(&backend, "events", "w2").await;
        let snapshot = store_b.snapshot();
        assert_eq!(snapshot.rows.len(), 1);
        assert!(snapshot.rows.iter().all(|r| r.workspace_id() == Some("w2")));
    }
}
