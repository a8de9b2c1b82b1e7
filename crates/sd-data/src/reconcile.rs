//! Reconciliation between the server stream and local mutations
//!
//! Two merged sources of truth: the subscription's change stream and a
//! ledger of locally-confirmed mutations. The merge rule is "local
//! overlay wins until the server catches up": a remote payload is
//! applied only if its revision is strictly newer than the last local
//! confirmation for that row, and per-row applied revisions keep a
//! slow acknowledgement from reverting a newer payload the stream
//! already delivered. Kept free of any UI type so it can be tested in
//! isolation.

use ahash::AHashMap;
use indexmap::IndexMap;
use sd_core::{DataRow, RowId};
use tracing::warn;

use crate::client::ChangeEvent;

/// Per-row record of the newest revision confirmed by a local mutation.
#[derive(Debug, Default)]
pub struct MutationLedger {
    confirmed: AHashMap<RowId, u64>,
}

impl MutationLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a backend acknowledgement for a local mutation. Keeps the
    /// newest revision if called out of order.
    pub fn confirm(&mut self, row_id: &str, revision: u64) {
        let entry = self.confirmed.entry(row_id.to_owned()).or_insert(0);
        if revision > *entry {
            *entry = revision;
        }
    }

    pub fn confirmed_revision(&self, row_id: &str) -> Option<u64> {
        self.confirmed.get(row_id).copied()
    }
}

/// Apply one remote change to the row set, honoring the local ledger,
/// the per-row applied-revision map, and the tenant boundary. Returns
/// whether the event was applied.
///
/// Events must be fed in receipt order; this function never reorders.
pub fn apply_remote(
    rows: &mut IndexMap<RowId, DataRow>,
    applied: &mut AHashMap<RowId, u64>,
    ledger: &MutationLedger,
    workspace_id: &str,
    event: ChangeEvent,
) -> bool {
    let Some(row_id) = event.row_id().map(str::to_owned) else {
        warn!("dropping remote change without a row id");
        return false;
    };

    // Local overlay wins: discard anything not strictly newer than both
    // the last locally-confirmed mutation and the last revision already
    // applied for this row.
    let newest = ledger
        .confirmed_revision(&row_id)
        .unwrap_or(0)
        .max(applied.get(&row_id).copied().unwrap_or(0));
    if event.revision() <= newest {
        return false;
    }

    match event {
        ChangeEvent::Upsert { row, revision } => {
            if row.workspace_id() != Some(workspace_id) {
                warn!(%row_id, "dropping cross-tenant row from live stream");
                return false;
            }
            applied.insert(row_id.clone(), revision);
            rows.insert(row_id, row);
            true
        }
        ChangeEvent::Remove { revision, .. } => {
            applied.insert(row_id.clone(), revision);
            rows.shift_remove(&row_id).is_some()
        }
    }
}

/// Apply a mutation acknowledgement. A committed row lands only if no
/// newer revision has already been applied for that id; an
/// acknowledgement the change stream has raced past is a no-op.
pub fn apply_ack(
    rows: &mut IndexMap<RowId, DataRow>,
    applied: &mut AHashMap<RowId, u64>,
    row_id: &str,
    row: DataRow,
    revision: u64,
) -> bool {
    if applied.get(row_id).copied().unwrap_or(0) >= revision {
        return false;
    }
    applied.insert(row_id.to_owned(), revision);
    rows.insert(row_id.to_owned(), row);
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn row(id: &str, workspace: &str, status: &str) -> DataRow {
        DataRow::from_value(json!({
            "id": id,
            "workspace_id": workspace,
            "status": status,
        }))
        .unwrap()
    }

    fn upsert(id: &str, workspace: &str, status: &str, revision: u64) -> ChangeEvent {
        ChangeEvent::Upsert {
            row: row(id, workspace, status),
            revision,
        }
    }

    #[test]
    fn updates_apply_in_receipt_order() {
        let mut rows = IndexMap::new();
        let mut applied = AHashMap::new();
        let ledger = MutationLedger::new();

        assert!(apply_remote(&mut rows, &mut applied, &ledger, "w1", upsert("r1", "w1", "draft", 1)));
        assert!(apply_remote(&mut rows, &mut applied, &ledger, "w1", upsert("r1", "w1", "confirmed", 2)));

        assert_eq!(rows["r1"].display_value("status"), "confirmed");
    }

    #[test]
    fn stale_remote_does_not_revert_local_mutation() {
        let mut rows = IndexMap::new();
        let mut applied = AHashMap::new();
        let mut ledger = MutationLedger::new();

        rows.insert("r1".to_owned(), row("r1", "w1", "confirmed"));
        ledger.confirm("r1", 5);

        // Predates the local mutation; must be discarded.
        assert!(!apply_remote(&mut rows, &mut applied, &ledger, "w1", upsert("r1", "w1", "draft", 4)));
        assert_eq!(rows["r1"].display_value("status"), "confirmed");

        // Equal revision is the local echo; keep local state.
        assert!(!apply_remote(&mut rows, &mut applied, &ledger, "w1", upsert("r1", "w1", "draft", 5)));

        // The server catching up applies normally.
        assert!(apply_remote(&mut rows, &mut applied, &ledger, "w1", upsert("r1", "w1", "archived", 6)));
        assert_eq!(rows["r1"].display_value("status"), "archived");
    }

    #[test]
    fn cross_tenant_rows_never_surface() {
        let mut rows = IndexMap::new();
        let mut applied = AHashMap::new();
        let ledger = MutationLedger::new();

        assert!(!apply_remote(&mut rows, &mut applied, &ledger, "w1", upsert("r9", "w2", "draft", 1)));
        assert!(rows.is_empty());
    }

    #[test]
    fn remove_applies_and_stale_remove_is_dropped() {
        let mut rows = IndexMap::new();
        let mut applied = AHashMap::new();
        let mut ledger = MutationLedger::new();
        rows.insert("r1".to_owned(), row("r1", "w1", "draft"));
        ledger.confirm("r1", 3);

        let stale = ChangeEvent::Remove {
            row_id: "r1".to_owned(),
            revision: 2,
        };
        assert!(!apply_remote(&mut rows, &mut applied, &ledger, "w1", stale));
        assert!(rows.contains_key("r1"));

        let fresh = ChangeEvent::Remove {
            row_id: "r1".to_owned(),
            revision: 4,
        };
        assert!(apply_remote(&mut rows, &mut applied, &ledger, "w1", fresh));
        assert!(rows.is_empty());
    }

    #[test]
    fn superseded_ack_does_not_revert_newer_remote() {
        let mut rows = IndexMap::new();
        let mut applied = AHashMap::new();
        let mut ledger = MutationLedger::new();

        // The stream raced past our in-flight mutation.
        assert!(apply_remote(&mut rows, &mut applied, &ledger, "w1", upsert("r1", "w1", "cancelled", 6)));

        // Its acknowledgement committed earlier and must not clobber
        // the newer row, though the ledger still records it.
        ledger.confirm("r1", 5);
        assert!(!apply_ack(&mut rows, &mut applied, "r1", row("r1", "w1", "confirmed"), 5));
        assert_eq!(rows["r1"].display_value("status"), "cancelled");

        // A genuinely newer acknowledgement still lands.
        ledger.confirm("r1", 7);
        assert!(apply_ack(&mut rows, &mut applied, "r1", row("r1", "w1", "archived"), 7));
        assert_eq!(rows["r1"].display_value("status"), "archived");
    }
}
