//! Data access for the production-management platform
//!
//! The backend client boundary, the live store that merges the server
//! stream with local optimistic mutations, and an in-memory backend
//! used by the demo workspace and the tests.

pub mod client;
pub mod memory;
pub mod reconcile;
pub mod store;

use thiserror::Error;

// Re-exports
pub use client::{BackendClient, ChangeEvent, Committed, Subscription, SubscriptionGuard};
pub use memory::InMemoryBackend;
pub use store::{LiveStore, Notice, StoreSnapshot};

/// Errors that can occur in data operations.
///
/// Pure resolution never fails; everything here is I/O against the
/// backend and is always expected, so it is modeled explicitly.
#[derive(Error, Debug, Clone)]
pub enum DataError {
    /// The live channel failed to establish or dropped. Surfaced as a
    /// persistent inline error; not auto-retried.
    #[error("subscription to '{collection}' failed: {reason}")]
    Subscription { collection: String, reason: String },

    /// A create/update/delete was rejected. Surfaced as a transient
    /// notification; any optimistic change is rolled back.
    #[error("mutation on '{collection}' rejected: {reason}")]
    Mutation { collection: String, reason: String },

    #[error("row '{0}' not found")]
    RowNotFound(String),

    #[error("{0}")]
    Other(String),
}
