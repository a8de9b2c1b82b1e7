//! Core abstractions for the production-management platform
//!
//! This crate holds the static resolution leaves: the module/tab
//! registry, the schema registry, the table-binding resolver and the
//! ambient session context. Nothing in here performs I/O.

pub mod bindings;
pub mod registry;
pub mod row;
pub mod schema;
pub mod session;
pub mod view_kind;

// Re-export commonly used types
pub use bindings::{TableBindings, FALLBACK_COLLECTION};
pub use registry::{ModuleDescriptor, ModuleRegistry, Route, TabDescriptor};
pub use row::{DataRow, RowId};
pub use schema::{fields_from_row, FieldDescriptor, FieldHints, FieldKind, SchemaRegistry};
pub use session::{AmbientContext, SessionContext};
pub use view_kind::ViewKind;
