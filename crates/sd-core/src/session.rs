//! Ambient session context
//!
//! Supplied by the surrounding auth/session layer; the core treats it
//! as a read-only input and never mutates it.

/// Identity of the current tenant and user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionContext {
    /// Tenant boundary; every data access is scoped to exactly one
    /// workspace at a time.
    pub workspace_id: String,
    pub user_id: String,
}

impl SessionContext {
    pub fn new(workspace_id: impl Into<String>, user_id: impl Into<String>) -> Self {
        Self {
            workspace_id: workspace_id.into(),
            user_id: user_id.into(),
        }
    }
}

/// Everything a custom renderer is handed: the session plus the
/// resolved route. Custom renderers own their data fetching entirely,
/// so this is deliberately narrow.
#[derive(Debug, Clone)]
pub struct AmbientContext {
    pub session: SessionContext,
    pub module: String,
    pub tab: String,
}

impl AmbientContext {
    pub fn new(session: SessionContext, module: impl Into<String>, tab: impl Into<String>) -> Self {
        Self {
            session,
            module: module.into(),
            tab: tab.into(),
        }
    }
}
