//! Table-binding resolver
//!
//! Maps a `(module, tab)` pair to the backing collection used for
//! CRUD. Resolution is a total function: exact override first, then
//! the tab-wide default, then the fallback collection. Overrides exist
//! because modules reuse tab slugs for different underlying
//! collections.

use ahash::AHashMap;

/// Collection used when nothing else matches. The page shell validates
/// module/tab existence independently, so an unknown pair reaching the
/// resolver still gets a usable name.
pub const FALLBACK_COLLECTION: &str = "productions";

fn route_key(module: &str, tab: &str) -> String {
    format!("{module}/{tab}")
}

/// Read-only binding table, built once at start.
pub struct TableBindings {
    overrides: AHashMap<String, String>,
    tab_defaults: AHashMap<String, String>,
    fallback: String,
}

impl TableBindings {
    pub fn new(fallback: impl Into<String>) -> Self {
        Self {
            overrides: AHashMap::new(),
            tab_defaults: AHashMap::new(),
            fallback: fallback.into(),
        }
    }

    /// Bind every tab with this slug, in any module, to `collection`.
    pub fn with_tab_default(mut self, tab: &str, collection: &str) -> Self {
        self.tab_defaults.insert(tab.to_owned(), collection.to_owned());
        self
    }

    /// Bind one exact `(module, tab)` pair, shadowing any tab default.
    pub fn with_override(mut self, module: &str, tab: &str, collection: &str) -> Self {
        self.overrides
            .insert(route_key(module, tab), collection.to_owned());
        self
    }

    /// Resolve the backing collection. Never fails; safe to call on
    /// every render.
    pub fn resolve(&self, module: &str, tab: &str) -> &str {
        if let Some(collection) = self.overrides.get(&route_key(module, tab)) {
            return collection;
        }
        if let Some(collection) = self.tab_defaults.get(tab) {
            return collection;
        }
        &self.fallback
    }
}

impl Default for TableBindings {
    fn default() -> Self {
        Self::new(FALLBACK_COLLECTION)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn override_beats_tab_default() {
        let bindings = TableBindings::default()
            .with_tab_default("overview", "productions")
            .with_override("reports", "overview", "report_templates");
        assert_eq!(bindings.resolve("reports", "overview"), "report_templates");
        assert_eq!(bindings.resolve("events", "overview"), "productions");
    }

    #[test]
    fn tab_default_beats_fallback() {
        let bindings = TableBindings::default().with_tab_default("expenses", "transactions");
        assert_eq!(bindings.resolve("finance", "expenses"), "transactions");
    }

    #[test]
    fn unregistered_pair_resolves_to_fallback() {
        let bindings = TableBindings::default();
        assert_eq!(bindings.resolve("nope", "nothing"), FALLBACK_COLLECTION);
    }
}
