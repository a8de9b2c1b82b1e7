//! Module and tab descriptors
//!
//! The registry is an immutable lookup table populated once at start
//! and passed to the page shell as an explicit dependency.

use ahash::AHashMap;

use crate::view_kind::ViewKind;

/// Route parameters supplied by the surrounding router as opaque strings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Route {
    pub module: String,
    pub tab: String,
}

impl Route {
    pub fn new(module: impl Into<String>, tab: impl Into<String>) -> Self {
        Self {
            module: module.into(),
            tab: tab.into(),
        }
    }
}

/// A named sub-view within a module; the unit at which table binding
/// and custom rendering are resolved.
#[derive(Debug, Clone)]
pub struct TabDescriptor {
    /// Unique within the owning module.
    pub slug: String,
    pub title: String,
    pub default_view: ViewKind,
    /// Kinds offered by the view switcher for this tab.
    pub permitted_views: Vec<ViewKind>,
}

impl TabDescriptor {
    pub fn new(slug: impl Into<String>, title: impl Into<String>, default_view: ViewKind) -> Self {
        Self {
            slug: slug.into(),
            title: title.into(),
            default_view,
            permitted_views: vec![default_view],
        }
    }

    pub fn with_views(mut self, views: impl IntoIterator<Item = ViewKind>) -> Self {
        self.permitted_views = views.into_iter().collect();
        if !self.permitted_views.contains(&self.default_view) {
            self.permitted_views.insert(0, self.default_view);
        }
        self
    }
}

/// A top-level functional area of the application.
#[derive(Debug, Clone)]
pub struct ModuleDescriptor {
    pub slug: String,
    pub title: String,
    pub icon: &'static str,
    pub tabs: Vec<TabDescriptor>,
}

impl ModuleDescriptor {
    pub fn new(slug: impl Into<String>, title: impl Into<String>, icon: &'static str) -> Self {
        Self {
            slug: slug.into(),
            title: title.into(),
            icon,
            tabs: Vec::new(),
        }
    }

    pub fn with_tabs(mut self, tabs: impl IntoIterator<Item = TabDescriptor>) -> Self {
        self.tabs = tabs.into_iter().collect();
        self
    }

    pub fn tab(&self, slug: &str) -> Option<&TabDescriptor> {
        self.tabs.iter().find(|t| t.slug == slug)
    }
}

/// Immutable registry of all modules, indexed by slug.
pub struct ModuleRegistry {
    modules: Vec<ModuleDescriptor>,
    index: AHashMap<String, usize>,
}

impl ModuleRegistry {
    pub fn new(modules: Vec<ModuleDescriptor>) -> Self {
        let index = modules
            .iter()
            .enumerate()
            .map(|(i, m)| (m.slug.clone(), i))
            .collect();
        Self { modules, index }
    }

    pub fn modules(&self) -> &[ModuleDescriptor] {
        &self.modules
    }

    pub fn module(&self, slug: &str) -> Option<&ModuleDescriptor> {
        self.index.get(slug).map(|&i| &self.modules[i])
    }

    /// Resolve a route to its descriptors. `None` means the route does
    /// not exist; the page shell renders its not-found state.
    pub fn resolve(&self, route: &Route) -> Option<(&ModuleDescriptor, &TabDescriptor)> {
        let module = self.module(&route.module)?;
        let tab = module.tab(&route.tab)?;
        Some((module, tab))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn registry() -> ModuleRegistry {
        ModuleRegistry::new(vec![ModuleDescriptor::new("events", "Events", "🎪")
            .with_tabs([
                TabDescriptor::new("schedule", "Schedule", ViewKind::Calendar),
                TabDescriptor::new("lineup", "Lineup", ViewKind::List)
                    .with_views([ViewKind::List, ViewKind::Board, ViewKind::Table]),
            ])])
    }

    #[test]
    fn resolve_known_route() {
        let reg = registry();
        let (module, tab) = reg.resolve(&Route::new("events", "lineup")).unwrap();
        assert_eq!(module.slug, "events");
        assert_eq!(tab.default_view, ViewKind::List);
        assert_eq!(tab.permitted_views.len(), 3);
    }

    #[test]
    fn unknown_module_or_tab_is_none() {
        let reg = registry();
        assert!(reg.resolve(&Route::new("ticketing", "schedule")).is_none());
        assert!(reg.resolve(&Route::new("events", "crew")).is_none());
    }

    #[test]
    fn default_view_always_permitted() {
        let tab = TabDescriptor::new("budget", "Budget", ViewKind::Financial)
            .with_views([ViewKind::Table]);
        assert!(tab.permitted_views.contains(&ViewKind::Financial));
    }
}
