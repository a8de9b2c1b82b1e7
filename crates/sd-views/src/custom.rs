//! Custom-component registry
//!
//! A registered renderer fully owns its tab: the page shell hands it
//! the ambient context and stops engaging the generic pipeline for
//! that route. A renderer returning `Err` is shown inside a scoped
//! error frame; it never takes down the shell chrome.

use ahash::AHashMap;
use egui::Ui;
use sd_core::AmbientContext;

/// A self-contained component bypassing the schema-driven pipeline.
pub trait CustomRenderer: Send {
    fn ui(&mut self, ctx: &AmbientContext, ui: &mut Ui) -> anyhow::Result<()>;
}

impl<F> CustomRenderer for F
where
    F: FnMut(&AmbientContext, &mut Ui) -> anyhow::Result<()> + Send,
{
    fn ui(&mut self, ctx: &AmbientContext, ui: &mut Ui) -> anyhow::Result<()> {
        self(ctx, ui)
    }
}

fn route_key(module: &str, tab: &str) -> String {
    format!("{module}/{tab}")
}

/// Per-route table of specialized renderers, populated at start.
#[derive(Default)]
pub struct CustomRegistry {
    by_route: AHashMap<String, Box<dyn CustomRenderer>>,
}

impl CustomRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, module: &str, tab: &str, renderer: Box<dyn CustomRenderer>) {
        self.by_route.insert(route_key(module, tab), renderer);
    }

    /// Whether a route is taken over by a custom renderer. Consulted
    /// once per navigation by the page shell.
    pub fn contains(&self, module: &str, tab: &str) -> bool {
        self.by_route.contains_key(&route_key(module, tab))
    }

    pub fn lookup_mut(&mut self, module: &str, tab: &str) -> Option<&mut Box<dyn CustomRenderer>> {
        self.by_route.get_mut(&route_key(module, tab))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookup_is_per_route() {
        let mut registry = CustomRegistry::new();
        registry.register(
            "dashboard",
            "overview",
            Box::new(|_: &AmbientContext, _: &mut Ui| Ok(())),
        );

        assert!(registry.contains("dashboard", "overview"));
        assert!(!registry.contains("dashboard", "widgets"));
        assert!(!registry.contains("events", "overview"));
        assert!(registry.lookup_mut("dashboard", "overview").is_some());
    }
}
