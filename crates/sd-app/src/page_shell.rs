//! Page shell: the per-route orchestration state machine
//!
//! Resolving a route yields one of three states: the route is invalid,
//! a custom component takes the tab over entirely, or the generic
//! pipeline (binding resolver + live store + view dispatcher) runs it.
//! The choice is made once per navigation; there is no dynamic switch
//! between custom and generic within a route.

use std::sync::Arc;

use egui::{Context, Ui};
use sd_core::{
    fields_from_row, AmbientContext, DataRow, FieldDescriptor, ModuleRegistry, Route,
    SchemaRegistry, SessionContext, TableBindings, ViewKind,
};
use sd_data::{BackendClient, LiveStore};
use sd_ui::{DialogAction, DrawerAction, NoticeOverlay, RowDraft, ToolbarAction};
use sd_views::{CustomRegistry, ViewHandlers};
use tracing::{debug, info};

/// Static dependencies the shell is handed explicitly; no ambient
/// globals.
pub struct Platform {
    pub registry: ModuleRegistry,
    pub bindings: TableBindings,
    pub schemas: SchemaRegistry,
    pub client: Arc<dyn BackendClient>,
    pub runtime: tokio::runtime::Handle,
}

/// Ephemeral, client-held view state; created on navigation, discarded
/// on navigation away. Never persisted by the core.
pub struct ViewState {
    pub view_kind: ViewKind,
    pub search: String,
    /// Drawer is open iff a draft is selected.
    pub selected: Option<RowDraft>,
    /// Create dialog is open iff a draft exists.
    pub creating: Option<RowDraft>,
}

/// Generic-pipeline sub-state for one tab.
pub struct GenericTab {
    store: LiveStore,
    view: ViewState,
    permitted: Vec<ViewKind>,
    tab_title: String,
    /// Schema cloned at navigation; `None` falls back to row
    /// introspection at render time.
    schema: Option<Vec<FieldDescriptor>>,
}

enum ShellState {
    RouteInvalid,
    Custom(AmbientContext),
    Generic(GenericTab),
}

pub struct PageShell {
    route: Route,
    state: ShellState,
}

impl PageShell {
    /// Resolve a route once. Custom registration short-circuits the
    /// generic pipeline: no binding is resolved and no subscription is
    /// opened for a custom tab.
    pub fn navigate(
        platform: &Platform,
        customs: &CustomRegistry,
        session: &SessionContext,
        route: Route,
    ) -> Self {
        let Some((_, tab)) = platform.registry.resolve(&route) else {
            info!(module = %route.module, tab = %route.tab, "route not found");
            return Self {
                route,
                state: ShellState::RouteInvalid,
            };
        };

        if customs.contains(&route.module, &route.tab) {
            debug!(module = %route.module, tab = %route.tab, "custom component active");
            let ambient = AmbientContext::new(session.clone(), &route.module, &route.tab);
            return Self {
                route,
                state: ShellState::Custom(ambient),
            };
        }

        let collection = platform.bindings.resolve(&route.module, &route.tab);
        debug!(module = %route.module, tab = %route.tab, collection, "generic pipeline active");

        let store = LiveStore::open(
            Arc::clone(&platform.client),
            collection,
            &session.workspace_id,
            platform.runtime.clone(),
        );
        let schema = platform
            .schemas
            .lookup(&route.module, &route.tab)
            .map(|fields| fields.to_vec());

        Self {
            state: ShellState::Generic(GenericTab {
                store,
                view: ViewState {
                    view_kind: tab.default_view,
                    search: String::new(),
                    selected: None,
                    creating: None,
                },
                permitted: tab.permitted_views.clone(),
                tab_title: tab.title.clone(),
                schema,
            }),
            route,
        }
    }

    pub fn route(&self) -> &Route {
        &self.route
    }

    pub fn is_route_invalid(&self) -> bool {
        matches!(self.state, ShellState::RouteInvalid)
    }

    pub fn is_custom(&self) -> bool {
        matches!(self.state, ShellState::Custom(_))
    }

    /// Backing collection, when the generic pipeline is active.
    pub fn collection(&self) -> Option<&str> {
        match &self.state {
            ShellState::Generic(tab) => Some(tab.store.collection()),
            _ => None,
        }
    }

    /// Current view kind, when the generic pipeline is active.
    pub fn view_kind(&self) -> Option<ViewKind> {
        match &self.state {
            ShellState::Generic(tab) => Some(tab.view.view_kind),
            _ => None,
        }
    }

    /// Top-bar status readout.
    pub fn status(&self) -> Option<String> {
        match &self.state {
            ShellState::Generic(tab) if !tab.store.is_loading() => {
                Some(format!("{} items", tab.store.row_count()))
            }
            _ => None,
        }
    }

    /// Switch the presentation strategy in place. Returns `false` when
    /// the kind is not permitted for this tab (or the generic pipeline
    /// is not active). Never touches the subscription.
    pub fn set_view_kind(&mut self, kind: ViewKind) -> bool {
        match &mut self.state {
            ShellState::Generic(tab) if tab.permitted.contains(&kind) => {
                tab.view.view_kind = kind;
                true
            }
            _ => false,
        }
    }

    /// Advance the store outside of rendering; also used by tests.
    pub fn pump(&mut self) {
        if let ShellState::Generic(tab) = &mut self.state {
            tab.store.pump();
        }
    }

    /// Panel-level overlays (detail drawer, create dialog). Must run
    /// before the central panel is laid out.
    pub fn overlays(&mut self, ctx: &Context) {
        let ShellState::Generic(tab) = &mut self.state else {
            return;
        };

        if let Some(draft) = &mut tab.view.selected {
            let action = sd_ui::detail_drawer(ctx, draft);
            let id = draft.id.clone();
            match action {
                DrawerAction::Save(patch) => {
                    if let Some(id) = id {
                        tab.store.update_detached(&id, patch);
                    }
                    tab.view.selected = None;
                }
                DrawerAction::Delete => {
                    if let Some(id) = id {
                        tab.store.remove_detached(&id);
                    }
                    tab.view.selected = None;
                }
                DrawerAction::Close => tab.view.selected = None,
                DrawerAction::None => {}
            }
        }

        if let Some(draft) = &mut tab.view.creating {
            let title = format!("New {}", tab.tab_title);
            match sd_ui::create_dialog(ctx, &title, draft) {
                DialogAction::Create(row) => {
                    tab.store.create_detached(row);
                    tab.view.creating = None;
                }
                DialogAction::Cancel => tab.view.creating = None,
                DialogAction::None => {}
            }
        }
    }

    pub fn ui(&mut self, ui: &mut Ui, customs: &mut CustomRegistry, notices: &mut NoticeOverlay) {
        match &mut self.state {
            ShellState::RouteInvalid => {
                ui.vertical_centered(|ui| {
                    ui.add_space(80.0);
                    ui.heading("Module or tab not found");
                    ui.weak(format!("{}/{}", self.route.module, self.route.tab));
                });
            }
            ShellState::Custom(ambient) => {
                let Some(renderer) = customs.lookup_mut(&self.route.module, &self.route.tab)
                else {
                    // Registration changed after navigation; treat like
                    // a renderer fault rather than falling through.
                    sd_ui::error_banner(
                        ui,
                        "custom component missing",
                        &format!("{}/{}", self.route.module, self.route.tab),
                    );
                    return;
                };
                if let Err(err) = renderer.ui(ambient, ui) {
                    // Scoped fault: the tab content degrades, the shell
                    // chrome stays up.
                    sd_ui::error_banner(
                        ui,
                        &format!("component failed: {err}"),
                        &format!("{}/{}", self.route.module, self.route.tab),
                    );
                }
            }
            ShellState::Generic(tab) => Self::generic_ui(tab, ui, notices),
        }
    }

    fn generic_ui(tab: &mut GenericTab, ui: &mut Ui, notices: &mut NoticeOverlay) {
        tab.store.pump();
        for notice in tab.store.take_notices() {
            notices.push(notice.message);
        }

        let snapshot = tab.store.snapshot();
        if let Some(err) = &snapshot.error {
            sd_ui::error_banner(ui, &err.to_string(), tab.store.collection());
            return;
        }
        if snapshot.loading {
            sd_ui::loading_indicator(ui, tab.store.collection());
            return;
        }

        if sd_ui::toolbar(ui, &mut tab.view.search, &mut tab.view.view_kind, &tab.permitted)
            == ToolbarAction::CreateRequested
        {
            tab.open_create_dialog(&snapshot.rows);
        }

        // Search is applied upstream of the dispatcher: substring match
        // against the serialized row.
        let needle = tab.view.search.trim().to_lowercase();
        let rows: Vec<DataRow> = if needle.is_empty() {
            snapshot.rows
        } else {
            snapshot
                .rows
                .into_iter()
                .filter(|row| row.search_text().to_lowercase().contains(&needle))
                .collect()
        };

        let schema = tab.effective_schema(&rows);

        let mut clicked: Option<DataRow> = None;
        let mut create_requested = false;
        {
            let mut on_item_click = |row: &DataRow| clicked = Some(row.clone());
            let mut on_create_action = || create_requested = true;
            let mut handlers = ViewHandlers {
                on_item_click: &mut on_item_click,
                on_create_action: &mut on_create_action,
            };
            sd_views::render(ui, tab.view.view_kind, &rows, &schema, &mut handlers);
        }
        if let Some(row) = clicked {
            tab.view.selected = Some(RowDraft::from_row(&row, &schema));
        }
        if create_requested {
            tab.open_create_dialog(&rows);
        }
    }
}

impl GenericTab {
    /// Registered schema, else a field list derived from the first
    /// row's own keys.
    fn effective_schema(&self, rows: &[DataRow]) -> Vec<FieldDescriptor> {
        match &self.schema {
            Some(fields) => fields.clone(),
            None => rows.first().map(fields_from_row).unwrap_or_default(),
        }
    }

    fn open_create_dialog(&mut self, rows: &[DataRow]) {
        let schema = self.effective_schema(rows);
        self.view.creating = Some(RowDraft::from_schema(&schema));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sd_core::{ModuleDescriptor, TabDescriptor};
    use sd_data::InMemoryBackend;
    use serde_json::json;

    fn registry() -> ModuleRegistry {
        ModuleRegistry::new(vec![
            ModuleDescriptor::new("dashboard", "Dashboard", "🏠").with_tabs([
                TabDescriptor::new("overview", "Overview", ViewKind::List),
                TabDescriptor::new("widgets", "Widgets", ViewKind::List),
            ]),
            ModuleDescriptor::new("reports", "Reports", "📊").with_tabs([TabDescriptor::new(
                "overview",
                "Overview",
                ViewKind::Table,
            )
            .with_views([ViewKind::Table, ViewKind::List])]),
        ])
    }

    fn platform(backend: &Arc<InMemoryBackend>) -> Platform {
        let client: Arc<dyn BackendClient> = backend.clone();
        Platform {
            registry: registry(),
            bindings: TableBindings::new("productions")
                .with_override("reports", "overview", "report_templates"),
            schemas: SchemaRegistry::new(),
            client,
            runtime: tokio::runtime::Handle::current(),
        }
    }

    fn session() -> SessionContext {
        SessionContext::new("tourco", "ava")
    }

    async fn settle(shell: &mut PageShell) {
        for _ in 0..20 {
            tokio::task::yield_now().await;
            shell.pump();
        }
    }

    #[tokio::test]
    async fn unknown_route_is_invalid() {
        let backend = Arc::new(InMemoryBackend::new());
        let platform = platform(&backend);
        let customs = CustomRegistry::new();

        let shell = PageShell::navigate(
            &platform,
            &customs,
            &session(),
            Route::new("nope", "overview"),
        );
        assert!(shell.is_route_invalid());

        let shell = PageShell::navigate(
            &platform,
            &customs,
            &session(),
            Route::new("dashboard", "nope"),
        );
        assert!(shell.is_route_invalid());
    }

    #[tokio::test]
    async fn custom_route_short_circuits_the_generic_pipeline() {
        let backend = Arc::new(InMemoryBackend::new());
        let platform = platform(&backend);
        let mut customs = CustomRegistry::new();
        customs.register(
            "dashboard",
            "overview",
            Box::new(|_: &AmbientContext, _: &mut egui::Ui| Ok(())),
        );

        let mut shell = PageShell::navigate(
            &platform,
            &customs,
            &session(),
            Route::new("dashboard", "overview"),
        );
        settle(&mut shell).await;

        assert!(shell.is_custom());
        assert_eq!(shell.collection(), None);
        assert_eq!(backend.subscribe_calls(), 0);
    }

    #[tokio::test]
    async fn failing_renderer_degrades_without_losing_the_shell() {
        let backend = Arc::new(InMemoryBackend::new());
        let platform = platform(&backend);
        let mut customs = CustomRegistry::new();
        customs.register(
            "dashboard",
            "overview",
            Box::new(|_: &AmbientContext, _: &mut egui::Ui| -> anyhow::Result<()> {
                Err(anyhow::anyhow!("widget data unavailable"))
            }),
        );

        let mut shell = PageShell::navigate(
            &platform,
            &customs,
            &session(),
            Route::new("dashboard", "overview"),
        );
        let mut notices = NoticeOverlay::new();

        // One full frame: the failing component renders as a scoped
        // error frame and the shell stays on the custom route.
        let ctx = egui::Context::default();
        let _ = ctx.run(egui::RawInput::default(), |ctx| {
            egui::CentralPanel::default().show(ctx, |ui| {
                shell.ui(ui, &mut customs, &mut notices);
            });
        });

        assert!(shell.is_custom());
        assert!(!shell.is_route_invalid());
    }

    #[tokio::test]
    async fn generic_route_opens_the_resolved_collection() {
        let backend = Arc::new(InMemoryBackend::new());
        backend.seed(
            "report_templates",
            vec![DataRow::from_value(json!({
                "id": "r1",
                "workspace_id": "tourco",
                "name": "Settlement",
            }))
            .unwrap()],
        );
        let platform = platform(&backend);
        let customs = CustomRegistry::new();

        let mut shell = PageShell::navigate(
            &platform,
            &customs,
            &session(),
            Route::new("reports", "overview"),
        );
        settle(&mut shell).await;

        assert_eq!(shell.collection(), Some("report_templates"));
        assert_eq!(shell.view_kind(), Some(ViewKind::Table));
        assert_eq!(shell.status().as_deref(), Some("1 items"));
    }

    #[tokio::test]
    async fn switching_view_kinds_never_refetches() {
        let backend = Arc::new(InMemoryBackend::new());
        let platform = platform(&backend);
        let customs = CustomRegistry::new();

        let mut shell = PageShell::navigate(
            &platform,
            &customs,
            &session(),
            Route::new("reports", "overview"),
        );
        settle(&mut shell).await;
        assert_eq!(backend.subscribe_calls(), 1);

        assert!(shell.set_view_kind(ViewKind::List));
        assert!(!shell.set_view_kind(ViewKind::Calendar));
        settle(&mut shell).await;

        assert_eq!(shell.view_kind(), Some(ViewKind::List));
        assert_eq!(backend.subscribe_calls(), 1);
    }

    #[tokio::test]
    async fn navigation_away_releases_the_subscription() {
        let backend = Arc::new(InMemoryBackend::new());
        let platform = platform(&backend);
        let customs = CustomRegistry::new();

        let mut shell = PageShell::navigate(
            &platform,
            &customs,
            &session(),
            Route::new("dashboard", "widgets"),
        );
        settle(&mut shell).await;
        assert_eq!(backend.subscriber_count(), 1);

        shell = PageShell::navigate(
            &platform,
            &customs,
            &session(),
            Route::new("reports", "overview"),
        );
        settle(&mut shell).await;
        assert_eq!(backend.subscriber_count(), 1);
        assert_eq!(shell.collection(), Some("report_templates"));
    }
}
