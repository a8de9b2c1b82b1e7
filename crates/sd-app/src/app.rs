//! Main application

use std::sync::Arc;
use std::time::Duration;

use sd_core::{Route, SessionContext};
use sd_data::BackendClient;
use sd_ui::{NoticeOverlay, Theme, TopBarAction};
use sd_views::CustomRegistry;
use tracing::info;

use crate::demo;
use crate::page_shell::{PageShell, Platform};

pub struct ShowdeskApp {
    platform: Platform,
    customs: CustomRegistry,
    session: SessionContext,
    workspaces: Vec<String>,
    shell: PageShell,
    notices: NoticeOverlay,
    // Owns the worker threads the store spawns onto; the platform only
    // holds a handle.
    _runtime: tokio::runtime::Runtime,
}

impl ShowdeskApp {
    pub fn new(cc: &eframe::CreationContext<'_>, runtime: tokio::runtime::Runtime) -> Self {
        sd_ui::apply_theme(&cc.egui_ctx, &Theme::default());

        let backend = demo::backend();
        let client: Arc<dyn BackendClient> = backend;
        let platform = Platform {
            registry: demo::registry(),
            bindings: demo::bindings(),
            schemas: demo::schemas(),
            client,
            runtime: runtime.handle().clone(),
        };
        let customs = demo::customs();
        let session = SessionContext::new("tourco", "ava");

        let shell = PageShell::navigate(
            &platform,
            &customs,
            &session,
            Route::new("dashboard", "overview"),
        );
        info!(workspace = %session.workspace_id, "session started");

        Self {
            platform,
            customs,
            session,
            workspaces: demo::workspaces(),
            shell,
            notices: NoticeOverlay::new(),
            _runtime: runtime,
        }
    }

    fn navigate(&mut self, route: Route) {
        self.shell = PageShell::navigate(&self.platform, &self.customs, &self.session, route);
    }
}

impl eframe::App for ShowdeskApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let route = self.shell.route().clone();

        match sd_ui::top_bar(
            ctx,
            &self.platform.registry,
            &route.module,
            &self.workspaces,
            &self.session.workspace_id,
            self.shell.status(),
        ) {
            TopBarAction::SelectModule(module) => {
                if let Some(first_tab) = self
                    .platform
                    .registry
                    .module(&module)
                    .and_then(|m| m.tabs.first())
                {
                    let slug = first_tab.slug.clone();
                    self.navigate(Route::new(module, slug));
                }
            }
            TopBarAction::SelectWorkspace(workspace) => {
                // Remount the current route under the new tenant; the
                // old subscription is released on drop.
                info!(%workspace, "workspace switched");
                self.session.workspace_id = workspace;
                self.navigate(route.clone());
            }
            TopBarAction::None => {}
        }

        self.shell.overlays(ctx);

        let mut nav: Option<Route> = None;
        egui::CentralPanel::default().show(ctx, |ui| {
            if let Some(module) = self.platform.registry.module(&route.module) {
                if let Some(tab) = sd_ui::tab_bar(ui, module, &route.tab) {
                    nav = Some(Route::new(route.module.clone(), tab));
                    return;
                }
            }
            self.shell.ui(ui, &mut self.customs, &mut self.notices);
        });
        if let Some(route) = nav {
            self.navigate(route);
        }

        self.notices.ui(ctx);

        // Live changes arrive outside the event loop; keep pumping even
        // when the user is idle.
        ctx.request_repaint_after(Duration::from_millis(250));
    }
}
