//! Top bar, tab bar, toolbar and inline status widgets

use egui::{Context, TopBottomPanel, Ui};
use sd_core::{ModuleDescriptor, ModuleRegistry, ViewKind};

use crate::theme;

/// Result of rendering the top bar for one frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TopBarAction {
    None,
    SelectModule(String),
    SelectWorkspace(String),
}

/// Application-wide top bar: module switcher on the left, workspace
/// switcher and status on the right.
pub fn top_bar(
    ctx: &Context,
    registry: &ModuleRegistry,
    active_module: &str,
    workspaces: &[String],
    active_workspace: &str,
    status: Option<String>,
) -> TopBarAction {
    let mut action = TopBarAction::None;

    TopBottomPanel::top("top_bar").show(ctx, |ui| {
        ui.horizontal(|ui| {
            ui.heading("Showdesk");
            ui.separator();

            for module in registry.modules() {
                let selected = module.slug == active_module;
                let label = format!("{} {}", module.icon, module.title);
                if ui.selectable_label(selected, label).clicked() && !selected {
                    action = TopBarAction::SelectModule(module.slug.clone());
                }
            }

            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                let mut selected_workspace = active_workspace.to_owned();
                egui::ComboBox::from_id_source("workspace_switcher")
                    .selected_text(&selected_workspace)
                    .show_ui(ui, |ui| {
                        for workspace in workspaces {
                            ui.selectable_value(
                                &mut selected_workspace,
                                workspace.clone(),
                                workspace,
                            );
                        }
                    });
                if selected_workspace != active_workspace {
                    action = TopBarAction::SelectWorkspace(selected_workspace);
                }

                if let Some(status) = status {
                    ui.separator();
                    ui.weak(status);
                }
            });
        });
    });

    action
}

/// Tab strip for the active module. Returns a clicked tab slug.
pub fn tab_bar(ui: &mut Ui, module: &ModuleDescriptor, active_tab: &str) -> Option<String> {
    let mut clicked = None;
    ui.horizontal(|ui| {
        for tab in &module.tabs {
            let selected = tab.slug == active_tab;
            if ui.selectable_label(selected, &tab.title).clicked() && !selected {
                clicked = Some(tab.slug.clone());
            }
        }
    });
    ui.separator();
    clicked
}

/// Result of rendering the toolbar for one frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToolbarAction {
    None,
    ViewChanged,
    CreateRequested,
}

/// Search box, view switcher and creation affordance.
pub fn toolbar(
    ui: &mut Ui,
    search: &mut String,
    view_kind: &mut ViewKind,
    permitted: &[ViewKind],
) -> ToolbarAction {
    let mut action = ToolbarAction::None;

    ui.horizontal(|ui| {
        ui.add(
            egui::TextEdit::singleline(search)
                .hint_text("Search…")
                .desired_width(220.0),
        );

        let before = *view_kind;
        egui::ComboBox::from_id_source("view_switcher")
            .selected_text(view_kind.label())
            .show_ui(ui, |ui| {
                for kind in permitted {
                    ui.selectable_value(view_kind, *kind, kind.label());
                }
            });
        if *view_kind != before {
            action = ToolbarAction::ViewChanged;
        }

        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            if ui.button("＋ New").clicked() {
                action = ToolbarAction::CreateRequested;
            }
        });
    });
    ui.add_space(4.0);

    action
}

/// Persistent inline error, showing the technical collection name for
/// support diagnosis without a stack trace.
pub fn error_banner(ui: &mut Ui, message: &str, collection: &str) {
    egui::Frame::none()
        .fill(theme::error_color().linear_multiply(0.2))
        .stroke(egui::Stroke::new(1.0, theme::error_color()))
        .rounding(4.0)
        .inner_margin(8.0)
        .show(ui, |ui| {
            ui.horizontal(|ui| {
                ui.label(egui::RichText::new("⚠").color(theme::error_color()));
                ui.label(message);
                ui.separator();
                ui.monospace(collection);
            });
        });
}

/// Spinner shown while the subscription handshake is in flight. The
/// snapshot lands atomically, so there is no partial count to show;
/// the top-bar status takes over once rows are in.
pub fn loading_indicator(ui: &mut Ui, collection: &str) {
    ui.vertical_centered(|ui| {
        ui.add_space(60.0);
        ui.spinner();
        ui.add_space(8.0);
        ui.weak(format!("Loading {collection}…"));
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn inline_status_widgets_render_headless() {
        let ctx = Context::default();
        let _ = ctx.run(egui::RawInput::default(), |ctx| {
            egui::CentralPanel::default().show(ctx, |ui| {
                loading_indicator(ui, "events");
                error_banner(ui, "subscription failed", "events");
            });
        });
    }
}
