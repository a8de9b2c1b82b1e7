//! Detail drawer for the selected item

use egui::Context;
use sd_core::DataRow;

use crate::draft::RowDraft;

/// What the user did in the drawer this frame.
#[derive(Debug, Clone)]
pub enum DrawerAction {
    None,
    /// Save the edited fields as a partial patch.
    Save(DataRow),
    Delete,
    Close,
}

/// Right-hand side panel editing the selected row via a draft.
pub fn detail_drawer(ctx: &Context, draft: &mut RowDraft) -> DrawerAction {
    let mut action = DrawerAction::None;

    egui::SidePanel::right("detail_drawer")
        .resizable(true)
        .default_width(300.0)
        .show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.heading("Details");
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    if ui.button("✕").clicked() {
                        action = DrawerAction::Close;
                    }
                });
            });
            if let Some(id) = &draft.id {
                ui.weak(format!("id: {id}"));
            }
            ui.separator();

            egui::Grid::new("drawer_fields")
                .num_columns(2)
                .spacing([8.0, 6.0])
                .show(ui, |ui| {
                    for field in &mut draft.fields {
                        ui.label(&field.label);
                        ui.text_edit_singleline(&mut field.value);
                        ui.end_row();
                    }
                });

            ui.add_space(8.0);
            ui.horizontal(|ui| {
                if ui.button("Save").clicked() {
                    action = DrawerAction::Save(draft.to_row());
                }
                if ui.button("Delete").clicked() {
                    action = DrawerAction::Delete;
                }
            });
        });

    action
}
