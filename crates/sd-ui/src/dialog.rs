//! Create dialog
//!
//! The dispatcher only requests creation; the page shell owns the
//! dialog lifecycle and renders it through this widget.

use egui::Context;
use sd_core::DataRow;

use crate::draft::RowDraft;

#[derive(Debug, Clone)]
pub enum DialogAction {
    None,
    Create(DataRow),
    Cancel,
}

/// Modal-ish window with one editor per schema field.
pub fn create_dialog(ctx: &Context, title: &str, draft: &mut RowDraft) -> DialogAction {
    let mut action = DialogAction::None;

    egui::Window::new(title)
        .collapsible(false)
        .resizable(false)
        .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
        .show(ctx, |ui| {
            egui::Grid::new("create_fields")
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
                if ui.button("Create").clicked() {
                    action = DialogAction::Create(draft.to_row());
                }
                if ui.button("Cancel").clicked() {
                    action = DialogAction::Cancel;
                }
            });
        });

    action
}
