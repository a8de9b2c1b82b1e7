//! Neutral placeholder for kinds without a dedicated renderer

use egui::Ui;
use sd_core::ViewKind;

pub fn render(ui: &mut Ui, kind: ViewKind) {
    ui.vertical_centered(|ui| {
        ui.add_space(60.0);
        ui.heading(kind.label());
        ui.add_space(8.0);
        ui.weak("This view is coming soon.");
    });
}
