//! Box view: wrapped grid of cards

use egui::{Frame, ScrollArea, Ui};
use sd_core::{DataRow, FieldDescriptor};

use super::util;
use crate::ViewHandlers;

pub fn render(
    ui: &mut Ui,
    rows: &[DataRow],
    schema: &[FieldDescriptor],
    handlers: &mut ViewHandlers<'_>,
) {
    if rows.is_empty() {
        util::empty_state(ui, handlers);
        return;
    }

    ScrollArea::vertical()
        .auto_shrink([false; 2])
        .show(ui, |ui| {
            ui.horizontal_wrapped(|ui| {
                for row in rows {
                    Frame::group(ui.style()).show(ui, |ui| {
                        ui.set_width(170.0);
                        ui.vertical(|ui| {
                            if ui
                                .selectable_label(false, util::primary_text(row, schema))
                                .clicked()
                            {
                                (handlers.on_item_click)(row);
                            }
                            for field in util::secondary_fields(schema).iter().take(2) {
                                let text = row.display_value(&field.name);
                                if !text.is_empty() {
                                    ui.weak(text);
                                }
                            }
                        });
                    });
                }
            });
        });
}
