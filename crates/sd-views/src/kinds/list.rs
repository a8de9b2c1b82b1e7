//! Flat list view

use egui::{ScrollArea, Ui};
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

    let secondary = util::secondary_fields(schema);

    ScrollArea::vertical()
        .auto_shrink([false; 2])
        .show(ui, |ui| {
            for row in rows {
                ui.horizontal(|ui| {
                    if ui
                        .selectable_label(false, util::primary_text(row, schema))
                        .clicked()
                    {
                        (handlers.on_item_click)(row);
                    }
                    for field in &secondary {
                        let text = row.display_value(&field.name);
                        if !text.is_empty() {
                            ui.weak(text);
                        }
                    }
                });
            }
        });
}
