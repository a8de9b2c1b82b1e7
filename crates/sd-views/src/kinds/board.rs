//! Board (kanban) view
//!
//! Columns come from the first visible enum field; rows without a
//! grouping field share a single column.

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

    // Columns in first-seen order.
    let group_field = util::group_field(schema);
    let mut columns: Vec<(String, Vec<&DataRow>)> = Vec::new();
    for row in rows {
        let key = match group_field {
            Some(field) => util::group_key(row, field),
            None => "All".to_owned(),
        };
        match columns.iter_mut().find(|(name, _)| *name == key) {
            Some((_, group)) => group.push(row),
            None => columns.push((key, vec![row])),
        }
    }

    ScrollArea::horizontal()
        .auto_shrink([false; 2])
        .show(ui, |ui| {
            ui.horizontal_top(|ui| {
                for (name, group) in &columns {
                    ui.vertical(|ui| {
                        ui.set_width(220.0);
                        ui.strong(format!("{name} ({})", group.len()));
                        ui.add_space(4.0);
                        for row in group {
                            card(ui, row, schema, handlers);
                        }
                    });
                }
            });
        });
}

fn card(ui: &mut Ui, row: &DataRow, schema: &[FieldDescriptor], handlers: &mut ViewHandlers<'_>) {
    Frame::group(ui.style()).show(ui, |ui| {
        ui.set_width(200.0);
        if ui
            .selectable_label(false, util::primary_text(row, schema))
            .clicked()
        {
            (handlers.on_item_click)(row);
        }
        if let Some(field) = util::secondary_fields(schema).first() {
            let text = row.display_value(&field.name);
            if !text.is_empty() {
                ui.weak(text);
            }
        }
    });
}
