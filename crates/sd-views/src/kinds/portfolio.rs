//! Portfolio view: grouped summary sections

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

    let group_field = util::group_field(schema);
    let mut groups: Vec<(String, Vec<&DataRow>)> = Vec::new();
    for row in rows {
        let key = match group_field {
            Some(field) => util::group_key(row, field),
            None => "Portfolio".to_owned(),
        };
        match groups.iter_mut().find(|(name, _)| *name == key) {
            Some((_, group)) => group.push(row),
            None => groups.push((key, vec![row])),
        }
    }

    ScrollArea::vertical()
        .auto_shrink([false; 2])
        .show(ui, |ui| {
            for (name, group) in &groups {
                Frame::group(ui.style()).show(ui, |ui| {
                    ui.set_width(ui.available_width());
                    ui.horizontal(|ui| {
                        ui.strong(name);
                        ui.weak(format!("{} items", group.len()));
                    });
                    ui.separator();
                    for row in group {
                        if ui
                            .selectable_label(false, util::primary_text(row, schema))
                            .clicked()
                        {
                            (handlers.on_item_click)(row);
                        }
                    }
                });
                ui.add_space(8.0);
            }
        });
}
