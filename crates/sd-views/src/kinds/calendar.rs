//! Calendar (day-bucketed agenda) view

use std::collections::BTreeMap;

use chrono::NaiveDate;
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

    let date_field = util::date_field(schema);
    let mut days: BTreeMap<NaiveDate, Vec<&DataRow>> = BTreeMap::new();
    let mut undated: Vec<&DataRow> = Vec::new();

    for row in rows {
        match date_field.and_then(|field| util::row_date(row, field)) {
            Some(day) => days.entry(day).or_default().push(row),
            None => undated.push(row),
        }
    }

    ScrollArea::vertical()
        .auto_shrink([false; 2])
        .show(ui, |ui| {
            for (day, entries) in &days {
                ui.strong(day.format("%a %e %b %Y").to_string());
                for row in entries {
                    entry(ui, row, schema, handlers);
                }
                ui.add_space(6.0);
            }

            if !undated.is_empty() {
                ui.strong("Undated");
                for row in &undated {
                    entry(ui, row, schema, handlers);
                }
            }
        });
}

fn entry(ui: &mut Ui, row: &DataRow, schema: &[FieldDescriptor], handlers: &mut ViewHandlers<'_>) {
    ui.horizontal(|ui| {
        ui.add_space(16.0);
        if ui
            .selectable_label(false, util::primary_text(row, schema))
            .clicked()
        {
            (handlers.on_item_click)(row);
        }
    });
}
