//! Timeline view: rows in chronological order with date gutters

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
    let mut ordered: Vec<(Option<NaiveDate>, &DataRow)> = rows
        .iter()
        .map(|row| (date_field.and_then(|field| util::row_date(row, field)), row))
        .collect();
    // Chronological, undated entries last.
    ordered.sort_by_key(|(date, _)| (date.is_none(), *date));

    ScrollArea::vertical()
        .auto_shrink([false; 2])
        .show(ui, |ui| {
            for (date, row) in &ordered {
                ui.horizontal(|ui| {
                    let gutter = match date {
                        Some(day) => day.format("%Y-%m-%d").to_string(),
                        None => "          ".to_owned(),
                    };
                    ui.monospace(gutter);
                    ui.label("•");
                    if ui
                        .selectable_label(false, util::primary_text(row, schema))
                        .clicked()
                    {
                        (handlers.on_item_click)(row);
                    }
                });
            }
        });
}
