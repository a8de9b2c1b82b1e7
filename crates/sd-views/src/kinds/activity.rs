//! Activity view: newest first

use chrono::NaiveDate;
use egui::{ScrollArea, Ui};
use sd_core::{DataRow, FieldDescriptor, FieldKind};

use super::util;
use crate::ViewHandlers;

/// Prefer an explicit recency field over the first date field.
fn recency_field(schema: &[FieldDescriptor]) -> Option<&FieldDescriptor> {
    util::visible(schema)
        .find(|f| f.kind == FieldKind::Date && (f.name == "updated_at" || f.name == "created_at"))
        .or_else(|| util::date_field(schema))
}

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

    let field = recency_field(schema);
    let mut ordered: Vec<(Option<NaiveDate>, &DataRow)> = rows
        .iter()
        .map(|row| (field.and_then(|f| util::row_date(row, f)), row))
        .collect();
    ordered.sort_by_key(|(date, _)| (date.is_none(), std::cmp::Reverse(*date)));

    ScrollArea::vertical()
        .auto_shrink([false; 2])
        .show(ui, |ui| {
            for (date, row) in &ordered {
                ui.horizontal(|ui| {
                    if ui
                        .selectable_label(false, util::primary_text(row, schema))
                        .clicked()
                    {
                        (handlers.on_item_click)(row);
                    }
                    if let Some(day) = date {
                        ui.weak(day.format("%e %b %Y").to_string());
                    }
                });
            }
        });
}
