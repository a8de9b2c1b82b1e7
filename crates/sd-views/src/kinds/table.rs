//! Table view
//!
//! Columns honor the schema's display hints: hidden fields are
//! excluded, and only sortable columns react to header clicks. Sort
//! state lives in egui memory so it survives frames without leaking
//! into the data layer.

use egui::Ui;
use egui_extras::{Column, TableBuilder};
use sd_core::{DataRow, FieldDescriptor, FieldKind};

use super::util;
use crate::ViewHandlers;

/// Rows rendered beyond this count add scroll cost without value.
const MAX_ROWS_DISPLAYED: usize = 1000;

#[derive(Clone, Copy, PartialEq)]
struct SortState {
    column: usize,
    ascending: bool,
}

fn compare(a: &DataRow, b: &DataRow, field: &FieldDescriptor) -> std::cmp::Ordering {
    let left = a.display_value(&field.name);
    let right = b.display_value(&field.name);
    match field.kind {
        FieldKind::Number | FieldKind::Currency => {
            match (left.parse::<f64>(), right.parse::<f64>()) {
                (Ok(l), Ok(r)) => l.total_cmp(&r),
                (Ok(_), Err(_)) => std::cmp::Ordering::Less,
                (Err(_), Ok(_)) => std::cmp::Ordering::Greater,
                (Err(_), Err(_)) => left.cmp(&right),
            }
        }
        _ => left.cmp(&right),
    }
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

    let fields: Vec<&FieldDescriptor> = util::visible(schema).collect();
    if fields.is_empty() {
        ui.weak("No displayable fields");
        return;
    }

    let sort_id = ui.id().with("table_sort");
    let mut sort: Option<SortState> = ui.ctx().data_mut(|d| d.get_temp(sort_id));
    // A schema change can invalidate the remembered column.
    if sort.is_some_and(|s| s.column >= fields.len()) {
        sort = None;
    }

    let mut order: Vec<usize> = (0..rows.len()).collect();
    if let Some(state) = sort {
        let field = fields[state.column];
        order.sort_by(|&a, &b| {
            let ord = compare(&rows[a], &rows[b], field);
            if state.ascending {
                ord
            } else {
                ord.reverse()
            }
        });
    }
    order.truncate(MAX_ROWS_DISPLAYED);

    let text_height = egui::TextStyle::Body.resolve(ui.style()).size * 1.5;

    let mut builder = TableBuilder::new(ui)
        .striped(true)
        .resizable(true)
        .cell_layout(egui::Layout::left_to_right(egui::Align::Center))
        .min_scrolled_height(0.0)
        .vscroll(true);

    for _ in &fields {
        builder = builder.column(Column::initial(150.0).at_least(80.0).clip(true));
    }

    let mut next_sort = sort;
    builder
        .header(20.0, |mut header| {
            for (col_index, field) in fields.iter().enumerate() {
                header.col(|ui| {
                    if field.hints.sortable {
                        let marker = match sort {
                            Some(s) if s.column == col_index && s.ascending => " ⏶",
                            Some(s) if s.column == col_index => " ⏷",
                            _ => "",
                        };
                        if ui.button(format!("{}{marker}", field.label)).clicked() {
                            next_sort = Some(match sort {
                                Some(s) if s.column == col_index => SortState {
                                    column: col_index,
                                    ascending: !s.ascending,
                                },
                                _ => SortState {
                                    column: col_index,
                                    ascending: true,
                                },
                            });
                        }
                    } else {
                        ui.strong(&field.label);
                    }
                });
            }
        })
        .body(|body| {
            body.rows(text_height, order.len(), |row_index, mut table_row| {
                let row = &rows[order[row_index]];
                for (col_index, field) in fields.iter().enumerate() {
                    table_row.col(|ui| {
                        let text = row.display_value(&field.name);
                        if col_index == 0 {
                            // First column doubles as the selection target.
                            if ui.selectable_label(false, text).clicked() {
                                (handlers.on_item_click)(row);
                            }
                        } else {
                            ui.label(text);
                        }
                    });
                }
            });
        });

    if next_sort != sort {
        if let Some(state) = next_sort {
            ui.ctx().data_mut(|d| d.insert_temp(sort_id, state));
        }
    }

    if rows.len() > MAX_ROWS_DISPLAYED {
        ui.weak(format!(
            "Showing first {MAX_ROWS_DISPLAYED} of {} rows",
            rows.len()
        ));
    }
}
