//! Shared field/row helpers for the renderers

use chrono::NaiveDate;
use egui::Ui;
use sd_core::{DataRow, FieldDescriptor, FieldKind};

use crate::ViewHandlers;

/// Fields the schema marks as displayable.
pub fn visible<'a>(schema: &'a [FieldDescriptor]) -> impl Iterator<Item = &'a FieldDescriptor> {
    schema.iter().filter(|f| f.hints.visible)
}

/// The field used as an item's headline: the first visible text field,
/// else the first visible field of any kind.
pub fn primary_field(schema: &[FieldDescriptor]) -> Option<&FieldDescriptor> {
    visible(schema)
        .find(|f| f.kind == FieldKind::Text)
        .or_else(|| visible(schema).next())
}

/// Headline text for a row, falling back to the row id.
pub fn primary_text(row: &DataRow, schema: &[FieldDescriptor]) -> String {
    if let Some(field) = primary_field(schema) {
        let text = row.display_value(&field.name);
        if !text.is_empty() {
            return text;
        }
    }
    row.id().map(str::to_owned).unwrap_or_else(|| "(untitled)".to_owned())
}

/// Up to three visible fields besides the primary one.
pub fn secondary_fields(schema: &[FieldDescriptor]) -> Vec<&FieldDescriptor> {
    let primary = primary_field(schema).map(|f| f.name.as_str());
    visible(schema)
        .filter(|f| Some(f.name.as_str()) != primary)
        .take(3)
        .collect()
}

/// First visible date field, used by calendar/timeline placement.
pub fn date_field(schema: &[FieldDescriptor]) -> Option<&FieldDescriptor> {
    visible(schema).find(|f| f.kind == FieldKind::Date)
}

/// Parse a row's date value. Accepts plain dates and the date prefix
/// of RFC 3339 timestamps.
pub fn row_date(row: &DataRow, field: &FieldDescriptor) -> Option<NaiveDate> {
    let text = row.display_value(&field.name);
    NaiveDate::parse_from_str(&text, "%Y-%m-%d")
        .ok()
        .or_else(|| {
            text.get(..10)
                .and_then(|prefix| NaiveDate::parse_from_str(prefix, "%Y-%m-%d").ok())
        })
}

/// First visible enum field, used by board/portfolio grouping.
pub fn group_field(schema: &[FieldDescriptor]) -> Option<&FieldDescriptor> {
    visible(schema).find(|f| f.kind == FieldKind::Enum)
}

pub fn group_key(row: &DataRow, field: &FieldDescriptor) -> String {
    let text = row.display_value(&field.name);
    if text.is_empty() {
        "(none)".to_owned()
    } else {
        text
    }
}

/// Shared empty state with the creation affordance.
pub fn empty_state(ui: &mut Ui, handlers: &mut ViewHandlers<'_>) {
    ui.vertical_centered(|ui| {
        ui.add_space(40.0);
        ui.weak("No items yet");
        ui.add_space(8.0);
        if ui.button("＋ New item").clicked() {
            (handlers.on_create_action)();
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use sd_core::FieldKind;
    use serde_json::json;

    fn schema() -> Vec<FieldDescriptor> {
        vec![
            FieldDescriptor::new("starts_on", FieldKind::Date, "Starts"),
            FieldDescriptor::new("name", FieldKind::Text, "Name"),
            FieldDescriptor::new("status", FieldKind::Enum, "Status"),
            FieldDescriptor::new("notes", FieldKind::Text, "Notes").hidden(),
        ]
    }

    fn row(value: serde_json::Value) -> DataRow {
        DataRow::from_value(value).unwrap()
    }

    #[test]
    fn primary_is_first_visible_text_field() {
        let schema = schema();
        assert_eq!(primary_field(&schema).unwrap().name, "name");

        let r = row(json!({"id": "r1", "name": "Festival opener"}));
        assert_eq!(primary_text(&r, &schema), "Festival opener");
    }

    #[test]
    fn primary_text_falls_back_to_id() {
        let r = row(json!({"id": "r1"}));
        assert_eq!(primary_text(&r, &schema()), "r1");
    }

    #[test]
    fn hidden_fields_are_not_secondary() {
        let schema = schema();
        let names: Vec<&str> = secondary_fields(&schema).iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names, ["starts_on", "status"]);
    }

    #[test]
    fn row_date_accepts_dates_and_timestamps() {
        let schema = schema();
        let field = date_field(&schema).unwrap();
        let expected = NaiveDate::from_ymd_opt(2026, 8, 14).unwrap();

        let plain = row(json!({"starts_on": "2026-08-14"}));
        assert_eq!(row_date(&plain, field), Some(expected));

        let stamped = row(json!({"starts_on": "2026-08-14T19:30:00Z"}));
        assert_eq!(row_date(&stamped, field), Some(expected));

        let garbage = row(json!({"starts_on": "soon"}));
        assert_eq!(row_date(&garbage, field), None);
    }

    #[test]
    fn group_key_labels_missing_values() {
        let schema = schema();
        let field = group_field(&schema).unwrap();
        assert_eq!(group_key(&row(json!({"status": "booked"})), field), "booked");
        assert_eq!(group_key(&row(json!({})), field), "(none)");
    }
}
