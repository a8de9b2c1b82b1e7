//! Editable drafts backing the create dialog and the detail drawer

use sd_core::{DataRow, FieldDescriptor, FieldKind, RowId};
use serde_json::Value;

/// One editable field of a draft.
#[derive(Debug, Clone)]
pub struct DraftField {
    pub name: String,
    pub label: String,
    pub kind: FieldKind,
    pub value: String,
}

/// Text-edited working copy of a row. Values are typed back into JSON
/// when the draft is submitted.
#[derive(Debug, Clone, Default)]
pub struct RowDraft {
    pub id: Option<RowId>,
    pub fields: Vec<DraftField>,
}

impl RowDraft {
    /// Blank draft for the create dialog.
    pub fn from_schema(schema: &[FieldDescriptor]) -> Self {
        Self {
            id: None,
            fields: schema
                .iter()
                .filter(|f| f.hints.visible)
                .map(|f| DraftField {
                    name: f.name.clone(),
                    label: f.label.clone(),
                    kind: f.kind,
                    value: String::new(),
                })
                .collect(),
        }
    }

    /// Draft pre-filled from an existing row, for the detail drawer.
    pub fn from_row(row: &DataRow, schema: &[FieldDescriptor]) -> Self {
        let mut draft = Self::from_schema(schema);
        draft.id = row.id().map(str::to_owned);
        for field in &mut draft.fields {
            field.value = row.display_value(&field.name);
        }
        draft
    }

    /// Type the edited values back into a row. Empty values are
    /// omitted, so a create submits only what the user filled in.
    pub fn to_row(&self) -> DataRow {
        let mut row = DataRow::new();
        for field in &self.fields {
            let text = field.value.trim();
            if text.is_empty() {
                continue;
            }
            let value = match field.kind {
                FieldKind::Number | FieldKind::Currency => text
                    .parse::<f64>()
                    .ok()
                    .and_then(serde_json::Number::from_f64)
                    .map(Value::Number)
                    .unwrap_or_else(|| Value::String(text.to_owned())),
                FieldKind::Bool => match text.parse::<bool>() {
                    Ok(flag) => Value::Bool(flag),
                    Err(_) => Value::String(text.to_owned()),
                },
                _ => Value::String(text.to_owned()),
            };
            row.set(field.name.clone(), value);
        }
        row
    }
}
