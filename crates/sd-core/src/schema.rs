//! Declarative field schemas per (module, tab)
//!
//! A schema is optional. Tabs without one are still renderable: the
//! dispatcher derives a field list from the first row's own keys.

use ahash::AHashMap;
use serde_json::Value;

use crate::row::{DataRow, ID_KEY, WORKSPACE_KEY};

/// Semantic type of a displayable field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Text,
    Number,
    Date,
    Enum,
    Reference,
    Bool,
    Currency,
}

/// Display hints attached to a field.
#[derive(Debug, Clone, Copy)]
pub struct FieldHints {
    pub visible: bool,
    pub sortable: bool,
}

impl Default for FieldHints {
    fn default() -> Self {
        Self {
            visible: true,
            sortable: true,
        }
    }
}

/// One displayable field of a tab's rows.
#[derive(Debug, Clone)]
pub struct FieldDescriptor {
    pub name: String,
    pub kind: FieldKind,
    pub label: String,
    pub hints: FieldHints,
}

impl FieldDescriptor {
    pub fn new(name: impl Into<String>, kind: FieldKind, label: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind,
            label: label.into(),
            hints: FieldHints::default(),
        }
    }

    pub fn hidden(mut self) -> Self {
        self.hints.visible = false;
        self
    }

    pub fn unsortable(mut self) -> Self {
        self.hints.sortable = false;
        self
    }
}

fn route_key(module: &str, tab: &str) -> String {
    format!("{module}/{tab}")
}

/// Static schema table keyed by composite `(module, tab)` keys.
#[derive(Default)]
pub struct SchemaRegistry {
    by_route: AHashMap<String, Vec<FieldDescriptor>>,
}

impl SchemaRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, module: &str, tab: &str, fields: Vec<FieldDescriptor>) {
        self.by_route.insert(route_key(module, tab), fields);
    }

    /// `None` is a valid state; the caller falls back to row
    /// introspection.
    pub fn lookup(&self, module: &str, tab: &str) -> Option<&[FieldDescriptor]> {
        self.by_route.get(&route_key(module, tab)).map(|f| f.as_slice())
    }
}

/// Derive a field list from a row's own keys, used when no schema is
/// registered. `id` and `workspace_id` are bookkeeping, not display
/// fields.
pub fn fields_from_row(row: &DataRow) -> Vec<FieldDescriptor> {
    row.keys()
        .filter(|k| k.as_str() != ID_KEY && k.as_str() != WORKSPACE_KEY)
        .map(|key| {
            let kind = match row.get(key) {
                Some(Value::Number(_)) => FieldKind::Number,
                Some(Value::Bool(_)) => FieldKind::Bool,
                _ => FieldKind::Text,
            };
            FieldDescriptor::new(key.clone(), kind, title_case(key))
        })
        .collect()
}

fn title_case(key: &str) -> String {
    let mut out = String::with_capacity(key.len());
    for (i, part) in key.split('_').enumerate() {
        if i > 0 {
            out.push(' ');
        }
        let mut chars = part.chars();
        if let Some(first) = chars.next() {
            out.extend(first.to_uppercase());
            out.push_str(chars.as_str());
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn lookup_absent_is_none() {
        let registry = SchemaRegistry::new();
        assert!(registry.lookup("events", "lineup").is_none());
    }

    #[test]
    fn fallback_skips_bookkeeping_fields() {
        let row = DataRow::from_value(json!({
            "id": "r1",
            "workspace_id": "w1",
            "artist_name": "The Openers",
            "fee": 1200,
            "confirmed": true
        }))
        .unwrap();

        let fields = fields_from_row(&row);
        let names: Vec<&str> = fields.iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names, ["artist_name", "confirmed", "fee"]);

        let fee = fields.iter().find(|f| f.name == "fee").unwrap();
        assert_eq!(fee.kind, FieldKind::Number);
        let name = fields.iter().find(|f| f.name == "artist_name").unwrap();
        assert_eq!(name.label, "Artist Name");
    }
}
