//! Dynamically-shaped records bound to a backing collection

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Row identifier assigned by the backend.
pub type RowId = String;

/// Key carrying the row identifier.
pub const ID_KEY: &str = "id";
/// Key carrying the owning tenant.
pub const WORKSPACE_KEY: &str = "workspace_id";

/// An opaque, dynamically-shaped record.
///
/// Rows carry at minimum an `id` and a `workspace_id`; every other
/// field is schema-driven or free-form. The wrapper keeps the JSON
/// object representation so rows round-trip through the backend client
/// without loss.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DataRow(Map<String, Value>);

impl DataRow {
    /// Create an empty row.
    pub fn new() -> Self {
        Self(Map::new())
    }

    /// Wrap a JSON value; returns `None` unless it is an object.
    pub fn from_value(value: Value) -> Option<Self> {
        match value {
            Value::Object(map) => Some(Self(map)),
            _ => None,
        }
    }

    pub fn id(&self) -> Option<&str> {
        self.0.get(ID_KEY).and_then(Value::as_str)
    }

    pub fn workspace_id(&self) -> Option<&str> {
        self.0.get(WORKSPACE_KEY).and_then(Value::as_str)
    }

    pub fn set_id(&mut self, id: impl Into<String>) {
        self.0.insert(ID_KEY.to_owned(), Value::String(id.into()));
    }

    pub fn set_workspace_id(&mut self, workspace_id: impl Into<String>) {
        self.0
            .insert(WORKSPACE_KEY.to_owned(), Value::String(workspace_id.into()));
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    pub fn set(&mut self, key: impl Into<String>, value: Value) {
        self.0.insert(key.into(), value);
    }

    pub fn keys(&self) -> impl Iterator<Item = &String> {
        self.0.keys()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Shallow merge of a partial patch. `null` values delete the key,
    /// matching the backend's patch semantics.
    pub fn merge_patch(&mut self, patch: &DataRow) {
        for (key, value) in &patch.0 {
            if value.is_null() {
                self.0.remove(key);
            } else {
                self.0.insert(key.clone(), value.clone());
            }
        }
    }

    /// Render a field as display text. Scalars print bare; anything
    /// structured falls back to compact JSON.
    pub fn display_value(&self, key: &str) -> String {
        match self.0.get(key) {
            None | Some(Value::Null) => String::new(),
            Some(Value::String(s)) => s.clone(),
            Some(other) => other.to_string(),
        }
    }

    /// Serialize the whole row for substring search.
    pub fn search_text(&self) -> String {
        serde_json::to_string(&self.0).unwrap_or_default()
    }

    pub fn as_map(&self) -> &Map<String, Value> {
        &self.0
    }
}

impl From<Map<String, Value>> for DataRow {
    fn from(map: Map<String, Value>) -> Self {
        Self(map)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn row(value: Value) -> DataRow {
        DataRow::from_value(value).unwrap()
    }

    #[test]
    fn accessors() {
        let r = row(json!({"id": "r1", "workspace_id": "w1", "name": "Main stage"}));
        assert_eq!(r.id(), Some("r1"));
        assert_eq!(r.workspace_id(), Some("w1"));
        assert_eq!(r.display_value("name"), "Main stage");
        assert_eq!(r.display_value("missing"), "");
    }

    #[test]
    fn merge_patch_overwrites_and_deletes() {
        let mut r = row(json!({"id": "r1", "status": "draft", "venue": "Hall A"}));
        r.merge_patch(&row(json!({"status": "confirmed", "venue": null})));
        assert_eq!(r.display_value("status"), "confirmed");
        assert!(r.get("venue").is_none());
    }

    #[test]
    fn non_object_rejected() {
        assert!(DataRow::from_value(json!([1, 2, 3])).is_none());
    }
}
