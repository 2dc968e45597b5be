//! Option domain model.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Unique identifier of an option within one source.
pub type OptionId = i64;

/// A selectable item with a unique id and arbitrary display attributes.
///
/// Identity is by `id` only; attributes are descriptive, not identifying.
/// An option is immutable once fetched - re-fetching the same id replaces
/// the whole object rather than patching it.
///
/// The flattened attribute map lets an option round-trip the JSON a typical
/// backend returns, e.g. `{"id": 1, "name": "English"}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PickOption {
    pub id: OptionId,
    #[serde(flatten)]
    pub attributes: Map<String, Value>,
}

impl PickOption {
    /// Creates an option with no display attributes.
    pub fn new(id: OptionId) -> Self {
        Self {
            id,
            attributes: Map::new(),
        }
    }

    /// Creates an option with a single string attribute, typically the label.
    pub fn with_attr(id: OptionId, key: impl Into<String>, value: impl Into<String>) -> Self {
        let mut attributes = Map::new();
        attributes.insert(key.into(), Value::String(value.into()));
        Self { id, attributes }
    }

    /// Returns the display label for this option.
    ///
    /// Looks up `label_key` in the attribute map. Non-string attribute values
    /// are rendered via their JSON representation; a missing or null
    /// attribute falls back to the id rendered as text, so an option is
    /// always displayable.
    pub fn label(&self, label_key: &str) -> String {
        match self.attributes.get(label_key) {
            Some(Value::String(s)) => s.clone(),
            Some(Value::Null) | None => self.id.to_string(),
            Some(other) => other.to_string(),
        }
    }
}
