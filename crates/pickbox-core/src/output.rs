//! Output shaping: how the selection is emitted back to the caller, and how
//! externally supplied values are normalized on the way in.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::option::OptionId;
use crate::selection::{Selection, SelectionMode};

/// Shape of the value emitted on every selection change.
///
/// An explicit tagged variant rather than independent boolean flags, so
/// invalid flag combinations cannot be expressed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OutputShape {
    /// Raw id for a single selection, id array for a multiple selection.
    #[default]
    Scalar,
    /// Stringified single id.
    ScalarString,
    /// Id array even in single mode.
    Array,
}

/// Value emitted to the caller on selection changes.
///
/// Serializes untagged, so the caller sees plain JSON: `5`, `"5"`,
/// `[5, 7]`, or `null`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum EmittedValue {
    Null,
    Scalar(OptionId),
    Text(String),
    Many(Vec<OptionId>),
}

impl EmittedValue {
    /// Shapes the current selection for emission.
    pub fn shape(selection: &Selection, shape: OutputShape, mode: SelectionMode) -> Self {
        let ids = selection.ids();
        match shape {
            OutputShape::Array => Self::Many(ids.to_vec()),
            OutputShape::ScalarString => match ids.first() {
                Some(id) => Self::Text(id.to_string()),
                None => Self::Null,
            },
            OutputShape::Scalar => match mode {
                SelectionMode::Multiple => Self::Many(ids.to_vec()),
                SelectionMode::Single => match ids.first() {
                    Some(&id) => Self::Scalar(id),
                    None => Self::Null,
                },
            },
        }
    }
}

/// Normalizes an externally supplied value to a list of option ids.
///
/// Accepts a number, a numeric string, an array of either, or null.
/// Anything else (or any non-numeric element) normalizes defensively to
/// the empty selection rather than erroring - a malformed caller value must
/// never crash the control.
pub fn normalize_external(value: &Value) -> Vec<OptionId> {
    match value {
        Value::Null => Vec::new(),
        Value::Array(items) => {
            let mut ids = Vec::new();
            for item in items {
                if let Some(id) = scalar_id(item) {
                    if !ids.contains(&id) {
                        ids.push(id);
                    }
                }
            }
            ids
        }
        other => scalar_id(other).map(|id| vec![id]).unwrap_or_default(),
    }
}

fn scalar_id(value: &Value) -> Option<OptionId> {
    match value {
        Value::Number(n) => n.as_i64(),
        Value::String(s) => s.trim().parse::<OptionId>().ok(),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::option::PickOption;
    use serde_json::json;

    fn selection_of(ids: &[OptionId]) -> Selection {
        let mut selection = Selection::new();
        for &id in ids {
            selection.select(PickOption::new(id), SelectionMode::Multiple);
        }
        selection
    }

    #[test]
    fn test_scalar_string_emits_stringified_id() {
        let selection = selection_of(&[5]);
        let value =
            EmittedValue::shape(&selection, OutputShape::ScalarString, SelectionMode::Single);
        assert_eq!(value, EmittedValue::Text("5".to_string()));
        assert_eq!(serde_json::to_value(&value).unwrap(), json!("5"));
    }

    #[test]
    fn test_array_shape_emits_id_array() {
        let selection = selection_of(&[5, 7]);
        let value = EmittedValue::shape(&selection, OutputShape::Array, SelectionMode::Multiple);
        assert_eq!(value, EmittedValue::Many(vec![5, 7]));
        assert_eq!(serde_json::to_value(&value).unwrap(), json!([5, 7]));
    }

    #[test]
    fn test_default_shape_single_emits_raw_id() {
        let selection = selection_of(&[5]);
        let value = EmittedValue::shape(&selection, OutputShape::Scalar, SelectionMode::Single);
        assert_eq!(value, EmittedValue::Scalar(5));
        assert_eq!(serde_json::to_value(&value).unwrap(), json!(5));
    }

    #[test]
    fn test_default_shape_multiple_emits_array() {
        let selection = selection_of(&[1, 2]);
        let value = EmittedValue::shape(&selection, OutputShape::Scalar, SelectionMode::Multiple);
        assert_eq!(value, EmittedValue::Many(vec![1, 2]));
    }

    #[test]
    fn test_empty_selection_emits_null_or_empty_array() {
        let selection = Selection::new();
        assert_eq!(
            EmittedValue::shape(&selection, OutputShape::Scalar, SelectionMode::Single),
            EmittedValue::Null
        );
        assert_eq!(
            EmittedValue::shape(&selection, OutputShape::Array, SelectionMode::Single),
            EmittedValue::Many(Vec::new())
        );
    }

    #[test]
    fn test_normalize_scalar_and_string() {
        assert_eq!(normalize_external(&json!(5)), vec![5]);
        assert_eq!(normalize_external(&json!("5")), vec![5]);
        assert_eq!(normalize_external(&json!(" 12 ")), vec![12]);
    }

    #[test]
    fn test_normalize_array_dedupes() {
        assert_eq!(normalize_external(&json!([5, "7", 5])), vec![5, 7]);
    }

    #[test]
    fn test_normalize_malformed_to_empty() {
        assert!(normalize_external(&json!(null)).is_empty());
        assert!(normalize_external(&json!(true)).is_empty());
        assert!(normalize_external(&json!("abc")).is_empty());
        assert!(normalize_external(&json!({"id": 5})).is_empty());
        // Non-numeric elements are skipped, not fatal
        assert_eq!(normalize_external(&json!([1, "x", {}])), vec![1]);
    }
}
