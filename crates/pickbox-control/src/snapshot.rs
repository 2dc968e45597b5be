//! Presentation contract: serializable view models for a frontend.
//!
//! The control renders nothing itself. A frontend asks the controller for a
//! snapshot and draws the search input, the dropdown list, and the selection
//! chips from it. Field names serialize camelCase for a TypeScript consumer.

use pickbox_core::option::OptionId;
use serde::{Deserialize, Serialize};

/// One row of the dropdown list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OptionView {
    pub id: OptionId,
    pub label: String,
    /// Whether the row is part of the current selection.
    pub selected: bool,
}

/// One chip for a selected option.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChipView {
    pub id: OptionId,
    pub label: String,
    /// False for the pinned default option, whose deletion affordance is
    /// suppressed.
    pub removable: bool,
}

/// Render-ready view of the whole control.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PickerSnapshot {
    /// Text currently in the search input (possibly not yet committed).
    pub search_text: String,
    /// Deduplicated, selection-pinned option list.
    pub entries: Vec<OptionView>,
    /// Chips for every selected id, in selection order.
    pub chips: Vec<ChipView>,
    /// True while a page fetch is in flight.
    pub loading: bool,
    /// Whether scrolling near the bottom should load another page.
    pub has_more: bool,
    pub disabled: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_snapshot_serializes_camel_case() {
        let snapshot = PickerSnapshot {
            search_text: "en".to_string(),
            entries: vec![OptionView {
                id: 1,
                label: "English".to_string(),
                selected: true,
            }],
            chips: vec![ChipView {
                id: 1,
                label: "English".to_string(),
                removable: true,
            }],
            loading: false,
            has_more: true,
            disabled: false,
        };

        let json = serde_json::to_value(&snapshot).unwrap();
        assert_eq!(json["searchText"], "en");
        assert_eq!(json["hasMore"], true);
        assert_eq!(json["entries"][0]["selected"], true);
        assert_eq!(json["chips"][0]["removable"], true);
    }
}
