//! Picker configuration.

use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::option::PickOption;
use crate::output::OutputShape;
use crate::selection::SelectionMode;

fn default_debounce_ms() -> u64 {
    500
}

fn default_page_size() -> usize {
    10
}

fn default_label_key() -> String {
    "name".to_string()
}

/// Caller-facing configuration for a picker instance.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PickerConfig {
    /// Multi-select when true, single-select otherwise.
    #[serde(default)]
    pub multiple: bool,

    /// Shape of the value emitted on selection changes.
    #[serde(default)]
    pub output_shape: OutputShape,

    /// Debounce interval for search keystrokes, in milliseconds.
    #[serde(default = "default_debounce_ms")]
    pub search_debounce_ms: u64,

    /// Page size requested from the source.
    #[serde(default = "default_page_size")]
    pub page_size: usize,

    /// Pinned option that is pre-selected and cannot be deselected.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_option: Option<PickOption>,

    /// When true, user-driven mutations are silent no-ops.
    #[serde(default)]
    pub disabled: bool,

    /// Option attribute used as the display label.
    #[serde(default = "default_label_key")]
    pub label_key: String,
}

impl Default for PickerConfig {
    fn default() -> Self {
        Self {
            multiple: false,
            output_shape: OutputShape::default(),
            search_debounce_ms: default_debounce_ms(),
            page_size: default_page_size(),
            default_option: None,
            disabled: false,
            label_key: default_label_key(),
        }
    }
}

impl PickerConfig {
    pub fn mode(&self) -> SelectionMode {
        if self.multiple {
            SelectionMode::Multiple
        } else {
            SelectionMode::Single
        }
    }

    pub fn debounce(&self) -> Duration {
        Duration::from_millis(self.search_debounce_ms)
    }
}
