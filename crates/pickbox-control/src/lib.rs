//! Asynchronous controller for the pickbox selection control.
//!
//! `Picker` owns the moving parts the core crate keeps pure: the debounce
//! timer for search keystrokes, request-generation tokens that discard
//! stale fetch results, fetch dispatch, and the change callback toward the
//! caller. A frontend drives it with user events (`search_input`,
//! `load_more`, `select`, ...) and reads a serializable [`PickerSnapshot`]
//! to render from.

pub mod controller;
pub mod snapshot;

pub use controller::{Picker, SelectionChangedCallback};
pub use snapshot::{ChipView, OptionView, PickerSnapshot};
