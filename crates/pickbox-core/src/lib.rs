//! Core building blocks for a headless, searchable multi-select control.
//!
//! This crate holds the pure domain side of the control: option and
//! selection models, output shaping, pagination bookkeeping, the page
//! window, and the source adapter abstraction that supplies options from
//! either a fixed in-memory list or a paged remote endpoint. The
//! asynchronous controller that wires these together lives in
//! `pickbox-control`.

pub mod config;
pub mod error;
pub mod option;
pub mod output;
pub mod paging;
pub mod selection;
pub mod source;
pub mod window;

// Re-export common types
pub use config::PickerConfig;
pub use error::{PickError, Result};
pub use option::{OptionId, PickOption};
pub use output::{EmittedValue, OutputShape};
pub use paging::{Paging, Phase};
pub use selection::{Selection, SelectionMode};
pub use source::{FnSource, OptionSource, SourcePage, StaticSource};
pub use window::PageWindow;
