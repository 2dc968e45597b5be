//! Selection state: the chosen id set and its display cache.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::option::{OptionId, PickOption};

/// Whether the control accepts one or many selected options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SelectionMode {
    Single,
    Multiple,
}

impl Default for SelectionMode {
    fn default() -> Self {
        SelectionMode::Single
    }
}

/// The set of currently chosen ids plus a cache of their display objects.
///
/// The cache is what lets a selected option keep rendering as a chip after
/// it scrolls out of the loaded page window. It is kept separate from the
/// page window's own data on purpose: for chip rendering this cache wins,
/// the page window is only a fallback.
///
/// Invariant: the cache keys are exactly the selected ids, except that an
/// id may be temporarily uncached while a hydration fetch for it is in
/// flight. `hydrate` only ever fills entries for ids that are still
/// selected, so the cache never grows beyond the id set.
#[derive(Debug, Clone, Default)]
pub struct Selection {
    /// Selected ids in insertion order.
    ids: Vec<OptionId>,
    /// Display objects for selected ids.
    cache: HashMap<OptionId, PickOption>,
    /// Id of the configured default option, which cannot be deselected.
    pinned: Option<OptionId>,
}

impl Selection {
    /// Creates an empty selection with no pinned default.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty selection with a pinned default id.
    pub fn with_pinned(pinned: Option<OptionId>) -> Self {
        Self {
            pinned,
            ..Self::default()
        }
    }

    pub fn ids(&self) -> &[OptionId] {
        &self.ids
    }

    pub fn pinned(&self) -> Option<OptionId> {
        self.pinned
    }

    pub fn contains(&self, id: OptionId) -> bool {
        self.ids.contains(&id)
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    /// Returns the cached display object for a selected id, if hydrated.
    pub fn cached(&self, id: OptionId) -> Option<&PickOption> {
        self.cache.get(&id)
    }

    /// Inserts an option without mode semantics.
    ///
    /// Used to seed the pinned default at construction time.
    pub fn seed(&mut self, option: PickOption) {
        if !self.ids.contains(&option.id) {
            self.ids.push(option.id);
        }
        self.cache.insert(option.id, option);
    }

    /// Selects an option.
    ///
    /// Single mode replaces the entire selection. Multiple mode adds the id
    /// if absent; selecting an already-selected id leaves the id set alone
    /// but refreshes its cached display object.
    ///
    /// Returns `true` if the id set changed.
    pub fn select(&mut self, option: PickOption, mode: SelectionMode) -> bool {
        match mode {
            SelectionMode::Single => {
                let changed = self.ids != [option.id];
                self.ids.clear();
                self.cache.clear();
                self.ids.push(option.id);
                self.cache.insert(option.id, option);
                changed
            }
            SelectionMode::Multiple => {
                let changed = !self.ids.contains(&option.id);
                if changed {
                    self.ids.push(option.id);
                }
                self.cache.insert(option.id, option);
                changed
            }
        }
    }

    /// Removes an id from the selection and its cache entry.
    ///
    /// Deselecting the pinned default is a silent no-op, not an error.
    /// Returns `true` if the id set changed.
    pub fn deselect(&mut self, id: OptionId) -> bool {
        if Some(id) == self.pinned {
            return false;
        }
        let before = self.ids.len();
        self.ids.retain(|&selected| selected != id);
        self.cache.remove(&id);
        self.ids.len() != before
    }

    /// Replaces the whole selection with externally supplied ids.
    ///
    /// Cached display data survives for ids present in the new set. The
    /// pinned default is always retained, even when absent from `ids`
    /// (so `set_value(null)` cannot strip it).
    pub fn replace(&mut self, ids: Vec<OptionId>) {
        let mut next: Vec<OptionId> = Vec::new();
        if let Some(pinned) = self.pinned {
            next.push(pinned);
        }
        for id in ids {
            if !next.contains(&id) {
                next.push(id);
            }
        }
        self.cache.retain(|id, _| next.contains(id));
        self.ids = next;
    }

    /// Selected ids with no cached display object yet.
    pub fn uncached_ids(&self) -> Vec<OptionId> {
        self.ids
            .iter()
            .copied()
            .filter(|id| !self.cache.contains_key(id))
            .collect()
    }

    /// Fills cache entries from a hydration fetch.
    ///
    /// Only ids still selected at this point are cached; anything else in
    /// `options` is dropped, which keeps a late-resolving hydration from
    /// violating the cache invariant.
    pub fn hydrate(&mut self, options: Vec<PickOption>) {
        for option in options {
            if self.ids.contains(&option.id) {
                self.cache.insert(option.id, option);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn opt(id: OptionId, name: &str) -> PickOption {
        PickOption::with_attr(id, "name", name)
    }

    #[test]
    fn test_single_select_replaces() {
        let mut selection = Selection::new();
        assert!(selection.select(opt(1, "A"), SelectionMode::Single));
        assert!(selection.select(opt(2, "B"), SelectionMode::Single));

        assert_eq!(selection.ids(), &[2]);
        assert!(selection.cached(1).is_none());
        assert!(selection.cached(2).is_some());
    }

    #[test]
    fn test_multi_select_is_idempotent_on_ids() {
        let mut selection = Selection::new();
        assert!(selection.select(opt(1, "A"), SelectionMode::Multiple));
        assert!(selection.select(opt(2, "B"), SelectionMode::Multiple));
        // Re-select refreshes the cached object but not the id set
        assert!(!selection.select(opt(1, "A (renamed)"), SelectionMode::Multiple));

        assert_eq!(selection.ids(), &[1, 2]);
        assert_eq!(selection.cached(1).unwrap().label("name"), "A (renamed)");
    }

    #[test]
    fn test_deselect_removes_id_and_cache() {
        let mut selection = Selection::new();
        selection.select(opt(1, "A"), SelectionMode::Multiple);
        selection.select(opt(2, "B"), SelectionMode::Multiple);

        assert!(selection.deselect(1));
        assert_eq!(selection.ids(), &[2]);
        assert!(selection.cached(1).is_none());
    }

    #[test]
    fn test_deselect_pinned_is_noop() {
        let mut selection = Selection::with_pinned(Some(1));
        selection.seed(opt(1, "Default"));
        selection.select(opt(2, "B"), SelectionMode::Multiple);

        assert!(!selection.deselect(1));
        assert_eq!(selection.ids(), &[1, 2]);
        assert!(selection.cached(1).is_some());
    }

    #[test]
    fn test_replace_keeps_pinned_and_surviving_cache() {
        let mut selection = Selection::with_pinned(Some(1));
        selection.seed(opt(1, "Default"));
        selection.select(opt(2, "B"), SelectionMode::Multiple);
        selection.select(opt(3, "C"), SelectionMode::Multiple);

        selection.replace(vec![3, 4]);

        assert_eq!(selection.ids(), &[1, 3, 4]);
        assert_eq!(selection.cached(3).unwrap().label("name"), "C");
        assert!(selection.cached(2).is_none());
        assert!(selection.cached(4).is_none());
        assert_eq!(selection.uncached_ids(), vec![4]);
    }

    #[test]
    fn test_hydrate_only_fills_selected_ids() {
        let mut selection = Selection::new();
        selection.replace(vec![5, 6]);

        selection.hydrate(vec![opt(5, "E"), opt(99, "stray")]);

        assert_eq!(selection.cached(5).unwrap().label("name"), "E");
        assert!(selection.cached(99).is_none());
        assert_eq!(selection.uncached_ids(), vec![6]);
    }
}
