//! The page window: the deduplicated, selection-pinned list of options
//! currently presented in the dropdown.

use std::collections::HashSet;

use crate::option::{OptionId, PickOption};
use crate::selection::Selection;

/// Accumulated, render-ready option list.
///
/// Invariant: never holds two entries with the same id.
#[derive(Debug, Clone, Default)]
pub struct PageWindow {
    entries: Vec<PickOption>,
}

impl PageWindow {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn entries(&self) -> &[PickOption] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn contains(&self, id: OptionId) -> bool {
        self.entries.iter().any(|entry| entry.id == id)
    }

    /// Returns the window's copy of an option, if loaded.
    pub fn get(&self, id: OptionId) -> Option<&PickOption> {
        self.entries.iter().find(|entry| entry.id == id)
    }

    /// Drops all accumulated entries (a new search term was committed).
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Merges one fetched page into the window.
    ///
    /// A page-1 merge rebuilds the window with the selected options pinned
    /// to the front (in selection order, using their cached display
    /// objects); later pages append after everything already present.
    /// Duplicate ids are dropped in both cases, fetched copies never
    /// displace a pinned one.
    pub fn merge_page(&mut self, page: usize, fetched: Vec<PickOption>, selection: &Selection) {
        if page <= 1 {
            self.entries.clear();
            for &id in selection.ids() {
                if let Some(option) = selection.cached(id) {
                    self.entries.push(option.clone());
                }
            }
        }
        let mut seen: HashSet<OptionId> = self.entries.iter().map(|entry| entry.id).collect();
        for option in fetched {
            if seen.insert(option.id) {
                self.entries.push(option);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::selection::SelectionMode;

    fn opt(id: OptionId, name: &str) -> PickOption {
        PickOption::with_attr(id, "name", name)
    }

    #[test]
    fn test_merge_dedupes_across_pages() {
        let selection = Selection::new();
        let mut window = PageWindow::new();

        window.merge_page(1, vec![opt(10, "a"), opt(11, "b")], &selection);
        window.merge_page(2, vec![opt(11, "b"), opt(12, "c")], &selection);

        let ids: Vec<OptionId> = window.entries().iter().map(|entry| entry.id).collect();
        assert_eq!(ids, vec![10, 11, 12]);
    }

    #[test]
    fn test_page_one_pins_selected_to_front() {
        let mut selection = Selection::new();
        selection.select(opt(99, "picked"), SelectionMode::Multiple);
        let mut window = PageWindow::new();

        window.merge_page(1, vec![opt(10, "a"), opt(11, "b")], &selection);

        let ids: Vec<OptionId> = window.entries().iter().map(|entry| entry.id).collect();
        assert_eq!(ids, vec![99, 10, 11]);
    }

    #[test]
    fn test_fetched_copy_does_not_displace_pinned() {
        let mut selection = Selection::new();
        selection.select(opt(10, "picked label"), SelectionMode::Multiple);
        let mut window = PageWindow::new();

        window.merge_page(1, vec![opt(10, "fetched label"), opt(11, "b")], &selection);

        assert_eq!(window.len(), 2);
        assert_eq!(window.get(10).unwrap().label("name"), "picked label");
    }

    #[test]
    fn test_later_pages_append_after_existing() {
        let mut selection = Selection::new();
        selection.select(opt(99, "picked"), SelectionMode::Multiple);
        let mut window = PageWindow::new();

        window.merge_page(1, vec![opt(10, "a")], &selection);
        window.merge_page(2, vec![opt(12, "c")], &selection);

        let ids: Vec<OptionId> = window.entries().iter().map(|entry| entry.id).collect();
        assert_eq!(ids, vec![99, 10, 12]);
    }

    #[test]
    fn test_merging_empty_page_is_noop() {
        let selection = Selection::new();
        let mut window = PageWindow::new();
        window.merge_page(1, vec![opt(10, "a")], &selection);

        window.merge_page(2, Vec::new(), &selection);

        assert_eq!(window.len(), 1);
    }
}
