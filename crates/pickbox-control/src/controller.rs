//! The asynchronous picker controller.

use std::sync::Arc;

use tokio::sync::RwLock;
use tokio_util::sync::CancellationToken;

use pickbox_core::config::PickerConfig;
use pickbox_core::error::Result;
use pickbox_core::option::{OptionId, PickOption};
use pickbox_core::output::{EmittedValue, normalize_external};
use pickbox_core::paging::Paging;
use pickbox_core::selection::Selection;
use pickbox_core::source::{OptionSource, SourcePage};
use pickbox_core::window::PageWindow;

use crate::snapshot::{ChipView, OptionView, PickerSnapshot};

/// Callback invoked with the shaped selection value whenever the id set
/// changes.
pub type SelectionChangedCallback = Arc<dyn Fn(EmittedValue) + Send + Sync>;

/// Mutable picker state, guarded by one lock.
///
/// There is exactly one logical writer: every spawned task re-enters
/// through the lock and passes a generation check before mutating.
struct PickerState {
    config: PickerConfig,
    selection: Selection,
    window: PageWindow,
    paging: Paging,
    /// Search term of the last committed (debounced) fetch.
    committed_search: String,
    /// Latest keystroke text, not yet committed.
    pending_search: String,
    /// Bumped on every keystroke; the debounce timer only fires if it still
    /// holds the generation it was scheduled with.
    debounce_generation: u64,
    /// Bumped on every dispatched fetch; a resolving fetch is discarded if
    /// a newer one was dispatched in the meantime.
    fetch_generation: u64,
}

struct PickerInner {
    state: RwLock<PickerState>,
    source: Arc<dyn OptionSource>,
    on_change: RwLock<Option<SelectionChangedCallback>>,
    shutdown: CancellationToken,
}

/// Headless searchable single-/multi-select control.
///
/// Cheap to clone; all clones share the same state. Spawned background
/// tasks (debounce timer, page fetches, hydration) hold only a weak
/// reference, so dropping the last caller-held `Picker` orphans them, and
/// [`Picker::close`] cancels them explicitly on unmount.
#[derive(Clone)]
pub struct Picker {
    inner: Arc<PickerInner>,
}

impl Picker {
    /// Creates a picker over the given source.
    ///
    /// A configured default option is pinned: it starts selected, survives
    /// `set_value(null)`, and cannot be deselected.
    pub fn new(source: Arc<dyn OptionSource>, config: PickerConfig) -> Self {
        let mut selection = Selection::with_pinned(config.default_option.as_ref().map(|o| o.id));
        if let Some(default_option) = config.default_option.clone() {
            selection.seed(default_option);
        }
        let paging = Paging::new(config.page_size);
        let state = PickerState {
            selection,
            window: PageWindow::new(),
            paging,
            committed_search: String::new(),
            pending_search: String::new(),
            debounce_generation: 0,
            fetch_generation: 0,
            config,
        };
        Self {
            inner: Arc::new(PickerInner {
                state: RwLock::new(state),
                source,
                on_change: RwLock::new(None),
                shutdown: CancellationToken::new(),
            }),
        }
    }

    /// Creates a picker pre-seeded from an externally supplied value.
    ///
    /// The value goes through the same normalization and hydration path as
    /// [`Picker::set_value`].
    pub async fn with_value(
        source: Arc<dyn OptionSource>,
        config: PickerConfig,
        value: serde_json::Value,
    ) -> Self {
        let picker = Self::new(source, config);
        picker.set_value(value).await;
        picker
    }

    /// Registers the callback that receives the shaped selection value.
    pub async fn set_on_change(&self, callback: SelectionChangedCallback) {
        *self.inner.on_change.write().await = Some(callback);
    }

    /// Loads page 1 for the currently committed search term.
    ///
    /// Called when the dropdown opens, and usable to re-fetch after the
    /// caller knows the backend changed.
    pub async fn refresh(&self) {
        let term = self.inner.state.read().await.committed_search.clone();
        self.commit_search(term).await;
    }

    /// Records a search keystroke and (re)starts the debounce timer.
    ///
    /// Only the text present when the timer fires is committed as the
    /// active search term; intermediate keystrokes never trigger a fetch.
    pub async fn search_input(&self, text: &str) {
        let (generation, delay) = {
            let mut state = self.inner.state.write().await;
            if state.config.disabled {
                return;
            }
            state.pending_search = text.to_string();
            state.debounce_generation += 1;
            (state.debounce_generation, state.config.debounce())
        };

        let weak = Arc::downgrade(&self.inner);
        let cancel = self.inner.shutdown.clone();
        tokio::spawn(async move {
            tokio::select! {
                _ = cancel.cancelled() => {}
                _ = tokio::time::sleep(delay) => {
                    if let Some(inner) = weak.upgrade() {
                        Picker { inner }.debounce_fired(generation).await;
                    }
                }
            }
        });
    }

    /// Fetches the next page if one is expected and no fetch is running.
    ///
    /// Wire this to "scrolled within 50px of the list end".
    pub async fn load_more(&self) {
        let dispatch = {
            let mut state = self.inner.state.write().await;
            if state.config.disabled || !state.paging.can_load_more() {
                None
            } else {
                state.paging.advance();
                state.paging.begin_fetch();
                state.fetch_generation += 1;
                Some((
                    state.fetch_generation,
                    state.paging.page(),
                    state.paging.page_size(),
                    state.committed_search.clone(),
                ))
            }
        };
        if let Some((generation, page, page_size, term)) = dispatch {
            self.spawn_fetch(generation, page, page_size, term);
        }
    }

    /// Selects an option (replacing in single mode, adding in multiple).
    pub async fn select(&self, option: PickOption) {
        let changed = {
            let mut state = self.inner.state.write().await;
            if state.config.disabled {
                return;
            }
            let mode = state.config.mode();
            state.selection.select(option, mode)
        };
        if changed {
            self.emit_change().await;
        }
    }

    /// Deselects an id. Silent no-op for the pinned default option.
    pub async fn deselect(&self, id: OptionId) {
        let changed = {
            let mut state = self.inner.state.write().await;
            if state.config.disabled {
                return;
            }
            state.selection.deselect(id)
        };
        if changed {
            self.emit_change().await;
        }
    }

    /// Replaces the selection from an externally controlled value.
    ///
    /// Accepts a scalar id, a numeric string, an id array, or null;
    /// malformed values normalize to the empty selection. Ids without
    /// cached display data trigger a one-shot hydration fetch so chips can
    /// show labels. Caller-driven, so it works on a disabled control too.
    pub async fn set_value(&self, value: serde_json::Value) {
        let ids = normalize_external(&value);
        let missing = {
            let mut state = self.inner.state.write().await;
            state.selection.replace(ids);
            state.selection.uncached_ids()
        };
        self.emit_change().await;
        if missing.is_empty() {
            return;
        }

        let weak = Arc::downgrade(&self.inner);
        let source = self.inner.source.clone();
        let cancel = self.inner.shutdown.clone();
        tokio::spawn(async move {
            tokio::select! {
                _ = cancel.cancelled() => {}
                outcome = source.fetch_by_ids(&missing) => {
                    match outcome {
                        Ok(options) => {
                            if let Some(inner) = weak.upgrade() {
                                // Fills entries only for ids still selected.
                                inner.state.write().await.selection.hydrate(options);
                            }
                        }
                        Err(e) => {
                            tracing::warn!(error = %e, "hydration fetch failed, chips fall back to raw ids");
                        }
                    }
                }
            }
        });
    }

    /// Returns the selection shaped per the configured output shape.
    pub async fn value(&self) -> EmittedValue {
        let state = self.inner.state.read().await;
        EmittedValue::shape(
            &state.selection,
            state.config.output_shape,
            state.config.mode(),
        )
    }

    /// Builds the render-ready view of the control.
    pub async fn snapshot(&self) -> PickerSnapshot {
        let state = self.inner.state.read().await;
        let label_key = state.config.label_key.as_str();

        let entries = state
            .window
            .entries()
            .iter()
            .map(|option| OptionView {
                id: option.id,
                label: option.label(label_key),
                selected: state.selection.contains(option.id),
            })
            .collect();

        let chips = state
            .selection
            .ids()
            .iter()
            .map(|&id| {
                // Selection cache wins; the page window is only a fallback.
                let label = state
                    .selection
                    .cached(id)
                    .or_else(|| state.window.get(id))
                    .map(|option| option.label(label_key))
                    .unwrap_or_else(|| id.to_string());
                ChipView {
                    id,
                    label,
                    removable: Some(id) != state.selection.pinned(),
                }
            })
            .collect();

        PickerSnapshot {
            search_text: state.pending_search.clone(),
            entries,
            chips,
            loading: state.paging.is_loading(),
            has_more: state.paging.has_more(),
            disabled: state.config.disabled,
        }
    }

    /// Cancels the pending debounce timer and orphans in-flight fetches.
    ///
    /// Call on unmount; afterwards no scheduled task can mutate state.
    pub fn close(&self) {
        self.inner.shutdown.cancel();
    }

    async fn debounce_fired(&self, generation: u64) {
        let term = {
            let state = self.inner.state.read().await;
            if state.debounce_generation != generation {
                // A newer keystroke restarted the timer.
                return;
            }
            state.pending_search.clone()
        };
        self.commit_search(term).await;
    }

    async fn commit_search(&self, term: String) {
        let (generation, page, page_size) = {
            let mut state = self.inner.state.write().await;
            if state.config.disabled {
                return;
            }
            state.committed_search = term.clone();
            state.window.clear();
            state.paging.reset();
            state.paging.begin_fetch();
            state.fetch_generation += 1;
            (
                state.fetch_generation,
                state.paging.page(),
                state.paging.page_size(),
            )
        };
        tracing::debug!(term = %term, generation, "committed search term");
        self.spawn_fetch(generation, page, page_size, term);
    }

    fn spawn_fetch(&self, generation: u64, page: usize, page_size: usize, term: String) {
        let weak = Arc::downgrade(&self.inner);
        let source = self.inner.source.clone();
        let cancel = self.inner.shutdown.clone();
        tokio::spawn(async move {
            let search = if term.is_empty() { None } else { Some(term) };
            tokio::select! {
                _ = cancel.cancelled() => {}
                outcome = source.fetch_page(page_size, page, search.as_deref()) => {
                    if let Some(inner) = weak.upgrade() {
                        Picker { inner }.apply_fetch(generation, page, outcome).await;
                    }
                }
            }
        });
    }

    async fn apply_fetch(&self, generation: u64, page: usize, outcome: Result<SourcePage>) {
        let mut guard = self.inner.state.write().await;
        let state = &mut *guard;
        if state.fetch_generation != generation {
            tracing::debug!(
                generation,
                current = state.fetch_generation,
                "discarding stale fetch result"
            );
            return;
        }
        match outcome {
            Ok(fetched) => {
                state
                    .window
                    .merge_page(page, fetched.results, &state.selection);
                state
                    .paging
                    .finish_fetch(fetched.count, self.inner.source.supports_paging());
                tracing::debug!(
                    page,
                    count = fetched.count,
                    window = state.window.len(),
                    "merged fetched page"
                );
            }
            Err(e) => {
                state.paging.fail_fetch();
                tracing::warn!(error = %e, page, "option fetch failed, keeping previous page window");
            }
        }
    }

    async fn emit_change(&self) {
        let value = self.value().await;
        let callback = self.inner.on_change.read().await.clone();
        if let Some(callback) = callback {
            callback(value);
        }
    }
}
