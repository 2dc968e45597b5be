//! Pagination bookkeeping for incremental fetches.

/// Fetch phase of the pagination controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Phase {
    #[default]
    Idle,
    Loading,
}

/// Page counter, `has_more` flag, and fetch phase.
///
/// The phase machine is `Idle -> Loading -> Idle`; a failed fetch also
/// returns to `Idle` without touching `page` or `has_more`.
#[derive(Debug, Clone)]
pub struct Paging {
    page: usize,
    page_size: usize,
    has_more: bool,
    phase: Phase,
}

impl Paging {
    pub fn new(page_size: usize) -> Self {
        Self {
            page: 1,
            page_size,
            has_more: true,
            phase: Phase::Idle,
        }
    }

    pub fn page(&self) -> usize {
        self.page
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    pub fn has_more(&self) -> bool {
        self.has_more
    }

    pub fn is_loading(&self) -> bool {
        self.phase == Phase::Loading
    }

    /// Resets to the first page (a new search term was committed).
    pub fn reset(&mut self) {
        self.page = 1;
        self.has_more = true;
        self.phase = Phase::Idle;
    }

    /// True when a scroll near the list end should fetch the next page.
    pub fn can_load_more(&self) -> bool {
        self.has_more && self.phase == Phase::Idle
    }

    /// Moves to the next page.
    pub fn advance(&mut self) {
        self.page += 1;
    }

    pub fn begin_fetch(&mut self) {
        self.phase = Phase::Loading;
    }

    /// Applies a resolved fetch.
    ///
    /// `has_more` follows the source's literal formula,
    /// `count > page * page_size`, never an "items received < page size"
    /// heuristic: a short page keeps `has_more` true as long as the
    /// reported count says so. `pageable` is false for static sources,
    /// which forces `has_more` off.
    pub fn finish_fetch(&mut self, count: usize, pageable: bool) {
        self.has_more = pageable && count > self.page * self.page_size;
        self.phase = Phase::Idle;
    }

    /// Abandons a failed fetch, keeping prior pagination state.
    pub fn fail_fetch(&mut self) {
        self.phase = Phase::Idle;
    }
}
