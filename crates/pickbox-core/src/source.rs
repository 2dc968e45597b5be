//! Source adapters supplying options from a fixed list or a paged remote endpoint.

use async_trait::async_trait;
use futures::future::BoxFuture;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::error::Result;
use crate::option::{OptionId, PickOption};

/// One page of results returned by a source.
///
/// Mirrors the wire shape of a typical paginated REST endpoint:
/// `{ results, count, next }`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourcePage {
    /// Options on this page.
    pub results: Vec<PickOption>,
    /// Total number of options matching the query across all pages.
    pub count: usize,
    /// Opaque continuation token, if the backend provides one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next: Option<String>,
}

impl SourcePage {
    /// Creates a page with `count` equal to the number of results and no
    /// continuation token.
    pub fn complete(results: Vec<PickOption>) -> Self {
        let count = results.len();
        Self {
            results,
            count,
            next: None,
        }
    }
}

/// Supplies options to the control.
///
/// Implementations must not retry on their own; retry policy, if any,
/// belongs to the injected fetch function or its caller. The controller
/// treats a returned error as "keep the last good state".
#[async_trait]
pub trait OptionSource: Send + Sync {
    /// Fetches one page of options.
    ///
    /// # Arguments
    /// * `page_size` - Number of options requested per page
    /// * `page` - 1-based page number
    /// * `search` - Committed search term, if any
    async fn fetch_page(
        &self,
        page_size: usize,
        page: usize,
        search: Option<&str>,
    ) -> Result<SourcePage>;

    /// Fetches display data for specific ids.
    ///
    /// Used to hydrate labels for externally supplied selection values whose
    /// options are not in any cache. Ids the source does not know may simply
    /// be omitted from the result.
    async fn fetch_by_ids(&self, ids: &[OptionId]) -> Result<Vec<PickOption>>;

    /// Whether this source serves further pages.
    ///
    /// Static sources return `false`, which forces the controller's
    /// `has_more` flag off regardless of the reported count.
    fn supports_paging(&self) -> bool {
        true
    }
}

/// Source backed by a fixed in-memory list.
///
/// Ignores page number and search term and always returns the full list;
/// selection pinning and deduplication are the page window's job, not the
/// adapter's.
pub struct StaticSource {
    options: Vec<PickOption>,
}

impl StaticSource {
    pub fn new(options: Vec<PickOption>) -> Self {
        Self { options }
    }
}

#[async_trait]
impl OptionSource for StaticSource {
    async fn fetch_page(
        &self,
        _page_size: usize,
        _page: usize,
        _search: Option<&str>,
    ) -> Result<SourcePage> {
        Ok(SourcePage::complete(self.options.clone()))
    }

    async fn fetch_by_ids(&self, ids: &[OptionId]) -> Result<Vec<PickOption>> {
        Ok(self
            .options
            .iter()
            .filter(|option| ids.contains(&option.id))
            .cloned()
            .collect())
    }

    fn supports_paging(&self) -> bool {
        false
    }
}

/// Page fetch function injected by the caller.
pub type PageFetcher =
    Arc<dyn Fn(usize, usize, Option<String>) -> BoxFuture<'static, Result<SourcePage>> + Send + Sync>;

/// Id fetch function injected by the caller.
pub type IdFetcher =
    Arc<dyn Fn(Vec<OptionId>) -> BoxFuture<'static, Result<Vec<PickOption>>> + Send + Sync>;

/// Source delegating to caller-injected async functions.
///
/// Errors from the injected functions surface unchanged; no retry is added.
pub struct FnSource {
    fetch: PageFetcher,
    fetch_ids: Option<IdFetcher>,
}

impl FnSource {
    pub fn new(fetch: PageFetcher) -> Self {
        Self {
            fetch,
            fetch_ids: None,
        }
    }

    /// Adds a by-id fetcher used to hydrate externally supplied values.
    pub fn with_id_fetcher(mut self, fetch_ids: IdFetcher) -> Self {
        self.fetch_ids = Some(fetch_ids);
        self
    }
}

#[async_trait]
impl OptionSource for FnSource {
    async fn fetch_page(
        &self,
        page_size: usize,
        page: usize,
        search: Option<&str>,
    ) -> Result<SourcePage> {
        (self.fetch)(page_size, page, search.map(str::to_string)).await
    }

    async fn fetch_by_ids(&self, ids: &[OptionId]) -> Result<Vec<PickOption>> {
        match &self.fetch_ids {
            Some(fetch_ids) => fetch_ids(ids.to_vec()).await,
            // Without a by-id fetcher the selection stays uncached; chips
            // fall back to rendering the raw id.
            None => Ok(Vec::new()),
        }
    }
}
