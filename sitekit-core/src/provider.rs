//! Lazily loaded, cached search index.

use once_cell::unsync::OnceCell;
use std::cell::Cell;
use std::convert::Infallible;

use crate::IndexSource;
use crate::error::SiteError;
use crate::post::SearchIndex;

/// Owns the search index for the lifetime of the page.
///
/// The first successful [`load`](Self::load) fetches and parses the index; every
/// later call returns the cached copy. Failures are logged and yield an empty index
/// without being cached, so a later call fetches again.
pub struct SearchIndexProvider<S> {
    source: S,
    path: String,
    cache: OnceCell<SearchIndex>,
    fetches: Cell<usize>,
}

impl<S: IndexSource> SearchIndexProvider<S> {
    pub fn new(source: S, path: impl Into<String>) -> Self {
        Self {
            source,
            path: path.into(),
            cache: OnceCell::new(),
            fetches: Cell::new(0),
        }
    }

    /// Resource path the index is fetched from.
    #[must_use]
    pub fn path(&self) -> &str {
        &self.path
    }

    /// The cached index, if a load has succeeded.
    #[must_use]
    pub fn cached(&self) -> Option<SearchIndex> {
        self.cache.get().cloned()
    }

    /// Number of fetches issued so far.
    #[must_use]
    pub fn fetch_count(&self) -> usize {
        self.fetches.get()
    }

    /// The index, loading it on first use. Never fails; see the type docs.
    pub async fn load(&self) -> SearchIndex {
        match self.try_load().await {
            Ok(index) => index,
            Err(err) => {
                log::error!("Error loading search index: {err}");
                SearchIndex::default()
            }
        }
    }

    /// Like [`load`](Self::load), but reports why loading failed.
    ///
    /// # Errors
    ///
    /// Returns an error when the source cannot deliver the resource or the body is
    /// not a JSON array of posts.
    pub async fn try_load(&self) -> Result<SearchIndex, SiteError> {
        if let Some(index) = self.cache.get() {
            return Ok(index.clone());
        }

        self.fetches.set(self.fetches.get() + 1);
        log::debug!("Fetching search index from {}", self.path);
        let body = self
            .source
            .fetch(&self.path)
            .await
            .map_err(|err| SiteError::source(&self.path, &err))?;
        let index = SearchIndex::from_json(&body)?;
        log::debug!("Loaded {} posts into the search index", index.len());

        // A concurrent load may have filled the cache while this one was fetching.
        Ok(self.cache.get_or_init(|| index).clone())
    }
}

/// In-memory [`IndexSource`] serving one fixed body for every path.
#[derive(Debug, Clone, Default)]
pub struct StaticSource {
    body: String,
}

impl StaticSource {
    pub fn new(body: impl Into<String>) -> Self {
        Self { body: body.into() }
    }
}

impl IndexSource for StaticSource {
    type Error = Infallible;

    async fn fetch(&self, _path: &str) -> Result<String, Infallible> {
        Ok(self.body.clone())
    }
}
