//! Search box: browser fetch, `setTimeout` scheduling and the DOM view.

use std::time::Duration;

use sitekit_core::debounce::LocalTask;
use sitekit_core::{
    Debouncer, IndexSource, LogSink, Scheduler, SearchController, SearchIndexProvider,
    SearchView, SiteConfig,
};
use thiserror::Error;
use wasm_bindgen::JsCast;
use wasm_bindgen::closure::Closure;
use wasm_bindgen_futures::JsFuture;
use web_sys::{Element, HtmlInputElement};

use crate::{dom, paths};

pub const SEARCH_INPUT_ID: &str = "search-input";
pub const SEARCH_COUNT_ID: &str = "search-count";
pub const ALL_ARTICLES_ID: &str = "all-articles";
pub const RESULTS_CONTAINER_ID: &str = "results-container";
pub const RESULTS_LIST_ID: &str = "results-list";
pub const RESULTS_COUNT_ID: &str = "results-count";
pub const NO_RESULTS_ID: &str = "no-results";

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("window unavailable")]
    NoWindow,
    #[error("request failed: {0}")]
    Request(String),
    #[error("server responded with status {0}")]
    Status(u16),
    #[error("response body is not text")]
    Body,
}

/// [`IndexSource`] using the browser's `fetch`.
#[derive(Debug, Clone, Copy, Default)]
pub struct FetchIndexSource;

impl IndexSource for FetchIndexSource {
    type Error = FetchError;

    async fn fetch(&self, path: &str) -> Result<String, FetchError> {
        if dom::window().is_none() {
            return Err(FetchError::NoWindow);
        }
        let response = dom::fetch_response(path)
            .await
            .map_err(|err| FetchError::Request(dom::js_error_message(&err)))?;
        if !response.ok() {
            return Err(FetchError::Status(response.status()));
        }
        let text = response
            .text()
            .map_err(|err| FetchError::Request(dom::js_error_message(&err)))?;
        JsFuture::from(text)
            .await
            .map_err(|err| FetchError::Request(dom::js_error_message(&err)))?
            .as_string()
            .ok_or(FetchError::Body)
    }
}

/// A pending `setTimeout`; dropping it releases the callback.
pub struct Timeout {
    id: i32,
    _callback: Closure<dyn FnMut()>,
}

/// [`Scheduler`] on the browser event loop.
#[derive(Debug, Clone, Copy, Default)]
pub struct TimeoutScheduler;

impl Scheduler for TimeoutScheduler {
    type Handle = Option<Timeout>;

    fn schedule(&self, delay: Duration, task: Box<dyn FnOnce()>) -> Option<Timeout> {
        let win = dom::window()?;
        let callback = Closure::once(task);
        match win.set_timeout_with_callback_and_timeout_and_arguments_0(
            callback.as_ref().unchecked_ref(),
            sitekit_core::feedback::timeout_ms(delay),
        ) {
            Ok(id) => Some(Timeout {
                id,
                _callback: callback,
            }),
            Err(err) => {
                log::error!("Failed to schedule search: {}", dom::js_error_message(&err));
                None
            }
        }
    }

    fn cancel(&self, handle: Option<Timeout>) {
        if let Some(timeout) = handle
            && let Some(win) = dom::window()
        {
            win.clear_timeout_with_handle(timeout.id);
        }
    }

    fn spawn(&self, task: LocalTask) {
        wasm_bindgen_futures::spawn_local(task);
    }
}

/// The page regions the search box controls. Missing regions are skipped.
#[derive(Debug, Clone, Default)]
pub struct DomSearchView {
    search_count: Option<Element>,
    all_articles: Option<Element>,
    results_container: Option<Element>,
    results_list: Option<Element>,
    results_count: Option<Element>,
    no_results: Option<Element>,
}

impl DomSearchView {
    #[must_use]
    pub fn from_document() -> Self {
        Self {
            search_count: dom::by_id(SEARCH_COUNT_ID),
            all_articles: dom::by_id(ALL_ARTICLES_ID),
            results_container: dom::by_id(RESULTS_CONTAINER_ID),
            results_list: dom::by_id(RESULTS_LIST_ID),
            results_count: dom::by_id(RESULTS_COUNT_ID),
            no_results: dom::by_id(NO_RESULTS_ID),
        }
    }

    fn show_only(&self, visible: Option<&Element>) {
        for region in [
            &self.all_articles,
            &self.results_container,
            &self.no_results,
        ]
        .into_iter()
        .flatten()
        {
            dom::set_hidden(region, Some(region) != visible);
        }
    }
}

impl SearchView for DomSearchView {
    fn show_total(&self, total: usize) {
        if let Some(count) = &self.search_count {
            count.set_text_content(Some(&total.to_string()));
        }
    }

    fn show_all(&self) {
        self.show_only(self.all_articles.as_ref());
    }

    fn show_results(&self, count: usize, markup: &str) {
        self.show_only(self.results_container.as_ref());
        if let Some(counter) = &self.results_count {
            counter.set_text_content(Some(&count.to_string()));
        }
        if let Some(list) = &self.results_list {
            list.set_inner_html(markup);
        }
    }

    fn show_empty(&self) {
        self.show_only(self.no_results.as_ref());
    }
}

/// Wire `#search-input`. No-op on pages without a search box.
pub fn init_search(config: &SiteConfig) {
    let Some(input) = dom::by_id(SEARCH_INPUT_ID)
        .and_then(|el| el.dyn_into::<HtmlInputElement>().ok())
    else {
        return;
    };

    let controller = SearchController::new(
        SearchIndexProvider::new(FetchIndexSource, paths::asset_path(&config.index_path)),
        Debouncer::new(TimeoutScheduler, config.debounce()),
        DomSearchView::from_document(),
        LogSink,
    );

    let initializing = std::rc::Rc::clone(&controller);
    wasm_bindgen_futures::spawn_local(async move {
        initializing.initialize().await;
    });

    let field = input.clone();
    dom::listen(&input, "input", move |_| controller.on_input(&field.value()));
}
