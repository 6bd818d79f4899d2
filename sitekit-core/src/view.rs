//! The search view state machine and the controller driving it.

use std::cell::Cell;
use std::rc::Rc;

use crate::IndexSource;
use crate::analytics::{AnalyticsEvent, EventSink};
use crate::debounce::{Debouncer, Scheduler};
use crate::highlight::Highlighter;
use crate::provider::SearchIndexProvider;
use crate::render::render_results;
use crate::search::SearchQuery;

/// Which of the three mutually exclusive regions is visible.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ViewState {
    /// Blank query: the unfiltered article list.
    #[default]
    All,
    /// Non-blank query with this many matches.
    Results(usize),
    /// Non-blank query without matches.
    Empty,
}

impl ViewState {
    #[must_use]
    pub const fn for_matches(count: usize) -> Self {
        if count == 0 { Self::Empty } else { Self::Results(count) }
    }
}

/// Thin page-update interface the controller renders into.
pub trait SearchView {
    /// Show the number of indexed posts.
    fn show_total(&self, total: usize);

    /// Show the unfiltered list, hide results and the placeholder.
    fn show_all(&self);

    /// Show `markup` in the results list with its count, hide the others.
    fn show_results(&self, count: usize, markup: &str);

    /// Show the "no results" placeholder, hide the others.
    fn show_empty(&self);
}

impl<V: SearchView + ?Sized> SearchView for Rc<V> {
    fn show_total(&self, total: usize) {
        (**self).show_total(total);
    }

    fn show_all(&self) {
        (**self).show_all();
    }

    fn show_results(&self, count: usize, markup: &str) {
        (**self).show_results(count, markup);
    }

    fn show_empty(&self) {
        (**self).show_empty();
    }
}

/// Keystroke → debounce → load → filter → render.
pub struct SearchController<S, T, V>
where
    S: IndexSource,
    T: Scheduler,
{
    provider: SearchIndexProvider<S>,
    debouncer: Debouncer<T>,
    view: V,
    analytics: Box<dyn EventSink>,
    state: Cell<ViewState>,
    /// Bumped by every keystroke and pass; a pass only renders if it is still the latest.
    generation: Cell<u64>,
}

impl<S, T, V> SearchController<S, T, V>
where
    S: IndexSource + 'static,
    T: Scheduler + 'static,
    V: SearchView + 'static,
{
    pub fn new(
        provider: SearchIndexProvider<S>,
        debouncer: Debouncer<T>,
        view: V,
        analytics: impl EventSink + 'static,
    ) -> Rc<Self> {
        Rc::new(Self {
            provider,
            debouncer,
            view,
            analytics: Box::new(analytics),
            state: Cell::new(ViewState::All),
            generation: Cell::new(0),
        })
    }

    #[must_use]
    pub const fn provider(&self) -> &SearchIndexProvider<S> {
        &self.provider
    }

    #[must_use]
    pub const fn view(&self) -> &V {
        &self.view
    }

    /// State left by the last completed filter pass.
    #[must_use]
    pub fn state(&self) -> ViewState {
        self.state.get()
    }

    /// Load the index up front and publish the post count.
    pub async fn initialize(&self) -> usize {
        let total = self.provider.load().await.len();
        self.view.show_total(total);
        total
    }

    fn next_generation(&self) -> u64 {
        let generation = self.generation.get() + 1;
        self.generation.set(generation);
        generation
    }

    /// Handle one input event. Only the last query of a burst is filtered, and a
    /// pass still waiting on the index is dropped.
    pub fn on_input(self: &Rc<Self>, raw: &str) {
        self.next_generation();
        let controller = Rc::clone(self);
        let raw = raw.to_string();
        self.debouncer.schedule(move || {
            let runner = Rc::clone(&controller);
            controller
                .debouncer
                .scheduler()
                .spawn(Box::pin(async move {
                    runner.run_query(&raw).await;
                }));
        });
    }

    /// Filter and render immediately, bypassing the debounce.
    ///
    /// A pass overtaken by newer input while loading the index renders nothing and
    /// returns the state left by the newer pass.
    pub async fn run_query(&self, raw: &str) -> ViewState {
        let generation = self.next_generation();
        let Some(query) = SearchQuery::parse(raw) else {
            self.view.show_all();
            self.state.set(ViewState::All);
            return ViewState::All;
        };

        let index = self.provider.load().await;
        if self.generation.get() != generation {
            log::debug!("Dropping stale search {:?}", query.text());
            return self.state.get();
        }

        let hits = index.search(&query);
        if hits.is_empty() {
            self.view.show_empty();
        } else {
            let highlighter = Highlighter::new(query.text());
            let markup = render_results(&hits, highlighter.as_ref());
            self.view.show_results(hits.len(), &markup);
        }
        log::debug!("Search {:?} matched {} posts", query.text(), hits.len());

        self.analytics.record(&AnalyticsEvent::search(raw, hits.len()));
        let state = ViewState::for_matches(hits.len());
        self.state.set(state);
        state
    }
}
