//! sitekit core
//!
//! Platform-agnostic behavior for a static blog: the search index provider, the
//! filter and highlighter, the search view state machine and its debouncer, plus the
//! small decisions behind theme, navigation, table of contents, sharing and forms.
//! This crate has no DOM or browser dependencies.

pub mod analytics;
pub mod config;
pub mod debounce;
pub mod error;
pub mod feedback;
pub mod highlight;
pub mod menu;
pub mod post;
pub mod provider;
pub mod render;
pub mod search;
pub mod share;
pub mod theme;
pub mod toc;
pub mod view;

use std::future::Future;

// Re-export commonly used types
pub use analytics::{AnalyticsEvent, EventSink, LogSink};
pub use config::SiteConfig;
pub use debounce::{Debouncer, LocalTask, Scheduler, VirtualScheduler};
pub use error::SiteError;
pub use feedback::{CopyFeedback, FormKind, SubmissionPlan};
pub use highlight::{Highlighter, Segment};
pub use menu::{MenuEvent, MobileMenu};
pub use post::{Post, SearchIndex};
pub use provider::{SearchIndexProvider, StaticSource};
pub use render::{format_post_date, parse_post_date, render_result_card, render_results};
pub use search::{SearchQuery, search_posts};
pub use share::SharePlatform;
pub use theme::{MemoryPreferences, Theme, ThemeManager};
pub use toc::{Heading, HeadingLevel, TocEntry, TocPanel, build_toc};
pub use view::{SearchController, SearchView, ViewState};

/// Trait for abstracting how the raw search index is fetched.
/// Platform-specific implementations should provide this
pub trait IndexSource {
    type Error: std::error::Error + 'static;

    /// Fetch the raw body stored at `path`.
    ///
    /// # Errors
    ///
    /// Returns an error when the resource cannot be retrieved or the response is not
    /// a success.
    fn fetch(&self, path: &str) -> impl Future<Output = Result<String, Self::Error>>;
}

/// Trait for abstracting the persisted user preferences (browser `localStorage`).
/// Platform-specific implementations should provide this
pub trait PreferenceStore {
    /// Read a stored value. Missing keys and unavailable storage both yield `None`.
    fn get(&self, key: &str) -> Option<String>;

    /// Persist a value. Storage failures are swallowed by the implementation.
    fn set(&self, key: &str, value: &str);
}

impl<T: PreferenceStore + ?Sized> PreferenceStore for &T {
    fn get(&self, key: &str) -> Option<String> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) {
        (**self).set(key, value);
    }
}
