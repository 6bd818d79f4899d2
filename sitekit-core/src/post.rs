//! Post records and the in-memory search index.

use serde::{Deserialize, Serialize};
use std::rc::Rc;

use crate::search::SearchQuery;

/// A single searchable content item, as emitted by the site generator into
/// `search.json`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Post {
    pub title: String,
    pub excerpt: String,
    pub category: String,
    pub content: String,
    /// Absent in some site data; an absent value never matches.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub keywords: Option<String>,
    pub url: String,
    pub date: String,
}

impl Post {
    /// The five fields a query is matched against, in match order.
    pub fn searchable_fields(&self) -> impl Iterator<Item = &str> {
        [
            Some(self.title.as_str()),
            Some(self.excerpt.as_str()),
            Some(self.category.as_str()),
            Some(self.content.as_str()),
            self.keywords.as_deref(),
        ]
        .into_iter()
        .flatten()
    }

    /// Whether any searchable field contains `needle`, which must already be
    /// lower-cased.
    #[must_use]
    pub fn matches(&self, needle: &str) -> bool {
        self.searchable_fields()
            .any(|field| field.to_lowercase().contains(needle))
    }
}

/// Immutable, cheaply cloneable sequence of posts.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchIndex {
    posts: Rc<[Post]>,
}

impl SearchIndex {
    #[must_use]
    pub fn new(posts: Vec<Post>) -> Self {
        Self {
            posts: posts.into(),
        }
    }

    /// Parse a `search.json` body.
    ///
    /// # Errors
    ///
    /// Returns an error if the body is not a JSON array of post records.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str::<Vec<Post>>(json).map(Self::new)
    }

    #[must_use]
    pub fn posts(&self) -> &[Post] {
        &self.posts
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.posts.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.posts.is_empty()
    }

    /// Posts matching `query`, in index order.
    #[must_use]
    pub fn search(&self, query: &SearchQuery) -> Vec<&Post> {
        query.filter(&self.posts)
    }
}
