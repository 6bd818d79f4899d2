//! Case-insensitive substring filtering over the search index.

use crate::post::Post;

/// A non-blank search query.
///
/// Holds both the trimmed text (used for highlighting, original case preserved) and
/// its lower-cased form (used for matching).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchQuery {
    text: String,
    needle: String,
}

impl SearchQuery {
    /// Returns `None` for empty or whitespace-only input.
    #[must_use]
    pub fn parse(raw: &str) -> Option<Self> {
        let text = raw.trim();
        if text.is_empty() {
            return None;
        }
        Some(Self {
            text: text.to_string(),
            needle: text.to_lowercase(),
        })
    }

    /// The trimmed query as typed.
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// The lower-cased query used for matching.
    #[must_use]
    pub fn needle(&self) -> &str {
        &self.needle
    }

    /// Posts whose searchable fields contain the query, in input order.
    #[must_use]
    pub fn filter<'a>(&self, posts: &'a [Post]) -> Vec<&'a Post> {
        posts.iter().filter(|post| post.matches(&self.needle)).collect()
    }
}

/// Filter `posts` by a raw query string.
///
/// A blank query yields an empty result; callers treat that as "show everything",
/// not "show nothing".
#[must_use]
pub fn search_posts<'a>(posts: &'a [Post], query: &str) -> Vec<&'a Post> {
    SearchQuery::parse(query).map_or_else(Vec::new, |q| q.filter(posts))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn post(title: &str, category: &str, keywords: Option<&str>) -> Post {
        Post {
            title: title.to_string(),
            excerpt: format!("{title} excerpt"),
            category: category.to_string(),
            content: String::from("body text"),
            keywords: keywords.map(str::to_string),
            url: format!("/posts/{}/", title.to_lowercase().replace(' ', "-")),
            date: String::from("2024-01-01"),
        }
    }

    fn fixture() -> Vec<Post> {
        vec![
            post("Intro to Caching", "Systems", Some("lru")),
            post("Ownership in Rust", "Rust", None),
            post("Cache Lines", "Hardware", Some("cpu, memory")),
        ]
    }

    #[test]
    fn blank_queries_yield_nothing() {
        let posts = fixture();
        for query in ["", " ", "\t\n  "] {
            assert!(search_posts(&posts, query).is_empty(), "query {query:?}");
        }
        assert!(SearchQuery::parse("   ").is_none());
    }

    #[test]
    fn matching_is_case_insensitive_and_trimmed() {
        let posts = fixture();
        let hits = search_posts(&posts, "  CACHING ");
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].title, "Intro to Caching");
    }

    #[test]
    fn results_keep_index_order() {
        let posts = fixture();
        let titles: Vec<&str> = search_posts(&posts, "cach")
            .into_iter()
            .map(|p| p.title.as_str())
            .collect();
        assert_eq!(titles, ["Intro to Caching", "Cache Lines"]);
    }

    #[test]
    fn every_hit_contains_the_query_somewhere() {
        let posts = fixture();
        for query in ["rust", "Sys", "memory", "excerpt", "body", "e"] {
            let needle = query.to_lowercase();
            for hit in search_posts(&posts, query) {
                assert!(
                    hit.searchable_fields()
                        .any(|f| f.to_lowercase().contains(&needle)),
                    "{} does not contain {query}",
                    hit.title
                );
            }
        }
    }

    #[test]
    fn filtering_is_idempotent() {
        let posts = fixture();
        for query in ["cache", "rust", "zzz", "E"] {
            let once: Vec<Post> = search_posts(&posts, query).into_iter().cloned().collect();
            let twice: Vec<Post> = search_posts(&once, query).into_iter().cloned().collect();
            assert_eq!(once, twice, "query {query:?}");
        }
    }

    #[test]
    fn absent_keywords_are_skipped() {
        let posts = fixture();
        assert!(search_posts(&posts, "lru").iter().all(|p| p.keywords.is_some()));
        assert!(search_posts(&posts, "none").is_empty());
    }

    #[test]
    fn query_keeps_original_case_for_display() {
        let query = SearchQuery::parse(" C++ ").unwrap();
        assert_eq!(query.text(), "C++");
        assert_eq!(query.needle(), "c++");
    }
}
