use serde::Serialize;
use sitekit_core::{SearchIndex, parse_post_date};
use std::collections::HashMap;

/// Content problems found in a search index.
#[derive(Debug, Clone, Default, Serialize)]
pub struct AuditReport {
    pub posts: usize,
    /// Titles of posts without keywords. Informational only.
    pub missing_keywords: Vec<String>,
    /// `(title, date)` pairs whose date is in no recognised format.
    pub unparseable_dates: Vec<(String, String)>,
    pub duplicate_urls: Vec<String>,
    pub absolute_urls: Vec<String>,
    /// Urls of posts with a blank title.
    pub empty_titles: Vec<String>,
}

impl AuditReport {
    /// True when nothing but informational findings remain.
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.issue_count() == 0
    }

    #[must_use]
    pub fn issue_count(&self) -> usize {
        self.unparseable_dates.len()
            + self.duplicate_urls.len()
            + self.absolute_urls.len()
            + self.empty_titles.len()
    }
}

/// Check every post in the index.
#[must_use]
pub fn audit(index: &SearchIndex) -> AuditReport {
    let mut report = AuditReport {
        posts: index.len(),
        ..AuditReport::default()
    };
    let mut seen: HashMap<&str, usize> = HashMap::new();

    for post in index.posts() {
        if post.keywords.as_deref().is_none_or(|k| k.trim().is_empty()) {
            report.missing_keywords.push(post.title.clone());
        }
        if parse_post_date(&post.date).is_none() {
            report
                .unparseable_dates
                .push((post.title.clone(), post.date.clone()));
        }
        if is_absolute(&post.url) {
            report.absolute_urls.push(post.url.clone());
        }
        if post.title.trim().is_empty() {
            report.empty_titles.push(post.url.clone());
        }
        *seen.entry(post.url.as_str()).or_default() += 1;
    }

    let mut duplicates: Vec<String> = seen
        .into_iter()
        .filter(|(_, count)| *count > 1)
        .map(|(url, _)| url.to_string())
        .collect();
    duplicates.sort();
    report.duplicate_urls = duplicates;

    log::debug!(
        "Audited {} posts, {} issues",
        report.posts,
        report.issue_count()
    );
    report
}

fn is_absolute(url: &str) -> bool {
    url.starts_with("//") || url.contains("://")
}

#[cfg(test)]
mod tests {
    use super::*;
    use sitekit_core::Post;

    fn post(title: &str, url: &str, date: &str, keywords: Option<&str>) -> Post {
        Post {
            title: title.to_string(),
            excerpt: String::new(),
            category: String::from("Misc"),
            content: String::new(),
            keywords: keywords.map(str::to_string),
            url: url.to_string(),
            date: date.to_string(),
        }
    }

    #[test]
    fn sample_site_index_is_clean() {
        let index = SearchIndex::from_json(include_str!("../../sitekit-web/static/search.json"))
            .expect("sample index parses");
        let report = audit(&index);
        assert_eq!(report.posts, 6);
        assert!(report.is_clean(), "{report:?}");
        assert_eq!(report.missing_keywords.len(), 2);
    }

    #[test]
    fn flags_each_kind_of_problem() {
        let index = SearchIndex::new(vec![
            post("One", "/one/", "2024-01-01", Some("a")),
            post("Two", "/one/", "yesterday", Some("b")),
            post("  ", "https://elsewhere.example/post", "2024-01-03", None),
        ]);
        let report = audit(&index);

        assert_eq!(report.duplicate_urls, vec!["/one/".to_string()]);
        assert_eq!(
            report.unparseable_dates,
            vec![("Two".to_string(), "yesterday".to_string())]
        );
        assert_eq!(report.absolute_urls.len(), 1);
        assert_eq!(report.empty_titles.len(), 1);
        assert_eq!(report.issue_count(), 4);
        assert!(!report.is_clean());
    }

    #[test]
    fn browser_readable_dates_are_not_issues() {
        let index = SearchIndex::new(vec![
            post("One", "/one/", "2024-01-05T09:00:00", Some("a")),
            post("Two", "/two/", "2024-01-05T09:00", Some("b")),
            post("Three", "/three/", "Fri, 05 Jan 2024 09:00:00 +0000", Some("c")),
        ]);
        let report = audit(&index);
        assert!(report.unparseable_dates.is_empty(), "{report:?}");
        assert!(report.is_clean());
    }

    #[test]
    fn empty_keywords_count_as_missing() {
        let index = SearchIndex::new(vec![post("One", "/one/", "2024-01-01", Some(" "))]);
        let report = audit(&index);
        assert_eq!(report.missing_keywords, vec!["One".to_string()]);
        assert!(report.is_clean());
    }
}
