//! Inline highlighting of query matches inside result text.

use regex::{Regex, RegexBuilder};

/// Opening tag wrapped around every highlighted match.
pub const MARK_OPEN: &str = r#"<mark class="bg-yellow-200 dark:bg-yellow-800">"#;
/// Closing tag for [`MARK_OPEN`].
pub const MARK_CLOSE: &str = "</mark>";

/// A run of text that either matched the query or did not.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Segment<'a> {
    Plain(&'a str),
    Match(&'a str),
}

/// Case-insensitive literal matcher for one query.
#[derive(Debug, Clone)]
pub struct Highlighter {
    pattern: Regex,
}

impl Highlighter {
    /// Build a highlighter for `query`. The query is matched literally; regex
    /// metacharacters such as `+` or `(` carry no meaning.
    ///
    /// Returns `None` for a blank query, or one too large for the regex engine.
    #[must_use]
    pub fn new(query: &str) -> Option<Self> {
        let query = query.trim();
        if query.is_empty() {
            return None;
        }
        RegexBuilder::new(&regex::escape(query))
            .case_insensitive(true)
            .build()
            .map_err(|err| log::warn!("Cannot highlight {query:?}: {err}"))
            .ok()
            .map(|pattern| Self { pattern })
    }

    /// Split `text` into plain and matched runs, preserving the original case.
    #[must_use]
    pub fn segments<'a>(&self, text: &'a str) -> Vec<Segment<'a>> {
        let mut segments = Vec::new();
        let mut cursor = 0;
        for found in self.pattern.find_iter(text) {
            if found.start() > cursor {
                segments.push(Segment::Plain(&text[cursor..found.start()]));
            }
            segments.push(Segment::Match(found.as_str()));
            cursor = found.end();
        }
        if cursor < text.len() {
            segments.push(Segment::Plain(&text[cursor..]));
        }
        segments
    }

    /// HTML for `text` with every match wrapped in a `<mark>` element. Each run is
    /// escaped independently.
    #[must_use]
    pub fn mark_html(&self, text: &str) -> String {
        let mut html = String::with_capacity(text.len());
        for segment in self.segments(text) {
            match segment {
                Segment::Plain(run) => html.push_str(&html_escape::encode_text(run)),
                Segment::Match(run) => {
                    html.push_str(MARK_OPEN);
                    html.push_str(&html_escape::encode_text(run));
                    html.push_str(MARK_CLOSE);
                }
            }
        }
        html
    }
}

/// Escaped `text`, highlighted when a highlighter is present.
#[must_use]
pub fn highlight_html(text: &str, highlighter: Option<&Highlighter>) -> String {
    highlighter.map_or_else(
        || html_escape::encode_text(text).into_owned(),
        |h| h.mark_html(text),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn marked(inner: &str) -> String {
        format!("{MARK_OPEN}{inner}{MARK_CLOSE}")
    }

    #[test]
    fn wraps_matches_preserving_case() {
        let h = Highlighter::new("caching").unwrap();
        assert_eq!(
            h.mark_html("Intro to Caching"),
            format!("Intro to {}", marked("Caching"))
        );
    }

    #[test]
    fn marks_every_occurrence() {
        let h = Highlighter::new("ab").unwrap();
        assert_eq!(
            h.segments("abXAB"),
            vec![Segment::Match("ab"), Segment::Plain("X"), Segment::Match("AB")]
        );
    }

    #[test]
    fn metacharacters_match_literally() {
        let h = Highlighter::new("C++").unwrap();
        assert_eq!(
            h.mark_html("Modern c++ and C"),
            format!("Modern {} and C", marked("c++"))
        );
        for query in ["(", "[a-z]", ".*", "^$", "\\", "a|b", "{2}", "?"] {
            let h = Highlighter::new(query).unwrap();
            assert!(h.segments("plain words").iter().all(|s| matches!(s, Segment::Plain(_))));
        }
    }

    #[test]
    fn escapes_markup_around_and_inside_matches() {
        let h = Highlighter::new("<b>").unwrap();
        assert_eq!(
            h.mark_html("use <b> & <i>"),
            format!("use {} &amp; &lt;i&gt;", marked("&lt;b&gt;"))
        );
    }

    #[test]
    fn blank_query_has_no_highlighter() {
        assert!(Highlighter::new("  ").is_none());
        assert_eq!(highlight_html("a < b", None), "a &lt; b");
    }

    #[test]
    fn text_without_matches_is_one_plain_run() {
        let h = Highlighter::new("zzz").unwrap();
        assert_eq!(h.segments("abc"), vec![Segment::Plain("abc")]);
        assert!(h.segments("").is_empty());
    }
}
