//! Result card markup for the search results list.

use chrono::{DateTime, NaiveDate, NaiveDateTime};

use crate::highlight::{Highlighter, highlight_html};
use crate::post::Post;

/// Format a post date the way the site prints it (`January 5, 2024`).
///
/// Accepts RFC 3339 and RFC 2822 timestamps, `YYYY-MM-DD HH:MM:SS +ZZZZ` (the site
/// generator's default), naive timestamps with a space or `T` separator and bare
/// dates. The calendar date is taken as written, without time zone conversion.
/// Anything else is returned unchanged.
#[must_use]
pub fn format_post_date(raw: &str) -> String {
    parse_post_date(raw).map_or_else(
        || raw.to_string(),
        |date| date.format("%B %-d, %Y").to_string(),
    )
}

const NAIVE_TIMESTAMPS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
];

/// The calendar date of a post timestamp, if it is in a recognised format.
#[must_use]
pub fn parse_post_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    DateTime::parse_from_rfc3339(raw)
        .or_else(|_| DateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S %z"))
        .or_else(|_| DateTime::parse_from_rfc2822(raw))
        .map(|dt| dt.date_naive())
        .ok()
        .or_else(|| {
            NAIVE_TIMESTAMPS.iter().find_map(|format| {
                NaiveDateTime::parse_from_str(raw, format)
                    .ok()
                    .map(|dt| dt.date())
            })
        })
        .or_else(|| NaiveDate::parse_from_str(raw, "%Y-%m-%d").ok())
}

/// Markup for one result card. Title and excerpt are highlighted; every field is
/// escaped.
#[must_use]
pub fn render_result_card(post: &Post, highlighter: Option<&Highlighter>) -> String {
    format!(
        concat!(
            r#"<article class="modern-card bg-white dark:bg-dark-800 border border-gray-200 dark:border-dark-700 rounded-lg p-6 hover:shadow-lg transition-shadow">"#,
            r#"<a href="{url}" class="block">"#,
            r#"<div class="flex items-start justify-between mb-2">"#,
            r#"<h3 class="text-lg font-semibold text-gray-900 dark:text-white hover:text-black-600 dark:hover:text-black-400 transition-colors">{title}</h3>"#,
            r#"<span class="ml-4 text-xs px-2 py-1 rounded-full bg-black-100 dark:bg-black-900 text-black-800 dark:text-black-300 whitespace-nowrap">{category}</span>"#,
            r#"</div>"#,
            r#"<p class="text-gray-600 dark:text-gray-400 mb-3">{excerpt}</p>"#,
            r#"<div class="flex items-center text-sm text-gray-500 dark:text-gray-500">"#,
            r#"<time datetime="{datetime}">{date}</time>"#,
            r#"</div></a></article>"#,
        ),
        url = html_escape::encode_double_quoted_attribute(&post.url),
        title = highlight_html(&post.title, highlighter),
        category = html_escape::encode_text(&post.category),
        excerpt = highlight_html(&post.excerpt, highlighter),
        datetime = html_escape::encode_double_quoted_attribute(&post.date),
        date = html_escape::encode_text(&format_post_date(&post.date)),
    )
}

/// Markup for the whole results list, cards concatenated in order.
#[must_use]
pub fn render_results(posts: &[&Post], highlighter: Option<&Highlighter>) -> String {
    posts
        .iter()
        .map(|post| render_result_card(post, highlighter))
        .collect()
}
