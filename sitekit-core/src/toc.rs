//! Table of contents built from the article's `h2`/`h3` headings.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeadingLevel {
    H2,
    H3,
}

impl HeadingLevel {
    /// Level for an element tag name (`H2`, `h3`, ...).
    #[must_use]
    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag.to_ascii_lowercase().as_str() {
            "h2" => Some(Self::H2),
            "h3" => Some(Self::H3),
            _ => None,
        }
    }

    /// Indentation depth in the contents list.
    #[must_use]
    pub const fn depth(self) -> u8 {
        match self {
            Self::H2 => 0,
            Self::H3 => 1,
        }
    }
}

/// A heading as found in the article.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Heading {
    pub level: HeadingLevel,
    pub id: Option<String>,
    pub text: String,
}

/// One link in the contents list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TocEntry {
    pub id: String,
    pub text: String,
    pub level: HeadingLevel,
    /// The heading had no id and must be given [`TocEntry::id`].
    pub assigned_id: bool,
}

const LINK_BASE_CLASS: &str = "block py-1.5 px-3 text-sm hover:text-black-600 dark:hover:text-black-400 transition-colors rounded";

impl TocEntry {
    #[must_use]
    pub fn href(&self) -> String {
        format!("#{}", self.id)
    }

    #[must_use]
    pub fn class_name(&self) -> String {
        let level_class = match self.level {
            HeadingLevel::H2 => "font-medium text-gray-900 dark:text-white",
            HeadingLevel::H3 => "ml-4 text-gray-700 dark:text-gray-300",
        };
        format!("{LINK_BASE_CLASS} {level_class}")
    }
}

/// Entries for `headings` in document order. Headings without an id are named
/// `heading-{n}` after their position in the list.
#[must_use]
pub fn build_toc(headings: &[Heading]) -> Vec<TocEntry> {
    headings
        .iter()
        .enumerate()
        .map(|(index, heading)| {
            let existing = heading.id.as_deref().filter(|id| !id.is_empty());
            TocEntry {
                id: existing.map_or_else(|| format!("heading-{index}"), str::to_string),
                text: heading.text.clone(),
                level: heading.level,
                assigned_id: existing.is_none(),
            }
        })
        .collect()
}

/// Expanded/collapsed state of the contents panel, stored in the panel's inline
/// `display` style.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TocPanel {
    expanded: bool,
}

impl TocPanel {
    /// State for the panel's current inline `display` value. Anything other than
    /// `none` (including unset) counts as expanded.
    #[must_use]
    pub fn from_display(display: &str) -> Self {
        Self {
            expanded: display.trim() != "none",
        }
    }

    #[must_use]
    pub const fn is_expanded(self) -> bool {
        self.expanded
    }

    #[must_use]
    pub const fn toggled(self) -> Self {
        Self {
            expanded: !self.expanded,
        }
    }

    #[must_use]
    pub const fn display(self) -> &'static str {
        if self.expanded { "block" } else { "none" }
    }

    #[must_use]
    pub const fn chevron_transform(self) -> &'static str {
        if self.expanded {
            "rotate(0deg)"
        } else {
            "rotate(-90deg)"
        }
    }
}
