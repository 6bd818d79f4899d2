//! Outbound share links.

use std::str::FromStr;

use crate::error::SiteError;

/// Window features for the share popup.
pub const SHARE_WINDOW_FEATURES: &str = "width=600,height=400";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SharePlatform {
    Twitter,
    LinkedIn,
    Facebook,
}

impl SharePlatform {
    /// Share URL for a page. Both arguments are percent-encoded.
    #[must_use]
    pub fn share_url(self, page_url: &str, title: &str) -> String {
        let url = urlencoding::encode(page_url);
        match self {
            Self::Twitter => format!(
                "https://twitter.com/intent/tweet?url={url}&text={}",
                urlencoding::encode(title)
            ),
            Self::LinkedIn => {
                format!("https://www.linkedin.com/sharing/share-offsite/?url={url}")
            }
            Self::Facebook => format!("https://www.facebook.com/sharer/sharer.php?u={url}"),
        }
    }
}

impl FromStr for SharePlatform {
    type Err = SiteError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "twitter" => Ok(Self::Twitter),
            "linkedin" => Ok(Self::LinkedIn),
            "facebook" => Ok(Self::Facebook),
            other => Err(SiteError::UnknownPlatform(other.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PAGE: &str = "https://example.com/posts/a b/?x=1&y=2";

    #[test]
    fn twitter_link_carries_url_and_title() {
        let link = SharePlatform::Twitter.share_url(PAGE, "Rust & Wasm");
        assert_eq!(
            link,
            "https://twitter.com/intent/tweet?url=https%3A%2F%2Fexample.com%2Fposts%2Fa%20b%2F%3Fx%3D1%26y%3D2&text=Rust%20%26%20Wasm"
        );
    }

    #[test]
    fn linkedin_and_facebook_carry_only_the_url() {
        let linkedin = SharePlatform::LinkedIn.share_url("https://example.com/", "ignored");
        assert_eq!(
            linkedin,
            "https://www.linkedin.com/sharing/share-offsite/?url=https%3A%2F%2Fexample.com%2F"
        );
        let facebook = SharePlatform::Facebook.share_url("https://example.com/", "ignored");
        assert_eq!(
            facebook,
            "https://www.facebook.com/sharer/sharer.php?u=https%3A%2F%2Fexample.com%2F"
        );
    }

    #[test]
    fn parses_known_platforms_only() {
        assert_eq!("linkedin".parse::<SharePlatform>().unwrap(), SharePlatform::LinkedIn);
        let err = "myspace".parse::<SharePlatform>().unwrap_err();
        assert_eq!(err.to_string(), "unknown share platform: myspace");
    }
}
