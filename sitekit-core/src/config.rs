//! Site-level settings, read from an optional JSON block embedded in the page.

use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::error::SiteError;
use crate::theme::THEME_STORAGE_KEY;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    /// Path of the pre-built search index, relative to the site base.
    pub index_path: String,
    /// Quiet period before a search runs.
    pub debounce_ms: u64,
    /// Storage key of the theme preference.
    pub theme_key: String,
    /// Minimum log level (`error`, `warn`, `info`, `debug`, `trace`, `off`).
    pub log_level: String,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            index_path: String::from("/search.json"),
            debounce_ms: 300,
            theme_key: String::from(THEME_STORAGE_KEY),
            log_level: String::from("info"),
        }
    }
}

impl SiteConfig {
    /// Parse a config block. Missing fields take their defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if the JSON is malformed or a value is out of range.
    pub fn from_json(json: &str) -> Result<Self, SiteError> {
        let config: Self =
            serde_json::from_str(json).map_err(|err| SiteError::Config(err.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), SiteError> {
        if self.index_path.trim().is_empty() {
            return Err(SiteError::Config(String::from("index_path is empty")));
        }
        if self.theme_key.trim().is_empty() {
            return Err(SiteError::Config(String::from("theme_key is empty")));
        }
        if self.level_filter().is_none() {
            return Err(SiteError::Config(format!(
                "unknown log_level {:?}",
                self.log_level
            )));
        }
        Ok(())
    }

    #[must_use]
    pub const fn debounce(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }

    /// `log_level` as a [`log::LevelFilter`].
    #[must_use]
    pub fn level_filter(&self) -> Option<log::LevelFilter> {
        self.log_level.parse().ok()
    }
}
