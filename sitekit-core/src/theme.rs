//! Light/dark theme resolution and persistence.

use std::cell::RefCell;
use std::collections::HashMap;
use std::fmt;

use crate::PreferenceStore;

/// Storage key holding the saved theme.
pub const THEME_STORAGE_KEY: &str = "theme";

/// Class toggled on the root element for the dark theme.
pub const DARK_CLASS: &str = "dark";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Dark => "dark",
        }
    }

    #[must_use]
    pub const fn toggled(self) -> Self {
        match self {
            Self::Light => Self::Dark,
            Self::Dark => Self::Light,
        }
    }

    #[must_use]
    pub const fn is_dark(self) -> bool {
        matches!(self, Self::Dark)
    }

    /// Theme for a saved preference and the system color scheme.
    ///
    /// A saved `dark` wins; any other saved value means light. Without a saved value
    /// (absent or empty) the system preference decides.
    #[must_use]
    pub fn resolve(saved: Option<&str>, system_prefers_dark: bool) -> Self {
        match saved.filter(|value| !value.is_empty()) {
            Some(value) if value == Self::Dark.as_str() => Self::Dark,
            Some(_) => Self::Light,
            None if system_prefers_dark => Self::Dark,
            None => Self::Light,
        }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Reads and writes the theme preference through a [`PreferenceStore`].
pub struct ThemeManager<P> {
    store: P,
    key: String,
}

impl<P: PreferenceStore> ThemeManager<P> {
    pub fn new(store: P, key: impl Into<String>) -> Self {
        Self {
            store,
            key: key.into(),
        }
    }

    fn saved(&self) -> Option<String> {
        self.store.get(&self.key).filter(|value| !value.is_empty())
    }

    /// Theme to apply at page load.
    #[must_use]
    pub fn initial(&self, system_prefers_dark: bool) -> Theme {
        Theme::resolve(self.saved().as_deref(), system_prefers_dark)
    }

    /// Flip `current`, persist and return the new theme.
    pub fn toggle(&self, current: Theme) -> Theme {
        let next = current.toggled();
        self.store.set(&self.key, next.as_str());
        log::debug!("Theme switched to {next}");
        next
    }

    /// Theme to apply after the system color scheme changed, or `None` when a saved
    /// preference takes precedence.
    #[must_use]
    pub fn on_system_change(&self, prefers_dark: bool) -> Option<Theme> {
        if self.saved().is_some() {
            return None;
        }
        Some(if prefers_dark { Theme::Dark } else { Theme::Light })
    }
}

/// In-memory [`PreferenceStore`] for hosts without browser storage.
#[derive(Debug, Default)]
pub struct MemoryPreferences {
    values: RefCell<HashMap<String, String>>,
}

impl MemoryPreferences {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl PreferenceStore for MemoryPreferences {
    fn get(&self, key: &str) -> Option<String> {
        self.values.borrow().get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) {
        self.values
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
    }
}
