//! Light/dark theme on the root element.

use std::rc::Rc;

use sitekit_core::theme::DARK_CLASS;
use sitekit_core::{SiteConfig, Theme, ThemeManager};
use wasm_bindgen::JsCast;
use web_sys::{MediaQueryList, MediaQueryListEvent};

use crate::dom;
use crate::storage::LocalPreferences;

pub const THEME_TOGGLE_ID: &str = "theme-toggle";
const DARK_SCHEME_QUERY: &str = "(prefers-color-scheme: dark)";

fn dark_scheme() -> Option<MediaQueryList> {
    dom::window()?.match_media(DARK_SCHEME_QUERY).ok().flatten()
}

fn system_prefers_dark() -> bool {
    dark_scheme().is_some_and(|query| query.matches())
}

/// Theme currently shown, read from the root element's classes.
#[must_use]
pub fn current_theme() -> Theme {
    let dark = dom::document()
        .and_then(|doc| doc.document_element())
        .is_some_and(|root| root.class_list().contains(DARK_CLASS));
    if dark { Theme::Dark } else { Theme::Light }
}

pub fn apply_theme(theme: Theme) {
    if let Some(root) = dom::document().and_then(|doc| doc.document_element()) {
        let classes = root.class_list();
        let _ = if theme.is_dark() {
            classes.add_1(DARK_CLASS)
        } else {
            classes.remove_1(DARK_CLASS)
        };
    }
}

/// Apply the initial theme and wire the toggle button and system scheme listener.
pub fn init_theme(config: &SiteConfig) {
    let manager = Rc::new(ThemeManager::new(LocalPreferences, config.theme_key.clone()));
    apply_theme(manager.initial(system_prefers_dark()));

    if let Some(button) = dom::by_id(THEME_TOGGLE_ID) {
        let manager = Rc::clone(&manager);
        dom::listen(&button, "click", move |_| {
            apply_theme(manager.toggle(current_theme()));
        });
    }

    if let Some(query) = dark_scheme() {
        dom::listen(&query, "change", move |event| {
            let Some(change) = event.dyn_ref::<MediaQueryListEvent>() else {
                return;
            };
            if let Some(theme) = manager.on_system_change(change.matches()) {
                apply_theme(theme);
            }
        });
    }
}
