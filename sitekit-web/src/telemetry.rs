//! Page analytics and runtime error capture. Events are only logged.

use serde_json::{Map, Value};
use sitekit_core::{AnalyticsEvent, EventSink, LogSink};
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::ErrorEvent;

use crate::dom;

pub fn record(event: &AnalyticsEvent) {
    LogSink.record(event);
}

/// Event properties from a JS value. `undefined`, `null` and anything that is not a
/// plain object yield no properties.
#[must_use]
pub fn properties_from_js(properties: JsValue) -> Map<String, Value> {
    if properties.is_undefined() || properties.is_null() {
        return Map::new();
    }
    serde_wasm_bindgen::from_value(properties).unwrap_or_else(|err| {
        log::warn!("Ignoring analytics properties: {err}");
        Map::new()
    })
}

/// Record a custom event from page markup.
#[wasm_bindgen(js_name = trackEvent)]
pub fn track_event(name: &str, properties: JsValue) {
    record(&AnalyticsEvent::new(name, properties_from_js(properties)));
}

pub fn track_page_view() {
    let title = dom::document().map(|doc| doc.title()).unwrap_or_default();
    let location = dom::window()
        .and_then(|win| win.location().href().ok())
        .unwrap_or_default();
    record(&AnalyticsEvent::page_view(&title, &location));
}

/// Listen for page load timing, uncaught errors and connectivity changes.
pub fn watch_page() {
    let Some(win) = dom::window() else {
        return;
    };

    dom::listen(&win, "load", |_| {
        if let Some(performance) = dom::window().and_then(|win| win.performance()) {
            record(&AnalyticsEvent::page_load_time(performance.now()));
        }
    });

    dom::listen(&win, "error", |event| {
        let Some(error) = event.dyn_ref::<ErrorEvent>() else {
            return;
        };
        log::error!("JavaScript error: {}", dom::js_error_message(&error.error()));
        record(&AnalyticsEvent::javascript_error(
            &error.message(),
            &error.filename(),
            error.lineno(),
        ));
    });

    dom::listen(&win, "online", |_| log::info!("Back online"));
    dom::listen(&win, "offline", |_| log::info!("Gone offline"));
}
