//! Thin helpers over `web-sys`. Every accessor returns `Option` so callers degrade
//! to a no-op outside a browser or when an element is missing.

use std::time::Duration;

use sitekit_core::feedback::timeout_ms;
use wasm_bindgen::JsCast;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::JsFuture;
use web_sys::{
    Document, Element, Event, EventTarget, HtmlElement, Response, ScrollBehavior,
    ScrollIntoViewOptions, ScrollLogicalPosition, Storage, Window,
};

/// Class used by the site's stylesheet to hide a region.
pub const HIDDEN_CLASS: &str = "hidden";

/// Retrieve the global `window` object.
#[must_use]
pub fn window() -> Option<Window> {
    web_sys::window()
}

/// Retrieve the document object for DOM interactions.
#[must_use]
pub fn document() -> Option<Document> {
    window()?.document()
}

#[must_use]
pub fn by_id(id: &str) -> Option<Element> {
    document()?.get_element_by_id(id)
}

#[must_use]
pub fn html_by_id(id: &str) -> Option<HtmlElement> {
    by_id(id)?.dyn_into::<HtmlElement>().ok()
}

/// Whether `name` exists on the global `window` (feature detection).
#[must_use]
pub fn has_global(name: &str) -> bool {
    window().is_some_and(|win| {
        js_sys::Reflect::has(&win, &JsValue::from_str(name)).unwrap_or(false)
    })
}

/// Convert a JavaScript value into a readable string for error reporting.
#[must_use]
pub fn js_error_message(value: &JsValue) -> String {
    value
        .as_string()
        .or_else(|| {
            value
                .dyn_ref::<js_sys::Error>()
                .map(|err| err.message().into())
        })
        .unwrap_or_else(|| format!("{value:?}"))
}

pub fn set_hidden(element: &Element, hidden: bool) {
    let classes = element.class_list();
    let _ = if hidden {
        classes.add_1(HIDDEN_CLASS)
    } else {
        classes.remove_1(HIDDEN_CLASS)
    };
}

#[must_use]
pub fn is_hidden(element: &Element) -> bool {
    element.class_list().contains(HIDDEN_CLASS)
}

/// Attach `handler` to `target` for the lifetime of the page.
pub fn listen(target: &EventTarget, event: &str, handler: impl FnMut(Event) + 'static) {
    let closure = Closure::<dyn FnMut(Event)>::new(handler);
    if let Err(err) =
        target.add_event_listener_with_callback(event, closure.as_ref().unchecked_ref())
    {
        log::error!(
            "Failed to listen for {event}: {}",
            js_error_message(&err)
        );
    }
    closure.forget();
}

/// Run `callback` once after `delay`. Fire-and-forget.
pub fn set_timeout(delay: Duration, callback: impl FnOnce() + 'static) {
    let Some(win) = window() else {
        log::error!("Failed to schedule timer: window unavailable");
        return;
    };
    let closure = Closure::once(callback);
    if let Err(err) = win.set_timeout_with_callback_and_timeout_and_arguments_0(
        closure.as_ref().unchecked_ref(),
        timeout_ms(delay),
    ) {
        log::error!("Failed to schedule timer: {}", js_error_message(&err));
    }
    closure.forget();
}

/// Run `callback` once the DOM is parsed: immediately when it already is,
/// otherwise on `DOMContentLoaded`.
pub fn when_ready(callback: impl FnOnce() + 'static) {
    let Some(doc) = document() else {
        return;
    };
    if doc.ready_state() != "loading" {
        callback();
        return;
    }
    let mut callback = Some(callback);
    listen(&doc, "DOMContentLoaded", move |_| {
        if let Some(callback) = callback.take() {
            callback();
        }
    });
}

/// Smoothly scroll `element` to the top of the viewport.
pub fn scroll_into_view_smooth(element: &Element) {
    let options = ScrollIntoViewOptions::new();
    options.set_behavior(ScrollBehavior::Smooth);
    options.set_block(ScrollLogicalPosition::Start);
    element.scroll_into_view_with_scroll_into_view_options(&options);
}

/// Perform a fetch request and return the browser `Response`.
///
/// # Errors
/// Returns an error if the fetch request fails or the response cannot be converted to `Response`.
#[allow(clippy::future_not_send)] // Wasm futures rely on `JsFuture`, which is not `Send`.
pub async fn fetch_response(url: &str) -> Result<Response, JsValue> {
    let win = window().ok_or_else(|| JsValue::from_str("window unavailable"))?;
    let resp_value = JsFuture::from(win.fetch_with_str(url)).await?;
    resp_value.dyn_into::<Response>()
}

/// Access the browser `localStorage` handle, if the browser allows it.
#[must_use]
pub fn local_storage() -> Option<Storage> {
    window()?.local_storage().ok().flatten()
}
