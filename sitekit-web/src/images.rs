//! Deferred image loading for `img[data-src]`.

use js_sys::Array;
use wasm_bindgen::JsCast;
use wasm_bindgen::closure::Closure;
use web_sys::{HtmlImageElement, IntersectionObserver, IntersectionObserverEntry};

use crate::dom;

const LOADING_CLASS: &str = "loading";

fn reveal(entry: &IntersectionObserverEntry, observer: &IntersectionObserver) {
    if !entry.is_intersecting() {
        return;
    }
    let target = entry.target();
    let Ok(image) = target.dyn_into::<HtmlImageElement>() else {
        return;
    };
    if let Some(source) = image.get_attribute("data-src") {
        image.set_src(&source);
    }
    let _ = image.class_list().remove_1(LOADING_CLASS);
    observer.unobserve(&image);
}

/// Observe every `img[data-src]` and load it when it scrolls into view. Skipped when
/// the browser lacks `IntersectionObserver`.
pub fn init_lazy_images() {
    if !dom::has_global("IntersectionObserver") {
        return;
    }
    let Some(images) = dom::document().and_then(|doc| doc.query_selector_all("img[data-src]").ok())
    else {
        return;
    };

    let callback = Closure::<dyn FnMut(Array, IntersectionObserver)>::new(
        |entries: Array, observer: IntersectionObserver| {
            for entry in entries.iter() {
                if let Ok(entry) = entry.dyn_into::<IntersectionObserverEntry>() {
                    reveal(&entry, &observer);
                }
            }
        },
    );
    let observer = match IntersectionObserver::new(callback.as_ref().unchecked_ref()) {
        Ok(observer) => observer,
        Err(err) => {
            log::error!("Lazy loading disabled: {}", dom::js_error_message(&err));
            return;
        }
    };
    callback.forget();

    for index in 0..images.length() {
        if let Some(image) = images
            .item(index)
            .and_then(|node| node.dyn_into::<web_sys::Element>().ok())
        {
            observer.observe(&image);
        }
    }
}
