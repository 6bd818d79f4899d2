//! "Copy" buttons on code blocks.

use sitekit_core::CopyFeedback;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::JsFuture;
use web_sys::{HtmlDocument, HtmlElement, HtmlTextAreaElement};

use crate::dom;

fn code_text(button: &HtmlElement) -> Option<String> {
    button
        .parent_element()?
        .query_selector("code")
        .ok()
        .flatten()?
        .text_content()
}

/// Copy the `<code>` block next to `button`, falling back to a selection-based copy
/// when the Clipboard API refuses.
#[wasm_bindgen(js_name = copyToClipboard)]
pub fn copy_to_clipboard(button: HtmlElement) {
    let Some(text) = code_text(&button) else {
        log::warn!("Copy button has no code block next to it");
        return;
    };
    let Some(win) = dom::window() else {
        return;
    };

    let promise = win.navigator().clipboard().write_text(&text);
    wasm_bindgen_futures::spawn_local(async move {
        match JsFuture::from(promise).await {
            Ok(_) => show_copied(&button),
            Err(err) => {
                log::error!("Failed to copy text: {}", dom::js_error_message(&err));
                copy_with_selection(&button, &text);
            }
        }
    });
}

fn copy_with_selection(button: &HtmlElement, text: &str) {
    let Some(doc) = dom::document() else {
        return;
    };
    let Some(body) = doc.body() else {
        log::error!("Cannot copy to clipboard: document.body is not available");
        return;
    };
    let Some(area) = doc
        .create_element("textarea")
        .ok()
        .and_then(|el| el.dyn_into::<HtmlTextAreaElement>().ok())
    else {
        log::error!("Fallback copy failed: cannot create a textarea");
        return;
    };

    area.set_value(text);
    if let Err(err) = body.append_child(&area) {
        log::error!("Fallback copy failed: {}", dom::js_error_message(&err));
        return;
    }
    area.select();

    match doc.dyn_ref::<HtmlDocument>().map(|html| html.exec_command("copy")) {
        Some(Ok(_)) => show_copied(button),
        Some(Err(err)) => log::error!("Fallback copy failed: {}", dom::js_error_message(&err)),
        None => log::error!("Fallback copy failed: execCommand unavailable"),
    }

    let _ = body.remove_child(&area);
}

fn show_copied(button: &HtmlElement) {
    let original = button.text_content().unwrap_or_default();
    button.set_text_content(Some(CopyFeedback::LABEL));
    let _ = button.class_list().add_1(CopyFeedback::CLASS);

    let button = button.clone();
    dom::set_timeout(CopyFeedback::DURATION, move || {
        button.set_text_content(Some(&original));
        let _ = button.class_list().remove_1(CopyFeedback::CLASS);
    });
}
