//! Table of contents and in-page anchor scrolling.

use sitekit_core::{Heading, HeadingLevel, TocPanel, build_toc};
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::Element;

use crate::dom;

pub const TOC_CONTENT_ID: &str = "toc-content";
pub const TOC_CHEVRON_ID: &str = "toc-chevron";
pub const ARTICLE_CONTENT_ID: &str = "article-content";

fn article_headings(article: &Element) -> Vec<Element> {
    let Ok(nodes) = article.query_selector_all("h2, h3") else {
        return Vec::new();
    };
    (0..nodes.length())
        .filter_map(|i| nodes.item(i))
        .filter_map(|node| node.dyn_into::<Element>().ok())
        .collect()
}

/// Fill `#toc-content` with links to the article's headings, then collapse it.
pub fn init_toc() {
    if dom::by_id(TOC_CONTENT_ID).is_none() {
        return;
    }
    generate_toc();
    toggle_toc();
}

/// Rebuild the contents list. No-op without the container, the article, or any
/// headings.
pub fn generate_toc() {
    let (Some(doc), Some(toc), Some(article)) = (
        dom::document(),
        dom::by_id(TOC_CONTENT_ID),
        dom::by_id(ARTICLE_CONTENT_ID),
    ) else {
        return;
    };

    let elements = article_headings(&article);
    let headings: Vec<Heading> = elements
        .iter()
        .filter_map(|el| {
            Some(Heading {
                level: HeadingLevel::from_tag(&el.tag_name())?,
                id: Some(el.id()),
                text: el.text_content().unwrap_or_default(),
            })
        })
        .collect();
    if headings.is_empty() {
        return;
    }

    toc.set_inner_html("");
    for (entry, heading) in build_toc(&headings).into_iter().zip(elements) {
        log::debug!("Contents entry #{} {:?}", entry.id, entry.text);
        if entry.assigned_id {
            heading.set_id(&entry.id);
        }

        let Ok(link) = doc.create_element("a") else {
            continue;
        };
        let href = entry.href();
        let _ = link.set_attribute("href", &href);
        link.set_text_content(Some(&entry.text));
        link.set_class_name(&entry.class_name());

        dom::listen(&link, "click", move |event| {
            event.prevent_default();
            dom::scroll_into_view_smooth(&heading);
            if let Some(history) = dom::window().and_then(|win| win.history().ok()) {
                let _ = history.push_state_with_url(&JsValue::NULL, "", Some(&href));
            }
        });

        if let Err(err) = toc.append_child(&link) {
            log::error!("Failed to add contents link: {}", dom::js_error_message(&err));
        }
    }
}

/// Collapse or expand the contents panel.
#[wasm_bindgen(js_name = toggleTOC)]
pub fn toggle_toc() {
    let (Some(content), Some(chevron)) = (
        dom::html_by_id(TOC_CONTENT_ID),
        dom::html_by_id(TOC_CHEVRON_ID),
    ) else {
        return;
    };

    let display = content.style().get_property_value("display").unwrap_or_default();
    let panel = TocPanel::from_display(&display).toggled();
    let _ = content.style().set_property("display", panel.display());
    let _ = chevron
        .style()
        .set_property("transform", panel.chevron_transform());
}

/// Smoothly scroll the first element matching `selector` into view.
#[wasm_bindgen(js_name = smoothScroll)]
pub fn smooth_scroll(selector: &str) {
    if let Some(target) =
        dom::document().and_then(|doc| doc.query_selector(selector).ok().flatten())
    {
        dom::scroll_into_view_smooth(&target);
    }
}
