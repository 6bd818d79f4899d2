use sitekit_core::SharePlatform;
use sitekit_core::share::SHARE_WINDOW_FEATURES;
use wasm_bindgen::prelude::*;

use crate::dom;

/// Open a share popup for the current page. Unknown platforms are ignored.
#[wasm_bindgen(js_name = shareArticle)]
pub fn share_article(platform: &str) {
    let platform = match platform.parse::<SharePlatform>() {
        Ok(platform) => platform,
        Err(err) => {
            log::debug!("{err}");
            return;
        }
    };
    let Some(win) = dom::window() else {
        return;
    };

    let page_url = win.location().href().unwrap_or_default();
    let title = dom::document().map(|doc| doc.title()).unwrap_or_default();
    let share_url = platform.share_url(&page_url, &title);
    if let Err(err) =
        win.open_with_url_and_target_and_features(&share_url, "_blank", SHARE_WINDOW_FEATURES)
    {
        log::error!("Failed to open share window: {}", dom::js_error_message(&err));
    }
}
