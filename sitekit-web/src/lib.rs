#![forbid(unsafe_code)]
#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

pub mod clipboard;
pub mod config;
pub mod dom;
pub mod forms;
pub mod images;
pub mod logging;
pub mod menu;
pub mod paths;
pub mod search;
pub mod share;
pub mod storage;
pub mod telemetry;
pub mod theme;
pub mod toc;

/// Wire every page behavior. Each one is a no-op when its elements are absent.
pub fn boot() {
    let config = config::load_site_config();
    if let Some(level) = config.level_filter() {
        log::set_max_level(level);
    }

    theme::init_theme(&config);
    menu::init_mobile_menu();
    forms::init_forms();
    images::init_lazy_images();
    toc::init_toc();
    telemetry::track_page_view();
    search::init_search(&config);
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn start() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
    logging::init(log::LevelFilter::Info);
    telemetry::watch_page();
    dom::when_ready(boot);
}
