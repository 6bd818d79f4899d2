#![cfg(target_arch = "wasm32")]

use sitekit_core::{SearchView, Theme};
use sitekit_web::dom;
use sitekit_web::search::DomSearchView;
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;
use wasm_bindgen_test::*;
use web_sys::{Event, HtmlButtonElement, HtmlElement, KeyboardEvent, KeyboardEventInit};

wasm_bindgen_test_configure!(run_in_browser);

fn mount(markup: &str) {
    let doc = dom::document().expect("document");
    let root = match doc.get_element_by_id("fixture") {
        Some(root) => root,
        None => {
            let root = doc.create_element("div").expect("create fixture root");
            root.set_id("fixture");
            doc.body()
                .expect("document body")
                .append_child(&root)
                .expect("append fixture root");
            root
        }
    };
    root.set_inner_html(markup);
}

const SEARCH_REGIONS: &str = r#"
    <input id="search-input">
    <span id="search-count"></span>
    <div id="all-articles"></div>
    <div id="results-container" class="hidden"><span id="results-count"></span><div id="results-list"></div></div>
    <div id="no-results" class="hidden"></div>
"#;

async fn sleep_ms(ms: i32) {
    let promise = js_sys::Promise::new(&mut |resolve, _reject| {
        dom::window()
            .expect("window")
            .set_timeout_with_callback_and_timeout_and_arguments_0(&resolve, ms)
            .expect("schedule timer");
    });
    JsFuture::from(promise).await.expect("timer resolves");
}

fn click(id: &str) {
    dom::html_by_id(id).expect("clickable element").click();
}

fn hidden(id: &str) -> bool {
    dom::is_hidden(&dom::by_id(id).expect("region exists"))
}

#[wasm_bindgen_test]
fn dom_helpers_find_the_browser() {
    assert!(dom::window().is_some());
    assert!(dom::document().is_some());
    assert!(dom::has_global("IntersectionObserver"));
}

#[wasm_bindgen_test]
fn search_view_switches_regions() {
    mount(SEARCH_REGIONS);
    let view = DomSearchView::from_document();

    view.show_total(6);
    assert_eq!(dom::by_id("search-count").unwrap().text_content().unwrap(), "6");

    view.show_results(2, "<article>one</article><article>two</article>");
    assert!(hidden("all-articles"));
    assert!(!hidden("results-container"));
    assert!(hidden("no-results"));
    assert_eq!(dom::by_id("results-count").unwrap().text_content().unwrap(), "2");
    assert_eq!(
        dom::by_id("results-list").unwrap().child_element_count(),
        2
    );

    view.show_empty();
    assert!(hidden("results-container"));
    assert!(!hidden("no-results"));

    view.show_all();
    assert!(!hidden("all-articles"));
    assert!(hidden("results-container"));
    assert!(hidden("no-results"));
}

#[wasm_bindgen_test]
fn search_view_ignores_missing_regions() {
    mount("<div id=\"all-articles\"></div>");
    let view = DomSearchView::from_document();
    view.show_results(1, "<p>x</p>");
    view.show_total(1);
    assert!(hidden("all-articles"));
}

#[wasm_bindgen_test]
fn toc_lists_headings_and_assigns_ids() {
    mount(
        r#"<nav><div id="toc-content"></div><span id="toc-chevron"></span></nav>
        <div id="article-content"><h2 id="intro">Intro</h2><h3>Details</h3><h4>Skipped</h4></div>"#,
    );
    sitekit_web::toc::generate_toc();

    let toc = dom::by_id("toc-content").unwrap();
    let links = toc.query_selector_all("a").unwrap();
    assert_eq!(links.length(), 2);
    let second = links.item(1).unwrap().dyn_into::<web_sys::Element>().unwrap();
    assert_eq!(second.get_attribute("href").unwrap(), "#heading-1");
    assert!(second.class_name().contains("ml-4"));
    assert!(dom::by_id("heading-1").is_some());
}

#[wasm_bindgen_test]
fn toc_toggle_flips_display_and_chevron() {
    mount(r#"<div id="toc-content"></div><span id="toc-chevron"></span>"#);
    let content = dom::html_by_id("toc-content").unwrap();
    let chevron: HtmlElement = dom::html_by_id("toc-chevron").unwrap();

    sitekit_web::toc::toggle_toc();
    assert_eq!(content.style().get_property_value("display").unwrap(), "none");
    assert_eq!(
        chevron.style().get_property_value("transform").unwrap(),
        "rotate(-90deg)"
    );

    sitekit_web::toc::toggle_toc();
    assert_eq!(content.style().get_property_value("display").unwrap(), "block");
}

#[wasm_bindgen_test]
fn theme_is_applied_to_root_element() {
    sitekit_web::theme::apply_theme(Theme::Dark);
    assert_eq!(sitekit_web::theme::current_theme(), Theme::Dark);
    sitekit_web::theme::apply_theme(Theme::Light);
    assert_eq!(sitekit_web::theme::current_theme(), Theme::Light);
}

#[wasm_bindgen_test]
fn missing_config_block_means_defaults() {
    mount("");
    let config = sitekit_web::config::load_site_config();
    assert_eq!(config, sitekit_core::SiteConfig::default());
}

#[wasm_bindgen_test]
fn unknown_share_platform_is_ignored() {
    sitekit_web::share::share_article("myspace");
}

#[wasm_bindgen_test]
async fn blank_query_needs_no_fetch() {
    use sitekit_core::{Debouncer, LogSink, SearchController, SearchIndexProvider, ViewState};
    use sitekit_web::search::{FetchIndexSource, TimeoutScheduler};

    mount(SEARCH_REGIONS);
    let controller = SearchController::new(
        SearchIndexProvider::new(FetchIndexSource, "/missing-search.json"),
        Debouncer::new(TimeoutScheduler, std::time::Duration::from_millis(300)),
        DomSearchView::from_document(),
        LogSink,
    );
    assert_eq!(controller.run_query("  ").await, ViewState::All);
    assert_eq!(controller.provider().fetch_count(), 0);
}

#[wasm_bindgen_test]
fn menu_opens_stays_open_inside_and_closes_outside_or_on_escape() {
    mount(
        r#"<button id="mobile-menu-btn">Menu</button>
        <nav id="mobile-menu" class="hidden"><a id="menu-link">Posts</a></nav>
        <p id="page-body">Body</p>"#,
    );
    sitekit_web::menu::init_mobile_menu();
    assert!(hidden("mobile-menu"));

    click("mobile-menu-btn");
    assert!(!hidden("mobile-menu"), "button opens the menu");

    click("menu-link");
    assert!(!hidden("mobile-menu"), "clicks inside keep it open");

    click("page-body");
    assert!(hidden("mobile-menu"), "clicks elsewhere close it");

    click("mobile-menu-btn");
    assert!(!hidden("mobile-menu"));
    let init = KeyboardEventInit::new();
    init.set_key("Escape");
    let escape = KeyboardEvent::new_with_keyboard_event_init_dict("keydown", &init).unwrap();
    dom::document().unwrap().dispatch_event(&escape).unwrap();
    assert!(hidden("mobile-menu"), "Escape closes it");

    click("mobile-menu-btn");
    click("mobile-menu-btn");
    assert!(hidden("mobile-menu"), "button toggles it shut again");
}

#[wasm_bindgen_test]
fn track_event_accepts_missing_or_odd_properties() {
    use sitekit_web::telemetry::{properties_from_js, track_event};

    assert!(properties_from_js(JsValue::UNDEFINED).is_empty());
    assert!(properties_from_js(JsValue::NULL).is_empty());
    assert!(properties_from_js(JsValue::from_f64(3.0)).is_empty());
    assert!(properties_from_js(JsValue::from_str("label")).is_empty());

    let object = js_sys::Object::new();
    js_sys::Reflect::set(&object, &"query".into(), &"rust".into()).unwrap();
    let properties = properties_from_js(object.clone().into());
    assert_eq!(
        properties.get("query"),
        Some(&serde_json::Value::String("rust".into()))
    );

    track_event("x", JsValue::UNDEFINED);
    track_event("x", JsValue::from_f64(3.0));
    track_event("x", object.into());
}

#[wasm_bindgen_test]
async fn newsletter_submission_shows_progress_then_confirms() {
    mount(
        r#"<form id="newsletter-form"><input name="email" value="a@example.com">
        <button id="subscribe" type="submit">Subscribe</button></form>"#,
    );
    sitekit_web::forms::init_forms();
    let button: HtmlButtonElement = dom::by_id("subscribe").unwrap().dyn_into().unwrap();
    let form = dom::by_id("newsletter-form").unwrap();

    form.dispatch_event(&Event::new("submit").unwrap()).unwrap();
    assert_eq!(button.text_content().unwrap(), "Subscribing...");
    assert!(button.disabled());

    sleep_ms(1100).await;
    assert_eq!(button.text_content().unwrap(), "Subscribed!");
    assert!(!button.disabled());
}
