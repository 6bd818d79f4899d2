use sitekit_core::FormKind;
use sitekit_web::paths::asset_path;
use sitekit_web::search::FetchError;

#[test]
fn index_path_is_root_anchored_without_public_url() {
    assert_eq!(asset_path("search.json"), "/search.json");
}

#[test]
fn element_ids_match_the_site_templates() {
    assert_eq!(sitekit_web::search::SEARCH_INPUT_ID, "search-input");
    assert_eq!(sitekit_web::search::RESULTS_LIST_ID, "results-list");
    assert_eq!(sitekit_web::toc::TOC_CONTENT_ID, "toc-content");
    assert_eq!(sitekit_web::menu::MENU_ID, "mobile-menu");
    assert_eq!(sitekit_web::config::CONFIG_ELEMENT_ID, "sitekit-config");
    assert_eq!(FormKind::Contact.form_id(), "contact-form");
    assert_eq!(FormKind::Newsletter.form_id(), "newsletter-form");
}

#[test]
fn fetch_errors_describe_the_failure() {
    assert_eq!(
        FetchError::Status(404).to_string(),
        "server responded with status 404"
    );
    assert_eq!(FetchError::NoWindow.to_string(), "window unavailable");
}
