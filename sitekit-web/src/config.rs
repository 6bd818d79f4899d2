use sitekit_core::SiteConfig;

use crate::dom;

/// Id of the optional `<script type="application/json">` config block.
pub const CONFIG_ELEMENT_ID: &str = "sitekit-config";

/// Site config from the page, or defaults when the block is absent or invalid.
#[must_use]
pub fn load_site_config() -> SiteConfig {
    let Some(block) = dom::by_id(CONFIG_ELEMENT_ID).and_then(|el| el.text_content()) else {
        return SiteConfig::default();
    };
    parse_config_block(&block)
}

fn parse_config_block(block: &str) -> SiteConfig {
    if block.trim().is_empty() {
        return SiteConfig::default();
    }
    SiteConfig::from_json(block).unwrap_or_else(|err| {
        log::error!("Ignoring #{CONFIG_ELEMENT_ID}: {err}");
        SiteConfig::default()
    })
}
