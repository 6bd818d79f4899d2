//! Site-relative URLs under the deployment base path.
//!
//! Sites hosted below the domain root (say `/blog` on GitHub Pages) are built with
//! `PUBLIC_URL` set; every site path the scripts request is prefixed with it.

/// Base path baked in at compile time, without a trailing slash.
fn base_path() -> &'static str {
    option_env!("PUBLIC_URL").unwrap_or("").trim_end_matches('/')
}

/// Resolve a site path such as `/search.json` against the base path. Full URLs are
/// returned unchanged.
#[must_use]
pub fn asset_path(path: &str) -> String {
    join_base(base_path(), path)
}

fn join_base(base: &str, path: &str) -> String {
    if path.starts_with("http://") || path.starts_with("https://") || path.starts_with("//") {
        return path.to_string();
    }
    format!("{}/{}", base.trim_end_matches('/'), path.trim_start_matches('/'))
}
