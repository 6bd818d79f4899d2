use anyhow::{Context, Result};
use sitekit_core::{IndexSource, SiteConfig};
use std::path::{Path, PathBuf};

/// Serves site paths from a directory on disk, the way a static host would.
#[derive(Debug, Clone)]
pub struct FileIndexSource {
    root: PathBuf,
}

impl FileIndexSource {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// File a site path resolves to. The leading `/` is relative to the site root.
    pub fn resolve(&self, path: &str) -> PathBuf {
        self.root.join(path.trim_start_matches('/'))
    }
}

impl IndexSource for FileIndexSource {
    type Error = std::io::Error;

    async fn fetch(&self, path: &str) -> Result<String, std::io::Error> {
        let file = self.resolve(path);
        log::debug!("Reading {}", file.display());
        tokio::fs::read_to_string(file).await
    }
}

/// Site config from a JSON file, or defaults when no file is given.
pub fn load_site_config(path: Option<&Path>) -> Result<SiteConfig> {
    let Some(path) = path else {
        return Ok(SiteConfig::default());
    };
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read config {}", path.display()))?;
    SiteConfig::from_json(&raw).with_context(|| format!("invalid config {}", path.display()))
}
