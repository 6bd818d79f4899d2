use thiserror::Error;

/// Errors produced by the core crate.
#[derive(Debug, Error)]
pub enum SiteError {
    #[error("failed to fetch {path}: {message}")]
    Source { path: String, message: String },
    #[error("malformed search index: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("unknown share platform: {0}")]
    UnknownPlatform(String),
    #[error("invalid site config: {0}")]
    Config(String),
}

impl SiteError {
    /// Wrap an [`IndexSource`](crate::IndexSource) failure for the given path.
    pub fn source(path: &str, err: &impl std::error::Error) -> Self {
        Self::Source {
            path: path.to_string(),
            message: err.to_string(),
        }
    }
}
