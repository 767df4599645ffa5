use async_trait::async_trait;
use thiserror::Error;

/// Substring identifying a usable magnet link.
pub const MAGNET_MARKER: &str = "magnet:?xt=";

/// Errors that can occur while resolving a locator.
///
/// These never abort a run; the matcher moves on to the next candidate.
#[derive(Debug, Error)]
pub enum ResolveError {
    #[error("Failed to fetch {url}: {message}")]
    FetchFailed { url: String, message: String },

    #[error("No magnet link found on {0}")]
    NoMagnetLink(String),
}

/// Capability to turn a locator into a magnet link.
#[async_trait]
pub trait MagnetResolver: Send + Sync {
    async fn resolve(&self, locator: &str) -> Result<String, ResolveError>;
}

pub fn is_magnet_link(locator: &str) -> bool {
    locator.contains(MAGNET_MARKER)
}
