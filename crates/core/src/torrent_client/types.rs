//! Types for torrent client operations.

use async_trait::async_trait;
use thiserror::Error;

/// Errors that can occur during torrent client operations.
#[derive(Debug, Error)]
pub enum TorrentClientError {
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    #[error("Authentication failed: {0}")]
    AuthenticationFailed(String),

    #[error("Invalid torrent data: {0}")]
    InvalidTorrent(String),

    #[error("API error: {0}")]
    ApiError(String),

    #[error("Request timeout")]
    Timeout,
}

/// Request to add a new torrent from a magnet link.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AddTorrentRequest {
    /// Magnet URI.
    pub uri: String,
    /// Optional category/label.
    pub category: Option<String>,
    /// Let the client pick the save path from the category.
    pub auto_tmm: bool,
}

impl AddTorrentRequest {
    /// Create a magnet request with default options.
    pub fn magnet(uri: impl Into<String>) -> Self {
        Self {
            uri: uri.into(),
            category: None,
            auto_tmm: false,
        }
    }

    /// Set the category.
    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    /// Enable or disable automatic torrent management.
    pub fn with_auto_tmm(mut self, auto_tmm: bool) -> Self {
        self.auto_tmm = auto_tmm;
        self
    }
}

/// Result of adding a torrent.
#[derive(Debug, Clone)]
pub struct AddTorrentResult {
    /// Info hash parsed from the magnet link, empty if it carries none.
    pub hash: String,
}

/// Trait for torrent client backends.
#[async_trait]
pub trait TorrentClient: Send + Sync {
    /// Backend name for logging.
    fn name(&self) -> &str;

    /// Add a new torrent.
    async fn add_torrent(
        &self,
        request: AddTorrentRequest,
    ) -> Result<AddTorrentResult, TorrentClientError>;
}

/// Extract the info hash from a magnet URI.
pub fn extract_hash_from_magnet(magnet: &str) -> Option<String> {
    let (_, query) = magnet.split_once('?')?;

    query
        .split('&')
        .find_map(|param| param.strip_prefix("xt=urn:btih:"))
        .map(|hash| hash.to_lowercase())
}
