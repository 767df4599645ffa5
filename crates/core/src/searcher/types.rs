//! Types for the torrent search system.

use async_trait::async_trait;
use thiserror::Error;

/// A torrent search result.
///
/// Candidates are fetched fresh on every run and never persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidate {
    /// Indexer-assigned identifier.
    pub id: String,
    /// Sort title as reported by the indexer (lower-case).
    pub title: String,
    /// Seeder count, the ranking key.
    pub seeders: u32,
    /// Magnet link, or a web page expected to contain one.
    pub locator: String,
    /// Set once the locator has been resolved to a magnet link.
    pub resolved_magnet: Option<String>,
}

impl Candidate {
    pub fn new(
        id: impl Into<String>,
        title: impl Into<String>,
        seeders: u32,
        locator: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            seeders,
            locator: locator.into(),
            resolved_magnet: None,
        }
    }

    /// Return this candidate with its resolved magnet link attached.
    pub fn with_resolved_magnet(mut self, magnet: impl Into<String>) -> Self {
        self.resolved_magnet = Some(magnet.into());
        self
    }
}

/// Query parameters for a torrent search.
#[derive(Debug, Clone)]
pub struct SearchQuery {
    /// Free-text search query.
    pub query: String,
    /// Maximum results to return.
    pub limit: u32,
    /// Result offset.
    pub offset: u32,
}

impl SearchQuery {
    /// Default page size requested from the indexer.
    pub const DEFAULT_LIMIT: u32 = 100;

    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            limit: Self::DEFAULT_LIMIT,
            offset: 0,
        }
    }
}

/// Errors that can occur during search operations.
#[derive(Debug, Error)]
pub enum SearchError {
    #[error("Search backend connection failed: {0}")]
    ConnectionFailed(String),

    #[error("Search backend API error: {0}")]
    ApiError(String),

    #[error("Request timeout")]
    Timeout,
}

/// Trait for torrent search backends.
#[async_trait]
pub trait Searcher: Send + Sync {
    /// Provider name for logging.
    fn name(&self) -> &str;

    /// Execute a search, returning every candidate the indexer reports.
    async fn search(&self, query: &SearchQuery) -> Result<Vec<Candidate>, SearchError>;
}
