//! Prowlarr search backend implementation.

use std::time::{Duration, Instant};

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use tracing::{debug, warn};

use crate::config::ProwlarrConfig;

use super::{Candidate, SearchError, SearchQuery, Searcher};

/// Prowlarr search backend, querying every configured indexer at once.
pub struct ProwlarrSearcher {
    client: Client,
    config: ProwlarrConfig,
}

impl ProwlarrSearcher {
    /// Create a new ProwlarrSearcher with the given configuration.
    pub fn new(config: ProwlarrConfig) -> Result<Self, SearchError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs as u64))
            .build()
            .map_err(|e| SearchError::ConnectionFailed(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self { client, config })
    }

    /// Build the Prowlarr API URL for a search.
    fn build_search_url(&self, query: &SearchQuery) -> String {
        format!(
            "{}/api/v1/search?query={}&type=Search&limit={}&offset={}&apikey={}",
            self.config.url.trim_end_matches('/'),
            urlencoding::encode(&query.query),
            query.limit,
            query.offset,
            urlencoding::encode(&self.config.api_key)
        )
    }
}

#[async_trait]
impl Searcher for ProwlarrSearcher {
    fn name(&self) -> &str {
        "prowlarr"
    }

    async fn search(&self, query: &SearchQuery) -> Result<Vec<Candidate>, SearchError> {
        let start = Instant::now();
        let url = self.build_search_url(query);
        debug!(query = %query.query, "Searching Prowlarr");

        let response = self.client.get(&url).send().await.map_err(|e| {
            if e.is_timeout() {
                SearchError::Timeout
            } else if e.is_connect() {
                SearchError::ConnectionFailed(e.to_string())
            } else {
                SearchError::ApiError(e.to_string())
            }
        })?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(SearchError::ApiError(format!(
                "HTTP {}: {}",
                status,
                body.chars().take(200).collect::<String>()
            )));
        }

        let body = response
            .text()
            .await
            .map_err(|e| SearchError::ApiError(e.to_string()))?;
        let candidates = parse_search_response(&body)?;

        debug!(
            query = %query.query,
            results = candidates.len(),
            duration_ms = start.elapsed().as_millis() as u64,
            "Prowlarr search complete"
        );

        Ok(candidates)
    }
}

/// Parse a Prowlarr search response body into candidates.
fn parse_search_response(body: &str) -> Result<Vec<Candidate>, SearchError> {
    let releases: Vec<ProwlarrRelease> = serde_json::from_str(body)
        .map_err(|e| SearchError::ApiError(format!("Failed to parse response: {}", e)))?;

    Ok(releases
        .into_iter()
        .filter_map(|r| {
            let candidate = r.into_candidate();
            if candidate.is_none() {
                warn!("Skipping Prowlarr release without title or locator");
            }
            candidate
        })
        .collect())
}

// Prowlarr API response types
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ProwlarrRelease {
    #[serde(default)]
    guid: Option<String>,
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    sort_title: Option<String>,
    #[serde(default)]
    seeders: Option<i64>,
    #[serde(default)]
    magnet_url: Option<String>,
}

impl ProwlarrRelease {
    fn into_candidate(self) -> Option<Candidate> {
        // sortTitle is the lower-cased display title; derive it when absent.
        let title = self
            .sort_title
            .filter(|t| !t.is_empty())
            .or_else(|| self.title.map(|t| t.to_lowercase()))?;

        let guid = self.guid.unwrap_or_default();
        let locator = if guid.is_empty() {
            self.magnet_url.filter(|m| !m.is_empty())?
        } else {
            guid.clone()
        };

        Some(Candidate::new(
            guid,
            title,
            self.seeders.unwrap_or(0).clamp(0, u32::MAX as i64) as u32,
            locator,
        ))
    }
}
