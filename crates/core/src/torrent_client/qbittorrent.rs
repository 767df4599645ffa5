//! qBittorrent torrent client implementation.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{multipart, Client};
use tokio::sync::RwLock;
use tracing::{debug, warn};

use crate::config::QBittorrentConfig;

use super::{
    extract_hash_from_magnet, AddTorrentRequest, AddTorrentResult, TorrentClient,
    TorrentClientError,
};

/// qBittorrent client implementation.
pub struct QBittorrentClient {
    client: Client,
    config: QBittorrentConfig,
    /// Whether the cookie jar currently holds a session.
    authenticated: RwLock<bool>,
}

impl QBittorrentClient {
    /// Create a new qBittorrent client.
    pub fn new(config: QBittorrentConfig) -> Result<Self, TorrentClientError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs as u64))
            .cookie_store(true)
            .build()
            .map_err(|e| {
                TorrentClientError::ConnectionFailed(format!("Failed to create HTTP client: {}", e))
            })?;

        Ok(Self {
            client,
            config,
            authenticated: RwLock::new(false),
        })
    }

    /// Get the base URL without trailing slash.
    fn base_url(&self) -> &str {
        self.config.url.trim_end_matches('/')
    }

    /// Login and keep the session cookie.
    pub async fn login(&self) -> Result<(), TorrentClientError> {
        let url = format!("{}/api/v2/auth/login", self.base_url());

        let params = [
            ("username", self.config.username.as_str()),
            ("password", self.config.password.as_str()),
        ];

        let response = self
            .client
            .post(&url)
            .form(&params)
            .send()
            .await
            .map_err(map_request_error)?;

        let status = response.status();
        let body = response.text().await.unwrap_or_default();

        if body.contains("Ok.") {
            debug!("qBittorrent login successful");
            *self.authenticated.write().await = true;
            Ok(())
        } else if body.contains("Fails.") || status.as_u16() == 403 {
            Err(TorrentClientError::AuthenticationFailed(
                "Invalid credentials".to_string(),
            ))
        } else {
            Err(TorrentClientError::AuthenticationFailed(format!(
                "Unexpected response: {}",
                body.chars().take(100).collect::<String>()
            )))
        }
    }

    /// Ensure we have a valid session, logging in if needed.
    async fn ensure_authenticated(&self) -> Result<(), TorrentClientError> {
        if *self.authenticated.read().await {
            return Ok(());
        }
        self.login().await
    }

    /// Make an authenticated POST request with multipart data.
    ///
    /// `build_form` is called again when the session expired and the request is retried.
    async fn post_multipart<F>(&self, endpoint: &str, build_form: F) -> Result<String, TorrentClientError>
    where
        F: Fn() -> multipart::Form,
    {
        self.ensure_authenticated().await?;

        let url = format!("{}{}", self.base_url(), endpoint);
        let response = self
            .client
            .post(&url)
            .multipart(build_form())
            .send()
            .await
            .map_err(map_request_error)?;

        let response = if response.status().as_u16() == 403 {
            warn!("qBittorrent session expired, re-authenticating");
            *self.authenticated.write().await = false;
            self.login().await?;

            self.client
                .post(&url)
                .multipart(build_form())
                .send()
                .await
                .map_err(map_request_error)?
        } else {
            response
        };

        let status = response.status();
        if !status.is_success() {
            return Err(TorrentClientError::ApiError(format!("HTTP {}", status)));
        }

        let body = response
            .text()
            .await
            .map_err(|e| TorrentClientError::ApiError(e.to_string()))?;

        // qBittorrent answers 200 with "Fails." when it rejects the torrent.
        if body.trim() == "Fails." {
            return Err(TorrentClientError::InvalidTorrent(
                "qBittorrent rejected the torrent".to_string(),
            ));
        }

        Ok(body)
    }
}

fn map_request_error(e: reqwest::Error) -> TorrentClientError {
    if e.is_timeout() {
        TorrentClientError::Timeout
    } else if e.is_connect() {
        TorrentClientError::ConnectionFailed(e.to_string())
    } else {
        TorrentClientError::ApiError(e.to_string())
    }
}

/// Form fields for `/api/v2/torrents/add`.
fn add_form_fields(request: &AddTorrentRequest) -> Vec<(&'static str, String)> {
    let mut fields = vec![("urls", request.uri.clone())];
    if let Some(category) = &request.category {
        fields.push(("category", category.clone()));
    }
    if request.auto_tmm {
        fields.push(("autoTMM", "true".to_string()));
    }
    fields
}

#[async_trait]
impl TorrentClient for QBittorrentClient {
    fn name(&self) -> &str {
        "qbittorrent"
    }

    async fn add_torrent(
        &self,
        request: AddTorrentRequest,
    ) -> Result<AddTorrentResult, TorrentClientError> {
        let fields = add_form_fields(&request);

        self.post_multipart("/api/v2/torrents/add", || {
            fields
                .iter()
                .fold(multipart::Form::new(), |form, (name, value)| {
                    form.text(*name, value.clone())
                })
        })
        .await?;

        let hash = extract_hash_from_magnet(&request.uri).unwrap_or_default();
        debug!(hash = %hash, category = ?request.category, "Torrent added to qBittorrent");

        Ok(AddTorrentResult { hash })
    }
}
