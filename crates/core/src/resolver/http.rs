//! Resolver that follows details pages over HTTP.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use scraper::{Html, Selector};
use tracing::debug;

use super::{is_magnet_link, MagnetResolver, ResolveError};

/// Resolves magnet links directly, or by scraping the first magnet anchor of a page.
pub struct HttpMagnetResolver {
    client: Client,
}

impl HttpMagnetResolver {
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    /// Create a resolver with its own client and request timeout.
    pub fn with_timeout(timeout: Duration) -> Result<Self, reqwest::Error> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self::new(client))
    }

    async fn fetch_page(&self, url: &str) -> Result<String, ResolveError> {
        let fetch_failed = |message: String| ResolveError::FetchFailed {
            url: url.to_string(),
            message,
        };

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| fetch_failed(e.to_string()))?;

        if !response.status().is_success() {
            return Err(fetch_failed(format!("HTTP {}", response.status())));
        }

        response.text().await.map_err(|e| fetch_failed(e.to_string()))
    }
}

#[async_trait]
impl MagnetResolver for HttpMagnetResolver {
    async fn resolve(&self, locator: &str) -> Result<String, ResolveError> {
        if is_magnet_link(locator) {
            return Ok(locator.to_string());
        }

        debug!(url = locator, "Fetching details page for magnet link");
        let html = self.fetch_page(locator).await?;

        extract_magnet_link(&html).ok_or_else(|| ResolveError::NoMagnetLink(locator.to_string()))
    }
}

/// Return the `href` of the first anchor in `html` that holds a magnet link.
pub fn extract_magnet_link(html: &str) -> Option<String> {
    let document = Html::parse_document(html);
    let anchors = Selector::parse("a[href]").ok()?;

    document
        .select(&anchors)
        .filter_map(|a| a.value().attr("href"))
        .find(|href| is_magnet_link(href))
        .map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_magnet_locator_passes_through() {
        // 1ms timeout: any network call would fail the test.
        let client = Client::builder()
            .timeout(Duration::from_millis(1))
            .build()
            .unwrap();
        let resolver = HttpMagnetResolver::new(client);

        let magnet = "magnet:?xt=urn:btih:abc123&dn=ufc";
        assert_eq!(resolver.resolve(magnet).await.unwrap(), magnet);
    }

    #[tokio::test]
    async fn test_unreachable_page_is_fetch_failure() {
        let resolver = HttpMagnetResolver::with_timeout(Duration::from_millis(200)).unwrap();
        let result = resolver.resolve("http://127.0.0.1:9/torrent/1").await;
        assert!(matches!(result, Err(ResolveError::FetchFailed { .. })));
    }

    #[test]
    fn test_extract_first_magnet_anchor() {
        let html = r#"
            <html><body>
              <a href="/download/1.torrent">torrent</a>
              <a href="magnet:?xt=urn:btih:first&dn=a">magnet</a>
              <a href="magnet:?xt=urn:btih:second&dn=b">mirror</a>
            </body></html>
        "#;
        assert_eq!(
            extract_magnet_link(html).as_deref(),
            Some("magnet:?xt=urn:btih:first&dn=a")
        );
    }

    #[test]
    fn test_extract_without_magnet() {
        let html = r#"<a href="https://example.com">home</a><a>no href</a>"#;
        assert!(extract_magnet_link(html).is_none());
    }

    #[test]
    fn test_extract_ignores_non_anchor_elements() {
        let html = r#"<link href="magnet:?xt=urn:btih:nope"><p>magnet:?xt=urn:btih:text</p>"#;
        assert!(extract_magnet_link(html).is_none());
    }

    #[test]
    fn test_is_magnet_link() {
        assert!(is_magnet_link("magnet:?xt=urn:btih:abc"));
        assert!(!is_magnet_link("magnet:?dn=abc"));
        assert!(!is_magnet_link("https://tracker/torrent/1"));
    }
}
