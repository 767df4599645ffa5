use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Root configuration
///
/// Field names follow the camelCase keys of the YAML file.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    /// Path of the JSON event store.
    pub data_file: PathBuf,
    pub prowlarr: ProwlarrConfig,
    #[serde(rename = "qbitorrent")]
    pub qbittorrent: QBittorrentConfig,
    pub pushover: PushoverConfig,
    #[serde(default)]
    pub discovery: DiscoveryConfig,
    #[serde(default)]
    pub download: DownloadConfig,
}

/// Prowlarr indexer configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProwlarrConfig {
    /// Prowlarr server URL (e.g., "http://localhost:9696")
    pub url: String,
    /// Prowlarr API key
    pub api_key: String,
    /// Request timeout in seconds (default: 30)
    #[serde(default = "default_timeout")]
    pub timeout_secs: u32,
}

/// qBittorrent Web API configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QBittorrentConfig {
    /// Web UI URL (e.g., "http://localhost:8080")
    pub url: String,
    #[serde(rename = "user")]
    pub username: String,
    pub password: String,
    /// Request timeout in seconds (default: 30)
    #[serde(default = "default_timeout")]
    pub timeout_secs: u32,
}

/// Pushover notification configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PushoverConfig {
    /// Application token
    pub token: String,
    /// Recipient user key
    pub user_key: String,
    /// API endpoint, overridable for testing
    #[serde(default = "default_pushover_url")]
    pub url: String,
    #[serde(default = "default_timeout")]
    pub timeout_secs: u32,
}

/// Event listing used to discover the last and next events
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DiscoveryConfig {
    #[serde(default = "default_discovery_url")]
    pub url: String,
    #[serde(default = "default_timeout")]
    pub timeout_secs: u32,
}

impl Default for DiscoveryConfig {
    fn default() -> Self {
        Self {
            url: default_discovery_url(),
            timeout_secs: default_timeout(),
        }
    }
}

/// Options applied to every submitted torrent
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DownloadConfig {
    /// Category label assigned in the download client
    #[serde(default = "default_category")]
    pub category: String,
    /// Let the client manage save paths by category
    #[serde(default = "default_auto_tmm")]
    pub auto_tmm: bool,
}

impl Default for DownloadConfig {
    fn default() -> Self {
        Self {
            category: default_category(),
            auto_tmm: default_auto_tmm(),
        }
    }
}

fn default_timeout() -> u32 {
    30
}

fn default_pushover_url() -> String {
    "https://api.pushover.net/1/messages.json".to_string()
}

fn default_discovery_url() -> String {
    "https://www.sherdog.com/organizations/Ultimate-Fighting-Championship-UFC-2".to_string()
}

fn default_category() -> String {
    "ufc-downloader".to_string()
}

fn default_auto_tmm() -> bool {
    true
}

/// Sanitized config for logging (secrets redacted)
#[derive(Debug, Clone, Serialize)]
pub struct SanitizedConfig {
    pub data_file: PathBuf,
    pub prowlarr: SanitizedProwlarrConfig,
    pub qbittorrent: SanitizedQBittorrentConfig,
    pub pushover: SanitizedPushoverConfig,
    pub discovery: DiscoveryConfig,
    pub download: DownloadConfig,
}

#[derive(Debug, Clone, Serialize)]
pub struct SanitizedProwlarrConfig {
    pub url: String,
    pub api_key_configured: bool,
    pub timeout_secs: u32,
}

#[derive(Debug, Clone, Serialize)]
pub struct SanitizedQBittorrentConfig {
    pub url: String,
    pub username: String,
    pub password_configured: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct SanitizedPushoverConfig {
    pub token_configured: bool,
    pub user_key_configured: bool,
}

impl From<&Config> for SanitizedConfig {
    fn from(config: &Config) -> Self {
        Self {
            data_file: config.data_file.clone(),
            prowlarr: SanitizedProwlarrConfig {
                url: config.prowlarr.url.clone(),
                api_key_configured: !config.prowlarr.api_key.is_empty(),
                timeout_secs: config.prowlarr.timeout_secs,
            },
            qbittorrent: SanitizedQBittorrentConfig {
                url: config.qbittorrent.url.clone(),
                username: config.qbittorrent.username.clone(),
                password_configured: !config.qbittorrent.password.is_empty(),
            },
            pushover: SanitizedPushoverConfig {
                token_configured: !config.pushover.token.is_empty(),
                user_key_configured: !config.pushover.user_key.is_empty(),
            },
            discovery: config.discovery.clone(),
            download: config.download.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::load_config_from_str;

    const FULL: &str = r#"
dataFile: /data/events.json
prowlarr:
  url: http://localhost:9696
  apiKey: prowlarr-key
qbitorrent:
  url: http://localhost:8080
  user: admin
  password: secret
pushover:
  token: app-token
  userKey: user-key
"#;

    #[test]
    fn test_deserialize_full_config() {
        let config = load_config_from_str(FULL).unwrap();
        assert_eq!(config.data_file.to_str().unwrap(), "/data/events.json");
        assert_eq!(config.prowlarr.url, "http://localhost:9696");
        assert_eq!(config.prowlarr.api_key, "prowlarr-key");
        assert_eq!(config.qbittorrent.username, "admin");
        assert_eq!(config.qbittorrent.password, "secret");
        assert_eq!(config.pushover.user_key, "user-key");
    }

    #[test]
    fn test_defaults_applied() {
        let config = load_config_from_str(FULL).unwrap();
        assert_eq!(config.prowlarr.timeout_secs, 30);
        assert_eq!(config.download.category, "ufc-downloader");
        assert!(config.download.auto_tmm);
        assert!(config.discovery.url.contains("sherdog.com"));
        assert_eq!(
            config.pushover.url,
            "https://api.pushover.net/1/messages.json"
        );
    }

    #[test]
    fn test_custom_download_section() {
        let yaml = format!("{}\ndownload:\n  category: fights\n  autoTmm: false\n", FULL);
        let config = load_config_from_str(&yaml).unwrap();
        assert_eq!(config.download.category, "fights");
        assert!(!config.download.auto_tmm);
    }

    #[test]
    fn test_sanitized_config_hides_secrets() {
        let config = load_config_from_str(FULL).unwrap();
        let sanitized = SanitizedConfig::from(&config);
        assert!(sanitized.prowlarr.api_key_configured);
        assert!(sanitized.qbittorrent.password_configured);
        assert!(sanitized.pushover.token_configured);

        let json = serde_json::to_string(&sanitized).unwrap();
        assert!(!json.contains("prowlarr-key"));
        assert!(!json.contains("secret"));
        assert!(!json.contains("app-token"));
    }
}
