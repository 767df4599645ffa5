use super::{types::Config, ConfigError};

/// Validate configuration
/// Currently validates:
/// - Required sections exist (enforced by serde)
/// - Service URLs and the data file path are not empty
/// - Service URLs are http(s)
pub fn validate_config(config: &Config) -> Result<(), ConfigError> {
    if config.data_file.as_os_str().is_empty() {
        return Err(ConfigError::ValidationError(
            "dataFile cannot be empty".to_string(),
        ));
    }

    require_http_url("prowlarr.url", &config.prowlarr.url)?;
    require_http_url("qbitorrent.url", &config.qbittorrent.url)?;
    require_http_url("pushover.url", &config.pushover.url)?;
    require_http_url("discovery.url", &config.discovery.url)?;

    if config.download.category.trim().is_empty() {
        return Err(ConfigError::ValidationError(
            "download.category cannot be empty".to_string(),
        ));
    }

    Ok(())
}

fn require_http_url(field: &str, value: &str) -> Result<(), ConfigError> {
    let value = value.trim();
    if value.is_empty() {
        return Err(ConfigError::ValidationError(format!(
            "{} cannot be empty",
            field
        )));
    }
    if !value.starts_with("http://") && !value.starts_with("https://") {
        return Err(ConfigError::ValidationError(format!(
            "{} must be an http(s) URL, got {}",
            field, value
        )));
    }
    Ok(())
}
