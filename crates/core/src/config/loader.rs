use figment::{
    providers::{Env, Format, Yaml},
    value::{Uncased, UncasedStr},
    Figment,
};
use std::path::{Path, PathBuf};

use super::{types::Config, ConfigError};

/// Environment variable holding the configuration file path.
pub const CONFIG_PATH_ENV: &str = "CONFIG_FILE";

const DEFAULT_CONFIG_PATH: &str = "./config.yaml";

/// Prefix of environment variables overriding file values.
const ENV_PREFIX: &str = "CAGEFETCH_";

/// camelCase keys of the file, by their lower-cased spelling.
const CAMEL_CASE_KEYS: &[(&str, &str)] = &[
    ("datafile", "dataFile"),
    ("apikey", "apiKey"),
    ("userkey", "userKey"),
    ("timeoutsecs", "timeoutSecs"),
    ("autotmm", "autoTmm"),
];

/// Resolve the configuration path from `CONFIG_FILE`, falling back to `./config.yaml`.
pub fn config_path_from_env() -> PathBuf {
    resolve_config_path(std::env::var(CONFIG_PATH_ENV).ok())
}

fn resolve_config_path(value: Option<String>) -> PathBuf {
    match value {
        Some(path) if !path.trim().is_empty() => PathBuf::from(path),
        _ => PathBuf::from(DEFAULT_CONFIG_PATH),
    }
}

/// Load configuration from file with environment variable overrides
pub fn load_config(path: &Path) -> Result<Config, ConfigError> {
    if !path.exists() {
        return Err(ConfigError::FileNotFound(path.display().to_string()));
    }

    let config: Config = Figment::new()
        .merge(Yaml::file(path))
        .merge(env_overrides())
        .extract()
        .map_err(|e| ConfigError::ParseError(e.to_string()))?;

    Ok(config)
}

/// Environment overrides, e.g. `CAGEFETCH_PROWLARR__APIKEY` for `prowlarr.apiKey`.
///
/// Keys are mapped onto the exact spelling used in the file so both sources
/// land on the same field.
fn env_overrides() -> Env {
    Env::prefixed(ENV_PREFIX)
        .split("__")
        .map(file_key)
        .lowercase(false)
}

fn file_key(key: &UncasedStr) -> Uncased<'_> {
    key.as_str()
        .split('.')
        .map(|part| {
            let lower = part.to_ascii_lowercase();
            CAMEL_CASE_KEYS
                .iter()
                .find(|(from, _)| *from == lower)
                .map(|(_, to)| to.to_string())
                .unwrap_or(lower)
        })
        .collect::<Vec<_>>()
        .join(".")
        .into()
}

/// Load configuration from a YAML string (useful for testing)
pub fn load_config_from_str(yaml: &str) -> Result<Config, ConfigError> {
    Figment::from(Yaml::string(yaml))
        .extract()
        .map_err(|e| ConfigError::ParseError(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_load_config_from_str_missing_prowlarr_url() {
        let yaml = r#"
dataFile: events.json
prowlarr:
  apiKey: key
qbitorrent:
  url: http://localhost:8080
  user: admin
  password: pass
pushover:
  token: t
  userKey: u
"#;
        let result = load_config_from_str(yaml);
        assert!(matches!(result, Err(ConfigError::ParseError(_))));
    }

    #[test]
    fn test_load_config_from_str_malformed() {
        let result = load_config_from_str("dataFile: [unterminated");
        assert!(matches!(result, Err(ConfigError::ParseError(_))));
    }

    #[test]
    fn test_load_config_file_not_found() {
        let result = load_config(Path::new("/nonexistent/config.yaml"));
        assert!(result.is_err());
        let err = result.unwrap_err();
        assert!(matches!(err, ConfigError::FileNotFound(_)));
    }

    #[test]
    fn test_load_config_from_file() {
        let mut temp_file = NamedTempFile::new().unwrap();
        writeln!(
            temp_file,
            r#"
dataFile: /tmp/events.json
prowlarr:
  url: http://prowlarr:9696
  apiKey: key
qbitorrent:
  url: http://qbit:8080
  user: admin
  password: pass
pushover:
  token: t
  userKey: u
"#
        )
        .unwrap();

        let config = load_config(temp_file.path()).unwrap();
        assert_eq!(config.prowlarr.url, "http://prowlarr:9696");
        assert_eq!(config.qbittorrent.url, "http://qbit:8080");
    }

    #[test]
    fn test_env_overrides_file_value() {
        figment::Jail::expect_with(|jail| {
            jail.create_file(
                "config.yaml",
                r#"
dataFile: /tmp/events.json
prowlarr:
  url: http://prowlarr:9696
  apiKey: filekey
qbitorrent:
  url: http://qbit:8080
  user: admin
  password: pass
pushover:
  token: t
  userKey: u
download:
  autoTmm: true
"#,
            )?;
            jail.set_env("CAGEFETCH_PROWLARR__APIKEY", "envkey");
            jail.set_env("CAGEFETCH_DATAFILE", "/data/events.json");
            jail.set_env("CAGEFETCH_PUSHOVER__USERKEY", "envuser");
            jail.set_env("CAGEFETCH_DOWNLOAD__AUTOTMM", "false");
            jail.set_env("CAGEFETCH_QBITORRENT__TIMEOUTSECS", "5");

            let config = load_config(Path::new("config.yaml")).expect("config should load");
            assert_eq!(config.prowlarr.api_key, "envkey");
            assert_eq!(config.data_file, PathBuf::from("/data/events.json"));
            assert_eq!(config.pushover.user_key, "envuser");
            assert!(!config.download.auto_tmm);
            assert_eq!(config.qbittorrent.password, "pass");
            assert_eq!(config.qbittorrent.timeout_secs, 5);
            Ok(())
        });
    }

    #[test]
    fn test_file_key_restores_camel_case() {
        let key = |raw: &str| file_key(UncasedStr::new(raw)).as_str().to_string();
        assert_eq!(key("PROWLARR.APIKEY"), "prowlarr.apiKey");
        assert_eq!(key("DATAFILE"), "dataFile");
        assert_eq!(key("QBITORRENT.USER"), "qbitorrent.user");
        assert_eq!(key("DOWNLOAD.AUTOTMM"), "download.autoTmm");
    }

    #[test]
    fn test_resolve_config_path() {
        assert_eq!(resolve_config_path(None), PathBuf::from("./config.yaml"));
        assert_eq!(
            resolve_config_path(Some("  ".to_string())),
            PathBuf::from("./config.yaml")
        );
        assert_eq!(
            resolve_config_path(Some("/etc/cagefetch.yaml".to_string())),
            PathBuf::from("/etc/cagefetch.yaml")
        );
    }
}
