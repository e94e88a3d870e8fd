//! Client configuration.
//!
//! [`ClientConfig`] is the validated pair of API base URL and API key that
//! every request needs. [`Settings`] is the loadable layer on top of it:
//! defaults, an optional TOML file and `EMS_API__*` environment variables,
//! merged in that order (environment wins).
//!
//! ```no_run
//! use ems_client::config::Settings;
//!
//! let settings = Settings::load().expect("failed to load configuration");
//! let config = settings.client_config().expect("invalid api url or key");
//! ```

use std::path::PathBuf;
use std::time::Duration;

use serde::Deserialize;
use thiserror::Error;
use url::Url;

use crate::cache::{Cache, CacheError, FileCache, NullCache, TableCache};

/// Default request timeout, applied to both connect and total duration.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("api base url must not be empty")]
    MissingApiUrl,

    #[error("api key must not be empty")]
    MissingApiKey,

    #[error("api base url is not valid: {0}")]
    InvalidApiUrl(String),

    #[error("failed to load configuration: {0}")]
    Load(#[from] config::ConfigError),

    #[error("cache setup failed: {0}")]
    Cache(#[from] CacheError),
}

/// Validated API endpoint configuration.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    api_url: Url,
    api_key: String,
}

impl ClientConfig {
    /// Validate and normalize the base URL and API key.
    ///
    /// The URL must parse and carry a host component; a trailing slash is
    /// stripped so endpoint paths can be appended uniformly. An empty key or
    /// URL is rejected here, not at request time.
    pub fn new(api_url: &str, api_key: &str) -> Result<Self, ConfigError> {
        if api_url.trim().is_empty() {
            return Err(ConfigError::MissingApiUrl);
        }
        if api_key.trim().is_empty() {
            return Err(ConfigError::MissingApiKey);
        }

        let trimmed = api_url.trim_end_matches('/');
        let parsed =
            Url::parse(trimmed).map_err(|e| ConfigError::InvalidApiUrl(e.to_string()))?;
        if parsed.host_str().is_none() {
            return Err(ConfigError::InvalidApiUrl(format!(
                "missing host in {trimmed}"
            )));
        }

        Ok(Self {
            api_url: parsed,
            api_key: api_key.to_string(),
        })
    }

    pub fn api_url(&self) -> &str {
        self.api_url.as_str().trim_end_matches('/')
    }

    pub fn api_key(&self) -> &str {
        &self.api_key
    }

    /// Absolute URL for a resource path, e.g. `campaigns/abc123/bounces`.
    pub fn endpoint_url(&self, path: &str) -> String {
        format!("{}/{}", self.api_url(), path.trim_start_matches('/'))
    }
}

/// Cache backend selection, part of the loadable settings.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(tag = "backend", rename_all = "lowercase")]
pub enum CacheSettings {
    /// No caching; every request goes to the wire.
    #[default]
    None,
    /// One file per key under `path` (the directory must exist).
    File { path: PathBuf },
    /// SQLite table in the database file at `path`.
    Sqlite {
        path: PathBuf,
        #[serde(default = "default_table_name")]
        table: String,
        #[serde(default)]
        create_table: bool,
    },
    /// PostgreSQL table reachable through `connection`.
    Postgres {
        connection: String,
        #[serde(default = "default_table_name")]
        table: String,
        #[serde(default)]
        create_table: bool,
    },
}

impl CacheSettings {
    /// Construct the configured cache backend.
    ///
    /// Storage misconfiguration (missing directory, unreachable server,
    /// failed DDL) is fatal here; transient read/write failures later are
    /// not.
    pub fn build(&self) -> Result<Box<dyn Cache>, CacheError> {
        match self {
            CacheSettings::None => Ok(Box::new(NullCache)),
            CacheSettings::File { path } => Ok(Box::new(FileCache::new(path)?)),
            CacheSettings::Sqlite {
                path,
                table,
                create_table,
            } => Ok(Box::new(TableCache::sqlite(path, table, *create_table)?)),
            CacheSettings::Postgres {
                connection,
                table,
                create_table,
            } => Ok(Box::new(TableCache::postgres(
                connection,
                table,
                *create_table,
            )?)),
        }
    }

    pub fn is_none(&self) -> bool {
        matches!(self, CacheSettings::None)
    }
}

fn default_table_name() -> String {
    "ems_cache".to_string()
}

/// Loadable configuration: api endpoint, request timeout, cache backend.
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub api_url: String,
    #[serde(default)]
    pub api_key: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    #[serde(default)]
    pub cache: CacheSettings,
}

fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT.as_secs()
}

impl Settings {
    /// Load from the default file location and the environment.
    ///
    /// The file defaults to `config/ems-api.toml` and can be overridden with
    /// the `EMS_API_CONFIG` environment variable; it does not have to exist.
    /// Individual keys are overridable as `EMS_API__<KEY>`, e.g.
    /// `EMS_API__API_KEY=...` or `EMS_API__CACHE__BACKEND=file`.
    pub fn load() -> Result<Self, ConfigError> {
        let path = std::env::var("EMS_API_CONFIG")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("config/ems-api.toml"));
        Self::load_from_path(path, false)
    }

    /// Load from a specific file, mainly useful in tests.
    pub fn load_from_path(path: PathBuf, required: bool) -> Result<Self, ConfigError> {
        if path.exists() {
            tracing::debug!(path = %path.display(), "Loading configuration file");
        }

        let settings = config::Config::builder()
            .add_source(config::File::from(path).required(required))
            .add_source(
                config::Environment::with_prefix("EMS_API")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize()?;
        Ok(settings)
    }

    /// Validate the endpoint part of the settings.
    pub fn client_config(&self) -> Result<ClientConfig, ConfigError> {
        ClientConfig::new(&self.api_url, &self.api_key)
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn valid_url_is_normalized() {
        let config = ClientConfig::new("https://example.tld/api/", "KEY1").unwrap();
        assert_eq!(config.api_url(), "https://example.tld/api");
        assert_eq!(
            config.endpoint_url("campaigns"),
            "https://example.tld/api/campaigns"
        );
    }

    #[test]
    fn missing_host_is_rejected() {
        let result = ClientConfig::new("not a url", "KEY1");
        assert!(matches!(result, Err(ConfigError::InvalidApiUrl(_))));
    }

    #[test]
    fn empty_key_is_rejected() {
        let result = ClientConfig::new("https://example.tld/api", "");
        assert!(matches!(result, Err(ConfigError::MissingApiKey)));
    }

    #[test]
    fn empty_url_is_rejected() {
        let result = ClientConfig::new("", "KEY1");
        assert!(matches!(result, Err(ConfigError::MissingApiUrl)));
    }

    #[test]
    fn load_settings_from_toml() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("ems-api.toml");

        let toml_content = r#"
api_url = "https://example.tld/api"
api_key = "KEY1"
timeout_secs = 10

[cache]
backend = "file"
path = "/tmp/ems-cache"
        "#;

        fs::write(&config_path, toml_content).unwrap();

        let settings = Settings::load_from_path(config_path, true).unwrap();
        assert_eq!(settings.api_url, "https://example.tld/api");
        assert_eq!(settings.timeout(), Duration::from_secs(10));
        assert!(matches!(settings.cache, CacheSettings::File { .. }));

        let config = settings.client_config().unwrap();
        assert_eq!(config.api_key(), "KEY1");
    }

    #[test]
    fn defaults_apply_without_file_sections() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("ems-api.toml");

        fs::write(
            &config_path,
            "api_url = \"https://example.tld/api\"\napi_key = \"KEY1\"\n",
        )
        .unwrap();

        let settings = Settings::load_from_path(config_path, true).unwrap();
        assert_eq!(settings.timeout(), DEFAULT_TIMEOUT);
        assert!(settings.cache.is_none());
    }
}
