use crate::constants::{self, env_vars};
use crate::error::AppError;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;
use tokio::fs;
use tokio::io::AsyncWriteExt;

pub mod paths;
pub mod validation;

use paths::{get_config_path, get_log_dir_path};
use validation::validate_config;

/// Configuration structure for the application.
///
/// A `Config` is constructed explicitly and handed to [`crate::StatsClient::new`];
/// nothing reads it from global state, so tests can point a client at a mock
/// server by building their own value.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Config {
    /// Host of the stats API, including scheme (e.g. `http://localhost:8000`).
    #[serde(default = "default_api_base_url")]
    pub api_base_url: String,
    /// Path prefix all routes live under. Defaults to `/api/v1`.
    #[serde(default = "default_api_base_path")]
    pub api_base_path: String,
    /// HTTP timeout in milliseconds for API requests. Defaults to 15000.
    #[serde(default = "default_http_timeout_ms")]
    pub http_timeout_ms: u64,
    /// Quiet period for search-as-you-type in milliseconds. Defaults to 300.
    #[serde(default = "default_search_debounce_ms")]
    pub search_debounce_ms: u64,
    /// Number of retries offered before the retry action turns into a reset.
    #[serde(default = "default_max_retries")]
    pub max_retries: u32,
    /// Path to the log file. If not specified, logs will be written to a default location.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub log_file_path: Option<String>,
}

fn default_api_base_url() -> String {
    constants::DEFAULT_API_BASE_URL.to_string()
}

fn default_api_base_path() -> String {
    constants::DEFAULT_API_BASE_PATH.to_string()
}

fn default_http_timeout_ms() -> u64 {
    constants::DEFAULT_HTTP_TIMEOUT_MS
}

fn default_search_debounce_ms() -> u64 {
    constants::search::DEBOUNCE_MS
}

fn default_max_retries() -> u32 {
    constants::retry::MAX_ATTEMPTS
}

impl Default for Config {
    fn default() -> Self {
        Config {
            api_base_url: default_api_base_url(),
            api_base_path: default_api_base_path(),
            http_timeout_ms: default_http_timeout_ms(),
            search_debounce_ms: default_search_debounce_ms(),
            max_retries: default_max_retries(),
            log_file_path: None,
        }
    }
}

impl Config {
    /// Creates a default configuration pointing at the given API host.
    pub fn with_base_url(api_base_url: impl Into<String>) -> Self {
        Config {
            api_base_url: api_base_url.into(),
            ..Config::default()
        }
    }

    /// Loads configuration from the default config file location.
    /// Falls back to defaults if no config file exists.
    ///
    /// # Environment Variables
    /// - `CRICKET_STATS_API_URL` - Override API base URL
    /// - `CRICKET_STATS_API_TIMEOUT` - Override HTTP timeout in milliseconds
    /// - `CRICKET_STATS_LOG_FILE` - Override log file path
    ///
    /// Environment variables take precedence over the config file.
    pub async fn load() -> Result<Self, AppError> {
        let config_path = get_config_path();

        let mut config = if Path::new(&config_path).exists() {
            let content = fs::read_to_string(&config_path).await?;
            toml::from_str(&content)?
        } else {
            Config::default()
        };

        config.apply_env_overrides();
        config.validate()?;

        Ok(config)
    }

    /// Applies environment variable overrides on top of the current values.
    /// Unparsable timeout values are ignored.
    pub fn apply_env_overrides(&mut self) {
        if let Ok(api_base_url) = std::env::var(env_vars::API_URL)
            && !api_base_url.is_empty()
        {
            self.api_base_url = api_base_url;
        }

        if let Some(timeout) = std::env::var(env_vars::API_TIMEOUT)
            .ok()
            .and_then(|s| s.parse::<u64>().ok())
            .filter(|t| *t > 0)
        {
            self.http_timeout_ms = timeout;
        }

        if let Ok(log_file_path) = std::env::var(env_vars::LOG_FILE) {
            self.log_file_path = Some(log_file_path);
        }
    }

    /// Validates the configuration settings
    pub fn validate(&self) -> Result<(), AppError> {
        validate_config(
            &self.api_base_url,
            &self.api_base_path,
            self.http_timeout_ms,
            &self.log_file_path,
        )
    }

    /// Full base URL requests are joined onto, without a trailing slash.
    pub fn api_root(&self) -> String {
        let host = self.api_base_url.trim_end_matches('/');
        let prefix = self.api_base_path.trim_end_matches('/');
        format!("{host}{prefix}")
    }

    pub fn http_timeout(&self) -> Duration {
        Duration::from_millis(self.http_timeout_ms)
    }

    pub fn search_debounce(&self) -> Duration {
        Duration::from_millis(self.search_debounce_ms)
    }

    /// Saves current configuration to the default config file location.
    pub async fn save(&self) -> Result<(), AppError> {
        let config_path = get_config_path();
        self.save_to_path(&config_path).await
    }

    /// Returns the platform-specific path for the config file.
    pub fn get_config_path() -> String {
        paths::get_config_path()
    }

    /// Returns the platform-specific path for the log directory.
    pub fn get_log_dir_path() -> String {
        paths::get_log_dir_path()
    }

    /// Displays current configuration settings to stdout.
    pub async fn display() -> Result<(), AppError> {
        let config_path = get_config_path();
        let log_dir = get_log_dir_path();
        let config = Config::load().await?;

        println!("\nCurrent Configuration");
        println!("────────────────────────────────────");
        println!("Config Location:");
        if Path::new(&config_path).exists() {
            println!("{config_path}");
        } else {
            println!("{config_path} (not found, using defaults)");
        }
        println!("────────────────────────────────────");
        println!("API Root:");
        println!("{}", config.api_root());
        println!("────────────────────────────────────");
        println!("HTTP Timeout:");
        println!("{} ms", config.http_timeout_ms);
        println!("────────────────────────────────────");
        println!("Search Debounce:");
        println!("{} ms", config.search_debounce_ms);
        println!("────────────────────────────────────");
        println!("Max Retries:");
        println!("{}", config.max_retries);
        println!("────────────────────────────────────");
        println!("Log File Location:");
        if let Some(custom_path) = &config.log_file_path {
            println!("{custom_path}");
        } else {
            println!("{log_dir}/cricket_stats.log");
            println!("(Default location)");
        }

        Ok(())
    }

    /// Saves configuration to a custom file path.
    ///
    /// Creates the parent directory if it doesn't exist.
    ///
    /// # Errors
    /// * `AppError::Config` - If the provided path has no parent directory
    /// * `AppError::Io` - If there's an I/O error creating directories or writing the file
    /// * `AppError::TomlSerialize` - If there's an error serializing the configuration
    pub async fn save_to_path(&self, path: &str) -> Result<(), AppError> {
        let config_dir = Path::new(path).parent().ok_or_else(|| {
            AppError::config_error(format!("Path '{path}' has no parent directory"))
        })?;

        if !config_dir.exists() {
            fs::create_dir_all(config_dir).await?;
        }
        let content = toml::to_string_pretty(&Config {
            api_base_url: self.api_base_url.trim_end_matches('/').to_string(),
            ..self.clone()
        })?;
        let mut file = fs::File::create(path).await?;
        file.write_all(content.as_bytes()).await?;
        file.flush().await?;
        Ok(())
    }

    /// Loads configuration from a custom file path.
    pub async fn load_from_path(path: &str) -> Result<Self, AppError> {
        let content = fs::read_to_string(path).await?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use tempfile::tempdir;

    #[tokio::test]
    async fn test_config_load_existing_file() {
        let temp_dir = tempdir().unwrap();
        let config_path = temp_dir.path().join("config.toml");
        let config_path_str = config_path.to_string_lossy();

        let config_content = r#"
api_base_url = "https://stats.example.com"
http_timeout_ms = 5000
log_file_path = "/custom/log/path"
"#;
        tokio::fs::write(&config_path, config_content).await.unwrap();

        let config = Config::load_from_path(&config_path_str).await.unwrap();

        assert_eq!(config.api_base_url, "https://stats.example.com");
        assert_eq!(config.api_base_path, "/api/v1");
        assert_eq!(config.http_timeout_ms, 5000);
        assert_eq!(config.search_debounce_ms, 300);
        assert_eq!(config.max_retries, 3);
        assert_eq!(config.log_file_path, Some("/custom/log/path".to_string()));
    }

    #[tokio::test]
    async fn test_config_load_empty_file_uses_defaults() {
        let temp_dir = tempdir().unwrap();
        let config_path = temp_dir.path().join("config.toml");
        tokio::fs::write(&config_path, "").await.unwrap();

        let config = Config::load_from_path(&config_path.to_string_lossy())
            .await
            .unwrap();

        assert_eq!(config, Config::default());
    }

    #[tokio::test]
    async fn test_config_save_trims_trailing_slash() {
        let temp_dir = tempdir().unwrap();
        let config_path = temp_dir.path().join("config.toml");
        let config_path_str = config_path.to_string_lossy();
        let config = Config::with_base_url("https://stats.example.com/");

        config.save_to_path(&config_path_str).await.unwrap();

        let content = tokio::fs::read_to_string(&config_path).await.unwrap();
        assert!(
            content.contains("api_base_url") && content.contains("\"https://stats.example.com\""),
            "Content should contain the trimmed base URL. Content: {content}"
        );
        let loaded = Config::load_from_path(&config_path_str).await.unwrap();
        assert_eq!(loaded.api_base_url, "https://stats.example.com");
    }

    #[tokio::test]
    async fn test_config_save_creates_directory() {
        let temp_dir = tempdir().unwrap();
        let config_dir = temp_dir.path().join("cricket_stats");
        let config_path = config_dir.join("config.toml");
        let config = Config::default();

        config
            .save_to_path(&config_path.to_string_lossy())
            .await
            .unwrap();

        assert!(config_dir.exists());
        assert!(config_path.exists());
    }

    #[tokio::test]
    async fn test_config_save_and_load_roundtrip() {
        let temp_dir = tempdir().unwrap();
        let config_path = temp_dir.path().join("config.toml");
        let config_path_str = config_path.to_string_lossy();
        let original = Config {
            api_base_url: "https://stats.example.com".to_string(),
            api_base_path: "/api/v2".to_string(),
            http_timeout_ms: 2500,
            search_debounce_ms: 150,
            max_retries: 5,
            log_file_path: Some("/tmp/cricket.log".to_string()),
        };

        original.save_to_path(&config_path_str).await.unwrap();
        let loaded = Config::load_from_path(&config_path_str).await.unwrap();

        assert_eq!(loaded, original);
    }

    #[test]
    fn test_api_root_joins_host_and_prefix() {
        let mut config = Config::with_base_url("http://localhost:8000/");
        assert_eq!(config.api_root(), "http://localhost:8000/api/v1");

        config.api_base_path = String::new();
        assert_eq!(config.api_root(), "http://localhost:8000");
    }

    #[test]
    fn test_durations() {
        let config = Config::default();
        assert_eq!(config.http_timeout(), Duration::from_millis(15_000));
        assert_eq!(config.search_debounce(), Duration::from_millis(300));
    }

    #[test]
    #[serial]
    fn test_env_overrides() {
        // SAFETY: tests touching the environment are serialized
        unsafe {
            std::env::set_var(env_vars::API_URL, "https://override.example.com");
            std::env::set_var(env_vars::API_TIMEOUT, "1234");
            std::env::set_var(env_vars::LOG_FILE, "/tmp/override.log");
        }

        let mut config = Config::default();
        config.apply_env_overrides();

        unsafe {
            std::env::remove_var(env_vars::API_URL);
            std::env::remove_var(env_vars::API_TIMEOUT);
            std::env::remove_var(env_vars::LOG_FILE);
        }

        assert_eq!(config.api_base_url, "https://override.example.com");
        assert_eq!(config.http_timeout_ms, 1234);
        assert_eq!(config.log_file_path, Some("/tmp/override.log".to_string()));
    }

    #[test]
    #[serial]
    fn test_env_override_ignores_invalid_timeout() {
        unsafe {
            std::env::set_var(env_vars::API_TIMEOUT, "soon");
        }

        let mut config = Config::default();
        config.apply_env_overrides();

        unsafe {
            std::env::remove_var(env_vars::API_TIMEOUT);
        }

        assert_eq!(config.http_timeout_ms, 15_000);
    }
}
