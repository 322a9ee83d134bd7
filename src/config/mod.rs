use crate::constants::{
    DEFAULT_FIRST_SEASON, DEFAULT_HTTP_TIMEOUT_SECONDS, DEFAULT_LAST_SEASON, env_vars,
};
use crate::error::AppError;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tokio::fs;
use tokio::io::AsyncWriteExt;

pub mod paths;
pub mod validation;

use paths::{get_config_path, get_default_cache_dir, get_log_dir_path};
use validation::validate_config;

/// Configuration structure for the application.
/// Handles loading, saving, and managing application settings.
///
/// League credentials live here and are injected into every data-fetch
/// call; nothing in the request handlers carries its own copy.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Config {
    /// Numeric identifier of the fantasy league.
    pub league_id: u64,
    /// SWID session cookie. Opaque; sent to the league API as-is.
    #[serde(default)]
    pub swid: String,
    /// espn_s2 session cookie. Opaque; sent to the league API as-is.
    #[serde(default)]
    pub espn_s2: String,
    /// API domain for fetching league data. Should include https:// prefix.
    #[serde(default = "default_api_domain")]
    pub api_domain: String,
    /// Directory for cached season tables. Defaults to the platform cache dir.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cache_dir: Option<String>,
    /// Directory containing year-named draft CSV files.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub draft_dir: Option<String>,
    /// First season included in default report windows.
    #[serde(default = "default_first_season")]
    pub first_season: i32,
    /// Last season included in default report windows.
    #[serde(default = "default_last_season")]
    pub last_season: i32,
    /// HTTP timeout in seconds for API requests. Defaults to 30 seconds.
    #[serde(default = "default_http_timeout")]
    pub http_timeout_seconds: u64,
    /// Path to the log file. If not specified, logs go to a default location.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub log_file_path: Option<String>,
}

fn default_api_domain() -> String {
    "https://fantasy.espn.com".to_string()
}

fn default_first_season() -> i32 {
    DEFAULT_FIRST_SEASON
}

fn default_last_season() -> i32 {
    DEFAULT_LAST_SEASON
}

fn default_http_timeout() -> u64 {
    DEFAULT_HTTP_TIMEOUT_SECONDS
}

impl Default for Config {
    fn default() -> Self {
        Config {
            league_id: 0,
            swid: String::new(),
            espn_s2: String::new(),
            api_domain: default_api_domain(),
            cache_dir: None,
            draft_dir: None,
            first_season: default_first_season(),
            last_season: default_last_season(),
            http_timeout_seconds: default_http_timeout(),
            log_file_path: None,
        }
    }
}

impl Config {
    /// Loads configuration from the default config file location.
    /// Environment variables can override config file values.
    ///
    /// # Environment Variables
    /// - `FFL_LEAGUE_ID` - Override league id
    /// - `FFL_SWID` / `FFL_ESPN_S2` - Override session credentials
    /// - `FFL_API_DOMAIN` - Override API domain
    /// - `FFL_CACHE_DIR` / `FFL_DRAFT_DIR` - Override data directories
    /// - `FFL_LOG_FILE` - Override log file path
    /// - `FFL_HTTP_TIMEOUT` - Override HTTP timeout in seconds
    ///
    /// # Notes
    /// - Config file is stored in platform-specific config directory
    /// - A missing config file is not an error as long as the league id
    ///   arrives through the environment
    pub async fn load() -> Result<Self, AppError> {
        let config_path = get_config_path();
        Self::load_with_base(&config_path).await
    }

    /// Loads configuration from an explicit path, then applies
    /// environment overrides and validates.
    pub async fn load_with_base(config_path: &str) -> Result<Self, AppError> {
        let mut config = if Path::new(config_path).exists() {
            let content = fs::read_to_string(config_path).await?;
            toml::from_str(&content)?
        } else {
            Config::default()
        };

        // Override with environment variables if present
        if let Some(league_id) = std::env::var(env_vars::LEAGUE_ID)
            .ok()
            .and_then(|s| s.parse::<u64>().ok())
        {
            config.league_id = league_id;
        }

        if let Ok(swid) = std::env::var(env_vars::SWID) {
            config.swid = swid;
        }

        if let Ok(espn_s2) = std::env::var(env_vars::ESPN_S2) {
            config.espn_s2 = espn_s2;
        }

        if let Ok(api_domain) = std::env::var(env_vars::API_DOMAIN) {
            config.api_domain = api_domain;
        }

        if let Ok(cache_dir) = std::env::var(env_vars::CACHE_DIR) {
            config.cache_dir = Some(cache_dir);
        }

        if let Ok(draft_dir) = std::env::var(env_vars::DRAFT_DIR) {
            config.draft_dir = Some(draft_dir);
        }

        if let Ok(log_file_path) = std::env::var(env_vars::LOG_FILE) {
            config.log_file_path = Some(log_file_path);
        }

        if let Some(timeout) = std::env::var(env_vars::HTTP_TIMEOUT)
            .ok()
            .and_then(|s| s.parse::<u64>().ok())
        {
            config.http_timeout_seconds = timeout;
        }

        config.validate()?;

        Ok(config)
    }

    /// Validates the configuration settings
    pub fn validate(&self) -> Result<(), AppError> {
        validate_config(self.league_id, &self.api_domain, &self.log_file_path)
    }

    /// The inclusive season window reports default to.
    pub fn seasons(&self) -> std::ops::RangeInclusive<i32> {
        self.first_season..=self.last_season
    }

    /// Resolved disk cache directory.
    pub fn cache_dir(&self) -> String {
        self.cache_dir.clone().unwrap_or_else(get_default_cache_dir)
    }

    /// Saves current configuration to the default config file location.
    ///
    /// # Notes
    /// - Creates config directory if it doesn't exist
    /// - Ensures api_domain has https:// prefix
    /// - Uses TOML format for storage
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
    ///
    /// # Notes
    /// - Shows config file location and current settings
    /// - Session credentials are shown only as present/absent
    pub async fn display() -> Result<(), AppError> {
        let config_path = get_config_path();
        let log_dir = get_log_dir_path();

        if Path::new(&config_path).exists() {
            let config = Config::load().await?;
            println!("\nCurrent Configuration");
            println!("────────────────────────────────────");
            println!("Config Location:");
            println!("{config_path}");
            println!("────────────────────────────────────");
            println!("League ID:");
            println!("{}", config.league_id);
            println!("────────────────────────────────────");
            println!("API Domain:");
            println!("{}", config.api_domain);
            println!("────────────────────────────────────");
            println!("Credentials:");
            println!(
                "SWID {} / espn_s2 {}",
                if config.swid.is_empty() { "unset" } else { "set" },
                if config.espn_s2.is_empty() { "unset" } else { "set" }
            );
            println!("────────────────────────────────────");
            println!("Seasons:");
            println!("{} - {}", config.first_season, config.last_season);
            println!("────────────────────────────────────");
            println!("Cache Directory:");
            println!("{}", config.cache_dir());
            println!("────────────────────────────────────");
            println!("Draft CSV Directory:");
            match &config.draft_dir {
                Some(dir) => println!("{dir}"),
                None => println!("(not configured)"),
            }
            println!("────────────────────────────────────");
            println!("HTTP Timeout:");
            println!("{} seconds", config.http_timeout_seconds);
            println!("────────────────────────────────────");
            println!("Log File Location:");
            if let Some(custom_path) = &config.log_file_path {
                println!("{custom_path}");
            } else {
                println!("{log_dir}/ffl_dashboard.log");
                println!("(Default location)");
            }
        } else {
            println!("\nNo configuration file found at:");
            println!("{config_path}");
        }

        Ok(())
    }

    /// Saves configuration to a custom file path.
    ///
    /// Creates the parent directory if it doesn't exist and ensures the
    /// API domain has the proper https:// prefix.
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
        let api_domain = if !self.api_domain.starts_with("https://") {
            format!("https://{}", self.api_domain.trim_start_matches("http://"))
        } else {
            self.api_domain.clone()
        };
        let content = toml::to_string_pretty(&Config {
            api_domain,
            ..self.clone()
        })?;
        let mut file = fs::File::create(path).await?;
        file.write_all(content.as_bytes()).await?;
        file.flush().await?;
        Ok(())
    }

    /// Loads configuration from a custom file path without environment
    /// overrides (for testing).
    #[allow(dead_code)] // Used in tests
    pub async fn load_from_path(path: &str) -> Result<Self, AppError> {
        let content = fs::read_to_string(path).await?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[tokio::test]
    async fn test_config_load_existing_file() {
        let temp_dir = tempdir().unwrap();
        let config_path = temp_dir.path().join("config.toml");
        let config_path_str = config_path.to_string_lossy();

        let config_content = r#"
league_id = 169486
swid = "{ABC-123}"
espn_s2 = "opaque-token"
api_domain = "https://fantasy.example.com"
"#;
        tokio::fs::write(&config_path, config_content)
            .await
            .unwrap();

        let config = Config::load_from_path(&config_path_str).await.unwrap();

        assert_eq!(config.league_id, 169486);
        assert_eq!(config.swid, "{ABC-123}");
        assert_eq!(config.espn_s2, "opaque-token");
        assert_eq!(config.api_domain, "https://fantasy.example.com");
        // Defaults fill in everything the file omits
        assert_eq!(config.first_season, DEFAULT_FIRST_SEASON);
        assert_eq!(config.last_season, DEFAULT_LAST_SEASON);
        assert_eq!(config.http_timeout_seconds, DEFAULT_HTTP_TIMEOUT_SECONDS);
        assert_eq!(config.log_file_path, None);
    }

    #[tokio::test]
    async fn test_config_save_round_trip() {
        let temp_dir = tempdir().unwrap();
        let config_path = temp_dir.path().join("config.toml");
        let config_path_str = config_path.to_string_lossy();

        let config = Config {
            league_id: 169486,
            swid: "{ABC-123}".to_string(),
            espn_s2: "opaque-token".to_string(),
            api_domain: "https://fantasy.example.com".to_string(),
            draft_dir: Some("/data/drafts".to_string()),
            ..Config::default()
        };
        config.save_to_path(&config_path_str).await.unwrap();
        assert!(config_path.exists());

        let loaded = Config::load_from_path(&config_path_str).await.unwrap();
        assert_eq!(loaded.league_id, 169486);
        assert_eq!(loaded.api_domain, "https://fantasy.example.com");
        assert_eq!(loaded.draft_dir, Some("/data/drafts".to_string()));
    }

    #[tokio::test]
    async fn test_config_save_adds_https_prefix() {
        let temp_dir = tempdir().unwrap();
        let config_path = temp_dir.path().join("config.toml");
        let config_path_str = config_path.to_string_lossy();

        let config = Config {
            league_id: 169486,
            api_domain: "fantasy.example.com".to_string(),
            ..Config::default()
        };
        config.save_to_path(&config_path_str).await.unwrap();

        let loaded = Config::load_from_path(&config_path_str).await.unwrap();
        assert_eq!(loaded.api_domain, "https://fantasy.example.com");
    }

    #[tokio::test]
    #[serial_test::serial]
    async fn test_env_overrides_take_precedence() {
        let temp_dir = tempdir().unwrap();
        let config_path = temp_dir.path().join("config.toml");
        let config_path_str = config_path.to_string_lossy().to_string();

        let config_content = r#"
league_id = 1
api_domain = "https://fantasy.example.com"
http_timeout_seconds = 30
"#;
        tokio::fs::write(&config_path, config_content)
            .await
            .unwrap();

        unsafe {
            std::env::set_var(env_vars::LEAGUE_ID, "169486");
            std::env::set_var(env_vars::HTTP_TIMEOUT, "5");
        }

        let config = Config::load_with_base(&config_path_str).await.unwrap();

        unsafe {
            std::env::remove_var(env_vars::LEAGUE_ID);
            std::env::remove_var(env_vars::HTTP_TIMEOUT);
        }

        assert_eq!(config.league_id, 169486);
        assert_eq!(config.http_timeout_seconds, 5);
    }

    #[test]
    fn test_seasons_range() {
        let config = Config {
            first_season: 2019,
            last_season: 2023,
            ..Config::default()
        };
        let years: Vec<i32> = config.seasons().collect();
        assert_eq!(years, vec![2019, 2020, 2021, 2022, 2023]);
    }
}
