use crate::error::{HullError, Result};
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::PathBuf;

/// The base config directory name under ~/.config/
const CONFIG_DIR_NAME: &str = "hullinsight";

/// The filename for the global configuration file.
const CONFIG_FILENAME: &str = "config.toml";

/// Environment variable that overrides the configured API base URL.
const BASE_URL_ENV: &str = "HULLINSIGHT_API_URL";

/// Application configuration.
///
/// Controls where the console talks to and how lists are paginated.
/// Missing fields in the config file fall back to defaults, so partial
/// configs work correctly.
///
/// # Example
///
/// ```toml
/// base_url = "https://hull-insights-api.ilizien-projects-cdf.in/"
/// page_size = 10
/// timeout_secs = 30
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppConfig {
    /// Base URL of the Hull Insight REST API. Always treated as ending
    /// with a trailing slash; endpoint paths are appended to it.
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Rows requested per page on list screens.
    #[serde(default = "default_page_size")]
    pub page_size: u32,

    /// Per-request timeout in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_base_url() -> String {
    "https://hull-insights-api.ilizien-projects-cdf.in/".to_string()
}

fn default_page_size() -> u32 {
    10
}

fn default_timeout_secs() -> u64 {
    30
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            page_size: default_page_size(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl AppConfig {
    /// Base URL with the environment override applied and a guaranteed
    /// trailing slash.
    pub fn effective_base_url(&self) -> String {
        let raw = env::var(BASE_URL_ENV).unwrap_or_else(|_| self.base_url.clone());
        if raw.ends_with('/') {
            raw
        } else {
            format!("{}/", raw)
        }
    }

    /// Set a config value by key name, as used by `hullinsight config set`.
    pub fn set_value(&mut self, key: &str, value: &str) -> Result<()> {
        match key {
            "base_url" => {
                self.base_url = value.to_string();
            }
            "page_size" => {
                self.page_size = value
                    .parse()
                    .map_err(|_| HullError::Config(format!("page_size must be a number, got '{value}'")))?;
            }
            "timeout_secs" => {
                self.timeout_secs = value
                    .parse()
                    .map_err(|_| HullError::Config(format!("timeout_secs must be a number, got '{value}'")))?;
            }
            other => {
                return Err(HullError::Config(format!(
                    "Unknown config key '{other}'. Valid keys: base_url, page_size, timeout_secs"
                )));
            }
        }
        Ok(())
    }
}

/// Validate a configuration for logical consistency.
///
/// # Validation Rules
///
/// - `base_url` must be non-empty and start with `http://` or `https://`
/// - `page_size` must be between 1 and 100
/// - `timeout_secs` must be non-zero
pub fn validate_config(config: &AppConfig) -> Result<()> {
    if config.base_url.is_empty() {
        return Err(HullError::Config("base_url must not be empty".to_string()));
    }
    if !config.base_url.starts_with("http://") && !config.base_url.starts_with("https://") {
        return Err(HullError::Config(format!(
            "base_url must start with http:// or https://, got '{}'",
            config.base_url
        )));
    }
    if config.page_size == 0 || config.page_size > 100 {
        return Err(HullError::Config(format!(
            "page_size must be between 1 and 100, got {}",
            config.page_size
        )));
    }
    if config.timeout_secs == 0 {
        return Err(HullError::Config("timeout_secs must be non-zero".to_string()));
    }
    Ok(())
}

/// Default config file content with explanatory comments, written when
/// creating a new config file.
const DEFAULT_CONFIG_WITH_COMMENTS: &str = r#"# Hull Insight Console Configuration

# Base URL of the Hull Insight REST API.
# Can be overridden per-invocation with the HULLINSIGHT_API_URL env var.
base_url = "https://hull-insights-api.ilizien-projects-cdf.in/"

# Rows requested per page on list screens (1-100).
page_size = 10

# Per-request timeout in seconds.
timeout_secs = 30
"#;

/// Get the config directory, honoring `HULLINSIGHT_CONFIG_DIR` for tests.
pub fn config_dir() -> Result<PathBuf> {
    if let Ok(dir) = env::var("HULLINSIGHT_CONFIG_DIR") {
        return Ok(PathBuf::from(dir));
    }
    let base = dirs::config_dir()
        .ok_or_else(|| HullError::Config("Could not determine config directory".to_string()))?;
    Ok(base.join(CONFIG_DIR_NAME))
}

/// Ensure the config directory exists, creating it if necessary.
pub fn ensure_config_dir() -> Result<PathBuf> {
    let dir = config_dir()?;
    if !dir.exists() {
        fs::create_dir_all(&dir)?;
    }
    Ok(dir)
}

/// Get the path to the config file (`~/.config/hullinsight/config.toml`).
pub fn config_path() -> Result<PathBuf> {
    Ok(config_dir()?.join(CONFIG_FILENAME))
}

/// Load the configuration, creating a commented default file if none exists.
pub fn load_config() -> Result<AppConfig> {
    let path = config_path()?;

    if !path.exists() {
        ensure_config_dir()?;
        fs::write(&path, DEFAULT_CONFIG_WITH_COMMENTS)?;
        return Ok(AppConfig::default());
    }

    let content = fs::read_to_string(&path)?;
    let config: AppConfig = toml::from_str(&content).map_err(|e| {
        HullError::Config(format!("Failed to parse config file at {:?}: {}", path, e))
    })?;

    validate_config(&config)?;
    Ok(config)
}

/// Save the configuration back to the config file.
pub fn save_config(config: &AppConfig) -> Result<()> {
    validate_config(config)?;
    ensure_config_dir()?;
    let content = toml::to_string_pretty(config)
        .map_err(|e| HullError::Config(format!("Failed to serialize config: {}", e)))?;
    fs::write(config_path()?, content)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.page_size, 10);
        assert_eq!(config.timeout_secs, 30);
        assert!(config.base_url.starts_with("https://"));
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let config: AppConfig = toml::from_str("page_size = 25").unwrap();
        assert_eq!(config.page_size, 25);
        assert_eq!(config.base_url, default_base_url());
        assert_eq!(config.timeout_secs, 30);
    }

    #[test]
    fn test_validate_rejects_empty_base_url() {
        let config = AppConfig {
            base_url: String::new(),
            ..Default::default()
        };
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn test_validate_rejects_non_http_base_url() {
        let config = AppConfig {
            base_url: "ftp://example.com/".to_string(),
            ..Default::default()
        };
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn test_validate_rejects_zero_page_size() {
        let config = AppConfig {
            page_size: 0,
            ..Default::default()
        };
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn test_effective_base_url_appends_slash() {
        let config = AppConfig {
            base_url: "https://api.example.com".to_string(),
            ..Default::default()
        };
        assert_eq!(config.effective_base_url(), "https://api.example.com/");
    }

    #[test]
    fn test_set_value_known_keys() {
        let mut config = AppConfig::default();
        config.set_value("page_size", "50").unwrap();
        assert_eq!(config.page_size, 50);
        config.set_value("base_url", "http://localhost:8000/").unwrap();
        assert_eq!(config.base_url, "http://localhost:8000/");
    }

    #[test]
    fn test_set_value_unknown_key_errors() {
        let mut config = AppConfig::default();
        assert!(config.set_value("colour", "blue").is_err());
    }

    #[test]
    fn test_set_value_non_numeric_page_size_errors() {
        let mut config = AppConfig::default();
        assert!(config.set_value("page_size", "lots").is_err());
    }

    #[test]
    fn test_roundtrip_serialization() {
        let config = AppConfig {
            base_url: "http://localhost:9000/".to_string(),
            page_size: 20,
            timeout_secs: 5,
        };
        let toml_str = toml::to_string_pretty(&config).unwrap();
        let parsed: AppConfig = toml::from_str(&toml_str).unwrap();
        assert_eq!(parsed, config);
    }
}
