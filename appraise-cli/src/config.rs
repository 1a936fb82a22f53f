//! CLI configuration
//!
//! A single TOML file under the XDG config dir, with an environment
//! override for the backend base URL.

use std::path::PathBuf;

use anyhow::Result;
use serde::Deserialize;

/// Backend base URL used when nothing is configured
pub const DEFAULT_BASE_URL: &str = "http://localhost:5000/api";

/// Request timeout used when nothing is configured
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Environment variable overriding the configured base URL
pub const BASE_URL_ENV: &str = "APPRAISE_BASE_URL";

/// On-disk shape: every field optional so partial files merge cleanly
#[derive(Debug, Default, Deserialize)]
struct RawConfig {
    base_url: Option<String>,
    timeout_seconds: Option<u64>,
}

/// Resolved configuration with defaults applied
#[derive(Debug, Clone)]
pub struct AppraiseConfig {
    pub base_url: String,
    pub timeout_seconds: u64,
}

pub struct ConfigLoader;

impl ConfigLoader {
    /// Load the config file, applying the env override and defaults
    pub fn load() -> Result<AppraiseConfig> {
        let path = Self::config_path();
        let raw = if path.exists() {
            let contents = std::fs::read_to_string(&path)?;
            toml::from_str(&contents)?
        } else {
            RawConfig::default()
        };
        Ok(Self::finalize(raw, std::env::var(BASE_URL_ENV).ok()))
    }

    /// Path of the config file
    pub fn config_path() -> PathBuf {
        appraise_paths::config_dir().join("config.toml")
    }

    fn finalize(raw: RawConfig, env_base_url: Option<String>) -> AppraiseConfig {
        AppraiseConfig {
            base_url: env_base_url
                .or(raw.base_url)
                .unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
            timeout_seconds: raw.timeout_seconds.unwrap_or(DEFAULT_TIMEOUT_SECS),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_config_falls_back_to_defaults() {
        let config = ConfigLoader::finalize(RawConfig::default(), None);
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.timeout_seconds, DEFAULT_TIMEOUT_SECS);
    }

    #[test]
    fn file_values_override_defaults() {
        let raw: RawConfig =
            toml::from_str("base_url = \"https://assess.example.com/api\"\ntimeout_seconds = 30")
                .unwrap();
        let config = ConfigLoader::finalize(raw, None);
        assert_eq!(config.base_url, "https://assess.example.com/api");
        assert_eq!(config.timeout_seconds, 30);
    }

    #[test]
    fn env_override_beats_the_file() {
        let raw: RawConfig = toml::from_str("base_url = \"https://file.example.com\"").unwrap();
        let config = ConfigLoader::finalize(raw, Some("https://env.example.com".to_string()));
        assert_eq!(config.base_url, "https://env.example.com");
    }
}
