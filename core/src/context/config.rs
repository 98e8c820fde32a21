//! Application configuration
//!
//! Persisted with confy under the `xivlog` app name. Missing fields fall back
//! to their defaults so older config files keep loading.

use super::ConfigError;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

const APP_NAME: &str = "xivlog";
const CONFIG_NAME: &str = "config";

// ─────────────────────────────────────────────────────────────────────────────
// Platform-Specific Defaults
// ─────────────────────────────────────────────────────────────────────────────

fn default_log_directory() -> String {
    #[cfg(target_os = "windows")]
    {
        dirs::config_dir()
            .map(|p| p.join("Advanced Combat Tracker/FFXIVLogs"))
            .and_then(|p| p.to_str().map(String::from))
            .unwrap_or_default()
    }
    #[cfg(all(unix, not(target_os = "macos")))]
    {
        // ACT under Wine/Proton keeps its logs in the prefix's AppData
        dirs::home_dir()
            .map(|p| {
                p.join(".xlcore/wineprefix/drive_c/users/steamuser/AppData/Roaming/Advanced Combat Tracker/FFXIVLogs")
            })
            .and_then(|p| p.to_str().map(String::from))
            .unwrap_or_default()
    }
    #[cfg(target_os = "macos")]
    {
        String::new()
    }
}

fn default_ability_cache_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(APP_NAME)
        .join("ability_cache.json")
}

fn default_true() -> bool {
    true
}

// ─────────────────────────────────────────────────────────────────────────────
// Config Types
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct XivApiSettings {
    #[serde(default = "default_true")]
    pub enabled: bool,
    #[serde(default = "XivApiSettings::default_base_url")]
    pub base_url: String,
    #[serde(default = "XivApiSettings::default_timeout_secs")]
    pub timeout_secs: u64,
    /// IDs per request
    #[serde(default = "XivApiSettings::default_batch_size")]
    pub batch_size: usize,
}

impl XivApiSettings {
    fn default_base_url() -> String {
        "https://xivapi.com".to_string()
    }

    fn default_timeout_secs() -> u64 {
        15
    }

    fn default_batch_size() -> usize {
        100
    }
}

impl Default for XivApiSettings {
    fn default() -> Self {
        Self {
            enabled: true,
            base_url: Self::default_base_url(),
            timeout_secs: Self::default_timeout_secs(),
            batch_size: Self::default_batch_size(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default = "default_log_directory")]
    pub log_directory: String,
    #[serde(default = "default_ability_cache_path")]
    pub ability_cache_path: PathBuf,
    #[serde(default)]
    pub xivapi: XivApiSettings,
    /// Parse the newest log in full before tailing it
    #[serde(default = "default_true")]
    pub read_existing_on_start: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            log_directory: default_log_directory(),
            ability_cache_path: default_ability_cache_path(),
            xivapi: XivApiSettings::default(),
            read_existing_on_start: true,
        }
    }
}

impl AppConfig {
    pub fn with_log_directory(log_directory: impl Into<String>) -> Self {
        Self {
            log_directory: log_directory.into(),
            ..Default::default()
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// AppConfig Extensions
// ─────────────────────────────────────────────────────────────────────────────

/// Extension trait for AppConfig persistence
pub trait AppConfigExt: Sized {
    fn load() -> Self;
    fn try_load() -> Result<Self, ConfigError>;
    fn save(&self) -> Result<(), ConfigError>;
    fn config_path() -> Option<PathBuf>;
}

impl AppConfigExt for AppConfig {
    /// Load the stored config, falling back to defaults on any error
    fn load() -> Self {
        Self::try_load().unwrap_or_else(|e| {
            tracing::warn!(error = %e, "Using default configuration");
            Self::default()
        })
    }

    fn try_load() -> Result<Self, ConfigError> {
        Ok(confy::load(APP_NAME, CONFIG_NAME)?)
    }

    fn save(&self) -> Result<(), ConfigError> {
        confy::store(APP_NAME, CONFIG_NAME, self).map_err(ConfigError::Save)
    }

    fn config_path() -> Option<PathBuf> {
        confy::get_configuration_file_path(APP_NAME, CONFIG_NAME).ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();
        assert!(config.read_existing_on_start);
        assert!(config.xivapi.enabled);
        assert_eq!(config.xivapi.base_url, "https://xivapi.com");
        assert_eq!(config.xivapi.timeout_secs, 15);
        assert_eq!(config.xivapi.batch_size, 100);
        assert!(config.ability_cache_path.ends_with("xivlog/ability_cache.json"));
    }

    #[test]
    fn test_with_log_directory_keeps_other_defaults() {
        let config = AppConfig::with_log_directory("/logs");
        assert_eq!(config.log_directory, "/logs");
        assert_eq!(config.xivapi, XivApiSettings::default());
    }

    #[test]
    fn test_partial_config_fills_defaults() {
        let config: AppConfig =
            serde_json::from_str(r#"{"log_directory": "/logs", "xivapi": {"enabled": false}}"#)
                .unwrap();
        assert_eq!(config.log_directory, "/logs");
        assert!(!config.xivapi.enabled);
        assert_eq!(config.xivapi.batch_size, 100);
        assert!(config.read_existing_on_start);
    }
}
