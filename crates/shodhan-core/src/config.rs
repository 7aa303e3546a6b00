//! Configuration resolution for Shodhan.
//!
//! Implements hierarchical config resolution:
//! 1. Built-in defaults
//! 2. Global config (~/.config/shodhan/settings.json)
//! 3. Environment variables
//! 4. CLI arguments (applied by the caller, highest priority)

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};

/// Complete Shodhan configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub ui: UiConfig,
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api: ApiConfig::default(),
            ui: UiConfig::default(),
            log_level: default_log_level(),
        }
    }
}

fn default_log_level() -> String {
    "warn".to_string()
}

/// Backend connection settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    /// Origin the `/api/...` paths are appended to.
    pub base_url: String,
    pub request_timeout_secs: u64,
    pub login_probe: LoginProbe,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8080".to_string(),
            request_timeout_secs: 30,
            login_probe: LoginProbe::default(),
        }
    }
}

/// Which request verifies admin credentials at login.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum LoginProbe {
    /// `GET /api/admin/auth/login`
    #[default]
    Dedicated,
    /// `GET /api/blogs/admin`, listing blogs as a side effect.
    BlogList,
}

/// Interactive behaviour.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct UiConfig {
    /// Wait between arriving on the home page and showing the promo dialog.
    pub promo_delay_secs: u64,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            promo_delay_secs: 3,
        }
    }
}

/// Load configuration with hierarchical resolution.
pub fn load_config() -> Result<Config> {
    let mut config = Config::default();

    if let Some(global_path) = global_config_path() {
        if global_path.exists() {
            config = load_config_file(&global_path)?;
        }
    }

    apply_env_overrides(&mut config, |key| std::env::var(key).ok());

    Ok(config)
}

/// Get the global config file path.
pub fn global_config_path() -> Option<PathBuf> {
    #[cfg(target_os = "macos")]
    {
        dirs::home_dir().map(|h| h.join("Library/Application Support/shodhan/settings.json"))
    }
    #[cfg(target_os = "windows")]
    {
        dirs::home_dir().map(|h| h.join(".shodhan").join("settings.json"))
    }
    #[cfg(not(any(target_os = "macos", target_os = "windows")))]
    {
        std::env::var("XDG_CONFIG_HOME")
            .ok()
            .map(PathBuf::from)
            .or_else(|| dirs::home_dir().map(|h| h.join(".config")))
            .map(|p| p.join("shodhan").join("settings.json"))
    }
}

fn load_config_file(path: &Path) -> Result<Config> {
    let content = std::fs::read_to_string(path).map_err(|e| {
        Error::Config(format!("Failed to read config file {}: {}", path.display(), e))
    })?;
    serde_json::from_str(&content).map_err(|e| {
        Error::Config(format!("Failed to parse config file {}: {}", path.display(), e))
    })
}

/// Apply `SHODHAN_*` overrides; unparsable numbers are ignored.
pub fn apply_env_overrides(config: &mut Config, var: impl Fn(&str) -> Option<String>) {
    if let Some(val) = var("SHODHAN_API_URL") {
        config.api.base_url = val;
    }
    if let Some(n) = var("SHODHAN_REQUEST_TIMEOUT_SECS").and_then(|v| v.parse().ok()) {
        config.api.request_timeout_secs = n;
    }
    if let Some(n) = var("SHODHAN_PROMO_DELAY_SECS").and_then(|v| v.parse().ok()) {
        config.ui.promo_delay_secs = n;
    }
    if let Some(val) = var("SHODHAN_LOG_LEVEL") {
        config.log_level = val;
    }
}
