use anyhow::{Context, Result, anyhow};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
};

/// Environment variable that overrides the API key stored on disk.
pub const API_KEY_ENV: &str = "OPENWEATHER_API_KEY";

pub const DEFAULT_BASE_URL: &str = "https://api.openweathermap.org/data/2.5";
pub const DEFAULT_LANG: &str = "ru";
pub const DEFAULT_UNITS: &str = "metric";

/// Top-level configuration stored on disk.
///
/// Example TOML:
/// ```toml
/// api_key = "..."
/// lang = "ru"
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct Config {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,

    /// Language of provider descriptions, e.g. "ru" or "en".
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lang: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub units: Option<String>,

    /// Provider base URL; only useful for proxies and tests.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,

    /// Where the request history is kept. Defaults to the platform data dir.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub history_file: Option<PathBuf>,
}

impl Config {
    /// Load config from the platform config directory.
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_file_path()?)
    }

    /// Load config from `path`, or return an empty default if it doesn't exist yet.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            // First run: no config file, return empty.
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let cfg: Config = toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(cfg)
    }

    /// Save config to the platform config directory.
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_file_path()?)
    }

    /// Save config to `path`, creating parent directories as needed.
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory: {}", parent.display())
            })?;
        }

        let toml =
            toml::to_string_pretty(self).context("Failed to serialize configuration to TOML")?;

        fs::write(path, toml)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;

        Ok(())
    }

    /// Path to the config file.
    pub fn config_file_path() -> Result<PathBuf> {
        Ok(project_dirs()?.config_dir().join("config.toml"))
    }

    /// History file from config, falling back to the platform data directory.
    pub fn history_file_path(&self) -> Result<PathBuf> {
        match &self.history_file {
            Some(path) => Ok(path.clone()),
            None => Ok(project_dirs()?.data_dir().join("history.json")),
        }
    }

    /// API key from the environment if set, otherwise from the file.
    pub fn api_key(&self) -> Option<String> {
        self.api_key_with_env(std::env::var(API_KEY_ENV).ok())
    }

    fn api_key_with_env(&self, env_key: Option<String>) -> Option<String> {
        env_key.filter(|key| !key.trim().is_empty()).or_else(|| self.api_key.clone())
    }

    pub fn set_api_key(&mut self, api_key: String) {
        self.api_key = Some(api_key);
    }

    pub fn is_configured(&self) -> bool {
        self.api_key().is_some()
    }

    pub fn lang(&self) -> &str {
        self.lang.as_deref().unwrap_or(DEFAULT_LANG)
    }

    pub fn units(&self) -> &str {
        self.units.as_deref().unwrap_or(DEFAULT_UNITS)
    }

    pub fn base_url(&self) -> &str {
        self.base_url.as_deref().unwrap_or(DEFAULT_BASE_URL)
    }
}

fn project_dirs() -> Result<ProjectDirs> {
    ProjectDirs::from("dev", "weather-task", "weather-cli")
        .ok_or_else(|| anyhow!("Could not determine platform config directory"))
}
