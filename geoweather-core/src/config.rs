use anyhow::{Context, Result, anyhow};
use directories::ProjectDirs;
use serde::Deserialize;
use std::{fs, path::Path, path::PathBuf, time::Duration};

pub const DEFAULT_GEO_URL: &str = "https://api.openweathermap.org/geo/1.0/direct";
pub const DEFAULT_WEATHER_URL: &str = "https://api.openweathermap.org/data/2.5/weather";

/// Environment variable that overrides the API key from the config file.
pub const API_KEY_ENV: &str = "OPENWEATHER_API_KEY";

/// Settings stored on disk. Every key is optional.
///
/// Example TOML:
/// ```toml
/// api_key = "..."
/// timeout_secs = 10
/// ```
#[derive(Debug, Clone, Deserialize, Default, PartialEq)]
pub struct Config {
    pub api_key: Option<String>,
    pub geo_url: Option<String>,
    pub weather_url: Option<String>,
    /// No timeout when absent.
    pub timeout_secs: Option<u64>,
}

/// Fully resolved settings handed to both stages at construction.
#[derive(Debug, Clone, PartialEq)]
pub struct ServiceConfig {
    pub api_key: String,
    pub geo_url: String,
    pub weather_url: String,
    pub timeout: Option<Duration>,
}

impl ServiceConfig {
    /// Settings for the public OpenWeather endpoints.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            geo_url: DEFAULT_GEO_URL.to_string(),
            weather_url: DEFAULT_WEATHER_URL.to_string(),
            timeout: None,
        }
    }
}

impl Config {
    /// Load config from the platform config directory, or defaults if the file doesn't exist yet.
    pub fn load() -> Result<Self> {
        let path = Self::config_file_path()?;
        Self::load_from(&path)
    }

    /// Load config from an explicit path. A missing file yields defaults.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let cfg: Config = toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(cfg)
    }

    /// Path to the config file.
    pub fn config_file_path() -> Result<PathBuf> {
        let dirs = ProjectDirs::from("dev", "geoweather", "geoweather")
            .ok_or_else(|| anyhow!("Could not determine platform config directory"))?;

        Ok(dirs.config_dir().join("config.toml"))
    }

    /// Apply overrides from the process environment.
    pub fn apply_env(&mut self) {
        self.apply_env_from(|key| std::env::var(key).ok());
    }

    /// Apply overrides using `lookup` to read variables.
    pub fn apply_env_from<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(key) = lookup(API_KEY_ENV).filter(|k| !k.trim().is_empty()) {
            self.api_key = Some(key);
        }
    }

    pub fn set_api_key(&mut self, api_key: String) {
        self.api_key = Some(api_key);
    }

    /// Fill in defaults and check that a credential is present.
    pub fn resolve(&self) -> Result<ServiceConfig> {
        let api_key = self
            .api_key
            .as_deref()
            .map(str::trim)
            .filter(|k| !k.is_empty())
            .ok_or_else(|| {
                anyhow!(
                    "No OpenWeather API key configured.\n\
                     Hint: pass `--api-key <KEY>`, set {API_KEY_ENV}, or add `api_key` to the config file."
                )
            })?;

        Ok(ServiceConfig {
            api_key: api_key.to_string(),
            geo_url: self.geo_url.clone().unwrap_or_else(|| DEFAULT_GEO_URL.to_string()),
            weather_url: self
                .weather_url
                .clone()
                .unwrap_or_else(|| DEFAULT_WEATHER_URL.to_string()),
            timeout: self.timeout_secs.map(Duration::from_secs),
        })
    }
}
