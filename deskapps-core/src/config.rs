use anyhow::{Context, Result, anyhow};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{env, fs, path::PathBuf, time::Duration};

use crate::theme::Theme;

/// Environment variable that overrides the stored OpenWeather key.
pub const API_KEY_ENV: &str = "OPENWEATHER_API_KEY";

pub const DEFAULT_WEATHER_URL: &str = "https://api.openweathermap.org/data/2.5";
pub const DEFAULT_GEO_URL: &str = "https://ipapi.co/json/";
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Weather provider settings.
///
/// Example TOML:
/// [weather]
/// api_key = "..."
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct WeatherConfig {
    pub api_key: Option<String>,
    pub base_url: Option<String>,
    pub geo_url: Option<String>,
    pub timeout_secs: Option<u64>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct DatabaseConfig {
    /// SQLite file; defaults to `deskapps.sqlite` in the data directory.
    pub path: Option<PathBuf>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct UiConfig {
    pub theme: Theme,
}

/// Top-level configuration stored on disk.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub weather: WeatherConfig,
    pub database: DatabaseConfig,
    pub ui: UiConfig,
}

impl Config {
    /// Load config from disk, or return an empty default if it doesn't exist yet.
    pub fn load() -> Result<Self> {
        let path = Self::config_file_path()?;
        if !path.exists() {
            // First run: no config file, return empty.
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        Self::from_toml(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))
    }

    pub fn from_toml(contents: &str) -> Result<Self> {
        Ok(toml::from_str(contents)?)
    }

    /// Save config to disk, creating parent directories as needed.
    pub fn save(&self) -> Result<()> {
        let path = Self::config_file_path()?;

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory: {}", parent.display())
            })?;
        }

        let toml =
            toml::to_string_pretty(self).context("Failed to serialize configuration to TOML")?;

        fs::write(&path, toml)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;

        Ok(())
    }

    fn project_dirs() -> Result<ProjectDirs> {
        ProjectDirs::from("dev", "deskapps", "deskapps")
            .ok_or_else(|| anyhow!("Could not determine platform config directory"))
    }

    /// Path to the config file.
    pub fn config_file_path() -> Result<PathBuf> {
        Ok(Self::project_dirs()?.config_dir().join("config.toml"))
    }

    pub fn history_file_path() -> Result<PathBuf> {
        Ok(Self::project_dirs()?.data_dir().join("history.json"))
    }

    pub fn database_path(&self) -> Result<PathBuf> {
        match &self.database.path {
            Some(path) => Ok(path.clone()),
            None => Ok(Self::project_dirs()?.data_dir().join("deskapps.sqlite")),
        }
    }

    /// API key from the environment, falling back to the stored one.
    pub fn api_key(&self) -> Result<String> {
        let from_env = env::var(API_KEY_ENV).ok();
        self.resolve_api_key(from_env)
    }

    fn resolve_api_key(&self, from_env: Option<String>) -> Result<String> {
        from_env
            .or_else(|| self.weather.api_key.clone())
            .filter(|key| !key.trim().is_empty())
            .ok_or_else(|| {
                anyhow!(
                    "No OpenWeather API key configured.\n\
                     Hint: run `deskapps weather configure` or set {API_KEY_ENV}."
                )
            })
    }

    pub fn set_api_key(&mut self, api_key: String) {
        self.weather.api_key = Some(api_key);
    }

    pub fn weather_url(&self) -> &str {
        self.weather.base_url.as_deref().unwrap_or(DEFAULT_WEATHER_URL)
    }

    pub fn geo_url(&self) -> &str {
        self.weather.geo_url.as_deref().unwrap_or(DEFAULT_GEO_URL)
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.weather.timeout_secs.unwrap_or(DEFAULT_TIMEOUT_SECS))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_when_nothing_configured() {
        let cfg = Config::default();

        assert_eq!(cfg.weather_url(), DEFAULT_WEATHER_URL);
        assert_eq!(cfg.geo_url(), DEFAULT_GEO_URL);
        assert_eq!(cfg.timeout(), Duration::from_secs(10));
        assert_eq!(cfg.ui.theme, Theme::Light);
    }

    #[test]
    fn api_key_errors_when_not_set() {
        let cfg = Config::default();
        let err = cfg.resolve_api_key(None).unwrap_err();

        assert!(err.to_string().contains("No OpenWeather API key configured"));
    }

    #[test]
    fn env_key_overrides_stored_key() {
        let mut cfg = Config::default();
        cfg.set_api_key("STORED".into());

        assert_eq!(cfg.resolve_api_key(None).unwrap(), "STORED");
        assert_eq!(cfg.resolve_api_key(Some("FROM_ENV".into())).unwrap(), "FROM_ENV");
    }

    #[test]
    fn blank_key_counts_as_missing() {
        let mut cfg = Config::default();
        cfg.set_api_key("   ".into());

        assert!(cfg.resolve_api_key(None).is_err());
    }

    #[test]
    fn parses_partial_toml() {
        let cfg = Config::from_toml(
            r#"
            [weather]
            api_key = "KEY"
            timeout_secs = 3

            [ui]
            theme = "pink"
            "#,
        )
        .unwrap();

        assert_eq!(cfg.weather.api_key.as_deref(), Some("KEY"));
        assert_eq!(cfg.timeout(), Duration::from_secs(3));
        assert_eq!(cfg.ui.theme, Theme::Pink);
        assert_eq!(cfg.weather_url(), DEFAULT_WEATHER_URL);
    }

    #[test]
    fn explicit_database_path_wins() {
        let cfg = Config::from_toml("[database]\npath = \"/tmp/apps.sqlite\"\n").unwrap();
        assert_eq!(cfg.database_path().unwrap(), PathBuf::from("/tmp/apps.sqlite"));
    }

    #[test]
    fn toml_roundtrip_keeps_theme() {
        let mut cfg = Config::default();
        cfg.ui.theme = Theme::Dark;

        let text = toml::to_string_pretty(&cfg).unwrap();
        assert_eq!(Config::from_toml(&text).unwrap().ui.theme, Theme::Dark);
    }
}
