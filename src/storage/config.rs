//! Configuration handling
//!
//! Configuration is read from `--config <path>`, `./menu-order.toml`, or the
//! global `config.toml` in the user config directory, in that order.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::log::{OrderLog, DEFAULT_LOG_FILE};

/// File name of the per-directory config
pub const LOCAL_CONFIG_FILE: &str = "menu-order.toml";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid configuration: {0}")]
    Invalid(String),

    #[error("Failed to parse configuration: {0}")]
    Parse(String),
}

/// Settings for the analysis watch loop
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WatchConfig {
    /// Debounce window for file change events, in milliseconds
    pub debounce_ms: u64,
}

impl Default for WatchConfig {
    fn default() -> Self {
        Self { debounce_ms: 500 }
    }
}

impl WatchConfig {
    pub fn debounce(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }
}

/// Application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Path of the shared order log
    pub log_path: PathBuf,

    /// Watch loop settings
    pub watch: WatchConfig,

    /// Where this configuration was loaded from, if anywhere
    #[serde(skip)]
    pub source: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            log_path: PathBuf::from(DEFAULT_LOG_FILE),
            watch: WatchConfig::default(),
            source: None,
        }
    }
}

impl Config {
    /// Loads configuration, preferring an explicit path when given
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        if let Some(path) = explicit {
            return Self::from_file(path);
        }

        let local = PathBuf::from(LOCAL_CONFIG_FILE);
        if local.is_file() {
            return Self::from_file(&local);
        }

        match Self::global_config_dir() {
            Some(dir) if dir.join("config.toml").is_file() => {
                Self::from_file(&dir.join("config.toml"))
            }
            _ => Ok(Self::default()),
        }
    }

    /// Returns the global config directory
    pub fn global_config_dir() -> Option<PathBuf> {
        ProjectDirs::from("dev", "menu-order", "menu-order")
            .map(|dirs| dirs.config_dir().to_path_buf())
    }

    /// Loads configuration from a specific file
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config: {}", path.display()))?;

        let mut config = Self::parse(&content)
            .with_context(|| format!("Failed to parse config: {}", path.display()))?;
        config.source = Some(path.to_path_buf());
        Ok(config)
    }

    /// Parses and validates TOML configuration text
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        let config: Config =
            toml::from_str(content).map_err(|e| ConfigError::Parse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.log_path.as_os_str().is_empty() {
            return Err(ConfigError::Invalid("log_path must not be empty".to_string()));
        }
        if self.watch.debounce_ms == 0 {
            return Err(ConfigError::Invalid(
                "watch.debounce_ms must be greater than 0".to_string(),
            ));
        }
        Ok(())
    }

    /// Overrides the log path (from `--log` or `MENU_ORDER_LOG`)
    pub fn with_log_path(mut self, path: Option<PathBuf>) -> Self {
        if let Some(path) = path {
            self.log_path = path;
        }
        self
    }

    /// Returns a handle to the configured order log
    pub fn order_log(&self) -> OrderLog {
        OrderLog::new(&self.log_path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn default_config() {
        let config = Config::default();
        assert_eq!(config.log_path, PathBuf::from("orders.txt"));
        assert_eq!(config.watch.debounce(), Duration::from_millis(500));
        assert!(config.source.is_none());
    }

    #[test]
    fn parse_full_config() {
        let toml = r#"
log_path = "data/orders.txt"

[watch]
debounce_ms = 250
"#;

        let config = Config::parse(toml).unwrap();
        assert_eq!(config.log_path, PathBuf::from("data/orders.txt"));
        assert_eq!(config.watch.debounce_ms, 250);
    }

    #[test]
    fn missing_fields_use_defaults() {
        let config = Config::parse("").unwrap();
        assert_eq!(config.log_path, PathBuf::from("orders.txt"));
        assert_eq!(config.watch.debounce_ms, 500);
    }

    #[test]
    fn rejects_zero_debounce() {
        let err = Config::parse("[watch]\ndebounce_ms = 0\n").unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[test]
    fn rejects_malformed_toml() {
        let err = Config::parse("log_path = [").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn load_explicit_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("custom.toml");
        fs::write(&path, "log_path = \"elsewhere.txt\"\n").unwrap();

        let config = Config::load(Some(&path)).unwrap();
        assert_eq!(config.log_path, PathBuf::from("elsewhere.txt"));
        assert_eq!(config.source.as_deref(), Some(path.as_path()));
    }

    #[test]
    fn load_missing_explicit_file_fails() {
        let dir = TempDir::new().unwrap();
        assert!(Config::load(Some(&dir.path().join("nope.toml"))).is_err());
    }

    #[test]
    fn log_override() {
        let config = Config::default().with_log_path(Some(PathBuf::from("x.txt")));
        assert_eq!(config.order_log().path(), Path::new("x.txt"));

        let config = Config::default().with_log_path(None);
        assert_eq!(config.log_path, PathBuf::from("orders.txt"));
    }
}
