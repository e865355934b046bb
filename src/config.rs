//! Application configuration
//!
//! A small TOML file controls the event-loop tick rate and logging.
//! The default location is the platform config dir; `AURA_ADMIN_CONFIG`
//! points somewhere else, and CLI flags override individual values.
//! The log destination itself is resolved in `utils::logger`.

use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::error::Error;

/// Env var naming the directory that holds `config.toml`.
pub const CONFIG_DIR_ENV: &str = "AURA_ADMIN_CONFIG";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Event-loop redraw timeout in milliseconds
    pub tick_rate_ms: u64,
    /// Tracing filter applied when RUST_LOG is unset
    pub log_filter: String,
    /// Log destination; defaults into the platform data dir when unset
    pub log_file: Option<PathBuf>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            tick_rate_ms: 100,
            log_filter: "info".to_string(),
            log_file: None,
        }
    }
}

impl AppConfig {
    pub fn load(path: &Path) -> Result<Self, Error> {
        let content = fs::read_to_string(path)?;
        let config: AppConfig = toml::from_str(&content)?;
        Ok(config)
    }

    /// Configuration from the default location. A missing file means
    /// defaults; a file that exists but does not parse is an error.
    pub fn load_or_default() -> Result<Self, Error> {
        let path = Self::default_path();
        if !path.exists() {
            return Ok(Self::default());
        }
        Self::load(&path)
    }

    pub fn save(&self, path: &Path) -> Result<(), Error> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| Error::Config(format!("failed to serialize config: {e}")))?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, content)?;
        Ok(())
    }

    pub fn default_path() -> PathBuf {
        if let Ok(dir) = env::var(CONFIG_DIR_ENV) {
            return PathBuf::from(dir).join("config.toml");
        }
        let mut path = dirs::config_dir().unwrap_or_else(|| PathBuf::from("."));
        path.push("aura-admin");
        path.push("config.toml");
        path
    }

    pub fn tick_rate(&self) -> Duration {
        Duration::from_millis(self.tick_rate_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_save_load_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let config = AppConfig {
            tick_rate_ms: 250,
            log_filter: "debug".to_string(),
            log_file: Some(PathBuf::from("/tmp/aura.log")),
        };
        config.save(&path).unwrap();

        let loaded = AppConfig::load(&path).unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "tick_rate_ms = 50\n").unwrap();

        let loaded = AppConfig::load(&path).unwrap();
        assert_eq!(loaded.tick_rate_ms, 50);
        assert_eq!(loaded.log_filter, "info");
        assert_eq!(loaded.log_file, None);
    }

    #[test]
    fn test_bad_toml_is_a_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "tick_rate_ms = \"not a number\"\n").unwrap();

        let err = AppConfig::load(&path).unwrap_err();
        assert!(matches!(err, Error::ConfigParse(_)));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let err = AppConfig::load(Path::new("/nonexistent/config.toml")).unwrap_err();
        assert!(matches!(err, Error::Io(_)));
    }

    #[test]
    fn test_tick_rate_converts_to_duration() {
        let config = AppConfig {
            tick_rate_ms: 250,
            ..AppConfig::default()
        };
        assert_eq!(config.tick_rate(), Duration::from_millis(250));
    }
}
