//! Tracing setup for the admin console
//!
//! The terminal is owned by the UI, so log output always goes to a file.
//! The filter honors `RUST_LOG` when set and otherwise falls back to the
//! configured default level.

use std::fs::OpenOptions;
use std::path::PathBuf;

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::Error;

/// Default log location under the user's home directory
pub fn default_log_path() -> PathBuf {
    let mut path = dirs::home_dir().unwrap_or_else(|| PathBuf::from("."));
    path.push(".aura-admin");
    path.push("admin.log");
    path
}

/// Install the global tracing subscriber writing to the given file.
///
/// Returns the resolved log path so the status bar can surface it.
pub fn init_logging(log_file: Option<PathBuf>, default_level: &str) -> Result<PathBuf, Error> {
    let log_path = log_file.unwrap_or_else(default_log_path);

    if let Some(parent) = log_path.parent() {
        std::fs::create_dir_all(parent)
            .map_err(|e| Error::Config(format!("Could not create log directory: {}", e)))?;
    }

    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&log_path)
        .map_err(|e| Error::Config(format!("Could not open log file: {}", e)))?;

    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("aura_admin={default_level}")));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(
            fmt::layer()
                .compact()
                .with_writer(file)
                .with_ansi(false)
                .with_target(true),
        )
        .try_init()
        .map_err(|e| Error::Config(format!("Could not install tracing subscriber: {}", e)))?;

    Ok(log_path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_log_path_ends_with_app_dir() {
        let path = default_log_path();
        assert!(path.ends_with(".aura-admin/admin.log"));
    }

    #[test]
    fn test_init_logging_creates_file() {
        let dir = tempfile::tempdir().unwrap();
        let log_path = dir.path().join("nested").join("test.log");

        let resolved = init_logging(Some(log_path.clone()), "debug").unwrap();
        assert_eq!(resolved, log_path);
        assert!(log_path.exists());

        // A second install attempt must fail instead of panicking
        assert!(init_logging(Some(log_path), "info").is_err());
    }
}
