mod config;

pub use config::{ClockConfig, Config, LoggingConfig, StopwatchConfig, WorldClockConfig};

use std::path::PathBuf;

use crate::error::ConfigError;

/// Returns `~/.config/clockburn[-dev]/` based on CLOCKBURN_ENV.
///
/// Set CLOCKBURN_ENV=dev to use development data directory.
///
/// # Errors
/// Returns an error if creating the config directory fails.
pub fn data_dir() -> Result<PathBuf, ConfigError> {
    let base_dir = dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".config");

    let env = std::env::var("CLOCKBURN_ENV").unwrap_or_else(|_| "production".to_string());

    let dir = if env == "dev" {
        base_dir.join("clockburn-dev")
    } else {
        base_dir.join("clockburn")
    };

    std::fs::create_dir_all(&dir).map_err(|e| ConfigError::DataDir(e.to_string()))?;
    Ok(dir)
}
