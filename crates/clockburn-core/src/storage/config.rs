//! TOML-based application configuration.
//!
//! Stores user preferences including:
//! - Stopwatch tick period
//! - Wall-clock refresh period and seconds display
//! - The zones a fresh world clock starts with
//! - Default log filter
//!
//! Configuration is stored at `~/.config/clockburn/config.toml`. Stopwatch,
//! alarm and world-clock edits made during a session are never written here.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

use super::data_dir;
use crate::error::ConfigError;
use crate::format::ClockPrecision;
use crate::stopwatch::{CLOCK_PERIOD, STOPWATCH_PERIOD};
use crate::world_clock::{default_zones, parse_time_zone, TimeZoneEntry};

/// Stopwatch configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StopwatchConfig {
    #[serde(default = "default_tick_interval_ms")]
    pub tick_interval_ms: u64,
}

/// Wall-clock display configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClockConfig {
    #[serde(default = "default_refresh_interval_ms")]
    pub refresh_interval_ms: u64,
    #[serde(default = "default_true")]
    pub show_seconds: bool,
}

/// World clock configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorldClockConfig {
    #[serde(default = "default_zones")]
    pub zones: Vec<TimeZoneEntry>,
}

/// Logging configuration. `CLOCKBURN_LOG` takes precedence.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_filter")]
    pub filter: String,
}

/// Application configuration.
///
/// Serialized to/from TOML at `~/.config/clockburn/config.toml`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub stopwatch: StopwatchConfig,
    #[serde(default)]
    pub clock: ClockConfig,
    #[serde(default)]
    pub world_clock: WorldClockConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

// Default functions
fn default_tick_interval_ms() -> u64 {
    STOPWATCH_PERIOD.as_millis() as u64
}
fn default_refresh_interval_ms() -> u64 {
    CLOCK_PERIOD.as_millis() as u64
}
fn default_true() -> bool {
    true
}
fn default_log_filter() -> String {
    "warn".into()
}

impl Default for StopwatchConfig {
    fn default() -> Self {
        Self {
            tick_interval_ms: default_tick_interval_ms(),
        }
    }
}

impl Default for ClockConfig {
    fn default() -> Self {
        Self {
            refresh_interval_ms: default_refresh_interval_ms(),
            show_seconds: true,
        }
    }
}

impl Default for WorldClockConfig {
    fn default() -> Self {
        Self {
            zones: default_zones(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: default_log_filter(),
        }
    }
}

impl Config {
    fn get_json_value_by_path<'a>(
        root: &'a serde_json::Value,
        key: &str,
    ) -> Option<&'a serde_json::Value> {
        if key.is_empty() {
            return None;
        }

        let mut current = root;
        for part in key.split('.') {
            current = current.get(part)?;
        }
        Some(current)
    }

    fn set_json_value_by_path(
        root: &mut serde_json::Value,
        key: &str,
        value: &str,
    ) -> Result<(), ConfigError> {
        let invalid = |message: String| ConfigError::InvalidValue {
            key: key.to_string(),
            message,
        };
        let unknown = || ConfigError::UnknownKey(key.to_string());

        let mut parts = key.split('.').peekable();
        if key.is_empty() {
            return Err(unknown());
        }

        let mut current = root;
        while let Some(part) = parts.next() {
            let is_leaf = parts.peek().is_none();
            if is_leaf {
                let obj = current.as_object_mut().ok_or_else(unknown)?;
                let existing = obj.get(part).ok_or_else(unknown)?;

                let new_value = match existing {
                    serde_json::Value::Bool(_) => serde_json::Value::Bool(
                        value.parse::<bool>().map_err(|e| invalid(e.to_string()))?,
                    ),
                    serde_json::Value::Number(_) => value
                        .parse::<u64>()
                        .map(|n| serde_json::Value::Number(n.into()))
                        .map_err(|_| invalid(format!("cannot parse '{value}' as number")))?,
                    serde_json::Value::Object(_) | serde_json::Value::Array(_) => {
                        serde_json::from_str(value).map_err(|e| invalid(e.to_string()))?
                    }
                    _ => serde_json::Value::String(value.into()),
                };

                obj.insert(part.to_string(), new_value);
                return Ok(());
            }

            current = current.get_mut(part).ok_or_else(unknown)?;
        }

        Err(unknown())
    }

    /// Default location: `<data_dir>/config.toml`.
    pub fn path() -> Result<PathBuf, ConfigError> {
        Ok(data_dir()?.join("config.toml"))
    }

    /// Load from the default location, writing defaults if the file is missing.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(&Self::path()?)
    }

    /// Load from `path`, writing defaults there if the file is missing.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        match std::fs::read_to_string(path) {
            Ok(content) => {
                let cfg: Config = toml::from_str(&content)?;
                cfg.validate()?;
                Ok(cfg)
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                let cfg = Self::default();
                cfg.save_to(path)?;
                Ok(cfg)
            }
            Err(e) => Err(ConfigError::LoadFailed {
                path: path.to_path_buf(),
                message: e.to_string(),
            }),
        }
    }

    /// Persist to the default location.
    pub fn save(&self) -> Result<(), ConfigError> {
        self.save_to(&Self::path()?)
    }

    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        let save_failed = |message: String| ConfigError::SaveFailed {
            path: path.to_path_buf(),
            message,
        };
        let content = toml::to_string_pretty(self).map_err(|e| save_failed(e.to_string()))?;
        std::fs::write(path, content).map_err(|e| save_failed(e.to_string()))?;
        Ok(())
    }

    /// Reject values the rest of the application cannot run with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.stopwatch.tick_interval_ms == 0 {
            return Err(ConfigError::InvalidValue {
                key: "stopwatch.tick_interval_ms".into(),
                message: "must be greater than zero".into(),
            });
        }
        if self.clock.refresh_interval_ms == 0 {
            return Err(ConfigError::InvalidValue {
                key: "clock.refresh_interval_ms".into(),
                message: "must be greater than zero".into(),
            });
        }
        for zone in &self.world_clock.zones {
            if zone.name.trim().is_empty() {
                return Err(ConfigError::InvalidValue {
                    key: "world_clock.zones".into(),
                    message: format!("zone '{}' has an empty name", zone.identifier),
                });
            }
            parse_time_zone(&zone.identifier).map_err(|e| ConfigError::InvalidValue {
                key: "world_clock.zones".into(),
                message: e.to_string(),
            })?;
        }
        Ok(())
    }

    /// Get a config value as string by dot-separated key.
    pub fn get(&self, key: &str) -> Option<String> {
        let json = serde_json::to_value(self).ok()?;
        let val = Self::get_json_value_by_path(&json, key)?;
        match val {
            serde_json::Value::String(s) => Some(s.clone()),
            other => Some(other.to_string()),
        }
    }

    /// Update a value in memory by dot-separated key. The result is validated
    /// before it replaces `self`.
    pub fn apply(&mut self, key: &str, value: &str) -> Result<(), ConfigError> {
        let mut json = serde_json::to_value(&*self).map_err(|e| ConfigError::ParseFailed(e.to_string()))?;
        Self::set_json_value_by_path(&mut json, key, value)?;
        let updated: Config = serde_json::from_value(json).map_err(|e| ConfigError::InvalidValue {
            key: key.to_string(),
            message: e.to_string(),
        })?;
        updated.validate()?;
        *self = updated;
        Ok(())
    }

    /// Set a config value by key and persist.
    pub fn set(&mut self, key: &str, value: &str) -> Result<(), ConfigError> {
        self.apply(key, value)?;
        self.save()
    }

    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.stopwatch.tick_interval_ms)
    }

    pub fn refresh_interval(&self) -> Duration {
        Duration::from_millis(self.clock.refresh_interval_ms)
    }

    pub fn clock_precision(&self) -> ClockPrecision {
        ClockPrecision::from_show_seconds(self.clock.show_seconds)
    }
}
