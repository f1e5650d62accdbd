//! Core error types for clockburn-core.
//!
//! Stopwatch operations are total and never fail. Errors only come from the
//! configuration layer and from validating user input for the list editors.

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for clockburn-core.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Validation errors
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Configuration-specific errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to load configuration
    #[error("Failed to load configuration from {path}: {message}")]
    LoadFailed { path: PathBuf, message: String },

    /// Failed to save configuration
    #[error("Failed to save configuration to {path}: {message}")]
    SaveFailed { path: PathBuf, message: String },

    /// Invalid configuration value
    #[error("Invalid configuration value for '{key}': {message}")]
    InvalidValue { key: String, message: String },

    /// Key does not exist in the configuration tree
    #[error("unknown config key: {0}")]
    UnknownKey(String),

    /// Failed to parse configuration
    #[error("Failed to parse configuration: {0}")]
    ParseFailed(String),

    /// Home/config directory could not be prepared
    #[error("Failed to access data directory: {0}")]
    DataDir(String),
}

/// Validation errors for free-text and lookup input.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// A required text field was empty
    #[error("'{field}' must not be empty")]
    EmptyField { field: String },

    /// Timezone identifier did not resolve
    #[error("Unknown timezone identifier: {0}")]
    UnknownTimeZone(String),

    /// Time-of-day text could not be parsed
    #[error("Invalid time of day '{input}': expected HH:MM")]
    InvalidTimeOfDay { input: String },

    /// List position that is not a number
    #[error("Invalid position '{input}': expected a number")]
    InvalidPosition { input: String },

    /// Index outside of a list
    #[error("Index {index} out of bounds for {collection} (length: {len})")]
    OutOfBounds {
        collection: String,
        index: usize,
        len: usize,
    },
}

impl From<toml::de::Error> for ConfigError {
    fn from(err: toml::de::Error) -> Self {
        ConfigError::ParseFailed(err.to_string())
    }
}

/// Result type alias for CoreError
pub type Result<T, E = CoreError> = std::result::Result<T, E>;
