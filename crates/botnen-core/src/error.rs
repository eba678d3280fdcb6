//! Core error types for botnen-core.
//!
//! This module defines the error hierarchy using thiserror. Validation
//! failures never touch in-memory state; they are reported at the
//! operation boundary and the caller decides how to surface them.

use std::path::PathBuf;
use thiserror::Error;

use crate::countdown::DATE_FORMAT_HINT;

/// Core error type for botnen-core.
#[derive(Error, Debug)]
pub enum CoreError {
    /// User-supplied date text does not match the fixed format
    #[error("Invalid date format '{input}'. Please use '{}'", DATE_FORMAT_HINT)]
    InvalidDateFormat { input: String },

    /// Persistence file exists but cannot be read back as a countdown list
    #[error("Countdown store at {path} is corrupt: {source}")]
    CorruptStore {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// Update/delete addressed a position that does not exist
    #[error("Index {index} out of bounds for countdown list (length: {len})")]
    IndexOutOfRange { index: usize, len: usize },

    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Configuration-specific errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Could not determine or create the data directory
    #[error("Failed to prepare data directory {path}: {source}")]
    DataDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Failed to load configuration
    #[error("Failed to load configuration from {path}: {message}")]
    LoadFailed { path: PathBuf, message: String },

    /// Failed to save configuration
    #[error("Failed to save configuration to {path}: {message}")]
    SaveFailed { path: PathBuf, message: String },

    /// Unknown dot-path key
    #[error("Unknown config key: {0}")]
    UnknownKey(String),

    /// Invalid configuration value
    #[error("Invalid configuration value for '{key}': {message}")]
    InvalidValue { key: String, message: String },
}

impl CoreError {
    /// True for errors caused by user input rather than the environment.
    pub fn is_user_error(&self) -> bool {
        matches!(
            self,
            CoreError::InvalidDateFormat { .. } | CoreError::IndexOutOfRange { .. }
        )
    }
}

/// Result type alias for CoreError
pub type Result<T, E = CoreError> = std::result::Result<T, E>;
