//! Error handling for the rail probe crate.
//!
//! Most failures in this crate are absorbed where they happen (a missing
//! sensor file becomes the sentinel value, an unwritable CSV target skips a
//! row). The error type is still used internally so that the absorbing code
//! can log what went wrong.

use std::path::Path;

/// A specialized `Result` type for rail probe operations.
pub type Result<T> = std::result::Result<T, MonitorError>;

/// The main error type for rail probe operations.
#[derive(Debug, thiserror::Error)]
pub enum MonitorError {
    /// I/O operation failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A sysfs attribute does not exist
    #[error("Sensor not available: {path}")]
    SensorUnavailable { path: String },

    /// A sysfs attribute could not be read
    #[error("Failed to read {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// A sysfs attribute held something other than the expected token
    #[error("Failed to parse {path}: {detail}")]
    Parse { path: String, detail: String },

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Serialization of a sample failed
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl MonitorError {
    /// Create a new unavailable-sensor error
    pub fn unavailable(path: &Path) -> Self {
        Self::SensorUnavailable {
            path: path.display().to_string(),
        }
    }

    /// Create a new parse error
    pub fn parse_error(path: &Path, detail: impl Into<String>) -> Self {
        Self::Parse {
            path: path.display().to_string(),
            detail: detail.into(),
        }
    }

    /// Create a new configuration error
    pub fn config_error(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }
}

/// Reads the first whitespace-delimited token of a sysfs attribute.
pub(crate) fn read_sysfs_token(path: &Path) -> Result<String> {
    if !path.exists() {
        return Err(MonitorError::unavailable(path));
    }
    let content = std::fs::read_to_string(path).map_err(|e| MonitorError::Read {
        path: path.display().to_string(),
        source: e,
    })?;

    content
        .split_whitespace()
        .next()
        .map(str::to_string)
        .ok_or_else(|| MonitorError::parse_error(path, "file is empty"))
}
