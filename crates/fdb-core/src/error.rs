//! Error types for fdb-core

use thiserror::Error;

/// Core error type for farmdb
#[derive(Error, Debug)]
pub enum CoreError {
    /// C001: Settings file not found
    #[error("[C001] Settings file not found: {path}")]
    ConfigNotFound { path: String },

    /// C002: Failed to parse settings file
    #[error("[C002] Failed to parse settings: {0}")]
    ConfigParseError(#[from] serde_yaml::Error),

    /// C003: Invalid settings value
    #[error("[C003] Invalid settings: {message}")]
    ConfigInvalid { message: String },

    /// C004: IO error with file path context
    #[error("[C004] Failed to read '{path}': {source}")]
    IoWithPath {
        path: String,
        source: std::io::Error,
    },
}

/// Result type alias for CoreError
pub type CoreResult<T> = Result<T, CoreError>;
