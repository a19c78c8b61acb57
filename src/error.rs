//! Error types for manifest-eda.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum EdaError {
    // Configuration errors
    #[error("Configuration file not found at {path}")]
    ConfigFileNotFound { path: String },

    #[error("Failed to parse configuration: {message}")]
    ConfigParse { message: String },

    #[error("Invalid configuration value for {key}: {message}")]
    ConfigInvalidValue { key: String, message: String },

    #[error("Configuration error: {0}")]
    Config(#[from] toml::de::Error),

    // Manifest errors
    #[error("Manifest not found at {path}")]
    ManifestNotFound { path: String },

    #[error("Malformed record on line {line}: {message}")]
    MalformedRecord { line: usize, message: String },

    #[error("Invalid duration on line {line}: {duration} (must be positive and give a finite wpm)")]
    InvalidDuration { line: usize, duration: f64 },

    // Analysis errors
    #[error("Column '{column}' has no finite values")]
    EmptyColumn { column: String },

    // Rendering errors
    #[error("Render failed: {message}")]
    Render { message: String },

    // Serialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    // General I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    // Generic error for cases not covered above
    #[error("{0}")]
    Other(String),
}

pub type Result<T> = std::result::Result<T, EdaError>;
