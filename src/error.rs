//! Error types for the seedconf provisioning pipeline.

use thiserror::Error;

/// Data-source fetch errors
#[derive(Debug, Error)]
pub enum SourceError {
    #[error("Source I/O error: {0}")]
    IoError(#[from] std::io::Error),
}

/// Userdata decode errors
#[derive(Debug, Error)]
pub enum DecodeError {
    #[error("Userdata is not valid UTF-8: {0}")]
    Utf8(#[from] std::str::Utf8Error),

    #[error("Userdata is not valid TOML: {0}")]
    Toml(#[from] toml::de::Error),
}

/// Synthesis errors for file generation and unit derivation
#[derive(Debug, Error)]
pub enum SynthesisError {
    #[error("Invalid option '{field}': {reason}")]
    Validation { field: &'static str, reason: String },

    #[error("Base template I/O error: {0}")]
    IoError(#[from] std::io::Error),
}

/// Configuration and logging setup errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration error: {0}")]
    Invalid(String),

    #[error("Failed to load configuration: {0}")]
    Load(#[from] config::ConfigError),
}
