//! Error types for deskvault

use thiserror::Error;

/// Main error type for deskvault operations
#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("TOML parsing error: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("TOML serialization error: {0}")]
    TomlSerialize(#[from] toml::ser::Error),

    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("Could not resolve backup identity: {reason}")]
    Resolution { reason: String },

    #[error("Share unreachable: {path}")]
    ShareUnreachable { path: String },
}

/// Result type alias for deskvault operations
pub type Result<T> = std::result::Result<T, Error>;
