//! Error types for regex-tint
//!
//! The classifier itself never fails; these cover config loading and
//! command line handling.

use thiserror::Error;

/// Result type alias for regex-tint operations
pub type Result<T> = std::result::Result<T, TintError>;

/// Errors raised outside the classifier
#[derive(Error, Debug)]
pub enum TintError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Config parse error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("Unknown syntax category: {0}")]
    UnknownCategory(String),

    #[error("Unknown color: {0}")]
    UnknownColor(String),

    #[error("Invalid config: {0}")]
    InvalidConfig(String),

    #[error("{0}")]
    InvalidArgument(String),
}
