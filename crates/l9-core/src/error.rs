//! Error types for Lucky 9

use thiserror::Error;

/// Core error type
#[derive(Error, Debug)]
pub enum L9Error {
    #[error("Invalid digit: {0} (expected 0-9)")]
    InvalidDigit(u8),

    #[error("Invalid reel count: {0} (expected 1-3)")]
    InvalidReelCount(u8),

    #[error("Unknown mode: {0} (expected single, double or triple)")]
    UnknownMode(String),

    #[error("Config error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

/// Result type alias
pub type L9Result<T> = Result<T, L9Error>;
