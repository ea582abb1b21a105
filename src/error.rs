//! Error types for scrubtext library.
//!
//! Cleaning itself never fails; these errors come from loading configuration,
//! parsing category names and reading input files.

use std::io;
use thiserror::Error;

/// Result type alias for scrubtext operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for scrubtext library.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error during file operations.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// The configuration could not be parsed or contains unknown keys.
    #[error("Invalid configuration: {0}")]
    Config(String),

    /// A rule category name did not match any known category.
    #[error("Unknown rule category: {0}")]
    UnknownCategory(String),

    /// Input bytes are not valid UTF-8.
    #[error("Text encoding error: {0}")]
    Encoding(String),
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Config(err.to_string())
    }
}

impl From<std::string::FromUtf8Error> for Error {
    fn from(err: std::string::FromUtf8Error) -> Self {
        Error::Encoding(err.to_string())
    }
}
