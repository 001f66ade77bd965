//! Error types for mp-core

use thiserror::Error;

/// Main error type for mp-core
#[derive(Error, Debug)]
pub enum Error {
    #[error("Configuration error: {0}")]
    Config(String),
}

/// Result type alias for mp-core
pub type Result<T> = std::result::Result<T, Error>;
