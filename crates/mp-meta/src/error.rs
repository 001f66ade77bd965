//! Error types for mp-meta

use thiserror::Error;

use mp_core::ResultCode;

/// mp-meta error type
#[derive(Error, Debug)]
pub enum MetaError {
    #[error("Graph API request failed: {0}")]
    Request(String),

    #[error("Failed to read Graph API response: {0}")]
    ReadBody(String),

    #[error("Failed to decode Graph API response: {0}")]
    Decode(String),

    #[error("Invalid Graph object id: {0:?}")]
    InvalidId(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl MetaError {
    /// Result code reported to HTTP callers
    pub fn result_code(&self) -> ResultCode {
        match self {
            Self::Request(_) | Self::ReadBody(_) | Self::Decode(_) => ResultCode::CallApiError,
            Self::InvalidId(_) => ResultCode::ParameterError,
            Self::Config(_) => ResultCode::Error,
        }
    }
}

/// Result type alias
pub type Result<T> = std::result::Result<T, MetaError>;
