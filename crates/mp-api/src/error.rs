//! Error types for mp-api

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use thiserror::Error;
use tracing::warn;

use mp_core::ResultCode;
use mp_meta::MetaError;

use crate::response::ErrorBody;

/// mp-api error type
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("Meta error: {0}")]
    Meta(#[from] MetaError),
}

impl ApiError {
    /// Code the error is flattened to in the response envelope
    pub fn result_code(&self) -> ResultCode {
        match self {
            Self::InvalidRequest(_) => ResultCode::ParameterError,
            Self::Meta(e) => e.result_code(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let code = self.result_code();
        warn!("Request failed with {}: {}", code, self);

        let status =
            StatusCode::from_u16(code.http_status()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        (status, ErrorBody::from(code)).into_response()
    }
}

/// Result type alias
pub type Result<T> = std::result::Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_result_codes() {
        assert_eq!(
            ApiError::InvalidRequest("feed_id".into()).result_code(),
            ResultCode::ParameterError
        );
        assert_eq!(
            ApiError::Meta(MetaError::Request("refused".into())).result_code(),
            ResultCode::CallApiError
        );
        assert_eq!(
            ApiError::Meta(MetaError::Config("tls".into())).result_code(),
            ResultCode::Error
        );
    }

    #[test]
    fn test_into_response_status() {
        let response = ApiError::Meta(MetaError::Decode("eof".into())).into_response();
        assert_eq!(response.status(), StatusCode::BAD_GATEWAY);

        let response = ApiError::InvalidRequest("missing".into()).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}
