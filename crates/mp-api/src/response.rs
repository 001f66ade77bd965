//! Response envelope shared by every JSON endpoint
//!
//! Success: `{"status": 200, "msg": "ok", "data": ...}`
//! Failure: `{"error_code": 10001, "msg": "call API error"}`

use axum::Json;
use axum::response::{IntoResponse, Response};
use serde::Serialize;

use mp_core::ResultCode;

#[derive(Debug, Serialize)]
pub struct SuccessBody<T> {
    pub status: i32,
    pub msg: &'static str,
    pub data: T,
}

#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error_code: i32,
    pub msg: &'static str,
}

impl From<ResultCode> for ErrorBody {
    fn from(code: ResultCode) -> Self {
        Self {
            error_code: code.code(),
            msg: code.msg(),
        }
    }
}

impl IntoResponse for ErrorBody {
    fn into_response(self) -> Response {
        Json(self).into_response()
    }
}

/// Successful result wrapped in the envelope
#[derive(Debug)]
pub struct Envelope<T>(pub T);

impl<T: Serialize> IntoResponse for Envelope<T> {
    fn into_response(self) -> Response {
        let code = ResultCode::Success;
        Json(SuccessBody {
            status: code.code(),
            msg: code.msg(),
            data: self.0,
        })
        .into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_success_body_shape() {
        let body = SuccessBody {
            status: 200,
            msg: "ok",
            data: json!({"id": "1"}),
        };
        assert_eq!(
            serde_json::to_value(body).unwrap(),
            json!({"status": 200, "msg": "ok", "data": {"id": "1"}})
        );
    }

    #[test]
    fn test_error_body_shape() {
        let body = ErrorBody::from(ResultCode::CallApiError);
        assert_eq!(
            serde_json::to_value(body).unwrap(),
            json!({"error_code": 10001, "msg": "call API error"})
        );
    }
}
