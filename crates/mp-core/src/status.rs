//! Result codes carried in every response envelope

use std::fmt;

/// Flattened outcome of a request.
///
/// Every failure inside the service collapses to one of these codes; the
/// detail only ever reaches the logs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResultCode {
    Success,
    Error,
    ParameterError,
    CallApiError,
}

impl ResultCode {
    /// Numeric code written to `status` / `error_code`
    pub fn code(self) -> i32 {
        match self {
            Self::Success => 200,
            Self::Error => 500,
            Self::ParameterError => 400,
            Self::CallApiError => 10001,
        }
    }

    /// Static message written to `msg`
    pub fn msg(self) -> &'static str {
        match self {
            Self::Success => "ok",
            Self::Error => "fail",
            Self::ParameterError => "invalid parameters",
            Self::CallApiError => "call API error",
        }
    }

    /// HTTP status the envelope is sent with
    pub fn http_status(self) -> u16 {
        match self {
            Self::Success => 200,
            Self::Error => 500,
            Self::ParameterError => 400,
            Self::CallApiError => 502,
        }
    }
}

impl fmt::Display for ResultCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.msg(), self.code())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_codes_and_messages() {
        assert_eq!(ResultCode::Success.code(), 200);
        assert_eq!(ResultCode::Success.msg(), "ok");
        assert_eq!(ResultCode::ParameterError.code(), 400);
        assert_eq!(ResultCode::CallApiError.code(), 10001);
        assert_eq!(ResultCode::CallApiError.msg(), "call API error");
        assert_eq!(ResultCode::Error.msg(), "fail");
    }

    #[test]
    fn test_http_status() {
        assert_eq!(ResultCode::Success.http_status(), 200);
        assert_eq!(ResultCode::ParameterError.http_status(), 400);
        assert_eq!(ResultCode::CallApiError.http_status(), 502);
    }
}
