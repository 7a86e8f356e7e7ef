use axum::http::{HeaderMap, HeaderValue, StatusCode};
use axum::response::IntoResponse;
use serde_derive::Serialize;
use std::error::Error;
use std::fmt;
use tracing::Level;
use utoipa::ToSchema;

use crate::domain::vote::StoreError;

pub type HandlerResponse<T> = Result<T, CodeErrorResp>;

#[derive(Clone, Copy, Debug)]
pub struct CodeError {
    pub success: bool,
    pub error_code: u16,
    pub http_status_code: StatusCode,
    pub message: &'static str,
    pub log_level: Level,
    pub field: Option<&'static str>,
}

impl CodeError {
    pub const POOL_ERROR: CodeError = CodeError {
        success: false,
        error_code: 0,
        http_status_code: StatusCode::INTERNAL_SERVER_ERROR,
        message: "Service temporarily unavailable.",
        log_level: Level::ERROR,
        field: None,
    };
    pub const DB_QUERY_ERROR: CodeError = CodeError {
        success: false,
        error_code: 1,
        http_status_code: StatusCode::INTERNAL_SERVER_ERROR,
        message: "Could not load data.",
        log_level: Level::ERROR,
        field: None,
    };
    pub const DB_INSERTION_ERROR: CodeError = CodeError {
        success: false,
        error_code: 2,
        http_status_code: StatusCode::INTERNAL_SERVER_ERROR,
        message: "Could not record vote.",
        log_level: Level::ERROR,
        field: None,
    };
    pub const UNAUTHORIZED_ACCESS: CodeError = CodeError {
        success: false,
        error_code: 3,
        http_status_code: StatusCode::UNAUTHORIZED,
        message: "Unauthorized access.",
        log_level: Level::INFO,
        field: None,
    };
    pub const VOTE_URL_REQUIRED: CodeError = CodeError {
        success: false,
        error_code: 4,
        http_status_code: StatusCode::BAD_REQUEST,
        message: "Url is required",
        log_level: Level::INFO,
        field: Some("url"),
    };
    pub const VOTE_NOT_FOUND: CodeError = CodeError {
        success: false,
        error_code: 5,
        http_status_code: StatusCode::NOT_FOUND,
        message: "Vote not found.",
        log_level: Level::INFO,
        field: None,
    };
    pub const NOT_FOUND: CodeError = CodeError {
        success: false,
        error_code: 6,
        http_status_code: StatusCode::NOT_FOUND,
        message: "Invalid path!",
        log_level: Level::DEBUG,
        field: None,
    };
}

/// Attaches internal diagnostic detail to a `CodeError`. The detail is logged, never sent.
pub fn code_err(cerr: CodeError, e: impl ToString) -> CodeErrorResp {
    CodeErrorResp {
        success: cerr.success,
        error_code: cerr.error_code,
        http_status_code: cerr.http_status_code,
        message: cerr.message,
        field: cerr.field,
        log_level: cerr.log_level,
        error_message: e.to_string(),
    }
}

/// Pool exhaustion is reported as `POOL_ERROR`; every other store failure as `cerr`.
pub fn store_err(e: StoreError, cerr: CodeError) -> CodeErrorResp {
    match e {
        StoreError::Pool(_) => code_err(CodeError::POOL_ERROR, e),
        e => code_err(cerr, e),
    }
}

impl From<CodeError> for CodeErrorResp {
    fn from(cerr: CodeError) -> Self {
        code_err(cerr, "")
    }
}

#[derive(Debug)]
pub struct CodeErrorResp {
    pub success: bool,
    pub error_code: u16,
    pub http_status_code: StatusCode,
    pub message: &'static str,
    pub field: Option<&'static str>,
    pub log_level: Level,
    pub error_message: String,
}

/// Body sent to the client for every failed request.
#[derive(Serialize, Debug, ToSchema)]
pub struct ErrorBody {
    pub success: bool,
    pub error_code: u16,
    pub http_status_code: u16,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
}

impl fmt::Display for CodeErrorResp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.message, self.error_message)
    }
}

impl Error for CodeErrorResp {}

// Headers are consumed and stripped by the logging middleware.
fn to_header_value(value: &str) -> HeaderValue {
    let printable: String = value
        .chars()
        .map(|c| if c.is_ascii_graphic() || c == ' ' { c } else { '?' })
        .collect();
    HeaderValue::from_str(&printable).unwrap_or_else(|_| HeaderValue::from_static(""))
}

impl IntoResponse for CodeErrorResp {
    fn into_response(self) -> axum::response::Response {
        let mut headers = HeaderMap::new();
        headers.insert("x-error-log-level", to_header_value(self.log_level.as_str()));
        headers.insert(
            "x-error-status-code",
            to_header_value(self.http_status_code.as_str()),
        );
        headers.insert(
            "x-error-code",
            to_header_value(&self.error_code.to_string()),
        );
        headers.insert("x-error-message", to_header_value(self.message));
        headers.insert("x-error-detail", to_header_value(&self.error_message));

        let body = ErrorBody {
            success: self.success,
            error_code: self.error_code,
            http_status_code: self.http_status_code.as_u16(),
            message: self.message.to_string(),
            field: self.field.map(str::to_string),
        };

        (self.http_status_code, headers, axum::Json(body)).into_response()
    }
}
