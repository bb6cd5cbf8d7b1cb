//! Common Error Types
//!
//! Unified error handling with HTTP status mapping.

use std::fmt;

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use bgp_devtest_render::{CapabilityError, RenderError};

use crate::daapi::FetchError;

/// Failure classes surfaced to HTTP clients
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    // Upstream data-aggregation API
    UpstreamStatus,
    UpstreamUnreachable,
    UpstreamInvalid,

    // Request errors
    UnsupportedOs,
    InvalidParams,

    // Rendering
    RenderFailed,

    InternalError,
}

impl ErrorCode {
    pub fn status(&self) -> StatusCode {
        match self {
            ErrorCode::UpstreamStatus => StatusCode::BAD_GATEWAY,
            ErrorCode::UpstreamUnreachable => StatusCode::INTERNAL_SERVER_ERROR,
            ErrorCode::UpstreamInvalid => StatusCode::BAD_GATEWAY,
            ErrorCode::UnsupportedOs => StatusCode::BAD_REQUEST,
            ErrorCode::InvalidParams => StatusCode::BAD_REQUEST,
            ErrorCode::RenderFailed => StatusCode::INTERNAL_SERVER_ERROR,
            ErrorCode::InternalError => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

/// Application error carrying an [`ErrorCode`] and a human-readable detail
#[derive(Debug)]
pub struct AppError {
    pub code: ErrorCode,
    pub message: String,
}

impl AppError {
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }

    /// Create an unsupported OS error
    pub fn unsupported_os(os: &str) -> Self {
        Self::new(ErrorCode::UnsupportedOs, format!("unsupported OS: {}", os))
    }

    /// Create an invalid params error
    pub fn invalid_params(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InvalidParams, message)
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InternalError, message)
    }

    pub fn status(&self) -> StatusCode {
        self.code.status()
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.status().as_u16(), self.message)
    }
}

impl std::error::Error for AppError {}

impl From<FetchError> for AppError {
    fn from(err: FetchError) -> Self {
        let code = match err {
            FetchError::Status(_) => ErrorCode::UpstreamStatus,
            FetchError::Unreachable(_) => ErrorCode::UpstreamUnreachable,
            FetchError::InvalidDocument(_) => ErrorCode::UpstreamInvalid,
        };
        Self::new(code, err.to_string())
    }
}

impl From<CapabilityError> for AppError {
    fn from(err: CapabilityError) -> Self {
        match err {
            CapabilityError::UnsupportedOs(os) => Self::unsupported_os(&os),
            other => Self::new(ErrorCode::RenderFailed, other.to_string()),
        }
    }
}

impl From<RenderError> for AppError {
    fn from(err: RenderError) -> Self {
        match err {
            RenderError::Capability(inner) => inner.into(),
            other => Self::new(ErrorCode::RenderFailed, other.to_string()),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let body = Json(serde_json::json!({ "detail": self.message }));
        (self.status(), body).into_response()
    }
}
