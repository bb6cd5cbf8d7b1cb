//! Common Utilities
//!
//! Shared error handling and HTTP client construction.

pub mod error;
pub mod http;
pub mod result;

pub use error::{AppError, ErrorCode};
pub use http::create_http_client_with_timeout;
pub use result::AppResult;
