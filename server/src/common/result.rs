//! Common Result Type

use super::error::AppError;

/// Application result type
///
/// Uses AppError so every failure maps onto an HTTP status.
pub type AppResult<T> = Result<T, AppError>;
