//! Convenience result type alias for SeatWatch.

use crate::error::AppError;

/// A specialized `Result` type for SeatWatch operations.
pub type AppResult<T> = Result<T, AppError>;
