//! Error types for quotetag-core.

use thiserror::Error;

/// Core error types.
#[derive(Debug, Error)]
pub enum CoreError {
    #[error("Invalid date (expected YYYY-MM-DD): {0}")]
    InvalidDate(String),

    #[error("Invalid timestamp (expected YYYY-MM-DDTHH:MM:SS[.ffffff]): {0}")]
    InvalidTimestamp(String),

    #[error("Invalid decimal: {0}")]
    InvalidDecimal(String),

    #[error("Invalid order side (expected buy or sell): {0}")]
    InvalidOrderSide(String),
}

/// Result type alias for core operations.
pub type CoreResult<T> = std::result::Result<T, CoreError>;
