//! Configuration error types

use thiserror::Error;

/// Errors raised while validating a bucket configuration
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// Fewer display columns than the table can render
    #[error("bucket columns must be at least 2, got {0}")]
    TooFewColumns(usize),

    /// Shift factor outside the usable bit range
    #[error("shift factor must be between 1 and 63, got {0}")]
    ShiftOutOfRange(u32),
}

/// Result type for configuration validation
pub type StatsResult<T> = Result<T, ConfigError>;
