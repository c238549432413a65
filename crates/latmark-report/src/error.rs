//! Reporting error types

use thiserror::Error;

/// Errors raised by stream registration and report delivery
#[derive(Debug, Error)]
pub enum ReportError {
    /// A stream with this name already exists
    #[error("stream already registered: {0}")]
    DuplicateStream(String),

    /// Spawning a periodic driver needs at least one periodic stream
    #[error("no stream with a periodic cadence")]
    NoPeriodicStreams,

    /// The report sink failed
    #[error("report sink error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for reporting operations
pub type ReportResult<T> = Result<T, ReportError>;
