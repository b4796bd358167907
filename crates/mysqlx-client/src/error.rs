//! Client error types.

use thiserror::Error;

/// Errors that can occur while reading a result set.
#[derive(Debug, Error)]
pub enum Error {
    /// Transport-level failure reported by the row source.
    #[error("connection failed: {0}")]
    Connection(String),

    /// IO error from the underlying stream.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Wire-level encoding or decoding failure.
    #[error("protocol error: {0}")]
    Protocol(#[from] xproto::ProtocolError),

    /// Column name lookup miss.
    #[error("column not found '{0}'")]
    ColumnNotFound(String),

    /// Field read attempted with no current row.
    #[error("no row at the current position")]
    OutOfRange,

    /// A row arrived with the wrong number of fields.
    #[error("row has {actual} fields, metadata describes {expected} columns")]
    ColumnCountMismatch {
        /// Column count from the metadata.
        expected: usize,
        /// Field count in the offending row.
        actual: usize,
    },
}

impl Error {
    /// Check if this error signals caller misuse rather than a broken
    /// stream: the caller can recover by checking positions or names
    /// against the metadata first.
    #[must_use]
    pub fn is_usage_error(&self) -> bool {
        matches!(self, Self::OutOfRange | Self::ColumnNotFound(_))
    }
}

/// Result type for client operations.
pub type Result<T> = std::result::Result<T, Error>;
