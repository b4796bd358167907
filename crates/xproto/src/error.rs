//! Protocol-level error types.

use thiserror::Error;

/// Errors that can occur while encoding or decoding wire values.
#[derive(Debug, Error)]
pub enum ProtocolError {
    /// A native value has no wire representation.
    #[error("value of type {type_name} is not supported in expressions")]
    UnsupportedValue {
        /// Runtime category of the offending value.
        type_name: &'static str,
    },

    /// Buffer ended before the value was complete.
    #[error("buffer too small: need {needed} bytes, have {available}")]
    BufferTooSmall {
        /// Bytes needed.
        needed: usize,
        /// Bytes available.
        available: usize,
    },

    /// Unknown scalar type tag on the wire.
    #[error("invalid scalar type tag: 0x{0:02X}")]
    InvalidTag(u8),

    /// Boolean payload was neither 0 nor 1.
    #[error("invalid boolean payload: 0x{0:02X}")]
    InvalidBool(u8),

    /// String payload was not valid UTF-8.
    #[error("invalid string encoding: {0}")]
    InvalidUtf8(#[from] std::string::FromUtf8Error),
}
