//! The seam between the transport layer and result sets.

use bytes::Bytes;

use crate::error::Result;
use crate::row::Column;

/// A source of decoded rows for one active result.
///
/// Implemented by the transport layer over its ordered byte channel.
/// Both operations block until the underlying stream has the requested
/// data; timeout and retry policy belong to the implementor, not to the
/// result set consuming it.
pub trait RowSource {
    /// Read the next row as its raw per-field payloads, each one a
    /// wire-encoded scalar. Returns `None` at end of stream.
    fn read_next_row(&mut self) -> Result<Option<Vec<Bytes>>>;

    /// Load the column list for the active result.
    ///
    /// Called exactly once, before any row is read.
    fn load_column_metadata(&mut self) -> Result<Vec<Column>>;
}
