//! Paged, position-addressable result sets.

use std::collections::HashMap;
use std::sync::Arc;

use xproto::Scalar;

use crate::error::{Error, Result};
use crate::row::{ColMetaData, Column, Row};
use crate::source::RowSource;

/// Rows pulled from the source per fetch attempt.
pub const DEFAULT_PAGE_SIZE: usize = 20;

/// Fetch state of a result set.
///
/// Terminal for fetching only: rows buffered before exhaustion stay
/// readable.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchState {
    /// Metadata loaded, nothing fetched yet.
    Initialized,
    /// At least one page fetch has run; more rows may remain.
    Paging,
    /// The source reported end of stream; no further fetches happen.
    Exhausted,
}

/// A forward-only, position-addressable view over a row stream.
///
/// Rows are materialized lazily, one page at a time, as the caller
/// advances past the buffered window; buffered rows are never dropped or
/// reordered, so any already-visited position stays addressable. The set
/// holds private mutable state and is built for single-owner sequential
/// consumption, mirroring the ordered transport stream beneath it.
pub struct RowSet<S: RowSource> {
    source: S,
    rows: Vec<Row>,
    metadata: Arc<ColMetaData>,
    /// Lowercased name → index, built once at construction. First
    /// occurrence wins for duplicate labels.
    name_map: HashMap<String, usize>,
    /// `None` before the first row; `Some(rows.len())` once the caller
    /// has run past the end ("ran out").
    position: Option<usize>,
    page_size: usize,
    state: FetchState,
}

impl<S: RowSource> RowSet<S> {
    /// Create a result set over a source, loading column metadata.
    ///
    /// Metadata is loaded exactly once, here, and never reloaded.
    pub fn new(mut source: S) -> Result<Self> {
        let columns = source.load_column_metadata()?;
        let mut name_map = HashMap::with_capacity(columns.len());
        for (index, column) in columns.iter().enumerate() {
            name_map.entry(column.name.to_ascii_lowercase()).or_insert(index);
        }
        Ok(Self {
            source,
            rows: Vec::new(),
            metadata: Arc::new(ColMetaData::new(columns)),
            name_map,
            position: None,
            page_size: DEFAULT_PAGE_SIZE,
            state: FetchState::Initialized,
        })
    }

    /// Override the page size. A page size of zero is clamped to one so
    /// a fetch attempt always makes progress.
    #[must_use]
    pub fn with_page_size(mut self, page_size: usize) -> Self {
        self.page_size = page_size.max(1);
        self
    }

    /// Move to the next row, fetching a page from the source when the
    /// buffer runs out.
    ///
    /// Returns `true` when a row exists at the new position. Once it
    /// returns `false` the stream is drained and every further call also
    /// returns `false`; the position pins at the ran-out value, where
    /// [`read_field`](Self::read_field) reports [`Error::OutOfRange`].
    ///
    /// # Errors
    ///
    /// Source and decode failures propagate unchanged; the set does not
    /// retry, and after a mid-page failure it should be discarded.
    pub fn advance(&mut self) -> Result<bool> {
        let next = match self.position {
            None => 0,
            // Already ran out; never step past the buffer.
            Some(p) if p >= self.rows.len() => p,
            Some(p) => p + 1,
        };
        if next == self.rows.len() && self.state != FetchState::Exhausted {
            self.page_in_rows()?;
        }
        self.position = Some(next);
        Ok(next < self.rows.len())
    }

    /// Read the field at `index` in the current row.
    ///
    /// Never triggers a fetch; paging is driven solely by
    /// [`advance`](Self::advance).
    ///
    /// # Errors
    ///
    /// [`Error::OutOfRange`] when there is no current row (before the
    /// first [`advance`](Self::advance), or after it returned `false`)
    /// or when `index` is outside the row.
    pub fn read_field(&self, index: usize) -> Result<&Scalar> {
        self.current_row()
            .and_then(|row| row.get(index))
            .ok_or(Error::OutOfRange)
    }

    /// Look up a column index by name, ignoring ASCII case.
    ///
    /// # Errors
    ///
    /// [`Error::ColumnNotFound`] carrying the lookup key on a miss.
    pub fn column_index(&self, name: &str) -> Result<usize> {
        self.name_map
            .get(&name.to_ascii_lowercase())
            .copied()
            .ok_or_else(|| Error::ColumnNotFound(name.to_owned()))
    }

    /// Materialize every remaining row, then restore the position to its
    /// value from before the call (before-first restores to 0).
    ///
    /// Useful to take the rest of the result off the stream while keeping
    /// the set alive for inspection.
    pub fn drain_all(&mut self) -> Result<()> {
        let saved = self.position;
        while self.advance()? {}
        self.position = Some(saved.unwrap_or(0));
        Ok(())
    }

    /// Read and discard the source's remaining rows without buffering
    /// them, leaving the set exhausted. No-op when already exhausted.
    pub fn discard_remaining(&mut self) -> Result<()> {
        if self.state == FetchState::Exhausted {
            return Ok(());
        }
        let mut dropped = 0_usize;
        while self.source.read_next_row()?.is_some() {
            dropped += 1;
        }
        self.state = FetchState::Exhausted;
        tracing::debug!(dropped, buffered = self.rows.len(), "discarded remaining rows");
        Ok(())
    }

    /// Get the column metadata, in result order.
    #[must_use]
    pub fn columns(&self) -> &[Column] {
        &self.metadata.columns
    }

    /// Get the shared column metadata.
    #[must_use]
    pub fn metadata(&self) -> &Arc<ColMetaData> {
        &self.metadata
    }

    /// Get the row at the current position, if one exists.
    #[must_use]
    pub fn current_row(&self) -> Option<&Row> {
        self.rows.get(self.position?)
    }

    /// Number of rows materialized so far. Non-decreasing.
    #[must_use]
    pub fn buffered_len(&self) -> usize {
        self.rows.len()
    }

    /// Current logical position. `None` means before the first row.
    #[must_use]
    pub fn position(&self) -> Option<usize> {
        self.position
    }

    /// The configured page size.
    #[must_use]
    pub fn page_size(&self) -> usize {
        self.page_size
    }

    /// Current fetch state.
    #[must_use]
    pub fn state(&self) -> FetchState {
        self.state
    }

    /// Check whether the source has reported end of stream.
    #[must_use]
    pub fn is_exhausted(&self) -> bool {
        self.state == FetchState::Exhausted
    }

    /// Pull up to one page of rows off the source.
    fn page_in_rows(&mut self) -> Result<()> {
        self.state = FetchState::Paging;
        tracing::trace!(
            buffered = self.rows.len(),
            page_size = self.page_size,
            "paging in rows"
        );
        for _ in 0..self.page_size {
            if !self.read_row()? {
                break;
            }
        }
        Ok(())
    }

    /// Read, decode, and buffer one row. Returns `false` at end of
    /// stream, flipping the state to `Exhausted`.
    fn read_row(&mut self) -> Result<bool> {
        let Some(fields) = self.source.read_next_row()? else {
            self.state = FetchState::Exhausted;
            tracing::debug!(buffered = self.rows.len(), "row source exhausted");
            return Ok(false);
        };
        if fields.len() != self.metadata.len() {
            return Err(Error::ColumnCountMismatch {
                expected: self.metadata.len(),
                actual: fields.len(),
            });
        }
        let decoded = fields
            .into_iter()
            .map(|mut payload| Scalar::decode(&mut payload))
            .collect::<std::result::Result<Vec<_>, _>>()?;
        self.rows.push(Row::new(decoded, Arc::clone(&self.metadata)));
        Ok(true)
    }
}

impl<S: RowSource> std::fmt::Debug for RowSet<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RowSet")
            .field("columns", &self.metadata.len())
            .field("buffered", &self.rows.len())
            .field("position", &self.position)
            .field("state", &self.state)
            .finish()
    }
}
