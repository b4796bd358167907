//! # mysqlx-client
//!
//! Client core for the MySQL X Protocol: an abstract row source and a
//! paged, position-addressable result set over it.
//!
//! Connection establishment, authentication, and message framing live in
//! transport crates; this crate consumes a [`RowSource`] that already
//! yields decoded row payloads and column metadata, and exposes them
//! through [`RowSet`].
//!
//! ## Example
//!
//! ```rust,ignore
//! use mysqlx_client::RowSet;
//!
//! let mut rows = RowSet::new(source)?;
//! while rows.advance()? {
//!     let id = rows.read_field(rows.column_index("id")?)?;
//!     println!("id = {id:?}");
//! }
//! ```
//!
//! Everything here is synchronous and single-owner: a [`RowSet`] mirrors
//! the ordered transport stream beneath it, which cannot be read out of
//! order or in parallel. Callers needing shared access must add their own
//! mutual exclusion.

#![warn(missing_docs)]
#![deny(unsafe_code)]

pub mod error;
pub mod row;
pub mod rowset;
pub mod source;

pub use error::{Error, Result};
pub use row::{ColMetaData, Column, Row};
pub use rowset::{FetchState, RowSet, DEFAULT_PAGE_SIZE};
pub use source::RowSource;
