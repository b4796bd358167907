//! # xproto
//!
//! Pure implementation of the MySQL X Protocol data layer: wire scalar
//! values, literal expressions, and collection addressing records.
//!
//! This crate is intentionally IO-agnostic. It contains no networking logic
//! and makes no assumptions about how messages are framed or transported.
//! Higher-level crates build upon this foundation to talk to a server.
//!
//! ## Features
//!
//! - `chrono` (default): date/time variants on [`Value`] via chrono
//! - `uuid` (default): UUID variant on [`Value`]
//! - `decimal` (default): decimal variant on [`Value`] via rust_decimal
//!
//! ## Value flow
//!
//! Application values enter as [`Value`] (a closed union over the native
//! categories), are lowered to the six-variant wire [`Scalar`], and are
//! wrapped as literal [`Expr`] nodes for use inside protocol messages:
//!
//! ```rust
//! use xproto::{Expr, Value};
//!
//! let expr = Expr::try_from(&Value::from(42_i32))?;
//! assert_eq!(expr.as_literal().and_then(|s| s.as_i64()), Some(42));
//! # Ok::<(), xproto::ProtocolError>(())
//! ```

#![warn(missing_docs)]
#![deny(unsafe_code)]

pub mod error;
pub mod expr;
pub mod scalar;
pub mod value;

pub use error::ProtocolError;
pub use expr::{Any, CollectionRef, Expr};
pub use scalar::Scalar;
pub use value::Value;
