//! Expression nodes and collection addressing records.
//!
//! Protocol messages carry values either as full expression trees or as
//! bare `Any` leaves (option values, addressing metadata). Only the
//! literal expression kind is produced here; the server also understands
//! column references and function calls, which are built elsewhere.

use crate::error::ProtocolError;
use crate::scalar::Scalar;
use crate::value::Value;

/// A protocol expression node.
///
/// Marked `#[non_exhaustive]`: the protocol defines further expression
/// kinds (identifiers, operators, function calls) that may be added
/// without a breaking change.
#[derive(Debug, Clone, PartialEq)]
#[non_exhaustive]
pub enum Expr {
    /// A literal scalar value.
    Literal(Scalar),
}

impl Expr {
    /// Wrap a scalar in a literal expression. Total, never fails.
    #[must_use]
    pub fn literal(scalar: Scalar) -> Self {
        Self::Literal(scalar)
    }

    /// Build a literal expression holding NULL.
    #[must_use]
    pub fn literal_null() -> Self {
        Self::Literal(Scalar::null())
    }

    /// Get the inner scalar if this is a literal expression.
    #[must_use]
    pub fn as_literal(&self) -> Option<&Scalar> {
        match self {
            Self::Literal(s) => Some(s),
        }
    }
}

/// Build a literal expression from a native value.
///
/// The single entry point for loosely-typed caller input: classification
/// already happened when the caller built the [`Value`], so this is a
/// match over the closed variant set. Unsupported categories fail with
/// [`ProtocolError::UnsupportedValue`] before anything is constructed.
impl TryFrom<&Value> for Expr {
    type Error = ProtocolError;

    fn try_from(value: &Value) -> Result<Self, Self::Error> {
        Scalar::try_from(value).map(Self::Literal)
    }
}

impl From<Scalar> for Expr {
    fn from(scalar: Scalar) -> Self {
        Self::Literal(scalar)
    }
}

/// A message field that carries a bare value rather than an expression.
///
/// Used where the protocol wants addressing metadata or option values,
/// not a full expression tree. `#[non_exhaustive]`: the protocol also
/// defines object and array forms.
#[derive(Debug, Clone, PartialEq)]
#[non_exhaustive]
pub enum Any {
    /// A scalar leaf.
    Scalar(Scalar),
}

impl Any {
    /// Wrap a scalar.
    #[must_use]
    pub fn scalar(scalar: Scalar) -> Self {
        Self::Scalar(scalar)
    }

    /// Get the inner scalar if this is a scalar leaf.
    #[must_use]
    pub fn as_scalar(&self) -> Option<&Scalar> {
        match self {
            Self::Scalar(s) => Some(s),
        }
    }
}

impl From<&str> for Any {
    fn from(v: &str) -> Self {
        Self::Scalar(Scalar::from(v))
    }
}

impl From<bool> for Any {
    fn from(v: bool) -> Self {
        Self::Scalar(Scalar::Bool(v))
    }
}

/// Server-side collection address: schema name plus collection name.
///
/// Both parts are required and non-empty by convention, though the
/// protocol does not enforce it; the server rejects bad names.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CollectionRef {
    /// Schema the collection lives in.
    pub schema: String,
    /// Collection name.
    pub name: String,
}

impl CollectionRef {
    /// Build a collection reference. Pure record construction, total.
    pub fn new(schema: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            schema: schema.into(),
            name: name.into(),
        }
    }
}
