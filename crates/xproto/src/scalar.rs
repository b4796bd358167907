//! Wire scalar values and their tagged binary codec.
//!
//! A [`Scalar`] is the protocol's primitive value: exactly one of null,
//! boolean, signed 64-bit integer, 64-bit double, UTF-8 string, or opaque
//! octets. Narrower native widths never appear on the wire; the lowering
//! from [`Value`] widens integers to 64-bit signed and floats to double.

use bytes::{Buf, BufMut, Bytes, BytesMut};

use crate::error::ProtocolError;
use crate::value::Value;

/// Wire type tag for a signed integer scalar.
const TAG_SINT: u8 = 0x01;
/// Wire type tag for a null scalar.
const TAG_NULL: u8 = 0x03;
/// Wire type tag for an opaque octets scalar.
const TAG_OCTETS: u8 = 0x04;
/// Wire type tag for a double scalar.
const TAG_DOUBLE: u8 = 0x05;
/// Wire type tag for a boolean scalar.
const TAG_BOOL: u8 = 0x07;
/// Wire type tag for a string scalar.
const TAG_STRING: u8 = 0x08;

/// A scalar value as it appears on the wire.
///
/// The tag is explicit and round-trips through [`encode`](Scalar::encode) /
/// [`decode`](Scalar::decode) unchanged. Scalars are immutable once built.
#[derive(Debug, Clone, PartialEq)]
pub enum Scalar {
    /// NULL.
    Null,
    /// Boolean.
    Bool(bool),
    /// Signed 64-bit integer.
    Sint(i64),
    /// 64-bit floating point.
    Double(f64),
    /// UTF-8 string.
    String(String),
    /// Opaque byte sequence.
    Octets(Bytes),
}

impl Scalar {
    /// Build a NULL scalar.
    #[must_use]
    pub fn null() -> Self {
        Self::Null
    }

    /// Get the wire type tag for this scalar.
    #[must_use]
    pub fn tag(&self) -> u8 {
        match self {
            Self::Null => TAG_NULL,
            Self::Bool(_) => TAG_BOOL,
            Self::Sint(_) => TAG_SINT,
            Self::Double(_) => TAG_DOUBLE,
            Self::String(_) => TAG_STRING,
            Self::Octets(_) => TAG_OCTETS,
        }
    }

    /// Get the type name as a string.
    #[must_use]
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::Null => "V_NULL",
            Self::Bool(_) => "V_BOOL",
            Self::Sint(_) => "V_SINT",
            Self::Double(_) => "V_DOUBLE",
            Self::String(_) => "V_STRING",
            Self::Octets(_) => "V_OCTETS",
        }
    }

    /// Check if the scalar is NULL.
    #[must_use]
    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Get the scalar as a bool, if it is one.
    #[must_use]
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(v) => Some(*v),
            _ => None,
        }
    }

    /// Get the scalar as an i64, if it is one.
    #[must_use]
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Self::Sint(v) => Some(*v),
            _ => None,
        }
    }

    /// Get the scalar as an f64, if it is one.
    #[must_use]
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Double(v) => Some(*v),
            _ => None,
        }
    }

    /// Get the scalar as a string slice, if it is one.
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(v) => Some(v),
            _ => None,
        }
    }

    /// Get the scalar as bytes, if it is an octets value.
    #[must_use]
    pub fn as_octets(&self) -> Option<&[u8]> {
        match self {
            Self::Octets(v) => Some(v),
            _ => None,
        }
    }

    /// Encode this scalar into the buffer: one tag byte, then the payload.
    ///
    /// Integers and doubles are fixed-width little-endian; strings and
    /// octets carry a u32-LE length prefix. NULL is the tag alone.
    pub fn encode(&self, buf: &mut BytesMut) {
        buf.put_u8(self.tag());
        match self {
            Self::Null => {}
            Self::Bool(v) => buf.put_u8(u8::from(*v)),
            Self::Sint(v) => buf.put_i64_le(*v),
            Self::Double(v) => buf.put_f64_le(*v),
            Self::String(s) => {
                buf.put_u32_le(s.len() as u32);
                buf.put_slice(s.as_bytes());
            }
            Self::Octets(b) => {
                buf.put_u32_le(b.len() as u32);
                buf.put_slice(b);
            }
        }
    }

    /// Encode this scalar into a freshly allocated buffer.
    #[must_use]
    pub fn encode_to_bytes(&self) -> Bytes {
        let mut buf = BytesMut::new();
        self.encode(&mut buf);
        buf.freeze()
    }

    /// Decode one scalar from the front of the buffer.
    ///
    /// Consumes exactly the encoded length on success. Fails without
    /// consuming a defined amount on a short or malformed buffer, so the
    /// buffer should be discarded after an error.
    pub fn decode(buf: &mut Bytes) -> Result<Self, ProtocolError> {
        let tag = take_u8(buf)?;
        match tag {
            TAG_NULL => Ok(Self::Null),
            TAG_BOOL => match take_u8(buf)? {
                0 => Ok(Self::Bool(false)),
                1 => Ok(Self::Bool(true)),
                other => Err(ProtocolError::InvalidBool(other)),
            },
            TAG_SINT => {
                check_remaining(buf, 8)?;
                Ok(Self::Sint(buf.get_i64_le()))
            }
            TAG_DOUBLE => {
                check_remaining(buf, 8)?;
                Ok(Self::Double(buf.get_f64_le()))
            }
            TAG_STRING => {
                let payload = take_prefixed(buf)?;
                Ok(Self::String(String::from_utf8(payload.to_vec())?))
            }
            TAG_OCTETS => Ok(Self::Octets(take_prefixed(buf)?)),
            other => Err(ProtocolError::InvalidTag(other)),
        }
    }
}

fn check_remaining(buf: &Bytes, needed: usize) -> Result<(), ProtocolError> {
    if buf.remaining() < needed {
        return Err(ProtocolError::BufferTooSmall {
            needed,
            available: buf.remaining(),
        });
    }
    Ok(())
}

fn take_u8(buf: &mut Bytes) -> Result<u8, ProtocolError> {
    check_remaining(buf, 1)?;
    Ok(buf.get_u8())
}

fn take_prefixed(buf: &mut Bytes) -> Result<Bytes, ProtocolError> {
    check_remaining(buf, 4)?;
    let len = buf.get_u32_le() as usize;
    check_remaining(buf, len)?;
    Ok(buf.split_to(len))
}

impl From<bool> for Scalar {
    fn from(v: bool) -> Self {
        Self::Bool(v)
    }
}

impl From<i64> for Scalar {
    fn from(v: i64) -> Self {
        Self::Sint(v)
    }
}

impl From<f64> for Scalar {
    fn from(v: f64) -> Self {
        Self::Double(v)
    }
}

impl From<&str> for Scalar {
    fn from(v: &str) -> Self {
        Self::String(v.to_owned())
    }
}

impl From<String> for Scalar {
    fn from(v: String) -> Self {
        Self::String(v)
    }
}

impl From<Bytes> for Scalar {
    fn from(v: Bytes) -> Self {
        Self::Octets(v)
    }
}

impl From<&[u8]> for Scalar {
    fn from(v: &[u8]) -> Self {
        Self::Octets(Bytes::copy_from_slice(v))
    }
}

/// Lower a native value to its wire scalar.
///
/// All integral widths widen to `Sint`, both float widths to `Double`;
/// the wire format has no narrower tags. Categories outside the
/// expression-supported set fail with
/// [`ProtocolError::UnsupportedValue`] and construct nothing. Note that
/// octets are deliberately outside that set here: binary payloads are
/// built as scalars directly (`Scalar::from`), never lowered from a
/// loosely-typed value.
impl TryFrom<&Value> for Scalar {
    type Error = ProtocolError;

    fn try_from(value: &Value) -> Result<Self, Self::Error> {
        match value {
            Value::Null => Ok(Self::Null),
            Value::Bool(v) => Ok(Self::Bool(*v)),
            Value::TinyInt(v) => Ok(Self::Sint(i64::from(*v))),
            Value::SmallInt(v) => Ok(Self::Sint(i64::from(*v))),
            Value::Int(v) => Ok(Self::Sint(i64::from(*v))),
            Value::BigInt(v) => Ok(Self::Sint(*v)),
            Value::Float(v) => Ok(Self::Double(f64::from(*v))),
            Value::Double(v) => Ok(Self::Double(*v)),
            Value::String(v) => Ok(Self::String(v.clone())),
            other => Err(ProtocolError::UnsupportedValue {
                type_name: other.type_name(),
            }),
        }
    }
}
