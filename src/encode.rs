//! The encoder seam: structured payload in, wire bytes out.
//!
//! An [`Encoder`] is pure and stateless — one value in, one byte vector out,
//! no observable state between calls. One encoder serves the whole pipeline:
//! construct it once, hand it to
//! [`JsonEncoding::new`](crate::middleware::JsonEncoding::new) at composition
//! time, and it is shared (by `Arc`) across every request the layer sees.

use std::fmt;

use serde_json::Value;

/// Converts an in-memory value to its wire representation.
///
/// Implementations must be pure: same value, same bytes, every time. That is
/// what makes responses byte-identical across repeated requests.
pub trait Encoder: Send + Sync {
    fn encode(&self, value: &Value) -> Result<Vec<u8>, EncodeError>;
}

/// The serde_json-backed encoder. Compact output, no trailing newline.
pub struct JsonEncoder;

impl Encoder for JsonEncoder {
    fn encode(&self, value: &Value) -> Result<Vec<u8>, EncodeError> {
        serde_json::to_vec(value).map_err(EncodeError::new)
    }
}

// ── EncodeError ──────────────────────────────────────────────────────────────

/// An encoder failed to serialize a payload.
///
/// Surfaces to the client as a 500; the cause is logged, never sent.
#[derive(Debug)]
pub struct EncodeError(Box<dyn std::error::Error + Send + Sync>);

impl EncodeError {
    pub fn new(source: impl Into<Box<dyn std::error::Error + Send + Sync>>) -> Self {
        Self(source.into())
    }
}

impl fmt::Display for EncodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "encode: {}", self.0)
    }
}

impl std::error::Error for EncodeError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(self.0.as_ref())
    }
}
