//! Codecs - convert state values to and from byte payloads.
//!
//! The persistence service never looks inside a payload; it hands values to a
//! `Codec` and stores whatever bytes come back. `JsonCodec` is the default;
//! `BitcodeCodec` trades readability for size.

mod bitcode_codec;
mod json;

use serde::{de::DeserializeOwned, Serialize};
use std::fmt;

pub use bitcode_codec::BitcodeCodec;
pub use json::JsonCodec;

/// Serialization strategy for persisted state.
pub trait Codec: Send + Sync {
    /// Serialize a value into a byte buffer.
    fn encode<T: Serialize>(&self, value: &T) -> Result<Vec<u8>, CodecError>;

    /// Deserialize a value from a byte buffer.
    ///
    /// Returns `Ok(None)` when the buffer decodes to an absent value (an empty
    /// buffer, or a format-level null). Callers decide whether that is an error.
    fn decode<T: DeserializeOwned>(&self, bytes: &[u8]) -> Result<Option<T>, CodecError>;
}

/// Error type for codec operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CodecError {
    /// Serialization failed.
    Encode(String),
    /// Deserialization failed.
    Decode(String),
    /// The payload decoded to nothing.
    Absent,
}

impl fmt::Display for CodecError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CodecError::Encode(msg) => write!(f, "encode error: {}", msg),
            CodecError::Decode(msg) => write!(f, "decode error: {}", msg),
            CodecError::Absent => write!(f, "payload decoded to an absent value"),
        }
    }
}

impl std::error::Error for CodecError {}
