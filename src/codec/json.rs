use serde::{de::DeserializeOwned, Serialize};

use super::{Codec, CodecError};

/// Compact JSON codec backed by `serde_json`.
///
/// A stored literal `null` (or an empty buffer) decodes to `None`.
#[derive(Clone, Copy, Debug, Default)]
pub struct JsonCodec;

impl JsonCodec {
    pub fn new() -> Self {
        JsonCodec
    }
}

impl Codec for JsonCodec {
    fn encode<T: Serialize>(&self, value: &T) -> Result<Vec<u8>, CodecError> {
        serde_json::to_vec(value).map_err(|e| CodecError::Encode(e.to_string()))
    }

    fn decode<T: DeserializeOwned>(&self, bytes: &[u8]) -> Result<Option<T>, CodecError> {
        if bytes.is_empty() {
            return Ok(None);
        }
        serde_json::from_slice::<Option<T>>(bytes).map_err(|e| CodecError::Decode(e.to_string()))
    }
}
