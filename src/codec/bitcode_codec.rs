use serde::{de::DeserializeOwned, Serialize};

use super::{Codec, CodecError};

/// Compact binary codec backed by `bitcode`'s serde support.
///
/// Bitcode has no null marker, so only an empty buffer decodes to `None`.
#[derive(Clone, Copy, Debug, Default)]
pub struct BitcodeCodec;

impl BitcodeCodec {
    pub fn new() -> Self {
        BitcodeCodec
    }
}

impl Codec for BitcodeCodec {
    fn encode<T: Serialize>(&self, value: &T) -> Result<Vec<u8>, CodecError> {
        bitcode::serialize(value).map_err(|e| CodecError::Encode(e.to_string()))
    }

    fn decode<T: DeserializeOwned>(&self, bytes: &[u8]) -> Result<Option<T>, CodecError> {
        if bytes.is_empty() {
            return Ok(None);
        }
        bitcode::deserialize(bytes)
            .map(Some)
            .map_err(|e| CodecError::Decode(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::State;

    #[test]
    fn state_survives_bitcode() {
        let state = State::new("grid", vec![(1u8, "a".to_string()), (2, "b".to_string())]);
        let bytes = BitcodeCodec.encode(&state).unwrap();
        let decoded: State<Vec<(u8, String)>> = BitcodeCodec.decode(&bytes).unwrap().unwrap();
        assert_eq!(decoded, state);
    }

    #[test]
    fn empty_buffer_is_absent() {
        assert!(BitcodeCodec.decode::<State<u32>>(&[]).unwrap().is_none());
    }

    #[test]
    fn truncated_buffer_is_a_decode_error() {
        let bytes = BitcodeCodec
            .encode(&State::new("long-identifier", "payload".to_string()))
            .unwrap();
        let err = BitcodeCodec
            .decode::<State<String>>(&bytes[..bytes.len() / 2])
            .unwrap_err();
        assert!(matches!(err, CodecError::Decode(_)));
    }
}
