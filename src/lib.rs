mod codec;
mod crypto;
mod persistence;
mod state;
mod stream;

pub use codec::{BitcodeCodec, Codec, CodecError, JsonCodec};
#[cfg(feature = "aes")]
pub use crypto::AesGcmProvider;
pub use crypto::{CryptoError, CryptographyProvider};
pub use persistence::{
    ErrorKind, PersistenceConfig, PersistenceError, StatePersistenceService, USE_CRYPTOGRAPHY,
};
pub use state::State;
pub use stream::{
    with_stream, FileStream, FileStreamStore, InMemoryStreamStore, MemoryStream, ScopedStream,
    StateStream, StreamError, StreamMode, StreamStore,
};
