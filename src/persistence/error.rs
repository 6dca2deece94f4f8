use std::fmt;
use std::io;

use crate::codec::CodecError;
use crate::crypto::CryptoError;
use crate::stream::{StreamError, StreamMode};

/// Coarse classification of a `PersistenceError`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    NotFound,
    InvalidStream,
    Io,
    Codec,
    Crypto,
    Configuration,
}

/// Error type for state persistence operations.
///
/// Every variant raised by `save`, `load`, or `remove` carries the state id;
/// wrapped collaborator failures are available through `source()`.
#[derive(Debug)]
pub enum PersistenceError {
    /// No state is stored under `id`.
    NotFound { id: String },
    /// The backend returned no stream, or one that does not support `mode`.
    InvalidStream { id: String, mode: StreamMode },
    /// Backend read, write, flush, release, or remove failed.
    Io { id: String, source: io::Error },
    /// Serialization or deserialization failed.
    Codec { id: String, source: CodecError },
    /// Encryption or decryption failed, or no provider was available.
    Crypto { id: String, source: CryptoError },
    /// A recognized setting had a value that could not be parsed.
    Configuration { key: String, value: String },
}

impl PersistenceError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            PersistenceError::NotFound { .. } => ErrorKind::NotFound,
            PersistenceError::InvalidStream { .. } => ErrorKind::InvalidStream,
            PersistenceError::Io { .. } => ErrorKind::Io,
            PersistenceError::Codec { .. } => ErrorKind::Codec,
            PersistenceError::Crypto { .. } => ErrorKind::Crypto,
            PersistenceError::Configuration { .. } => ErrorKind::Configuration,
        }
    }

    /// The state id the failed operation targeted.
    pub fn id(&self) -> Option<&str> {
        match self {
            PersistenceError::NotFound { id }
            | PersistenceError::InvalidStream { id, .. }
            | PersistenceError::Io { id, .. }
            | PersistenceError::Codec { id, .. }
            | PersistenceError::Crypto { id, .. } => Some(id),
            PersistenceError::Configuration { .. } => None,
        }
    }

    /// Classify a backend I/O error, mapping `NotFound` onto its own kind.
    pub(crate) fn from_io(id: &str, source: io::Error) -> Self {
        if source.kind() == io::ErrorKind::NotFound {
            PersistenceError::NotFound { id: id.to_string() }
        } else {
            PersistenceError::Io {
                id: id.to_string(),
                source,
            }
        }
    }

    pub(crate) fn from_stream(id: &str, err: StreamError) -> Self {
        match err {
            StreamError::Invalid { mode } => PersistenceError::InvalidStream {
                id: id.to_string(),
                mode,
            },
            StreamError::Io(source) => PersistenceError::from_io(id, source),
        }
    }

    pub(crate) fn codec(id: &str, source: CodecError) -> Self {
        PersistenceError::Codec {
            id: id.to_string(),
            source,
        }
    }

    pub(crate) fn crypto(id: &str, source: CryptoError) -> Self {
        PersistenceError::Crypto {
            id: id.to_string(),
            source,
        }
    }
}

impl fmt::Display for PersistenceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PersistenceError::NotFound { id } => write!(f, "state {} does not exist", id),
            PersistenceError::InvalidStream { id, mode } => {
                write!(f, "invalid {} stream for state {}", mode, id)
            }
            PersistenceError::Io { id, source } => {
                write!(f, "i/o error persisting state {}: {}", id, source)
            }
            PersistenceError::Codec { id, source } => {
                write!(f, "codec error for state {}: {}", id, source)
            }
            PersistenceError::Crypto { id, source } => {
                write!(f, "cryptography error for state {}: {}", id, source)
            }
            PersistenceError::Configuration { key, value } => {
                write!(f, "invalid value {:?} for setting {}", value, key)
            }
        }
    }
}

impl std::error::Error for PersistenceError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            PersistenceError::Io { source, .. } => Some(source),
            PersistenceError::Codec { source, .. } => Some(source),
            PersistenceError::Crypto { source, .. } => Some(source),
            PersistenceError::NotFound { .. }
            | PersistenceError::InvalidStream { .. }
            | PersistenceError::Configuration { .. } => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error;

    #[test]
    fn io_not_found_maps_to_not_found_kind() {
        let err = PersistenceError::from_io("s", io::Error::from(io::ErrorKind::NotFound));
        assert_eq!(err.kind(), ErrorKind::NotFound);
        assert_eq!(err.id(), Some("s"));
        assert!(err.source().is_none());
    }

    #[test]
    fn other_io_keeps_cause() {
        let err = PersistenceError::from_io("s", io::Error::other("disk on fire"));
        assert_eq!(err.kind(), ErrorKind::Io);
        assert!(err.source().unwrap().to_string().contains("disk on fire"));
    }

    #[test]
    fn invalid_stream_error_maps_kind() {
        let err = PersistenceError::from_stream(
            "s",
            StreamError::Invalid {
                mode: StreamMode::Write,
            },
        );
        assert_eq!(err.kind(), ErrorKind::InvalidStream);
        assert_eq!(err.to_string(), "invalid write stream for state s");
    }

    #[test]
    fn configuration_error_has_no_id() {
        let err = PersistenceError::Configuration {
            key: "UseCryptography".into(),
            value: "maybe".into(),
        };
        assert_eq!(err.kind(), ErrorKind::Configuration);
        assert!(err.id().is_none());
    }
}
