use std::fmt;
use std::io::{self, Read, Write};
use std::sync::Arc;

/// Direction a stream is opened for.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum StreamMode {
    /// Positioned at the start of the stored bytes, read to completion.
    Read,
    /// Empty and positioned for a full overwrite.
    Write,
}

impl fmt::Display for StreamMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StreamMode::Read => write!(f, "read"),
            StreamMode::Write => write!(f, "write"),
        }
    }
}

/// A byte stream handed out by a `StreamStore` for one state id.
pub trait StateStream: Read + Write {
    fn is_readable(&self) -> bool;

    fn is_writable(&self) -> bool;

    /// Whether this stream can be used in the given mode.
    fn supports(&self, mode: StreamMode) -> bool {
        match mode {
            StreamMode::Read => self.is_readable(),
            StreamMode::Write => self.is_writable(),
        }
    }
}

/// Storage backend contract: one byte stream per state id.
///
/// Every stream returned by `open_stream` is handed back through
/// `release_stream` exactly once. Backends that buffer writes commit them on
/// release. Use `ScopedStream` rather than pairing the calls by hand.
pub trait StreamStore: Send + Sync {
    type Stream: StateStream;

    /// Open the stream for `id`. `Ok(None)` means the backend could not
    /// produce a usable stream.
    fn open_stream(&self, id: &str, mode: StreamMode) -> io::Result<Option<Self::Stream>>;

    /// Release a stream previously returned by `open_stream`.
    fn release_stream(&self, id: &str, stream: Self::Stream) -> io::Result<()>;

    /// Delete any stored data for `id`. Behavior for a missing id is backend-defined.
    fn remove_stream(&self, id: &str) -> io::Result<()>;

    /// Whether data is stored for `id`.
    fn contains(&self, id: &str) -> io::Result<bool>;
}

impl<T: StreamStore + ?Sized> StreamStore for Arc<T> {
    type Stream = T::Stream;

    fn open_stream(&self, id: &str, mode: StreamMode) -> io::Result<Option<Self::Stream>> {
        (**self).open_stream(id, mode)
    }

    fn release_stream(&self, id: &str, stream: Self::Stream) -> io::Result<()> {
        (**self).release_stream(id, stream)
    }

    fn remove_stream(&self, id: &str) -> io::Result<()> {
        (**self).remove_stream(id)
    }

    fn contains(&self, id: &str) -> io::Result<bool> {
        (**self).contains(id)
    }
}
