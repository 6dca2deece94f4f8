//! ScopedStream - scoped acquisition with guaranteed release.

use std::fmt;
use std::io;

use super::store::{StateStream, StreamMode, StreamStore};

/// Failure to acquire or use a scoped stream.
#[derive(Debug)]
pub enum StreamError {
    /// The backend returned no stream, or one that does not support the mode.
    Invalid { mode: StreamMode },
    /// Open, read, write, flush, or release failed.
    Io(io::Error),
}

impl fmt::Display for StreamError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StreamError::Invalid { mode } => {
                write!(f, "backend returned an invalid {} stream", mode)
            }
            StreamError::Io(err) => write!(f, "stream i/o error: {}", err),
        }
    }
}

impl std::error::Error for StreamError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            StreamError::Invalid { .. } => None,
            StreamError::Io(err) => Some(err),
        }
    }
}

impl From<io::Error> for StreamError {
    fn from(err: io::Error) -> Self {
        StreamError::Io(err)
    }
}

/// A stream borrowed from a `StreamStore` for the span of one operation.
///
/// `release` hands the stream back and reports the backend's result. If the
/// guard is dropped first (early return, `?`, panic) the stream is released
/// from `Drop` and a failure there is logged.
pub struct ScopedStream<'a, S: StreamStore + ?Sized> {
    store: &'a S,
    id: &'a str,
    stream: Option<S::Stream>,
}

impl<'a, S: StreamStore + ?Sized> ScopedStream<'a, S> {
    /// Open `id` in `mode` and check the stream supports it.
    ///
    /// A stream that comes back but fails the check is still released.
    pub fn open(store: &'a S, id: &'a str, mode: StreamMode) -> Result<Self, StreamError> {
        let stream = store
            .open_stream(id, mode)?
            .ok_or(StreamError::Invalid { mode })?;

        if !stream.supports(mode) {
            if let Err(err) = store.release_stream(id, stream) {
                log::warn!("failed to release invalid stream for state {}: {}", id, err);
            }
            return Err(StreamError::Invalid { mode });
        }

        Ok(ScopedStream {
            store,
            id,
            stream: Some(stream),
        })
    }

    /// Mutable access to the underlying stream.
    pub fn stream_mut(&mut self) -> &mut S::Stream {
        // Only `release` and `drop` take the stream, and both consume the guard.
        self.stream
            .as_mut()
            .expect("scoped stream is held until release")
    }

    /// Hand the stream back to the store.
    pub fn release(mut self) -> io::Result<()> {
        match self.stream.take() {
            Some(stream) => self.store.release_stream(self.id, stream),
            None => Ok(()),
        }
    }
}

impl<S: StreamStore + ?Sized> Drop for ScopedStream<'_, S> {
    fn drop(&mut self) {
        if let Some(stream) = self.stream.take() {
            if let Err(err) = self.store.release_stream(self.id, stream) {
                log::warn!("failed to release stream for state {}: {}", self.id, err);
            }
        }
    }
}

/// Run `operation` against a scoped stream for `id`, then release it.
///
/// The stream is released exactly once whether `operation` succeeds or fails.
/// A release failure after a successful operation is returned as `Io`.
pub fn with_stream<S, R, F>(
    store: &S,
    id: &str,
    mode: StreamMode,
    operation: F,
) -> Result<R, StreamError>
where
    S: StreamStore + ?Sized,
    F: FnOnce(&mut S::Stream) -> io::Result<R>,
{
    let mut scoped = ScopedStream::open(store, id, mode)?;
    let result = operation(scoped.stream_mut())?;
    scoped.release()?;
    Ok(result)
}
