//! Streams - the storage backend contract.
//!
//! A `StreamStore` hands out one byte stream per state id and takes it back
//! through `release_stream`. `ScopedStream` and `with_stream` pair the two
//! calls so every opened stream is released exactly once.

mod file;
mod in_memory;
mod scoped;
mod store;

pub use file::{FileStream, FileStreamStore};
pub use in_memory::{InMemoryStreamStore, MemoryStream};
pub use scoped::{with_stream, ScopedStream, StreamError};
pub use store::{StateStream, StreamMode, StreamStore};
