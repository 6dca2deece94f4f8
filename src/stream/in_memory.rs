use std::collections::HashMap;
use std::io::{self, Cursor, Read, Write};
use std::sync::{Arc, RwLock};

use super::store::{StateStream, StreamMode, StreamStore};

/// Stream over an in-memory buffer. Writes stay local until released.
#[derive(Debug)]
pub struct MemoryStream {
    mode: StreamMode,
    cursor: Cursor<Vec<u8>>,
}

impl MemoryStream {
    fn unsupported(&self) -> io::Error {
        io::Error::new(
            io::ErrorKind::Unsupported,
            format!("memory stream opened for {}", self.mode),
        )
    }
}

impl Read for MemoryStream {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        match self.mode {
            StreamMode::Read => self.cursor.read(buf),
            StreamMode::Write => Err(self.unsupported()),
        }
    }
}

impl Write for MemoryStream {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        match self.mode {
            StreamMode::Write => self.cursor.write(buf),
            StreamMode::Read => Err(self.unsupported()),
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl StateStream for MemoryStream {
    fn is_readable(&self) -> bool {
        self.mode == StreamMode::Read
    }

    fn is_writable(&self) -> bool {
        self.mode == StreamMode::Write
    }
}

/// In-memory stream store backed by `Arc<RwLock<HashMap>>`.
///
/// Clone-friendly (cloning shares the same underlying storage). A write
/// stream's bytes replace the stored entry when the stream is released.
/// Removing a missing id is a no-op.
#[derive(Clone)]
pub struct InMemoryStreamStore {
    storage: Arc<RwLock<HashMap<String, Vec<u8>>>>,
}

impl Default for InMemoryStreamStore {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryStreamStore {
    pub fn new() -> Self {
        Self {
            storage: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Number of stored entries.
    pub fn len(&self) -> io::Result<usize> {
        Ok(self.read_storage("len")?.len())
    }

    pub fn is_empty(&self) -> io::Result<bool> {
        Ok(self.len()? == 0)
    }

    /// Stored bytes for `id`, exactly as the last released write left them.
    pub fn get_raw(&self, id: &str) -> io::Result<Option<Vec<u8>>> {
        Ok(self.read_storage("get_raw")?.get(id).cloned())
    }

    /// Replace the stored bytes for `id` without going through a stream.
    pub fn put_raw(&self, id: &str, bytes: Vec<u8>) -> io::Result<()> {
        self.write_storage("put_raw")?.insert(id.to_string(), bytes);
        Ok(())
    }

    fn read_storage(
        &self,
        operation: &'static str,
    ) -> io::Result<std::sync::RwLockReadGuard<'_, HashMap<String, Vec<u8>>>> {
        self.storage.read().map_err(|_| poisoned(operation))
    }

    fn write_storage(
        &self,
        operation: &'static str,
    ) -> io::Result<std::sync::RwLockWriteGuard<'_, HashMap<String, Vec<u8>>>> {
        self.storage.write().map_err(|_| poisoned(operation))
    }
}

fn poisoned(operation: &'static str) -> io::Error {
    io::Error::other(format!("stream store lock poisoned during {}", operation))
}

impl StreamStore for InMemoryStreamStore {
    type Stream = MemoryStream;

    fn open_stream(&self, id: &str, mode: StreamMode) -> io::Result<Option<MemoryStream>> {
        let bytes = match mode {
            StreamMode::Read => self
                .read_storage("open")?
                .get(id)
                .cloned()
                .ok_or_else(|| {
                    io::Error::new(io::ErrorKind::NotFound, format!("no stream for {}", id))
                })?,
            StreamMode::Write => Vec::new(),
        };
        Ok(Some(MemoryStream {
            mode,
            cursor: Cursor::new(bytes),
        }))
    }

    fn release_stream(&self, id: &str, stream: MemoryStream) -> io::Result<()> {
        if stream.mode == StreamMode::Write {
            self.write_storage("release")?
                .insert(id.to_string(), stream.cursor.into_inner());
        }
        Ok(())
    }

    fn remove_stream(&self, id: &str) -> io::Result<()> {
        self.write_storage("remove")?.remove(id);
        Ok(())
    }

    fn contains(&self, id: &str) -> io::Result<bool> {
        Ok(self.read_storage("contains")?.contains_key(id))
    }
}
