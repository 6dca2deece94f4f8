//! FileStreamStore - one file per state id under a root directory.

use std::fs::{self, File, OpenOptions};
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};

use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine};

use super::store::{StateStream, StreamMode, StreamStore};

const EXTENSION: &str = "state";

/// Longest encoded run placed in one path component.
const SEGMENT_LEN: usize = 200;

/// Stream over a state file.
#[derive(Debug)]
pub struct FileStream {
    mode: StreamMode,
    file: File,
}

impl Read for FileStream {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        self.file.read(buf)
    }
}

impl Write for FileStream {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.file.write(buf)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.file.flush()
    }
}

impl StateStream for FileStream {
    fn is_readable(&self) -> bool {
        self.mode == StreamMode::Read
    }

    fn is_writable(&self) -> bool {
        self.mode == StreamMode::Write
    }
}

/// Filesystem stream store.
///
/// Each id maps to `<root>/<base64url(id)>.state`, so ids containing path
/// separators or dots cannot escape the root. Encoded names longer than 200
/// bytes are split into nested directories of at most 200 bytes each, which
/// keeps every component under filesystem name limits. Directory segments
/// never contain `.`, so they cannot collide with a `.state` file. Removing a
/// missing id returns the OS `NotFound` error.
#[derive(Clone, Debug)]
pub struct FileStreamStore {
    root: PathBuf,
}

impl FileStreamStore {
    /// Use `root` as the storage directory, creating it if needed.
    pub fn new(root: impl Into<PathBuf>) -> io::Result<Self> {
        let root = root.into();
        fs::create_dir_all(&root)?;
        Ok(FileStreamStore { root })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Path of the file backing `id`.
    pub fn path_for(&self, id: &str) -> PathBuf {
        let encoded = URL_SAFE_NO_PAD.encode(id);
        let mut path = self.root.clone();
        let mut rest = encoded.as_str();
        while rest.len() > SEGMENT_LEN {
            let (segment, tail) = rest.split_at(SEGMENT_LEN);
            path.push(segment);
            rest = tail;
        }
        path.push(format!("{}.{}", rest, EXTENSION));
        path
    }

    /// Drop now-empty segment directories between `path` and the root.
    fn prune_segments(&self, path: &Path) {
        let mut dir = path.parent();
        while let Some(current) = dir {
            if current == self.root.as_path() || fs::remove_dir(current).is_err() {
                break;
            }
            dir = current.parent();
        }
    }
}

impl StreamStore for FileStreamStore {
    type Stream = FileStream;

    fn open_stream(&self, id: &str, mode: StreamMode) -> io::Result<Option<FileStream>> {
        let path = self.path_for(id);
        let file = match mode {
            StreamMode::Read => File::open(&path)?,
            StreamMode::Write => {
                if let Some(parent) = path.parent() {
                    fs::create_dir_all(parent)?;
                }
                OpenOptions::new()
                    .write(true)
                    .create(true)
                    .truncate(true)
                    .open(&path)?
            }
        };
        Ok(Some(FileStream { mode, file }))
    }

    fn release_stream(&self, _id: &str, mut stream: FileStream) -> io::Result<()> {
        if stream.mode == StreamMode::Write {
            stream.file.flush()?;
            stream.file.sync_all()?;
        }
        Ok(())
    }

    fn remove_stream(&self, id: &str) -> io::Result<()> {
        let path = self.path_for(id);
        fs::remove_file(&path)?;
        self.prune_segments(&path);
        Ok(())
    }

    fn contains(&self, id: &str) -> io::Result<bool> {
        self.path_for(id).try_exists()
    }
}
