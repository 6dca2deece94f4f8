//! A StreamStore wrapper that counts stream traffic and injects failures.

use std::io::{self, Read, Write};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Mutex;

use sourced_state::{InMemoryStreamStore, MemoryStream, StateStream, StreamMode, StreamStore};

/// Failure switches. All off by default.
#[derive(Default)]
pub struct Faults {
    pub fail_open: AtomicBool,
    pub null_stream: AtomicBool,
    pub wrong_mode: AtomicBool,
    pub fail_io: AtomicBool,
    pub fail_release: AtomicBool,
    pub fail_remove: AtomicBool,
}

pub struct CountingStream {
    serial: usize,
    inner: MemoryStream,
    fail_io: bool,
    wrong_mode: bool,
}

impl Read for CountingStream {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        if self.fail_io {
            return Err(io::Error::other("injected read failure"));
        }
        self.inner.read(buf)
    }
}

impl Write for CountingStream {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        if self.fail_io {
            return Err(io::Error::other("injected write failure"));
        }
        self.inner.write(buf)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.inner.flush()
    }
}

impl StateStream for CountingStream {
    fn is_readable(&self) -> bool {
        !self.wrong_mode && self.inner.is_readable()
    }

    fn is_writable(&self) -> bool {
        !self.wrong_mode && self.inner.is_writable()
    }
}

#[derive(Default)]
pub struct CountingStore {
    pub inner: InMemoryStreamStore,
    pub faults: Faults,
    opens: AtomicUsize,
    released: Mutex<Vec<usize>>,
    removes: AtomicUsize,
}

impl CountingStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&self, fault: impl Fn(&Faults) -> &AtomicBool, on: bool) {
        fault(&self.faults).store(on, Ordering::SeqCst);
    }

    /// Streams handed out so far.
    pub fn opens(&self) -> usize {
        self.opens.load(Ordering::SeqCst)
    }

    /// Serials of released streams, in release order.
    pub fn released(&self) -> Vec<usize> {
        self.released.lock().unwrap().clone()
    }

    pub fn removes(&self) -> usize {
        self.removes.load(Ordering::SeqCst)
    }

    /// Every opened stream was released exactly once.
    pub fn assert_balanced(&self) {
        let mut released = self.released();
        released.sort_unstable();
        let expected: Vec<usize> = (0..self.opens()).collect();
        assert_eq!(released, expected, "each opened stream must be released once");
    }
}

impl StreamStore for CountingStore {
    type Stream = CountingStream;

    fn open_stream(&self, id: &str, mode: StreamMode) -> io::Result<Option<CountingStream>> {
        if self.faults.fail_open.load(Ordering::SeqCst) {
            return Err(io::Error::other("injected open failure"));
        }
        if self.faults.null_stream.load(Ordering::SeqCst) {
            return Ok(None);
        }
        let Some(inner) = self.inner.open_stream(id, mode)? else {
            return Ok(None);
        };
        let serial = self.opens.fetch_add(1, Ordering::SeqCst);
        Ok(Some(CountingStream {
            serial,
            inner,
            fail_io: self.faults.fail_io.load(Ordering::SeqCst),
            wrong_mode: self.faults.wrong_mode.load(Ordering::SeqCst),
        }))
    }

    fn release_stream(&self, id: &str, stream: CountingStream) -> io::Result<()> {
        self.released.lock().unwrap().push(stream.serial);
        if self.faults.fail_release.load(Ordering::SeqCst) {
            return Err(io::Error::other("injected release failure"));
        }
        self.inner.release_stream(id, stream.inner)
    }

    fn remove_stream(&self, id: &str) -> io::Result<()> {
        self.removes.fetch_add(1, Ordering::SeqCst);
        if self.faults.fail_remove.load(Ordering::SeqCst) {
            return Err(io::Error::other("injected remove failure"));
        }
        self.inner.remove_stream(id)
    }

    fn contains(&self, id: &str) -> io::Result<bool> {
        self.inner.contains(id)
    }
}
