#![deny(unsafe_code)]
#![deny(missing_docs)]

//! crates/test-support/src/lib.rs
//!
//! Writers and guards shared by the workspace's unit and integration tests.

use std::env;
use std::ffi::{OsStr, OsString};
use std::io::{self, Write};
use std::sync::{Arc, Mutex, MutexGuard, OnceLock, PoisonError};

/// Cloneable in-memory sink; every clone appends to the same buffer.
///
/// Loggers take ownership of their sink, so tests keep a clone around to
/// inspect what was written.
#[derive(Clone, Debug, Default)]
pub struct SharedBuffer {
    bytes: Arc<Mutex<Vec<u8>>>,
}

impl SharedBuffer {
    /// Creates an empty buffer.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a copy of everything written so far.
    #[must_use]
    pub fn contents(&self) -> Vec<u8> {
        self.lock().clone()
    }

    /// Returns the written bytes as UTF-8, panicking on invalid data.
    #[must_use]
    pub fn text(&self) -> String {
        String::from_utf8(self.contents()).expect("shared buffer holds UTF-8")
    }

    /// Number of bytes written so far.
    #[must_use]
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    /// Reports whether nothing has been written yet.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn lock(&self) -> MutexGuard<'_, Vec<u8>> {
        self.bytes.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Write for SharedBuffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.lock().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Writer that rejects every write with a fixed error kind.
#[derive(Clone, Copy, Debug)]
pub struct FailingWriter {
    kind: io::ErrorKind,
}

impl FailingWriter {
    /// Creates a writer failing with `kind`.
    #[must_use]
    pub const fn new(kind: io::ErrorKind) -> Self {
        Self { kind }
    }

    /// Creates a writer that behaves like a closed pipe.
    #[must_use]
    pub const fn broken_pipe() -> Self {
        Self::new(io::ErrorKind::BrokenPipe)
    }
}

impl Write for FailingWriter {
    fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
        Err(io::Error::new(self.kind, "write rejected by FailingWriter"))
    }

    fn flush(&mut self) -> io::Result<()> {
        Err(io::Error::new(self.kind, "flush rejected by FailingWriter"))
    }
}

/// Writer that accepts at most `limit` bytes per call.
#[derive(Clone, Debug)]
pub struct ShortWriter {
    limit: usize,
    bytes: Vec<u8>,
}

impl ShortWriter {
    /// Creates a writer that consumes at most `limit` bytes per write.
    #[must_use]
    pub const fn new(limit: usize) -> Self {
        Self {
            limit,
            bytes: Vec::new(),
        }
    }

    /// Returns everything accepted so far.
    #[must_use]
    pub fn contents(&self) -> &[u8] {
        &self.bytes
    }
}

impl Write for ShortWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let accepted = buf.len().min(self.limit);
        self.bytes.extend_from_slice(&buf[..accepted]);
        Ok(accepted)
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Restores an environment variable to its previous state on drop.
///
/// Hold [`env_lock`] for as long as the guard lives; the process environment
/// is shared by every test thread.
#[derive(Debug)]
pub struct EnvGuard {
    key: &'static str,
    previous: Option<OsString>,
}

impl EnvGuard {
    /// Sets `key` to `value`.
    pub fn set(key: &'static str, value: impl AsRef<OsStr>) -> Self {
        let previous = env::var_os(key);
        #[allow(unsafe_code)]
        unsafe {
            env::set_var(key, value);
        }
        Self { key, previous }
    }

    /// Removes `key` from the environment.
    pub fn remove(key: &'static str) -> Self {
        let previous = env::var_os(key);
        #[allow(unsafe_code)]
        unsafe {
            env::remove_var(key);
        }
        Self { key, previous }
    }
}

impl Drop for EnvGuard {
    fn drop(&mut self) {
        if let Some(previous) = self.previous.take() {
            #[allow(unsafe_code)]
            unsafe {
                env::set_var(self.key, previous);
            }
        } else {
            #[allow(unsafe_code)]
            unsafe {
                env::remove_var(self.key);
            }
        }
    }
}

/// Process-wide lock serializing tests that touch the environment.
pub fn env_lock() -> MutexGuard<'static, ()> {
    static LOCK: OnceLock<Mutex<()>> = OnceLock::new();
    LOCK.get_or_init(|| Mutex::new(()))
        .lock()
        .unwrap_or_else(PoisonError::into_inner)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shared_buffer_clones_share_storage() {
        let buffer = SharedBuffer::new();
        let mut writer = buffer.clone();
        writer.write_all(b"abc").unwrap();
        assert_eq!(buffer.contents(), b"abc");
        assert_eq!(buffer.len(), 3);
    }

    #[test]
    fn failing_writer_reports_kind() {
        let mut writer = FailingWriter::broken_pipe();
        let err = writer.write(b"x").unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::BrokenPipe);
    }

    #[test]
    fn short_writer_caps_each_call() {
        let mut writer = ShortWriter::new(2);
        assert_eq!(writer.write(b"abcd").unwrap(), 2);
        assert_eq!(writer.contents(), b"ab");
    }

    #[test]
    fn env_guard_restores_absent_variable() {
        const KEY: &str = "STDLOG_TEST_SUPPORT_GUARD";
        let _lock = env_lock();
        {
            let _guard = EnvGuard::set(KEY, "1");
            assert_eq!(env::var(KEY).unwrap(), "1");
        }
        assert!(env::var_os(KEY).is_none());
    }
}
