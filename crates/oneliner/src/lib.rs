#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

//! crates/oneliner/src/lib.rs
//!
//! # Overview
//!
//! `oneliner` provides [`LineEncoder`], an [`std::io::Write`] adapter that
//! turns every write into exactly one line holding a JSON string literal.
//! Multi-line payloads (stack traces, pretty-printed values) therefore stay on
//! a single physical line, which keeps line-oriented log collectors happy.
//!
//! # Design
//!
//! Each call to [`Write::write`] decodes the payload as UTF-8 (invalid
//! sequences become U+FFFD), encodes it with `serde_json`, appends `\n` and
//! forwards the whole record to the inner writer with a single `write_all`.
//! The encoder owns a scratch buffer that is reused across writes.
//!
//! # Invariants
//!
//! - One `write` call produces one record; payload bytes are never split.
//! - A successful `write` reports the full payload length as consumed.
//!
//! # Errors
//!
//! Errors from the inner writer are returned unchanged.
//!
//! # Examples
//!
//! ```
//! use std::io::Write;
//!
//! let mut encoder = oneliner::wrap(Vec::new());
//! encoder.write_all(b"first\nsecond\n")?;
//!
//! assert_eq!(encoder.into_inner(), b"\"first\\nsecond\\n\"\n".to_vec());
//! # Ok::<(), std::io::Error>(())
//! ```

use std::fmt;
use std::io::{self, Write};

/// Initial capacity of the per-encoder scratch buffer.
const SCRATCH_CAPACITY: usize = 128;

/// Writer adapter that encodes each write as a single-line JSON string.
pub struct LineEncoder<W> {
    inner: W,
    scratch: Vec<u8>,
}

impl<W> LineEncoder<W> {
    /// Wraps `inner` so every subsequent write is encoded as one JSON line.
    #[must_use]
    pub fn new(inner: W) -> Self {
        Self {
            inner,
            scratch: Vec::with_capacity(SCRATCH_CAPACITY),
        }
    }

    /// Returns a reference to the wrapped writer.
    #[must_use]
    pub const fn get_ref(&self) -> &W {
        &self.inner
    }

    /// Returns a mutable reference to the wrapped writer.
    ///
    /// Writing directly to the inner writer bypasses the encoding.
    pub fn get_mut(&mut self) -> &mut W {
        &mut self.inner
    }

    /// Consumes the encoder and returns the wrapped writer.
    #[must_use]
    pub fn into_inner(self) -> W {
        self.inner
    }

    fn encode(&mut self, payload: &[u8]) -> io::Result<()> {
        self.scratch.clear();
        let text = String::from_utf8_lossy(payload);
        serde_json::to_writer(&mut self.scratch, text.as_ref())?;
        self.scratch.push(b'\n');
        Ok(())
    }
}

/// Shorthand for [`LineEncoder::new`].
#[must_use]
pub fn wrap<W>(inner: W) -> LineEncoder<W> {
    LineEncoder::new(inner)
}

impl<W> Write for LineEncoder<W>
where
    W: Write,
{
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.encode(buf)?;
        self.inner.write_all(&self.scratch)?;
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        self.inner.flush()
    }
}

impl<W> fmt::Debug for LineEncoder<W>
where
    W: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LineEncoder")
            .field("inner", &self.inner)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_support::{FailingWriter, ShortWriter};

    fn encode(payload: &[u8]) -> String {
        let mut encoder = wrap(Vec::new());
        let written = encoder.write(payload).unwrap();
        assert_eq!(written, payload.len());
        String::from_utf8(encoder.into_inner()).unwrap()
    }

    #[test]
    fn encodes_trailing_newline_inside_string() {
        assert_eq!(encode(b"test\n"), "\"test\\n\"\n");
    }

    #[test]
    fn encodes_payload_without_newline() {
        assert_eq!(encode(b"test"), "\"test\"\n");
    }

    #[test]
    fn escapes_quotes_and_backslashes() {
        assert_eq!(encode(br#"say "hi" \o/"#), "\"say \\\"hi\\\" \\\\o/\"\n");
    }

    #[test]
    fn escapes_control_characters() {
        assert_eq!(encode(b"a\tb\rc\x01"), "\"a\\tb\\rc\\u0001\"\n");
    }

    #[test]
    fn keeps_non_ascii_text() {
        assert_eq!(encode("héllo ✓".as_bytes()), "\"héllo ✓\"\n");
    }

    #[test]
    fn replaces_invalid_utf8() {
        assert_eq!(encode(b"ok\xffok"), "\"ok\u{fffd}ok\"\n");
    }

    #[test]
    fn empty_payload_is_empty_string_line() {
        assert_eq!(encode(b""), "\"\"\n");
    }

    #[test]
    fn each_write_is_one_line() {
        let mut encoder = wrap(Vec::new());
        encoder.write_all(b"one\ntwo\n").unwrap();
        encoder.write_all(b"three").unwrap();
        let output = String::from_utf8(encoder.into_inner()).unwrap();
        assert_eq!(output.lines().count(), 2);
        assert_eq!(output, "\"one\\ntwo\\n\"\n\"three\"\n");
    }

    #[test]
    fn inner_error_propagates() {
        let mut encoder = wrap(FailingWriter::broken_pipe());
        let err = encoder.write(b"lost").unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::BrokenPipe);
    }

    #[test]
    fn short_inner_writes_are_completed() {
        let mut encoder = wrap(ShortWriter::new(3));
        encoder.write_all(b"chunked").unwrap();
        assert_eq!(encoder.get_ref().contents(), b"\"chunked\"\n");
    }

    #[test]
    fn flush_forwards_to_inner() {
        let mut encoder = wrap(Vec::new());
        assert!(encoder.flush().is_ok());
    }
}
