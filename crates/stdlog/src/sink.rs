//! Output sinks accepted by [`Logger`].
//!
//! A logger can write to a raw destination, reuse the sink of another logger,
//! or write through a [`LineEncoder`]. The choice is made once at construction,
//! where the three shapes collapse into a raw or encoded writer shared behind
//! a mutex. The write path never re-dispatches on how the logger was built.

use std::fmt;
use std::io::{self, Write};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use oneliner::LineEncoder;

use crate::Logger;

/// Type-erased raw destination.
pub type BoxedWriter = Box<dyn Write + Send>;

/// Destination handed to [`Logger::from_sink`].
pub enum WritableSink {
    /// Bytes go to the writer as-is, or through a [`LineEncoder`] when the
    /// logger is built with one-line output.
    Raw(BoxedWriter),
    /// Reuse another logger's sink and mutex instead of nesting loggers.
    Chained(Logger),
    /// Writer that already encodes each write as one JSON line.
    Encoded(LineEncoder<BoxedWriter>),
}

impl WritableSink {
    /// Boxes `writer` as a raw sink.
    pub fn raw<W>(writer: W) -> Self
    where
        W: Write + Send + 'static,
    {
        Self::Raw(Box::new(writer))
    }

    /// Wraps `writer` in a [`LineEncoder`].
    pub fn encoded<W>(writer: W) -> Self
    where
        W: Write + Send + 'static,
    {
        let writer: BoxedWriter = Box::new(writer);
        Self::Encoded(oneliner::wrap(writer))
    }

    pub(crate) fn resolve(self, one_line: bool) -> SharedSink {
        match self {
            Self::Raw(writer) if one_line => {
                SharedSink::new(ResolvedSink::Encoded(oneliner::wrap(writer)))
            }
            Self::Raw(writer) => SharedSink::new(ResolvedSink::Raw(writer)),
            Self::Chained(logger) => logger.shared_sink().clone(),
            Self::Encoded(encoder) => SharedSink::new(ResolvedSink::Encoded(encoder)),
        }
    }
}

impl From<Logger> for WritableSink {
    fn from(logger: Logger) -> Self {
        Self::Chained(logger)
    }
}

impl From<&Logger> for WritableSink {
    fn from(logger: &Logger) -> Self {
        Self::Chained(logger.clone())
    }
}

impl From<LineEncoder<BoxedWriter>> for WritableSink {
    fn from(encoder: LineEncoder<BoxedWriter>) -> Self {
        Self::Encoded(encoder)
    }
}

impl fmt::Debug for WritableSink {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Raw(_) => f.write_str("WritableSink::Raw"),
            Self::Chained(logger) => f.debug_tuple("WritableSink::Chained").field(logger).finish(),
            Self::Encoded(_) => f.write_str("WritableSink::Encoded"),
        }
    }
}

/// Sink after construction-time resolution.
pub(crate) enum ResolvedSink {
    Raw(BoxedWriter),
    Encoded(LineEncoder<BoxedWriter>),
}

impl ResolvedSink {
    pub(crate) const fn is_encoded(&self) -> bool {
        matches!(self, Self::Encoded(_))
    }
}

impl Write for ResolvedSink {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        match self {
            Self::Raw(writer) => writer.write(buf),
            Self::Encoded(encoder) => encoder.write(buf),
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        match self {
            Self::Raw(writer) => writer.flush(),
            Self::Encoded(encoder) => encoder.flush(),
        }
    }
}

/// Mutex-guarded sink shared by a logger and every logger chained onto it.
#[derive(Clone)]
pub(crate) struct SharedSink {
    inner: Arc<Mutex<ResolvedSink>>,
}

impl SharedSink {
    fn new(sink: ResolvedSink) -> Self {
        Self {
            inner: Arc::new(Mutex::new(sink)),
        }
    }

    /// Locks the sink, recovering from a writer that panicked mid-write.
    pub(crate) fn lock(&self) -> MutexGuard<'_, ResolvedSink> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub(crate) fn same_as(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }
}
