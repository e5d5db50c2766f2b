use std::any::Any;
use std::fmt;
use std::io::{self, Write};

use crate::sink::{SharedSink, WritableSink};

mod writing;


/// Serialized logger over an arbitrary [`Write`] destination.
///
/// Every record written through [`print`](Self::print) is assembled in a
/// pooled scratch buffer as `prefix`, optional timestamp, then the values, and
/// is terminated by exactly one newline unless it already ends with one. The
/// record reaches the sink in a single `write` call made while holding the
/// logger's mutex, so records from concurrent threads never interleave.
///
/// Cloning a logger is cheap and shares the sink and mutex. Loggers built on
/// top of another logger (see [`chain`](Self::chain)) share them as well.
///
/// # Examples
///
/// ```
/// use stdlog::Logger;
/// # use std::io::Write;
/// # #[derive(Clone, Default)]
/// # struct Shared(std::sync::Arc<std::sync::Mutex<Vec<u8>>>);
/// # impl Write for Shared {
/// #     fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
/// #         self.0.lock().unwrap().extend_from_slice(buf);
/// #         Ok(buf.len())
/// #     }
/// #     fn flush(&mut self) -> std::io::Result<()> { Ok(()) }
/// # }
/// let buffer = Shared::default();
/// let logger = Logger::new(buffer.clone(), "svc: ", false, false);
///
/// logger.print(&[&"answer=", &42]);
/// logger.print(&[&"done\n"]);
///
/// assert_eq!(&*buffer.0.lock().unwrap(), b"svc: answer=42\nsvc: done\n");
/// ```
#[derive(Clone)]
pub struct Logger {
    prefix: String,
    timestamp: bool,
    sink: SharedSink,
}

impl Logger {
    /// Creates a logger writing to `sink`.
    ///
    /// When `sink` is itself a [`Logger`] (or a `&'static Logger`, such as
    /// [`crate::out`]), the new logger reuses that logger's sink and mutex
    /// instead of nesting, and `one_line` is ignored because the inner logger
    /// already fixed its encoding. Otherwise `one_line` wraps the sink in a
    /// [`oneliner::LineEncoder`].
    pub fn new<W>(sink: W, prefix: impl Into<String>, timestamp: bool, one_line: bool) -> Self
    where
        W: Write + Send + 'static,
    {
        Self::from_sink(classify(sink), prefix, timestamp, one_line)
    }

    /// Creates a logger from an explicit [`WritableSink`].
    pub fn from_sink(
        sink: WritableSink,
        prefix: impl Into<String>,
        timestamp: bool,
        one_line: bool,
    ) -> Self {
        Self {
            prefix: prefix.into(),
            timestamp,
            sink: sink.resolve(one_line),
        }
    }

    /// Creates a logger sharing `inner`'s sink with its own prefix and
    /// timestamp setting.
    pub fn chain(inner: &Self, prefix: impl Into<String>, timestamp: bool) -> Self {
        Self::from_sink(WritableSink::from(inner), prefix, timestamp, false)
    }

    /// Creates a logger that discards everything.
    pub fn discard() -> Self {
        Self::new(io::sink(), "", false, false)
    }

    /// Prefix written at the start of every record.
    #[must_use]
    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// Reports whether records carry a timestamp.
    #[must_use]
    pub const fn timestamp_enabled(&self) -> bool {
        self.timestamp
    }

    /// Reports whether writes are encoded as one-line JSON strings.
    #[must_use]
    pub fn is_one_line(&self) -> bool {
        self.sink.lock().is_encoded()
    }

    /// Reports whether both loggers write through the same sink and mutex.
    #[must_use]
    pub fn shares_sink_with(&self, other: &Self) -> bool {
        self.sink.same_as(&other.sink)
    }

    pub(crate) const fn shared_sink(&self) -> &SharedSink {
        &self.sink
    }
}

/// Detects loggers passed as plain writers so they chain instead of nesting.
fn classify<W>(sink: W) -> WritableSink
where
    W: Write + Send + 'static,
{
    let any: &dyn Any = &sink;
    if let Some(logger) = any.downcast_ref::<Logger>() {
        WritableSink::Chained(logger.clone())
    } else if let Some(logger) = any.downcast_ref::<&'static Logger>() {
        WritableSink::Chained((*logger).clone())
    } else {
        WritableSink::raw(sink)
    }
}

impl fmt::Debug for Logger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Logger")
            .field("prefix", &self.prefix)
            .field("timestamp", &self.timestamp)
            .finish_non_exhaustive()
    }
}
