//! The printer abstraction and its adapters.
//!
//! [`Printer`] is the narrow shape other code depends on: "print these
//! values as one newline-terminated record, safely from any thread".
//! [`Logger`] implements it, as do [`Discard`], optional printers and
//! [`MaybeLogger`]. [`PrintWriter`] goes the other way and exposes a logger to
//! code that only knows how to write bytes.

use std::borrow::Cow;
use std::fmt::Display;
use std::io::{self, Write};

use crate::Logger;

/// Something that prints values as one newline-terminated record.
///
/// Implementations must be safe to call from multiple threads at once and
/// must not interleave the bytes of concurrent records.
pub trait Printer: Send + Sync {
    /// Prints `values` concatenated without separators, followed by a newline
    /// unless the text already ends with one.
    fn print(&self, values: &[&dyn Display]);
}

impl Printer for Logger {
    fn print(&self, values: &[&dyn Display]) {
        Self::print(self, values);
    }
}

impl<P> Printer for &P
where
    P: Printer + ?Sized,
{
    fn print(&self, values: &[&dyn Display]) {
        (**self).print(values);
    }
}

impl<P> Printer for Box<P>
where
    P: Printer + ?Sized,
{
    fn print(&self, values: &[&dyn Display]) {
        (**self).print(values);
    }
}

/// An absent printer silently discards everything.
impl<P> Printer for Option<P>
where
    P: Printer,
{
    fn print(&self, values: &[&dyn Display]) {
        if let Some(printer) = self {
            printer.print(values);
        }
    }
}

/// Printer that drops every record.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct Discard;

impl Printer for Discard {
    fn print(&self, _values: &[&dyn Display]) {}
}

/// Possibly-unset logger handle that is safe to use either way.
///
/// With no logger, [`print`](Printer::print) does nothing and
/// [`write`](Write::write) reports the whole buffer as written, so call sites
/// holding an optional logger need no checks of their own.
#[derive(Clone, Copy, Debug, Default)]
pub struct MaybeLogger<'a> {
    logger: Option<&'a Logger>,
}

impl<'a> MaybeLogger<'a> {
    /// Wraps an optional logger.
    #[must_use]
    pub const fn new(logger: Option<&'a Logger>) -> Self {
        Self { logger }
    }

    /// A handle with no logger behind it.
    #[must_use]
    pub const fn none() -> Self {
        Self { logger: None }
    }

    /// Returns the wrapped logger, if any.
    #[must_use]
    pub const fn get(self) -> Option<&'a Logger> {
        self.logger
    }
}

impl<'a> From<Option<&'a Logger>> for MaybeLogger<'a> {
    fn from(logger: Option<&'a Logger>) -> Self {
        Self::new(logger)
    }
}

impl<'a> From<&'a Logger> for MaybeLogger<'a> {
    fn from(logger: &'a Logger) -> Self {
        Self::new(Some(logger))
    }
}

impl Printer for MaybeLogger<'_> {
    fn print(&self, values: &[&dyn Display]) {
        if let Some(logger) = self.logger {
            logger.print(values);
        }
    }
}

impl Write for MaybeLogger<'_> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        match self.logger {
            Some(logger) => logger.write(buf),
            None => Ok(buf.len()),
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        match self.logger {
            Some(logger) => logger.flush(),
            None => Ok(()),
        }
    }
}

/// [`io::Write`] adapter returned by [`Logger::as_writer`].
///
/// Each `write` call becomes one [`Logger::print`] of the chunk's text
/// (invalid UTF-8 is replaced with U+FFFD) and always reports the whole chunk
/// as written, mirroring the fire-and-forget nature of `print`.
#[derive(Clone, Copy, Debug)]
pub struct PrintWriter<'a> {
    logger: &'a Logger,
}

impl<'a> PrintWriter<'a> {
    pub(crate) const fn new(logger: &'a Logger) -> Self {
        Self { logger }
    }

    /// The logger records are forwarded to.
    #[must_use]
    pub const fn logger(&self) -> &'a Logger {
        self.logger
    }
}

impl Write for PrintWriter<'_> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let text: Cow<'_, str> = String::from_utf8_lossy(buf);
        self.logger.print(&[&text]);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Prints the given values through a [`Printer`].
///
/// ```
/// use stdlog::{print_to, Logger};
///
/// let logger = Logger::discard();
/// print_to!(logger, "retrying in ", 5, "s");
/// ```
#[macro_export]
macro_rules! print_to {
    ($printer:expr $(, $value:expr)* $(,)?) => {
        $crate::Printer::print(
            &$printer,
            &[$(&$value as &dyn ::std::fmt::Display),*],
        )
    };
}

/// Prints the given values to the global standard output logger.
///
/// ```no_run
/// stdlog::out!("listening on ", 8080);
/// ```
#[macro_export]
macro_rules! out {
    ($($value:expr),* $(,)?) => {
        $crate::print_to!($crate::out() $(, $value)*)
    };
}

/// Prints the given values to the global standard error logger.
///
/// ```no_run
/// stdlog::err!("config missing, using defaults");
/// ```
#[macro_export]
macro_rules! err {
    ($($value:expr),* $(,)?) => {
        $crate::print_to!($crate::err() $(, $value)*)
    };
}
