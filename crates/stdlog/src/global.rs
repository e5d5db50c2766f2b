//! Process-wide standard output and standard error loggers.
//!
//! Each slot is initialized exactly once, either lazily by the first call to
//! [`out`] / [`err`] or explicitly through [`set_out`] / [`set_err`], and is
//! immutable afterwards. An override that arrives after the slot has been
//! materialized is rejected with [`AlreadySetError`] rather than replacing a
//! logger other threads may already hold.

use std::fmt;
use std::io;
use std::sync::OnceLock;

use thiserror::Error;

use crate::Logger;
use crate::config::Defaults;

static OUT: OnceLock<Logger> = OnceLock::new();
static ERR: OnceLock<Logger> = OnceLock::new();

/// Identifies one of the global logger slots.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Stream {
    /// The logger bound to standard output.
    Out,
    /// The logger bound to standard error.
    Err,
}

impl fmt::Display for Stream {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Out => f.write_str("stdout"),
            Self::Err => f.write_str("stderr"),
        }
    }
}

/// Returned when a global logger is overridden after it was materialized.
#[derive(Debug, Error)]
#[error("global {stream} logger is already set")]
pub struct AlreadySetError {
    stream: Stream,
    rejected: Logger,
}

impl AlreadySetError {
    /// The slot that was already initialized.
    #[must_use]
    pub const fn stream(&self) -> Stream {
        self.stream
    }

    /// Gives back the logger that could not be installed.
    #[must_use]
    pub fn into_rejected(self) -> Logger {
        self.rejected
    }
}

/// Logger bound to standard output.
///
/// Built on first use with an empty prefix and the switches from
/// [`Defaults::from_env`], unless [`set_out`] installed one first.
pub fn out() -> &'static Logger {
    OUT.get_or_init(|| from_defaults(io::stdout(), Defaults::from_env()))
}

/// Logger bound to standard error.
///
/// Built on first use with an empty prefix and the switches from
/// [`Defaults::from_env`], unless [`set_err`] installed one first.
pub fn err() -> &'static Logger {
    ERR.get_or_init(|| from_defaults(io::stderr(), Defaults::from_env()))
}

/// Installs the standard output logger.
///
/// Fails once [`out`] has been called or another logger has been installed.
pub fn set_out(logger: Logger) -> Result<(), AlreadySetError> {
    install(&OUT, Stream::Out, logger)
}

/// Installs the standard error logger.
///
/// Fails once [`err`] has been called or another logger has been installed.
pub fn set_err(logger: Logger) -> Result<(), AlreadySetError> {
    install(&ERR, Stream::Err, logger)
}

fn install(slot: &OnceLock<Logger>, stream: Stream, logger: Logger) -> Result<(), AlreadySetError> {
    slot.set(logger)
        .map_err(|rejected| AlreadySetError { stream, rejected })
}

fn from_defaults<W>(sink: W, defaults: Defaults) -> Logger
where
    W: io::Write + Send + 'static,
{
    Logger::new(sink, "", defaults.timestamp, defaults.one_line)
}
