//! crates/stdlog/src/tracing_bridge.rs
//! Lets a [`Logger`] serve as the output of a `tracing` fmt subscriber.
//!
//! `tracing_subscriber::fmt` renders each event into its own buffer and hands
//! the finished line to the writer in one `write_all`. Routing that through
//! [`Logger::as_writer`] turns every event into one logger record, so events
//! pick up the logger's prefix, timestamp, one-line encoding and
//! serialization like any other `print`.
//!
//! # Usage
//!
//! ```rust,ignore
//! let logger = stdlog::Logger::new(std::io::stderr(), "worker: ", true, false);
//! stdlog::init_tracing(logger)?;
//!
//! tracing::info!(job = 7, "started");
//! ```

use tracing_subscriber::fmt::MakeWriter;
use tracing_subscriber::util::{SubscriberInitExt, TryInitError};

use crate::Logger;
use crate::printer::PrintWriter;

impl<'a> MakeWriter<'a> for Logger {
    type Writer = PrintWriter<'a>;

    fn make_writer(&'a self) -> Self::Writer {
        self.as_writer()
    }
}

/// Builds a fmt subscriber that writes every event through `logger`.
///
/// ANSI colors and the subscriber's own timestamps are disabled; enable
/// timestamps on the logger instead.
pub fn subscriber(logger: Logger) -> impl tracing::Subscriber + Send + Sync + 'static {
    tracing_subscriber::fmt()
        .with_writer(logger)
        .with_ansi(false)
        .without_time()
        .finish()
}

/// Installs [`subscriber`] as the global default.
///
/// Fails if a global subscriber has already been set.
pub fn init_tracing(logger: Logger) -> Result<(), TryInitError> {
    subscriber(logger).try_init()
}
