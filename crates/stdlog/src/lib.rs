#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

//! crates/stdlog/src/lib.rs
//!
//! # Overview
//!
//! `stdlog` is a small process logger in the twelve-factor style: records go
//! to a stream (usually standard output or standard error) one line at a
//! time, and everything else is left to whatever collects that stream.
//!
//! # Design
//!
//! [`Logger`] wraps any [`std::io::Write`] destination behind a mutex. Each
//! [`Logger::print`] call renders `prefix`, an optional timestamp and the
//! given values into a scratch buffer borrowed from a lock-free
//! [`pool::BufferPool`], normalizes the trailing newline and writes the record
//! with a single call while holding the mutex. With one-line mode enabled
//! the sink is wrapped in a [`oneliner::LineEncoder`], so each record is
//! emitted as one JSON string.
//!
//! The global [`out`] and [`err`] loggers are created on first use from the
//! `OnelineLog` and `TimestampLog` environment switches (see
//! [`config::Defaults`]) and can be replaced once, before first use, with
//! [`set_out`] / [`set_err`].
//!
//! # Invariants
//!
//! - Every record handed to the sink by `print` ends with a newline, and
//!   `print` adds at most one.
//! - Values are concatenated without separators.
//! - Writes through one logger, or through loggers chained onto it, never
//!   interleave.
//! - Scratch buffers always return to the pool, including when the sink fails.
//!
//! # Errors
//!
//! [`Logger::write`] surfaces the sink's [`std::io::Error`] unchanged.
//! [`Logger::print`] is fire-and-forget and discards write errors.
//! Overriding an already materialized global logger yields
//! [`AlreadySetError`].
//!
//! # Examples
//!
//! ```
//! use stdlog::{Logger, print_to};
//!
//! let logger = Logger::new(std::io::sink(), "svc: ", false, false);
//! logger.print(&[&"hi"]);
//! print_to!(logger, "took ", 12, "ms");
//!
//! // Chained loggers share the sink and mutex of the logger they wrap.
//! let child = Logger::new(logger.clone(), "child: ", false, true);
//! assert!(child.shares_sink_with(&logger));
//! assert!(!child.is_one_line());
//! ```

pub mod config;
mod global;
mod logger;
pub mod pool;
mod printer;
pub mod sink;
pub mod timestamp;
#[cfg(feature = "tracing")]
mod tracing_bridge;

pub use global::{AlreadySetError, Stream, err, out, set_err, set_out};
pub use logger::Logger;
pub use printer::{Discard, MaybeLogger, PrintWriter, Printer};
pub use sink::{BoxedWriter, WritableSink};
#[cfg(feature = "tracing")]
pub use tracing_bridge::{init_tracing, subscriber};
