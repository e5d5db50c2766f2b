use std::fmt::Display;
use std::io::{self, Write};

use super::Logger;
use crate::pool;
use crate::printer::PrintWriter;
use crate::timestamp;

impl Logger {
    /// Writes `buf` to the sink while holding the logger's mutex.
    ///
    /// The sink's result is returned unchanged: short writes are not retried
    /// and errors are not wrapped.
    pub fn write(&self, buf: &[u8]) -> io::Result<usize> {
        self.sink.lock().write(buf)
    }

    /// Flushes the sink while holding the logger's mutex.
    pub fn flush(&self) -> io::Result<()> {
        self.sink.lock().flush()
    }

    /// Writes one record made of `values`.
    ///
    /// Values are rendered with [`Display`] and concatenated without
    /// separators, so `print(&[&"a", &"b"])` emits `ab`. A newline is appended
    /// unless the record already ends with one. Write errors are discarded;
    /// use [`write`](Self::write) when the caller needs to observe them.
    pub fn print(&self, values: &[&dyn Display]) {
        let mut record = pool::global().acquire();
        self.render(&mut record, values);
        let _ = self.write(&record);
    }

    fn render(&self, record: &mut pool::ScratchBuffer<'_>, values: &[&dyn Display]) {
        if !self.prefix.is_empty() {
            record.push_str(&self.prefix);
        }

        if self.timestamp && timestamp::write_timestamp(record, timestamp::now()).is_ok() {
            record.push(b' ');
        }

        for value in values {
            // Writing into a Vec only fails when a Display impl reports an
            // error; the partial rendering is kept.
            let _ = write!(record, "{value}");
        }

        record.terminate_line();
    }

    /// Returns an [`io::Write`] adapter that turns each write into one
    /// [`print`](Self::print) call.
    ///
    /// Use it to hand the logger to code that expects a generic writer-based
    /// logger; every chunk it writes becomes one newline-terminated record
    /// carrying this logger's prefix and timestamp.
    pub fn as_writer(&self) -> PrintWriter<'_> {
        PrintWriter::new(self)
    }
}

impl Write for Logger {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        Self::write(self, buf)
    }

    fn flush(&mut self) -> io::Result<()> {
        Self::flush(self)
    }
}

impl Write for &Logger {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        Logger::write(self, buf)
    }

    fn flush(&mut self) -> io::Result<()> {
        Logger::flush(self)
    }
}
