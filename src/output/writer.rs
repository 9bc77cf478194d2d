//! `io::Write` adapters handed out by the `*_writer()` accessors.

use parking_lot::Mutex;
use std::io::{self, Write};
use std::sync::Arc;

/// Forwards each `write` call as one message, minus a single trailing newline.
///
/// Lets code that only knows how to write to a stream (the `log` facade,
/// `writeln!`, serializers) report through an output's message methods.
pub struct MessageWriter<F> {
    emit: F,
}

impl<F> MessageWriter<F>
where
    F: FnMut(&str),
{
    pub fn new(emit: F) -> Self {
        Self { emit }
    }
}

impl<F> Write for MessageWriter<F>
where
    F: FnMut(&str),
{
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let text = String::from_utf8_lossy(buf);
        let msg = text.strip_suffix('\n').unwrap_or(&text);
        (self.emit)(msg);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// A writer shared between views of one output.
///
/// Every write takes the lock, so two views never interleave within one call.
#[derive(Clone)]
pub struct SharedWriter {
    inner: Arc<Mutex<Box<dyn Write + Send>>>,
}

impl SharedWriter {
    pub fn new<W>(writer: W) -> Self
    where
        W: Write + Send + 'static,
    {
        Self {
            inner: Arc::new(Mutex::new(Box::new(writer))),
        }
    }

    /// Write a whole line in one call, ignoring failures.
    pub fn write_line(&self, line: &str) {
        let mut buf = String::with_capacity(line.len() + 1);
        buf.push_str(line);
        buf.push('\n');
        let mut writer = self.inner.lock();
        let _ = writer.write_all(buf.as_bytes());
        let _ = writer.flush();
    }
}

impl Write for SharedWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.inner.lock().write(buf)
    }

    fn write_all(&mut self, buf: &[u8]) -> io::Result<()> {
        self.inner.lock().write_all(buf)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.inner.lock().flush()
    }
}
