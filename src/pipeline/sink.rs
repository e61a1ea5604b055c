//! Output sinks
//!
//! A [`Sink`] is where rendered lines end up. Every `std::io::Write` is a sink;
//! [`MemorySink`] captures output in memory and [`LockedStream`] renders text
//! through the lock-aware processor before writing it.

use crate::ansi;
use std::io::{self, Write};
use std::sync::{Arc, Mutex, PoisonError};

/// Character stream the pipeline writes to
pub trait Sink: Send {
    /// Write `text` as-is
    fn write_str(&mut self, text: &str) -> io::Result<()>;

    /// Write `text` followed by a newline in a single call
    fn write_line(&mut self, text: &str) -> io::Result<()>;

    /// Flush buffered bytes
    fn flush(&mut self) -> io::Result<()>;
}

impl<W: Write + Send> Sink for W {
    fn write_str(&mut self, text: &str) -> io::Result<()> {
        self.write_all(text.as_bytes())?;
        Write::flush(self)
    }

    fn write_line(&mut self, text: &str) -> io::Result<()> {
        let mut line = String::with_capacity(text.len() + 1);
        line.push_str(text);
        line.push('\n');
        self.write_all(line.as_bytes())?;
        Write::flush(self)
    }

    fn flush(&mut self) -> io::Result<()> {
        Write::flush(self)
    }
}

/// Shared in-memory buffer; clones write to the same bytes
#[derive(Debug, Clone, Default)]
pub struct MemorySink {
    buffer: Arc<Mutex<Vec<u8>>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Everything written so far, lossily decoded
    pub fn contents(&self) -> String {
        let buffer = self.buffer.lock().unwrap_or_else(PoisonError::into_inner);
        String::from_utf8_lossy(&buffer).into_owned()
    }

    /// Completed lines written so far, without terminators
    pub fn lines(&self) -> Vec<String> {
        let contents = self.contents();
        contents
            .split_terminator('\n')
            .map(str::to_string)
            .collect()
    }

    /// Number of bytes written so far
    pub fn len(&self) -> usize {
        self.buffer
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Drop everything written so far
    pub fn clear(&self) {
        self.buffer
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
    }
}

impl Write for MemorySink {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.buffer
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Writer that passes everything through the lock-aware processor with no
/// styles, so embedded locked regions and escape codes reach the inner writer
/// intact and literal runs are closed with a reset.
#[derive(Debug)]
pub struct LockedStream<W: Write> {
    inner: Mutex<W>,
}

impl<W: Write> LockedStream<W> {
    pub fn new(inner: W) -> Self {
        Self {
            inner: Mutex::new(inner),
        }
    }

    /// Render and write `text` without a newline
    pub fn print(&self, text: &str) -> io::Result<()> {
        let rendered = ansi::render(text, &[]);
        let mut inner = self.inner.lock().unwrap_or_else(PoisonError::into_inner);
        inner.write_all(rendered.as_bytes())?;
        Write::flush(&mut *inner)
    }

    /// Render and write `text` followed by a newline
    pub fn println(&self, text: &str) -> io::Result<()> {
        let mut rendered = ansi::render(text, &[]);
        rendered.push('\n');
        let mut inner = self.inner.lock().unwrap_or_else(PoisonError::into_inner);
        inner.write_all(rendered.as_bytes())?;
        Write::flush(&mut *inner)
    }

    /// Recover the inner writer
    pub fn into_inner(self) -> W {
        self.inner.into_inner().unwrap_or_else(PoisonError::into_inner)
    }
}
