//! Append-only destinations for encoded records.
//!
//! A sink only has to accept one encoded record per [`LogSink::write`] call.
//! It is never read, seeked or flushed by the middleware, and its errors are
//! never surfaced to HTTP clients.

use std::fs::{File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use parking_lot::Mutex;
use serde::{Deserialize, Serialize};

use crate::error::{HttplogError, Result};

/// An append-only byte sink.
pub trait LogSink: Send + Sync {
    /// Writes one encoded record, returning how many bytes were accepted.
    fn write(&self, buf: &[u8]) -> io::Result<usize>;
}

impl<S: LogSink + ?Sized> LogSink for Arc<S> {
    fn write(&self, buf: &[u8]) -> io::Result<usize> {
        (**self).write(buf)
    }
}

impl<S: LogSink + ?Sized> LogSink for &S {
    fn write(&self, buf: &[u8]) -> io::Result<usize> {
        (**self).write(buf)
    }
}

/// Shared handle used by the middleware layers.
pub type SharedSink = Arc<dyn LogSink>;

/// Writes records to the process standard output.
#[derive(Debug, Clone, Copy, Default)]
pub struct StdoutSink;

impl LogSink for StdoutSink {
    fn write(&self, buf: &[u8]) -> io::Result<usize> {
        let mut out = io::stdout().lock();
        out.write_all(buf)?;
        out.flush()?;
        Ok(buf.len())
    }
}

/// Writes records to the process standard error.
#[derive(Debug, Clone, Copy, Default)]
pub struct StderrSink;

impl LogSink for StderrSink {
    fn write(&self, buf: &[u8]) -> io::Result<usize> {
        io::stderr().lock().write_all(buf)?;
        Ok(buf.len())
    }
}

/// Drops every record.
#[derive(Debug, Clone, Copy, Default)]
pub struct DiscardSink;

impl LogSink for DiscardSink {
    fn write(&self, buf: &[u8]) -> io::Result<usize> {
        Ok(buf.len())
    }
}

/// Any [`Write`] implementation behind a mutex.
///
/// The whole record is written while the lock is held, so concurrent requests
/// never interleave bytes of different records.
#[derive(Debug)]
pub struct WriterSink<W> {
    writer: Mutex<W>,
}

impl<W: Write + Send> WriterSink<W> {
    pub fn new(writer: W) -> Self {
        Self {
            writer: Mutex::new(writer),
        }
    }

    /// Consumes the sink and returns the inner writer.
    pub fn into_inner(self) -> W {
        self.writer.into_inner()
    }
}

impl WriterSink<File> {
    /// Opens `path` for appending, creating it if needed.
    pub fn append_to(path: impl AsRef<Path>) -> Result<Self> {
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path.as_ref())?;
        Ok(Self::new(file))
    }
}

impl<W: Write + Send> LogSink for WriterSink<W> {
    fn write(&self, buf: &[u8]) -> io::Result<usize> {
        let mut writer = self.writer.lock();
        writer.write_all(buf)?;
        writer.flush()?;
        Ok(buf.len())
    }
}

/// In-memory sink keeping every write as a separate entry.
///
/// Clones share the same storage.
#[derive(Debug, Clone, Default)]
pub struct MemorySink {
    writes: Arc<Mutex<Vec<Vec<u8>>>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a copy of every write received so far.
    pub fn writes(&self) -> Vec<Vec<u8>> {
        self.writes.lock().clone()
    }

    /// Number of writes received.
    pub fn len(&self) -> usize {
        self.writes.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.writes.lock().is_empty()
    }

    /// Removes and returns every write received so far.
    pub fn take(&self) -> Vec<Vec<u8>> {
        std::mem::take(&mut *self.writes.lock())
    }
}

impl LogSink for MemorySink {
    fn write(&self, buf: &[u8]) -> io::Result<usize> {
        self.writes.lock().push(buf.to_vec());
        Ok(buf.len())
    }
}

/// Appends a newline to every record so that a stream of records can be
/// split back into individual objects.
///
/// The record and its delimiter reach the inner sink in one write.
#[derive(Debug, Clone)]
pub struct Delimited<S> {
    inner: S,
}

impl<S> Delimited<S> {
    pub fn new(inner: S) -> Self {
        Self { inner }
    }
}

impl<S: LogSink> LogSink for Delimited<S> {
    fn write(&self, buf: &[u8]) -> io::Result<usize> {
        let mut line = Vec::with_capacity(buf.len() + 1);
        line.extend_from_slice(buf);
        line.push(b'\n');
        let written = self.inner.write(&line)?;
        Ok(written.min(buf.len()))
    }
}

/// Kind of sink selected by configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SinkKind {
    #[default]
    Stdout,
    Stderr,
    File,
    Discard,
}

/// How records are separated inside the sink's byte stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Delimiter {
    /// Records are written back to back.
    #[default]
    None,
    /// Each record is followed by `\n`.
    Newline,
}

/// Resolved sink configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SinkSettings {
    #[serde(default)]
    pub writer: SinkKind,

    /// Target file, required when `writer` is `file`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<PathBuf>,

    #[serde(default)]
    pub delimiter: Delimiter,
}

/// Builds the sink described by `settings`.
///
/// # Errors
///
/// Returns [`HttplogError::InvalidSink`] when a file sink has no path, and
/// [`HttplogError::Sink`] when the file cannot be opened.
pub fn open_sink(settings: &SinkSettings) -> Result<SharedSink> {
    let base: SharedSink = match settings.writer {
        SinkKind::Stdout => Arc::new(StdoutSink),
        SinkKind::Stderr => Arc::new(StderrSink),
        SinkKind::Discard => Arc::new(DiscardSink),
        SinkKind::File => {
            let path = settings
                .path
                .as_ref()
                .ok_or_else(|| HttplogError::invalid_sink("file", "`path` is required"))?;
            Arc::new(WriterSink::append_to(path)?)
        }
    };

    Ok(match settings.delimiter {
        Delimiter::None => base,
        Delimiter::Newline => Arc::new(Delimited::new(base)),
    })
}
