//! Sinks and bodies for driving the loggers from tests.

use std::collections::VecDeque;
use std::io;
use std::pin::Pin;
use std::sync::{Arc, Mutex};
use std::task::{Context, Poll};

use axum::body::Bytes;
use http_body::Frame;
use httplog_core::{LogRecord, LogSink, MemorySink};

/// Parses every write of `sink` as a record.
pub fn records(sink: &MemorySink) -> Vec<LogRecord> {
    sink.writes()
        .iter()
        .map(|w| LogRecord::from_json(w).expect("sink received an invalid record"))
        .collect()
}

/// A sink whose writes always fail.
#[derive(Debug, Clone, Copy, Default)]
pub struct FailingSink;

impl LogSink for FailingSink {
    fn write(&self, _buf: &[u8]) -> io::Result<usize> {
        Err(io::Error::other("sink unavailable"))
    }
}

/// Shared, ordered list of events observed during a request.
#[derive(Debug, Clone, Default)]
pub struct Events(Arc<Mutex<Vec<String>>>);

impl Events {
    pub fn push(&self, event: impl Into<String>) {
        self.0.lock().unwrap().push(event.into());
    }

    pub fn snapshot(&self) -> Vec<String> {
        self.0.lock().unwrap().clone()
    }
}

/// A sink that appends `record:<type>` to an [`Events`] list.
#[derive(Debug, Clone, Default)]
pub struct EventSink {
    pub events: Events,
}

impl LogSink for EventSink {
    fn write(&self, buf: &[u8]) -> io::Result<usize> {
        let record = LogRecord::from_json(buf).map_err(io::Error::other)?;
        self.events.push(format!("record:{}", record.kind()));
        Ok(buf.len())
    }
}

/// Response body made of separate data frames, one per write.
pub struct ChunkedBody {
    chunks: VecDeque<Bytes>,
}

impl ChunkedBody {
    pub fn new<I>(chunks: I) -> Self
    where
        I: IntoIterator<Item = &'static str>,
    {
        Self {
            chunks: chunks
                .into_iter()
                .map(|chunk| Bytes::from_static(chunk.as_bytes()))
                .collect(),
        }
    }
}

impl http_body::Body for ChunkedBody {
    type Data = Bytes;
    type Error = io::Error;

    fn poll_frame(
        mut self: Pin<&mut Self>,
        _cx: &mut Context<'_>,
    ) -> Poll<Option<Result<Frame<Self::Data>, Self::Error>>> {
        Poll::Ready(self.chunks.pop_front().map(|chunk| Ok(Frame::data(chunk))))
    }
}

/// Request body that fails on the first read.
pub struct BrokenBody;

impl http_body::Body for BrokenBody {
    type Data = Bytes;
    type Error = io::Error;

    fn poll_frame(
        self: Pin<&mut Self>,
        _cx: &mut Context<'_>,
    ) -> Poll<Option<Result<Frame<Self::Data>, Self::Error>>> {
        Poll::Ready(Some(Err(io::Error::new(
            io::ErrorKind::ConnectionReset,
            "client went away",
        ))))
    }
}
