//! Response body decorator that records what the handler wrote.

use std::{
    mem,
    pin::Pin,
    task::{Context, Poll, ready},
};

use axum::body::Bytes;
use http_body::{Body, Frame, SizeHint};
use httplog_core::{HeaderValues, LogRecord, SharedSink};
use pin_project_lite::pin_project;

use super::options::BodyCapture;
use super::request_line::RequestLine;

/// Everything a response record needs apart from the body.
pub(crate) struct PendingRecord {
    pub line: RequestLine,
    pub status: u16,
    pub headers: HeaderValues,
    pub sink: SharedSink,
}

impl PendingRecord {
    fn emit(self, body: Vec<u8>) {
        let record = LogRecord::response(
            self.line.host,
            self.line.url,
            self.line.method,
            self.headers,
            self.status,
            body,
        );
        if let Err(error) = record.emit(self.sink.as_ref()) {
            tracing::debug!(%error, status = self.status, "Response record dropped");
        }
    }
}

pin_project! {
    /// Wraps a response body, forwarding every frame unchanged while keeping
    /// a copy of the data frames according to a [`BodyCapture`] policy.
    ///
    /// The response record is written exactly once: when the body reports its
    /// end, when it fails, or when it is dropped before completion.
    pub struct InterceptedBody<B> {
        #[pin]
        inner: B,
        capture: BodyCapture,
        recorded: Vec<u8>,
        pending: Option<PendingRecord>,
    }

    impl<B> PinnedDrop for InterceptedBody<B> {
        fn drop(this: Pin<&mut Self>) {
            let this = this.project();
            if let Some(pending) = this.pending.take() {
                pending.emit(mem::take(this.recorded));
            }
        }
    }
}

impl<B> InterceptedBody<B> {
    pub(crate) fn new(inner: B, capture: BodyCapture, pending: PendingRecord) -> Self {
        Self {
            inner,
            capture,
            recorded: Vec::new(),
            pending: Some(pending),
        }
    }
}

impl<B> Body for InterceptedBody<B>
where
    B: Body<Data = Bytes>,
{
    type Data = Bytes;
    type Error = B::Error;

    fn poll_frame(
        self: Pin<&mut Self>,
        cx: &mut Context<'_>,
    ) -> Poll<Option<Result<Frame<Self::Data>, Self::Error>>> {
        let this = self.project();

        let polled = ready!(this.inner.poll_frame(cx));
        match &polled {
            Some(Ok(frame)) => {
                if let Some(data) = frame.data_ref() {
                    if *this.capture == BodyCapture::LastWrite {
                        this.recorded.clear();
                    }
                    this.recorded.extend_from_slice(data);
                }
            }
            Some(Err(_)) | None => {
                if let Some(pending) = this.pending.take() {
                    pending.emit(mem::take(this.recorded));
                }
            }
        }

        Poll::Ready(polled)
    }

    fn is_end_stream(&self) -> bool {
        self.inner.is_end_stream()
    }

    fn size_hint(&self) -> SizeHint {
        self.inner.size_hint()
    }
}
