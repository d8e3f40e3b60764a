//! Request body handed on after the request logger has read the original.

use std::{
    pin::Pin,
    task::{Context, Poll},
};

use axum::body::{Body, Bytes};
use http_body::Frame;
use http_body_util::BodyExt;

/// Bytes read from a request body, and the error that stopped the read, if
/// any.
pub(crate) struct ReadBody {
    pub bytes: Bytes,
    pub error: Option<axum::Error>,
}

impl ReadBody {
    /// Reads `body` to the end or to its first error. Trailers are dropped.
    pub async fn read(mut body: Body) -> Self {
        let mut buf = Vec::new();
        while let Some(frame) = body.frame().await {
            match frame {
                Ok(frame) => {
                    if let Some(data) = frame.data_ref() {
                        buf.extend_from_slice(data);
                    }
                }
                Err(error) => {
                    return Self {
                        bytes: buf.into(),
                        error: Some(error),
                    };
                }
            }
        }

        Self {
            bytes: buf.into(),
            error: None,
        }
    }

    /// The body as it should appear in the request record: empty when the
    /// read failed.
    pub fn logged(&self) -> &[u8] {
        if self.error.is_some() { &[] } else { &self.bytes[..] }
    }

    /// A body yielding the same bytes, then the same error, as the original.
    pub fn replay(self) -> Body {
        match self.error {
            None => Body::from(self.bytes),
            Some(error) => Body::new(ReplayBody {
                data: Some(self.bytes).filter(|b| !b.is_empty()),
                error: Some(error),
            }),
        }
    }
}

struct ReplayBody {
    data: Option<Bytes>,
    error: Option<axum::Error>,
}

impl http_body::Body for ReplayBody {
    type Data = Bytes;
    type Error = axum::Error;

    fn poll_frame(
        mut self: Pin<&mut Self>,
        _cx: &mut Context<'_>,
    ) -> Poll<Option<Result<Frame<Self::Data>, Self::Error>>> {
        if let Some(data) = self.data.take() {
            return Poll::Ready(Some(Ok(Frame::data(data))));
        }
        Poll::Ready(self.error.take().map(Err))
    }
}
