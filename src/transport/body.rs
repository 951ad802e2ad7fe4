//! Request and response bodies.

use std::fmt;
use std::pin::Pin;
use std::task::{Context, Poll};

use bytes::{Bytes, BytesMut};
use tokio_stream::{Stream, StreamExt};

use super::HttpError;

type BoxedStream = Pin<Box<dyn Stream<Item = Result<Bytes, HttpError>> + Send>>;

/// A lazily read byte stream.
///
/// Response bodies are handed out as a `BodyStream` so that large
/// downloads never have to be buffered. The underlying connection is
/// released when the stream is dropped, on success and error paths alike.
pub struct BodyStream {
    inner: BoxedStream,
}

impl BodyStream {
    /// Wraps an arbitrary chunk stream.
    pub fn from_stream<S>(stream: S) -> Self
    where
        S: Stream<Item = Result<Bytes, HttpError>> + Send + 'static,
    {
        Self {
            inner: Box::pin(stream),
        }
    }

    /// Creates a stream that yields `bytes` as a single chunk.
    #[must_use]
    pub fn from_bytes(bytes: impl Into<Bytes>) -> Self {
        let bytes = bytes.into();
        if bytes.is_empty() {
            return Self::empty();
        }
        Self::from_stream(tokio_stream::once(Ok(bytes)))
    }

    /// Creates a stream that yields nothing.
    #[must_use]
    pub fn empty() -> Self {
        Self::from_stream(tokio_stream::empty())
    }

    /// Reads the stream to the end.
    ///
    /// # Errors
    ///
    /// Returns the first [`HttpError`] produced by the underlying stream.
    pub async fn collect(mut self) -> Result<Vec<u8>, HttpError> {
        let mut buf = BytesMut::new();
        while let Some(chunk) = self.inner.next().await {
            buf.extend_from_slice(&chunk?);
        }
        Ok(buf.to_vec())
    }
}

impl Stream for BodyStream {
    type Item = Result<Bytes, HttpError>;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        self.inner.as_mut().poll_next(cx)
    }
}

impl fmt::Debug for BodyStream {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BodyStream").finish_non_exhaustive()
    }
}

/// Body attached to an outgoing request.
#[derive(Debug, Default)]
pub enum RequestBody {
    /// No body at all.
    #[default]
    Empty,
    /// A fully buffered payload, sent as-is.
    Bytes(Vec<u8>),
    /// A streamed payload, used for file uploads.
    Stream(BodyStream),
}

impl RequestBody {
    /// Returns true if no body will be sent.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        matches!(self, Self::Empty)
    }

    /// Returns the buffered bytes, if this is a buffered body.
    #[must_use]
    pub fn as_bytes(&self) -> Option<&[u8]> {
        match self {
            Self::Bytes(bytes) => Some(bytes),
            Self::Empty | Self::Stream(_) => None,
        }
    }
}

impl From<Vec<u8>> for RequestBody {
    fn from(bytes: Vec<u8>) -> Self {
        Self::Bytes(bytes)
    }
}

impl From<BodyStream> for RequestBody {
    fn from(stream: BodyStream) -> Self {
        Self::Stream(stream)
    }
}
