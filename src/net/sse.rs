//! SSE (Server-Sent Events) body decoding.
//!
//! Buffers a response byte stream into lines and decodes `data:` payloads
//! into typed values. Handles format variations (`data:{...}` vs
//! `data: {...}`), skips blank and comment lines, and treats `data: [DONE]`
//! as the successful terminus.

use std::collections::VecDeque;
use std::pin::Pin;
use std::task::{Context, Poll};

use bytes::Bytes;
use futures_core::Stream;
use serde::de::DeserializeOwned;
use uuid::Uuid;

use super::config::NetConfig;
use super::error::NetError;

/// Terminal payload some streaming APIs send instead of closing cleanly.
const DONE_MARKER: &str = "[DONE]";

/// One phase of a streaming response.
///
/// A well-formed stream yields `Start`, then any number of `Data`/`Error`
/// events, then exactly one `Complete`. `success` is true only if the
/// stream reached its `[DONE]` terminus.
#[derive(Debug)]
pub enum StreamEvent<T> {
    Start,
    Data(T),
    Error(NetError),
    Complete { success: bool },
}

/// Decodes an SSE byte stream into [`StreamEvent`]s.
///
/// A decode failure on one payload is reported as an `Error` event and the
/// stream keeps going; transport failures terminate it. The final
/// `Complete` event is always delivered, even on failure.
pub struct SseStream<S, T> {
    inner: S,
    request_id: Uuid,
    log_bodies: bool,
    buf: Vec<u8>,
    pending: VecDeque<StreamEvent<T>>,
    started: bool,
    /// No more input will be processed (terminus seen or source exhausted).
    input_done: bool,
    /// Terminal `Complete` has been queued; the stream is drained after it.
    completed: bool,
    succeeded: bool,
    error_sent: bool,
}

impl<S, T> SseStream<S, T>
where
    S: Stream<Item = Result<Bytes, NetError>> + Unpin,
    T: DeserializeOwned + Unpin,
{
    pub fn new(inner: S, config: &NetConfig) -> Self {
        Self {
            inner,
            request_id: Uuid::new_v4(),
            log_bodies: config.log_bodies,
            buf: Vec::new(),
            pending: VecDeque::new(),
            started: false,
            input_done: false,
            completed: false,
            succeeded: false,
            error_sent: false,
        }
    }

    /// Correlation id used in this stream's log lines.
    pub fn request_id(&self) -> Uuid {
        self.request_id
    }

    /// Convenience for consuming the stream without a stream-combinator
    /// crate.
    pub async fn next_event(&mut self) -> Option<StreamEvent<T>> {
        std::future::poll_fn(|cx| Pin::new(&mut *self).poll_next(cx)).await
    }

    fn feed(&mut self, chunk: &[u8]) {
        self.buf.extend_from_slice(chunk);
        while !self.input_done {
            let Some(pos) = self.buf.iter().position(|&b| b == b'\n') else {
                break;
            };
            let line: Vec<u8> = self.buf.drain(..=pos).collect();
            let text = String::from_utf8_lossy(&line[..line.len() - 1]).into_owned();
            self.accept_line(&text);
        }
    }

    fn accept_line(&mut self, line: &str) {
        let line = line.trim_end_matches('\r');
        if line.is_empty() || line.starts_with(':') {
            return;
        }
        let Some(payload) = sse_data_payload(line) else {
            return;
        };
        if payload == DONE_MARKER {
            tracing::debug!(request_id = %self.request_id, "stream reached terminus");
            self.succeeded = true;
            self.input_done = true;
            return;
        }
        if self.log_bodies {
            tracing::debug!(request_id = %self.request_id, payload, "stream payload");
        }
        match serde_json::from_str::<T>(payload) {
            Ok(value) => self.pending.push_back(StreamEvent::Data(value)),
            Err(err) => {
                tracing::error!(request_id = %self.request_id, error = %err, "stream payload decode failed");
                self.pending.push_back(StreamEvent::Error(NetError::Decode(err)));
                self.error_sent = true;
            }
        }
    }

    /// A source that ends without a trailing newline still delivers its
    /// last line.
    fn flush_tail(&mut self) {
        if self.buf.is_empty() {
            return;
        }
        let tail = std::mem::take(&mut self.buf);
        let text = String::from_utf8_lossy(&tail).into_owned();
        self.accept_line(&text);
    }
}

impl<S, T> Stream for SseStream<S, T>
where
    S: Stream<Item = Result<Bytes, NetError>> + Unpin,
    T: DeserializeOwned + Unpin,
{
    type Item = StreamEvent<T>;

    fn poll_next(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        let this = self.get_mut();
        loop {
            if !this.started {
                this.started = true;
                return Poll::Ready(Some(StreamEvent::Start));
            }
            if let Some(event) = this.pending.pop_front() {
                return Poll::Ready(Some(event));
            }
            if this.completed {
                return Poll::Ready(None);
            }
            if this.input_done {
                if !this.succeeded && !this.error_sent {
                    this.pending.push_back(StreamEvent::Error(NetError::Truncated));
                }
                this.pending.push_back(StreamEvent::Complete {
                    success: this.succeeded,
                });
                this.completed = true;
                continue;
            }
            match Pin::new(&mut this.inner).poll_next(cx) {
                Poll::Ready(Some(Ok(chunk))) => this.feed(&chunk),
                Poll::Ready(Some(Err(err))) => {
                    tracing::error!(request_id = %this.request_id, error = %err, "stream transport failed");
                    this.pending.push_back(StreamEvent::Error(err));
                    this.error_sent = true;
                    this.input_done = true;
                }
                Poll::Ready(None) => {
                    this.flush_tail();
                    this.input_done = true;
                }
                Poll::Pending => return Poll::Pending,
            }
        }
    }
}

/// Payload of a `data:` line, tolerating a missing space after the colon.
fn sse_data_payload(line: &str) -> Option<&str> {
    let rest = line.strip_prefix("data:")?;
    Some(rest.strip_prefix(' ').unwrap_or(rest))
}
