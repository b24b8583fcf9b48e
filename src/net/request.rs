//! Request execution helpers over [`reqwest`].

use std::pin::Pin;
use std::task::{Context, Poll};

use bytes::Bytes;
use futures_core::Stream;
use reqwest::{RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;
use uuid::Uuid;

use super::config::NetConfig;
use super::error::NetError;
use super::sse::SseStream;

/// Response body bytes with transport failures mapped into [`NetError`].
pub struct ResponseBody {
    inner: Pin<Box<dyn Stream<Item = Result<Bytes, reqwest::Error>> + Send>>,
}

impl Stream for ResponseBody {
    type Item = Result<Bytes, NetError>;

    fn poll_next(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        self.get_mut()
            .inner
            .as_mut()
            .poll_next(cx)
            .map(|item| item.map(|chunk| chunk.map_err(NetError::Transport)))
    }
}

/// Send a request and decode a JSON body into `T`.
pub async fn fetch_json<T: DeserializeOwned>(
    builder: RequestBuilder,
    config: &NetConfig,
) -> Result<T, NetError> {
    let request_id = Uuid::new_v4();
    let response = builder.send().await?;
    let status = response.status();
    let url = response.url().clone();
    if status.is_success() {
        let body = response.bytes().await?;
        tracing::debug!(%request_id, status = status.as_u16(), %url, "request succeeded");
        if config.log_bodies {
            tracing::debug!(%request_id, body = %String::from_utf8_lossy(&body), "response body");
        }
        Ok(serde_json::from_slice(&body)?)
    } else {
        let body = response.text().await.unwrap_or_default();
        tracing::error!(%request_id, status = status.as_u16(), %url, "request failed");
        if config.log_bodies {
            tracing::error!(%request_id, body = %body, "error body");
        }
        Err(status_error(status, body))
    }
}

/// Send a request where only the status matters; the body is discarded.
pub async fn send_unit(builder: RequestBuilder, config: &NetConfig) -> Result<(), NetError> {
    let request_id = Uuid::new_v4();
    let response = builder.send().await?;
    let status = response.status();
    let url = response.url().clone();
    if status.is_success() {
        tracing::debug!(%request_id, status = status.as_u16(), %url, "request succeeded");
        Ok(())
    } else {
        let body = response.text().await.unwrap_or_default();
        tracing::error!(%request_id, status = status.as_u16(), %url, "request failed");
        if config.log_bodies {
            tracing::error!(%request_id, body = %body, "error body");
        }
        Err(status_error(status, body))
    }
}

/// Send a request and decode its SSE body into a stream of
/// [`StreamEvent`](super::StreamEvent)s.
///
/// A non-success status fails here, before any event is produced; the
/// `Start`/`Data`/`Error`/`Complete` protocol applies to opened streams
/// only.
pub async fn fetch_sse<T: DeserializeOwned + Unpin>(
    builder: RequestBuilder,
    config: &NetConfig,
) -> Result<SseStream<ResponseBody, T>, NetError> {
    let response = builder.send().await?;
    let status = response.status();
    let url = response.url().clone();
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        tracing::error!(status = status.as_u16(), %url, "stream request failed");
        if config.log_bodies {
            tracing::error!(body = %body, "error body");
        }
        return Err(status_error(status, body));
    }

    let body = ResponseBody {
        inner: Box::pin(response.bytes_stream()),
    };
    let stream = SseStream::new(body, config);
    tracing::debug!(request_id = %stream.request_id(), status = status.as_u16(), %url, "stream opened");
    Ok(stream)
}

/// Build the error for a non-success response, falling back to the status
/// line's canonical reason when the error body is blank.
fn status_error(status: StatusCode, body: String) -> NetError {
    let message = if body.trim().is_empty() {
        status
            .canonical_reason()
            .unwrap_or("unknown error")
            .to_string()
    } else {
        body
    };
    NetError::Status {
        status: status.as_u16(),
        message,
    }
}
