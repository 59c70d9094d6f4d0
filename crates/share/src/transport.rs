//! HTTP upload transport.
//!
//! Streams the file body to the slot's PUT URL. The whole file is never
//! held in memory; progress callbacks fire as chunks are handed to the
//! connection, serialized and monotonic.

use std::future::Future;
use std::pin::Pin;

use bytes::Bytes;
use futures_util::{Stream, StreamExt};
use linnet_protocol::types::{UploadProgress, UploadSlot};
use reqwest::header::{CONTENT_LENGTH, CONTENT_TYPE, HeaderMap, HeaderName, HeaderValue};
use reqwest::{Body, StatusCode};
use tokio::io::AsyncRead;
use tokio_util::io::ReaderStream;
use tracing::{debug, error, warn};

use crate::error::ShareError;
use crate::source::ByteSource;

/// Callback invoked with transfer progress.
pub type ProgressCallback = Box<dyn Fn(UploadProgress) + Send + Sync>;

/// Chunk size for the streamed request body.
const BODY_CHUNK_SIZE: usize = 64 * 1024;

/// Uploads one byte source to a negotiated slot.
///
/// The production implementation is [`HttpTransport`]; tests substitute
/// mocks. The slot is consumed by value — single-use by server contract.
pub trait UploadTransport: Send + Sync {
    fn upload<'a>(
        &'a self,
        slot: UploadSlot,
        source: ByteSource,
        size: u64,
        content_type: &'a str,
        on_progress: Option<ProgressCallback>,
    ) -> Pin<Box<dyn Future<Output = Result<(), ShareError>> + Send + 'a>>;
}

/// `reqwest`-backed transport performing the streamed PUT.
pub struct HttpTransport {
    http: reqwest::Client,
}

impl HttpTransport {
    /// Creates a transport with a default HTTP client.
    pub fn new() -> Self {
        Self {
            http: reqwest::Client::new(),
        }
    }

    /// Creates a transport over a caller-configured client.
    pub fn with_client(http: reqwest::Client) -> Self {
        Self { http }
    }
}

impl Default for HttpTransport {
    fn default() -> Self {
        Self::new()
    }
}

impl UploadTransport for HttpTransport {
    fn upload<'a>(
        &'a self,
        slot: UploadSlot,
        source: ByteSource,
        size: u64,
        content_type: &'a str,
        on_progress: Option<ProgressCallback>,
    ) -> Pin<Box<dyn Future<Output = Result<(), ShareError>> + Send + 'a>> {
        Box::pin(async move {
            let headers = build_headers(&slot, content_type, size)?;
            let body = counted_stream(source.into_reader(), size, on_progress);

            debug!(url = %slot.put_url, bytes = size, "starting PUT");
            let response = self
                .http
                .put(&slot.put_url)
                .headers(headers)
                .body(Body::wrap_stream(body))
                .send()
                .await
                .map_err(|e| {
                    error!(url = %slot.put_url, error = %e, "upload PUT failed");
                    ShareError::HttpError
                })?;

            let status = response.status();
            if status != StatusCode::CREATED {
                warn!(url = %slot.put_url, status = status.as_u16(), "upload rejected");
                return Err(ShareError::HttpError);
            }

            debug!(url = %slot.put_url, bytes = size, "upload complete");
            Ok(())
        })
    }
}

/// Builds the PUT header set: every slot header plus `Content-Type` and the
/// standard `Content-Length`.
///
/// A slot header that is not a legal HTTP header fails the transfer before
/// any bytes are sent.
fn build_headers(
    slot: &UploadSlot,
    content_type: &str,
    size: u64,
) -> Result<HeaderMap, ShareError> {
    let mut headers = HeaderMap::new();
    for (name, value) in &slot.put_headers {
        let header_name = HeaderName::from_bytes(name.as_bytes()).map_err(|_| {
            warn!(header = %name, "slot header name is not valid HTTP");
            ShareError::HttpError
        })?;
        let header_value = HeaderValue::from_str(value).map_err(|_| {
            warn!(header = %name, "slot header value is not valid HTTP");
            ShareError::HttpError
        })?;
        headers.insert(header_name, header_value);
    }
    headers.insert(
        CONTENT_TYPE,
        HeaderValue::from_str(content_type).map_err(|_| ShareError::HttpError)?,
    );
    headers.insert(CONTENT_LENGTH, HeaderValue::from(size));
    Ok(headers)
}

/// Wraps a reader into a chunked body stream that reports progress.
fn counted_stream(
    reader: Box<dyn AsyncRead + Send + Unpin>,
    total: u64,
    on_progress: Option<ProgressCallback>,
) -> impl Stream<Item = std::io::Result<Bytes>> + Send + 'static {
    let mut sent: u64 = 0;
    ReaderStream::with_capacity(reader, BODY_CHUNK_SIZE).map(move |chunk| {
        if let Ok(bytes) = &chunk {
            sent += bytes.len() as u64;
            if let Some(cb) = &on_progress {
                cb(UploadProgress {
                    bytes_sent: sent,
                    bytes_total: total,
                });
            }
        }
        chunk
    })
}
