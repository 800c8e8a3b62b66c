//! HTTP seam between the submitter and the backend
//!
//! The transport only moves bytes. Interpreting the body (download vs. JSON)
//! is the submitter's job.

use serde::Deserialize;

use crate::error::TransportError;

/// Fully-read response from one POST
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct HttpResponse {
    pub status: u16,
    /// Raw `Content-Disposition` header, if the server sent one
    pub content_disposition: Option<String>,
    pub body: Vec<u8>,
}

impl HttpResponse {
    pub fn new(status: u16, body: impl Into<Vec<u8>>) -> Self {
        Self {
            status,
            content_disposition: None,
            body: body.into(),
        }
    }

    pub fn with_disposition(mut self, value: impl Into<String>) -> Self {
        self.content_disposition = Some(value.into());
        self
    }

    /// Status in the 2xx range
    pub fn ok(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Issues the POST for a form payload.
///
/// Implementations run on a single-threaded event loop, so the returned
/// future is not required to be `Send`.
#[allow(async_fn_in_trait)]
pub trait Transport<P>: 'static {
    async fn post(&self, endpoint: &str, payload: P) -> Result<HttpResponse, TransportError>;
}

/// `{"error": "..."}` body returned on failure
#[derive(Debug, Deserialize)]
pub(crate) struct ErrorBody {
    pub error: Option<String>,
}

/// `{"text": "..."}` body returned by `/extract-text`
#[derive(Debug, Deserialize)]
pub(crate) struct TextBody {
    pub text: Option<String>,
}

/// Extract the `filename=` parameter from a `Content-Disposition` value.
///
/// Quotes are stripped and any directory part is dropped so the name can be
/// used directly as a download name. Returns `None` when the parameter is
/// missing or empty.
pub fn filename_from_disposition(header: &str) -> Option<String> {
    let (_, rest) = header.split_once("filename=")?;
    let value = rest.split(';').next().unwrap_or_default();
    let value = value.trim().replace('"', "");
    let name = value
        .rsplit(['/', '\\'])
        .next()
        .unwrap_or_default()
        .trim()
        .to_string();

    if name.is_empty() {
        None
    } else {
        Some(name)
    }
}
