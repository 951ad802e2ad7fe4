//! Error types surfaced to SDK callers.
//!
//! - [`PingenError`]: every failed HTTP-layer operation, tagged with an
//!   [`ErrorKind`] so callers can single out authentication failures.
//! - [`WebhookSignatureError`]: inbound webhook payloads that fail verification.

use std::collections::HashMap;

use serde::Serialize;
use thiserror::Error;

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;

/// Response header carrying the server-side correlation id.
pub const REQUEST_ID_HEADER: &str = "X-Request-Id";

/// Message of errors raised before any HTTP response was received.
pub const INTERNAL_ERROR: &str = "Internal error";

/// Discriminates the flavours of [`PingenError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ErrorKind {
    /// Generic API or transport failure.
    #[default]
    Api,
    /// The credentials or access token were rejected.
    Authentication,
}

/// Error returned by every failing API call.
///
/// Immutable once constructed. Only `message` and `json_body` take part
/// in serialization; status, headers and request id are local context.
#[derive(Debug, Error, Serialize)]
#[error("PingenError: {message} (Status Code: {status_code}, Request ID: {request_id})")]
pub struct PingenError {
    #[serde(skip)]
    kind: ErrorKind,

    message: String,

    json_body: Option<serde_json::Value>,

    #[serde(skip)]
    status_code: u16,

    #[serde(skip)]
    headers: HashMap<String, String>,

    #[serde(skip)]
    request_id: String,

    #[serde(skip)]
    #[source]
    source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl PingenError {
    /// Builds an error of kind [`ErrorKind::Api`].
    ///
    /// A non-empty `body` is parsed as JSON; unparsable bodies leave
    /// [`json_body`](Self::json_body) empty rather than failing. The
    /// correlation id is copied from the `X-Request-Id` header if present.
    #[must_use]
    pub fn new(
        message: impl Into<String>,
        body: &str,
        status_code: u16,
        headers: Option<HashMap<String, String>>,
    ) -> Self {
        let json_body = if body.is_empty() {
            None
        } else {
            serde_json::from_str(body).ok()
        };

        let headers = headers.unwrap_or_default();
        let request_id = header_value(&headers, REQUEST_ID_HEADER)
            .map(str::to_string)
            .unwrap_or_default();

        Self {
            kind: ErrorKind::Api,
            message: message.into(),
            json_body,
            status_code,
            headers,
            request_id,
            source: None,
        }
    }

    /// Builds an error of kind [`ErrorKind::Authentication`].
    ///
    /// Structurally identical to [`PingenError::new`].
    #[must_use]
    pub fn authentication(
        message: impl Into<String>,
        body: &str,
        status_code: u16,
        headers: Option<HashMap<String, String>>,
    ) -> Self {
        Self {
            kind: ErrorKind::Authentication,
            ..Self::new(message, body, status_code, headers)
        }
    }

    /// Builds an error from a response head.
    #[must_use]
    pub fn from_response(
        message: impl Into<String>,
        body: &str,
        status: http::StatusCode,
        headers: &http::HeaderMap,
    ) -> Self {
        Self::new(
            message,
            body,
            status.as_u16(),
            Some(convert_headers(headers)),
        )
    }

    /// Builds the `"Internal error"` (500) raised when a request never got
    /// an HTTP response, keeping `source` as the cause.
    #[must_use]
    pub fn internal(source: impl Into<Box<dyn std::error::Error + Send + Sync>>) -> Self {
        let source = source.into();
        Self::new(INTERNAL_ERROR, &source.to_string(), 500, None).with_source(source)
    }

    /// Attaches the underlying cause.
    #[must_use]
    pub fn with_source(mut self, source: impl Into<Box<dyn std::error::Error + Send + Sync>>) -> Self {
        self.source = Some(source.into());
        self
    }

    /// The error flavour.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        self.kind
    }

    /// Returns true for rejected credentials or tokens.
    #[must_use]
    pub fn is_authentication(&self) -> bool {
        self.kind == ErrorKind::Authentication
    }

    /// Human readable message.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }

    /// The response body parsed as JSON, if it was valid JSON.
    #[must_use]
    pub const fn json_body(&self) -> Option<&serde_json::Value> {
        self.json_body.as_ref()
    }

    /// HTTP status code of the failed exchange.
    #[must_use]
    pub const fn status_code(&self) -> u16 {
        self.status_code
    }

    /// Response headers, one value per name.
    #[must_use]
    pub const fn headers(&self) -> &HashMap<String, String> {
        &self.headers
    }

    /// Correlation id from `X-Request-Id`, empty if the server sent none.
    #[must_use]
    pub fn request_id(&self) -> &str {
        &self.request_id
    }
}

/// Flattens a header map to one value per name.
///
/// The first value wins for repeated headers; values that are not
/// visible ASCII are skipped.
#[must_use]
pub fn convert_headers(headers: &http::HeaderMap) -> HashMap<String, String> {
    let mut converted = HashMap::with_capacity(headers.keys_len());
    for name in headers.keys() {
        if let Some(value) = headers.get(name).and_then(|v| v.to_str().ok()) {
            converted.insert(name.as_str().to_string(), value.to_string());
        }
    }
    converted
}

/// Looks up `name` in a plain header map.
///
/// The exact spelling wins. Otherwise the case-insensitive matches are
/// ordered by key, so a map holding several spellings always yields the
/// same value.
pub(crate) fn header_value<'a, S: std::hash::BuildHasher>(
    headers: &'a HashMap<String, String, S>,
    name: &str,
) -> Option<&'a str> {
    headers
        .get(name)
        .or_else(|| {
            headers
                .iter()
                .filter(|(key, _)| key.eq_ignore_ascii_case(name))
                .min_by(|a, b| a.0.cmp(b.0))
                .map(|(_, value)| value)
        })
        .map(String::as_str)
}

/// An inbound webhook failed signature verification.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("WebhookSignatureException: {message}")]
pub struct WebhookSignatureError {
    message: String,
}

impl WebhookSignatureError {
    /// Creates a new signature error.
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    /// Human readable message.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }
}
