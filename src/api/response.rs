//! Translation of raw HTTP responses into typed results.

use http::StatusCode;
use serde::Deserialize;
use serde::de::DeserializeOwned;

use crate::error::PingenError;
use crate::transport::HttpResponse;

/// Outcome of a request the server accepted without returning a resource.
///
/// Produced for `202 Accepted` and `204 No Content`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DefaultResponse {
    /// Raw response body, usually empty
    pub body: String,
    /// Status code of the response
    pub status_code: u16,
}

/// Successful result of an API call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiResponse<T> {
    /// The body was decoded into the requested type.
    Content(T),
    /// The server acknowledged the request without content.
    Acknowledged(DefaultResponse),
}

impl<T> ApiResponse<T> {
    /// Returns the decoded content, if any.
    #[must_use]
    pub fn into_content(self) -> Option<T> {
        match self {
            Self::Content(value) => Some(value),
            Self::Acknowledged(_) => None,
        }
    }

    /// Returns the acknowledgement, if the server sent no content.
    #[must_use]
    pub const fn acknowledgement(&self) -> Option<&DefaultResponse> {
        match self {
            Self::Content(_) => None,
            Self::Acknowledged(ack) => Some(ack),
        }
    }

    /// Returns true for a `202` or `204` outcome.
    #[must_use]
    pub const fn is_acknowledged(&self) -> bool {
        matches!(self, Self::Acknowledged(_))
    }
}

/// Pagination links of a collection response.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Links {
    pub first: Option<String>,
    pub last: Option<String>,
    pub prev: Option<String>,
    pub next: Option<String>,
    #[serde(rename = "self")]
    pub self_link: Option<String>,
}

/// Pagination counters of a collection response.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Meta {
    pub current_page: u64,
    pub last_page: u64,
    pub per_page: u64,
    pub from: u64,
    pub to: u64,
    pub total: u64,
}

/// JSON:API collection envelope.
///
/// `T` is the resource object type of the `data` array.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ListResponse<T> {
    pub data: Vec<T>,
    #[serde(default)]
    pub included: Vec<serde_json::Value>,
    #[serde(default)]
    pub links: Links,
    #[serde(default)]
    pub meta: Meta,
}

/// Reads the body of `response` and classifies it.
///
/// - `202` and `204` yield [`ApiResponse::Acknowledged`]
/// - any other status in `200..400` decodes the body as JSON into `T`
/// - everything else becomes an `"API error"`
///
/// # Errors
///
/// Returns a [`PingenError`] carrying the response status and headers when
/// the body cannot be read, cannot be decoded, or the status is an error.
pub async fn interpret_response<T: DeserializeOwned>(
    response: HttpResponse,
) -> Result<ApiResponse<T>, PingenError> {
    let HttpResponse {
        status,
        headers,
        body,
    } = response;

    let bytes = match body.collect().await {
        Ok(bytes) => bytes,
        Err(e) => {
            tracing::warn!(status = %status, error = %e, "Failed to read response body");
            return Err(
                PingenError::from_response("Failed to read response body", "", status, &headers)
                    .with_source(e),
            );
        }
    };

    if status == StatusCode::NO_CONTENT || status == StatusCode::ACCEPTED {
        return Ok(ApiResponse::Acknowledged(DefaultResponse {
            body: String::from_utf8_lossy(&bytes).into_owned(),
            status_code: status.as_u16(),
        }));
    }

    let text = String::from_utf8_lossy(&bytes);

    if (200..400).contains(&status.as_u16()) {
        return serde_json::from_slice(&bytes)
            .map(ApiResponse::Content)
            .map_err(|e| {
                tracing::debug!(status = %status, error = %e, "Response body did not decode");
                PingenError::from_response("Failed to parse response body", &text, status, &headers)
                    .with_source(e)
            });
    }

    tracing::debug!(status = %status, "API returned an error status");
    Err(PingenError::from_response(
        "API error",
        &text,
        status,
        &headers,
    ))
}
