//! Access token exchange.

use std::collections::BTreeMap;

use http::header::{CONTENT_TYPE, USER_AGENT};
use http::{HeaderValue, StatusCode};
use serde::{Deserialize, Serialize};

use crate::api::build_url;
use crate::config::Config;
use crate::error::{PingenError, convert_headers};
use crate::transport::{HttpClient, HttpRequest};

/// Token endpoint, relative to the API base URL.
pub const ACCESS_TOKEN_PATH: &str = "/auth/access-tokens";

const FORM_URLENCODED: &str = "application/x-www-form-urlencoded";
const TOKEN_FAILED: &str = "Failed to obtain access token";

/// Successful token endpoint reply.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TokenResponse {
    /// Bearer token for [`ApiRequestor`](crate::api::ApiRequestor)
    pub access_token: String,

    /// Usually `Bearer`
    #[serde(default)]
    pub token_type: String,

    /// Lifetime in seconds
    #[serde(default)]
    pub expires_in: u64,

    /// Any further fields the server sent
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

/// Requests an access token from the token endpoint.
///
/// `params` carries the grant, e.g. `grant_type=client_credentials` and
/// `scope`. `client_id` and `client_secret` always come from `config`; a key
/// given twice keeps its last value.
///
/// # Errors
///
/// - `"Internal error"` (500) if the request cannot be sent
/// - kind [`Authentication`](crate::error::ErrorKind::Authentication) on `401`
/// - `"Failed to obtain access token"` for any other non-2xx status
/// - `"Failed to parse response body"` if the reply is not a token
pub async fn get_token<C: HttpClient>(
    client: &C,
    config: &Config,
    params: &[(&str, &str)],
) -> Result<TokenResponse, PingenError> {
    let mut form: BTreeMap<&str, &str> = params.iter().copied().collect();
    form.insert("client_id", config.client_id());
    form.insert("client_secret", config.client_secret());

    let body = url::form_urlencoded::Serializer::new(String::new())
        .extend_pairs(form)
        .finish();

    let url = build_url(config.api_base_url(), ACCESS_TOKEN_PATH, &[])
        .map_err(PingenError::internal)?;
    let user_agent =
        HeaderValue::from_str(config.user_agent()).map_err(PingenError::internal)?;

    tracing::debug!(url = %url, "Requesting access token");

    let request = HttpRequest::post(url)
        .with_header(CONTENT_TYPE, HeaderValue::from_static(FORM_URLENCODED))
        .with_header(USER_AGENT, user_agent)
        .with_body(body.into_bytes())
        .with_timeout(config.request_timeout());

    let response = client.request(request).await.map_err(|e| {
        tracing::warn!(error = %e, "Token request failed");
        PingenError::internal(e)
    })?;

    let status = response.status;
    let headers = response.headers;
    let bytes = response.body.collect().await.map_err(|e| {
        PingenError::from_response("Failed to read response body", "", status, &headers)
            .with_source(e)
    })?;
    let text = String::from_utf8_lossy(&bytes);

    if status == StatusCode::UNAUTHORIZED {
        tracing::warn!("Token request rejected: invalid client credentials");
        return Err(PingenError::authentication(
            TOKEN_FAILED,
            &text,
            status.as_u16(),
            Some(convert_headers(&headers)),
        ));
    }

    if !status.is_success() {
        tracing::warn!(status = %status, "Token request rejected");
        return Err(PingenError::from_response(
            TOKEN_FAILED,
            &text,
            status,
            &headers,
        ));
    }

    serde_json::from_slice(&bytes).map_err(|e| {
        PingenError::from_response("Failed to parse response body", &text, status, &headers)
            .with_source(e)
    })
}
