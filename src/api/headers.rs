//! Canonical request header composition.

use http::header::{ACCEPT, AUTHORIZATION, CONTENT_TYPE, InvalidHeaderValue, USER_AGENT};
use http::{HeaderMap, HeaderValue};

/// Media type of every JSON:API request and response body.
pub const JSON_API_MEDIA_TYPE: &str = "application/vnd.api+json";

/// Builds the header set for an authenticated API request.
///
/// `User-Agent`, `Authorization: Bearer <token>`, `Content-Type` and
/// `Accept` are always present. Entries from `extra` are appended after
/// them, so a colliding name ends up with both values rather than
/// replacing the base one.
///
/// # Errors
///
/// Returns an error if the user agent or token is not a valid header value.
pub fn compose_headers(
    user_agent: &str,
    access_token: &str,
    extra: Option<&HeaderMap>,
) -> Result<HeaderMap, InvalidHeaderValue> {
    let mut headers = HeaderMap::new();

    let mut authorization = HeaderValue::from_str(&format!("Bearer {access_token}"))?;
    authorization.set_sensitive(true);

    headers.append(USER_AGENT, HeaderValue::from_str(user_agent)?);
    headers.append(AUTHORIZATION, authorization);
    headers.append(CONTENT_TYPE, HeaderValue::from_static(JSON_API_MEDIA_TYPE));
    headers.append(ACCEPT, HeaderValue::from_static(JSON_API_MEDIA_TYPE));

    if let Some(extra) = extra {
        for (name, value) in extra {
            headers.append(name, value.clone());
        }
    }

    Ok(headers)
}
