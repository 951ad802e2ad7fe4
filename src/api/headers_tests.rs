//! Tests for request header composition.

use http::header::{ACCEPT, AUTHORIZATION, CONTENT_TYPE, USER_AGENT};
use http::{HeaderMap, HeaderName, HeaderValue};

use super::headers::{JSON_API_MEDIA_TYPE, compose_headers};

#[test]
fn sets_canonical_headers() {
    let headers = compose_headers("PINGEN.SDK.RUST", "dummyToken", None).unwrap();

    assert_eq!(headers.get(USER_AGENT).unwrap(), "PINGEN.SDK.RUST");
    assert_eq!(headers.get(AUTHORIZATION).unwrap(), "Bearer dummyToken");
    assert_eq!(headers.get(CONTENT_TYPE).unwrap(), JSON_API_MEDIA_TYPE);
    assert_eq!(headers.get(ACCEPT).unwrap(), JSON_API_MEDIA_TYPE);
    assert_eq!(headers.len(), 4);
}

#[test]
fn appends_extra_headers() {
    let mut extra = HeaderMap::new();
    extra.insert(
        HeaderName::from_static("custom-header"),
        HeaderValue::from_static("CustomValue"),
    );

    let headers = compose_headers("agent", "token", Some(&extra)).unwrap();

    assert_eq!(headers.get("Custom-Header").unwrap(), "CustomValue");
    assert_eq!(headers.get(AUTHORIZATION).unwrap(), "Bearer token");
}

#[test]
fn colliding_extra_header_keeps_base_value() {
    let mut extra = HeaderMap::new();
    extra.insert(ACCEPT, HeaderValue::from_static("application/pdf"));

    let headers = compose_headers("agent", "token", Some(&extra)).unwrap();

    let values: Vec<_> = headers.get_all(ACCEPT).iter().collect();
    assert_eq!(values, [JSON_API_MEDIA_TYPE, "application/pdf"]);
}

#[test]
fn authorization_is_marked_sensitive() {
    let headers = compose_headers("agent", "token", None).unwrap();

    assert!(headers.get(AUTHORIZATION).unwrap().is_sensitive());
}

#[test]
fn rejects_token_with_control_characters() {
    assert!(compose_headers("agent", "bad\ntoken", None).is_err());
}
