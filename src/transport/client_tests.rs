//! Tests for `ReqwestClient`.
//!
//! Exchanges are exercised against a local `wiremock` server.

use super::{BodyStream, HttpClient, HttpError, HttpRequest, ReqwestClient};

use wiremock::matchers::{body_string, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

mod reqwest_client {
    use super::*;

    #[test]
    fn debug_format_is_readable() {
        let client = ReqwestClient::new();
        let debug = format!("{client:?}");

        assert!(debug.contains("ReqwestClient"));
    }

    #[test]
    fn from_client_accepts_custom_client() {
        let custom = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(30))
            .build()
            .unwrap();
        let client = ReqwestClient::from_client(custom);

        let _ = format!("{client:?}");
    }

    #[test]
    fn client_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<ReqwestClient>();
    }

    #[tokio::test]
    async fn sends_headers_and_body() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/test"))
            .and(header("x-custom", "value"))
            .and(body_string("payload"))
            .respond_with(ResponseTemplate::new(201).set_body_string("created"))
            .expect(1)
            .mount(&server)
            .await;

        let url = url::Url::parse(&format!("{}/api/test", server.uri())).unwrap();
        let req = HttpRequest::post(url)
            .with_header(
                http::HeaderName::from_static("x-custom"),
                http::HeaderValue::from_static("value"),
            )
            .with_body(b"payload".to_vec());

        let response = ReqwestClient::new().request(req).await.unwrap();

        assert_eq!(response.status, http::StatusCode::CREATED);
        assert_eq!(response.body.collect().await.unwrap(), b"created");
    }

    #[tokio::test]
    async fn streams_request_body() {
        let server = MockServer::start().await;
        Mock::given(method("PUT"))
            .and(body_string("streamed content"))
            .respond_with(ResponseTemplate::new(200))
            .expect(1)
            .mount(&server)
            .await;

        let url = url::Url::parse(&server.uri()).unwrap();
        let req = HttpRequest::put(url).with_body(BodyStream::from_bytes("streamed content"));

        let response = ReqwestClient::new().request(req).await.unwrap();

        assert_eq!(response.status, http::StatusCode::OK);
    }

    #[tokio::test]
    async fn does_not_follow_redirects() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(
                ResponseTemplate::new(302).insert_header("location", "https://example.com/"),
            )
            .mount(&server)
            .await;

        let url = url::Url::parse(&server.uri()).unwrap();
        let response = ReqwestClient::new()
            .request(HttpRequest::get(url))
            .await
            .unwrap();

        assert_eq!(response.status, http::StatusCode::FOUND);
    }

    #[tokio::test]
    async fn try_new_does_not_follow_redirects() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/moved"))
            .respond_with(ResponseTemplate::new(301).insert_header("location", "/target"))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/target"))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&server)
            .await;

        let url = url::Url::parse(&format!("{}/moved", server.uri())).unwrap();
        let response = ReqwestClient::try_new()
            .unwrap()
            .request(HttpRequest::get(url))
            .await
            .unwrap();

        assert_eq!(response.status, http::StatusCode::MOVED_PERMANENTLY);
    }

    #[tokio::test]
    async fn slow_response_times_out() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_delay(std::time::Duration::from_secs(2)))
            .mount(&server)
            .await;

        let url = url::Url::parse(&server.uri()).unwrap();
        let req = HttpRequest::get(url).with_timeout(std::time::Duration::from_millis(100));

        let result = ReqwestClient::new().request(req).await;

        assert!(matches!(result, Err(HttpError::Timeout)));
    }

    #[tokio::test]
    async fn request_to_invalid_host_returns_error_or_proxy_response() {
        let client = ReqwestClient::new();
        let url = url::Url::parse("http://invalid.invalid.invalid/").unwrap();

        let result = client.request(HttpRequest::get(url)).await;

        // In environments with a proxy, the proxy may answer with an
        // HTTP error response instead of failing the connection.
        match result {
            Err(HttpError::Connection(_)) => {}
            Ok(resp) if !resp.is_success() => {}
            other => panic!("Expected connection error or proxy error response, got {other:?}"),
        }
    }
}
