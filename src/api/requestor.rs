//! Authenticated request execution against the Pingen API.

use std::path::Path;

use http::header::{CONTENT_LENGTH, CONTENT_TYPE};
use http::{HeaderMap, HeaderValue, Method, StatusCode};
use serde::de::DeserializeOwned;
use tokio_stream::StreamExt;
use tokio_util::io::ReaderStream;
use url::Url;

use super::headers::compose_headers;
use super::response::{ApiResponse, interpret_response};
use super::url::build_url;
use crate::config::Config;
use crate::error::PingenError;
use crate::transport::{
    BodyStream, HttpClient, HttpError, HttpRequest, HttpResponse, RequestBody, ReqwestClient,
};

const OCTET_STREAM: &str = "application/octet-stream";

/// Issues requests on behalf of one access token.
///
/// Holds only read-only state, so a single requestor can serve concurrent
/// calls from many tasks.
///
/// # Type Parameters
///
/// - `C`: The HTTP client implementation (defaults to [`ReqwestClient`])
///
/// # Example
///
/// ```no_run
/// use pingen2_sdk::api::ApiRequestor;
/// use pingen2_sdk::config::{Config, Environment};
///
/// # async fn demo() -> Result<(), pingen2_sdk::error::PingenError> {
/// let config = Config::new("id", "secret", Environment::Staging).unwrap();
/// let requestor = ApiRequestor::new("access-token", config);
///
/// let organisations = requestor
///     .get::<serde_json::Value>("/organisations", &[("page[limit]", "10")], None)
///     .await?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct ApiRequestor<C = ReqwestClient> {
    access_token: String,
    config: Config,
    client: C,
}

impl ApiRequestor<ReqwestClient> {
    /// Creates a requestor backed by a fresh [`ReqwestClient`].
    #[must_use]
    pub fn new(access_token: impl Into<String>, config: Config) -> Self {
        Self::with_client(access_token, config, ReqwestClient::new())
    }
}

impl<C> ApiRequestor<C> {
    /// Creates a requestor with a caller-provided HTTP client.
    #[must_use]
    pub fn with_client(access_token: impl Into<String>, config: Config, client: C) -> Self {
        Self {
            access_token: access_token.into(),
            config,
            client,
        }
    }

    /// Returns the configuration this requestor was built with.
    #[must_use]
    pub const fn config(&self) -> &Config {
        &self.config
    }

    /// Returns the underlying HTTP client.
    #[must_use]
    pub const fn client(&self) -> &C {
        &self.client
    }

    /// Resolves `path` against the API base URL and encodes `params`.
    fn prepare_url(&self, path: &str, params: &[(&str, &str)]) -> Result<Url, PingenError> {
        build_url(self.config.api_base_url(), path, params).map_err(|e| {
            tracing::warn!(path, error = %e, "Failed to build request URL");
            PingenError::internal(HttpError::InvalidUrl(e.to_string()))
        })
    }

    /// Canonical headers plus the caller's extras.
    fn request_headers(&self, extra: Option<&HeaderMap>) -> Result<HeaderMap, PingenError> {
        compose_headers(self.config.user_agent(), &self.access_token, extra)
            .map_err(PingenError::internal)
    }
}

impl<C: HttpClient> ApiRequestor<C> {
    /// Fetches `path` and decodes the JSON body into `T`.
    ///
    /// # Errors
    ///
    /// See [`interpret_response`]; transport failures yield an
    /// `"Internal error"` with status 500.
    pub async fn get<T: DeserializeOwned>(
        &self,
        path: &str,
        params: &[(&str, &str)],
        extra_headers: Option<&HeaderMap>,
    ) -> Result<ApiResponse<T>, PingenError> {
        self.perform(Method::GET, path, params, RequestBody::Empty, extra_headers)
            .await
    }

    /// Creates a resource from a serialized JSON:API payload.
    ///
    /// # Errors
    ///
    /// Same as [`get`](Self::get).
    pub async fn post<T: DeserializeOwned>(
        &self,
        path: &str,
        payload: Vec<u8>,
        extra_headers: Option<&HeaderMap>,
    ) -> Result<ApiResponse<T>, PingenError> {
        self.perform(Method::POST, path, &[], payload.into(), extra_headers)
            .await
    }

    /// Updates a resource from a serialized JSON:API payload.
    ///
    /// # Errors
    ///
    /// Same as [`get`](Self::get).
    pub async fn patch<T: DeserializeOwned>(
        &self,
        path: &str,
        payload: Vec<u8>,
        extra_headers: Option<&HeaderMap>,
    ) -> Result<ApiResponse<T>, PingenError> {
        self.perform(Method::PATCH, path, &[], payload.into(), extra_headers)
            .await
    }

    /// Triggers a cancel action with a bodiless PATCH.
    ///
    /// # Errors
    ///
    /// Same as [`get`](Self::get).
    pub async fn cancel(&self, path: &str) -> Result<ApiResponse<serde_json::Value>, PingenError> {
        self.perform(Method::PATCH, path, &[], RequestBody::Empty, None)
            .await
    }

    /// Deletes the resource at `path`.
    ///
    /// # Errors
    ///
    /// Same as [`get`](Self::get).
    pub async fn delete(&self, path: &str) -> Result<ApiResponse<serde_json::Value>, PingenError> {
        self.perform(Method::DELETE, path, &[], RequestBody::Empty, None)
            .await
    }

    /// Uploads raw bytes to an absolute (typically pre-signed) URL.
    ///
    /// Only `Content-Type: application/octet-stream` is sent: no
    /// credentials, no user agent. The upload is not bounded by the request
    /// timeout.
    ///
    /// # Errors
    ///
    /// - `"Internal error"` (500) if the URL is invalid or the transport fails
    /// - `"Api error"` carrying the real status for any status `>= 400`
    pub async fn put(&self, url: &str, body: impl Into<RequestBody>) -> Result<(), PingenError> {
        self.put_with_headers(url, body.into(), HeaderMap::new())
            .await
    }

    /// Streams the file at `path` to `url` without buffering it.
    ///
    /// # Errors
    ///
    /// `"Failed to open file"` (500) if the file cannot be opened, otherwise
    /// as [`put`](Self::put).
    pub async fn put_file(&self, url: &str, path: &Path) -> Result<(), PingenError> {
        let open_failed = |e: std::io::Error| {
            tracing::warn!(path = %path.display(), error = %e, "Failed to open upload file");
            PingenError::new(
                "Failed to open file",
                "",
                StatusCode::INTERNAL_SERVER_ERROR.as_u16(),
                None,
            )
            .with_source(e)
        };

        let file = tokio::fs::File::open(path).await.map_err(open_failed)?;
        let len = file.metadata().await.map_err(open_failed)?.len();

        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_LENGTH, HeaderValue::from(len));

        let stream = ReaderStream::new(file)
            .map(|chunk| chunk.map_err(|e| HttpError::Body(Box::new(e))));

        self.put_with_headers(url, BodyStream::from_stream(stream).into(), headers)
            .await
    }

    /// Opens `path` and hands back the undecoded body.
    ///
    /// The caller owns the returned stream; dropping it releases the
    /// connection.
    ///
    /// # Errors
    ///
    /// - `"Invalid HTTP response"` if the status is anything but `200`
    /// - `"Internal error"` (500) if the transport fails
    pub async fn stream(&self, path: &str) -> Result<BodyStream, PingenError> {
        let url = self.prepare_url(path, &[])?;
        let headers = self.request_headers(None)?;

        tracing::debug!(method = "GET", url = %url, "Opening stream");

        let request = HttpRequest::get(url)
            .with_headers(headers)
            .with_timeout(self.config.request_timeout());

        let response = self.send(request).await?;

        if response.status != StatusCode::OK {
            tracing::debug!(status = %response.status, "Stream request rejected");
            return Err(PingenError::from_response(
                "Invalid HTTP response",
                &format!("Stream request failed with status {}", response.status.as_u16()),
                response.status,
                &response.headers,
            ));
        }

        Ok(response.body)
    }

    async fn perform<T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        params: &[(&str, &str)],
        body: RequestBody,
        extra_headers: Option<&HeaderMap>,
    ) -> Result<ApiResponse<T>, PingenError> {
        let url = self.prepare_url(path, params)?;
        let headers = self.request_headers(extra_headers)?;

        tracing::debug!(method = %method, url = %url, "Sending request");

        let request = HttpRequest::new(method, url)
            .with_headers(headers)
            .with_body(body)
            .with_timeout(self.config.request_timeout());

        let response = self.send(request).await?;
        interpret_response(response).await
    }

    async fn put_with_headers(
        &self,
        url: &str,
        body: RequestBody,
        mut headers: HeaderMap,
    ) -> Result<(), PingenError> {
        let url = Url::parse(url).map_err(|e| {
            tracing::warn!(error = %e, "Invalid upload URL");
            PingenError::internal(HttpError::InvalidUrl(e.to_string()))
        })?;

        headers.insert(CONTENT_TYPE, HeaderValue::from_static(OCTET_STREAM));

        tracing::debug!(method = "PUT", host = url.host_str().unwrap_or_default(), "Uploading");

        let response = self
            .send(HttpRequest::put(url).with_headers(headers).with_body(body))
            .await?;

        if response.status.as_u16() >= 400 {
            tracing::debug!(status = %response.status, "Upload rejected");
            return Err(PingenError::from_response(
                "Api error",
                &format!("PUT request failed with status {}", response.status.as_u16()),
                response.status,
                &response.headers,
            ));
        }

        Ok(())
    }

    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, PingenError> {
        self.client.request(request).await.map_err(|e| {
            tracing::warn!(error = %e, "Request failed");
            PingenError::internal(e)
        })
    }
}
